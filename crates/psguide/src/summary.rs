//! Completion aggregation over the checklist.
//!
//! Every number here is recomputed from the [`ProgressMap`]; nothing is cached
//! between calls.

use serde::Serialize;

use crate::document::{ChecklistItem, Document, Priority, Section};
use crate::store::ProgressMap;

/// Done/total counts and the rounded percentage for a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Items marked done.
    pub done: usize,
    /// Items in the set.
    pub total: usize,
    /// `round(100 * done / total)`, or 0 for an empty set.
    pub percent: u8,
}

impl Completion {
    /// Build from counts. `done` is clamped to `total`.
    #[must_use]
    pub fn new(done: usize, total: usize) -> Self {
        let done = done.min(total);
        Self {
            done,
            total,
            percent: percent(done, total),
        }
    }

    /// Aggregate over any set of items.
    #[must_use]
    pub fn of<'a, I>(items: I, progress: &ProgressMap) -> Self
    where
        I: IntoIterator<Item = &'a ChecklistItem>,
    {
        let (done, total) = items.into_iter().fold((0, 0), |(done, total), item| {
            (done + usize::from(is_done(progress, &item.id)), total + 1)
        });
        Self::new(done, total)
    }

    /// Whether every item is done (false for an empty set).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }

    fn record(&mut self, done: bool) {
        *self = Self::new(self.done + usize::from(done), self.total + 1);
    }
}

/// Whether the identity is marked done. Absent means not done.
#[must_use]
pub fn is_done(progress: &ProgressMap, id: &str) -> bool {
    progress.get(id).copied().unwrap_or(false)
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done as u128;
    let total = total as u128;
    // Integer form of round-half-up on 100 * done / total.
    let rounded = (200 * done + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Completion over a section's full checklist, ignoring any filter.
#[must_use]
pub fn section_progress(section: &Section, progress: &ProgressMap) -> Completion {
    Completion::of(&section.checklist, progress)
}

/// Number of items per priority in a section, in [`Priority::ALL`] order,
/// omitting tiers with no items.
#[must_use]
pub fn priority_counts(section: &Section) -> Vec<(Priority, usize)> {
    let mut counts = [0usize; 3];
    for item in &section.checklist {
        counts[item.priority.index()] += 1;
    }
    Priority::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// Completion for one priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityBucket {
    /// The tier.
    pub priority: Priority,
    /// Completion of every item in this tier.
    #[serde(flatten)]
    pub completion: Completion,
}

/// Per-priority and overall completion for the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrioritySummary {
    /// One bucket per tier, in [`Priority::ALL`] order.
    pub buckets: [PriorityBucket; 3],
    /// Completion across all tiers.
    pub overall: Completion,
}

impl PrioritySummary {
    /// Completion for a single tier.
    #[must_use]
    pub fn get(&self, priority: Priority) -> Completion {
        self.buckets[priority.index()].completion
    }
}

/// Partition every item of the document into the fixed priority tiers.
///
/// Filters do not apply here: the summary always covers the whole document.
#[must_use]
pub fn priority_summary(document: &Document, progress: &ProgressMap) -> PrioritySummary {
    let mut buckets = Priority::ALL.map(|priority| PriorityBucket {
        priority,
        completion: Completion::default(),
    });
    let mut overall = Completion::default();

    for (_, item) in document.items() {
        let done = is_done(progress, &item.id);
        buckets[item.priority.index()].completion.record(done);
        overall.record(done);
    }

    PrioritySummary { buckets, overall }
}

/// Headline numbers for the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Number of sections.
    pub sections: usize,
    /// Completion across every item.
    #[serde(flatten)]
    pub completion: Completion,
}

/// Compute the headline numbers.
#[must_use]
pub fn overview(document: &Document, progress: &ProgressMap) -> Overview {
    Overview {
        sections: document.len(),
        completion: Completion::of(document.items().map(|(_, item)| item), progress),
    }
}
