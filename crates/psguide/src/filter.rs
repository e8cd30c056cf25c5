//! Search and priority filtering of the checklist.
//!
//! [`filter_sections`] is a pure function of the sections and a [`Filter`];
//! it never looks at progress, so changing filters cannot change what is
//! marked done.

use tracing::trace;

use crate::document::{ChecklistItem, Priority, Section};

/// Transient filter state: a search query and the enabled priority tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    query: String,
    enabled: [bool; 3],
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            query: String::new(),
            enabled: [true; 3],
        }
    }
}

impl Filter {
    /// A filter with no query and every priority enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Disable the given priorities.
    #[must_use]
    pub fn hiding(mut self, priorities: &[Priority]) -> Self {
        for p in priorities {
            self.set_enabled(*p, false);
        }
        self
    }

    /// The raw query as entered.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Enable or disable a priority tier.
    pub fn set_enabled(&mut self, priority: Priority, enabled: bool) {
        self.enabled[priority.index()] = enabled;
    }

    /// Flip a priority tier on or off.
    pub fn toggle(&mut self, priority: Priority) {
        let slot = &mut self.enabled[priority.index()];
        *slot = !*slot;
    }

    /// Whether items of this priority are shown.
    #[must_use]
    pub fn is_enabled(&self, priority: Priority) -> bool {
        self.enabled[priority.index()]
    }

    /// The query as used for matching: trimmed and lowercased.
    #[must_use]
    pub fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }
}

/// A section as seen through a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView<'a> {
    /// The underlying section, unfiltered.
    pub section: &'a Section,
    /// Items that passed the filter, in document order.
    pub items: Vec<&'a ChecklistItem>,
}

impl SectionView<'_> {
    /// Whether every item of the section was filtered out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Apply a filter to the sections.
///
/// - An item is kept if its priority is enabled and, when the query is
///   non-empty, the query occurs (case-insensitively) in the item's point or
///   details, or in the section's title or description.
/// - With a non-empty query, a section is dropped when neither its title nor
///   description matches and none of its items were kept.
/// - An empty query never drops a section.
#[must_use]
pub fn filter_sections<'a>(sections: &'a [Section], filter: &Filter) -> Vec<SectionView<'a>> {
    let needle = filter.needle();
    let searching = !needle.is_empty();

    sections
        .iter()
        .filter_map(|section| {
            let section_matches = searching && section.matches(&needle);
            let items: Vec<&ChecklistItem> = section
                .checklist
                .iter()
                .filter(|item| filter.is_enabled(item.priority))
                .filter(|item| !searching || section_matches || item.matches(&needle))
                .collect();

            if searching && !section_matches && items.is_empty() {
                trace!(section = %section.slug, "Section dropped by search");
                return None;
            }
            Some(SectionView { section, items })
        })
        .collect()
}
