//! Typed checklist document.
//!
//! These types are only ever produced by the loader, which guarantees that
//! every section has a unique slug and every item carries a unique identity
//! within its section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Priority tier of a checklist item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must-do recommendations.
    Essential,
    /// Recommended but not critical. Also the tier for missing or unknown values.
    #[default]
    Optional,
    /// For users who want to go further.
    Advanced,
}

impl Priority {
    /// All tiers, in display order.
    pub const ALL: [Priority; 3] = [Self::Essential, Self::Optional, Self::Advanced];

    /// Lenient parse used for document values.
    ///
    /// Matching is case-insensitive after trimming. Anything unrecognized,
    /// including a missing value, falls back to [`Priority::Optional`].
    #[must_use]
    pub fn from_document(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Lowercase name, as used in documents and storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Optional => "optional",
            Self::Advanced => "advanced",
        }
    }

    /// Capitalized name for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Essential => "Essential",
            Self::Optional => "Optional",
            Self::Advanced => "Advanced",
        }
    }

    /// Position of this tier in [`Priority::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Essential => 0,
            Self::Optional => 1,
            Self::Advanced => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "essential" => Ok(Self::Essential),
            "optional" => Ok(Self::Optional),
            "advanced" => Ok(Self::Advanced),
            other => Err(Error::UnknownPriority {
                value: other.to_string(),
            }),
        }
    }
}

/// A single actionable recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Stable identity used as the progress key.
    pub id: String,
    /// Human-readable title of the recommendation.
    pub point: String,
    /// Optional markdown body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Priority tier.
    pub priority: Priority,
}

impl ChecklistItem {
    /// Whether `needle` (already lowercased) occurs in the point or details.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        contains_lowercase(&self.point, needle)
            || self
                .details
                .as_deref()
                .is_some_and(|d| contains_lowercase(d, needle))
    }
}

/// A named group of checklist items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Display title.
    pub title: String,
    /// Unique, human-assigned identifier.
    pub slug: String,
    /// Short description shown under the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Longer introduction text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Items in document order.
    pub checklist: Vec<ChecklistItem>,
}

impl Section {
    /// Whether `needle` (already lowercased) occurs in the title or description.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        contains_lowercase(&self.title, needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| contains_lowercase(d, needle))
    }

    /// Find an item by full identity, or by point text normalized the same
    /// way identities are.
    #[must_use]
    pub fn find_item(&self, query: &str) -> Option<&ChecklistItem> {
        if let Some(item) = self.checklist.iter().find(|i| i.id == query) {
            return Some(item);
        }
        let wanted = super::identity::item_identity(&self.slug, query);
        self.checklist.iter().find(|i| i.id == wanted)
    }

    /// Number of items in this section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checklist.len()
    }

    /// Whether this section has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checklist.is_empty()
    }

    /// Human-readable form of the slug (`dashes` become spaces).
    #[must_use]
    pub fn slug_label(&self) -> String {
        self.slug.replace('-', " ")
    }
}

/// A validated checklist document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub(crate) fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate every item together with its owning section.
    pub fn items(&self) -> impl Iterator<Item = (&Section, &ChecklistItem)> {
        self.sections
            .iter()
            .flat_map(|s| s.checklist.iter().map(move |i| (s, i)))
    }

    /// Total number of items across all sections.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Look up a section by slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if no section has this slug.
    pub fn section(&self, slug: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.slug == slug)
            .ok_or_else(|| Error::SectionNotFound {
                slug: slug.to_string(),
            })
    }

    /// Resolve an item by section slug and point text or identity.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the section or item does not exist.
    pub fn find_item(&self, section_slug: &str, query: &str) -> Result<&ChecklistItem> {
        let section = self.section(section_slug)?;
        section
            .find_item(query)
            .ok_or_else(|| Error::item_not_found(section_slug, query))
    }
}

fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
