//! Item identity derivation.
//!
//! An item's identity is the key its completion state is stored under. It is
//! built from the owning section's slug and the normalized point text, so it
//! survives reloads of the document as long as neither changes.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

/// Separator between the section slug and the item slug.
pub const IDENTITY_SEPARATOR: &str = "__";

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static pattern is valid"))
}

/// Normalize free text into a slug.
///
/// Lowercases the text, collapses every run of characters outside `[a-z0-9]`
/// into a single `-`, and trims leading and trailing `-`.
///
/// # Examples
///
/// ```
/// use psguide::document::slugify;
///
/// assert_eq!(slugify("Use a Password Manager!"), "use-a-password-manager");
/// assert_eq!(slugify("  --2FA--  "), "2fa");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    separator_runs()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Build the base identity for an item from its section slug and point text.
#[must_use]
pub fn item_identity(section_slug: &str, point: &str) -> String {
    format!("{section_slug}{IDENTITY_SEPARATOR}{}", slugify(point))
}

/// Hands out unique identities within one section.
///
/// The first item to claim a base identity keeps it unchanged. Later items
/// whose points normalize to the same base receive `-2`, `-3`, ... suffixes,
/// in document order, skipping any suffixed form already taken.
#[derive(Debug, Default)]
pub struct IdentityAllocator {
    used: HashSet<String>,
}

impl IdentityAllocator {
    /// Create an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an identity for the item with the given point.
    pub fn allocate(&mut self, section_slug: &str, point: &str) -> String {
        let base = item_identity(section_slug, point);
        if base.ends_with(IDENTITY_SEPARATOR) {
            warn!(
                section = %section_slug,
                point = %point,
                "Item point has no letters or digits, identity is only the section slug"
            );
        }
        if self.used.insert(base.clone()) {
            return base;
        }

        let mut n: usize = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                warn!(
                    identity = %candidate,
                    point = %point,
                    "Duplicate item identity in section, disambiguated by occurrence"
                );
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a   --  b"), "a-b");
        assert_eq!(slugify("Don't reuse passwords"), "don-t-reuse-passwords");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("!!Enable 2FA!!"), "enable-2fa");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_non_ascii_is_separator() {
        assert_eq!(slugify("café wifi"), "caf-wifi");
    }

    #[test]
    fn test_item_identity() {
        assert_eq!(
            item_identity("authentication", "Use a Strong Password"),
            "authentication__use-a-strong-password"
        );
    }

    #[test]
    fn test_identity_depends_only_on_normalized_point() {
        assert_eq!(
            item_identity("web", "Use HTTPS"),
            item_identity("web", "  use   https! ")
        );
        assert_ne!(item_identity("web", "Use HTTPS"), item_identity("mail", "Use HTTPS"));
    }

    #[test]
    fn test_allocator_first_keeps_base() {
        let mut alloc = IdentityAllocator::new();
        assert_eq!(alloc.allocate("s", "Use 2FA"), "s__use-2fa");
        assert_eq!(alloc.allocate("s", "Backups"), "s__backups");
    }

    #[test]
    fn test_allocator_disambiguates_by_occurrence() {
        let mut alloc = IdentityAllocator::new();
        assert_eq!(alloc.allocate("s", "Use 2FA"), "s__use-2fa");
        assert_eq!(alloc.allocate("s", "use 2fa"), "s__use-2fa-2");
        assert_eq!(alloc.allocate("s", "USE 2FA!"), "s__use-2fa-3");
    }

    #[test]
    fn test_allocator_punctuation_only_points() {
        crate::logging::init_test_logging();
        let mut alloc = IdentityAllocator::new();
        assert_eq!(alloc.allocate("a", "!!!"), "a__");
        assert_eq!(alloc.allocate("a", "???"), "a__-2");
        assert_eq!(alloc.allocate("a", "Real point"), "a__real-point");
    }

    #[test]
    fn test_allocator_skips_taken_suffix() {
        let mut alloc = IdentityAllocator::new();
        assert_eq!(alloc.allocate("s", "Use 2FA 2"), "s__use-2fa-2");
        assert_eq!(alloc.allocate("s", "Use 2FA"), "s__use-2fa");
        assert_eq!(alloc.allocate("s", "Use 2FA"), "s__use-2fa-3");
    }
}
