//! Loading and validating the checklist document.
//!
//! The YAML is first parsed into an untyped [`serde_yaml::Value`], then walked
//! node by node. Every violation is reported with the path of the offending
//! node, so nothing unchecked ever reaches the derivation layer.

use std::collections::HashSet;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use super::identity::IdentityAllocator;
use super::model::{ChecklistItem, Document, Priority, Section};
use crate::error::{Error, Result};

impl Document {
    /// Read and validate a checklist document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentRead`] if the file cannot be read, or any of
    /// the errors of [`Document::from_yaml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading checklist from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Self::from_yaml_str(&text)?;
        debug!(
            sections = document.len(),
            items = document.total_items(),
            "Checklist loaded from {}",
            path.display()
        );
        Ok(document)
    }

    /// Parse and validate a checklist document.
    ///
    /// # Errors
    ///
    /// - [`Error::DocumentParse`] if the text is not valid YAML.
    /// - [`Error::DocumentShape`] if the top level is not a sequence.
    /// - [`Error::DocumentSchema`] if a section or item is malformed, or two
    ///   sections share a slug.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text)?;
        let entries = match root {
            Value::Sequence(entries) => entries,
            other => {
                return Err(Error::DocumentShape {
                    found: kind_of(&other),
                })
            }
        };

        let mut seen_slugs = HashSet::new();
        let mut sections = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let path = format!("[{index}]");
            let section = parse_section(entry, &path)?;
            if !seen_slugs.insert(section.slug.clone()) {
                return Err(Error::schema(
                    format!("{path}.slug"),
                    format!("duplicate section slug '{}'", section.slug),
                ));
            }
            sections.push(section);
        }

        Ok(Self::from_sections(sections))
    }
}

fn parse_section(value: &Value, path: &str) -> Result<Section> {
    if !value.is_mapping() {
        return Err(Error::schema(
            path,
            format!("expected a mapping, found {}", kind_of(value)),
        ));
    }

    let title = required_string(value, "title", path)?;
    let slug = required_string(value, "slug", path)?;
    let description = optional_string(value, "description", path)?;
    let intro = optional_string(value, "intro", path)?;
    let icon = optional_string(value, "icon", path)?;

    let checklist = match value.get("checklist") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => {
            let mut ids = IdentityAllocator::new();
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    parse_item(item, &slug, &mut ids, &format!("{path}.checklist[{i}]"))
                })
                .collect::<Result<Vec<_>>>()?
        }
        Some(other) => {
            return Err(Error::schema(
                format!("{path}.checklist"),
                format!("expected a sequence, found {}", kind_of(other)),
            ))
        }
    };

    Ok(Section {
        title,
        slug,
        description,
        intro,
        icon,
        checklist,
    })
}

fn parse_item(
    value: &Value,
    section_slug: &str,
    ids: &mut IdentityAllocator,
    path: &str,
) -> Result<ChecklistItem> {
    if !value.is_mapping() {
        return Err(Error::schema(
            path,
            format!("expected a mapping, found {}", kind_of(value)),
        ));
    }

    let point = required_string(value, "point", path)?;
    let details = optional_string(value, "details", path)?;
    let priority = Priority::from_document(value.get("priority").and_then(Value::as_str));

    Ok(ChecklistItem {
        id: ids.allocate(section_slug, &point),
        point,
        details,
        priority,
    })
}

fn required_string(value: &Value, key: &str, path: &str) -> Result<String> {
    match optional_string(value, key, path)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(Error::schema(format!("{path}.{key}"), "must not be empty")),
        None => Err(Error::schema(format!("{path}.{key}"), "missing required field")),
    }
}

/// Scalars are accepted as text, so `title: 2024` reads as `"2024"`.
fn optional_string(value: &Value, key: &str, path: &str) -> Result<Option<String>> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(Error::schema(
            format!("{path}.{key}"),
            format!("expected a string, found {}", kind_of(other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
- title: Authentication
  slug: authentication
  description: Passwords and second factors
  icon: password
  checklist:
    - point: Use a Strong Password
      details: Long and unique.
      priority: Essential
    - point: Enable 2FA
      priority: essential
    - point: Use a Hardware Key
      priority: Advanced
- title: Web Browsing
  slug: web-browsing
  checklist:
    - point: Block Trackers
    - point: Use a Private Search Engine
      priority: whatever
";

    #[test]
    fn test_load_sample() {
        let doc = Document::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.total_items(), 5);

        let auth = &doc.sections()[0];
        assert_eq!(auth.slug, "authentication");
        assert_eq!(auth.icon.as_deref(), Some("password"));
        assert_eq!(auth.checklist[0].id, "authentication__use-a-strong-password");
        assert_eq!(auth.checklist[0].priority, Priority::Essential);
        assert_eq!(auth.checklist[2].priority, Priority::Advanced);
    }

    #[test]
    fn test_missing_and_unknown_priority_default_to_optional() {
        let doc = Document::from_yaml_str(SAMPLE).unwrap();
        let web = &doc.sections()[1];
        assert_eq!(web.checklist[0].priority, Priority::Optional);
        assert_eq!(web.checklist[1].priority, Priority::Optional);
    }

    #[test]
    fn test_non_string_priority_defaults_to_optional() {
        let doc = Document::from_yaml_str(
            "- {title: T, slug: t, checklist: [{point: P, priority: 3}]}",
        )
        .unwrap();
        assert_eq!(doc.sections()[0].checklist[0].priority, Priority::Optional);
    }

    #[test]
    fn test_top_level_mapping_is_shape_error() {
        let err = Document::from_yaml_str("title: nope\nslug: nope\n").unwrap_err();
        assert!(matches!(err, Error::DocumentShape { found: "mapping" }));
    }

    #[test]
    fn test_scalar_document_is_shape_error() {
        let err = Document::from_yaml_str("just text").unwrap_err();
        assert!(matches!(err, Error::DocumentShape { found: "string" }));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = Document::from_yaml_str("- title: [unclosed").unwrap_err();
        assert!(matches!(err, Error::DocumentParse(_)));
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        let doc = Document::from_yaml_str("[]").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_missing_checklist_is_empty() {
        let doc = Document::from_yaml_str("- {title: T, slug: t}").unwrap();
        assert!(doc.sections()[0].is_empty());
    }

    #[test]
    fn test_missing_slug_reports_path() {
        let err = Document::from_yaml_str("- {title: A, slug: a}\n- {title: B}\n").unwrap_err();
        match err {
            Error::DocumentSchema { path, message } => {
                assert_eq!(path, "[1].slug");
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_point_rejected() {
        let err = Document::from_yaml_str("- {title: A, slug: a, checklist: [{point: '  '}]}")
            .unwrap_err();
        match err {
            Error::DocumentSchema { path, .. } => assert_eq!(path, "[0].checklist[0].point"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_section_not_mapping() {
        let err = Document::from_yaml_str("- just a string").unwrap_err();
        match err {
            Error::DocumentSchema { path, message } => {
                assert_eq!(path, "[0]");
                assert!(message.contains("string"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_checklist_not_sequence() {
        let err = Document::from_yaml_str("- {title: A, slug: a, checklist: nope}").unwrap_err();
        assert!(matches!(err, Error::DocumentSchema { ref path, .. } if path == "[0].checklist"));
    }

    #[test]
    fn test_nested_string_field_rejected() {
        let err = Document::from_yaml_str("- {title: A, slug: a, description: [x]}").unwrap_err();
        assert!(matches!(err, Error::DocumentSchema { ref path, .. } if path == "[0].description"));
    }

    #[test]
    fn test_duplicate_section_slug_rejected() {
        let err = Document::from_yaml_str("- {title: A, slug: a}\n- {title: B, slug: a}\n")
            .unwrap_err();
        match err {
            Error::DocumentSchema { path, message } => {
                assert_eq!(path, "[1].slug");
                assert!(message.contains("duplicate"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_points_are_disambiguated() {
        let doc = Document::from_yaml_str(
            "- {title: A, slug: a, checklist: [{point: Use 2FA}, {point: 'use 2fa!'}]}",
        )
        .unwrap();
        let items = &doc.sections()[0].checklist;
        assert_eq!(items[0].id, "a__use-2fa");
        assert_eq!(items[1].id, "a__use-2fa-2");
    }

    #[test]
    fn test_numeric_scalars_read_as_text() {
        let doc = Document::from_yaml_str("- {title: 2024, slug: y2024, checklist: [{point: 42}]}")
            .unwrap();
        assert_eq!(doc.sections()[0].title, "2024");
        assert_eq!(doc.sections()[0].checklist[0].point, "42");
    }

    #[test]
    fn test_identity_stable_across_reloads() {
        let first = Document::from_yaml_str(SAMPLE).unwrap();
        let second = Document::from_yaml_str(SAMPLE).unwrap();
        let a: Vec<_> = first.items().map(|(_, i)| i.id.clone()).collect();
        let b: Vec<_> = second.items().map(|(_, i)| i.id.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Document::load("/nonexistent/checklist.yml").unwrap_err();
        assert!(matches!(err, Error::DocumentRead { .. }));
    }
}
