//! Outline result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Heading level emitted in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels, outermost first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Label used in the JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }

    /// Parse a JSON label back into a level.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == label)
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl Heading {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The inferred outline of one document.
///
/// This is the only artifact written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title
    pub title: String,
    /// Headings in first-occurrence order
    pub outline: Vec<Heading>,
}

impl OutlineResult {
    pub fn new(title: impl Into<String>, outline: Vec<Heading>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The result used for unreadable or text-less documents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Number of headings in the outline.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }

    /// Number of headings at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|h| h.level == level).count()
    }
}

/// Validate an outline JSON string.
pub fn validate_outline_json(json: &str) -> Result<()> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::InvalidOutline(e.to_string()))?;
    validate_outline_value(&value)
}

/// Validate the shape of a parsed outline document.
///
/// Requires a string `title`, an array `outline`, and for each item a
/// `level` in H1/H2/H3, a non-empty string `text` and an integer `page >= 1`.
pub fn validate_outline_value(value: &Value) -> Result<()> {
    let invalid = |msg: String| -> Result<()> { Err(Error::InvalidOutline(msg)) };

    let Some(obj) = value.as_object() else {
        return invalid("top-level value must be an object".to_string());
    };

    for key in ["title", "outline"] {
        if !obj.contains_key(key) {
            return invalid(format!("missing required key: {}", key));
        }
    }

    if !obj["title"].is_string() {
        return invalid("title must be a string".to_string());
    }

    let Some(items) = obj["outline"].as_array() else {
        return invalid("outline must be a list".to_string());
    };

    for (idx, item) in items.iter().enumerate() {
        let Some(item) = item.as_object() else {
            return invalid(format!("outline item {} must be an object", idx));
        };

        for key in ["level", "text", "page"] {
            if !item.contains_key(key) {
                return invalid(format!("missing key in outline item {}: {}", idx, key));
            }
        }

        let level = item["level"].as_str().and_then(HeadingLevel::from_label);
        if level.is_none() {
            return invalid(format!("invalid level in outline item {}: {}", idx, item["level"]));
        }

        match item["text"].as_str() {
            Some(text) if !text.is_empty() => {}
            _ => return invalid(format!("text in outline item {} must be a non-empty string", idx)),
        }

        match item["page"].as_u64() {
            Some(page) if page >= 1 => {}
            _ => return invalid(format!("page in outline item {} must be a positive integer", idx)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading_level_labels() {
        assert_eq!(HeadingLevel::H2.as_str(), "H2");
        assert_eq!(HeadingLevel::from_label("H3"), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_label("H4"), None);
        assert_eq!(HeadingLevel::from_label("title"), None);
    }

    #[test]
    fn test_serialize_shape() {
        let result = OutlineResult::new(
            "Doc Title",
            vec![Heading::new(HeadingLevel::H1, "Introduction", 1)],
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Doc Title",
                "outline": [{"level": "H1", "text": "Introduction", "page": 1}]
            })
        );
    }

    #[test]
    fn test_empty_result_shape() {
        let value = serde_json::to_value(OutlineResult::empty()).unwrap();
        assert_eq!(value, json!({"title": "", "outline": []}));
        assert!(OutlineResult::empty().is_empty());
    }

    #[test]
    fn test_deserialize_roundtrip_levels() {
        let json = r#"{"title":"T","outline":[{"level":"H3","text":"Deep","page":4}]}"#;
        let result: OutlineResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.outline[0].level, HeadingLevel::H3);
        assert_eq!(result.count_level(HeadingLevel::H3), 1);
        assert_eq!(result.count_level(HeadingLevel::H1), 0);
    }

    #[test]
    fn test_validate_accepts_valid() {
        let json = r#"{"title": "X", "outline": [{"level": "H1", "text": "Intro", "page": 1}]}"#;
        assert!(validate_outline_json(json).is_ok());
        assert!(validate_outline_json(r#"{"title": "", "outline": []}"#).is_ok());
    }

    #[test]
    fn test_validate_rejects_invalid() {
        let cases = [
            json!([]),
            json!({"outline": []}),
            json!({"title": 3, "outline": []}),
            json!({"title": "t", "outline": {}}),
            json!({"title": "t", "outline": ["H1"]}),
            json!({"title": "t", "outline": [{"level": "H1", "text": "x"}]}),
            json!({"title": "t", "outline": [{"level": "H5", "text": "x", "page": 1}]}),
            json!({"title": "t", "outline": [{"level": "H1", "text": "", "page": 1}]}),
            json!({"title": "t", "outline": [{"level": "H1", "text": "x", "page": 0}]}),
            json!({"title": "t", "outline": [{"level": "H1", "text": "x", "page": 1.5}]}),
        ];
        for case in cases {
            let result = validate_outline_value(&case);
            assert!(
                matches!(result, Err(Error::InvalidOutline(_))),
                "expected rejection for {}",
                case
            );
        }
    }

    #[test]
    fn test_validate_rejects_malformed_json() {
        assert!(matches!(
            validate_outline_json("{not json"),
            Err(Error::InvalidOutline(_))
        ));
    }
}
