//! JSON rendering of outlines.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Two-space indented JSON
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an outline. Non-ASCII text is emitted as-is, not escaped.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result)?,
        JsonFormat::Compact => serde_json::to_string(result)?,
    };
    Ok(json)
}

/// Serialize an outline and write it to `path`, replacing any existing file.
pub fn write_outline<P: AsRef<Path>>(
    result: &OutlineResult,
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(result, format)?;
    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel};

    fn sample() -> OutlineResult {
        OutlineResult::new(
            "Überblick",
            vec![Heading::new(HeadingLevel::H1, "Einführung", 1)],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.starts_with("{\n  \"title\": \"Überblick\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains("Einführung"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&OutlineResult::empty(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_write_outline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_outline(&sample(), &path, JsonFormat::Pretty).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: OutlineResult = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_write_outline_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("doc.json");
        let err = write_outline(&sample(), &path, JsonFormat::Pretty).unwrap_err();
        assert!(matches!(&err, Error::Write { path: p, .. } if p == &path));
        assert_eq!(err.kind(), crate::error::FailureKind::Write);
    }
}
