//! YAML Manifest Loader
//!
//! Reads `course.yml` / `stage.yml` into an untyped [`Document`]. The loader
//! only guarantees a top-level mapping; shape is the schema checker's job.

use crate::models::document::{mapping_to_document, Document};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a manifest
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{reason}")]
    Parse { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

/// Load and decode a YAML manifest from disk
pub fn load(path: &Path) -> Result<Document, LoadError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    parse(&content).map_err(|reason| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Decode YAML content into a document
///
/// An empty (or comment-only) source decodes to an empty mapping.
pub fn parse(content: &str) -> Result<Document, String> {
    // Strip UTF-8 BOM if present
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if blank {
        return Ok(Document::new());
    }

    // Only the first document of a multi-document stream is used
    let value = match serde_yaml::Deserializer::from_str(content).next() {
        Some(document) => serde_yaml::Value::deserialize(document)
            .map_err(|e| format!("invalid YAML: {}", e))?,
        None => serde_yaml::Value::Null,
    };

    match value {
        serde_yaml::Value::Null => Ok(Document::new()),
        serde_yaml::Value::Mapping(map) => {
            mapping_to_document(map).map_err(|e| format!("invalid YAML: {}", e))
        }
        other => Err(format!(
            "expected a mapping at the top level, found {}",
            yaml_kind(&other)
        )),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mapping() {
        let doc = parse("slug: hello\nstage_order:\n  - a\n  - b\n").unwrap();
        assert_eq!(doc.get("slug").and_then(Value::as_str), Some("hello"));
        assert_eq!(
            doc.get("stage_order").and_then(Value::as_sequence).map(|s| s.len()),
            Some(2)
        );
    }

    #[test]
    fn test_parse_strips_bom() {
        let doc = parse("\u{FEFF}slug: hello\n").unwrap();
        assert!(doc.contains_key("slug"));
    }

    #[test]
    fn test_parse_empty_is_empty_mapping() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        let err = parse("- a\n- b\n").unwrap_err();
        assert!(err.contains("a sequence"));
        assert!(parse("just a string").is_err());
    }

    #[test]
    fn test_parse_uses_first_document() {
        let doc = parse("slug: hello\ntitle: Hi\n---\nother: 1\n").unwrap();
        assert_eq!(doc.get("slug").and_then(Value::as_str), Some("hello"));
        assert!(!doc.contains_key("other"));

        let doc = parse("---\nslug: hello\n").unwrap();
        assert!(doc.contains_key("slug"));
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(parse("slug: [unclosed\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load(&temp.path().join("course.yml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_io_error_does_not_repeat_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stage.yml");
        std::fs::create_dir(&path).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        let message = err.to_string();
        assert!(message.starts_with("failed to read: "));
        assert!(!message.contains(&path.display().to_string()));
    }

    #[test]
    fn test_load_parse_error_keeps_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stage.yml");
        std::fs::write(&path, "slug: [unclosed\n").unwrap();
        match load(&path) {
            Err(LoadError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
