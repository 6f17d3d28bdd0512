//! Typed manifest views
//!
//! Used by the README generator. Unknown fields are ignored, and every field
//! other than the identifiers is optional so a half-written manifest can still
//! be rendered.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `course.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseManifest {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub stage_order: Vec<String>,
}

/// `stages/<slug>/stage.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageManifest {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
}

impl CourseManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl StageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_manifest_tolerates_unknown_fields() {
        let course: CourseManifest = serde_yaml::from_str(
            "slug: cs50\ntitle: Intro\nstage_order: [hello, mario]\nsponsor: acme\n",
        )
        .unwrap();
        assert_eq!(course.slug, "cs50");
        assert_eq!(course.stage_order, vec!["hello", "mario"]);
        assert!(course.description.is_none());
    }

    #[test]
    fn test_stage_manifest_defaults() {
        let stage: StageManifest = serde_yaml::from_str("slug: hello\n").unwrap();
        assert_eq!(stage.slug, "hello");
        assert!(stage.title.is_empty());
        assert!(stage.estimated_minutes.is_none());
    }
}
