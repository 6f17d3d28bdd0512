use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional per-course config file, read from the course root
pub const CONFIG_FILENAME: &str = "schema-tool.toml";

/// Inclusive line-count range for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub min: usize,
    pub max: usize,
}

impl LineRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, lines: usize) -> bool {
        (self.min..=self.max).contains(&lines)
    }
}

/// Line-count policy for stage documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRules {
    /// LEARNING.md range
    #[serde(default = "default_learning")]
    pub learning: LineRange,
    /// README.md range
    #[serde(default = "default_readme")]
    pub readme: LineRange,
}

fn default_learning() -> LineRange {
    LineRange::new(60, 100)
}

fn default_readme() -> LineRange {
    LineRange::new(30, 60)
}

impl Default for LineRules {
    fn default() -> Self {
        Self {
            learning: default_learning(),
            readme: default_readme(),
        }
    }
}

/// Lint configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub lines: LineRules,
}

impl LintConfig {
    /// Load config from `<course_dir>/schema-tool.toml`, falling back to defaults
    pub fn load(course_dir: &Path) -> anyhow::Result<Self> {
        let config_path = course_dir.join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: LintConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
