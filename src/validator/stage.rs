//! Stage Directory Validator
//!
//! Checks a single `stages/<slug>/` directory:
//! - `stage.yml`, `README.md` and `LEARNING.md` are present
//! - `stage.yml` matches the stage schema and its slug matches the directory
//! - document lengths fall inside the recommended ranges

use crate::models::{LineRange, LineRules, ValidationResult, Value};
use crate::parser::yaml;
use crate::validator::schema::{SchemaKind, SchemaStore};
use std::io::ErrorKind;
use std::path::Path;

pub const STAGE_MANIFEST: &str = "stage.yml";
pub const README: &str = "README.md";
pub const LEARNING: &str = "LEARNING.md";

/// Files every stage directory must contain
pub const REQUIRED_FILES: [&str; 3] = [STAGE_MANIFEST, README, LEARNING];

/// Validator for one stage directory
pub struct StageValidator<'a> {
    store: &'a SchemaStore,
    rules: LineRules,
    verbose: bool,
}

impl<'a> StageValidator<'a> {
    pub fn new(store: &'a SchemaStore, rules: LineRules, verbose: bool) -> Self {
        Self {
            store,
            rules,
            verbose,
        }
    }

    /// Run every stage check, appending messages to `result`
    ///
    /// Checks are additive: a failure in one never skips the others, except
    /// that the slug comparison needs a schema-valid manifest.
    pub fn validate(&self, stage_dir: &Path, stage_name: &str, result: &mut ValidationResult) {
        let prefix = format!("stages/{}", stage_name);

        for file in REQUIRED_FILES {
            if !stage_dir.join(file).exists() {
                result.add_error(format!("{}/{}: missing", prefix, file));
            }
        }

        self.validate_manifest(stage_dir, stage_name, &prefix, result);
        self.validate_length(stage_dir, LEARNING, self.rules.learning, &prefix, result);
        self.validate_length(stage_dir, README, self.rules.readme, &prefix, result);
    }

    fn validate_manifest(
        &self,
        stage_dir: &Path,
        stage_name: &str,
        prefix: &str,
        result: &mut ValidationResult,
    ) {
        let document = match yaml::load(&stage_dir.join(STAGE_MANIFEST)) {
            Ok(doc) => doc,
            // Already reported by the presence check
            Err(e) if e.is_not_found() => return,
            Err(e) => {
                result.add_error(format!("{}/{}: {}", prefix, STAGE_MANIFEST, e));
                return;
            }
        };

        if let Err(e) = self.store.check(SchemaKind::Stage, &document) {
            result.add_error(format!("{}/{} schema: {}", prefix, STAGE_MANIFEST, e));
            return;
        }
        result.add_info(format!("{}/{}: schema valid", prefix, STAGE_MANIFEST));

        if let Some(slug) = document.get("slug").and_then(Value::as_str) {
            if slug != stage_name {
                result.add_error(format!(
                    "{}/{}: slug '{}' does not match directory name '{}'",
                    prefix, STAGE_MANIFEST, slug, stage_name
                ));
            }
        }
    }

    fn validate_length(
        &self,
        stage_dir: &Path,
        file: &str,
        range: LineRange,
        prefix: &str,
        result: &mut ValidationResult,
    ) {
        let lines = match count_lines(&stage_dir.join(file)) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                result.add_error(format!("{}/{}: failed to read: {}", prefix, file, e));
                return;
            }
        };

        if !range.contains(lines) {
            result.add_warning(format!(
                "{}/{}: {} lines (recommended: {}-{})",
                prefix, file, lines, range.min, range.max
            ));
        } else if self.verbose {
            result.add_info(format!("{}/{}: {} lines", prefix, file, lines));
        }
    }
}

/// Count `\n`-delimited segments
///
/// A file ending in a newline has a trailing empty segment, so
/// `"a\nb\n"` counts as 3 and an empty file as 1.
pub fn count_lines(path: &Path) -> std::io::Result<usize> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.iter().filter(|&&b| b == b'\n').count() + 1)
}
