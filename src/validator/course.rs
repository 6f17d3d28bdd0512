//! Course Validator
//!
//! Top-level entry point. Validates `course.yml`, every directory under
//! `stages/`, and finally the consistency between the declared
//! `stage_order` and the stage directories that actually exist.

use crate::models::{Document, LineRules, ValidationResult, Value};
use crate::parser::yaml;
use crate::validator::schema::{SchemaKind, SchemaStore};
use crate::validator::stage::StageValidator;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use walkdir::WalkDir;

pub const COURSE_MANIFEST: &str = "course.yml";
pub const STAGES_DIR: &str = "stages";

/// Options for a validation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Report passing line-count checks as info messages
    pub verbose: bool,
    pub rules: LineRules,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_rules(mut self, rules: LineRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Validates a whole course directory
pub struct CourseValidator {
    store: SchemaStore,
    options: ValidateOptions,
}

impl CourseValidator {
    /// Create a validator using the bundled schemas
    pub fn new(options: ValidateOptions) -> Self {
        Self::with_store(SchemaStore::embedded(), options)
    }

    pub fn with_store(store: SchemaStore, options: ValidateOptions) -> Self {
        Self { store, options }
    }

    /// Validate the course rooted at `dir`
    ///
    /// A missing `course.yml` or `stages/` directory ends the run immediately
    /// with a single error; everything else is recorded and the run continues.
    pub fn validate(&self, dir: &Path) -> ValidationResult {
        let mut result = ValidationResult::new();

        let course_path = dir.join(COURSE_MANIFEST);
        if !course_path.exists() {
            result.add_error(format!("{} not found", COURSE_MANIFEST));
            return result;
        }

        let stages_dir = dir.join(STAGES_DIR);
        if !stages_dir.is_dir() {
            result.add_error(format!("{}/ directory not found", STAGES_DIR));
            return result;
        }

        tracing::debug!(dir = %dir.display(), "validating course");

        let course = self.validate_course_manifest(&course_path, &mut result);
        let declared = course.as_ref().map(stage_order).unwrap_or_default();

        let actual_stages = self.validate_stages(&stages_dir, &mut result);

        validate_stage_order(&declared, &actual_stages, &mut result);

        tracing::debug!(
            errors = result.error_count,
            stages = result.stage_count,
            "course validation finished"
        );
        result
    }

    /// Load and schema-check `course.yml`, returning the document if it parsed
    fn validate_course_manifest(
        &self,
        course_path: &Path,
        result: &mut ValidationResult,
    ) -> Option<Document> {
        let course = match yaml::load(course_path) {
            Ok(doc) => doc,
            Err(e) => {
                result.add_error(format!("{}: {}", COURSE_MANIFEST, e));
                return None;
            }
        };

        match self.store.check(SchemaKind::Course, &course) {
            Ok(()) => result.add_info(format!("{}: schema valid", COURSE_MANIFEST)),
            Err(e) => result.add_error(format!("{} schema: {}", COURSE_MANIFEST, e)),
        }

        Some(course)
    }

    /// Validate every immediate subdirectory of `stages/`, sorted by name
    fn validate_stages(&self, stages_dir: &Path, result: &mut ValidationResult) -> Vec<String> {
        let validator = StageValidator::new(&self.store, self.options.rules, self.options.verbose);
        let mut actual_stages = Vec::new();

        let entries = WalkDir::new(stages_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    result.add_error(format!("{}/: {}", STAGES_DIR, e));
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let stage_name = entry.file_name().to_string_lossy().into_owned();
            tracing::debug!(stage = %stage_name, "validating stage");

            validator.validate(entry.path(), &stage_name, result);
            result.stage_count += 1;
            actual_stages.push(stage_name);
        }

        actual_stages
    }
}

/// Extract `stage_order` from a course document
///
/// Absent or malformed values give an empty order; non-string entries are
/// skipped since the schema check has already reported them.
pub fn stage_order(course: &Document) -> Vec<String> {
    course
        .get("stage_order")
        .and_then(Value::as_sequence)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Compare the declared order against the stage directories found on disk
///
/// - declared but missing directory: error
/// - directory not declared: warning
/// - slug declared more than once: warning
pub fn validate_stage_order(
    stage_order: &[String],
    actual_stages: &[String],
    result: &mut ValidationResult,
) {
    let actual: HashSet<&str> = actual_stages.iter().map(String::as_str).collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for slug in stage_order {
        *occurrences.entry(slug.as_str()).or_default() += 1;
    }

    let mut reported = HashSet::new();
    for slug in stage_order {
        if !reported.insert(slug.as_str()) {
            continue;
        }
        if !actual.contains(slug.as_str()) {
            result.add_error(format!(
                "stage_order: '{}' declared but directory not found",
                slug
            ));
        }
        if occurrences[slug.as_str()] > 1 {
            result.add_warning(format!(
                "stage_order: '{}' listed {} times",
                slug,
                occurrences[slug.as_str()]
            ));
        }
    }

    for stage in actual_stages {
        if !occurrences.contains_key(stage.as_str()) {
            result.add_warning(format!(
                "{}/{}: directory exists but not in stage_order",
                STAGES_DIR, stage
            ));
        }
    }
}

/// Validate a course directory with the bundled schemas and default rules
pub fn validate_course(dir: &Path, verbose: bool) -> ValidationResult {
    CourseValidator::new(ValidateOptions::new().with_verbose(verbose)).validate(dir)
}
