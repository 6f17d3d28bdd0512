//! JSON Schema Validation for Manifests
//!
//! Both schemas ship inside the binary. Each is compiled on its own, so a
//! defect in one never prevents checking documents of the other kind.

use crate::models::Document;
use jsonschema::Validator;
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

const COURSE_SCHEMA: &str = include_str!("../../schemas/course.schema.json");
const STAGE_SCHEMA: &str = include_str!("../../schemas/stage.schema.json");

/// Manifest kinds with a bundled schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Course,
    Stage,
}

impl SchemaKind {
    /// Get the schema filename for this manifest kind
    pub fn schema_filename(&self) -> &'static str {
        match self {
            SchemaKind::Course => "course.schema.json",
            SchemaKind::Stage => "stage.schema.json",
        }
    }

    /// Bundled schema source
    pub fn embedded_source(&self) -> &'static str {
        match self {
            SchemaKind::Course => COURSE_SCHEMA,
            SchemaKind::Stage => STAGE_SCHEMA,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_filename())
    }
}

/// A bundled schema could not be compiled
#[derive(Debug, Clone, Error)]
pub enum SchemaCompileError {
    #[error("failed to parse {kind}: {reason}")]
    Parse { kind: SchemaKind, reason: String },

    #[error("failed to compile {kind}: {reason}")]
    Compile { kind: SchemaKind, reason: String },
}

impl SchemaCompileError {
    pub fn kind(&self) -> SchemaKind {
        match self {
            SchemaCompileError::Parse { kind, .. } | SchemaCompileError::Compile { kind, .. } => {
                *kind
            }
        }
    }
}

/// One structural mismatch reported by the rules engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value, empty for the root
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// All mismatches found in one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    violations: Vec<Violation>,
}

impl SchemaViolation {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Why a document did not pass its schema check
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0} not loaded")]
    Unavailable(SchemaKind),

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Violation(SchemaViolation),
}

/// Compiled course and stage schemas
///
/// Read-only after construction; a missing slot means that kind's schema
/// failed to compile and its defect is kept in `defects`.
pub struct SchemaStore {
    course: Option<Validator>,
    stage: Option<Validator>,
    defects: Vec<SchemaCompileError>,
}

impl SchemaStore {
    /// Compile both bundled schemas
    pub fn embedded() -> Self {
        Self::from_sources(
            SchemaKind::Course.embedded_source(),
            SchemaKind::Stage.embedded_source(),
        )
    }

    /// Compile a store from explicit schema sources
    pub fn from_sources(course_source: &str, stage_source: &str) -> Self {
        let mut defects = Vec::new();
        let mut compile = |kind: SchemaKind, source: &str| match Self::compile(kind, source) {
            Ok(validator) => Some(validator),
            Err(e) => {
                tracing::error!(schema = %kind, error = %e, "schema compile failed");
                defects.push(e);
                None
            }
        };

        let course = compile(SchemaKind::Course, course_source);
        let stage = compile(SchemaKind::Stage, stage_source);

        Self {
            course,
            stage,
            defects,
        }
    }

    /// Compile one schema definition
    pub fn compile(kind: SchemaKind, source: &str) -> Result<Validator, SchemaCompileError> {
        let schema: JsonValue =
            serde_json::from_str(source).map_err(|e| SchemaCompileError::Parse {
                kind,
                reason: e.to_string(),
            })?;

        Validator::new(&schema).map_err(|e| SchemaCompileError::Compile {
            kind,
            reason: e.to_string(),
        })
    }

    /// Compile errors of the bundled schemas, empty when both loaded
    pub fn defects(&self) -> &[SchemaCompileError] {
        &self.defects
    }

    fn validator(&self, kind: SchemaKind) -> Option<&Validator> {
        match kind {
            SchemaKind::Course => self.course.as_ref(),
            SchemaKind::Stage => self.stage.as_ref(),
        }
    }

    /// Validate a decoded manifest against its schema
    ///
    /// The document is first re-encoded as JSON so scalar typing follows the
    /// schema engine's rules rather than the YAML decoder's.
    pub fn check(&self, kind: SchemaKind, document: &Document) -> Result<(), CheckError> {
        let validator = self.validator(kind).ok_or(CheckError::Unavailable(kind))?;

        let encoded = serde_json::to_string(document)?;
        let instance: JsonValue = serde_json::from_str(&encoded)?;

        let violations: Vec<Violation> = validator
            .iter_errors(&instance)
            .map(|error| Violation {
                instance_path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CheckError::Violation(SchemaViolation { violations }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::yaml::parse;

    #[test]
    fn test_schema_filename() {
        assert_eq!(SchemaKind::Course.schema_filename(), "course.schema.json");
        assert_eq!(SchemaKind::Stage.schema_filename(), "stage.schema.json");
    }

    #[test]
    fn test_embedded_schemas_compile() {
        let store = SchemaStore::embedded();
        assert!(store.defects().is_empty());
    }

    #[test]
    fn test_valid_course_passes() {
        let store = SchemaStore::embedded();
        let doc = parse("slug: cs50\ntitle: Intro to CS\nstage_order: [hello, mario]\n").unwrap();
        assert!(store.check(SchemaKind::Course, &doc).is_ok());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let store = SchemaStore::embedded();
        let doc = parse("slug: hello\ntitle: Hello\nmaintainer: someone\n").unwrap();
        assert!(store.check(SchemaKind::Stage, &doc).is_ok());
    }

    #[test]
    fn test_missing_required_property() {
        let store = SchemaStore::embedded();
        let doc = parse("title: Hello\n").unwrap();
        match store.check(SchemaKind::Stage, &doc) {
            Err(CheckError::Violation(v)) => {
                assert_eq!(v.violations().len(), 1);
                assert!(v.to_string().contains("slug"));
            }
            other => panic!("expected violation, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_and_enum() {
        let store = SchemaStore::embedded();
        let doc = parse("slug: hello\ntitle: Hello\ndifficulty: impossible\nestimated_minutes: soon\n")
            .unwrap();
        match store.check(SchemaKind::Stage, &doc) {
            Err(CheckError::Violation(v)) => {
                assert_eq!(v.violations().len(), 2);
                let paths: Vec<&str> =
                    v.violations().iter().map(|x| x.instance_path.as_str()).collect();
                assert!(paths.contains(&"/difficulty"));
                assert!(paths.contains(&"/estimated_minutes"));
            }
            other => panic!("expected violation, got {:?}", other),
        }
    }

    #[test]
    fn test_quoted_number_is_not_an_integer() {
        let store = SchemaStore::embedded();
        let doc = parse("slug: hello\ntitle: Hello\nestimated_minutes: '30'\n").unwrap();
        assert!(store.check(SchemaKind::Stage, &doc).is_err());
    }

    #[test]
    fn test_malformed_schema_does_not_affect_other_kind() {
        let store = SchemaStore::from_sources("{ not json", STAGE_SCHEMA);
        assert_eq!(store.defects().len(), 1);
        assert_eq!(store.defects()[0].kind(), SchemaKind::Course);

        let course = parse("slug: cs50\ntitle: CS\nstage_order: [a]\n").unwrap();
        assert!(matches!(
            store.check(SchemaKind::Course, &course),
            Err(CheckError::Unavailable(SchemaKind::Course))
        ));

        let stage = parse("slug: a\ntitle: A\n").unwrap();
        assert!(store.check(SchemaKind::Stage, &stage).is_ok());
    }

    #[test]
    fn test_invalid_schema_keyword_is_compile_error() {
        let err = SchemaStore::compile(SchemaKind::Stage, r#"{"type": 12}"#).unwrap_err();
        assert!(matches!(err, SchemaCompileError::Compile { .. }));
    }
}
