// bootcs-schema - Course Repository Validator
// Checks course.yml / stage.yml manifests against bundled JSON Schemas and
// cross-checks the declared stage order against the stage directories.

pub mod cli;
pub mod generator;
pub mod models;
pub mod parser;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{Level, Message, ValidationResult};
pub use validator::{validate_course, CourseValidator, SchemaStore, ValidateOptions};
