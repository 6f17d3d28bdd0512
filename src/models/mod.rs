pub mod config;
pub mod document;
pub mod manifest;
pub mod validation;

pub use config::{LineRange, LineRules, LintConfig};
pub use document::{Document, Value};
pub use manifest::{CourseManifest, StageManifest};
pub use validation::{Level, Message, ValidationResult};
