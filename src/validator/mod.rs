pub mod course;
pub mod schema;
pub mod stage;

pub use course::{validate_course, CourseValidator, ValidateOptions};
pub use schema::{CheckError, SchemaCompileError, SchemaKind, SchemaStore, SchemaViolation};
pub use stage::StageValidator;
