pub mod generate;
pub mod validate;

use crate::validator::SchemaCompileError;

/// Process exit code for a failed command
///
/// A broken bundled schema is a tool defect, not a course problem, so it
/// gets its own code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<SchemaCompileError>().is_some() {
        2
    } else {
        1
    }
}
