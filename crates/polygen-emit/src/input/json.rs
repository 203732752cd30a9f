//! JSON reader for serialized programs.

use crate::ir::Program;
use crate::traits::ReadError;
use std::path::Path;

/// Deserialize a program and check its structural invariants.
pub fn read_json(source: &str) -> Result<Program, ReadError> {
    let program: Program = serde_json::from_str(source)?;
    program.validate()?;
    Ok(program)
}

/// Read and validate a program from a JSON file.
pub fn read_json_file(path: &Path) -> Result<Program, ReadError> {
    let source = std::fs::read_to_string(path)?;
    read_json(&source)
}
