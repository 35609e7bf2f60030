pub mod databases;
pub mod report;

use std::path::PathBuf;
use which::which;

use crate::errors::{AppError, Result};

/// Finds the bash executable in the system PATH.
pub fn find_bash_executable() -> Result<PathBuf> {
    which("bash").map_err(|_| AppError::InterpreterNotFound)
}
