// dbackupcli/src/script/mod.rs
pub mod args;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempPath;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{AppError, Result};
use crate::utils::find_bash_executable;
pub use args::{ScriptMode, ScriptTask};

const SCRIPT_SOURCE: &str = include_str!("../../scripts/couch-dump-restore.sh");

/// Executes one dump/restore task to completion.
pub trait ScriptRunner {
    /// Fails with `AppError::Script` when the script exits non-zero.
    async fn run(&self, task: &ScriptTask) -> Result<()>;
}

/// The embedded script written out to the temp directory.
///
/// The file is deleted when this value is dropped, so every return path of a
/// workflow cleans it up.
pub struct BundledScript {
    path: TempPath,
}

impl BundledScript {
    pub fn materialize() -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("couch-script-")
            .suffix(".sh")
            .tempfile()?;
        file.write_all(SCRIPT_SOURCE.as_bytes())?;
        file.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o755))?;
        }

        let path = file.into_temp_path();
        debug!(path = %path.display(), "materialized bundled script");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs the bundled script through `bash`, forwarding its output to the terminal.
pub struct BashRunner {
    interpreter: PathBuf,
    script: BundledScript,
}

impl BashRunner {
    pub fn new() -> Result<Self> {
        let interpreter = find_bash_executable()?;
        let script = BundledScript::materialize()?;
        Ok(Self { interpreter, script })
    }
}

impl ScriptRunner for BashRunner {
    async fn run(&self, task: &ScriptTask) -> Result<()> {
        debug!(
            interpreter = %self.interpreter.display(),
            args = ?task.redacted_args(),
            "running dump/restore script"
        );
        let status = Command::new(&self.interpreter)
            .arg(self.script.path())
            .args(task.to_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| AppError::ScriptSpawn(e.to_string()))?;

        if !status.success() {
            return Err(AppError::Script { status });
        }
        Ok(())
    }
}
