// dbackupcli/src/script/args.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{ConnectionParams, DEFAULT_PORT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    Backup,
    Restore,
}

impl ScriptMode {
    fn flag(self) -> &'static str {
        match self {
            ScriptMode::Backup => "-b",
            ScriptMode::Restore => "-r",
        }
    }
}

/// One unit of work for the dump/restore script.
#[derive(Debug, Clone)]
pub struct ScriptTask {
    pub mode: ScriptMode,
    pub database: String,
    pub file: PathBuf,
    pub connection: ConnectionParams,
    pub create_db: bool,
}

impl ScriptTask {
    pub fn backup(connection: &ConnectionParams, database: &str, file: &Path) -> Self {
        Self {
            mode: ScriptMode::Backup,
            database: database.to_string(),
            file: file.to_path_buf(),
            connection: connection.clone(),
            create_db: false,
        }
    }

    pub fn restore(connection: &ConnectionParams, database: &str, file: &Path, create_db: bool) -> Self {
        Self {
            mode: ScriptMode::Restore,
            database: database.to_string(),
            file: file.to_path_buf(),
            connection: connection.clone(),
            create_db,
        }
    }

    /// Argument vector handed to the script, one element per argument. The
    /// file path is passed through as the OS gave it.
    pub fn to_args(&self) -> Vec<OsString> {
        self.build_args(&self.connection.password)
    }

    /// Same vector with the password masked, for logs.
    pub fn redacted_args(&self) -> Vec<String> {
        self.build_args("***")
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    fn build_args(&self, password: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.mode.flag().into(),
            "-d".into(),
            self.database.as_str().into(),
            "-f".into(),
            self.file.as_os_str().to_owned(),
        ];
        if self.create_db {
            args.push("-c".into());
        }
        args.extend([
            "-u".into(),
            self.connection.username.as_str().into(),
            "-p".into(),
            password.into(),
            "-H".into(),
            self.connection.host.as_str().into(),
        ]);
        if self.connection.port != DEFAULT_PORT {
            args.push("--port".into());
            args.push(self.connection.port.to_string().into());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(port: u16) -> ConnectionParams {
        ConnectionParams {
            host: "couch.internal".into(),
            port,
            username: "admin".into(),
            password: "root".into(),
        }
    }

    #[test]
    fn test_backup_args_omit_default_port() {
        let task = ScriptTask::backup(&connection(5984), "orders", Path::new("dump.json"));
        assert_eq!(
            task.to_args(),
            vec!["-b", "-d", "orders", "-f", "dump.json", "-u", "admin", "-p", "root", "-H", "couch.internal"]
        );
    }

    #[test]
    fn test_restore_args_with_create_and_custom_port() {
        let task = ScriptTask::restore(&connection(9876), "orders", Path::new("dump/orders.json"), true);
        assert_eq!(
            task.to_args(),
            vec![
                "-r", "-d", "orders", "-f", "dump/orders.json", "-c", "-u", "admin", "-p", "root", "-H",
                "couch.internal", "--port", "9876",
            ]
        );
    }

    #[test]
    fn test_arguments_are_not_split_or_quoted() {
        let task = ScriptTask::backup(&connection(5984), "db with space;rm", Path::new("my dump.json"));
        let args = task.to_args();
        assert_eq!(args[2], "db with space;rm");
        assert_eq!(args[4], "my dump.json");
    }

    #[test]
    fn test_redacted_args_hide_password() {
        let task = ScriptTask::backup(&connection(5984), "orders", Path::new("dump.json"));
        let redacted = task.redacted_args();
        assert!(!redacted.contains(&"root".to_string()));
        assert_eq!(redacted[8], "***");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_file_path_is_passed_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = Path::new("dump").join(OsStr::from_bytes(b"caf\xe9.json"));
        let task = ScriptTask::restore(&connection(5984), "caf\u{FFFD}", &file, true);
        let args = task.to_args();
        assert_eq!(args[4], file.as_os_str());
        assert_eq!(task.redacted_args()[4], "dump/caf\u{FFFD}.json");
    }
}
