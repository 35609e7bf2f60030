// Recording fakes for the workflow seams.
use std::collections::HashMap;
use std::process::ExitStatus;
use std::sync::Mutex;

use crate::config::ConnectionParams;
use crate::couchdb::{DatabaseInfo, DatabaseLookup, DatabaseServer};
use crate::errors::{AppError, Result};
use crate::prompt::{Prompter, is_yes};
use crate::script::{ScriptRunner, ScriptTask};

pub fn connection() -> ConnectionParams {
    ConnectionParams {
        host: "h".into(),
        port: 5984,
        username: "u".into(),
        password: "p".into(),
    }
}

pub fn failed_status() -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(1 << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(1)
    }
}

#[derive(Default)]
pub struct FakeServer {
    pub databases: Vec<String>,
    pub lookups: HashMap<String, DatabaseLookup>,
    pub fail_listing: bool,
    pub fail_lookup: bool,
    pub undecodable_lookup: bool,
    pub delete_status: Option<u16>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn with_databases(names: &[&str]) -> Self {
        Self {
            databases: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_document_count(name: &str, document_count: u64) -> Self {
        let info = DatabaseInfo {
            name: name.to_string(),
            document_count,
            ..DatabaseInfo::default()
        };
        let mut server = Self::default();
        server.lookups.insert(name.to_string(), DatabaseLookup::Found(info));
        server
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DatabaseServer for FakeServer {
    async fn list_databases(&self) -> Result<Vec<String>> {
        self.log("list".into());
        if self.fail_listing {
            return Err(AppError::Network("connection refused".into()));
        }
        Ok(self.databases.clone())
    }

    async fn get_database(&self, name: &str) -> Result<DatabaseLookup> {
        self.log(format!("get {}", name));
        if self.fail_lookup {
            return Err(AppError::Network("connection refused".into()));
        }
        if self.undecodable_lookup {
            return Err(AppError::Decode("expected value at line 1 column 1".into()));
        }
        Ok(self.lookups.get(name).cloned().unwrap_or(DatabaseLookup::Missing {
            status: 404,
            detail: r#"{"error":"not_found","reason":"Database does not exist."}"#.into(),
        }))
    }

    async fn delete_database(&self, name: &str) -> Result<()> {
        self.log(format!("delete {}", name));
        match self.delete_status {
            Some(status) if status != 200 => Err(AppError::Delete {
                status,
                reason: "Internal Server Error".into(),
            }),
            _ => Ok(()),
        }
    }
}

/// Answers prompts from canned values; `None` behaves like a missing terminal.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub selection: Option<String>,
    pub answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn selecting(choice: &str) -> Self {
        Self {
            selection: Some(choice.to_string()),
            ..Self::default()
        }
    }

    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn select_one(&self, message: &str, options: &[String], _default: usize) -> Result<String> {
        self.prompts.lock().unwrap().push(format!("{} {:?}", message, options));
        self.selection
            .clone()
            .ok_or_else(|| AppError::Prompt("not a terminal".into()))
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
            .as_deref()
            .map(is_yes)
            .ok_or_else(|| AppError::Prompt("not a terminal".into()))
    }
}

/// Records every task; databases listed in `failing` exit with status 1.
#[derive(Default)]
pub struct RecordingRunner {
    pub failing: Vec<String>,
    pub tasks: Mutex<Vec<ScriptTask>>,
}

impl RecordingRunner {
    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> Vec<ScriptTask> {
        self.tasks.lock().unwrap().clone()
    }

    pub fn databases(&self) -> Vec<String> {
        self.tasks().into_iter().map(|t| t.database).collect()
    }
}

impl ScriptRunner for RecordingRunner {
    async fn run(&self, task: &ScriptTask) -> Result<()> {
        self.tasks.lock().unwrap().push(task.clone());
        if self.failing.contains(&task.database) {
            return Err(AppError::Script { status: failed_status() });
        }
        Ok(())
    }
}
