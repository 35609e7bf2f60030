use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing one or more flags/arguments\n\nCheck using 'dbackupcli {command} -h'")]
    Validation { command: &'static str },

    #[error("error performing the http request: {0}")]
    Network(String),

    #[error("error decoding the response body: {0}")]
    Decode(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("error deleting the database: {status} {reason}")]
    Delete { status: u16, reason: String },

    #[error("script exited with {status}")]
    Script { status: std::process::ExitStatus },

    #[error("failed to launch script: {0}")]
    ScriptSpawn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("destination {0} already exists")]
    DestinationExists(PathBuf),

    #[error("bash executable not found in PATH")]
    InterpreterNotFound,
}

impl AppError {
    /// Every failure that reaches `main` ends the process with status 1.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Network(format!("error while creating the http request: {}", err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
