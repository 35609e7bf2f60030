mod logic;

use anyhow::Result;

use crate::config::{BackupAllConfig, BackupConfig};
use crate::couchdb::CouchClient;
use crate::prompt::TerminalPrompter;
use crate::script::BashRunner;

/// Public entry point for the single-database backup.
pub async fn run_backup_flow(config: &BackupConfig) -> Result<()> {
    let runner = BashRunner::new()?;
    let server = CouchClient::new(&config.connection)?;
    logic::perform_backup(&server, &TerminalPrompter, &runner, config).await
}

/// Public entry point for the whole-instance backup.
pub async fn run_backup_all_flow(config: &BackupAllConfig) -> Result<()> {
    let runner = BashRunner::new()?;
    let server = CouchClient::new(&config.connection)?;
    let report = logic::perform_backup_all(&server, &runner, config).await?;
    println!("{}", report.summary());
    Ok(())
}
