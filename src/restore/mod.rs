mod logic;

use anyhow::Result;

use crate::config::{RestoreAllConfig, RestoreConfig};
use crate::couchdb::CouchClient;
use crate::prompt::TerminalPrompter;
use crate::script::BashRunner;

/// Public entry point for restoring one dump into one database.
pub async fn run_restore_flow(config: &RestoreConfig) -> Result<()> {
    let runner = BashRunner::new()?;
    let server = CouchClient::new(&config.connection)?;
    logic::perform_restore(&server, &TerminalPrompter, &runner, config).await
}

/// Public entry point for restoring every dump found in a directory.
pub async fn run_restore_all_flow(config: &RestoreAllConfig) -> Result<()> {
    let runner = BashRunner::new()?;
    let report = logic::perform_restore_all(&runner, config).await?;
    println!("{}", report.summary());
    Ok(())
}
