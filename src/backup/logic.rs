// dbackupcli/src/backup/logic.rs
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use crate::config::{BACKUP_ALL, BackupAllConfig, BackupConfig};
use crate::couchdb::DatabaseServer;
use crate::errors::AppError;
use crate::prompt::{EXIT_OPTION, Prompter, with_exit_option};
use crate::script::{ScriptRunner, ScriptTask};
use crate::utils::databases::user_databases;
use crate::utils::report::RunReport;

/// Lets the operator pick one database and dumps it to `config.file`.
pub async fn perform_backup<S, P, R>(server: &S, prompter: &P, runner: &R, config: &BackupConfig) -> Result<()>
where
    S: DatabaseServer,
    P: Prompter,
    R: ScriptRunner,
{
    let names = server
        .list_databases()
        .await
        .context("Failed to list databases")?;

    let options = with_exit_option(names);
    let selected = prompter
        .select_one("Select a database to backup:", &options, 0)
        .context("Failed to read the database selection")?;
    if selected == EXIT_OPTION {
        info!("backup aborted by operator");
        return Ok(());
    }

    if !confirm_overwrite(prompter, &config.file)? {
        println!("operation canceled. The file will not be overwritten");
        return Ok(());
    }

    let task = ScriptTask::backup(&config.connection, &selected, &config.file);
    runner
        .run(&task)
        .await
        .with_context(|| format!("Backup of database {} failed", selected))?;

    println!("✅ Backup completed successfully!");
    Ok(())
}

/// Dumps every non-system database into a freshly created directory.
///
/// Per-database failures are printed and recorded; the loop always runs to the end.
pub async fn perform_backup_all<S, R>(server: &S, runner: &R, config: &BackupAllConfig) -> Result<RunReport>
where
    S: DatabaseServer,
    R: ScriptRunner,
{
    let names = server
        .list_databases()
        .await
        .context("Failed to list databases")?;

    create_destination(&config.dir)?;

    let mut report = RunReport::new(BACKUP_ALL);
    for database in user_databases(&names) {
        let file = config.dir.join(format!("{}.json", database));
        info!(database, file = %file.display(), "backing up database");

        let result = runner
            .run(&ScriptTask::backup(&config.connection, database, &file))
            .await;
        match &result {
            Ok(()) => println!("✅ Backup of {} completed successfully!", database),
            Err(e) => eprintln!("❌ Error: backup of {} failed: {}", database, e),
        }
        report.record(database, &result);
    }
    Ok(report)
}

/// Returns `false` when the operator declines to replace an existing file.
fn confirm_overwrite<P: Prompter>(prompter: &P, file: &Path) -> Result<bool> {
    match fs::metadata(file) {
        Ok(_) => {
            let question = format!("File {} already exists. Do you want to overwrite it?", file.display());
            if !prompter.confirm(&question).context("Failed to read the overwrite answer")? {
                return Ok(false);
            }
            println!("Overwriting file...");
            fs::remove_file(file).with_context(|| format!("error removing file {}", file.display()))?;
            println!("File {} removed.", file.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e).with_context(|| format!("error checking file {}", file.display())),
    }
}

fn create_destination(dir: &Path) -> Result<()> {
    fs::create_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => anyhow::Error::from(AppError::DestinationExists(dir.to_path_buf())),
        _ => anyhow::Error::from(AppError::Io(e))
            .context(format!("Failed to create backup directory {}", dir.display())),
    })
}
