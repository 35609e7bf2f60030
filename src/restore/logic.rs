// dbackupcli/src/restore/logic.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{RESTORE_ALL, RestoreAllConfig, RestoreConfig};
use crate::couchdb::{DatabaseLookup, DatabaseServer};
use crate::prompt::Prompter;
use crate::script::{ScriptRunner, ScriptTask};
use crate::utils::report::RunReport;

const DUMP_SUFFIX: &str = ".json";

/// A dump file and the database it restores into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpEntry {
    pub database: String,
    pub path: PathBuf,
}

/// Restores `config.file` into `config.database`.
///
/// A target that already holds documents is only replaced after the operator
/// confirms; it is deleted first and recreated by the script.
pub async fn perform_restore<S, P, R>(server: &S, prompter: &P, runner: &R, config: &RestoreConfig) -> Result<()>
where
    S: DatabaseServer,
    P: Prompter,
    R: ScriptRunner,
{
    let lookup = server
        .get_database(&config.database)
        .await
        .with_context(|| format!("Failed to look up database {}", config.database))?;

    debug!(database = %config.database, status = lookup.status(), "database lookup");

    let mut create_db = config.create_db;
    match lookup {
        DatabaseLookup::Found(info) if info.holds_documents() => {
            info!(%info, "restore target already holds documents");
            let name = if info.name.is_empty() { config.database.as_str() } else { info.name.as_str() };
            let question = format!("Database {} already exists. Do you want to overwrite it?", name);
            if !prompter.confirm(&question).context("Failed to read the overwrite answer")? {
                println!("operation canceled. The database will not be overwritten");
                return Ok(());
            }

            println!("Overwriting database...");
            server
                .delete_database(&config.database)
                .await
                .with_context(|| format!("Failed to delete database {}", config.database))?;
            println!("Database {} deleted.", config.database);
            create_db = true;
        }
        DatabaseLookup::Found(info) => {
            debug!(%info, "target exists without documents");
        }
        DatabaseLookup::Missing { status, detail } => {
            warn!(status, %detail, database = %config.database, "database lookup failed, restoring anyway");
        }
    }

    let task = ScriptTask::restore(&config.connection, &config.database, &config.file, create_db);
    runner
        .run(&task)
        .await
        .with_context(|| format!("Restore of database {} failed", config.database))?;

    println!("✅ Restore completed successfully!");
    Ok(())
}

/// Restores every entry of `config.dir`, in file-name order, creating each database.
pub async fn perform_restore_all<R: ScriptRunner>(runner: &R, config: &RestoreAllConfig) -> Result<RunReport> {
    let dumps = discover_dumps(&config.dir)?;
    info!(count = dumps.len(), dir = %config.dir.display(), "restoring dumps");

    let mut report = RunReport::new(RESTORE_ALL);
    for dump in &dumps {
        let task = ScriptTask::restore(&config.connection, &dump.database, &dump.path, true);
        let result = runner.run(&task).await;
        match &result {
            Ok(()) => println!("✅ Restore of {} completed successfully!", dump.database),
            Err(e) => eprintln!("❌ Error: restore of {} failed: {}", dump.database, e),
        }
        report.record(&dump.database, &result);
    }
    Ok(report)
}

/// Lists the direct children of `dir`. Every entry counts as a dump; the
/// database name is the file name without a trailing `.json`.
pub fn discover_dumps(dir: &Path) -> Result<Vec<DumpEntry>> {
    let metadata =
        fs::metadata(dir).with_context(|| format!("Failed to read dump directory {}", dir.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("Dump location is not a directory: {}", dir.display());
    }

    let mut dumps = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
        let file_name = entry.file_name().to_string_lossy();
        let database = file_name
            .strip_suffix(DUMP_SUFFIX)
            .unwrap_or(&file_name)
            .to_string();
        dumps.push(DumpEntry {
            database,
            path: entry.path().to_path_buf(),
        });
    }
    Ok(dumps)
}
