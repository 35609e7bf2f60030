//! CouchDB Backup/Restore Tool
//!
//! Lists the databases of a CouchDB server and drives the bundled dump/restore
//! script for one database or for a whole instance.

// dbackupcli/src/main.rs
mod backup;
mod config;
mod couchdb;
mod errors;
mod listdbs;
mod prompt;
mod restore;
mod script;
mod utils;

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use config::{Cli, Commands};
use errors::AppError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const INTERRUPTED: u8 = 130;

/// Main entry point for the backup/restore tool
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let outcome = tokio::select! {
        result = run_app(cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("❌ Interrupted.");
            return ExitCode::from(INTERRUPTED);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app @ AppError::Validation { .. }) => {
                println!("{}", app);
                ExitCode::from(app.exit_code())
            }
            Some(app) => {
                eprintln!("❌ Error: {:#}", e);
                ExitCode::from(app.exit_code())
            }
            None => {
                eprintln!("❌ Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validates the flags of the chosen command, then runs its workflow.
async fn run_app(command: Commands) -> Result<()> {
    tracing::info!(command = command.name(), "starting");
    match command {
        Commands::Backup(args) => {
            let config = args.resolve()?;
            backup::run_backup_flow(&config).await
        }
        Commands::BackupAll(args) => {
            let config = args.resolve()?;
            backup::run_backup_all_flow(&config).await
        }
        Commands::Restore(args) => {
            let config = args.resolve()?;
            restore::run_restore_flow(&config).await
        }
        Commands::RestoreAll(args) => {
            let config = args.resolve()?;
            restore::run_restore_all_flow(&config).await
        }
        Commands::ListDbs(args) => {
            let connection = args.resolve()?;
            listdbs::run_list_flow(&connection).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_flags_fail_before_any_work() -> anyhow::Result<()> {
        let commands = [
            vec!["dbackupcli", "backup", "-u", "u", "-p", "p", "--host", "127.0.0.1", "--port", "1"],
            vec!["dbackupcli", "backupAll", "-f", "out", "-p", "p", "--host", "127.0.0.1", "--port", "1"],
            vec!["dbackupcli", "restore", "-f", "x.json", "-u", "u", "-p", "p", "--host", "127.0.0.1", "--port", "1"],
            vec!["dbackupcli", "restoreAll", "-u", "u", "-p", "p", "--host", "127.0.0.1", "--port", "1"],
            vec!["dbackupcli", "listdbs", "-u", "u", "--host", "", "-p", "p", "--port", "1"],
        ];
        for argv in commands {
            let cli = Cli::try_parse_from(argv.iter().copied())?;
            let name = cli.command.name();
            let err = run_app(cli.command).await.unwrap_err();
            match err.downcast_ref::<AppError>() {
                Some(app @ AppError::Validation { command }) => {
                    assert_eq!(*command, name);
                    assert_eq!(app.exit_code(), 1);
                }
                other => anyhow::bail!("{} did not fail validation: {:?}", name, other),
            }
        }
        Ok(())
    }
}
