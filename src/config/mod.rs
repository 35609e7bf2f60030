// dbackupcli/src/config/mod.rs
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

use crate::errors::{AppError, Result};

pub const DEFAULT_PORT: u16 = 5984;

pub const BACKUP: &str = "backup";
pub const BACKUP_ALL: &str = "backupAll";
pub const RESTORE: &str = "restore";
pub const RESTORE_ALL: &str = "restoreAll";
pub const LIST_DBS: &str = "listdbs";

/// DBackupCLI, backup and restore helper for CouchDB instances.
///
/// Lists the databases of a CouchDB server and drives the bundled dump/restore
/// script for a single database or for a whole instance.
#[derive(Parser)]
#[command(name = "dbackupcli", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Command table: one entry per operation, each holding its own flag schema.
#[derive(Subcommand)]
pub enum Commands {
    /// Operates a backup of a database on CouchDB
    #[command(
        name = "backup",
        after_help = "After entering the command a prompt will let you select the database to backup.\n\n\
Examples:\n dbackupcli backup -f dump.json -u admin -p root --host 127.0.0.1 --port 9876\n dbackupcli backup --file dump.json --user admin -p root --host 127.0.0.1"
    )]
    Backup(BackupArgs),

    /// Operates a backup of the entire CouchDB instance
    #[command(
        name = "backupAll",
        after_help = "Every non-system database is dumped to <filedir>/<database>.json.\n\n\
Examples:\n dbackupcli backupAll -f backup-core -u admin -p root --host 127.0.0.1 --port 9876"
    )]
    BackupAll(BackupAllArgs),

    /// Operates a restore of a dump file in a database on CouchDB
    #[command(
        name = "restore",
        after_help = "Examples:\n dbackupcli restore -d my-db -f dump.json -u admin -p root --host 127.0.0.1 --port 9876\n dbackupcli restore --database my-db --file dump.json --user admin -p root --host 127.0.0.1 -c"
    )]
    Restore(RestoreArgs),

    /// Operates a restore of a dump of an entire CouchDB instance
    #[command(
        name = "restoreAll",
        after_help = "Each file in <filedir> is restored into the database named after it, without the .json suffix.\n\n\
Examples:\n dbackupcli restoreAll -f backup_dir -u admin -p root --host 127.0.0.1"
    )]
    RestoreAll(RestoreAllArgs),

    /// List the databases contained in the specified CouchDB
    #[command(
        name = "listdbs",
        after_help = "Examples:\n dbackupcli listdbs -u admin -p root --host 127.0.0.1 --port 9876"
    )]
    ListDbs(ListArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Backup(_) => BACKUP,
            Commands::BackupAll(_) => BACKUP_ALL,
            Commands::Restore(_) => RESTORE,
            Commands::RestoreAll(_) => RESTORE_ALL,
            Commands::ListDbs(_) => LIST_DBS,
        }
    }
}

#[derive(Args, Clone, Default)]
pub struct ConnectionArgs {
    /// The CouchDB username for the auth
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// The CouchDB password for the auth
    #[arg(short = 'p', long = "password")]
    pub password: Option<String>,

    /// The host of the remote CouchDB
    #[arg(long = "host")]
    pub host: Option<String>,

    /// The port of the remote CouchDB
    #[arg(long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Args, Clone, Default)]
pub struct BackupArgs {
    /// The filename where to dump the backup (e.g. dump.json)
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Clone, Default)]
pub struct BackupAllArgs {
    /// The directory where to dump the entire instance; must not exist yet
    #[arg(short = 'f', long = "filedir")]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Clone, Default)]
pub struct RestoreArgs {
    /// The database where to restore the dump
    #[arg(short = 'd', long = "database")]
    pub database: Option<String>,

    /// The filename containing the dump to restore (e.g. dump.json)
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Create the database if it does not exist on the remote CouchDB
    #[arg(short = 'c', long = "createdb")]
    pub create_db: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Clone, Default)]
pub struct RestoreAllArgs {
    /// The directory containing the instance's dump to restore
    #[arg(short = 'f', long = "filedir")]
    pub dir: Option<PathBuf>,

    /// Accepted for compatibility; databases are always created when missing
    #[arg(short = 'c', long = "createdb", hide = true)]
    pub create_db: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Validated connection parameters, immutable for one invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub connection: ConnectionParams,
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BackupAllConfig {
    pub connection: ConnectionParams,
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RestoreConfig {
    pub connection: ConnectionParams,
    pub database: String,
    pub file: PathBuf,
    pub create_db: bool,
}

#[derive(Debug, Clone)]
pub struct RestoreAllConfig {
    pub connection: ConnectionParams,
    pub dir: PathBuf,
}

fn required_str(value: Option<String>, command: &'static str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::Validation { command })
}

fn required_path(value: Option<PathBuf>, command: &'static str) -> Result<PathBuf> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(AppError::Validation { command })
}

impl ConnectionArgs {
    pub fn resolve(self, command: &'static str) -> Result<ConnectionParams> {
        Ok(ConnectionParams {
            username: required_str(self.user, command)?,
            password: required_str(self.password, command)?,
            host: required_str(self.host, command)?,
            port: self.port,
        })
    }
}

impl BackupArgs {
    pub fn resolve(self) -> Result<BackupConfig> {
        let file = required_path(self.file, BACKUP)?;
        Ok(BackupConfig {
            connection: self.connection.resolve(BACKUP)?,
            file,
        })
    }
}

impl BackupAllArgs {
    pub fn resolve(self) -> Result<BackupAllConfig> {
        let dir = required_path(self.dir, BACKUP_ALL)?;
        Ok(BackupAllConfig {
            connection: self.connection.resolve(BACKUP_ALL)?,
            dir,
        })
    }
}

impl RestoreArgs {
    pub fn resolve(self) -> Result<RestoreConfig> {
        let database = required_str(self.database, RESTORE)?;
        let file = required_path(self.file, RESTORE)?;
        Ok(RestoreConfig {
            connection: self.connection.resolve(RESTORE)?,
            database,
            file,
            create_db: self.create_db,
        })
    }
}

impl RestoreAllArgs {
    pub fn resolve(self) -> Result<RestoreAllConfig> {
        let dir = required_path(self.dir, RESTORE_ALL)?;
        if self.create_db {
            tracing::debug!("--createdb is implied for {}", RESTORE_ALL);
        }
        Ok(RestoreAllConfig {
            connection: self.connection.resolve(RESTORE_ALL)?,
            dir,
        })
    }
}

impl ListArgs {
    pub fn resolve(self) -> Result<ConnectionParams> {
        self.connection.resolve(LIST_DBS)
    }
}
