// dbackupcli/src/couchdb/model.rs
use serde::Deserialize;
use std::fmt;

/// Body of `GET /{db}`. Fields the server omits decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseInfo {
    #[serde(rename = "db_name")]
    pub name: String,
    pub sizes: Sizes,
    pub props: Props,
    #[serde(rename = "doc_count")]
    pub document_count: u64,
    #[serde(rename = "doc_del_count")]
    pub deletion_count: u64,
    pub disk_format_version: u32,
    #[serde(rename = "compact_running")]
    pub compaction_running: bool,
    pub cluster: Cluster,
}

impl DatabaseInfo {
    pub fn partitioned(&self) -> bool {
        self.props.partitioned
    }

    pub fn holds_documents(&self) -> bool {
        self.document_count > 0
    }
}

impl fmt::Display for DatabaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} docs, {} deleted, {}/{}/{} bytes active/external/file, q={} n={} r={} w={}, format {}",
            self.name,
            self.document_count,
            self.deletion_count,
            self.sizes.active,
            self.sizes.external,
            self.sizes.file,
            self.cluster.q,
            self.cluster.n,
            self.cluster.r,
            self.cluster.w,
            self.disk_format_version
        )?;
        if self.partitioned() {
            write!(f, ", partitioned")?;
        }
        if self.compaction_running {
            write!(f, ", compacting")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sizes {
    pub file: u64,
    pub external: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Props {
    pub partitioned: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub n: u32,
    pub q: u32,
    pub r: u32,
    pub w: u32,
}

/// Outcome of a metadata lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseLookup {
    Found(DatabaseInfo),
    /// Any non-200 answer, with the server's body as detail.
    Missing { status: u16, detail: String },
}

impl DatabaseLookup {
    pub fn status(&self) -> u16 {
        match self {
            DatabaseLookup::Found(_) => 200,
            DatabaseLookup::Missing { status, .. } => *status,
        }
    }
}
