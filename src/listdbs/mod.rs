use anyhow::{Context, Result};

use crate::config::ConnectionParams;
use crate::couchdb::{CouchClient, DatabaseServer};

/// Public entry point for `listdbs`.
pub async fn run_list_flow(connection: &ConnectionParams) -> Result<()> {
    let server = CouchClient::new(connection)?;
    let names = fetch_listing(&server).await?;
    println!("{}", render_listing(&names));
    Ok(())
}

async fn fetch_listing<S: DatabaseServer>(server: &S) -> Result<Vec<String>> {
    server
        .list_databases()
        .await
        .context("Failed to list databases")
}

fn render_listing(names: &[String]) -> String {
    let mut out = format!("Found {} databases", names.len());
    if !names.is_empty() {
        out.push_str("\nList of databases:");
        for name in names {
            out.push_str("\n - ");
            out.push_str(name);
        }
    }
    out
}
