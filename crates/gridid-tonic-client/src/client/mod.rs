//! Command execution for the `gridid` binary.
//!
//! - [`config`] - CLI arguments and their validation.
//! - [`telemetry`] - log subscriber setup.

pub mod config;
pub mod telemetry;

use anyhow::Context;
use bytes::Bytes;
use config::Command;
use gridid_tonic_core::gridid::{
    ClusterTableSink, CrossClusterJobId, DirectoryConnection, GridClient,
};

/// Logs the size of each refreshed cluster table. Applying the table is left
/// to the controller; the CLI only confirms it arrived.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTable;

impl ClusterTableSink for LogTable {
    fn apply(&self, table: Bytes) {
        tracing::info!(bytes = table.len(), "received cluster table");
    }
}

/// Runs `command` over `conn` and returns the line to print.
pub fn execute<C, S>(client: &GridClient<S>, conn: &mut C, command: &Command) -> anyhow::Result<String>
where
    C: DirectoryConnection + ?Sized,
    S: ClusterTableSink,
{
    Ok(match *command {
        Command::Refresh => {
            client
                .refresh_cluster_table(conn)
                .context("cluster table refresh failed")?;
            "cluster table refresh requested".to_string()
        }
        Command::Allocate => client.allocate_identifier(conn)?.to_string(),
        Command::Resolve { job_id } => {
            let job_id = CrossClusterJobId::from_raw(job_id);
            client
                .resolve_owner(conn, job_id)
                .with_context(|| format!("could not resolve owner of job id {job_id}"))?
                .to_string()
        }
    })
}
