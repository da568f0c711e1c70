//! The three calls a cluster controller makes against the directory service.
//!
//! - [`GridClient::refresh_cluster_table`] asks for a full table resend.
//! - [`GridClient::allocate_identifier`] obtains a new [`CrossClusterJobId`].
//! - [`GridClient::resolve_owner`] maps an id back to its [`ClusterIndex`].
//!
//! Each call is a single blocking round trip over a caller-owned
//! [`DirectoryConnection`]. Nothing is cached or retried between calls.
//!
//! [`CrossClusterJobId`]: crate::CrossClusterJobId
//! [`ClusterIndex`]: crate::ClusterIndex
//! [`DirectoryConnection`]: crate::DirectoryConnection

mod allocate;
mod refresh;
mod resolve;

use crate::ClientConfig;
use bytes::Bytes;

/// Emits a diagnostic event when the client's [`Diagnostics`] switch is on.
///
/// [`Diagnostics`]: crate::Diagnostics
macro_rules! diag {
    ($client:expr, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            if $client.config.diagnostics.is_enabled() {
                tracing::info!(target: "gridid::diag", $($arg)+);
            }
        }
    };
}
pub(crate) use diag;

#[cfg(feature = "tracing")]
pub(crate) fn outcome<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() { "success" } else { "failure" }
}

/// Receives the raw cluster table returned by a refresh.
///
/// Parsing and applying the table is entirely up to the implementation; the
/// refresh call does not look at the payload and cannot be failed by it.
pub trait ClusterTableSink {
    fn apply(&self, table: Bytes);
}

impl<F> ClusterTableSink for F
where
    F: Fn(Bytes),
{
    fn apply(&self, table: Bytes) {
        self(table)
    }
}

/// Sink that drops the table. Used when the caller applies table updates
/// through some other path.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardTable;

impl ClusterTableSink for DiscardTable {
    fn apply(&self, _table: Bytes) {}
}

/// Client for the directory service's job-id calls.
///
/// Holds only immutable configuration and the table sink, so one instance
/// can be shared across threads. The connection is passed to each call and
/// stays owned by the caller.
///
/// # Example
///
/// ```
/// use gridid::{
///     ClientConfig, DirectoryConnection, GridClient, MessageType, RequestEnvelope,
///     ResponseEnvelope, Result,
/// };
///
/// struct Fixed;
/// impl DirectoryConnection for Fixed {
///     fn send_recv(&mut self, _req: RequestEnvelope) -> Result<ResponseEnvelope> {
///         Ok(ResponseEnvelope::new(MessageType::JobId, 7u32.to_le_bytes().to_vec()))
///     }
/// }
///
/// let client = GridClient::new(ClientConfig::default());
/// let id = client.allocate_identifier(&mut Fixed).unwrap();
/// assert_eq!(id.to_raw(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct GridClient<S = DiscardTable> {
    config: ClientConfig,
    sink: S,
}

impl GridClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            sink: DiscardTable,
        }
    }
}

impl<S: ClusterTableSink> GridClient<S> {
    /// Creates a client that forwards refreshed cluster tables to `sink`.
    pub fn with_sink(config: ClientConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
