//! Blocking [`DirectoryConnection`] over gRPC.
//!
//! The directory calls are synchronous, while tonic is async. A
//! [`TonicConnection`] owns a small multi-threaded Tokio runtime and drives
//! each exchange to completion with `block_on`, so it must not be used from
//! inside another Tokio runtime.

#[cfg(test)]
mod tests;

use crate::{Error, Result, proto::Envelope, proto::directory_client::DirectoryClient, transport_error};
use core::time::Duration;
use gridid::{DirectoryConnection, RequestEnvelope, ResponseEnvelope};
use tokio::runtime::Runtime;
use tonic::transport::{Channel, Endpoint};

/// Where and how to reach the directory service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// gRPC endpoint, e.g. `http://127.0.0.1:50061`.
    pub endpoint: String,
    /// Per-request deadline enforced by the transport. `None` waits
    /// indefinitely.
    pub timeout: Option<Duration>,
    /// Deadline for establishing the underlying connection.
    pub connect_timeout: Option<Duration>,
}

impl ConnectionConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            connect_timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    fn endpoint(&self) -> Result<Endpoint> {
        let mut endpoint = Endpoint::from_shared(self.endpoint.clone()).map_err(|source| {
            Error::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                source,
            }
        })?;
        if let Some(timeout) = self.timeout {
            endpoint = endpoint.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }
        Ok(endpoint)
    }
}

/// A blocking connection to the directory service's `Exchange` RPC.
pub struct TonicConnection {
    client: DirectoryClient<Channel>,
    // Dropped after `client`.
    runtime: Runtime,
}

impl TonicConnection {
    /// Connects eagerly; fails if the directory cannot be reached now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] for a malformed endpoint,
    /// [`Error::Connect`] if the connection attempt fails, and
    /// [`Error::Runtime`] if the runtime cannot be built.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let runtime = build_runtime()?;
        let channel = runtime.block_on(endpoint.connect())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %config.endpoint, "connected to directory service");

        Ok(Self {
            client: DirectoryClient::new(channel),
            runtime,
        })
    }

    /// Creates the connection without contacting the directory. Connection
    /// failures surface as transport errors on the first call instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] or [`Error::Runtime`].
    pub fn connect_lazy(config: &ConnectionConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let runtime = build_runtime()?;
        let channel = {
            let _guard = runtime.enter();
            endpoint.connect_lazy()
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %config.endpoint, "lazy directory connection created");

        Ok(Self {
            client: DirectoryClient::new(channel),
            runtime,
        })
    }
}

impl DirectoryConnection for TonicConnection {
    fn send_recv(&mut self, request: RequestEnvelope) -> gridid::Result<ResponseEnvelope> {
        let envelope = Envelope::from(request);
        let reply = self
            .runtime
            .block_on(self.client.exchange(envelope))
            .map_err(|status| transport_error(&status))?;
        ResponseEnvelope::try_from(reply.into_inner())
    }
}

fn build_runtime() -> Result<Runtime> {
    // Multi-threaded so the channel's background worker keeps running
    // between calls.
    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("gridid-directory")
        .enable_all()
        .build()?)
}
