//! Error types for calls against the directory service.
//!
//! ## Error Cases
//! - [`TransportError`]: the send/receive round trip failed, or the response
//!   could not be decoded. Returned verbatim by
//!   [`GridClient::refresh_cluster_table`] and [`GridClient::resolve_owner`].
//! - [`AllocationError`]: [`GridClient::allocate_identifier`] produced no
//!   usable id, either because the transport failed or because the directory
//!   answered with the zero sentinel.
//!
//! [`GridClient::refresh_cluster_table`]: crate::GridClient::refresh_cluster_table
//! [`GridClient::resolve_owner`]: crate::GridClient::resolve_owner
//! [`GridClient::allocate_identifier`]: crate::GridClient::allocate_identifier

/// A result type defaulting to [`TransportError`].
pub type Result<T, E = TransportError> = core::result::Result<T, E>;

/// Failure of a single request/response exchange with the directory service.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The directory service could not be reached.
    #[error("directory unavailable: {reason}")]
    Unavailable { reason: String },

    /// The directory service (or the transport in front of it) refused the
    /// request.
    #[error("directory rejected request ({code}): {message}")]
    Rejected { code: i32, message: String },

    /// The response carried a message-type tag this client does not know.
    #[error("unknown message type {0}")]
    UnknownMessageType(u32),

    /// The response payload held fewer bytes than its type declares.
    #[error("truncated response: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Failure to allocate a cross-cluster job id.
///
/// Allocation-pool exhaustion on the directory side and transport failure
/// surface as this same error. The underlying cause only shows up in the
/// message and in [`std::error::Error::source`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct AllocationError(Repr);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
enum Repr {
    #[error("directory returned no job id, allocation pool may be exhausted")]
    Exhausted,
    #[error("job id request failed")]
    Transport(#[source] TransportError),
}

impl AllocationError {
    pub(crate) const fn exhausted() -> Self {
        Self(Repr::Exhausted)
    }

    pub(crate) const fn transport(err: TransportError) -> Self {
        Self(Repr::Transport(err))
    }
}
