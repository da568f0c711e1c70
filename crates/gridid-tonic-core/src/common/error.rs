//! Error types for the gRPC directory adapter.
//!
//! [`Error`] covers failures while *setting up* a [`TonicConnection`]. Once a
//! connection exists, every failure is reported to the core crate as a
//! [`TransportError`], built from the [`tonic::Status`] of the call by
//! [`transport_error`].
//!
//! [`TonicConnection`]: crate::TonicConnection

use gridid::TransportError;
use tonic::{Code, Status};

pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while establishing a directory connection.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The endpoint string is not a valid URI.
    #[error("Invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// Connecting to the directory service failed.
    #[error("Connection error: {0}")]
    Connect(#[from] tonic::transport::Error),

    /// The runtime backing the blocking calls could not be built.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Maps the status of a failed call onto the core error taxonomy.
///
/// Codes that mean "the directory could not be reached in time" become
/// [`TransportError::Unavailable`]; everything else is a rejection.
pub fn transport_error(status: &Status) -> TransportError {
    match status.code() {
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled | Code::Aborted => {
            TransportError::Unavailable {
                reason: status.message().to_string(),
            }
        }
        code => TransportError::Rejected {
            code: code as i32,
            message: status.message().to_string(),
        },
    }
}
