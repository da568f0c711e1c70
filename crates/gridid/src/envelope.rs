//! Typed request/response envelopes exchanged with the directory service.
//!
//! Every exchange carries a [`MessageType`] tag and an opaque payload. Scalar
//! payloads are sequences of little-endian 32-bit words; a response type
//! declares how many of them it reads through [`ScalarResponse::SCALARS`].

use crate::{ClusterIndex, CrossClusterJobId, Result, TransportError};
use bytes::Bytes;
use core::fmt;

/// Protocol version stamped on outgoing requests unless the client config
/// overrides it.
pub const PROTOCOL_VERSION: u16 = 1;

/// Number of bytes occupied by one payload scalar.
pub const SCALAR_SIZE: usize = core::mem::size_of::<u32>();

/// Message-type tag carried by every envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MessageType {
    /// Ask the directory to resend the full cluster table.
    ClusterTableRequest = 1,
    /// Ask the directory for a fresh cross-cluster job id.
    JobIdRequest = 2,
    /// Ask the directory which cluster owns a job id.
    JobOwnerRequest = 3,
    /// Full cluster table (opaque to this crate).
    ClusterTable = 101,
    /// One allocated job id.
    JobId = 102,
    /// One cluster index.
    JobOwner = 103,
}

impl MessageType {
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for MessageType {
    type Error = TransportError;

    fn try_from(code: u16) -> Result<Self> {
        Ok(match code {
            1 => Self::ClusterTableRequest,
            2 => Self::JobIdRequest,
            3 => Self::JobOwnerRequest,
            101 => Self::ClusterTable,
            102 => Self::JobId,
            103 => Self::JobOwner,
            other => return Err(TransportError::UnknownMessageType(u32::from(other))),
        })
    }
}

impl TryFrom<u32> for MessageType {
    type Error = TransportError;

    fn try_from(code: u32) -> Result<Self> {
        u16::try_from(code)
            .map_err(|_| TransportError::UnknownMessageType(code))
            .and_then(|code: u16| Self::try_from(code))
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClusterTableRequest => "cluster-table-request",
            Self::JobIdRequest => "job-id-request",
            Self::JobOwnerRequest => "job-owner-request",
            Self::ClusterTable => "cluster-table",
            Self::JobId => "job-id",
            Self::JobOwner => "job-owner",
        };
        f.write_str(name)
    }
}

/// An outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub protocol_version: u16,
    pub msg_type: MessageType,
    pub payload: Bytes,
}

impl RequestEnvelope {
    /// Creates a request with an empty payload.
    pub fn new(protocol_version: u16, msg_type: MessageType) -> Self {
        Self {
            protocol_version,
            msg_type,
            payload: Bytes::new(),
        }
    }

    /// Replaces the payload with a single little-endian scalar.
    #[must_use]
    pub fn with_scalar(mut self, value: u32) -> Self {
        self.payload = Bytes::copy_from_slice(&value.to_le_bytes());
        self
    }
}

/// An incoming response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub msg_type: MessageType,
    pub payload: Bytes,
}

impl ResponseEnvelope {
    pub fn new(msg_type: MessageType, payload: impl Into<Bytes>) -> Self {
        Self {
            msg_type,
            payload: payload.into(),
        }
    }

    /// Decodes the payload as `T`. See [`ScalarResponse::decode`].
    pub fn decode<T: ScalarResponse>(&self) -> Result<T> {
        T::decode(&self.payload)
    }
}

/// A view over exactly `SCALARS` little-endian words of a payload.
#[derive(Clone, Copy, Debug)]
pub struct Scalars<'a>(&'a [u8]);

impl Scalars<'_> {
    /// Returns the word at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the declaring type's
    /// [`ScalarResponse::SCALARS`].
    pub fn u32_at(&self, index: usize) -> u32 {
        let start = index * SCALAR_SIZE;
        let mut word = [0u8; SCALAR_SIZE];
        word.copy_from_slice(&self.0[start..start + SCALAR_SIZE]);
        u32::from_le_bytes(word)
    }

    /// Returns the word at `index` reinterpreted as signed.
    ///
    /// # Panics
    ///
    /// Same as [`Scalars::u32_at`].
    pub fn i32_at(&self, index: usize) -> i32 {
        self.u32_at(index) as i32
    }
}

/// A response whose payload is a fixed number of 32-bit scalars.
pub trait ScalarResponse: Sized {
    /// Number of scalars read from the front of the payload.
    const SCALARS: usize;

    /// Builds the value from exactly [`Self::SCALARS`] words.
    fn from_scalars(scalars: Scalars<'_>) -> Self;

    /// Decodes the leading [`Self::SCALARS`] words of `payload`.
    ///
    /// Trailing bytes are ignored so a response wrapped in an outer
    /// message-type word still decodes.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Truncated`] if the payload is too short.
    fn decode(payload: &[u8]) -> Result<Self> {
        let expected = Self::SCALARS * SCALAR_SIZE;
        let body = payload.get(..expected).ok_or(TransportError::Truncated {
            expected,
            actual: payload.len(),
        })?;
        Ok(Self::from_scalars(Scalars(body)))
    }
}

/// Response to [`MessageType::JobIdRequest`]. May hold the zero sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocatedJobId(pub CrossClusterJobId);

impl ScalarResponse for AllocatedJobId {
    const SCALARS: usize = 1;

    fn from_scalars(scalars: Scalars<'_>) -> Self {
        Self(CrossClusterJobId::from_raw(scalars.u32_at(0)))
    }
}

/// Response to [`MessageType::JobOwnerRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobOwner(pub ClusterIndex);

impl ScalarResponse for JobOwner {
    const SCALARS: usize = 1;

    fn from_scalars(scalars: Scalars<'_>) -> Self {
        Self(ClusterIndex::from_raw(scalars.i32_at(0)))
    }
}
