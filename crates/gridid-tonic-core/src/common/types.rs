//! # Envelope wire mapping
//!
//! Conversions between the core [`RequestEnvelope`]/[`ResponseEnvelope`] and
//! the protobuf [`Envelope`] carried by the `Directory.Exchange` call.
//!
//! The payload is passed through as `Bytes` in both directions; only the
//! message-type tag and the protocol version are checked while decoding.
//!
//! The client side uses `From<RequestEnvelope>` and `TryFrom<Envelope> for
//! ResponseEnvelope`. The other two conversions are the server-side half of
//! the schema: a directory implementation decodes incoming requests with
//! `TryFrom<Envelope> for RequestEnvelope` and encodes its replies with
//! `From<ResponseEnvelope>`.

use crate::proto::Envelope;
use gridid::{MessageType, PROTOCOL_VERSION, RequestEnvelope, ResponseEnvelope, TransportError};
use tonic::Code;

impl From<RequestEnvelope> for Envelope {
    fn from(req: RequestEnvelope) -> Self {
        Self {
            protocol_version: u32::from(req.protocol_version),
            msg_type: u32::from(req.msg_type.as_u16()),
            payload: req.payload,
        }
    }
}

/// Server side: encodes a directory reply. Stamps the local
/// [`PROTOCOL_VERSION`].
impl From<ResponseEnvelope> for Envelope {
    fn from(resp: ResponseEnvelope) -> Self {
        Self {
            protocol_version: u32::from(PROTOCOL_VERSION),
            msg_type: u32::from(resp.msg_type.as_u16()),
            payload: resp.payload,
        }
    }
}

impl TryFrom<Envelope> for ResponseEnvelope {
    type Error = TransportError;

    fn try_from(env: Envelope) -> Result<Self, Self::Error> {
        Ok(Self {
            msg_type: MessageType::try_from(env.msg_type)?,
            payload: env.payload,
        })
    }
}

/// Server side: decodes a request received by a directory implementation.
/// A version that does not fit `u16` is rejected as `InvalidArgument`.
impl TryFrom<Envelope> for RequestEnvelope {
    type Error = TransportError;

    fn try_from(env: Envelope) -> Result<Self, Self::Error> {
        let protocol_version =
            u16::try_from(env.protocol_version).map_err(|_| TransportError::Rejected {
                code: Code::InvalidArgument as i32,
                message: format!("protocol version {} out of range", env.protocol_version),
            })?;
        Ok(Self {
            protocol_version,
            msg_type: MessageType::try_from(env.msg_type)?,
            payload: env.payload,
        })
    }
}
