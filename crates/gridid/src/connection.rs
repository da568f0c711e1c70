use crate::{RequestEnvelope, ResponseEnvelope, Result};

/// A blocking request/response channel to the directory service.
///
/// Implementations own connection setup, wire encoding and any timeout. A
/// call blocks the current thread for one round trip and either yields the
/// response or a [`TransportError`](crate::TransportError).
///
/// Calls take `&mut self`: callers that share a connection across threads
/// must serialize access themselves (e.g. behind a mutex).
pub trait DirectoryConnection {
    /// Sends `request` and waits for the paired response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`](crate::TransportError) if the exchange
    /// does not complete.
    fn send_recv(&mut self, request: RequestEnvelope) -> Result<ResponseEnvelope>;
}

impl<C: DirectoryConnection + ?Sized> DirectoryConnection for &mut C {
    fn send_recv(&mut self, request: RequestEnvelope) -> Result<ResponseEnvelope> {
        (**self).send_recv(request)
    }
}

impl<C: DirectoryConnection + ?Sized> DirectoryConnection for Box<C> {
    fn send_recv(&mut self, request: RequestEnvelope) -> Result<ResponseEnvelope> {
        (**self).send_recv(request)
    }
}
