use crate::PROTOCOL_VERSION;

/// Switch for the per-call diagnostic log lines.
///
/// Diagnostics are advisory: they never change what an operation returns.
/// They are only emitted when the crate's `tracing` feature is enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics(bool);

impl Diagnostics {
    pub const fn enabled() -> Self {
        Self(true)
    }

    pub const fn disabled() -> Self {
        Self(false)
    }

    pub const fn is_enabled(self) -> bool {
        self.0
    }
}

impl From<bool> for Diagnostics {
    fn from(enabled: bool) -> Self {
        Self(enabled)
    }
}

/// Settings fixed for the lifetime of a [`GridClient`](crate::GridClient).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Version stamped on every outgoing [`RequestEnvelope`](crate::RequestEnvelope).
    pub protocol_version: u16,
    pub diagnostics: Diagnostics,
}

impl ClientConfig {
    #[must_use]
    pub const fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub const fn with_protocol_version(mut self, protocol_version: u16) -> Self {
        self.protocol_version = protocol_version;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            diagnostics: Diagnostics::disabled(),
        }
    }
}
