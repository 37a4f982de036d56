// ABOUTME: Platform error types with SNAFU context selectors.
// ABOUTME: Covers launching the client, remote failures, and undecodable responses.

use snafu::Snafu;

/// A failed call against the blob store or stack platform.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PlatformError {
    #[snafu(display("failed to launch `{program}`: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("failed to stage request body for {operation}: {source}"))]
    Staging {
        operation: String,
        source: std::io::Error,
    },

    #[snafu(display("{operation} failed: {message}"))]
    Remote { operation: String, message: String },

    #[snafu(display("malformed JSON in {operation} exchange: {source}"))]
    Decode {
        operation: String,
        source: serde_json::Error,
    },

    #[snafu(display("{operation} response is missing {field}"))]
    MissingField {
        operation: String,
        field: &'static str,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// The client program could not be run at all.
    ClientUnavailable,
    /// The platform rejected or failed the request.
    Remote,
    /// The platform answered with something unexpected.
    Protocol,
}

impl PlatformError {
    pub fn kind(&self) -> PlatformErrorKind {
        match self {
            PlatformError::Spawn { .. } | PlatformError::Staging { .. } => {
                PlatformErrorKind::ClientUnavailable
            }
            PlatformError::Remote { .. } => PlatformErrorKind::Remote,
            PlatformError::Decode { .. } | PlatformError::MissingField { .. } => {
                PlatformErrorKind::Protocol
            }
        }
    }

    /// A rejection with the platform's own message.
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        PlatformError::Remote {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
