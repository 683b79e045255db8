//! Error types for the respite client.

use std::sync::Arc;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to a RESP server.
///
/// The enum is `Clone` so a single transport failure can be handed verbatim
/// to every command that was queued behind the one that hit it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred on the underlying byte stream.
    #[error("io error: {0}")]
    Io(Arc<std::io::Error>),

    /// The server answered a command with an error reply.
    ///
    /// The text is the server's message verbatim, including the leading
    /// error-code token (`ERR`, `BUSYGROUP`, ...). This affects one command
    /// only; the connection stays usable.
    #[error("server error: {0}")]
    Server(String),

    /// The incoming byte stream violated RESP framing.
    ///
    /// Fatal: the stream position can no longer be trusted, so the
    /// connection is poisoned and every pending command fails.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The response type did not match what the caller expected.
    #[error("unexpected response type: expected {expected}, got {actual}")]
    UnexpectedResponse {
        /// The expected type description.
        expected: &'static str,
        /// The actual type description.
        actual: String,
    },

    /// The connection was closed, either by the peer or via [`close`].
    ///
    /// [`close`]: crate::Client::close
    #[error("connection closed")]
    ConnectionClosed,

    /// An invalid argument was provided to a command.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}
