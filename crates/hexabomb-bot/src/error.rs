//! Errors that end a match early.
//!
//! None of these are recovered from: the controller stops at the first one
//! and hands it back to its caller, which decides how the process exits.

use hexabomb_core::StateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// The connection to the server failed
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The server closed the connection
    #[error("connection closed by server")]
    Disconnected,

    /// A message could not be encoded or decoded
    #[error("invalid message: {0}")]
    Codec(#[from] serde_json::Error),

    /// The server sent something we did not expect at this point
    #[error("protocol violation: expected {expected}, received {found}")]
    ProtocolViolation {
        expected: &'static str,
        found: String,
    },

    /// The server removed us from the session
    #[error("kicked from netorcai: {0}")]
    Kicked(String),

    /// The game state of a message could not be decoded
    #[error(transparent)]
    MalformedState(#[from] StateError),
}

impl BotError {
    pub(crate) fn unexpected(expected: &'static str, found: impl Into<String>) -> Self {
        BotError::ProtocolViolation {
            expected,
            found: found.into(),
        }
    }
}
