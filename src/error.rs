//! Unified error handling for chatrelayd.
//!
//! Startup errors (config, bind) travel as `anyhow::Error` to `main`; this
//! module holds the errors raised while handling a client's lines.

use crate::state::ConnectionId;
use thiserror::Error;

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The client asked to leave; the session performs teardown.
    #[error("client requested disconnect")]
    Disconnect,

    /// The command needs a registered connection and this one is not.
    #[error("connection {0} is not registered")]
    NotRegistered(ConnectionId),

    /// Server-side bug, logged and otherwise ignored.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Disconnect => "disconnect",
            Self::NotRegistered(_) => "not_registered",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
