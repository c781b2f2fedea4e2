//! Read error classification for logging.

use chatrelay_proto::ProtocolError;
use std::io;
use tracing::{debug, info, warn};

/// How a read error should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ReadErrorKind {
    /// The peer went away abruptly (reset, broken pipe).
    PeerGone,
    /// The peer sent bytes that are not UTF-8.
    InvalidInput,
    /// Anything else from the socket.
    Io,
}

pub(super) fn classify_read_error(e: &ProtocolError) -> ReadErrorKind {
    match e {
        ProtocolError::InvalidUtf8 { .. } => ReadErrorKind::InvalidInput,
        ProtocolError::Io(io_err) => match io_err.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => ReadErrorKind::PeerGone,
            _ => ReadErrorKind::Io,
        },
        _ => ReadErrorKind::Io,
    }
}

/// Log a read error at a level matching how unusual it is.
pub(super) fn log_read_error(e: &ProtocolError) {
    match classify_read_error(e) {
        ReadErrorKind::PeerGone => debug!(error = %e, "Peer closed the connection"),
        ReadErrorKind::InvalidInput => info!(error = %e, "Closing connection on invalid input"),
        ReadErrorKind::Io => warn!(error = %e, "Read error"),
    }
}
