//! Error types for the chatrelay line protocol.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
///
/// Overlong lines are not an error: the codec reports them as
/// [`Line::TooLong`](crate::line::Line::TooLong) so the connection survives.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in a line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Detailed error message from the UTF-8 decoder.
        details: String,
    },
}

impl ProtocolError {
    /// Whether the error came from the underlying socket rather than the
    /// bytes the peer sent.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
