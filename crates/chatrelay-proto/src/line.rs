//! Line-based codec for tokio.
//!
//! Reads newline-terminated UTF-8 lines with a hard length limit. A line that
//! exceeds the limit is skipped up to its terminator and reported as
//! [`Line::TooLong`] instead of failing the stream, so one oversized paste
//! does not cost the client its connection.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Default maximum line length in bytes, terminator excluded.
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// One decoded inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Line content with the `\n` / `\r\n` terminator removed.
    Text(String),
    /// A line that exceeded the limit and was discarded.
    TooLong {
        /// Number of bytes dropped, terminator included.
        len: usize,
    },
}

/// Newline-delimited codec with overlong-line recovery.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum content length
    max_len: usize,
    /// Skipping the remainder of an overlong line
    discarding: bool,
    /// Bytes dropped so far from the overlong line
    discarded: usize,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Create a codec with [`DEFAULT_MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
            discarded: 0,
        }
    }

    /// The configured limit.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn finish_discard(&mut self, tail: usize) -> Line {
        let len = self.discarded + tail;
        self.discarding = false;
        self.discarded = 0;
        self.next_index = 0;
        Line::TooLong { len }
    }

    fn decode_content(&self, raw: &[u8]) -> error::Result<Line> {
        let content = raw.strip_suffix(b"\n").unwrap_or(raw);
        let content = content.strip_suffix(b"\r").unwrap_or(content);

        if content.len() > self.max_len {
            return Ok(Line::TooLong { len: raw.len() });
        }

        let text = std::str::from_utf8(content).map_err(|e| error::ProtocolError::InvalidUtf8 {
            byte_pos: e.valid_up_to(),
            details: e.to_string(),
        })?;
        Ok(Line::Text(text.to_string()))
    }
}

impl Decoder for LineCodec {
    type Item = Line;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Line>> {
        // Look for newline starting from where we left off
        let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

        if self.discarding {
            return Ok(match newline {
                Some(offset) => {
                    let dropped = src.split_to(self.next_index + offset + 1);
                    Some(self.finish_discard(dropped.len()))
                }
                None => {
                    self.discarded += src.len();
                    src.clear();
                    self.next_index = 0;
                    None
                }
            });
        }

        match newline {
            Some(offset) => {
                let line = src.split_to(self.next_index + offset + 1);
                self.next_index = 0;
                self.decode_content(&line).map(Some)
            }
            None => {
                // One spare byte for a '\r' still waiting on its '\n'
                if src.len() > self.max_len + 1 {
                    self.discarding = true;
                    self.discarded = src.len();
                    src.clear();
                    self.next_index = 0;
                } else {
                    self.next_index = src.len();
                }
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Line>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        if self.discarding {
            let tail = src.len();
            src.clear();
            return Ok(Some(self.finish_discard(tail)));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // Unterminated final line: deliver what the peer sent before closing.
        let rest = src.split();
        self.next_index = 0;
        self.decode_content(&rest).map(Some)
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: T, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(msg.as_ref().as_bytes());
        Ok(())
    }
}
