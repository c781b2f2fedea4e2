//! # chatrelay-proto
//!
//! The newline-delimited text protocol spoken between chatrelay clients and
//! the relay daemon.
//!
//! ## Features
//!
//! - Classification of inbound lines into control commands or chat payloads
//! - Builders for every line the server sends back
//! - Display-name sanitisation shared by registration and rename
//! - Optional Tokio codec with a hard line-length limit that recovers from
//!   overlong input instead of tearing down the stream
//!
//! ## Quick Start
//!
//! ```rust
//! use chatrelay_proto::{Command, response};
//!
//! assert_eq!(Command::parse("SVR:who"), Command::Who);
//! assert_eq!(Command::parse("SVR:rename carol"), Command::Rename("carol"));
//! assert_eq!(Command::parse("hello"), Command::Chat("hello"));
//!
//! assert_eq!(response::welcome("alice"), "Welcome alice!\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod name;
pub mod response;

pub use command::Command;
pub use error::ProtocolError;
#[cfg(feature = "tokio")]
pub use line::{Line, LineCodec, DEFAULT_MAX_LINE_LEN};
pub use name::{anonymous_name, sanitize_name, DEFAULT_ANONYMOUS_NAME, DEFAULT_NAME_MAX_LEN};
