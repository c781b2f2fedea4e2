//! Command handlers.
//!
//! Every line a serving client sends goes through the [`Interpreter`]: the
//! `SVR:` commands are dispatched to a [`Handler`], anything else comes back
//! as [`Dispatch::Relay`] and is handed to the [`fanout`] broadcaster.

mod context;
mod disconnect;
pub mod fanout;
mod interpreter;
mod rename;
mod who;

pub use crate::error::{HandlerError, HandlerResult};
pub use context::{Context, Handler};
pub use disconnect::DisconnectHandler;
pub use interpreter::{Dispatch, Interpreter};
pub use rename::RenameHandler;
pub use who::WhoHandler;
