//! Command interpreter.
//!
//! Classifies each inbound line and dispatches `SVR:` commands to their
//! handler. Chat lines are not handled here; they come back to the session
//! as [`Dispatch::Relay`] for fan-out.

use super::{
    Context, DisconnectHandler, Handler, HandlerError, RenameHandler, WhoHandler,
};
use chatrelay_proto::Command;
use std::collections::HashMap;
use tracing::{Instrument, Level, debug, span};

/// Outcome of interpreting one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// A control command ran; its replies are in the context.
    Handled,
    /// Ordinary chat to broadcast to every other client.
    Relay(&'a str),
}

/// Table of control command handlers keyed by command name.
pub struct Interpreter {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with every control command registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        handlers.insert("who", Box::new(WhoHandler));
        handlers.insert("rename", Box::new(RenameHandler));
        handlers.insert("disconnect", Box::new(DisconnectHandler));

        Self { handlers }
    }

    /// Interpret one line from a serving client.
    ///
    /// Returns [`HandlerError::Disconnect`] when the client asked to leave.
    pub async fn dispatch<'l>(
        &self,
        ctx: &mut Context<'_>,
        line: &'l str,
    ) -> Result<Dispatch<'l>, HandlerError> {
        let cmd = Command::parse(line);
        if let Command::Chat(text) = cmd {
            return Ok(Dispatch::Relay(text));
        }

        let name = cmd.name();
        let Some(handler) = self.handlers.get(name) else {
            return Err(HandlerError::Internal(format!("no handler for {name}")));
        };

        let span = span!(Level::DEBUG, "command", name, conn_id = %ctx.id);
        async {
            debug!("Dispatching");
            handler.handle(ctx, &cmd).await
        }
        .instrument(span)
        .await?;

        Ok(Dispatch::Handled)
    }
}
