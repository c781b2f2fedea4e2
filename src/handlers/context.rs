//! Handler context and trait.

use crate::error::HandlerResult;
use crate::state::{ConnectionId, Hub};
use async_trait::async_trait;
use chatrelay_proto::Command;
use std::sync::Arc;

/// Per-line state handed to a handler.
///
/// Replies are collected here rather than written directly: the session owns
/// the socket writer and flushes them once the handler returns.
pub struct Context<'a> {
    /// Connection the line came from.
    pub id: ConnectionId,
    /// Shared server state.
    pub hub: &'a Arc<Hub>,
    replies: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(id: ConnectionId, hub: &'a Arc<Hub>) -> Self {
        Self {
            id,
            hub,
            replies: Vec::new(),
        }
    }

    /// Queue a reply for the requesting client only.
    pub fn reply(&mut self, line: impl Into<String>) {
        self.replies.push(line.into());
    }

    /// Drain the queued replies in the order they were added.
    pub fn take_replies(&mut self) -> Vec<String> {
        std::mem::take(&mut self.replies)
    }
}

/// A control command implementation.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult;
}
