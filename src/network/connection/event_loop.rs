//! Phase 2: the serving loop.

use super::Connection;
use super::error_handling::log_read_error;
use super::teardown::CloseReason;
use crate::handlers::{Context, Dispatch, HandlerError, fanout};
use chatrelay_proto::{Line, response};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

impl Connection {
    /// Process inbound lines, deliver queued outbound lines and watch for
    /// shutdown until something ends the session.
    pub(super) async fn serve(
        &mut self,
        mut outbound_rx: mpsc::Receiver<Arc<str>>,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) -> CloseReason {
        loop {
            tokio::select! {
                inbound = self.reader.next() => {
                    let text = match inbound {
                        None => return CloseReason::Eof,
                        Some(Err(e)) => {
                            log_read_error(&e);
                            return CloseReason::ReadError;
                        }
                        Some(Ok(Line::TooLong { len })) => {
                            warn!(len, "Input line too long");
                            if let Err(e) = self.writer.send(response::INPUT_TOO_LONG).await {
                                debug!(error = %e, "Write failed");
                                return CloseReason::WriteError;
                            }
                            continue;
                        }
                        Some(Ok(Line::Text(text))) => text,
                    };

                    if let Some(reason) = self.handle_line(&text).await {
                        return reason;
                    }
                }

                Some(line) = outbound_rx.recv() => {
                    if let Err(e) = self.writer.send(line).await {
                        debug!(error = %e, "Write failed");
                        return CloseReason::WriteError;
                    }
                }

                _ = shutdown_rx.recv() => return CloseReason::Shutdown,
            }
        }
    }

    /// Interpret one line. Returns a close reason when the session must end.
    async fn handle_line(&mut self, line: &str) -> Option<CloseReason> {
        if line.trim().is_empty() {
            return None;
        }

        let mut ctx = Context::new(self.id, &self.hub);
        let outcome = self.interpreter.dispatch(&mut ctx, line).await;
        let replies = ctx.take_replies();

        for reply in replies {
            if let Err(e) = self.writer.send(reply).await {
                debug!(error = %e, "Write failed");
                return Some(CloseReason::WriteError);
            }
        }

        match outcome {
            Ok(Dispatch::Handled) => None,
            Ok(Dispatch::Relay(text)) => {
                fanout::relay_chat(&self.hub.registry, self.id, text);
                None
            }
            Err(HandlerError::Disconnect) => Some(CloseReason::Disconnect),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Handler error");
                None
            }
        }
    }
}
