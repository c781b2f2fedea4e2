//! Phase 1: read the identity line and register.

use super::Connection;
use super::error_handling::log_read_error;
use super::teardown::CloseReason;
use chatrelay_proto::{Line, response};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::timeout;
use tracing::{debug, info, warn};

impl Connection {
    /// Wait for the identity line, register the connection under it and send
    /// the welcome. Returns the receiving end of the outbound queue.
    ///
    /// Nothing is registered and nobody is notified if the client never
    /// identifies.
    pub(super) async fn identify(
        &mut self,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) -> Result<mpsc::Receiver<Arc<str>>, CloseReason> {
        let deadline = Duration::from_secs(self.hub.timeouts.identify);

        let line = tokio::select! {
            read = timeout(deadline, self.reader.next()) => match read {
                Err(_) => {
                    info!(timeout_secs = deadline.as_secs(), "Identification timed out");
                    return Err(CloseReason::IdentifyTimeout);
                }
                Ok(None) => return Err(CloseReason::Eof),
                Ok(Some(Err(e))) => {
                    log_read_error(&e);
                    return Err(CloseReason::ReadError);
                }
                Ok(Some(Ok(line))) => line,
            },
            _ = shutdown_rx.recv() => return Err(CloseReason::Shutdown),
        };

        let proposed = match line {
            Line::Text(text) => text,
            Line::TooLong { len } => {
                debug!(len, "Identity line too long, assigning anonymous name");
                String::new()
            }
        };

        let (outbound_tx, outbound_rx) = mpsc::channel(self.hub.limits.outbound_queue);
        let name = self.hub.registry.register(self.id, &proposed, outbound_tx);
        self.phase.mark_serving();
        info!(name = %name, "Client identified");

        if let Err(e) = self.writer.send(response::welcome(&name)).await {
            warn!(error = %e, "Failed to send welcome");
            return Err(CloseReason::WriteError);
        }

        Ok(outbound_rx)
    }
}
