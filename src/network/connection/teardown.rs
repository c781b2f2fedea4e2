//! Phase 3: teardown.

use super::Connection;
use crate::handlers::fanout;
use chatrelay_proto::response;
use futures_util::SinkExt;
use std::net::Shutdown;
use tracing::{debug, info};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// No identity line within the allowed time.
    IdentifyTimeout,
    /// The client closed its side.
    Eof,
    ReadError,
    WriteError,
    /// `SVR:disconnect`.
    Disconnect,
    /// The server is stopping.
    Shutdown,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentifyTimeout => "identify_timeout",
            Self::Eof => "eof",
            Self::ReadError => "read_error",
            Self::WriteError => "write_error",
            Self::Disconnect => "disconnect",
            Self::Shutdown => "shutdown",
        }
    }

    /// Whether the remaining clients are told about the departure.
    pub fn announces_departure(&self) -> bool {
        !matches!(self, Self::Shutdown)
    }
}

impl Connection {
    /// Remove the connection, notify the others and close the socket.
    pub(super) async fn close(self, reason: CloseReason) {
        if !self.phase.begin_close() {
            return;
        }
        debug!(phase = ?self.phase.get(), reason = reason.as_str(), "Closing");

        let name = self.hub.registry.remove(self.id);
        let remaining = self.hub.registry.len();
        if let Some(name) = &name
            && reason.announces_departure()
            && !self.hub.registry.is_empty()
        {
            let delivery = fanout::announce(&self.hub.registry, &response::disconnected(name));
            debug!(
                delivered = delivery.delivered,
                dropped = delivery.dropped,
                "Departure announced"
            );
        }

        let Connection {
            reader,
            mut writer,
            phase,
            ..
        } = self;

        // The item type only selects the Sink impl; close sends nothing.
        if let Err(e) = SinkExt::<&str>::close(&mut writer).await {
            debug!(error = %e, "Flush on close failed");
        }
        match reader.into_inner().reunite(writer.into_inner()) {
            Ok(stream) => match stream.into_std() {
                Ok(stream) => {
                    // The peer may already be gone.
                    let _ = stream.shutdown(Shutdown::Both);
                }
                Err(e) => debug!(error = %e, "Failed to detach socket"),
            },
            Err(e) => debug!(error = %e, "Socket halves did not reunite"),
        }

        phase.mark_closed();
        info!(
            name = ?name,
            reason = reason.as_str(),
            remaining,
            "Client disconnected"
        );
    }
}
