//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//! Phase 1: Identify (one line, bounded by timeouts.identify)
//!    ↓ register + welcome
//! Phase 2: Event loop (tokio::select!)
//!    ┌──────────────────────────────────────────────┐
//!    │  FramedRead ──► Interpreter ──► replies ─────┼──► FramedWrite
//!    │                     │                        │        ▲
//!    │                     └──► fanout ──► peers'   │        │
//!    │                                    queues    │        │
//!    │  outbound queue ─────────────────────────────┼────────┘
//!    │  shutdown signal ──► close                   │
//!    └──────────────────────────────────────────────┘
//! Phase 3: Teardown (exactly once)
//! ```

mod error_handling;
mod event_loop;
mod identify;
mod teardown;

use teardown::CloseReason;

use crate::handlers::Interpreter;
use crate::state::{ConnectionId, Hub, PhaseCell};
use chatrelay_proto::LineCodec;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{info, instrument};

/// A client connection handler.
pub struct Connection {
    id: ConnectionId,
    addr: SocketAddr,
    hub: Arc<Hub>,
    interpreter: Arc<Interpreter>,
    reader: FramedRead<OwnedReadHalf, LineCodec>,
    writer: FramedWrite<OwnedWriteHalf, LineCodec>,
    phase: PhaseCell,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        stream: TcpStream,
        addr: SocketAddr,
        hub: Arc<Hub>,
        interpreter: Arc<Interpreter>,
    ) -> Self {
        let max_len = hub.limits.max_line_length;
        let (read_half, write_half) = stream.into_split();

        Self {
            id,
            addr,
            hub,
            interpreter,
            reader: FramedRead::new(read_half, LineCodec::with_max_len(max_len)),
            writer: FramedWrite::new(write_half, LineCodec::with_max_len(max_len)),
            phase: PhaseCell::new(),
        }
    }

    /// Drive the session from identification to close.
    #[instrument(skip(self), fields(conn_id = %self.id, addr = %self.addr), name = "connection")]
    pub async fn run(mut self) {
        // Subscribe before checking the flag so a signal sent in between is
        // still seen by the event loop.
        let mut shutdown_rx = self.hub.lifecycle.subscribe();
        info!(server = %self.hub.server_name, "Client connected");

        let reason = if self.hub.lifecycle.is_shutting_down() {
            CloseReason::Shutdown
        } else {
            match self.identify(&mut shutdown_rx).await {
                Ok(outbound_rx) => self.serve(outbound_rx, &mut shutdown_rx).await,
                Err(reason) => reason,
            }
        };

        self.close(reason).await;
    }
}
