//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket and spawns a [`Connection`] task for
//! each incoming client. Sessions are tracked so shutdown can wait for them.

use crate::handlers::Interpreter;
use crate::network::Connection;
use crate::state::Hub;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, instrument};

/// Pause after a non-transient accept error (e.g. out of file descriptors)
/// so the loop does not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// The Gateway accepts incoming TCP connections and spawns sessions.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
    interpreter: Arc<Interpreter>,
    tracker: TaskTracker,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Listener bound");

        Ok(Self {
            listener,
            hub,
            interpreter: Arc::new(Interpreter::new()),
            tracker: TaskTracker::new(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle on the set of session tasks, for waiting on them at shutdown.
    pub fn tracker(&self) -> TaskTracker {
        self.tracker.clone()
    }

    /// Accept connections until the shutdown signal.
    ///
    /// The listen socket is closed when this returns; sessions already
    /// spawned keep running until they see the signal themselves.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        let mut shutdown_rx = self.hub.lifecycle.subscribe();
        if self.hub.lifecycle.is_shutting_down() {
            return Ok(());
        }

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.spawn_connection(stream, addr),
                    Err(e) if is_transient(&e) => {
                        debug!(error = %e, "Transient accept error");
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
                _ = shutdown_rx.recv() => {
                    info!(
                        sessions = self.tracker.len(),
                        "Shutdown signal received, no longer accepting"
                    );
                    break;
                }
            }
        }

        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream, addr: SocketAddr) {
        if let Err(e) = stream.set_nodelay(true) {
            debug!(%addr, error = %e, "Failed to set TCP_NODELAY");
        }

        let id = self.hub.ids.next();
        debug!(conn_id = %id, %addr, "Connection accepted");

        let connection = Connection::new(
            id,
            stream,
            addr,
            Arc::clone(&self.hub),
            Arc::clone(&self.interpreter),
        );
        self.tracker.spawn(connection.run());
    }
}

/// Accept errors that concern a single pending connection rather than the
/// listener itself.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::WouldBlock
    )
}
