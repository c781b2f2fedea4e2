//! Lifecycle management state and behavior.
//!
//! Isolates server shutdown signaling from the rest of the shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Server shutdown signaling.
///
/// The gateway and every session hold a receiver. The flag covers receivers
/// that subscribe after the signal went out, since a broadcast is only seen
/// by receivers that existed when it was sent.
pub struct LifecycleManager {
    shutdown_tx: broadcast::Sender<()>,
    shutting_down: AtomicBool,
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleManager {
    pub fn new() -> Self {
        // Each receiver only ever needs the first message.
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            shutdown_tx,
            shutting_down: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal every subscriber. Repeated calls are harmless.
    pub fn shutdown(&self) {
        if !self.shutting_down.swap(true, Ordering::AcqRel) {
            // No receivers just means nothing is running yet.
            let _ = self.shutdown_tx.send(());
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }
}
