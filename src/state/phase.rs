//! Session phase machine.
//!
//! ```text
//! ┌─────────────┐  identity line  ┌─────────┐
//! │ Identifying ├────────────────►│ Serving │
//! └──────┬──────┘                 └────┬────┘
//!        │ timeout / EOF / error       │ EOF / error / SVR:disconnect / shutdown
//!        ▼                             ▼
//!   ┌─────────────────────────────────────┐        ┌────────┐
//!   │               Closing               ├───────►│ Closed │
//!   └─────────────────────────────────────┘        └────────┘
//! ```
//!
//! The move into `Closing` is a single compare-and-set, so when two triggers
//! race only one of them gets to run teardown.

use std::sync::atomic::{AtomicU8, Ordering};

/// Where a session is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Identifying = 0,
    Serving = 1,
    Closing = 2,
    Closed = 3,
}

impl Phase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Identifying,
            1 => Self::Serving,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }

    /// `Closing` or `Closed`.
    pub fn is_terminating(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }
}

/// Atomic holder for a session's [`Phase`].
#[derive(Debug)]
pub struct PhaseCell(AtomicU8);

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(Phase::Identifying as u8))
    }

    pub fn get(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::Acquire))
    }

    /// `Identifying` → `Serving`. Fails if the session already started closing.
    pub fn mark_serving(&self) -> bool {
        self.0
            .compare_exchange(
                Phase::Identifying as u8,
                Phase::Serving as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Enter `Closing`. Returns `true` for exactly one caller; every later
    /// caller observes `Closing`/`Closed` and must do nothing.
    pub fn begin_close(&self) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                (!Phase::from_u8(raw).is_terminating()).then_some(Phase::Closing as u8)
            })
            .is_ok()
    }

    /// Terminal transition once teardown has finished.
    pub fn mark_closed(&self) {
        self.0.store(Phase::Closed as u8, Ordering::Release);
    }
}
