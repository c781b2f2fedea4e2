//! Shared server state.
//!
//! - [`Hub`]: process-wide state handed to every task
//! - [`ConnectionRegistry`]: who is online
//! - [`PhaseCell`]: per-session phase machine
//! - [`LifecycleManager`]: shutdown signaling

mod hub;
mod id;
mod lifecycle;
mod phase;
mod registry;

pub use hub::Hub;
pub use id::{ConnectionId, IdGenerator};
pub use lifecycle::LifecycleManager;
pub use phase::PhaseCell;
pub use registry::{ConnectionRegistry, RenameError};
