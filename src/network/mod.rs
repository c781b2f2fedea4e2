//! Network layer.
//!
//! - [`Gateway`]: TCP listener and accept loop
//! - [`Connection`]: one client session from accept to close

mod connection;
mod gateway;

pub use connection::Connection;
pub use gateway::Gateway;
