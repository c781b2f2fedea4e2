//! Hub - the process-wide shared state.
//!
//! Built once in `main` and handed to the gateway and every session as an
//! `Arc<Hub>`.

use crate::config::{Config, LimitsConfig, TimeoutsConfig};
use crate::state::{ConnectionRegistry, IdGenerator, LifecycleManager};

pub struct Hub {
    /// Server name for log output.
    pub server_name: String,
    /// Who is online.
    pub registry: ConnectionRegistry,
    /// Connection id source.
    pub ids: IdGenerator,
    pub limits: LimitsConfig,
    pub timeouts: TimeoutsConfig,
    /// Shutdown signaling.
    pub lifecycle: LifecycleManager,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        Self {
            server_name: config.server.name.clone(),
            registry: ConnectionRegistry::new(
                config.server.anonymous_name.clone(),
                config.limits.max_name_length,
            ),
            ids: IdGenerator::new(),
            limits: config.limits.clone(),
            timeouts: config.timeouts.clone(),
            lifecycle: LifecycleManager::new(),
        }
    }
}
