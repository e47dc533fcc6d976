//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, StatutoryConfig};

/// Shared application state.
///
/// Holds the validated statutory configuration shared by every request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        self.config.config()
    }
}
