//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::IndianState;

use super::types::{StatePreset, StatutoryConfig};

/// Contents of `pt_presets.yaml`.
#[derive(Debug, Clone, Deserialize)]
struct PresetsFile {
    presets: Vec<StatePreset>,
}

/// Loads and provides access to statutory configuration.
///
/// # Directory Structure
///
/// ```text
/// config/india/
/// ├── statutory.yaml    # PF, ESI, higher contribution, LWF, PT defaults
/// └── pt_presets.yaml   # State-wise Professional Tax cycles and slabs
/// ```
///
/// The loaded configuration is validated before it is returned, so a
/// `ConfigLoader` always holds a configuration that a payroll run may use.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/india").unwrap();
/// println!("PF ceiling: {}", loader.config().pf.ceiling);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing, contains invalid YAML, or the
    /// resulting configuration fails [`StatutoryConfig::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let mut config = Self::load_yaml::<StatutoryConfig>(&path.join("statutory.yaml"))?;
        let presets = Self::load_yaml::<PresetsFile>(&path.join("pt_presets.yaml"))?;
        config.professional_tax.presets = presets.presets;

        Self::from_config(config)
    }

    /// Wraps an in-memory configuration after validating it.
    pub fn from_config(config: StatutoryConfig) -> EngineResult<Self> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "Rejected statutory configuration");
            return Err(err);
        }

        info!(
            presets = config.professional_tax.presets.len(),
            pf_ceiling = %config.pf.ceiling,
            esi_ceiling = %config.esi.ceiling,
            "Loaded statutory configuration"
        );
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Gets the Professional Tax preset for a state.
    pub fn preset(&self, state: IndianState) -> Option<&StatePreset> {
        self.config.professional_tax.preset_for(state)
    }
}
