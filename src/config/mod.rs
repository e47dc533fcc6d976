//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load statutory configuration from
//! YAML files: PF and ESI rates and ceilings, the higher-contribution scheme,
//! Labour Welfare Fund settings, and the state-wise Professional Tax presets.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/india").unwrap();
//! println!("ESI ceiling: {}", loader.config().esi.ceiling);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EsiConfig, HigherContributionConfig, HigherContributionMode, LwfConfig, LwfCycle, PfConfig,
    ProfessionalTaxConfig, PtCycle, PtSlab, StatePreset, StatutoryConfig,
};
