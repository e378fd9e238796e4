//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load agreement configurations from
//! YAML files, including agreement metadata, the job category catalog, the
//! seniority scale, and effective-dated constants snapshots.
//!
//! # Example
//!
//! ```no_run
//! use convenio_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cct154").unwrap();
//! println!("Loaded agreement: {}", config.agreement().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgreementConfig, AgreementMetadata, AllowanceAmounts, Category, IncentiveAmounts,
    PercentageRates, RateSnapshot, SeniorityScale, WorkdayParams,
};
