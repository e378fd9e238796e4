//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading agreement
//! configurations from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AgreementConfig, AgreementMetadata, CategoriesConfig, Category, RateSnapshot, SeniorityConfig,
};

/// Loads and provides access to agreement configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query categories, the seniority scale, and
/// constants snapshots.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/cct154/
/// ├── agreement.yaml       # Agreement metadata
/// ├── categories.yaml      # Job category catalog
/// ├── seniority.yaml       # Seniority scale
/// └── rates/
///     └── 2025-10-01.yaml  # Constants effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use convenio_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cct154").unwrap();
///
/// // Get a category
/// let category = loader.get_category("obrero_comun").unwrap();
/// println!("Category: {} (x{})", category.name, category.factor);
///
/// // Get the base salary effective for a period
/// let period = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let base = loader.get_base_salary(period).unwrap();
/// println!("Base salary: ${}", base);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AgreementConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/cct154")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any configured value violates the agreement invariants
    ///   (rates outside [0, 1], negative amounts, zero workday divisors)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use convenio_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/cct154")?;
    /// # Ok::<(), convenio_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load agreement.yaml
        let agreement_path = path.join("agreement.yaml");
        let metadata = Self::load_yaml::<AgreementMetadata>(&agreement_path)?;

        // Load categories.yaml
        let categories_path = path.join("categories.yaml");
        let categories_config = Self::load_yaml::<CategoriesConfig>(&categories_path)?;

        // Load seniority.yaml
        let seniority_path = path.join("seniority.yaml");
        let seniority_config = Self::load_yaml::<SeniorityConfig>(&seniority_path)?;

        // Load all snapshot files from the rates directory
        let rates_dir = path.join("rates");
        let snapshots = Self::load_snapshots(&rates_dir)?;

        let config = AgreementConfig::new(
            metadata,
            categories_config.categories,
            seniority_config.seniority,
            snapshots,
        )?;

        info!(
            agreement = %config.agreement().code,
            categories = config.categories().len(),
            snapshots = config.snapshots().len(),
            "Loaded agreement configuration"
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

    /// Loads all snapshot files from the rates directory.
    fn load_snapshots(rates_dir: &Path) -> EngineResult<Vec<RateSnapshot>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut snapshots = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let snapshot = Self::load_yaml::<RateSnapshot>(&path)?;
                snapshots.push(snapshot);
            }
        }

        if snapshots.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(snapshots)
    }

    /// Returns the underlying agreement configuration.
    pub fn config(&self) -> &AgreementConfig {
        &self.config
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementMetadata {
        self.config.agreement()
    }

    /// Gets a category by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The category code (e.g., "obrero_comun")
    ///
    /// # Returns
    ///
    /// Returns the category if found, or a `CategoryNotFound` error.
    pub fn get_category(&self, code: &str) -> EngineResult<&Category> {
        self.config.category(code)
    }

    /// Gets the base salary effective for a given period.
    ///
    /// The most recent snapshot effective on or before the period date is
    /// selected.
    pub fn get_base_salary(&self, period: NaiveDate) -> EngineResult<Decimal> {
        Ok(self.config.constants_for(period)?.base_salary)
    }

    /// Gets the seniority multiplier for a step index.
    ///
    /// Out-of-range indices fall back to 1.00 (no seniority).
    pub fn get_seniority_factor(&self, index: u32) -> Decimal {
        self.config.seniority().factor(index)
    }
}
