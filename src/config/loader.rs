//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! rate configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, StatutoryConfig, StatutoryRates};

/// Loads and provides access to statutory rate configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every rate table, and provides lookups by effective date.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kenya/
/// ├── jurisdiction.yaml    # Jurisdiction metadata
/// └── rates/
///     └── 2024-12-27.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/kenya").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let rates = loader.get_rates(date).unwrap();
/// assert_eq!(rates.version, "2024-12-27");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kenya")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any rate table fails validation
    /// - Two rate tables share an effective date
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdiction_path = path.join("jurisdiction.yaml");
        let metadata = Self::load_yaml::<JurisdictionMetadata>(&jurisdiction_path)?;

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        let config = StatutoryConfig::new(metadata, rates);
        for pair in config.rates().windows(2) {
            if pair[0].effective_date == pair[1].effective_date {
                return Err(EngineError::ConfigurationError {
                    message: format!(
                        "duplicate rate tables effective on {}",
                        pair[0].effective_date
                    ),
                });
            }
        }

        debug!(
            jurisdiction = %config.jurisdiction().code,
            rate_tables = config.rates().len(),
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

    /// Loads and validates all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<StatutoryRates>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<StatutoryRates>(&path)?;
                table.validate().map_err(|e| match e {
                    EngineError::ConfigurationError { message } => {
                        EngineError::ConfigurationError {
                            message: format!("{}: {}", path.display(), message),
                        }
                    }
                    other => other,
                })?;
                rates.push(table);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Gets the rate table in force on a given date.
    ///
    /// The most recent table whose effective date is on or before `date`
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RatesNotFound`] if every table takes effect
    /// after `date`.
    pub fn get_rates(&self, date: NaiveDate) -> EngineResult<&StatutoryRates> {
        self.config
            .rates_on(date)
            .ok_or(EngineError::RatesNotFound { date })
    }

    /// Gets the most recent rate table.
    pub fn latest_rates(&self) -> EngineResult<&StatutoryRates> {
        self.config
            .latest_rates()
            .ok_or_else(|| EngineError::ConfigurationError {
                message: "no rate tables loaded".to_string(),
            })
    }
}
