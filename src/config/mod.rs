//! Configuration loading and management for the Payroll Calculation Engine.
//!
//! This module provides functionality to load statutory rate tables from
//! YAML files. Each table is effective-dated so a new tax year is deployed
//! by adding a file, without touching the calculation code.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kenya").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BandLimit, HousingLevyConfig, JurisdictionMetadata, NssfConfig, PayeBand, PayeConfig,
    ShifBracket, ShifConfig, StatutoryConfig, StatutoryRates,
};
