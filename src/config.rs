//! TOML configuration
//!
//! ```toml
//! storage_dir = "/var/lib/estate-roi"
//! base_currency = "USD"
//! rates_csv = "rates.csv"
//! rates_as_of = "2024-06-01T00:00:00Z"
//!
//! [defaults]
//! principal = 250000.0
//! rate = 6.5
//! years = 10.0
//!
//! [[currencies]]
//! code = "USD"
//! symbol = "$"
//! rate = 1.0
//! ```

use crate::currency::{Currency, CurrencyTable, BASE_CURRENCY};
use crate::error::{Result, RoiError};
use crate::fx::{CsvRateSource, RateSource, StaticRateSource};
use crate::store::default_storage_dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    #[serde(default = "default_principal")]
    pub principal: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_years")]
    pub years: f64,
}

fn default_principal() -> f64 {
    10_000.0
}

fn default_rate() -> f64 {
    10.0
}

fn default_years() -> f64 {
    5.0
}

fn default_base_currency() -> String {
    BASE_CURRENCY.to_string()
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            rate: default_rate(),
            years: default_years(),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default)]
    pub rates_csv: Option<PathBuf>,
    /// Capture time of the inline `[[currencies]]` rates, RFC 3339
    #[serde(default)]
    pub rates_as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub defaults: InputDefaults,
    #[serde(default)]
    pub currencies: Vec<Currency>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            base_currency: default_base_currency(),
            rates_csv: None,
            rates_as_of: None,
            defaults: InputDefaults::default(),
            currencies: Vec::new(),
        }
    }
}

impl Config {
    /// `~/.estate-roi/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".estate-roi").join("config.toml"))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| RoiError::ConfigError(e.to_string()))
    }

    /// Read a configuration file
    ///
    /// A missing file yields the defaults. Relative `rates_csv` paths are
    /// resolved against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;

        if let (Some(csv), Some(dir)) = (config.rates_csv.as_ref(), path.parent()) {
            if csv.is_relative() {
                config.rates_csv = Some(dir.join(csv));
            }
        }

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path`, or the default location when `None`
    ///
    /// Unreadable or invalid files are reported as a warning and replaced
    /// by the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Self::default(),
        };

        match Self::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Rate source chosen by this configuration
    ///
    /// Precedence: `rates_csv`, then inline `[[currencies]]`, then the
    /// compiled-in table. The compiled-in table is USD-based, so any other
    /// `base_currency` needs one of the first two.
    pub fn rate_source(&self) -> Result<Box<dyn RateSource>> {
        if let Some(path) = &self.rates_csv {
            if self.rates_as_of.is_some() {
                log::warn!(
                    "rates_as_of is ignored with rates_csv; put an '# as_of:' line in {}",
                    path.display()
                );
            }
            return Ok(Box::new(CsvRateSource::new(path, &self.base_currency)));
        }

        if self.currencies.is_empty() {
            if !self.base_currency.trim().eq_ignore_ascii_case(BASE_CURRENCY) {
                return Err(RoiError::ConfigError(format!(
                    "base_currency {} needs rates_csv or [[currencies]]; the builtin table is {}-based",
                    self.base_currency, BASE_CURRENCY
                )));
            }
            return Ok(Box::new(StaticRateSource::new(CurrencyTable::builtin())));
        }

        let mut table =
            CurrencyTable::new(self.currencies.clone(), &self.base_currency)?.with_source("config");
        if let Some(as_of) = self.rates_as_of {
            table = table.with_as_of(as_of);
        }

        Ok(Box::new(StaticRateSource::new(table)))
    }

    /// Currency table chosen by this configuration
    pub fn currency_table(&self) -> Result<CurrencyTable> {
        self.rate_source()?.table()
    }
}
