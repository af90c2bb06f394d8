//! Exchange-rate sources
//!
//! Display rates come from a [`RateSource`]. The compiled-in table is served
//! by [`StaticRateSource`]; [`CsvRateSource`] reads a snapshot from disk.
//! An external feed would implement the same trait.
//!
//! # Example
//!
//! ```rust
//! use estate_roi::currency::CurrencyTable;
//! use estate_roi::fx::{convert_amount, RateSource, StaticRateSource};
//!
//! let source = StaticRateSource::new(CurrencyTable::builtin());
//! assert_eq!(source.rate("EUR").unwrap(), 0.85);
//!
//! // 85 EUR -> 100 USD -> 73 GBP
//! let gbp = convert_amount(&source, 85.0, "EUR", "GBP").unwrap();
//! assert!((gbp - 73.0).abs() < 1e-9);
//! ```

use crate::currency::CurrencyTable;
use crate::error::{Result, RoiError};
use std::path::{Path, PathBuf};

/// Trait for reading display exchange rates
pub trait RateSource: Send + Sync {
    /// Full table of currencies this source knows about
    fn table(&self) -> Result<CurrencyTable>;

    /// Multiplier from the base currency to `code`
    fn rate(&self, code: &str) -> Result<f64> {
        self.table()?
            .get(code)
            .map(|c| c.rate)
            .ok_or_else(|| RoiError::UnknownCurrency(code.to_string()))
    }

    /// Check if a rate is available
    fn has_rate(&self, code: &str) -> bool {
        self.rate(code).is_ok()
    }
}

/// Rates held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    table: CurrencyTable,
}

impl StaticRateSource {
    pub fn new(table: CurrencyTable) -> Self {
        Self { table }
    }
}

impl RateSource for StaticRateSource {
    fn table(&self) -> Result<CurrencyTable> {
        Ok(self.table.clone())
    }

    fn rate(&self, code: &str) -> Result<f64> {
        self.table
            .get(code)
            .map(|c| c.rate)
            .ok_or_else(|| RoiError::UnknownCurrency(code.to_string()))
    }
}

/// Rates read from a `code,symbol,rate` CSV file on every call
///
/// Re-reading lets an operator replace the file without restarting.
#[derive(Debug, Clone)]
pub struct CsvRateSource {
    path: PathBuf,
    base_code: String,
}

impl CsvRateSource {
    pub fn new(path: impl Into<PathBuf>, base_code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base_code: base_code.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSource for CsvRateSource {
    fn table(&self) -> Result<CurrencyTable> {
        CurrencyTable::from_csv_path(&self.path, &self.base_code)
    }
}

/// Convert an amount between two currencies of the same source
///
/// Goes through the base currency: `amount / rate(from) * rate(to)`.
pub fn convert_amount<S: RateSource + ?Sized>(
    source: &S,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<f64> {
    if from == to {
        source.rate(from)?;
        return Ok(amount);
    }

    let from_rate = source.rate(from)?;
    let to_rate = source.rate(to)?;
    Ok(amount / from_rate * to_rate)
}
