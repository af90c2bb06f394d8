//! Currency records and the display currency table

use crate::error::{Result, RoiError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Code of the currency all projections are computed in
pub const BASE_CURRENCY: &str = "USD";

/// Illustrative display rates relative to USD. Not tied to any market feed.
pub const DEFAULT_CURRENCIES: [(&str, &str, f64); 6] = [
    ("USD", "$", 1.0),
    ("EUR", "€", 0.85),
    ("GBP", "£", 0.73),
    ("JPY", "¥", 110.0),
    ("AUD", "A$", 1.35),
    ("CAD", "C$", 1.25),
];

/// A display currency: ISO 4217 code, glyph and multiplier from the base unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub rate: f64,
}

impl Currency {
    /// Create new currency record
    pub fn new(code: impl Into<String>, symbol: impl Into<String>, rate: f64) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            rate,
        }
    }

    /// The base currency record (USD, rate 1)
    pub fn base() -> Self {
        Self::new(BASE_CURRENCY, "$", 1.0)
    }

    /// Convert an amount expressed in the base currency into this currency
    pub fn from_base(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Ordered, validated list of display currencies
///
/// Lookups are exact-match on the (upper-case) code. The table always
/// contains its base currency at rate 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyTable {
    currencies: Vec<Currency>,
    base_index: usize,
    /// When the rates were captured, if known
    pub as_of: Option<DateTime<Utc>>,
    /// Where the rates came from (e.g. "builtin", a file path)
    pub source: String,
}

impl CurrencyTable {
    /// Build a table, validating codes, rates and the presence of `base_code`
    pub fn new(currencies: Vec<Currency>, base_code: &str) -> Result<Self> {
        if currencies.is_empty() {
            return Err(RoiError::InvalidTable("table has no currencies".to_string()));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(currencies.len());

        for currency in currencies {
            let code = currency.code.trim().to_uppercase();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(RoiError::InvalidTable(format!(
                    "currency code must be three letters, got '{}'",
                    currency.code
                )));
            }
            if !currency.rate.is_finite() || currency.rate <= 0.0 {
                return Err(RoiError::InvalidTable(format!(
                    "rate for {} must be positive, got {}",
                    code, currency.rate
                )));
            }
            if !seen.insert(code.clone()) {
                return Err(RoiError::InvalidTable(format!("duplicate currency {}", code)));
            }

            normalized.push(Currency {
                code,
                symbol: currency.symbol.trim().to_string(),
                rate: currency.rate,
            });
        }

        let base_code = base_code.trim().to_uppercase();
        let base_index = normalized
            .iter()
            .position(|c| c.code == base_code)
            .ok_or_else(|| {
                RoiError::InvalidTable(format!("base currency {} missing from table", base_code))
            })?;

        if normalized[base_index].rate != 1.0 {
            return Err(RoiError::InvalidTable(format!(
                "base currency {} must have rate 1, got {}",
                base_code, normalized[base_index].rate
            )));
        }

        Ok(Self {
            currencies: normalized,
            base_index,
            as_of: None,
            source: "custom".to_string(),
        })
    }

    /// The compiled-in six-currency table
    pub fn builtin() -> Self {
        Self {
            currencies: DEFAULT_CURRENCIES
                .iter()
                .map(|(code, symbol, rate)| Currency::new(*code, *symbol, *rate))
                .collect(),
            base_index: 0,
            as_of: None,
            source: "builtin".to_string(),
        }
    }

    /// Load a table from CSV with a `code,symbol,rate` header
    ///
    /// Lines starting with `#` are skipped, except that a
    /// `# as_of: <RFC 3339 timestamp>` line stamps the table.
    pub fn from_csv_reader<R: Read>(mut reader: R, base_code: &str) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(contents.as_bytes());

        let mut currencies = Vec::new();
        for record in rdr.deserialize() {
            let currency: Currency = record?;
            currencies.push(currency);
        }

        let table = Self::new(currencies, base_code)?;
        match parse_as_of_comment(&contents)? {
            Some(as_of) => Ok(table.with_as_of(as_of)),
            None => Ok(table),
        }
    }

    /// Load a table from a CSV file on disk
    pub fn from_csv_path(path: &Path, base_code: &str) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_csv_reader(file, base_code)?;
        log::info!("Loaded {} currencies from {}", table.len(), path.display());
        Ok(table.with_source(path.display().to_string()))
    }

    /// Load a table from a JSON array of currency records
    pub fn from_json(json: &str, base_code: &str) -> Result<Self> {
        let currencies: Vec<Currency> = serde_json::from_str(json)?;
        Self::new(currencies, base_code)
    }

    /// Stamp the table with the time its rates were captured
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Label the table's origin
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Exact-match lookup by code
    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// The base currency record
    pub fn base(&self) -> &Currency {
        &self.currencies[self.base_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.currencies.iter().map(|c| c.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Find a `# as_of: <timestamp>` comment line
fn parse_as_of_comment(contents: &str) -> Result<Option<DateTime<Utc>>> {
    let value = contents.lines().find_map(|line| {
        line.trim()
            .strip_prefix('#')
            .map(str::trim)
            .and_then(|comment| comment.strip_prefix("as_of:"))
            .map(str::trim)
    });

    value
        .map(|text| {
            DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| RoiError::ParseError(format!("as_of '{}': {}", text, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builtin_table() {
        let table = CurrencyTable::builtin();
        assert_eq!(table.len(), 6);
        assert_eq!(table.codes(), vec!["USD", "EUR", "GBP", "JPY", "AUD", "CAD"]);
        assert_eq!(table.base().code, "USD");
        assert_eq!(table.base().rate, 1.0);
        assert_eq!(table.source, "builtin");
    }

    #[test]
    fn test_builtin_passes_validation() {
        let currencies: Vec<Currency> = CurrencyTable::builtin().iter().cloned().collect();
        let table = CurrencyTable::new(currencies, BASE_CURRENCY).unwrap();
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_exact_lookup() {
        let table = CurrencyTable::builtin();
        let eur = table.get("EUR").unwrap();
        assert_eq!(eur.symbol, "€");
        assert_eq!(eur.rate, 0.85);

        assert!(table.get("eur").is_none());
        assert!(table.get("XYZ").is_none());
        assert!(table.contains("JPY"));
    }

    #[test]
    fn test_from_base() {
        let jpy = Currency::new("JPY", "¥", 110.0);
        assert_eq!(jpy.from_base(2.0), 220.0);
        assert_eq!(format!("{}", jpy), "JPY");
    }

    #[test]
    fn test_codes_are_normalized() {
        let table = CurrencyTable::new(
            vec![Currency::new("usd", "$", 1.0), Currency::new(" chf ", "CHF", 0.9)],
            "usd",
        )
        .unwrap();
        assert_eq!(table.codes(), vec!["USD", "CHF"]);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(CurrencyTable::new(vec![], "USD").is_err());

        let dup = vec![Currency::new("USD", "$", 1.0), Currency::new("USD", "$", 1.0)];
        assert!(CurrencyTable::new(dup, "USD").is_err());

        let negative = vec![Currency::new("USD", "$", 1.0), Currency::new("EUR", "€", -0.5)];
        assert!(CurrencyTable::new(negative, "USD").is_err());

        let nan = vec![Currency::new("USD", "$", 1.0), Currency::new("EUR", "€", f64::NAN)];
        assert!(CurrencyTable::new(nan, "USD").is_err());

        let no_base = vec![Currency::new("EUR", "€", 1.0)];
        assert!(CurrencyTable::new(no_base, "USD").is_err());

        let bad_base_rate = vec![Currency::new("USD", "$", 1.1)];
        assert!(CurrencyTable::new(bad_base_rate, "USD").is_err());

        let bad_code = vec![Currency::new("USDX", "$", 1.0)];
        assert!(CurrencyTable::new(bad_code, "USDX").is_err());
    }

    #[test]
    fn test_from_csv() {
        let data = "code,symbol,rate\n# snapshot\nUSD,$,1\nEUR,€,0.9\nCHF, Fr , 0.88\n";
        let table = CurrencyTable::from_csv_reader(data.as_bytes(), "USD").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("EUR").unwrap().rate, 0.9);
        assert_eq!(table.get("CHF").unwrap().symbol, "Fr");
    }

    #[test]
    fn test_from_csv_as_of_comment() {
        let data = "# as_of: 2024-06-01T09:30:00+02:00\ncode,symbol,rate\nUSD,$,1\nEUR,€,0.9\n";
        let table = CurrencyTable::from_csv_reader(data.as_bytes(), "USD").unwrap();
        assert_eq!(
            table.as_of,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 7, 30, 0).unwrap())
        );

        let data = "# as_of: yesterday\ncode,symbol,rate\nUSD,$,1\n";
        assert!(matches!(
            CurrencyTable::from_csv_reader(data.as_bytes(), "USD"),
            Err(RoiError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_csv_bad_rate() {
        let data = "code,symbol,rate\nUSD,$,1\nEUR,€,abc\n";
        assert!(matches!(
            CurrencyTable::from_csv_reader(data.as_bytes(), "USD"),
            Err(RoiError::CsvError(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"code":"USD","symbol":"$","rate":1.0},{"code":"GBP","symbol":"£","rate":0.8}]"#;
        let table = CurrencyTable::from_json(json, "USD").unwrap();
        assert_eq!(table.get("GBP").unwrap().rate, 0.8);
    }

    #[test]
    fn test_metadata() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let table = CurrencyTable::builtin().with_as_of(dt).with_source("manual");
        assert_eq!(table.as_of, Some(dt));
        assert_eq!(table.source, "manual");
    }
}
