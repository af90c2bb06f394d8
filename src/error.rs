//! Error types for estate-roi

use thiserror::Error;

/// Rejection of a single calculator input at the parsing boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} must be a number, got '{input}'")]
    NotANumber { field: &'static str, input: String },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Principal must be greater than zero, got {0}")]
    NonPositivePrincipal(f64),

    #[error("Years cannot be negative, got {0}")]
    NegativeYears(f64),

    #[error("Years cannot exceed 1000, got {0}")]
    YearsTooLarge(f64),

    #[error("Annual rate must be above -100%, got {0}%")]
    RateTooLow(f64),

    #[error("Projection overflows; reduce {field}")]
    ResultOverflow { field: &'static str },
}

impl ValidationError {
    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Empty { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotFinite { field, .. }
            | ValidationError::ResultOverflow { field } => field,
            ValidationError::NonPositivePrincipal(_) => "principal",
            ValidationError::NegativeYears(_) | ValidationError::YearsTooLarge(_) => "years",
            ValidationError::RateTooLow(_) => "rate",
        }
    }
}

/// Main error type for estate-roi
#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid currency table: {0}")]
    InvalidTable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Storage error for key '{key}': {reason}")]
    StorageError { key: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for estate-roi operations
pub type Result<T> = std::result::Result<T, RoiError>;
