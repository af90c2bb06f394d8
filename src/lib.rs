//! # estate-roi
//!
//! Investment projection core for an international real-estate brokerage.
//!
//! Projections are computed in the base currency (USD) and converted into
//! the visitor's chosen display currency only when formatted.
//!
//! ## Example
//!
//! ```rust
//! use estate_roi::prelude::*;
//! use std::sync::Arc;
//!
//! let mut session = Session::new(CurrencyTable::builtin(), Arc::new(MemoryStore::new()));
//! session.set_principal("10000");
//! session.set_rate("10");
//! session.set_years("5");
//!
//! assert_eq!(session.outcome().unwrap().future_value, "$16105.10");
//!
//! session.select_currency("EUR");
//! assert_eq!(session.outcome().unwrap().future_value, "€13689.34");
//! ```

pub mod calculator;
pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod fx;
pub mod roi;
pub mod selector;
pub mod session;
pub mod store;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::calculator::{Field, Outcome, RoiCalculator};
    pub use crate::config::Config;
    pub use crate::currency::{Currency, CurrencyTable, BASE_CURRENCY};
    pub use crate::error::{Result, RoiError, ValidationError};
    pub use crate::format::RoiDisplay;
    pub use crate::fx::{convert_amount, RateSource, StaticRateSource};
    pub use crate::roi::{project, schedule, InvestmentParams, RoiResult};
    pub use crate::selector::{CurrencySelector, DisplayVars};
    pub use crate::session::Session;
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
}
