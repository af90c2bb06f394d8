//! Display-time currency conversion and number formatting

use crate::currency::Currency;
use crate::roi::RoiResult;
use serde::Serialize;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a base-currency amount into the display currency
pub fn convert(value: f64, currency: &Currency) -> f64 {
    currency.from_base(value)
}

/// `<symbol><value>` with two decimals, after conversion
///
/// The converted amount goes through [`round2`] first, so the text always
/// shows `round2(value * rate)`.
pub fn format_money(value: f64, currency: &Currency) -> String {
    format!("{}{:.2}", currency.symbol, round2(convert(value, currency)))
}

/// `<value>%` with two decimals
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Formatted projection figures for one currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiDisplay {
    pub currency: String,
    pub future_value: String,
    pub profit: String,
    pub roi_percent: String,
}

impl RoiDisplay {
    /// Format a base-currency result for display in `currency`
    ///
    /// ROI is a ratio and therefore the same in every currency.
    pub fn new(result: &RoiResult, currency: &Currency) -> Self {
        Self {
            currency: currency.code.clone(),
            future_value: format_money(result.future_value, currency),
            profit: format_money(result.profit, currency),
            roi_percent: format_percent(result.roi_percent),
        }
    }
}
