//! Reactive ROI calculator
//!
//! Holds the raw text of the three inputs and the currency it was last
//! given. Every change recomputes the outcome synchronously, so
//! [`RoiCalculator::outcome`] always reflects the current inputs.

use crate::currency::Currency;
use crate::error::ValidationError;
use crate::format::RoiDisplay;
use crate::roi::{project, InvestmentParams, RoiResult};

pub const DEFAULT_PRINCIPAL: &str = "10000";
pub const DEFAULT_RATE: &str = "10";
pub const DEFAULT_YEARS: &str = "5";

/// Formatted figures, or the reason the inputs were rejected
pub type Outcome = Result<RoiDisplay, ValidationError>;

/// Which input a change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Principal,
    Rate,
    Years,
}

#[derive(Debug, Clone)]
pub struct RoiCalculator {
    principal: String,
    rate: String,
    years: String,
    currency: Currency,
    outcome: Result<RoiResult, ValidationError>,
}

impl RoiCalculator {
    /// Calculator with the default placeholder inputs
    pub fn new(currency: Currency) -> Self {
        Self::with_inputs(DEFAULT_PRINCIPAL, DEFAULT_RATE, DEFAULT_YEARS, currency)
    }

    pub fn with_inputs(principal: &str, rate: &str, years: &str, currency: Currency) -> Self {
        let mut calculator = Self {
            principal: principal.to_string(),
            rate: rate.to_string(),
            years: years.to_string(),
            currency,
            outcome: Err(ValidationError::Empty { field: "principal" }),
        };
        calculator.recompute();
        calculator
    }

    /// Replace one input's text and recompute
    pub fn set(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Principal => &mut self.principal,
            Field::Rate => &mut self.rate,
            Field::Years => &mut self.years,
        };
        *slot = text.to_string();
        self.recompute();
    }

    pub fn set_principal(&mut self, text: &str) {
        self.set(Field::Principal, text);
    }

    pub fn set_rate(&mut self, text: &str) {
        self.set(Field::Rate, text);
    }

    pub fn set_years(&mut self, text: &str) {
        self.set(Field::Years, text);
    }

    /// Switch display currency. Base-currency results are untouched.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn input(&self, field: Field) -> &str {
        match field {
            Field::Principal => &self.principal,
            Field::Rate => &self.rate,
            Field::Years => &self.years,
        }
    }

    /// Base-currency result, or the first invalid input
    pub fn result(&self) -> Result<RoiResult, ValidationError> {
        self.outcome.clone()
    }

    /// Formatted result in the current display currency
    pub fn outcome(&self) -> Outcome {
        self.outcome_in(&self.currency)
    }

    /// Formatted result in `currency`, leaving the calculator's own unchanged
    pub fn outcome_in(&self, currency: &Currency) -> Outcome {
        self.outcome
            .as_ref()
            .map(|result| RoiDisplay::new(result, currency))
            .map_err(Clone::clone)
    }

    fn recompute(&mut self) {
        self.outcome = InvestmentParams::parse(&self.principal, &self.rate, &self.years)
            .map(|params| project(&params));

        match &self.outcome {
            Ok(result) => log::debug!(
                "Recomputed: future value {:.2}, profit {:.2}, roi {:.2}%",
                result.future_value,
                result.profit,
                result.roi_percent
            ),
            Err(e) => log::debug!("Inputs rejected: {}", e),
        }
    }
}
