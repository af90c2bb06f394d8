//! One user's calculator session
//!
//! Owns the selector and the calculator, and pushes every accepted currency
//! selection into the calculator. Output is always formatted in the
//! selector's active currency.

use crate::calculator::{Field, Outcome, RoiCalculator};
use crate::currency::CurrencyTable;
use crate::error::{Result, RoiError};
use crate::selector::{CurrencySelector, DisplayVars};
use crate::store::KeyValueStore;
use std::sync::Arc;

/// One parsed line of the interactive protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Currency(String),
    Show,
}

impl Command {
    /// Parse `principal <x>`, `rate <x>`, `years <x>`, `currency <CODE>` or `show`
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let verb = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next().map(str::trim).unwrap_or("");

        let command = match verb.as_str() {
            "principal" => Command::Set(Field::Principal, arg.to_string()),
            "rate" => Command::Set(Field::Rate, arg.to_string()),
            "years" => Command::Set(Field::Years, arg.to_string()),
            "currency" if !arg.is_empty() => Command::Currency(arg.to_string()),
            "currency" => {
                return Err(RoiError::ParseError("currency needs a code".to_string()));
            }
            "show" if arg.is_empty() => Command::Show,
            _ => {
                return Err(RoiError::ParseError(format!(
                    "unknown command '{}'",
                    line.trim()
                )));
            }
        };

        Ok(command)
    }
}

#[derive(Debug)]
pub struct Session {
    selector: CurrencySelector,
    calculator: RoiCalculator,
}

impl Session {
    /// Restore the persisted currency and start a calculator with default inputs
    pub fn new(table: CurrencyTable, store: Arc<dyn KeyValueStore>) -> Self {
        let selector = CurrencySelector::new(table, store);
        let calculator = RoiCalculator::new(selector.active().clone());
        Self {
            selector,
            calculator,
        }
    }

    /// Same as [`Session::new`] with explicit starting inputs
    pub fn with_inputs(
        table: CurrencyTable,
        store: Arc<dyn KeyValueStore>,
        principal: &str,
        rate: &str,
        years: &str,
    ) -> Self {
        let selector = CurrencySelector::new(table, store);
        let calculator =
            RoiCalculator::with_inputs(principal, rate, years, selector.active().clone());
        Self {
            selector,
            calculator,
        }
    }

    /// Select a currency; accepted selections reach the calculator
    pub fn select_currency(&mut self, code: &str) -> bool {
        if !self.selector.select(code) {
            return false;
        }
        self.calculator.set_currency(self.selector.active().clone());
        true
    }

    pub fn set_principal(&mut self, text: &str) {
        self.calculator.set_principal(text);
    }

    pub fn set_rate(&mut self, text: &str) {
        self.calculator.set_rate(text);
    }

    pub fn set_years(&mut self, text: &str) {
        self.calculator.set_years(text);
    }

    /// Apply one protocol line
    ///
    /// Unknown currency codes are not an error; they leave the session
    /// unchanged, which the caller can see from the returned display.
    pub fn apply(&mut self, line: &str) -> Result<Outcome> {
        match Command::parse(line)? {
            Command::Set(field, text) => self.calculator.set(field, &text),
            Command::Currency(code) => {
                if !self.select_currency(&code) {
                    log::info!("Currency {} is not offered", code);
                }
            }
            Command::Show => {}
        }
        Ok(self.outcome())
    }

    /// Figures in the selector's active currency
    pub fn outcome(&self) -> Outcome {
        self.calculator.outcome_in(self.selector.active())
    }

    pub fn display_vars(&self) -> DisplayVars {
        self.selector.display_vars()
    }

    pub fn selector(&self) -> &CurrencySelector {
        &self.selector
    }

    pub fn calculator(&self) -> &RoiCalculator {
        &self.calculator
    }
}
