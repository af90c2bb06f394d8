//! Active display currency
//!
//! [`CurrencySelector`] is the single owner of the active currency. Other
//! components either read it through [`CurrencySelector::active`] /
//! [`CurrencySelector::display_vars`] or register a change callback.

use crate::currency::{Currency, CurrencyTable};
use crate::store::{KeyValueStore, SELECTED_CURRENCY_KEY};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the newly active currency
pub type ChangeListener = Box<dyn FnMut(&Currency) + Send>;

/// Code and symbol of the active currency, for consumers that only display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayVars {
    pub code: String,
    pub symbol: String,
}

pub struct CurrencySelector {
    table: CurrencyTable,
    active: Currency,
    store: Arc<dyn KeyValueStore>,
    listeners: Vec<ChangeListener>,
}

impl CurrencySelector {
    /// Create a selector, restoring the persisted code if it is still listed
    ///
    /// Falls back to the table's base currency when nothing was saved, the
    /// saved code is unknown, or the store cannot be read.
    pub fn new(table: CurrencyTable, store: Arc<dyn KeyValueStore>) -> Self {
        let restored = match store.get(SELECTED_CURRENCY_KEY) {
            Ok(Some(code)) => match table.get(&code) {
                Some(currency) => {
                    log::debug!("Restored selected currency {}", code);
                    Some(currency.clone())
                }
                None => {
                    log::warn!("Saved currency {} is not in the table, using base", code);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read saved currency: {}", e);
                None
            }
        };

        let active = restored.unwrap_or_else(|| table.base().clone());

        Self {
            table,
            active,
            store,
            listeners: Vec::new(),
        }
    }

    /// Make `code` the active currency
    ///
    /// Exact match against the table. Returns `false` and changes nothing
    /// when the code is not listed. On success the code is persisted and
    /// every listener is notified.
    pub fn select(&mut self, code: &str) -> bool {
        let currency = match self.table.get(code) {
            Some(currency) => currency.clone(),
            None => {
                log::debug!("Ignoring unknown currency code '{}'", code);
                return false;
            }
        };

        if let Err(e) = self.store.set(SELECTED_CURRENCY_KEY, &currency.code) {
            log::warn!("Failed to persist selected currency {}: {}", currency.code, e);
        }

        self.active = currency;
        for listener in self.listeners.iter_mut() {
            listener(&self.active);
        }

        true
    }

    /// Register a callback for future selections
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Currency) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn active(&self) -> &Currency {
        &self.active
    }

    pub fn display_vars(&self) -> DisplayVars {
        DisplayVars {
            code: self.active.code.clone(),
            symbol: self.active.symbol.clone(),
        }
    }

    pub fn table(&self) -> &CurrencyTable {
        &self.table
    }
}

impl fmt::Debug for CurrencySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencySelector")
            .field("active", &self.active)
            .field("currencies", &self.table.codes())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
