//! Projection and formatting properties
//!
//! Checks the growth invariants over generated inputs and the reference
//! scenarios quoted to clients.

use approx::assert_relative_eq;
use estate_roi::currency::{Currency, CurrencyTable};
use estate_roi::format::{format_money, round2, RoiDisplay};
use estate_roi::roi::{project, schedule, InvestmentParams};
use estate_roi::error::ValidationError;
use proptest::prelude::*;

fn params(principal: f64, rate: f64, years: f64) -> InvestmentParams {
    InvestmentParams {
        principal,
        annual_rate_percent: rate,
        years,
    }
}

/// Numeric part of a formatted money string
fn amount_of(formatted: &str, currency: &Currency) -> f64 {
    formatted
        .strip_prefix(currency.symbol.as_str())
        .expect("symbol prefix")
        .parse()
        .expect("numeric amount")
}

proptest! {
    #[test]
    fn prop_growth_never_loses_principal(
        principal in 1.0f64..10_000_000.0,
        rate in 0.0f64..50.0,
        years in 0.0f64..50.0,
    ) {
        let result = project(&params(principal, rate, years));
        prop_assert!(result.future_value >= principal);
    }

    #[test]
    fn prop_strict_growth_for_positive_rate_and_years(
        principal in 1.0f64..10_000_000.0,
        rate in 0.01f64..50.0,
        years in 0.01f64..50.0,
    ) {
        let result = project(&params(principal, rate, years));
        prop_assert!(result.future_value > principal);
    }

    #[test]
    fn prop_zero_rate_or_years_is_identity(
        principal in 1.0f64..10_000_000.0,
        rate in 0.0f64..50.0,
        years in 0.0f64..50.0,
    ) {
        prop_assert_eq!(project(&params(principal, 0.0, years)).future_value, principal);
        prop_assert_eq!(project(&params(principal, rate, 0.0)).future_value, principal);
    }

    #[test]
    fn prop_profit_and_roi_are_derived(
        principal in 1.0f64..10_000_000.0,
        rate in -50.0f64..50.0,
        years in 0.0f64..50.0,
    ) {
        let result = project(&params(principal, rate, years));
        prop_assert_eq!(result.profit, result.future_value - principal);
        prop_assert_eq!(result.roi_percent, result.profit / principal * 100.0);
    }

    #[test]
    fn prop_validated_inputs_give_finite_figures(
        principal in 1.0f64..1e300,
        rate in -99.0f64..1000.0,
        years in 0.0f64..1000.0,
    ) {
        if let Ok(p) = InvestmentParams::new(principal, rate, years) {
            let result = project(&p);
            prop_assert!(result.future_value.is_finite());
            prop_assert!(result.profit.is_finite());
            prop_assert!(result.roi_percent.is_finite());
        }
    }

    #[test]
    fn prop_display_is_linear_in_rate(
        principal in 1.0f64..1_000_000.0,
        rate in 0.0f64..30.0,
        years in 0.0f64..30.0,
    ) {
        let result = project(&params(principal, rate, years));
        for currency in CurrencyTable::builtin().iter() {
            let display = RoiDisplay::new(&result, currency);
            let shown = amount_of(&display.future_value, currency);
            prop_assert_eq!(shown, round2(result.future_value * currency.rate));
        }
    }

    #[test]
    fn prop_switching_back_to_base_restores_display(
        principal in 1.0f64..1_000_000.0,
        rate in 0.0f64..30.0,
        years in 0.0f64..30.0,
    ) {
        let table = CurrencyTable::builtin();
        let result = project(&params(principal, rate, years));
        let original = RoiDisplay::new(&result, table.base());

        for currency in table.iter() {
            let _ = RoiDisplay::new(&result, currency);
            prop_assert_eq!(&RoiDisplay::new(&result, table.base()), &original);
        }
    }

    #[test]
    fn prop_schedule_ends_at_projection(
        principal in 1.0f64..1_000_000.0,
        rate in 0.0f64..30.0,
        years in 0.5f64..40.0,
    ) {
        let p = params(principal, rate, years);
        let rows = schedule(&p);
        let last = rows.last().expect("non-empty schedule");
        prop_assert_eq!(last.year, years);
        prop_assert_eq!(last.value, project(&p).future_value);
    }
}

#[test]
fn test_reference_scenario_usd() {
    let result = project(&params(10_000.0, 10.0, 5.0));
    assert_relative_eq!(result.future_value, 16105.10, epsilon = 1e-6);
    assert_relative_eq!(result.profit, 6105.10, epsilon = 1e-6);
    assert_relative_eq!(result.roi_percent, 61.051, epsilon = 1e-6);

    let display = RoiDisplay::new(&result, CurrencyTable::builtin().base());
    assert_eq!(display.future_value, "$16105.10");
    assert_eq!(display.profit, "$6105.10");
    assert_eq!(display.roi_percent, "61.05%");
}

#[test]
fn test_reference_scenario_eur() {
    let table = CurrencyTable::builtin();
    let eur = table.get("EUR").unwrap();
    let result = project(&params(10_000.0, 10.0, 5.0));

    assert_eq!(format_money(result.future_value, eur), "€13689.34");
    assert_eq!(RoiDisplay::new(&result, eur).roi_percent, "61.05%");
}

#[test]
fn test_zero_principal_legacy_and_hardened() {
    let legacy = project(&params(0.0, 10.0, 5.0));
    assert!(!legacy.roi_percent.is_finite());

    assert_eq!(
        InvestmentParams::new(0.0, 10.0, 5.0),
        Err(ValidationError::NonPositivePrincipal(0.0))
    );
    assert_eq!(
        InvestmentParams::parse("0", "10", "5"),
        Err(ValidationError::NonPositivePrincipal(0.0))
    );
}

#[test]
fn test_non_numeric_text_never_reaches_formula() {
    let err = InvestmentParams::parse("10000", "ten", "5").unwrap_err();
    assert_eq!(
        err,
        ValidationError::NotANumber {
            field: "rate",
            input: "ten".to_string()
        }
    );
}
