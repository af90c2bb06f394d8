//! Compound-growth projection
//!
//! Everything here is denominated in the base currency. Conversion to a
//! display currency happens in [`crate::format`].

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Longest holding period accepted by [`InvestmentParams::new`]
pub const MAX_YEARS: f64 = 1000.0;

/// Inputs to a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParams {
    /// Amount invested, base currency
    pub principal: f64,
    /// Annual growth rate in percent (10.0 means 10%)
    pub annual_rate_percent: f64,
    /// Holding period, whole or fractional
    pub years: f64,
}

impl InvestmentParams {
    /// Validated constructor
    ///
    /// Rejects non-finite values, a principal that is not positive, negative
    /// years or more than [`MAX_YEARS`], rates at or below -100% (which would
    /// make the growth base non-positive), and inputs whose projection does
    /// not fit in an `f64`.
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        years: f64,
    ) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("principal", principal),
            ("rate", annual_rate_percent),
            ("years", years),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field, value });
            }
        }
        if principal <= 0.0 {
            return Err(ValidationError::NonPositivePrincipal(principal));
        }
        if years < 0.0 {
            return Err(ValidationError::NegativeYears(years));
        }
        if years > MAX_YEARS {
            return Err(ValidationError::YearsTooLarge(years));
        }
        if annual_rate_percent <= -100.0 {
            return Err(ValidationError::RateTooLow(annual_rate_percent));
        }

        let params = Self {
            principal,
            annual_rate_percent,
            years,
        };
        params.check_projection()?;
        Ok(params)
    }

    /// Parse and validate the three raw text inputs
    pub fn parse(principal: &str, rate: &str, years: &str) -> Result<Self, ValidationError> {
        Self::new(
            parse_field("principal", principal)?,
            parse_field("rate", rate)?,
            parse_field("years", years)?,
        )
    }

    /// Growth multiplier per year
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.annual_rate_percent / 100.0
    }

    /// Every figure of the projection must be finite.
    ///
    /// When the percentage multiplier alone overflows, the rate and years are
    /// to blame; otherwise the principal is too large for the multiplier.
    fn check_projection(&self) -> Result<(), ValidationError> {
        let result = project(self);
        if result.future_value.is_finite()
            && result.profit.is_finite()
            && result.roi_percent.is_finite()
        {
            return Ok(());
        }

        let field = if (self.growth_factor().powf(self.years) * 100.0).is_finite() {
            "principal"
        } else {
            "years"
        };
        Err(ValidationError::ResultOverflow { field })
    }
}

/// Projection outputs, base currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub future_value: f64,
    pub profit: f64,
    pub roi_percent: f64,
}

/// One row of a year-by-year schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: f64,
    pub value: f64,
    pub profit: f64,
    pub roi_percent: f64,
}

/// Parse one numeric input field
///
/// Surrounding whitespace is ignored. Empty and non-numeric text is rejected
/// here so it never reaches the formula.
pub fn parse_field(field: &'static str, input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let value: f64 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        field,
        input: trimmed.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }

    Ok(value)
}

/// Compound the principal at the annual rate for the given number of years
///
/// No guards: a zero principal gives a non-finite `roi_percent`, and
/// out-of-range inputs propagate as NaN. Use [`InvestmentParams::new`] to
/// reject such inputs up front.
pub fn project(params: &InvestmentParams) -> RoiResult {
    let future_value = params.principal * params.growth_factor().powf(params.years);
    let profit = future_value - params.principal;
    let roi_percent = profit / params.principal * 100.0;

    RoiResult {
        future_value,
        profit,
        roi_percent,
    }
}

/// Value at the end of each whole year, plus the fractional tail if any
///
/// The horizon is capped at [`MAX_YEARS`], so hand-built params with a
/// larger `years` stop there instead of growing without bound.
pub fn schedule(params: &InvestmentParams) -> Vec<GrowthPoint> {
    if params.years.is_nan() || params.years <= 0.0 {
        return Vec::new();
    }

    let horizon = params.years.min(MAX_YEARS);
    let mut points: Vec<f64> = std::iter::successors(Some(1.0), |year| Some(year + 1.0))
        .take_while(|year| *year <= horizon)
        .collect();
    if horizon.fract() > 0.0 {
        points.push(horizon);
    }

    points
        .into_iter()
        .map(|year| {
            let result = project(&InvestmentParams { years: year, ..*params });
            GrowthPoint {
                year,
                value: result.future_value,
                profit: result.profit,
                roi_percent: result.roi_percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(principal: f64, rate: f64, years: f64) -> InvestmentParams {
        InvestmentParams {
            principal,
            annual_rate_percent: rate,
            years,
        }
    }

    #[test]
    fn test_reference_projection() {
        let result = project(&params(10_000.0, 10.0, 5.0));
        assert_relative_eq!(result.future_value, 16105.1, epsilon = 1e-6);
        assert_relative_eq!(result.profit, 6105.1, epsilon = 1e-6);
        assert_relative_eq!(result.roi_percent, 61.051, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_or_years_keeps_principal() {
        assert_eq!(project(&params(2500.0, 0.0, 7.0)).future_value, 2500.0);
        assert_eq!(project(&params(2500.0, 12.0, 0.0)).future_value, 2500.0);
        assert_eq!(project(&params(2500.0, 12.0, 0.0)).roi_percent, 0.0);
    }

    #[test]
    fn test_fractional_years() {
        let result = project(&params(1000.0, 21.0, 0.5));
        assert_relative_eq!(result.future_value, 1100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_rate_shrinks() {
        let result = project(&params(1000.0, -10.0, 2.0));
        assert_relative_eq!(result.future_value, 810.0, epsilon = 1e-9);
        assert!(result.profit < 0.0);
    }

    #[test]
    fn test_zero_principal_is_degenerate() {
        let result = project(&params(0.0, 10.0, 5.0));
        assert_eq!(result.future_value, 0.0);
        assert!(!result.roi_percent.is_finite());
    }

    #[test]
    fn test_validated_constructor() {
        assert!(InvestmentParams::new(10_000.0, 10.0, 5.0).is_ok());
        assert_eq!(
            InvestmentParams::new(0.0, 10.0, 5.0),
            Err(ValidationError::NonPositivePrincipal(0.0))
        );
        assert_eq!(
            InvestmentParams::new(100.0, 10.0, -1.0),
            Err(ValidationError::NegativeYears(-1.0))
        );
        assert_eq!(
            InvestmentParams::new(100.0, -100.0, 1.0),
            Err(ValidationError::RateTooLow(-100.0))
        );
        assert!(matches!(
            InvestmentParams::new(f64::INFINITY, 10.0, 1.0),
            Err(ValidationError::NotFinite { field: "principal", .. })
        ));
    }

    #[test]
    fn test_years_limit() {
        assert!(InvestmentParams::new(1000.0, 0.0, MAX_YEARS).is_ok());
        assert_eq!(
            InvestmentParams::new(1000.0, 0.0, 1e12),
            Err(ValidationError::YearsTooLarge(1e12))
        );
    }

    #[test]
    fn test_overflowing_projection_is_rejected() {
        // 1.1^1000 is about 2.5e41; 3^1000 is past f64::MAX
        assert!(InvestmentParams::parse("10000", "10", "1000").is_ok());
        assert_eq!(
            InvestmentParams::parse("10000", "200", "1000"),
            Err(ValidationError::ResultOverflow { field: "years" })
        );
        assert_eq!(
            InvestmentParams::new(1e308, 100.0, 5.0),
            Err(ValidationError::ResultOverflow { field: "principal" })
        );
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("principal", " 250000 "), Ok(250000.0));
        assert_eq!(parse_field("rate", "7.5"), Ok(7.5));
        assert_eq!(
            parse_field("years", ""),
            Err(ValidationError::Empty { field: "years" })
        );
        assert_eq!(
            parse_field("principal", "10k"),
            Err(ValidationError::NotANumber {
                field: "principal",
                input: "10k".to_string()
            })
        );
        assert!(matches!(
            parse_field("rate", "NaN"),
            Err(ValidationError::NotFinite { field: "rate", .. })
        ));
    }

    #[test]
    fn test_parse_params() {
        let p = InvestmentParams::parse("10000", "10", "5").unwrap();
        assert_eq!(p, params(10_000.0, 10.0, 5.0));
        assert!(InvestmentParams::parse("abc", "10", "5").is_err());
    }

    #[test]
    fn test_schedule_whole_years() {
        let rows = schedule(&params(10_000.0, 10.0, 3.0));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 1.0);
        assert_relative_eq!(rows[0].value, 11_000.0, epsilon = 1e-9);
        assert_relative_eq!(rows[2].value, 13_310.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_fractional_tail() {
        let p = params(10_000.0, 10.0, 2.5);
        let rows = schedule(&p);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].year, 2.5);
        assert_relative_eq!(rows[2].value, project(&p).future_value, epsilon = 1e-9);
    }

    #[test]
    fn test_schedule_empty_for_zero_years() {
        assert!(schedule(&params(10_000.0, 10.0, 0.0)).is_empty());
        assert!(schedule(&params(10_000.0, 10.0, -2.0)).is_empty());
        assert!(schedule(&params(10_000.0, 10.0, f64::NAN)).is_empty());
    }

    #[test]
    fn test_schedule_horizon_is_capped() {
        let rows = schedule(&params(1000.0, 0.0, 1e12));
        assert_eq!(rows.len(), MAX_YEARS as usize);
        assert_eq!(rows.last().unwrap().year, MAX_YEARS);

        let rows = schedule(&params(1000.0, 0.0, f64::INFINITY));
        assert_eq!(rows.len(), MAX_YEARS as usize);
    }
}
