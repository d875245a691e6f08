//! Carbon-credit (VER) accounting.
//!
//! | Step | Quantity |
//! |------|----------|
//! | 1 | Total VERs = final cumulative CO₂e (1 VER = 1 tCO₂e) |
//! | 2 | Buffer = total × buffer fraction |
//! | 3 | Non-additionality = total × non-additionality fraction, capped at total − buffer |
//! | 4 | Issuable = max(0, total − buffer − non-additionality) |
//! | 5 | Revenue = issuable × price per tonne |
//!
//! All amounts are rounded half-up to two decimal places. Fractions are
//! always in `[0, 1]`; whole-number percents are converted at the form
//! boundary and never reach this module.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use carbon_core::calculations::{CreditParameters, CreditWorksheet};
//!
//! let worksheet = CreditWorksheet::new(CreditParameters {
//!     buffer_fraction: dec!(0.20),
//!     non_additionality_fraction: dec!(0.10),
//!     carbon_price_per_tonne: dec!(5),
//! });
//!
//! let credits = worksheet.calculate(dec!(1000)).unwrap();
//!
//! assert_eq!(credits.issuable_vers, dec!(700.00));
//! assert_eq!(credits.estimated_revenue, dec!(3500.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::SequestrationError;
use crate::models::{CreditSummary, ProjectInputs};

use super::common::{fraction_to_decimal, max, round_half_up, to_decimal};

/// Buffer withheld when the project does not specify one.
pub const DEFAULT_BUFFER_FRACTION: f64 = 0.20;

/// Non-additionality deduction when neither a percentage nor a baseline is given.
pub const DEFAULT_NON_ADDITIONALITY_FRACTION: f64 = 0.10;

/// Price per tCO₂e when the project does not specify one.
pub const DEFAULT_CARBON_PRICE_PER_TONNE: f64 = 5.0;

/// Deduction rates and price used for credit accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditParameters {
    /// Share of credits withheld against reversal risk.
    pub buffer_fraction: Decimal,

    /// Share of sequestration attributed to the baseline.
    pub non_additionality_fraction: Decimal,

    pub carbon_price_per_tonne: Decimal,
}

impl Default for CreditParameters {
    fn default() -> Self {
        Self {
            buffer_fraction: Decimal::new(20, 2),
            non_additionality_fraction: Decimal::new(10, 2),
            carbon_price_per_tonne: Decimal::new(5, 0),
        }
    }
}

impl CreditParameters {
    /// Resolves parameters for a project, applying defaults for absent fields.
    ///
    /// When no non-additionality percentage is given but a baseline removal
    /// rate is, the fraction is the baseline's share of the project total,
    /// `baseline × area × duration / total`, clamped to `[0, 1]`.
    pub fn for_project(
        inputs: &ProjectInputs,
        total_co2e: f64,
    ) -> Result<Self, SequestrationError> {
        let buffer = inputs.buffer_percentage.unwrap_or(DEFAULT_BUFFER_FRACTION);

        let non_additionality = match (
            inputs.non_additionality_percentage,
            inputs.baseline_removals_per_hectare_year,
        ) {
            (Some(fraction), _) => fraction,
            (None, Some(baseline)) => baseline_fraction(inputs, baseline, total_co2e),
            (None, None) => DEFAULT_NON_ADDITIONALITY_FRACTION,
        };

        let price = inputs
            .carbon_price_per_tonne
            .unwrap_or(DEFAULT_CARBON_PRICE_PER_TONNE);

        Ok(Self {
            buffer_fraction: fraction_to_decimal("bufferPercentage", buffer)?,
            non_additionality_fraction: fraction_to_decimal(
                "nonAdditionalityPercentage",
                non_additionality,
            )?,
            carbon_price_per_tonne: to_decimal("carbonPricePerTonne", price)?,
        })
    }

    /// Checks that both fractions are in `[0, 1]` and the price is non-negative.
    pub fn validate(&self) -> Result<(), SequestrationError> {
        let unit = Decimal::ZERO..=Decimal::ONE;
        if !unit.contains(&self.buffer_fraction) {
            return Err(SequestrationError::invalid(
                "bufferPercentage",
                "must be between 0 and 1",
            ));
        }
        if !unit.contains(&self.non_additionality_fraction) {
            return Err(SequestrationError::invalid(
                "nonAdditionalityPercentage",
                "must be between 0 and 1",
            ));
        }
        if self.carbon_price_per_tonne < Decimal::ZERO {
            return Err(SequestrationError::invalid(
                "carbonPricePerTonne",
                "must be non-negative",
            ));
        }
        Ok(())
    }
}

fn baseline_fraction(
    inputs: &ProjectInputs,
    baseline: f64,
    total_co2e: f64,
) -> f64 {
    if total_co2e <= 0.0 {
        return 0.0;
    }
    let baseline_total = baseline * inputs.project_area * f64::from(inputs.project_duration);
    let fraction = baseline_total / total_co2e;
    if fraction > 1.0 {
        warn!(
            baseline_total,
            total_co2e, "baseline removals exceed project sequestration, clamping to 100%"
        );
    }
    fraction.clamp(0.0, 1.0)
}

/// Calculator for issuable credits and revenue.
#[derive(Debug, Clone)]
pub struct CreditWorksheet {
    parameters: CreditParameters,
}

impl CreditWorksheet {
    pub fn new(parameters: CreditParameters) -> Self {
        Self { parameters }
    }

    /// Applies the deductions to `total_vers` (tCO₂e).
    ///
    /// # Errors
    ///
    /// Returns [`SequestrationError::InvalidInput`] if the parameters are out
    /// of range, or [`SequestrationError::InternalConsistency`] if the total
    /// is negative or an amount overflows `Decimal`.
    pub fn calculate(
        &self,
        total_vers: Decimal,
    ) -> Result<CreditSummary, SequestrationError> {
        self.parameters.validate()?;
        if total_vers < Decimal::ZERO {
            return Err(SequestrationError::inconsistent(format!(
                "total VERs must not be negative, got {total_vers}"
            )));
        }

        let total_vers = round_half_up(total_vers);
        let buffer_deducted = self.buffer_deducted(total_vers)?;
        let non_additionality_deducted =
            self.non_additionality_deducted(total_vers, buffer_deducted)?;
        let issuable_vers = self.issuable_vers(
            total_vers,
            buffer_deducted,
            non_additionality_deducted,
        );
        let estimated_revenue = self.estimated_revenue(issuable_vers)?;

        Ok(CreditSummary {
            total_vers,
            buffer_deducted,
            non_additionality_deducted,
            issuable_vers,
            estimated_revenue,
        })
    }

    fn buffer_deducted(
        &self,
        total_vers: Decimal,
    ) -> Result<Decimal, SequestrationError> {
        product("bufferDeducted", total_vers, self.parameters.buffer_fraction)
    }

    /// Non-additionality deduction, capped at what the buffer leaves over.
    fn non_additionality_deducted(
        &self,
        total_vers: Decimal,
        buffer_deducted: Decimal,
    ) -> Result<Decimal, SequestrationError> {
        let uncapped = product(
            "nonAdditionalityDeducted",
            total_vers,
            self.parameters.non_additionality_fraction,
        )?;
        Ok(uncapped.min(max(total_vers - buffer_deducted, Decimal::ZERO)))
    }

    fn issuable_vers(
        &self,
        total_vers: Decimal,
        buffer_deducted: Decimal,
        non_additionality_deducted: Decimal,
    ) -> Decimal {
        max(
            total_vers - buffer_deducted - non_additionality_deducted,
            Decimal::ZERO,
        )
    }

    fn estimated_revenue(
        &self,
        issuable_vers: Decimal,
    ) -> Result<Decimal, SequestrationError> {
        product(
            "estimatedRevenue",
            issuable_vers,
            self.parameters.carbon_price_per_tonne,
        )
    }
}

/// Rounded product, failing instead of panicking when `Decimal` overflows.
fn product(
    what: &str,
    amount: Decimal,
    factor: Decimal,
) -> Result<Decimal, SequestrationError> {
    amount
        .checked_mul(factor)
        .map(round_half_up)
        .ok_or_else(|| {
            SequestrationError::inconsistent(format!(
                "{what} overflows: {amount} × {factor}"
            ))
        })
}
