//! Common helpers shared by the engine and post-processors.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::SequestrationError;

/// Mass ratio of CO₂ to elemental carbon.
pub const CO2_PER_CARBON: f64 = 44.0 / 12.0;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use carbon_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use carbon_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a computed float into a [`Decimal`] for credit accounting.
///
/// `what` names the quantity in the error raised for NaN or infinite values;
/// validated inputs never produce those.
pub fn to_decimal(
    what: &str,
    value: f64,
) -> Result<Decimal, SequestrationError> {
    Decimal::from_f64(value)
        .ok_or_else(|| SequestrationError::inconsistent(format!("{what} is not finite: {value}")))
}

/// Converts a fraction in `[0, 1]` into a [`Decimal`] with six decimal places.
pub fn fraction_to_decimal(
    what: &str,
    value: f64,
) -> Result<Decimal, SequestrationError> {
    Ok(to_decimal(what, value)?.round_dp(6))
}
