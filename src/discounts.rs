//! Discounts
//!
//! Percentage arithmetic on minor currency units.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Percentage points outside the accepted `0..=100` range.
    #[error("discount of {0}% is outside the range 0-100")]
    OutOfRange(Decimal),
}

/// Convert percentage points (`15` for 15%) into a [`Percentage`].
///
/// # Errors
///
/// Returns [`DiscountError::OutOfRange`] when `points` is negative or above 100.
pub fn percentage_from_points(points: Decimal) -> Result<Percentage, DiscountError> {
    if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
        return Err(DiscountError::OutOfRange(points));
    }

    Ok(Percentage::from(points / Decimal::ONE_HUNDRED))
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented as `i64`.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Reduce a minor unit amount by a percentage, never going below zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the discount cannot be represented.
pub fn discounted_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let discount = percent_of_minor(percent, minor)?;

    minor
        .checked_sub(discount)
        .map(|value| value.max(0))
        .ok_or(DiscountError::PercentConversion)
}
