//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{cart::CartLine, products::DiscountPercent};

/// Errors that can occur while pricing a product.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Applies a discount to a unit price, rounding the discount to the nearest minor unit.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the discount can't be represented in minor units.
pub fn discounted_price(
    price: Money<'_, Currency>,
    discount: DiscountPercent,
) -> Result<Money<'_, Currency>, PricingError> {
    if discount.is_zero() {
        return Ok(price);
    }

    let minor = price.to_minor_units();
    let off = percent_of_minor(&discount.as_percentage(), minor)?;

    Ok(Money::from_minor(minor - off, price.currency()))
}

/// Calculate a percentage of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the result overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Total of a single cart line (unit price times quantity) in minor units.
///
/// Saturates rather than wrapping on overflow.
pub fn line_total_minor(line: &CartLine<'_>) -> i64 {
    line.price()
        .to_minor_units()
        .saturating_mul(i64::from(line.quantity()))
}

/// Recomputes the total of a set of cart lines from scratch.
///
/// An empty slice totals to zero in `currency`.
pub fn total_price<'a>(lines: &[CartLine<'a>], currency: &'a Currency) -> Money<'a, Currency> {
    let total = lines
        .iter()
        .map(line_total_minor)
        .fold(0_i64, i64::saturating_add);

    Money::from_minor(total, currency)
}
