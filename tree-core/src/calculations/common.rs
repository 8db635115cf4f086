//! Rounding helpers shared by the pricing code.
//!
//! Nothing inside the engine rounds; these are for display and output only.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tree_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(477.707)), dec!(477.71));
/// assert_eq!(round_half_up(dec!(52.955)), dec!(52.96));
/// assert_eq!(round_half_up(dec!(23.8299)), dec!(23.83));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
