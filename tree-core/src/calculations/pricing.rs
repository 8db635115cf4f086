//! Tree volume and price breakdown calculations.
//!
//! A trunk is priced as a cylinder: with circumference `C` and height `H`
//! its volume is `C² · H / 4π`. The divisor is fixed at `12.56` rather than
//! a more precise `4π` so that figures match quotes already on file.
//!
//! # Breakdown
//!
//! | Field             | Formula |
//! |-------------------|---------|
//! | `total_volume`    | Σ tree volume |
//! | `subtotal`        | `total_volume × price_per_cubic_foot + starting_fee` |
//! | `discount_amount` | `subtotal × discount% / 100` when `show_discount`, else 0 |
//! | `taxable_amount`  | `subtotal − discount_amount` |
//! | `tax_amount`      | `taxable_amount × tax_rate / 100` when `show_tax`, else 0 |
//! | `total`           | `taxable_amount + tax_amount` |
//!
//! Arithmetic saturates at `Decimal::MAX` instead of overflowing, so any
//! input produces a breakdown.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tree_core::calculations::{compute_breakdown, round_half_up};
//! use tree_core::{PricingConfig, TreeItem};
//!
//! let trees = vec![TreeItem::new(dec!(10), dec!(6), "").unwrap()];
//! let breakdown = compute_breakdown(&trees, &PricingConfig::default(), dec!(0));
//!
//! assert_eq!(round_half_up(breakdown.total_volume), dec!(47.77));
//! assert_eq!(round_half_up(breakdown.total), dec!(477.71));
//! ```

use rust_decimal::Decimal;

use crate::models::{PriceBreakdown, PricingConfig, TreeItem};

/// `4π` as used by every stored quote.
pub const VOLUME_DIVISOR: Decimal = Decimal::from_parts(1256, 0, 0, false, 2);

/// Volume in cubic feet of a trunk with the given circumference and height.
///
/// Returns zero unless both measurements are strictly positive.
pub fn tree_volume(
    circumference: Decimal,
    height: Decimal,
) -> Decimal {
    girth_product(circumference, height) / VOLUME_DIVISOR
}

/// Combined volume of `trees`.
///
/// The `C² · H` products are summed before the single division, so the
/// result does not depend on the order of `trees`.
pub fn total_volume(trees: &[TreeItem]) -> Decimal {
    let products = trees
        .iter()
        .map(|tree| girth_product(tree.circumference, tree.height))
        .fold(Decimal::ZERO, Decimal::saturating_add);

    products / VOLUME_DIVISOR
}

/// Prices `trees` under `config`.
///
/// `discount_percent` is the live discount for this composition; it only
/// applies when `config.show_discount` is set. An empty tree list yields a
/// breakdown of the starting fee alone.
pub fn compute_breakdown(
    trees: &[TreeItem],
    config: &PricingConfig,
    discount_percent: Decimal,
) -> PriceBreakdown {
    let total_volume = total_volume(trees);
    let subtotal = total_volume
        .saturating_mul(config.price_per_cubic_foot)
        .saturating_add(config.starting_fee);

    let discount_amount = if config.show_discount {
        percent_of(subtotal, discount_percent)
    } else {
        Decimal::ZERO
    };

    let taxable_amount = subtotal.saturating_sub(discount_amount);

    let tax_amount = if config.show_tax {
        percent_of(taxable_amount, config.tax_rate)
    } else {
        Decimal::ZERO
    };

    PriceBreakdown {
        total_volume,
        subtotal,
        discount_amount,
        taxable_amount,
        tax_amount,
        total: taxable_amount.saturating_add(tax_amount),
    }
}

/// `C² · H`, or zero for a non-positive measurement.
fn girth_product(
    circumference: Decimal,
    height: Decimal,
) -> Decimal {
    if circumference <= Decimal::ZERO || height <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    circumference
        .saturating_mul(circumference)
        .saturating_mul(height)
}

fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    amount.saturating_mul(percent) / Decimal::ONE_HUNDRED
}
