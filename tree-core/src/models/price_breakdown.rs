use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Monetary breakdown for a set of trees under one configuration.
///
/// Values are unrounded; use [`PriceBreakdown::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Combined volume of every tree, in cubic feet.
    pub total_volume: Decimal,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Copy with every field rounded to cents (volume to two places).
    pub fn rounded(&self) -> Self {
        Self {
            total_volume: round_half_up(self.total_volume),
            subtotal: round_half_up(self.subtotal),
            discount_amount: round_half_up(self.discount_amount),
            taxable_amount: round_half_up(self.taxable_amount),
            tax_amount: round_half_up(self.tax_amount),
            total: round_half_up(self.total),
        }
    }
}

impl fmt::Display for PriceBreakdown {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.rounded();
        writeln!(f, "Volume:    {:.2} ft³", r.total_volume)?;
        writeln!(f, "Subtotal:  ${:.2}", r.subtotal)?;
        if !r.discount_amount.is_zero() {
            writeln!(f, "Discount: -${:.2}", r.discount_amount)?;
        }
        if !r.tax_amount.is_zero() {
            writeln!(f, "Tax:       ${:.2}", r.tax_amount)?;
        }
        write!(f, "Total:     ${:.2}", r.total)
    }
}
