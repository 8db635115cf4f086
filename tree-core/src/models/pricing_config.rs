use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SettingKey;

/// Pricing settings applied to every breakdown.
///
/// Rates are percentages (`5` means 5%). The `show_*` flags gate whether the
/// matching term takes part in the breakdown at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub starting_fee: Decimal,
    pub price_per_cubic_foot: Decimal,
    pub tax_rate: Decimal,
    pub show_tax: bool,
    pub default_discount_percent: Decimal,
    pub show_discount: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            starting_fee: Decimal::ZERO,
            price_per_cubic_foot: Decimal::TEN,
            tax_rate: Decimal::ZERO,
            show_tax: false,
            default_discount_percent: Decimal::ZERO,
            show_discount: false,
        }
    }
}

impl PricingConfig {
    /// Largest value accepted for any numeric setting.
    pub const MAX_VALUE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Returns a copy with `field` applied.
    pub fn with_field(
        &self,
        field: ConfigField,
    ) -> Self {
        let mut config = self.clone();
        match field {
            ConfigField::StartingFee(v) => config.starting_fee = v,
            ConfigField::PricePerCubicFoot(v) => config.price_per_cubic_foot = v,
            ConfigField::TaxRate(v) => config.tax_rate = v,
            ConfigField::ShowTax(v) => config.show_tax = v,
            ConfigField::DefaultDiscountPercent(v) => config.default_discount_percent = v,
            ConfigField::ShowDiscount(v) => config.show_discount = v,
        }
        config
    }

    /// Every field of this config, in slot order.
    pub fn fields(&self) -> [ConfigField; 6] {
        [
            ConfigField::StartingFee(self.starting_fee),
            ConfigField::PricePerCubicFoot(self.price_per_cubic_foot),
            ConfigField::TaxRate(self.tax_rate),
            ConfigField::ShowTax(self.show_tax),
            ConfigField::ShowDiscount(self.show_discount),
            ConfigField::DefaultDiscountPercent(self.default_discount_percent),
        ]
    }
}

/// A single settings edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    StartingFee(Decimal),
    PricePerCubicFoot(Decimal),
    TaxRate(Decimal),
    ShowTax(bool),
    DefaultDiscountPercent(Decimal),
    ShowDiscount(bool),
}

impl ConfigField {
    /// The durable slot this field lives in.
    pub fn key(&self) -> SettingKey {
        match self {
            Self::StartingFee(_) => SettingKey::StartingFee,
            Self::PricePerCubicFoot(_) => SettingKey::PricePerCubicFoot,
            Self::TaxRate(_) => SettingKey::TaxRate,
            Self::ShowTax(_) => SettingKey::ShowTaxCalculator,
            Self::DefaultDiscountPercent(_) => SettingKey::DefaultDiscountPercent,
            Self::ShowDiscount(_) => SettingKey::ShowDiscount,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = PricingConfig::default();

        assert_eq!(config.starting_fee, dec!(0));
        assert_eq!(config.price_per_cubic_foot, dec!(10));
        assert_eq!(config.tax_rate, dec!(0));
        assert!(!config.show_tax);
        assert_eq!(config.default_discount_percent, dec!(0));
        assert!(!config.show_discount);
    }

    #[test]
    fn with_field_changes_only_that_field() {
        let config = PricingConfig::default().with_field(ConfigField::TaxRate(dec!(7.25)));

        assert_eq!(
            config,
            PricingConfig {
                tax_rate: dec!(7.25),
                ..PricingConfig::default()
            }
        );
    }

    #[test]
    fn fields_round_trip_through_with_field() {
        let source = PricingConfig {
            starting_fee: dec!(20),
            price_per_cubic_foot: dec!(8),
            tax_rate: dec!(5),
            show_tax: true,
            default_discount_percent: dec!(10),
            show_discount: true,
        };

        let rebuilt = source
            .fields()
            .into_iter()
            .fold(PricingConfig::default(), |config, field| config.with_field(field));

        assert_eq!(rebuilt, source);
    }

    #[test]
    fn show_tax_lives_in_show_tax_calculator_slot() {
        assert_eq!(
            ConfigField::ShowTax(true).key(),
            SettingKey::ShowTaxCalculator
        );
    }
}
