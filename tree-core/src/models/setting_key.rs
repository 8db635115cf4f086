use serde::{Deserialize, Serialize};

/// Value shape a slot is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Non-negative decimal.
    Number,
    Boolean,
    /// JSON array of quotes.
    QuoteList,
}

/// Every durable slot the store reads or writes.
///
/// | key                      | kind      | default |
/// |--------------------------|-----------|---------|
/// | `startingFee`            | number    | `0`     |
/// | `pricePerCubicFoot`      | number    | `10`    |
/// | `taxRate`                | number    | `0`     |
/// | `showTaxCalculator`      | boolean   | `false` |
/// | `showDiscount`           | boolean   | `false` |
/// | `defaultDiscountPercent` | number    | `0`     |
/// | `quoteHistory`           | quotes    | `[]`    |
/// | `hasCompletedOnboarding` | boolean   | `false` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    StartingFee,
    PricePerCubicFoot,
    TaxRate,
    ShowTaxCalculator,
    ShowDiscount,
    DefaultDiscountPercent,
    QuoteHistory,
    HasCompletedOnboarding,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        Self::StartingFee,
        Self::PricePerCubicFoot,
        Self::TaxRate,
        Self::ShowTaxCalculator,
        Self::ShowDiscount,
        Self::DefaultDiscountPercent,
        Self::QuoteHistory,
        Self::HasCompletedOnboarding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartingFee => "startingFee",
            Self::PricePerCubicFoot => "pricePerCubicFoot",
            Self::TaxRate => "taxRate",
            Self::ShowTaxCalculator => "showTaxCalculator",
            Self::ShowDiscount => "showDiscount",
            Self::DefaultDiscountPercent => "defaultDiscountPercent",
            Self::QuoteHistory => "quoteHistory",
            Self::HasCompletedOnboarding => "hasCompletedOnboarding",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Self::StartingFee
            | Self::PricePerCubicFoot
            | Self::TaxRate
            | Self::DefaultDiscountPercent => SlotKind::Number,
            Self::ShowTaxCalculator | Self::ShowDiscount | Self::HasCompletedOnboarding => {
                SlotKind::Boolean
            }
            Self::QuoteHistory => SlotKind::QuoteList,
        }
    }

    /// JSON text of the value used when the slot is absent or unreadable.
    pub fn default_raw(&self) -> &'static str {
        match self {
            Self::PricePerCubicFoot => "10",
            Self::StartingFee | Self::TaxRate | Self::DefaultDiscountPercent => "0",
            Self::ShowTaxCalculator | Self::ShowDiscount | Self::HasCompletedOnboarding => "false",
            Self::QuoteHistory => "[]",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_inverts_as_str() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::parse(key.as_str()), Some(key));
        }
    }

    #[test]
    fn parse_unknown_key_is_none() {
        assert_eq!(SettingKey::parse("showTax"), None);
    }

    #[test]
    fn defaults_are_valid_json_of_the_declared_kind() {
        for key in SettingKey::ALL {
            let value: serde_json::Value = serde_json::from_str(key.default_raw()).unwrap();
            let matches_kind = match key.kind() {
                SlotKind::Number => value.is_number(),
                SlotKind::Boolean => value.is_boolean(),
                SlotKind::QuoteList => value.is_array(),
            };
            assert!(matches_kind, "default for {} has the wrong kind", key.as_str());
        }
    }
}
