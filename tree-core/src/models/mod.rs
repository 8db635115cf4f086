mod price_breakdown;
mod pricing_config;
mod quote;
mod setting_key;
mod tree_item;

pub use price_breakdown::PriceBreakdown;
pub use pricing_config::{ConfigField, PricingConfig};
pub use quote::Quote;
pub use setting_key::{SettingKey, SlotKind};
pub use tree_item::{MeasurementError, TreeItem};
