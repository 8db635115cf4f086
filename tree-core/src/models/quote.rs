use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PriceBreakdown, TreeItem};

/// A saved estimate. Amounts are a snapshot taken at save time and are
/// never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub trees: Vec<TreeItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

impl Quote {
    /// Snapshot `breakdown` and `trees` under a fresh id.
    ///
    /// Callers are responsible for `trees` being non-empty; the store
    /// checks this before calling.
    pub(crate) fn snapshot(
        breakdown: &PriceBreakdown,
        trees: &[TreeItem],
        customer_name: Option<&str>,
        date: DateTime<Utc>,
    ) -> Self {
        let customer_name = customer_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Self {
            id: Uuid::new_v4(),
            date,
            subtotal: breakdown.subtotal,
            tax_amount: breakdown.tax_amount,
            discount_amount: breakdown.discount_amount,
            total: breakdown.total,
            trees: trees.to_vec(),
            customer_name,
        }
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}
