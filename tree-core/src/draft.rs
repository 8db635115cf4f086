//! The quote being composed, before it is saved.
//!
//! A draft moves `Empty -> Composing` as trees are added. Saving hands the
//! current breakdown to the [`QuoteStore`] and resets the draft; abandoning
//! resets it without touching the store.

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculations::compute_breakdown;
use crate::models::{MeasurementError, PriceBreakdown, PricingConfig, Quote, TreeItem};
use crate::store::{QuoteStore, QuoteStoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Empty,
    Composing,
}

/// Caller-owned composition of a single quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDraft {
    trees: Vec<TreeItem>,
    discount_percent: Decimal,
    customer_name: Option<String>,
}

impl QuoteDraft {
    /// Start an empty draft. The live discount starts at the configured
    /// default and is independent of it afterwards.
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            trees: Vec::new(),
            discount_percent: config.default_discount_percent,
            customer_name: None,
        }
    }

    pub fn state(&self) -> DraftState {
        if self.trees.is_empty() {
            DraftState::Empty
        } else {
            DraftState::Composing
        }
    }

    pub fn trees(&self) -> &[TreeItem] {
        &self.trees
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    /// Measure and add a tree. Nothing is added if a measurement is
    /// non-positive.
    pub fn add_tree(
        &mut self,
        circumference: Decimal,
        height: Decimal,
        notes: impl Into<String>,
    ) -> Result<Uuid, MeasurementError> {
        let tree = TreeItem::new(circumference, height, notes)?;
        let id = tree.id;
        self.trees.push(tree);
        debug!(tree = %id, count = self.trees.len(), "tree added to draft");
        Ok(id)
    }

    /// Returns whether a tree with `id` was present.
    pub fn remove_tree(
        &mut self,
        id: Uuid,
    ) -> bool {
        let before = self.trees.len();
        self.trees.retain(|tree| tree.id != id);
        self.trees.len() != before
    }

    /// Negative percentages are clamped to zero.
    pub fn set_discount_percent(
        &mut self,
        percent: Decimal,
    ) {
        self.discount_percent = percent.max(Decimal::ZERO);
    }

    pub fn set_customer_name(
        &mut self,
        name: Option<String>,
    ) {
        self.customer_name = name;
    }

    /// Live breakdown of the current trees.
    pub fn breakdown(
        &self,
        config: &PricingConfig,
    ) -> PriceBreakdown {
        compute_breakdown(&self.trees, config, self.discount_percent)
    }

    /// Save the draft as a new quote and reset it.
    ///
    /// On error the draft is left exactly as it was.
    pub async fn save(
        &mut self,
        store: &QuoteStore,
        config: &PricingConfig,
    ) -> Result<Quote, QuoteStoreError> {
        let breakdown = self.breakdown(config);
        let quote = store
            .append_quote(&breakdown, &self.trees, self.customer_name.as_deref())
            .await?;
        self.reset(config);
        Ok(quote)
    }

    /// Discard every tree without saving.
    pub fn abandon(
        &mut self,
        config: &PricingConfig,
    ) {
        if self.state() == DraftState::Composing {
            info!(trees = self.trees.len(), "draft abandoned");
        }
        self.reset(config);
    }

    fn reset(
        &mut self,
        config: &PricingConfig,
    ) {
        *self = Self::new(config);
    }
}

/// Yes/no prompt shown before a destructive action.
pub trait Confirm {
    fn confirm(
        &self,
        prompt: &str,
    ) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(
        &self,
        prompt: &str,
    ) -> bool {
        self(prompt)
    }
}

/// Ask `confirm` before deleting quote `id`.
///
/// Returns `Ok(false)` without calling the store when the prompt is
/// declined, otherwise whatever [`QuoteStore::delete_quote`] returns.
pub async fn delete_with_confirmation(
    store: &QuoteStore,
    id: Uuid,
    confirm: &impl Confirm,
) -> Result<bool, QuoteStoreError> {
    if !confirm.confirm("Delete this quote? This cannot be undone.") {
        debug!(quote = %id, "delete declined");
        return Ok(false);
    }
    store.delete_quote(id).await
}
