use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::slots::{SlotValue, resolve};
use crate::db::{KeyValueStore, StoreConfig, StoreError, StoreRegistry};
use crate::models::{ConfigField, PriceBreakdown, PricingConfig, Quote, SettingKey, TreeItem};

/// Why a store mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteStoreError {
    #[error("a quote needs at least one tree")]
    NoTrees,

    #[error("tree {0} has an out-of-range measurement")]
    InvalidTree(Uuid),

    #[error("{key} cannot be negative (got {value})")]
    NegativeValue { key: &'static str, value: Decimal },

    #[error("{key} cannot exceed {max} (got {value})", max = PricingConfig::MAX_VALUE)]
    ValueTooLarge { key: &'static str, value: Decimal },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owner of the pricing settings and the quote history.
///
/// Every call reads the backing slots afresh, so changes written by another
/// handle become visible on the next call. Each mutation is a single
/// read-modify-write of one slot.
pub struct QuoteStore {
    slots: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    pub fn new(slots: Box<dyn KeyValueStore>) -> Self {
        Self { slots }
    }

    /// Open the backend selected by `config` through `registry`.
    pub async fn open(
        registry: &StoreRegistry,
        config: &StoreConfig,
    ) -> Result<Self, StoreError> {
        Ok(Self::new(registry.create(config).await?))
    }

    // ── settings ─────────────────────────────────────────────────────────

    /// Current pricing settings; unset or unreadable fields take their
    /// defaults.
    pub async fn load_config(&self) -> Result<PricingConfig, StoreError> {
        Ok(PricingConfig {
            starting_fee: self.read(SettingKey::StartingFee).await?,
            price_per_cubic_foot: self.read(SettingKey::PricePerCubicFoot).await?,
            tax_rate: self.read(SettingKey::TaxRate).await?,
            show_tax: self.read(SettingKey::ShowTaxCalculator).await?,
            default_discount_percent: self.read(SettingKey::DefaultDiscountPercent).await?,
            show_discount: self.read(SettingKey::ShowDiscount).await?,
        })
    }

    /// Persist one settings field immediately.
    pub async fn save_config_field(
        &self,
        field: ConfigField,
    ) -> Result<(), QuoteStoreError> {
        validate_field(field)?;
        self.write_field(field).await
    }

    /// Persist every field of `config`, one slot at a time.
    ///
    /// Validation is all-or-nothing: if any field is invalid nothing is
    /// written. The writes are not. A backend failure part way through
    /// leaves the earlier fields saved and is returned as
    /// [`QuoteStoreError::Store`].
    pub async fn save_config(
        &self,
        config: &PricingConfig,
    ) -> Result<(), QuoteStoreError> {
        let fields = config.fields();
        for field in fields {
            validate_field(field)?;
        }
        for field in fields {
            self.write_field(field).await?;
        }
        Ok(())
    }

    // ── history ──────────────────────────────────────────────────────────

    /// Saved quotes, most recent first.
    pub async fn list_history(&self) -> Result<Vec<Quote>, StoreError> {
        self.read(SettingKey::QuoteHistory).await
    }

    pub async fn get_quote(
        &self,
        id: Uuid,
    ) -> Result<Option<Quote>, StoreError> {
        let history = self.list_history().await?;
        Ok(history.into_iter().find(|quote| quote.id == id))
    }

    /// Snapshot `breakdown` and `trees` as a new quote at the head of the
    /// history.
    ///
    /// # Errors
    /// * [`QuoteStoreError::NoTrees`] when `trees` is empty.
    /// * [`QuoteStoreError::InvalidTree`] when a tree fails
    ///   [`TreeItem::validate`].
    ///
    /// History is left untouched in both cases.
    pub async fn append_quote(
        &self,
        breakdown: &PriceBreakdown,
        trees: &[TreeItem],
        customer_name: Option<&str>,
    ) -> Result<Quote, QuoteStoreError> {
        if trees.is_empty() {
            warn!("refusing to save a quote with no trees");
            return Err(QuoteStoreError::NoTrees);
        }
        if let Some(tree) = trees.iter().find(|t| t.validate().is_err()) {
            warn!(tree = %tree.id, "refusing to save a quote with an invalid tree");
            return Err(QuoteStoreError::InvalidTree(tree.id));
        }

        let mut history = self.list_history().await?;
        let quote = Quote::snapshot(breakdown, trees, customer_name, Utc::now());
        history.insert(0, quote.clone());
        self.write(SettingKey::QuoteHistory, &history).await?;

        info!(
            quote = %quote.id,
            trees = quote.tree_count(),
            total = %quote.total,
            "quote saved"
        );
        Ok(quote)
    }

    /// Remove the quote with `id`. Returns `false`, without rewriting the
    /// history, when no such quote exists.
    pub async fn delete_quote(
        &self,
        id: Uuid,
    ) -> Result<bool, QuoteStoreError> {
        let mut history = self.list_history().await?;
        let before = history.len();
        history.retain(|quote| quote.id != id);

        if history.len() == before {
            debug!(quote = %id, "delete requested for unknown quote");
            return Ok(false);
        }

        self.write(SettingKey::QuoteHistory, &history).await?;
        info!(quote = %id, remaining = history.len(), "quote deleted");
        Ok(true)
    }

    // ── onboarding ───────────────────────────────────────────────────────

    pub async fn has_completed_onboarding(&self) -> Result<bool, StoreError> {
        self.read(SettingKey::HasCompletedOnboarding).await
    }

    pub async fn set_onboarding_completed(
        &self,
        completed: bool,
    ) -> Result<(), StoreError> {
        self.write(SettingKey::HasCompletedOnboarding, &completed)
            .await
    }

    // ── slot access ──────────────────────────────────────────────────────

    async fn read<T: SlotValue>(
        &self,
        key: SettingKey,
    ) -> Result<T, StoreError> {
        let raw = self
            .slots
            .get(key.as_str())
            .await
            .inspect_err(|error| error!(key = key.as_str(), %error, "slot read failed"))?;
        debug!(key = key.as_str(), present = raw.is_some(), "slot read");
        Ok(resolve(key, raw.as_deref()))
    }

    async fn write<T: SlotValue>(
        &self,
        key: SettingKey,
        value: &T,
    ) -> Result<(), StoreError> {
        let raw = value.encode()?;
        self.slots
            .set(key.as_str(), &raw)
            .await
            .inspect_err(|error| error!(key = key.as_str(), %error, "slot write failed"))?;
        debug!(key = key.as_str(), bytes = raw.len(), "slot written");
        Ok(())
    }

    async fn write_field(
        &self,
        field: ConfigField,
    ) -> Result<(), QuoteStoreError> {
        let key = field.key();
        match field {
            ConfigField::StartingFee(v)
            | ConfigField::PricePerCubicFoot(v)
            | ConfigField::TaxRate(v)
            | ConfigField::DefaultDiscountPercent(v) => self.write(key, &v).await?,
            ConfigField::ShowTax(v) | ConfigField::ShowDiscount(v) => self.write(key, &v).await?,
        }
        Ok(())
    }
}

fn validate_field(field: ConfigField) -> Result<(), QuoteStoreError> {
    match field {
        ConfigField::StartingFee(value)
        | ConfigField::PricePerCubicFoot(value)
        | ConfigField::TaxRate(value)
        | ConfigField::DefaultDiscountPercent(value)
            if value < Decimal::ZERO =>
        {
            let key = field.key().as_str();
            warn!(key, %value, "rejecting negative setting");
            Err(QuoteStoreError::NegativeValue { key, value })
        }
        ConfigField::StartingFee(value)
        | ConfigField::PricePerCubicFoot(value)
        | ConfigField::TaxRate(value)
        | ConfigField::DefaultDiscountPercent(value)
            if value > PricingConfig::MAX_VALUE =>
        {
            let key = field.key().as_str();
            warn!(key, %value, "rejecting oversized setting");
            Err(QuoteStoreError::ValueTooLarge { key, value })
        }
        _ => Ok(()),
    }
}
