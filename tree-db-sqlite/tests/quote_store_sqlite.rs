//! Quote store behaviour against a real SQLite backend.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tree_core::calculations::{compute_breakdown, round_half_up};
use tree_core::{
    ConfigField, KeyValueStore, MemoryStoreFactory, PricingConfig, QuoteDraft, QuoteStore,
    QuoteStoreError, StoreConfig, StoreRegistry, TreeItem,
};
use tree_db_sqlite::{SqliteKeyValueStore, SqliteStoreFactory};

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    SqliteKeyValueStore::new_with_pool(pool.clone())
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    pool
}

fn quote_store(pool: &SqlitePool) -> QuoteStore {
    QuoteStore::new(Box::new(SqliteKeyValueStore::new_with_pool(pool.clone())))
}

fn crew_config() -> PricingConfig {
    PricingConfig {
        starting_fee: dec!(20),
        price_per_cubic_foot: dec!(8),
        tax_rate: dec!(5),
        show_tax: true,
        default_discount_percent: dec!(10),
        show_discount: true,
    }
}

#[tokio::test]
async fn fresh_database_yields_default_config() {
    let pool = setup_pool().await;
    let store = quote_store(&pool);

    assert_eq!(store.load_config().await.unwrap(), PricingConfig::default());
    assert!(store.list_history().await.unwrap().is_empty());
    assert!(!store.has_completed_onboarding().await.unwrap());
}

#[tokio::test]
async fn single_tree_quote_is_persisted() {
    let pool = setup_pool().await;
    let store = quote_store(&pool);
    let config = store.load_config().await.unwrap();
    let trees = vec![TreeItem::new(dec!(10), dec!(6), "").unwrap()];
    let breakdown = compute_breakdown(&trees, &config, config.default_discount_percent);

    let saved = store.append_quote(&breakdown, &trees, None).await.unwrap();

    assert_eq!(round_half_up(saved.total), dec!(477.71));
    assert_eq!(store.list_history().await.unwrap(), vec![saved]);
}

#[tokio::test]
async fn full_scenario_through_draft() {
    let pool = setup_pool().await;
    let store = quote_store(&pool);
    store.save_config(&crew_config()).await.unwrap();
    let config = store.load_config().await.unwrap();

    let mut draft = QuoteDraft::new(&config);
    draft.add_tree(dec!(10), dec!(6), "front yard oak").unwrap();
    draft.add_tree(dec!(5), dec!(8), "").unwrap();
    draft.set_customer_name(Some("Morgan".to_string()));
    let quote = draft.save(&store, &config).await.unwrap();

    let rounded = compute_breakdown(&quote.trees, &config, dec!(10)).rounded();
    assert_eq!(rounded.subtotal, dec!(529.55));
    assert_eq!(rounded.discount_amount, dec!(52.96));
    assert_eq!(rounded.tax_amount, dec!(23.83));
    assert_eq!(round_half_up(quote.total), dec!(500.43));
    assert_eq!(store.get_quote(quote.id).await.unwrap(), Some(quote));
}

#[tokio::test]
async fn writes_are_visible_to_other_handles() {
    let pool = setup_pool().await;
    let writer = quote_store(&pool);
    let reader = quote_store(&pool);

    writer
        .save_config_field(ConfigField::StartingFee(dec!(45)))
        .await
        .unwrap();
    writer.set_onboarding_completed(true).await.unwrap();

    assert_eq!(reader.load_config().await.unwrap().starting_fee, dec!(45));
    assert!(reader.has_completed_onboarding().await.unwrap());
}

#[tokio::test]
async fn delete_removes_only_the_target() {
    let pool = setup_pool().await;
    let store = quote_store(&pool);
    let config = PricingConfig::default();
    let trees = vec![TreeItem::new(dec!(12), dec!(9), "").unwrap()];
    let breakdown = compute_breakdown(&trees, &config, dec!(0));
    let first = store.append_quote(&breakdown, &trees, Some("A")).await.unwrap();
    let second = store.append_quote(&breakdown, &trees, Some("B")).await.unwrap();

    assert!(store.delete_quote(first.id).await.unwrap());

    assert_eq!(store.list_history().await.unwrap(), vec![second]);
}

#[tokio::test]
async fn rejected_save_leaves_history_untouched() {
    let pool = setup_pool().await;
    let store = quote_store(&pool);
    let breakdown = compute_breakdown(&[], &PricingConfig::default(), dec!(0));

    let result = store.append_quote(&breakdown, &[], None).await;

    assert_eq!(result, Err(QuoteStoreError::NoTrees));
    let raw = SqliteKeyValueStore::new_with_pool(pool.clone())
        .get("quoteHistory")
        .await
        .unwrap();
    assert_eq!(raw, None);
}

#[tokio::test]
async fn corrupt_rows_fall_back_to_defaults() {
    let pool = setup_pool().await;
    let raw = SqliteKeyValueStore::new_with_pool(pool.clone());
    raw.set("pricePerCubicFoot", "not a number").await.unwrap();
    raw.set("showTaxCalculator", "42").await.unwrap();
    raw.set("quoteHistory", "{\"oops\": true}").await.unwrap();
    let store = quote_store(&pool);

    let config = store.load_config().await.unwrap();

    assert_eq!(config.price_per_cubic_foot, dec!(10));
    assert!(!config.show_tax);
    assert!(store.list_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn registry_opens_sqlite_file_and_reopens_it() {
    let path = std::env::temp_dir().join(format!("tree-quotes-{}.db", uuid::Uuid::new_v4()));
    let config = StoreConfig {
        backend: "sqlite".to_string(),
        connection_string: path.display().to_string(),
    };
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));

    let first = QuoteStore::open(&registry, &config).await.unwrap();
    first
        .save_config_field(ConfigField::TaxRate(dec!(7.25)))
        .await
        .unwrap();
    drop(first);

    let second = QuoteStore::open(&registry, &config).await.unwrap();
    assert_eq!(second.load_config().await.unwrap().tax_rate, dec!(7.25));
    drop(second);

    let _ = std::fs::remove_file(&path);
}
