use async_trait::async_trait;
use tracing::info;

use tree_core::db::{KeyValueStore, StoreConfig, StoreError, StoreFactory};

use crate::repository::SqliteKeyValueStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`tree_core::StoreRegistry`] to make the `"sqlite"`
/// backend available:
///
/// ```rust,no_run
/// use tree_core::StoreRegistry;
/// use tree_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database named by `config.connection_string` and bring its
    /// schema up to date.
    ///
    /// * A bare file path, e.g. `"tree_quotes.db"`. Created if missing.
    /// * `":memory:"` for an ephemeral database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let store = SqliteKeyValueStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;

        info!(database = %config.connection_string, "sqlite store ready");
        Ok(Box::new(store))
    }
}
