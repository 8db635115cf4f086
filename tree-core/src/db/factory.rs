use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{KeyValueStore, StoreError};

/// Environment variable naming the backend (see [`StoreConfig::from_env`]).
pub const BACKEND_ENV: &str = "TREE_QUOTE_BACKEND";
/// Environment variable holding the backend connection string.
pub const CONNECTION_ENV: &str = "TREE_QUOTE_DB";

/// Which backend to open, and where.
///
/// `connection_string` is handed to the backend as is; the memory backend
/// ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "tree_quotes.db".to_string(),
        }
    }
}

impl StoreConfig {
    /// Reads [`BACKEND_ENV`] and [`CONNECTION_ENV`], using the default for
    /// whichever is unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            backend: non_blank(BACKEND_ENV)
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.backend),
            connection_string: non_blank(CONNECTION_ENV).unwrap_or(defaults.connection_string),
        }
    }
}

/// Opens one kind of [`KeyValueStore`].
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Name matched against [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError>;
}

/// The backends a host can choose between at startup.
#[derive(Default)]
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A later factory with the same name replaces an earlier one.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Sorted backend names.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Open the store named by `config.backend`.
    ///
    /// An unregistered name is a [`StoreError::Configuration`] that lists
    /// the registered ones.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(StoreError::Configuration(format!(
                "no '{}' store backend (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(backend = %config.backend, "opening key-value store");
        factory.create(config).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::MemoryStoreFactory;

    fn memory_config() -> StoreConfig {
        StoreConfig {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }

    #[test]
    fn default_config_is_sqlite_file() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, "tree_quotes.db");
    }

    #[test]
    fn from_lookup_normalizes_backend_name() {
        let cfg = StoreConfig::from_lookup(|name| match name {
            BACKEND_ENV => Some(" Memory ".to_string()),
            CONNECTION_ENV => Some("quotes.db".to_string()),
            _ => None,
        });

        assert_eq!(
            cfg,
            StoreConfig {
                backend: "memory".to_string(),
                connection_string: "quotes.db".to_string(),
            }
        );
    }

    #[test]
    fn from_lookup_falls_back_for_blank_values() {
        let cfg = StoreConfig::from_lookup(|name| match name {
            BACKEND_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(cfg, StoreConfig::default());
    }

    #[tokio::test]
    async fn create_opens_registered_backend() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(MemoryStoreFactory));

        let store = registry.create(&memory_config()).await.unwrap();
        store.set("taxRate", "5").await.unwrap();

        assert_eq!(store.get("taxRate").await, Ok(Some("5".to_string())));
    }

    #[tokio::test]
    async fn unknown_backend_lists_registered_ones() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(MemoryStoreFactory));

        let result = registry.create(&StoreConfig::default()).await;

        match result {
            Err(StoreError::Configuration(msg)) => {
                assert_eq!(msg, "no 'sqlite' store backend (registered: memory)");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a store"),
        }
    }
}
