use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{KeyValueStore, StoreError};

/// Process-local [`KeyValueStore`]. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with raw slot values.
    pub fn with_slots<K, V>(slots: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            slots: Mutex::new(
                slots
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.slots
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// [`StoreFactory`] for the `"memory"` backend. The connection string is
/// ignored.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        Ok(Box::new(MemoryStore::new()))
    }
}
