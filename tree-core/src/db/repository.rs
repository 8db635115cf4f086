use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Durable string slots, one per logical record.
///
/// Values are JSON text. Implementations store them verbatim and never
/// interpret them; validation happens in the quote store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Raw value of `key`, or `None` if it was never written.
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Replace the value of `key`. Last write wins.
    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;
}
