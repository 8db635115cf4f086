//! Tree-service quote engine: pricing settings, live price breakdowns and a
//! persisted history of saved quotes.
//!
//! Storage is pluggable through [`KeyValueStore`]; backends register a
//! [`StoreFactory`] with a [`StoreRegistry`].

pub mod calculations;
pub mod db;
pub mod draft;
pub mod logging;
pub mod models;
pub mod store;

pub use db::{
    KeyValueStore, MemoryStore, MemoryStoreFactory, StoreConfig, StoreError, StoreFactory,
    StoreRegistry,
};
pub use draft::{Confirm, DraftState, QuoteDraft, delete_with_confirmation};
pub use models::*;
pub use store::{QuoteStore, QuoteStoreError};
