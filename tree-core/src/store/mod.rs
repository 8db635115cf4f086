mod quote_store;
mod slots;

pub use quote_store::{QuoteStore, QuoteStoreError};
