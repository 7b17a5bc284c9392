//! Infrastructure layer: listing storage backends and configuration.

pub mod config;
pub mod listing_store;

pub use config::{AppConfig, MongoConfig, StoreConfig};
pub use listing_store::{InMemoryListingStore, ListingStore, StoreError, UpdateOutcome};

#[cfg(feature = "mongo")]
pub use listing_store::MongoListingStore;
