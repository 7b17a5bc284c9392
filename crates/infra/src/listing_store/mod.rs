//! Listing storage boundary.
//!
//! Handlers talk to the document collection only through [`ListingStore`], so
//! the same routes run against MongoDB in production and an in-memory
//! collection in dev/tests.

pub mod in_memory;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod r#trait;

pub use in_memory::InMemoryListingStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoListingStore;
pub use r#trait::{ListingStore, StoreError, UpdateOutcome};
