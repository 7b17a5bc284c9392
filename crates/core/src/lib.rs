//! `figurehub-core`: listing domain primitives.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! identifiers, schemaless listing documents and the query vocabulary the
//! store adapters understand.

pub mod error;
pub mod id;
pub mod listing;
pub mod query;

pub use error::{DomainError, DomainResult};
pub use id::ListingId;
pub use listing::{Listing, ListingFields};
pub use query::{NameSearch, PriceSort, SEARCH_LIMIT};
