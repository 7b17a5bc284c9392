use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use figurehub_core::{Listing, ListingFields, ListingId, NameSearch, PriceSort};

/// Result of a partial update.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents whose identifier matched (0 or 1).
    pub matched: u64,
    /// Documents whose contents actually changed.
    pub modified: u64,
}

impl UpdateOutcome {
    pub fn found(&self) -> bool {
        self.matched > 0
    }

    /// Exactly one listing changed. Re-sending stored values, or an empty
    /// patch, matches without changing anything.
    pub fn changed(&self) -> bool {
        self.modified == 1
    }
}

/// Listing store operation error.
///
/// These are **infrastructure errors** (connectivity, backend rejections,
/// document conversion). Absence of a document is never an error here: reads
/// return `None`/empty and mutations report counts.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation failed: {0}")]
    Backend(String),

    #[error("document conversion failed: {0}")]
    Serialization(String),
}

/// A single collection of listing documents.
///
/// Every method is one round trip to the backend. Implementations must be
/// safe to share across concurrent requests.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Persist a new listing and return its store-assigned identifier.
    async fn insert(&self, fields: ListingFields) -> Result<ListingId, StoreError>;

    /// Listings whose name contains the search text, at most `limit`.
    async fn search_by_name(
        &self,
        search: &NameSearch,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError>;

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;

    /// All listings whose `sub_category` equals the argument exactly.
    async fn find_by_sub_category(&self, sub_category: &str) -> Result<Vec<Listing>, StoreError>;

    /// All listings of a seller, ordered by price as requested.
    async fn find_by_seller(
        &self,
        seller_email: &str,
        sort: PriceSort,
    ) -> Result<Vec<Listing>, StoreError>;

    /// Merge `patch` into the listing's top-level fields.
    async fn update(&self, id: ListingId, patch: ListingFields) -> Result<UpdateOutcome, StoreError>;

    /// Remove a listing; returns the number of documents removed.
    async fn delete(&self, id: ListingId) -> Result<u64, StoreError>;

    /// Round-trip liveness check against the backend.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Release backend resources. Called once on shutdown.
    async fn close(&self) {}
}

#[async_trait]
impl<S> ListingStore for Arc<S>
where
    S: ListingStore + ?Sized,
{
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    async fn insert(&self, fields: ListingFields) -> Result<ListingId, StoreError> {
        (**self).insert(fields).await
    }

    async fn search_by_name(
        &self,
        search: &NameSearch,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError> {
        (**self).search_by_name(search, limit).await
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        (**self).get(id).await
    }

    async fn find_by_sub_category(&self, sub_category: &str) -> Result<Vec<Listing>, StoreError> {
        (**self).find_by_sub_category(sub_category).await
    }

    async fn find_by_seller(
        &self,
        seller_email: &str,
        sort: PriceSort,
    ) -> Result<Vec<Listing>, StoreError> {
        (**self).find_by_seller(seller_email, sort).await
    }

    async fn update(&self, id: ListingId, patch: ListingFields) -> Result<UpdateOutcome, StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ListingId) -> Result<u64, StoreError> {
        (**self).delete(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
