use std::sync::Arc;

use figurehub_infra::{InMemoryListingStore, ListingStore, StoreConfig};

/// Shared handles injected into every handler.
///
/// Holds the single long-lived listing store for the process.
#[derive(Clone)]
pub struct AppServices {
    listings: Arc<dyn ListingStore>,
}

impl AppServices {
    pub fn new(listings: Arc<dyn ListingStore>) -> Self {
        Self { listings }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryListingStore::new()))
    }

    pub fn listings(&self) -> &dyn ListingStore {
        self.listings.as_ref()
    }

    /// Release the store. Call once, after the server has stopped.
    pub async fn shutdown(&self) {
        self.listings.close().await;
    }
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("listings", &self.listings.backend())
            .finish()
    }
}

pub async fn build_services(config: &StoreConfig) -> anyhow::Result<AppServices> {
    match config {
        StoreConfig::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES not set; listings are kept in memory");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Mongo(mongo) => {
            #[cfg(feature = "mongo")]
            {
                use anyhow::Context;

                let store = figurehub_infra::MongoListingStore::connect(mongo)
                    .await
                    .context("failed to connect to MongoDB")?;
                Ok(AppServices::new(Arc::new(store)))
            }
            #[cfg(not(feature = "mongo"))]
            {
                let _ = mongo;
                tracing::warn!(
                    "USE_PERSISTENT_STORES=true but mongo feature not enabled, falling back to in-memory"
                );
                Ok(AppServices::in_memory())
            }
        }
    }
}
