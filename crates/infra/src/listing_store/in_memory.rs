use std::sync::RwLock;

use async_trait::async_trait;

use figurehub_core::{Listing, ListingFields, ListingId, NameSearch, PriceSort};

use super::r#trait::{ListingStore, StoreError, UpdateOutcome};

/// In-memory listing collection.
///
/// Intended for tests/dev. Keeps insertion order as the natural order and
/// scans linearly on every query.
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listings.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Listing>>, StoreError> {
        self.listings
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Listing>>, StoreError> {
        self.listings
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn filtered(&self, pred: impl Fn(&Listing) -> bool) -> Result<Vec<Listing>, StoreError> {
        Ok(self.read()?.iter().filter(|&l| pred(l)).cloned().collect())
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    fn backend(&self) -> &'static str {
        "in_memory"
    }

    async fn insert(&self, fields: ListingFields) -> Result<ListingId, StoreError> {
        let id = ListingId::generate();
        self.write()?.push(Listing::new(id, fields));
        Ok(id)
    }

    async fn search_by_name(
        &self,
        search: &NameSearch,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError> {
        Ok(self
            .read()?
            .iter()
            .filter(|l| search.matches(l))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        Ok(self.read()?.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_sub_category(&self, sub_category: &str) -> Result<Vec<Listing>, StoreError> {
        self.filtered(|l| l.fields.sub_category() == Some(sub_category))
    }

    async fn find_by_seller(
        &self,
        seller_email: &str,
        sort: PriceSort,
    ) -> Result<Vec<Listing>, StoreError> {
        let mut listings = self.filtered(|l| l.fields.seller_email() == Some(seller_email))?;
        sort.apply(&mut listings);
        Ok(listings)
    }

    async fn update(&self, id: ListingId, patch: ListingFields) -> Result<UpdateOutcome, StoreError> {
        let mut listings = self.write()?;
        let Some(listing) = listings.iter_mut().find(|l| l.id == id) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = patch
            .iter()
            .any(|(k, v)| listing.fields.get(k) != Some(v));
        listing.fields.merge(&patch);

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete(&self, id: ListingId) -> Result<u64, StoreError> {
        let mut listings = self.write()?;
        let before = listings.len();
        listings.retain(|l| l.id != id);
        Ok((before - listings.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figurehub_core::SEARCH_LIMIT;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn fields(value: Value) -> ListingFields {
        match value {
            Value::Object(map) => ListingFields::from_map(map),
            _ => panic!("fields must be an object"),
        }
    }

    fn iron_spider() -> ListingFields {
        fields(json!({
            "toyName": "Iron Spider",
            "sub_category": "superhero",
            "seller_email": "a@x.com",
            "price": 25
        }))
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_fields() {
        let store = InMemoryListingStore::new();
        let id = store.insert(iron_spider()).await.unwrap();

        let listing = store.get(id).await.unwrap().unwrap();
        assert_eq!(listing.id, id);
        assert_eq!(listing.fields, iron_spider());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_fields_and_reports_counts() {
        let store = InMemoryListingStore::new();
        let id = store.insert(iron_spider()).await.unwrap();

        let outcome = store.update(id, fields(json!({"price": 30}))).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });
        assert!(outcome.changed());

        let listing = store.get(id).await.unwrap().unwrap();
        assert_eq!(listing.fields.price(), Some(&json!(30)));
        assert_eq!(listing.fields.name(), Some("Iron Spider"));

        // Same value again: matched but unchanged.
        let outcome = store.update(id, fields(json!({"price": 30}))).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });
        assert!(outcome.found());
        assert!(!outcome.changed());

        let outcome = store.update(id, ListingFields::new()).await.unwrap();
        assert!(outcome.found());
        assert!(!outcome.changed());
    }

    #[tokio::test]
    async fn mutations_on_unknown_ids_leave_store_unchanged() {
        let store = InMemoryListingStore::new();
        let id = store.insert(iron_spider()).await.unwrap();
        let missing = ListingId::generate();

        assert!(!store.update(missing, fields(json!({"price": 1}))).await.unwrap().found());
        assert_eq!(store.delete(missing).await.unwrap(), 0);
        assert_eq!(store.get(id).await.unwrap().unwrap().fields, iron_spider());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_is_one_then_zero() {
        let store = InMemoryListingStore::new();
        let id = store.insert(iron_spider()).await.unwrap();

        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn sub_category_match_is_exact() {
        let store = InMemoryListingStore::new();
        store.insert(iron_spider()).await.unwrap();
        store
            .insert(fields(json!({"toyName": "Batmobile", "sub_category": "Superhero"})))
            .await
            .unwrap();

        let found = store.find_by_sub_category("superhero").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].fields.name(), Some("Iron Spider"));
        assert!(store.find_by_sub_category("super").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seller_listings_respect_requested_order() {
        let store = InMemoryListingStore::new();
        for price in [20, 5, 12] {
            store
                .insert(fields(json!({"seller_email": "a@x.com", "price": price})))
                .await
                .unwrap();
        }
        store
            .insert(fields(json!({"seller_email": "b@x.com", "price": 1})))
            .await
            .unwrap();

        let prices = |listings: Vec<Listing>| -> Vec<Value> {
            listings.into_iter().filter_map(|l| l.fields.price().cloned()).collect()
        };

        let natural = store.find_by_seller("a@x.com", PriceSort::Natural).await.unwrap();
        assert_eq!(prices(natural), vec![json!(20), json!(5), json!(12)]);

        let asc = store.find_by_seller("a@x.com", PriceSort::Ascending).await.unwrap();
        assert_eq!(prices(asc), vec![json!(5), json!(12), json!(20)]);

        let dsc = store.find_by_seller("a@x.com", PriceSort::Descending).await.unwrap();
        assert_eq!(prices(dsc), vec![json!(20), json!(12), json!(5)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: search returns at most SEARCH_LIMIT listings, each of
        /// whose names literally contains the needle.
        #[test]
        fn search_results_are_bounded_and_contain_needle(
            names in prop::collection::vec("[a-c.*]{0,6}", 0..40),
            needle in "[a-c.*]{0,2}",
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime.block_on(async {
                let store = InMemoryListingStore::new();
                for name in &names {
                    store.insert(fields(json!({"toyName": name}))).await.unwrap();
                }

                let search = NameSearch::containing(needle.clone());
                let found = store.search_by_name(&search, SEARCH_LIMIT).await.unwrap();

                let expected = names.iter().filter(|n| n.contains(needle.as_str())).count();
                assert_eq!(found.len(), expected.min(SEARCH_LIMIT));
                for listing in &found {
                    assert!(listing.fields.name().unwrap_or_default().contains(needle.as_str()));
                }
            });
        }
    }
}
