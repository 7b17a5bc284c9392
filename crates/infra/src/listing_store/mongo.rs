//! MongoDB-backed listing store.
//!
//! One long-lived [`Client`] is opened at startup and shared by every
//! request; the driver pools connections internally. The client is shut down
//! once, from [`ListingStore::close`], after the HTTP server has drained.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Bson, Document, doc},
    error::ErrorKind,
    options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion},
};
use serde_json::Value as JsonValue;

use figurehub_core::listing::{
    ID_FIELD, NAME_FIELD, PRICE_FIELD, SELLER_EMAIL_FIELD, SUB_CATEGORY_FIELD,
};
use figurehub_core::{Listing, ListingFields, ListingId, NameSearch, PriceSort};

use super::r#trait::{ListingStore, StoreError, UpdateOutcome};
use crate::config::MongoConfig;

/// Listing collection stored in MongoDB.
#[derive(Debug, Clone)]
pub struct MongoListingStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoListingStore {
    /// Connect using the Stable API (v1, strict, deprecation errors) and
    /// verify the deployment answers a ping.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.app_name = Some("figurehub".to_string());

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        let store = Self { client, collection };
        store.ping().await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "mongo connected"
        );
        Ok(store)
    }

    async fn find_all(
        &self,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Vec<Listing>, StoreError> {
        let cursor = self.collection.find(filter, options).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(document_to_listing).collect()
    }
}

#[async_trait]
impl ListingStore for MongoListingStore {
    fn backend(&self) -> &'static str {
        "mongo"
    }

    async fn insert(&self, fields: ListingFields) -> Result<ListingId, StoreError> {
        let doc = fields_to_document(&fields)?;
        let result = self.collection.insert_one(doc, None).await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(ListingId::from_object_id(oid)),
            other => Err(StoreError::Serialization(format!(
                "unexpected inserted id type: {other}"
            ))),
        }
    }

    async fn search_by_name(
        &self,
        search: &NameSearch,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError> {
        let options = FindOptions::builder()
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();
        self.find_all(name_filter(search), Some(options)).await
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        let found = self.collection.find_one(id_filter(id), None).await?;
        found.map(document_to_listing).transpose()
    }

    async fn find_by_sub_category(&self, sub_category: &str) -> Result<Vec<Listing>, StoreError> {
        self.find_all(doc! { SUB_CATEGORY_FIELD: sub_category }, None)
            .await
    }

    async fn find_by_seller(
        &self,
        seller_email: &str,
        sort: PriceSort,
    ) -> Result<Vec<Listing>, StoreError> {
        let options = sort
            .direction()
            .map(|dir| FindOptions::builder().sort(doc! { PRICE_FIELD: dir }).build());
        self.find_all(doc! { SELLER_EMAIL_FIELD: seller_email }, options)
            .await
    }

    async fn update(&self, id: ListingId, patch: ListingFields) -> Result<UpdateOutcome, StoreError> {
        // `$set` with an empty document is rejected by the server; an empty
        // patch only reports whether the listing exists.
        if patch.is_empty() {
            let matched = self.collection.count_documents(id_filter(id), None).await?;
            return Ok(UpdateOutcome {
                matched,
                modified: 0,
            });
        }

        let set = fields_to_document(&patch)?;
        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": set }, None)
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete(&self, id: ListingId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(id_filter(id), None).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("mongo client shut down");
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
                StoreError::Unavailable(err.to_string())
            }
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                StoreError::Serialization(err.to_string())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

fn id_filter(id: ListingId) -> Document {
    doc! { ID_FIELD: *id.as_object_id() }
}

/// Literal substring match on the name; no needle matches everything.
fn name_filter(search: &NameSearch) -> Document {
    match search.needle() {
        Some(needle) => doc! { NAME_FIELD: { "$regex": regex::escape(needle) } },
        None => Document::new(),
    }
}

fn fields_to_document(fields: &ListingFields) -> Result<Document, StoreError> {
    bson::to_document(fields.as_map()).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn document_to_listing(mut doc: Document) -> Result<Listing, StoreError> {
    let id = match doc.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => ListingId::from_object_id(oid),
        Some(other) => {
            return Err(StoreError::Serialization(format!(
                "listing has a non-object-id identifier: {other}"
            )));
        }
        None => return Err(StoreError::Serialization("listing without identifier".to_string())),
    };

    match Bson::Document(doc).into_relaxed_extjson() {
        JsonValue::Object(map) => Ok(Listing::new(id, ListingFields::from_map(map))),
        _ => Err(StoreError::Serialization("listing is not a document".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[test]
    fn name_filter_escapes_pattern_metacharacters() {
        let filter = name_filter(&NameSearch::containing("a.b(c)*[d]"));
        assert_eq!(filter, doc! { "toyName": { "$regex": r"a\.b\(c\)\*\[d\]" } });
        assert!(name_filter(&NameSearch::all()).is_empty());
    }

    #[test]
    fn documents_convert_to_flat_listings() {
        let oid = ObjectId::new();
        let doc = doc! { "_id": oid, "toyName": "Groot", "price": 12_i32, "tags": ["tree"] };

        let listing = document_to_listing(doc).unwrap();
        assert_eq!(listing.id, ListingId::from_object_id(oid));
        assert_eq!(listing.fields.name(), Some("Groot"));
        assert_eq!(listing.fields.price(), Some(&serde_json::json!(12)));
        assert_eq!(listing.fields.get("tags"), Some(&serde_json::json!(["tree"])));
    }

    #[test]
    fn documents_without_object_ids_are_rejected() {
        let err = document_to_listing(doc! { "toyName": "Groot" }).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));

        let err = document_to_listing(doc! { "_id": "custom", "toyName": "Groot" }).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn fields_convert_to_documents() {
        let fields = ListingFields::from_body(br#"{"toyName":"Hulk","price":30,"_id":"x"}"#).unwrap();
        let doc = fields_to_document(&fields).unwrap();
        assert_eq!(doc.get_str("toyName").unwrap(), "Hulk");
        assert!(doc.get("_id").is_none());
        assert!(doc.get("price").is_some());
    }
}
