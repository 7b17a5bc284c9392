//! Listing documents.
//!
//! The collection is schemaless: a listing is an identifier plus whatever
//! JSON object the client supplied. A handful of conventional field names are
//! used as query keys; nothing else about the shape is enforced.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};
use crate::id::ListingId;

/// Reserved key holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";
/// Free-text name, searched by substring.
pub const NAME_FIELD: &str = "toyName";
/// Exact-match category filter.
pub const SUB_CATEGORY_FIELD: &str = "sub_category";
/// Seller email, the advisory owner of a listing.
pub const SELLER_EMAIL_FIELD: &str = "seller_email";
/// Numeric sort key.
pub const PRICE_FIELD: &str = "price";

/// Client-supplied listing fields (everything except the identifier).
///
/// Construction always drops `_id`: identifiers are assigned by the store and
/// never chosen or rewritten by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingFields(Map<String, Value>);

impl ListingFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a raw HTTP body as listing fields.
    ///
    /// An empty (or whitespace-only) body is an empty document. Anything that
    /// parses as JSON but is not an object is rejected.
    pub fn from_body(body: &[u8]) -> DomainResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self::from_map(map)),
            Ok(other) => Err(DomainError::invalid_document(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(DomainError::invalid_document(e.to_string())),
        }
    }

    pub fn from_map(mut map: Map<String, Value>) -> Self {
        map.remove(ID_FIELD);
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if key != ID_FIELD {
            self.0.insert(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Overwrite top-level fields with those in `patch`, leaving every other
    /// field untouched.
    pub fn merge(&mut self, patch: &ListingFields) {
        for (k, v) in patch.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_FIELD).and_then(Value::as_str)
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.get(SUB_CATEGORY_FIELD).and_then(Value::as_str)
    }

    pub fn seller_email(&self) -> Option<&str> {
        self.get(SELLER_EMAIL_FIELD).and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<&Value> {
        self.get(PRICE_FIELD)
    }
}

impl From<Map<String, Value>> for ListingFields {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A stored listing: identifier plus fields.
///
/// Serializes as a single flat JSON object with `_id` first.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub fields: ListingFields,
}

impl Listing {
    pub fn new(id: ListingId, fields: ListingFields) -> Self {
        Self { id, fields }
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (k, v) in self.fields.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_is_an_empty_document() {
        assert!(ListingFields::from_body(b"").unwrap().is_empty());
        assert!(ListingFields::from_body(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let bodies: [&[u8]; 4] = [b"[1,2]", b"\"toy\"", b"42", b"{not json"];
        for body in bodies {
            let err = ListingFields::from_body(body).unwrap_err();
            assert!(matches!(err, DomainError::InvalidDocument(_)));
        }
    }

    #[test]
    fn client_supplied_id_is_dropped() {
        let fields =
            ListingFields::from_body(br#"{"_id":"64b7f0c2a1b2c3d4e5f60718","toyName":"Hulk"}"#).unwrap();
        assert!(fields.get(ID_FIELD).is_none());
        assert_eq!(fields.name(), Some("Hulk"));

        let mut fields = ListingFields::new();
        fields.insert(ID_FIELD, json!("x"));
        assert!(fields.is_empty());
    }

    #[test]
    fn merge_replaces_only_mentioned_fields() {
        let mut fields = ListingFields::from_body(br#"{"toyName":"Iron Spider","price":25}"#).unwrap();
        let patch = ListingFields::from_body(br#"{"price":30,"rating":4.5}"#).unwrap();
        fields.merge(&patch);

        assert_eq!(fields.name(), Some("Iron Spider"));
        assert_eq!(fields.price(), Some(&json!(30)));
        assert_eq!(fields.get("rating"), Some(&json!(4.5)));
    }

    #[test]
    fn listing_serializes_flat_with_hex_id() {
        let id: ListingId = "64b7f0c2a1b2c3d4e5f60718".parse().unwrap();
        let listing = Listing::new(
            id,
            ListingFields::from_body(br#"{"toyName":"Groot","price":12}"#).unwrap(),
        );

        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({"_id": "64b7f0c2a1b2c3d4e5f60718", "toyName": "Groot", "price": 12})
        );
    }
}
