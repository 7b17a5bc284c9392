//! Listing identifier.
//!
//! Identifiers are generated by the document store (12-byte object ids) and
//! travel over HTTP as 24-character lowercase hex strings.

use core::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Identifier of a listing document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListingId(ObjectId);

impl ListingId {
    /// Generate a fresh identifier.
    ///
    /// Only store adapters call this; the HTTP layer never mints ids.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl core::fmt::Display for ListingId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for ListingId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<ListingId> for ObjectId {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

impl FromStr for ListingId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let oid = ObjectId::parse_str(s)
            .map_err(|e| DomainError::invalid_id(format!("ListingId: {e}")))?;
        Ok(Self(oid))
    }
}

impl Serialize for ListingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
