use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use figurehub_core::{Listing, ListingId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

pub const CREATED: &str = "Inserted Action Figure Successfully";
pub const FOUND: &str = "Action Figures Found SuccessFully";
pub const FOUND_ONE: &str = "Action Figure Found SuccessFully";
pub const NOT_FOUND: &str = "No Action Figure Found";
pub const NONE_IN_CATEGORY: &str = "No Action Figures Found in this Category";
pub const NONE_FOR_SELLER: &str = "No Action Figures Found for this Seller";
pub const MODIFIED: &str = "Action Figure Modified Successfully";
pub const DELETED: &str = "Action Figure Deleted Successfully";
pub const DELETE_NOT_FOUND: &str = "Action Figure Not Found";

/// Insert acknowledgement, shaped like the document store's own result.
#[derive(Debug, Serialize)]
pub struct InsertResult {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: ListingId,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub msg: &'static str,
    pub result: InsertResult,
}

impl CreatedResponse {
    pub fn new(id: ListingId) -> Self {
        Self {
            msg: CREATED,
            result: InsertResult {
                acknowledged: true,
                inserted_id: id,
            },
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn message(msg: &str) -> Value {
    json!({ "message": msg })
}

/// `{"message": ..., <key>: [...]}` with the message chosen by emptiness.
pub fn listings_to_json(key: &str, listings: Vec<Listing>, empty_msg: &str) -> Value {
    let msg = if listings.is_empty() { empty_msg } else { FOUND };
    json!({
        "message": msg,
        key: listings,
    })
}

pub fn single_to_json(listing: Option<Listing>) -> Value {
    let msg = if listing.is_some() { FOUND_ONE } else { NOT_FOUND };
    json!({
        "message": msg,
        "singleActionFigure": listing,
    })
}
