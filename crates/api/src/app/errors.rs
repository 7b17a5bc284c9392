use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use figurehub_core::DomainError;
use figurehub_infra::StoreError;

/// The listing operations, for error messages and log fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Create,
    Search,
    GetSingle,
    ListBySubCategory,
    ListBySeller,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Search => "search",
            Operation::GetSingle => "get_single",
            Operation::ListBySubCategory => "list_by_sub_category",
            Operation::ListBySeller => "list_by_seller",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Client-facing message for a failed call.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Create => "An error occurred while adding the toy.",
            Operation::Search => "An error occurred while searching for toys.",
            Operation::GetSingle => "An error occurred while searching for toys for the id.",
            Operation::ListBySubCategory => {
                "An error occurred while searching for toys for the category."
            }
            Operation::ListBySeller => "An error occurred while searching for toys for the user.",
            Operation::Update => "An error occurred while updating the toy.",
            Operation::Delete => "An error occurred while deleting the toy.",
        }
    }
}

/// A store call failed: log it and answer 500.
pub fn store_failure(op: Operation, err: &StoreError) -> axum::response::Response {
    tracing::error!(operation = op.as_str(), error = %err, "listing store call failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", op.failure_message())
}

/// The path identifier is not a valid store identifier.
///
/// Reported as a 500 like any other failed store call, but logged at `warn`
/// since the cause is the request.
pub fn invalid_id(op: Operation, err: &DomainError) -> axum::response::Response {
    tracing::warn!(operation = op.as_str(), error = %err, "rejected malformed listing id");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "invalid_id", op.failure_message())
}

/// The request body is not a JSON object.
pub fn invalid_body(err: &DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", err.to_string())
}

/// `{"error": <message>, "code": <code>}`. Clients display `error` as is.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}
