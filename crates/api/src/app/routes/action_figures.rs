use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use figurehub_core::{ListingFields, ListingId, NameSearch, PriceSort, SEARCH_LIMIT};

use crate::app::errors::{self, Operation};
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/add-action-figure", post(create_action_figure))
        .route("/get-all-action-figure", get(search_action_figures))
        .route("/get-single-action-figure/:id", get(get_action_figure))
        .route("/action-figures/:sub_category", get(list_by_sub_category))
        // GET takes a seller email, PUT a listing id.
        .route(
            "/action-figure/:key",
            get(list_by_seller).put(update_action_figure),
        )
        .route("/delete/action-figure/:id", delete(delete_action_figure))
}

pub async fn create_action_figure(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let fields = match ListingFields::from_body(&body) {
        Ok(f) => f,
        Err(e) => return errors::invalid_body(&e),
    };

    match services.listings().insert(fields).await {
        Ok(id) => {
            tracing::info!(listing_id = %id, "action figure created");
            (StatusCode::OK, Json(dto::CreatedResponse::new(id))).into_response()
        }
        Err(e) => errors::store_failure(Operation::Create, &e),
    }
}

pub async fn search_action_figures(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let search = NameSearch::from_param(params.search);

    match services.listings().search_by_name(&search, SEARCH_LIMIT).await {
        Ok(found) => (
            StatusCode::OK,
            Json(dto::listings_to_json("allActionFigures", found, dto::NOT_FOUND)),
        )
            .into_response(),
        Err(e) => errors::store_failure(Operation::Search, &e),
    }
}

pub async fn get_action_figure(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ListingId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::invalid_id(Operation::GetSingle, &e),
    };

    match services.listings().get(id).await {
        Ok(Some(listing)) => {
            (StatusCode::OK, Json(dto::single_to_json(Some(listing)))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Json(dto::single_to_json(None))).into_response(),
        Err(e) => errors::store_failure(Operation::GetSingle, &e),
    }
}

pub async fn list_by_sub_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(sub_category): Path<String>,
) -> axum::response::Response {
    match services.listings().find_by_sub_category(&sub_category).await {
        Ok(found) => {
            tracing::debug!(%sub_category, count = found.len(), "category lookup");
            (
                StatusCode::OK,
                Json(dto::listings_to_json(
                    "categoryActionFigures",
                    found,
                    dto::NONE_IN_CATEGORY,
                )),
            )
                .into_response()
        }
        Err(e) => errors::store_failure(Operation::ListBySubCategory, &e),
    }
}

pub async fn list_by_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(seller_email): Path<String>,
    Query(params): Query<dto::SortParams>,
) -> axum::response::Response {
    let sort = PriceSort::from_param(params.sort.as_deref());

    match services.listings().find_by_seller(&seller_email, sort).await {
        Ok(found) => (
            StatusCode::OK,
            Json(dto::listings_to_json(
                "usersActionFigures",
                found,
                dto::NONE_FOR_SELLER,
            )),
        )
            .into_response(),
        Err(e) => errors::store_failure(Operation::ListBySeller, &e),
    }
}

pub async fn update_action_figure(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let id: ListingId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::invalid_id(Operation::Update, &e),
    };
    let patch = match ListingFields::from_body(&body) {
        Ok(f) => f,
        Err(e) => return errors::invalid_body(&e),
    };

    match services.listings().update(id, patch).await {
        Ok(outcome) if outcome.changed() => {
            tracing::info!(listing_id = %id, "action figure updated");
            (StatusCode::OK, Json(dto::message(dto::MODIFIED))).into_response()
        }
        Ok(outcome) => {
            tracing::debug!(listing_id = %id, matched = outcome.matched, "update changed nothing");
            (StatusCode::NOT_FOUND, Json(dto::message(dto::NOT_FOUND))).into_response()
        }
        Err(e) => errors::store_failure(Operation::Update, &e),
    }
}

pub async fn delete_action_figure(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ListingId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::invalid_id(Operation::Delete, &e),
    };

    match services.listings().delete(id).await {
        Ok(1) => {
            tracing::info!(listing_id = %id, "action figure deleted");
            (StatusCode::OK, Json(dto::message(dto::DELETED))).into_response()
        }
        Ok(_) => (StatusCode::NOT_FOUND, Json(dto::message(dto::DELETE_NOT_FOUND))).into_response(),
        Err(e) => errors::store_failure(Operation::Delete, &e),
    }
}
