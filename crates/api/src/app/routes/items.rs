use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use itemstore_items::{CreateItem, ItemId, ItemStore};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).patch(update_item).delete(delete_item))
}

pub async fn list_items(
    Extension(store): Extension<Arc<ItemStore>>,
    query: Result<Query<dto::ListItemsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", e.body_text()),
    };
    let page = match query.page() {
        Ok(p) => p,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", msg),
    };

    (StatusCode::OK, Json(store.list(page.skip, page.limit))).into_response()
}

pub async fn create_item(
    Extension(store): Extension<Arc<ItemStore>>,
    body: Result<Json<dto::CreateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return invalid_body(e),
    };
    let req = match CreateItem::try_from(body) {
        Ok(r) => r,
        Err(e) => return errors::validation_error_to_response(e),
    };

    match store.create(req) {
        Ok(item) => {
            tracing::info!(item_id = %item.id_typed(), "item created");
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(store): Extension<Arc<ItemStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match store.get(id) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(store): Extension<Arc<ItemStore>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return invalid_body(e),
    };

    match store.update(id, body.into()) {
        Ok(item) => {
            tracing::info!(item_id = %id, "item updated");
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(store): Extension<Arc<ItemStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match store.delete(id) {
        Ok(()) => {
            tracing::info!(item_id = %id, "item deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn parse_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            "item id must be a positive integer",
        )
    })
}

fn invalid_body(rejection: JsonRejection) -> axum::response::Response {
    tracing::debug!("rejected request body: {rejection}");
    errors::json_error(rejection.status(), "invalid_body", rejection.body_text())
}
