//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and mapping into domain requests
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use itemstore_items::ItemStore;

pub mod dto;
pub mod errors;
pub mod routes;

/// Prefix for resource routes. `/health` stays at the root.
pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(store: Arc<ItemStore>) -> Router {
    let api = routes::router().layer(Extension(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
