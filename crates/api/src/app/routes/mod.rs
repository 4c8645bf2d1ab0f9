use axum::Router;

pub mod items;
pub mod system;

/// Router for all resource endpoints (mounted under the API prefix).
pub fn router() -> Router {
    Router::new().nest("/items", items::router())
}
