use axum::Json;

use crate::app::dto::HealthResponse;

/// Liveness probe. Static; never touches the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
