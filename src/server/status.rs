//! Liveness and service catalogue endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use crate::services::ServiceDescriptor;

/// Returns 200 OK while the process is serving requests.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Lists the registered services with their descriptions and config schemas.
///
/// An external form renderer uses this to build the hook setup page.
pub async fn services_handler(State(app_state): State<AppState>) -> Json<Vec<ServiceDescriptor>> {
    Json(app_state.registry().descriptors())
}
