/// Service metadata endpoints
///
/// # Endpoints
///
/// - `GET /` - service banner pointing at the API base
/// - `GET /api/` - API information with the endpoint catalog

use axum::Json;
use serde_json::{json, Value};

/// Root banner
pub async fn root_index() -> Json<Value> {
    Json(json!({
        "message": "taskdeck API",
        "version": env!("CARGO_PKG_VERSION"),
        "api_base_url": "/api",
    }))
}

/// API information endpoint
pub async fn api_index() -> Json<Value> {
    Json(json!({
        "message": "taskdeck API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/health/",
            "/api/users/",
            "/api/users/<id>/",
            "/api/projects/",
            "/api/projects/<id>/users/",
            "/api/tasks/",
            "/api/tasks/project/<id>/",
        ],
    }))
}
