// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service info, health, the home page and the API documentation catalog.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service information
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "CompTrack",
        "version": version,
        "description": "Complaint tracking API",
        "storage": state.backend.name(),
        "documentation": "/v3/api-docs",
    }))
}

/// GET /health - Storage connectivity check
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.backend.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// GET /home - Static landing page
pub async fn home() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html><head><title>CompTrack</title></head>\
         <body><h1>CompTrack</h1><p>File and follow complaints through the \
         <a href=\"/v3/api-docs\">REST API</a>.</p></body></html>",
    )
}

/// GET /v3/api-docs (also /swagger-ui.html, /swagger-ui/*) - Endpoint catalog
pub async fn api_docs(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "title": "CompTrack API",
        "version": env!("CARGO_PKG_VERSION"),
        "security": {
            "scheme": "basic",
            "realm": state.realm.as_str(),
            "protected": ["/api/complaints/**", "/api/users/**"],
        },
        "endpoints": [
            { "method": "POST", "path": "/api/complaints", "body": "ComplaintInput", "returns": "ComplaintDTO" },
            { "method": "GET", "path": "/api/complaints", "returns": "[ComplaintDTO]" },
            { "method": "GET", "path": "/api/complaints/{id}", "returns": "ComplaintDTO" },
            { "method": "PUT", "path": "/api/complaints/{id}", "body": "ComplaintInput", "returns": "ComplaintDTO" },
            { "method": "DELETE", "path": "/api/complaints/{id}", "returns": "204 No Content" },
            { "method": "POST", "path": "/api/users", "body": "UserInput", "returns": "UserDTO" },
            { "method": "GET", "path": "/api/users", "returns": "[UserDTO]" },
            { "method": "GET", "path": "/api/users/me", "returns": "Principal" },
        ],
        "schemas": {
            "ComplaintInput": {
                "title": "string (required)",
                "description": "string (optional)",
                "status": "OPEN | IN_PROGRESS | RESOLVED | CLOSED (optional)",
                "userId": "integer (required on create)",
            },
            "ComplaintDTO": {
                "id": "integer",
                "title": "string",
                "description": "string | null",
                "status": "OPEN | IN_PROGRESS | RESOLVED | CLOSED | null",
                "createdAt": "RFC 3339 timestamp",
                "userId": "integer",
            },
            "UserInput": { "username": "string", "email": "string", "password": "string" },
            "UserDTO": { "id": "integer", "username": "string", "email": "string" },
        }
    }))
}
