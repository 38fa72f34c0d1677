use axum::{http::StatusCode, response::Json as RespJson, routing::get, Extension, Router};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::error::StoreError;

pub mod auth;
pub mod contacts;

use auth::auth_router;
use contacts::contacts_router;

pub type ApiError = (StatusCode, RespJson<serde_json::Value>);

pub fn app(pool: PgPool) -> Router {
    Router::new()
        // Sign-up check, register and login
        .merge(auth_router())
        // Per-user contact list
        .merge(contacts_router())
        .route("/api/health", get(|| async { RespJson(serde_json::json!({ "status": "ok" })) }))
        .layer(Extension(pool))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

pub(crate) fn store_failure(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |err| {
        error!(error = %err, "{context}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            RespJson(serde_json::json!({ "error": "Database error" })),
        )
    }
}
