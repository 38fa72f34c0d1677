use axum::{
    Router,
    routing::{get, post},
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::Json as RespJson,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};

use super::{store_failure, ApiError};
use crate::db::users;
use crate::model::{NewUser, UserId};

#[derive(Debug, Deserialize)]
pub struct ExistsQuery {
    pub identifier: String,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

// Username or email plus password
#[derive(Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub user_id: UserId,
}

pub fn auth_router() -> Router {
    Router::new()
        .route("/api/users/exists", get(user_exists))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

async fn user_exists(
    Extension(pool): Extension<PgPool>,
    Query(query): Query<ExistsQuery>,
) -> Result<RespJson<ExistsResponse>, ApiError> {
    let exists = users::user_exists(&pool, &query.identifier)
        .await
        .map_err(store_failure("User lookup failed"))?;

    Ok(RespJson(ExistsResponse { exists }))
}

// Refuses identities whose username or email is already taken
pub async fn register(
    Extension(pool): Extension<PgPool>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, RespJson<UserIdResponse>), ApiError> {
    info!(username = %payload.username, email = %payload.email, "Register attempt");

    for identifier in [&payload.username, &payload.email] {
        let taken = users::user_exists(&pool, identifier)
            .await
            .map_err(store_failure("User lookup failed"))?;
        if taken {
            warn!(identifier = %identifier, "User already exists");
            return Err((
                StatusCode::CONFLICT,
                RespJson(serde_json::json!({ "error": "User already exists" })),
            ));
        }
    }

    let user_id = users::add_user(&pool, &payload)
        .await
        .map_err(store_failure("User insert failed"))?;

    info!(user_id, "User registered");
    Ok((StatusCode::CREATED, RespJson(UserIdResponse { user_id })))
}

pub async fn login(
    Extension(pool): Extension<PgPool>,
    Json(payload): Json<LoginRequest>,
) -> Result<RespJson<UserIdResponse>, ApiError> {
    let user_id = users::check_credentials(&pool, &payload.identifier, &payload.password)
        .await
        .map_err(store_failure("Credential check failed"))?;

    match user_id {
        Some(user_id) => {
            info!(user_id, "Credentials are valid");
            Ok(RespJson(UserIdResponse { user_id }))
        }
        None => {
            warn!(identifier = %payload.identifier, "Invalid credentials");
            Err((
                StatusCode::UNAUTHORIZED,
                RespJson(serde_json::json!({ "error": "Invalid credentials" })),
            ))
        }
    }
}
