use axum::{
    Router,
    routing::get,
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as RespJson,
};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use super::{store_failure, ApiError};
use crate::db::contacts;
use crate::model::{ContactId, ContactSummary, NewContact, UserId};

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ContactIdResponse {
    pub contact_id: ContactId,
}

pub fn contacts_router() -> Router {
    Router::new()
        .route("/api/users/:id/contacts", get(list_contacts).post(add_contact))
}

async fn list_contacts(
    Extension(pool): Extension<PgPool>,
    Path(owner): Path<UserId>,
) -> Result<RespJson<ContactListResponse>, ApiError> {
    let contacts: Vec<String> = contacts::list_contacts(&pool, owner)
        .await
        .map_err(store_failure("Contact list failed"))?
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(RespJson(ContactListResponse {
        total: contacts.len(),
        contacts,
    }))
}

async fn add_contact(
    Extension(pool): Extension<PgPool>,
    Path(owner): Path<UserId>,
    Json(payload): Json<NewContact>,
) -> Result<(StatusCode, RespJson<ContactIdResponse>), ApiError> {
    let contact_id = contacts::add_contact(&pool, owner, &payload)
        .await
        .map_err(store_failure("Contact insert failed"))?;

    info!(owner, contact_id, contact = %ContactSummary::from(&payload), "Contact added");
    Ok((StatusCode::CREATED, RespJson(ContactIdResponse { contact_id })))
}
