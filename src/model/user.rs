use serde::Deserialize;
use sqlx::FromRow;

/// Surrogate key of the `"user"` table (SERIAL).
pub type UserId = i32;

#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct User {
    pub user_id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_year: Option<i32>,
    // stored and compared as plain text
    pub password: Option<String>,
    pub oib: Option<i64>,
}

// Sign-up payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: i32,
    pub password: String,
    pub oib: i64,
}
