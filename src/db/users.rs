use sqlx::PgPool;

use crate::error::StoreResult;
use crate::model::{NewUser, UserId};

/// True when `identifier` matches any stored username or email.
pub async fn user_exists(pool: &PgPool, identifier: &str) -> StoreResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM "user" WHERE username = $1 OR email = $1)"#,
    )
    .bind(identifier)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Looks up a user by username or email and plain-text password.
///
/// `None` means the credentials are invalid; it is not an error. If several
/// users share the identifier and password, the first row returned wins.
pub async fn check_credentials(
    pool: &PgPool,
    identifier: &str,
    password: &str,
) -> StoreResult<Option<UserId>> {
    let user_id = sqlx::query_scalar::<_, UserId>(
        r#"SELECT user_id FROM "user" WHERE (username = $1 OR email = $1) AND password = $2"#,
    )
    .bind(identifier)
    .bind(password)
    .fetch_optional(pool)
    .await?;

    Ok(user_id)
}

pub async fn add_user(pool: &PgPool, user: &NewUser) -> StoreResult<UserId> {
    let user_id = sqlx::query_scalar::<_, UserId>(
        r#"INSERT INTO "user" (username, email, first_name, last_name, birth_year, password, oib)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING user_id"#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.birth_year)
    .bind(&user.password)
    .bind(user.oib)
    .fetch_one(pool)
    .await?;

    Ok(user_id)
}
