use sqlx::{Connection, Executor, PgConnection, PgPool};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::db::pool::{self, with_deadline};
use crate::db::seed::{self, SeedPlan, SeedReport};
use crate::error::{StoreError, StoreResult};

pub const USER_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS "user" (
    user_id SERIAL PRIMARY KEY,
    username VARCHAR(50),
    email VARCHAR(50),
    first_name VARCHAR(50),
    last_name VARCHAR(50),
    birth_year INTEGER,
    password VARCHAR(100),
    oib BIGINT
)"#;

// The contact key column is named user_id; user_contact.contact_id points at it.
pub const CONTACT_TABLE: &str = "CREATE TABLE IF NOT EXISTS contact (
    user_id SERIAL PRIMARY KEY,
    first_name VARCHAR(50),
    last_name VARCHAR(50),
    contact_number VARCHAR(50),
    email VARCHAR(50)
)";

pub const USER_CONTACT_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS user_contact (
    user_id INTEGER,
    contact_id INTEGER,
    PRIMARY KEY (user_id, contact_id),
    FOREIGN KEY (user_id) REFERENCES "user"(user_id),
    FOREIGN KEY (contact_id) REFERENCES contact(user_id)
)"#;

/// Creation order matters: `user_contact` references the other two.
pub const TABLES: [(&str, &str); 3] = [
    ("user", USER_TABLE),
    ("contact", CONTACT_TABLE),
    ("user_contact", USER_CONTACT_TABLE),
];

/// The database name is spliced into DDL, so only plain identifiers pass.
pub fn validate_database_name(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidDatabaseName(name.to_owned()))
    }
}

/// Drops the configured database if present and creates it empty.
pub async fn recreate_database(config: &DatabaseConfig) -> StoreResult<()> {
    validate_database_name(&config.name)?;
    let deadline = config.setup_timeout;

    let mut conn = with_deadline("maintenance connect", deadline, async {
        Ok::<_, StoreError>(PgConnection::connect_with(&config.maintenance_options()).await?)
    })
    .await?;

    warn!(database = %config.name, "Dropping database");
    let drop_sql = format!(r#"DROP DATABASE IF EXISTS "{}""#, config.name);
    with_deadline("drop database", deadline, async {
        Ok::<_, StoreError>(conn.execute(drop_sql.as_str()).await?)
    })
    .await?;

    let create_sql = format!(r#"CREATE DATABASE "{}""#, config.name);
    let created = with_deadline("create database", deadline, async {
        Ok::<_, StoreError>(conn.execute(create_sql.as_str()).await?)
    })
    .await?;
    info!(database = %config.name, rows_affected = created.rows_affected(), "Created database");

    conn.close().await?;
    Ok(())
}

pub async fn create_tables(pool: &PgPool, config: &DatabaseConfig) -> StoreResult<()> {
    for (name, ddl) in TABLES {
        let result = with_deadline("create table", config.setup_timeout, async {
            Ok::<_, StoreError>(sqlx::query(ddl).execute(pool).await?)
        })
        .await?;
        info!(table = name, rows_affected = result.rows_affected(), "Created table");
    }
    Ok(())
}

/// Destroys and rebuilds the whole database, then fills it with fake data.
///
/// Any failure aborts immediately. Whatever was created before the failure is
/// left in place, so a failed run has to be repeated from the drop.
pub async fn bootstrap<R>(
    config: &DatabaseConfig,
    plan: &SeedPlan,
    rng: &mut R,
) -> StoreResult<SeedReport>
where
    R: rand::Rng + ?Sized,
{
    recreate_database(config).await?;

    let pool = pool::connect(config).await?;
    create_tables(&pool, config).await?;
    let report = seed::populate(&pool, plan, rng).await?;
    pool.close().await;

    Ok(report)
}
