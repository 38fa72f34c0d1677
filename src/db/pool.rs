use std::future::Future;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Connection, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{StoreError, StoreResult};

/// Opens the shared pool against the application database and pings it.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(config.max_lifetime)
        .acquire_timeout(config.setup_timeout)
        .connect_with(config.connect_options())
        .await?;

    ping(&pool, config.setup_timeout).await?;
    info!(database = %config.name, host = %config.host, "Connected to database");

    Ok(pool)
}

pub async fn ping(pool: &PgPool, deadline: Duration) -> StoreResult<()> {
    with_deadline("ping", deadline, async {
        let mut conn = pool.acquire().await?;
        conn.ping().await?;
        Ok::<(), StoreError>(())
    })
    .await
}

/// Runs a setup step, failing with [`StoreError::Timeout`] once `deadline` passes.
pub(crate) async fn with_deadline<T, F>(
    step: &'static str,
    deadline: Duration,
    fut: F,
) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| StoreError::Timeout { step, deadline })?
}
