use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{step} did not finish within {deadline:?}")]
    Timeout {
        step: &'static str,
        deadline: Duration,
    },

    #[error("Refusing to use database name {0:?}: expected a plain identifier")]
    InvalidDatabaseName(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
