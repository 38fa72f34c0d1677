use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Database the bootstrapper connects to while dropping and recreating `name`.
    pub maintenance_name: String,
    pub max_connections: u32,
    pub max_lifetime: Duration,
    pub setup_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let database = DatabaseConfig {
            host: string("DB_HOST", "127.0.0.1"),
            port: parse(&lookup, "DB_PORT", 5432)?,
            user: string("DB_USER", "postgres"),
            password: string("DB_PASSWORD", "password"),
            name: string("DB_NAME", "gaussdb"),
            maintenance_name: string("DB_MAINTENANCE_NAME", "postgres"),
            max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 20)?,
            max_lifetime: Duration::from_secs(parse(&lookup, "DB_MAX_LIFETIME_SECS", 300)?),
            setup_timeout: Duration::from_secs(parse(&lookup, "DB_SETUP_TIMEOUT_SECS", 5)?),
        };

        let bind_addr = parse(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000)))?;

        Ok(Self { database, bind_addr })
    }
}

impl DatabaseConfig {
    /// Options for the application database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.server_options().database(&self.name)
    }

    /// Options for the maintenance database, used only by the bootstrapper.
    pub fn maintenance_options(&self) -> PgConnectOptions {
        self.server_options().database(&self.maintenance_name)
    }

    fn server_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
