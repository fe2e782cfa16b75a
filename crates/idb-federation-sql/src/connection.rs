//! Database connection plumbing.
//!
//! The pool is created lazily: no connection is opened until the first
//! query runs. The broker proves the configuration works by calling
//! [`validate_connection`], which executes the administrator-supplied
//! validation statement.

use std::str::FromStr;

use idb_federation::{FederationError, FederationResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::SqlStoreConfig;

/// Creates a lazy MySQL connection pool from the configuration.
///
/// # Errors
///
/// Returns `FederationError::Configuration` if the connection URL cannot
/// be parsed.
pub fn create_pool(config: &SqlStoreConfig) -> FederationResult<MySqlPool> {
    let mut options = MySqlConnectOptions::from_str(&config.url)
        .map_err(|e| FederationError::config(format!("invalid connection URL: {e}")))?;

    if let Some(username) = &config.username {
        options = options.username(username);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }

    Ok(MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .connect_lazy_with(options))
}

/// Executes the configured validation statement against the pool.
///
/// Called once at configuration time; a failure is fatal to provider
/// activation and carries the store's original message for diagnostics.
///
/// # Errors
///
/// Returns `FederationError::Configuration` when the statement does not
/// execute.
pub async fn validate_connection(pool: &MySqlPool, config: &SqlStoreConfig) -> FederationResult<()> {
    tracing::info!(provider_id = %config.provider_id, "validating database connection");

    sqlx::query(&config.validation_query)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::warn!(provider_id = %config.provider_id, error = %e, "connection validation failed");
            FederationError::config(format!("unable to validate database connection: {e}"))
        })?;

    tracing::info!(provider_id = %config.provider_id, "database connection validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SqlStoreConfig {
        SqlStoreConfig::builder()
            .provider_id("legacy-sql")
            .url("mysql://db.internal:3306/accounts")
            .username("broker")
            .password("secret")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn lazy_pool_creation_does_not_connect() {
        // No database is listening at this address; creation must still
        // succeed because the pool connects on first use.
        let pool = create_pool(&test_config());
        assert!(pool.is_ok());
    }

    #[test]
    fn malformed_url_is_a_configuration_error() {
        let config = SqlStoreConfig {
            url: "not a url".to_string(),
            ..test_config()
        };

        let err = create_pool(&config).unwrap_err();
        assert!(err.is_configuration());
    }
}
