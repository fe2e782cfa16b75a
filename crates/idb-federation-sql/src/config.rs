//! SQL store configuration.
//!
//! The broker collects these settings when an administrator links the
//! external account database. Validation happens in two stages: a pure
//! check over the values here, and a live connection check in
//! [`crate::connection::validate_connection`].

use std::time::Duration;

use idb_federation::{FederationError, FederationResult};
use serde::{Deserialize, Serialize};

/// Default SQL statement used to validate a freshly configured connection.
pub const DEFAULT_VALIDATION_QUERY: &str = "select * from users limit 1";

/// Configuration for the SQL user storage provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlStoreConfig {
    /// Provider id used as the middle segment of composite storage keys.
    pub provider_id: String,

    /// Database connection URL (`mysql://host:port/database`).
    pub url: String,

    /// Username override. When unset, credentials embedded in the URL
    /// apply.
    pub username: Option<String>,

    /// Password override. When unset, credentials embedded in the URL
    /// apply.
    pub password: Option<String>,

    /// SQL statement executed at configuration time to prove the
    /// connection works.
    pub validation_query: String,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// Connection acquire timeout.
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
}

impl SqlStoreConfig {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> SqlStoreConfigBuilder {
        SqlStoreConfigBuilder::new()
    }

    /// Validates the configuration values without touching the database.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::Configuration` describing the first
    /// offending setting.
    pub fn validate(&self) -> FederationResult<()> {
        if self.provider_id.is_empty() {
            return Err(FederationError::config("provider id must not be empty"));
        }
        if self.provider_id.contains(':') {
            return Err(FederationError::config(
                "provider id must not contain ':' (reserved by the storage key format)",
            ));
        }
        if self.url.is_empty() {
            return Err(FederationError::config("connection URL must not be empty"));
        }
        if self.validation_query.is_empty() {
            return Err(FederationError::config(
                "validation query must not be empty",
            ));
        }
        if self.max_connections == 0 {
            return Err(FederationError::config(
                "max_connections must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for [`SqlStoreConfig`].
#[derive(Debug, Default)]
pub struct SqlStoreConfigBuilder {
    provider_id: Option<String>,
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    validation_query: Option<String>,
    max_connections: Option<u32>,
    connect_timeout: Option<Duration>,
}

impl SqlStoreConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the provider id.
    #[must_use]
    pub fn provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    /// Sets the connection URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the username override.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password override.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the validation query.
    #[must_use]
    pub fn validation_query(mut self, query: impl Into<String>) -> Self {
        self.validation_query = Some(query.into());
        self
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Sets the connection acquire timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::Configuration` if a required field is
    /// missing or a value fails [`SqlStoreConfig::validate`].
    pub fn build(self) -> FederationResult<SqlStoreConfig> {
        let config = SqlStoreConfig {
            provider_id: self
                .provider_id
                .ok_or_else(|| FederationError::config("provider id is required"))?,
            url: self
                .url
                .ok_or_else(|| FederationError::config("connection URL is required"))?,
            username: self.username,
            password: self.password,
            validation_query: self
                .validation_query
                .unwrap_or_else(|| DEFAULT_VALIDATION_QUERY.to_string()),
            max_connections: self.max_connections.unwrap_or(10),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(30)),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Serde support for `Duration` as whole seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = SqlStoreConfig::builder()
            .provider_id("legacy-sql")
            .url("mysql://db.internal:3306/accounts")
            .build()
            .unwrap();

        assert_eq!(config.validation_query, DEFAULT_VALIDATION_QUERY);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(config.username.is_none());
    }

    #[test]
    fn builder_requires_provider_id_and_url() {
        let missing_url = SqlStoreConfig::builder().provider_id("legacy-sql").build();
        assert!(missing_url.is_err());

        let missing_provider = SqlStoreConfig::builder()
            .url("mysql://db.internal:3306/accounts")
            .build();
        assert!(missing_provider.is_err());
    }

    #[test]
    fn validate_rejects_reserved_delimiter() {
        let config = SqlStoreConfig::builder()
            .provider_id("legacy:sql")
            .url("mysql://db.internal:3306/accounts")
            .build();

        let err = config.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn validate_rejects_zero_pool() {
        let config = SqlStoreConfig::builder()
            .provider_id("legacy-sql")
            .url("mysql://db.internal:3306/accounts")
            .max_connections(0)
            .build();

        assert!(config.is_err());
    }
}
