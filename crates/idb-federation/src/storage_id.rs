//! Composite storage keys.
//!
//! The broker addresses every federated user through a single global
//! identifier namespace. A storage id combines the originating provider
//! with the user's id in that provider's store, so the broker-global key
//! unambiguously maps back to one row in one external system.

use serde::{Deserialize, Serialize};

use crate::error::{FederationError, FederationResult};

/// Namespace prefix marking federated identifiers in the broker's global
/// key format.
const FEDERATED_PREFIX: &str = "f";

/// Delimiter between key segments. Provider ids must not contain it;
/// external ids may (the external segment is the greedy remainder).
const DELIMITER: char = ':';

/// A composite identifier of the form `f:<provider id>:<external id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageId {
    provider_id: String,
    external_id: String,
}

impl StorageId {
    /// Creates a storage id from its parts.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::InvalidStorageKey` if the provider id is
    /// empty or contains the segment delimiter, which would make the
    /// encoding ambiguous.
    pub fn new(
        provider_id: impl Into<String>,
        external_id: impl Into<String>,
    ) -> FederationResult<Self> {
        let provider_id = provider_id.into();
        if provider_id.is_empty() {
            return Err(FederationError::invalid_key("provider id is empty"));
        }
        if provider_id.contains(DELIMITER) {
            return Err(FederationError::invalid_key(format!(
                "provider id '{provider_id}' contains the reserved delimiter '{DELIMITER}'"
            )));
        }
        Ok(Self {
            provider_id,
            external_id: external_id.into(),
        })
    }

    /// Parses a broker-global key.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::InvalidStorageKey` if the key does not
    /// carry the federated prefix or has too few segments.
    pub fn parse(key: &str) -> FederationResult<Self> {
        let rest = key
            .strip_prefix(FEDERATED_PREFIX)
            .and_then(|r| r.strip_prefix(DELIMITER))
            .ok_or_else(|| {
                FederationError::invalid_key(format!(
                    "key '{key}' does not start with '{FEDERATED_PREFIX}{DELIMITER}'"
                ))
            })?;

        let (provider_id, external_id) = rest.split_once(DELIMITER).ok_or_else(|| {
            FederationError::invalid_key(format!("key '{key}' has too few segments"))
        })?;

        Self::new(provider_id, external_id)
    }

    /// Encodes the broker-global key. The external id is embedded as-is.
    #[must_use]
    pub fn id(&self) -> String {
        format!(
            "{FEDERATED_PREFIX}{DELIMITER}{}{DELIMITER}{}",
            self.provider_id, self.external_id
        )
    }

    /// The originating provider's id.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// The user's id within the external store.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }
}

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_encoding() {
        let sid = StorageId::new("legacy-sql", "42").unwrap();
        let encoded = sid.id();

        assert_eq!(encoded, "f:legacy-sql:42");

        let parsed = StorageId::parse(&encoded).unwrap();
        assert_eq!(parsed, sid);
        assert_eq!(parsed.provider_id(), "legacy-sql");
        assert_eq!(parsed.external_id(), "42");
    }

    #[test]
    fn external_id_may_contain_delimiter() {
        let sid = StorageId::new("legacy-sql", "tenant:42").unwrap();
        let parsed = StorageId::parse(&sid.id()).unwrap();

        assert_eq!(parsed.external_id(), "tenant:42");
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(StorageId::parse("42").is_err());
        assert!(StorageId::parse("g:legacy-sql:42").is_err());
    }

    #[test]
    fn rejects_too_few_segments() {
        let err = StorageId::parse("f:legacy-sql").unwrap_err();
        assert!(matches!(err, FederationError::InvalidStorageKey(_)));
    }

    #[test]
    fn rejects_delimiter_in_provider_id() {
        assert!(StorageId::new("bad:provider", "42").is_err());
        assert!(StorageId::new("", "42").is_err());
    }
}
