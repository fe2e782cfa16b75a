//! User storage capability traits.
//!
//! The broker programs against small capability interfaces rather than a
//! single provider trait: lookup, paged querying, credential validation,
//! and credential update. A storage provider implements whichever
//! capabilities its backing store can honor; one struct typically carries
//! all four.
//!
//! ## Implementation notes
//!
//! - Providers must be thread-safe (`Send + Sync`); the broker invokes
//!   them concurrently from multiple request threads.
//! - Every operation acquires its backing resources for the duration of
//!   that call only and releases them on all exit paths.
//! - Negative outcomes (no such user, wrong password) are values, not
//!   errors.

use std::collections::{HashMap, HashSet};

use idb_model::{CredentialInput, FederatedUser};

use crate::error::FederationResult;

/// Default offset for paged operations.
pub const FIRST_RESULT: u64 = 0;

/// Default page size for paged operations.
pub const MAX_RESULTS: u64 = 50;

// ============================================================================
// User Lookup
// ============================================================================

/// Point lookups of individual users.
#[allow(async_fn_in_trait)]
pub trait UserLookupProvider: Send + Sync {
    /// Gets a user by broker-global composite key. Roles are attached.
    ///
    /// The provider decodes the key itself; an ill-formed key fails the
    /// call with `FederationError::InvalidStorageKey`. Returns `None`
    /// when no row matches the decoded external id.
    async fn get_user_by_id(&self, id: &str) -> FederationResult<Option<FederatedUser>>;

    /// Gets a user by username.
    ///
    /// Stores without a username column always return `None`; callers
    /// must fall back to email lookup.
    async fn get_user_by_username(&self, username: &str)
        -> FederationResult<Option<FederatedUser>>;

    /// Gets a user by exact email match. Roles are attached. Case
    /// sensitivity follows the backing store's collation.
    async fn get_user_by_email(&self, email: &str) -> FederationResult<Option<FederatedUser>>;
}

// ============================================================================
// User Query
// ============================================================================

/// Enumeration and search across the user population.
///
/// Paged results are ordered by external id ascending and never carry
/// roles; role attachment is a point-lookup concern only.
#[allow(async_fn_in_trait)]
pub trait UserQueryProvider: Send + Sync {
    /// Total user count, unfiltered.
    async fn users_count(&self) -> FederationResult<u64>;

    /// Returns one page of users. `first` is the row offset, `max` the
    /// page size.
    async fn get_users(&self, first: u64, max: u64) -> FederationResult<Vec<FederatedUser>>;

    /// Returns the default first page (offset 0, 50 rows).
    async fn get_users_page(&self) -> FederationResult<Vec<FederatedUser>> {
        self.get_users(FIRST_RESULT, MAX_RESULTS).await
    }

    /// Substring search on email. `pattern` is a raw LIKE pattern; the
    /// caller is responsible for wildcard escaping.
    async fn search_for_user(
        &self,
        pattern: &str,
        first: u64,
        max: u64,
    ) -> FederationResult<Vec<FederatedUser>>;

    /// Searches with the default page (offset 0, 50 rows).
    async fn search_for_user_page(&self, pattern: &str) -> FederationResult<Vec<FederatedUser>> {
        self.search_for_user(pattern, FIRST_RESULT, MAX_RESULTS).await
    }

    /// Searches with a structured filter map.
    ///
    /// Providers that cannot decompose structured filters ignore the map
    /// entirely and return a plain `get_users` page. Callers must
    /// tolerate this documented capability gap.
    async fn search_for_user_by_params(
        &self,
        params: &HashMap<String, String>,
        first: u64,
        max: u64,
    ) -> FederationResult<Vec<FederatedUser>>;

    /// Members of a broker group. Stores without group integration
    /// return an empty sequence.
    async fn group_members(
        &self,
        group_id: &str,
        first: u64,
        max: u64,
    ) -> FederationResult<Vec<FederatedUser>>;

    /// Users matching a custom attribute. Stores without attribute
    /// integration return an empty sequence.
    async fn search_for_user_by_attribute(
        &self,
        name: &str,
        value: &str,
    ) -> FederationResult<Vec<FederatedUser>>;
}

// ============================================================================
// Credential Validation
// ============================================================================

/// Validates broker-supplied credentials against the external store.
#[allow(async_fn_in_trait)]
pub trait CredentialInputValidator: Send + Sync {
    /// Whether this provider can validate the given credential type.
    fn supports_credential_type(&self, credential_type: &str) -> bool;

    /// Whether the given user has the credential type configured.
    async fn is_configured_for(
        &self,
        user: &FederatedUser,
        credential_type: &str,
    ) -> FederationResult<bool>;

    /// Validates a credential. Unsupported types and missing stored
    /// credentials yield `false`, not an error.
    ///
    /// The challenge response must never be logged or stored.
    async fn is_valid(
        &self,
        user: &FederatedUser,
        input: &CredentialInput,
    ) -> FederationResult<bool>;
}

// ============================================================================
// Credential Update
// ============================================================================

/// Writes credential changes back to the external store.
#[allow(async_fn_in_trait)]
pub trait CredentialInputUpdater: Send + Sync {
    /// Updates a credential. Returns `true` iff the store reported an
    /// affected row; unsupported types yield `false` without touching
    /// the store.
    async fn update_credential(
        &self,
        user: &FederatedUser,
        input: &CredentialInput,
    ) -> FederationResult<bool>;

    /// Disables a credential type for the user. Providers with no
    /// disable semantics treat this as a no-op.
    async fn disable_credential_type(
        &self,
        user: &FederatedUser,
        credential_type: &str,
    ) -> FederationResult<()>;

    /// Credential types that can be disabled for the user. Defaults to
    /// the empty set.
    fn disableable_credential_types(&self, _user: &FederatedUser) -> HashSet<String> {
        HashSet::new()
    }
}
