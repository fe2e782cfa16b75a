//! SQL user storage provider.
//!
//! One provider instance serves one broker session. Every operation runs
//! a single parameterized statement against the pool (the two by-key
//! lookups additionally run the role resolver's join), borrowing a
//! connection for the statement's duration only; the pool returns it on
//! success, empty result, and failure alike. Nothing is cached between
//! calls and no failure is retried here.

use std::collections::HashMap;

use idb_federation::{
    CredentialInputUpdater, CredentialInputValidator, FederationResult, StorageId,
    UserLookupProvider, UserQueryProvider,
};
use idb_model::credential::credential_types;
use idb_model::{CredentialInput, FederatedUser};
use sqlx::MySqlPool;

use crate::config::SqlStoreConfig;
use crate::connection::{create_pool, validate_connection};
use crate::convert::user_from_row;
use crate::entities::UserRow;
use crate::error::from_sqlx_error;
use crate::queries;
use crate::roles::RoleResolver;

/// User storage provider backed by the legacy account schema.
pub struct SqlUserStorageProvider {
    config: SqlStoreConfig,
    pool: MySqlPool,
    /// Broker client the current session runs under; resolved roles are
    /// bound to it.
    client_id: String,
}

impl SqlUserStorageProvider {
    /// Creates a provider for one broker session.
    ///
    /// The pool is lazy: no connection is opened here. Call
    /// [`Self::test_connection`] at configuration time to prove the
    /// settings against the live store.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::Configuration` if the configuration
    /// fails validation or the connection URL cannot be parsed.
    pub fn new(config: SqlStoreConfig, client_id: impl Into<String>) -> FederationResult<Self> {
        config.validate()?;
        let pool = create_pool(&config)?;

        Ok(Self {
            config,
            pool,
            client_id: client_id.into(),
        })
    }

    /// The configuration this provider was built from.
    #[must_use]
    pub const fn config(&self) -> &SqlStoreConfig {
        &self.config
    }

    /// Executes the configured validation statement against the store.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::Configuration` with the store's message
    /// when the statement does not execute.
    pub async fn test_connection(&self) -> FederationResult<()> {
        validate_connection(&self.pool, &self.config).await
    }

    /// Releases the provider's pool at session end.
    pub async fn close(&self) {
        tracing::debug!(provider_id = %self.config.provider_id, "closing provider");
        self.pool.close().await;
    }

    /// Runs a single-parameter user query and maps the first row, with
    /// roles attached.
    async fn lookup_with_roles(
        &self,
        query: &'static str,
        param: &str,
    ) -> FederationResult<Option<FederatedUser>> {
        let row: Option<UserRow> = sqlx::query_as(query)
            .bind(param)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut user = user_from_row(&self.config.provider_id, row)?;
        let roles = RoleResolver::new(&self.pool)
            .roles_for_external_id(&user.external_id, &self.client_id)
            .await?;
        user.add_roles(roles);

        Ok(Some(user))
    }

    /// Maps a page of rows without role attachment.
    fn page_from_rows(&self, rows: Vec<UserRow>) -> FederationResult<Vec<FederatedUser>> {
        rows.into_iter()
            .map(|row| user_from_row(&self.config.provider_id, row))
            .collect()
    }
}

impl UserLookupProvider for SqlUserStorageProvider {
    async fn get_user_by_id(&self, id: &str) -> FederationResult<Option<FederatedUser>> {
        tracing::debug!(id, "get_user_by_id");
        let sid = StorageId::parse(id)?;
        self.lookup_with_roles(queries::SELECT_USER_BY_ID, sid.external_id())
            .await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> FederationResult<Option<FederatedUser>> {
        // The legacy schema has no username column; callers use email.
        tracing::debug!(username, "get_user_by_username: unsupported, returning none");
        Ok(None)
    }

    async fn get_user_by_email(&self, email: &str) -> FederationResult<Option<FederatedUser>> {
        tracing::debug!(email, "get_user_by_email");
        self.lookup_with_roles(queries::SELECT_USER_BY_EMAIL, email)
            .await
    }
}

impl UserQueryProvider for SqlUserStorageProvider {
    async fn users_count(&self) -> FederationResult<u64> {
        tracing::debug!("users_count");
        let count: i64 = sqlx::query_scalar(queries::COUNT_USERS)
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }

    async fn get_users(&self, first: u64, max: u64) -> FederationResult<Vec<FederatedUser>> {
        tracing::debug!(first, max, "get_users");
        let rows: Vec<UserRow> = sqlx::query_as(queries::SELECT_USERS_LIMIT)
            .bind(max)
            .bind(first)
            .fetch_all(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        self.page_from_rows(rows)
    }

    async fn search_for_user(
        &self,
        pattern: &str,
        first: u64,
        max: u64,
    ) -> FederationResult<Vec<FederatedUser>> {
        tracing::debug!(pattern, first, max, "search_for_user");
        let rows: Vec<UserRow> = sqlx::query_as(queries::SEARCH_USERS_BY_EMAIL)
            .bind(pattern)
            .bind(max)
            .bind(first)
            .fetch_all(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        self.page_from_rows(rows)
    }

    async fn search_for_user_by_params(
        &self,
        params: &HashMap<String, String>,
        first: u64,
        max: u64,
    ) -> FederationResult<Vec<FederatedUser>> {
        // Structured filters are not decomposed against this schema: the
        // whole filter set is ignored and a plain page is returned.
        tracing::debug!(
            filters = params.len(),
            first,
            max,
            "search_for_user_by_params: returning unfiltered page"
        );
        self.get_users(first, max).await
    }

    async fn group_members(
        &self,
        group_id: &str,
        _first: u64,
        _max: u64,
    ) -> FederationResult<Vec<FederatedUser>> {
        // Group integration lives outside this schema.
        tracing::debug!(group_id, "group_members: unsupported, returning empty");
        Ok(vec![])
    }

    async fn search_for_user_by_attribute(
        &self,
        name: &str,
        _value: &str,
    ) -> FederationResult<Vec<FederatedUser>> {
        tracing::debug!(name, "search_for_user_by_attribute: unsupported, returning empty");
        Ok(vec![])
    }
}

impl CredentialInputValidator for SqlUserStorageProvider {
    fn supports_credential_type(&self, credential_type: &str) -> bool {
        credential_types::PASSWORD.ends_with(credential_type)
    }

    async fn is_configured_for(
        &self,
        _user: &FederatedUser,
        credential_type: &str,
    ) -> FederationResult<bool> {
        // The password column always exists; support implies configured.
        Ok(self.supports_credential_type(credential_type))
    }

    async fn is_valid(
        &self,
        user: &FederatedUser,
        input: &CredentialInput,
    ) -> FederationResult<bool> {
        tracing::debug!(
            user = %user.id,
            credential_type = %input.credential_type,
            enabled = user.enabled,
            "is_valid"
        );
        if !self.supports_credential_type(&input.credential_type) {
            return Ok(false);
        }

        let sid = StorageId::parse(&user.id)?;
        let stored: Option<Option<String>> = sqlx::query_scalar(queries::SELECT_PASSWORD_BY_ID)
            .bind(sid.external_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        match stored.flatten() {
            Some(hash) => Ok(crate::password::verify_password(
                &input.challenge_response,
                &hash,
            )),
            None => Ok(false),
        }
    }
}

impl CredentialInputUpdater for SqlUserStorageProvider {
    async fn update_credential(
        &self,
        user: &FederatedUser,
        input: &CredentialInput,
    ) -> FederationResult<bool> {
        tracing::debug!(
            user = %user.id,
            credential_type = %input.credential_type,
            "update_credential"
        );
        if !self.supports_credential_type(&input.credential_type) {
            return Ok(false);
        }

        let sid = StorageId::parse(&user.id)?;
        let hash = crate::password::hash_password(&input.challenge_response)?;

        let result = sqlx::query(queries::UPDATE_PASSWORD_BY_ID)
            .bind(hash)
            .bind(sid.external_id())
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn disable_credential_type(
        &self,
        user: &FederatedUser,
        credential_type: &str,
    ) -> FederationResult<()> {
        // Nothing to disable against this schema.
        tracing::debug!(user = %user.id, credential_type, "disable_credential_type: no-op");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The pool is lazy, so a provider can be built against an address
    // nothing listens on; tests below only exercise paths that never
    // issue a query.
    fn unreachable_provider() -> SqlUserStorageProvider {
        let config = SqlStoreConfig::builder()
            .provider_id("legacy-sql")
            .url("mysql://127.0.0.1:1/accounts")
            .build()
            .unwrap();
        SqlUserStorageProvider::new(config, "portal").unwrap()
    }

    #[tokio::test]
    async fn supports_only_the_password_type() {
        let provider = unreachable_provider();

        assert!(provider.supports_credential_type("password"));
        assert!(!provider.supports_credential_type("otp"));
        assert!(!provider.supports_credential_type("webauthn"));
    }

    #[tokio::test]
    async fn supports_matches_by_suffix() {
        // The gate compares the tail of the reference type name, so any
        // suffix of "password" passes.
        let provider = unreachable_provider();

        assert!(provider.supports_credential_type("word"));
        assert!(!provider.supports_credential_type("passwords"));
    }

    #[tokio::test]
    async fn is_configured_for_mirrors_supports() {
        let provider = unreachable_provider();
        let user = FederatedUser::new("f:legacy-sql:42", "42");

        assert!(provider.is_configured_for(&user, "password").await.unwrap());
        assert!(!provider.is_configured_for(&user, "otp").await.unwrap());
    }

    #[tokio::test]
    async fn unsupported_type_short_circuits_validation() {
        let provider = unreachable_provider();
        let user = FederatedUser::new("f:legacy-sql:42", "42");
        let input = CredentialInput::new("otp", "123456");

        // Must return false without touching the store: the pool points
        // at a closed port, so any query would error instead.
        assert!(!provider.is_valid(&user, &input).await.unwrap());
    }

    #[tokio::test]
    async fn unsupported_type_short_circuits_update() {
        let provider = unreachable_provider();
        let user = FederatedUser::new("f:legacy-sql:42", "42");
        let input = CredentialInput::new("otp", "123456");

        assert!(!provider.update_credential(&user, &input).await.unwrap());
    }

    #[tokio::test]
    async fn username_lookup_is_always_absent() {
        let provider = unreachable_provider();

        let result = provider.get_user_by_username("jdoe").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn group_and_attribute_queries_are_empty() {
        let provider = unreachable_provider();

        assert!(provider.group_members("g1", 0, 50).await.unwrap().is_empty());
        assert!(provider
            .search_for_user_by_attribute("department", "eng")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn nothing_is_disableable() {
        let provider = unreachable_provider();
        let user = FederatedUser::new("f:legacy-sql:42", "42");

        assert!(provider.disableable_credential_types(&user).is_empty());
        provider
            .disable_credential_type(&user, "password")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn malformed_user_id_is_a_key_error() {
        let provider = unreachable_provider();
        let user = FederatedUser::new("not-a-storage-key", "42");
        let input = CredentialInput::password("s3cret");

        let err = provider.is_valid(&user, &input).await.unwrap_err();
        assert!(err.is_call_error());
    }

    #[tokio::test]
    async fn lookup_by_malformed_key_fails_before_querying() {
        let provider = unreachable_provider();

        let err = provider.get_user_by_id("42").await.unwrap_err();
        assert!(matches!(
            err,
            idb_federation::FederationError::InvalidStorageKey(_)
        ));
    }
}
