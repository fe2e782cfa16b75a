//! Role membership resolution.

use std::collections::HashSet;

use idb_federation::FederationResult;
use idb_model::ExternalRole;
use sqlx::MySqlPool;

use crate::convert::role_from_row;
use crate::entities::RoleRow;
use crate::error::from_sqlx_error;
use crate::queries;

/// Resolves role memberships for individual users.
///
/// Each resolution issues one join query across the membership and roles
/// tables; every resulting row becomes a role bound to the client context
/// the lookup ran under. Duplicate membership rows collapse via the role
/// set's (id, client) equality.
pub struct RoleResolver<'a> {
    pool: &'a MySqlPool,
}

impl<'a> RoleResolver<'a> {
    /// Creates a resolver over the given pool.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Loads the roles held by the user with the given external id,
    /// bound to `client_id`.
    ///
    /// Returns an empty set, never an error, when no memberships exist.
    ///
    /// # Errors
    ///
    /// Returns a store error if the join query fails.
    pub async fn roles_for_external_id(
        &self,
        external_id: &str,
        client_id: &str,
    ) -> FederationResult<HashSet<ExternalRole>> {
        tracing::debug!(external_id, client_id, "resolving role memberships");

        let rows: Vec<RoleRow> = sqlx::query_as(queries::SELECT_ROLES_BY_USER_ID)
            .bind(external_id)
            .fetch_all(self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| role_from_row(client_id, row))
            .collect())
    }
}
