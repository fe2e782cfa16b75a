//! External role domain model.
//!
//! Roles come from the external store's `roles` table and are scoped to
//! the broker client the lookup ran under.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A role membership sourced from the external store.
///
/// Two roles are equal iff their role id and bound client context match;
/// the remaining fields are display data and do not participate in
/// equality. This is what lets a `HashSet` collapse duplicate membership
/// rows.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ExternalRole {
    /// Role identifier within the external store.
    pub id: String,
    /// Stable machine-readable role code (e.g. `ROLE_ADMIN`).
    pub code: String,
    /// Human-readable display name.
    pub name: String,
    /// Optional description from the roles table.
    pub description: Option<String>,
    /// Broker client this role is bound to.
    pub client_id: String,
}

impl ExternalRole {
    /// Creates a new role bound to the given client context.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            description: None,
            client_id: client_id.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl PartialEq for ExternalRole {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.client_id == other.client_id
    }
}

impl Hash for ExternalRole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.client_id.hash(state);
    }
}
