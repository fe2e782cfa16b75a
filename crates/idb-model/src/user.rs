//! Federated user domain model.
//!
//! A federated user is the normalized view of one row in the external
//! account table. Records live for the duration of a single broker request;
//! nothing in this crate caches or persists them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::role::ExternalRole;

/// A user sourced from the external account store.
///
/// The record is immutable once mapped, with one exception: the role set
/// is populated exactly once after construction, because role memberships
/// come from a separate join query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedUser {
    // === Identity ===
    /// Broker-global composite identifier (`f:<provider>:<external id>`).
    pub id: String,
    /// Identifier of this user within the external store.
    pub external_id: String,

    // === Profile ===
    /// Email address. Treated as unique by lookup even though the legacy
    /// schema does not enforce it.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,

    // === State ===
    /// Whether the account may authenticate. Derived from the inverse of
    /// the store's locked flag.
    pub enabled: bool,

    // === Roles ===
    /// Externally-managed role memberships. Empty until a role resolver
    /// attaches them; list/search results leave this empty by contract.
    pub roles: HashSet<ExternalRole>,
}

impl FederatedUser {
    /// Creates a new enabled user with the given broker id and external id.
    #[must_use]
    pub fn new(id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external_id: external_id.into(),
            email: None,
            first_name: None,
            last_name: None,
            enabled: true,
            roles: HashSet::new(),
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Sets whether the account is enabled.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Attaches role memberships. Duplicates (by role id and client
    /// context) collapse via set semantics.
    pub fn add_roles(&mut self, roles: impl IntoIterator<Item = ExternalRole>) {
        self.roles.extend(roles);
    }

    /// Gets the user's full name, if any name parts are present.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Checks whether the user holds a role with the given code.
    #[must_use]
    pub fn has_role_code(&self, code: &str) -> bool {
        self.roles.iter().any(|r| r.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_defaults() {
        let user = FederatedUser::new("f:sql:42", "42");

        assert_eq!(user.id, "f:sql:42");
        assert_eq!(user.external_id, "42");
        assert!(user.enabled);
        assert!(user.email.is_none());
        assert!(user.roles.is_empty());
    }

    #[test]
    fn builder_pattern_works() {
        let user = FederatedUser::new("f:sql:7", "7")
            .with_email("jane@example.com")
            .with_first_name("Jane")
            .with_last_name("Doe")
            .with_enabled(false);

        assert_eq!(user.email, Some("jane@example.com".to_string()));
        assert_eq!(user.full_name(), Some("Jane Doe".to_string()));
        assert!(!user.enabled);
    }

    #[test]
    fn full_name_handles_partial() {
        let first_only = FederatedUser::new("f:sql:1", "1").with_first_name("Jane");
        assert_eq!(first_only.full_name(), Some("Jane".to_string()));

        let last_only = FederatedUser::new("f:sql:2", "2").with_last_name("Doe");
        assert_eq!(last_only.full_name(), Some("Doe".to_string()));

        let neither = FederatedUser::new("f:sql:3", "3");
        assert_eq!(neither.full_name(), None);
    }

    #[test]
    fn add_roles_collapses_duplicates() {
        let mut user = FederatedUser::new("f:sql:42", "42");

        let admin = ExternalRole::new("1", "ADMIN", "Administrator", "portal");
        let admin_again = ExternalRole::new("1", "ADMIN", "Administrator", "portal");
        let viewer = ExternalRole::new("2", "VIEWER", "Viewer", "portal");

        user.add_roles([admin, admin_again, viewer]);

        assert_eq!(user.roles.len(), 2);
        assert!(user.has_role_code("ADMIN"));
        assert!(user.has_role_code("VIEWER"));
        assert!(!user.has_role_code("AUDITOR"));
    }
}
