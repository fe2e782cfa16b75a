//! Row to domain model conversion.

use idb_federation::{FederationResult, StorageId};
use idb_model::{ExternalRole, FederatedUser};

use crate::entities::{RoleRow, UserRow};

/// Converts a user row into a federated user record.
///
/// The record's broker-global id is the composite key of the owning
/// provider and the row's id; `enabled` is the inverse of the locked
/// flag. The role set starts empty and is attached by the caller where
/// the contract requires it.
pub fn user_from_row(provider_id: &str, row: UserRow) -> FederationResult<FederatedUser> {
    let storage_id = StorageId::new(provider_id, &row.id)?;

    let mut user =
        FederatedUser::new(storage_id.id(), row.id).with_enabled(row.is_locked == 0);
    user.email = row.email;
    user.first_name = row.first_name;
    user.last_name = row.last_name;

    Ok(user)
}

/// Converts a role row into a role record bound to the given client
/// context.
pub fn role_from_row(client_id: &str, row: RoleRow) -> ExternalRole {
    let mut role = ExternalRole::new(row.id, row.role_code, row.name, client_id);
    role.description = row.description;
    role
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_unlocked_row_to_enabled_user() {
        let row = UserRow {
            id: "42".to_string(),
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            email: Some("a@x.com".to_string()),
            is_locked: 0,
        };

        let user = user_from_row("legacy-sql", row).unwrap();

        assert_eq!(user.id, "f:legacy-sql:42");
        assert_eq!(user.external_id, "42");
        assert_eq!(user.email, Some("a@x.com".to_string()));
        assert_eq!(user.first_name, Some("A".to_string()));
        assert_eq!(user.last_name, Some("B".to_string()));
        assert!(user.enabled);
        assert!(user.roles.is_empty());
    }

    #[test]
    fn maps_locked_row_to_disabled_user() {
        let row = UserRow {
            id: "43".to_string(),
            first_name: None,
            last_name: None,
            email: None,
            is_locked: 1,
        };

        let user = user_from_row("legacy-sql", row).unwrap();
        assert!(!user.enabled);
    }

    #[test]
    fn binds_role_to_client_context() {
        let row = RoleRow {
            id: "9".to_string(),
            role_code: "ROLE_AUDITOR".to_string(),
            name: "Auditor".to_string(),
            description: Some("read-only access".to_string()),
        };

        let role = role_from_row("portal", row);

        assert_eq!(role.id, "9");
        assert_eq!(role.code, "ROLE_AUDITOR");
        assert_eq!(role.client_id, "portal");
        assert_eq!(role.description, Some("read-only access".to_string()));
    }
}
