//! Parameterized query set for the legacy schema.
//!
//! Every provider operation runs exactly one of these statements.
//! Parameter order is part of the contract and must match the bind order
//! in `provider.rs` and `roles.rs`.

/// Finds one user by external id.
pub const SELECT_USER_BY_ID: &str =
    "select id, first_name, last_name, email, is_locked from users where id = ?";

/// Finds one user by exact email match.
pub const SELECT_USER_BY_EMAIL: &str =
    "select id, first_name, last_name, email, is_locked from users where email = ?";

/// One page of users, ordered by external id ascending. Binds: limit,
/// offset.
pub const SELECT_USERS_LIMIT: &str =
    "select id, first_name, last_name, email, is_locked from users order by id limit ? offset ?";

/// Email substring search with the caller's LIKE pattern. Binds: pattern,
/// limit, offset.
pub const SEARCH_USERS_BY_EMAIL: &str =
    "select id, first_name, last_name, email, is_locked from users where email like ? order by id limit ? offset ?";

/// Rotates the stored password hash. Binds: new hash, external id.
pub const UPDATE_PASSWORD_BY_ID: &str = "update users set password = ? where id = ?";

/// Loads the stored password hash for one user.
pub const SELECT_PASSWORD_BY_ID: &str = "select password from users where id = ?";

/// Unfiltered user count.
pub const COUNT_USERS: &str = "select count(*) from users";

/// Role memberships for one user, joined against the roles table.
pub const SELECT_ROLES_BY_USER_ID: &str =
    "select r.id, r.role_code, r.name, r.description from role_user ru inner join roles r on r.id = ru.role_id where ru.user_id = ?";
