//! Database row types.
//!
//! These map result rows column-by-name and are converted to domain
//! models in `convert.rs`. A query whose result set lacks one of these
//! columns fails row extraction, which surfaces as an invalid-data error
//! through `error::from_sqlx_error`.

use sqlx::FromRow;

/// One row of the legacy `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    /// External id. The legacy schema addresses rows through string keys.
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Inverse enabled flag: zero means the account may authenticate.
    pub is_locked: i32,
}

/// One row of the role-membership join.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: String,
    pub role_code: String,
    pub name: String,
    pub description: Option<String>,
}
