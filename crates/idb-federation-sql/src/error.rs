//! SQL error mapping.

use idb_federation::FederationError;
use sqlx::Error as SqlxError;

/// Converts a `SQLx` error into the federation taxonomy.
///
/// Missing or undecodable columns are data errors (the schema does not
/// match what the provider expects); everything else is a store error
/// carrying the driver's original message.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> FederationError {
    match err {
        SqlxError::ColumnNotFound(column) => {
            FederationError::invalid_data(format!("expected column '{column}' is absent"))
        }
        SqlxError::ColumnDecode { index, source } => FederationError::invalid_data(format!(
            "column '{index}' could not be decoded: {source}"
        )),
        _ => FederationError::store(err.to_string()),
    }
}
