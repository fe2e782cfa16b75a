//! Legacy password hashing for compatibility with the existing schema.
//!
//! The account table predates the broker and stores bcrypt hashes in the
//! `$2y$` crypt notation written by the web framework that owns the
//! schema. New hashes must stay in that notation so the legacy
//! application keeps accepting them after a rotation.
//!
//! The broker's own credential store hashes with a modern memory-hard
//! algorithm; nothing in this module is appropriate outside this
//! interop boundary.

use bcrypt::Version;
use idb_federation::{FederationError, FederationResult};

/// Cost factor of the hashes already present in the store. Kept fixed so
/// rotated hashes stay interchangeable with the legacy application's own.
const LEGACY_COST: u32 = 10;

/// Hashes a plaintext credential into the legacy `$2y$` format.
///
/// The salt is generated internally; the output embeds salt and cost and
/// is re-verifiable by [`verify_password`]. Empty plaintexts are hashed
/// like any other string.
///
/// # Errors
///
/// Returns `FederationError::Store` if hashing itself fails (the only
/// causes are internal, e.g. the system RNG being unavailable).
pub fn hash_password(plaintext: &str) -> FederationResult<String> {
    let parts = bcrypt::hash_with_result(plaintext, LEGACY_COST)
        .map_err(|e| FederationError::store(format!("password hashing failed: {e}")))?;

    Ok(parts.format_for_version(Version::TwoY))
}

/// Verifies a plaintext credential against a stored legacy hash.
///
/// Returns `true` iff the plaintext re-hashes, under the salt and cost
/// embedded in `stored`, to `stored`. Malformed stored hashes verify as
/// `false` rather than erroring: a corrupt row is indistinguishable from
/// a wrong password by design of the legacy store.
#[must_use]
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    bcrypt::verify(plaintext, stored).unwrap_or(false)
}
