//! Credential input model.
//!
//! The broker hands a credential input to the provider at validation and
//! update time. The challenge response is a plaintext secret: it is never
//! persisted by this subsystem beyond the single call, and must never be
//! logged.

use serde::{Deserialize, Serialize};

/// Well-known credential type names used by the broker.
pub mod credential_types {
    /// Password credential type.
    pub const PASSWORD: &str = "password";
    /// One-time-password credential type.
    pub const OTP: &str = "otp";
}

/// A credential supplied by the broker for validation or update.
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialInput {
    /// Broker-defined credential type tag.
    pub credential_type: String,
    /// Opaque plaintext secret (e.g. the password being checked or set).
    pub challenge_response: String,
}

impl CredentialInput {
    /// Creates a new credential input.
    #[must_use]
    pub fn new(credential_type: impl Into<String>, challenge_response: impl Into<String>) -> Self {
        Self {
            credential_type: credential_type.into(),
            challenge_response: challenge_response.into(),
        }
    }

    /// Creates a password credential input.
    #[must_use]
    pub fn password(challenge_response: impl Into<String>) -> Self {
        Self::new(credential_types::PASSWORD, challenge_response)
    }
}

// The challenge response is a secret; keep it out of debug output.
impl std::fmt::Debug for CredentialInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialInput")
            .field("credential_type", &self.credential_type)
            .field("challenge_response", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_constructor_sets_type() {
        let input = CredentialInput::password("s3cret");

        assert_eq!(input.credential_type, credential_types::PASSWORD);
        assert_eq!(input.challenge_response, "s3cret");
    }

    #[test]
    fn debug_redacts_secret() {
        let input = CredentialInput::password("s3cret");
        let rendered = format!("{input:?}");

        assert!(rendered.contains("password"));
        assert!(!rendered.contains("s3cret"));
    }
}
