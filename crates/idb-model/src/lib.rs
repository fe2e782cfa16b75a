//! # idb-model
//!
//! Domain models for the identity bridge.
//!
//! This crate defines the normalized identity records a storage provider
//! hands back to the broker: federated users, their externally-managed
//! roles, and the credential input the broker supplies at validation time.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod credential;
pub mod role;
pub mod user;

pub use credential::CredentialInput;
pub use role::ExternalRole;
pub use user::FederatedUser;
