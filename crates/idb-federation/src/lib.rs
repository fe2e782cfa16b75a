//! # idb-federation
//!
//! Federation framework for the identity bridge.
//!
//! This crate defines the capability traits a user storage provider
//! implements for the broker, the composite storage-key codec that maps
//! broker-global identifiers back to rows in one external system, and the
//! error taxonomy shared by all providers.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod provider;
pub mod storage_id;

pub use error::{FederationError, FederationResult};
pub use provider::{
    CredentialInputUpdater, CredentialInputValidator, UserLookupProvider, UserQueryProvider,
};
pub use storage_id::StorageId;
