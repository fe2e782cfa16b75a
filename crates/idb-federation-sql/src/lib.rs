//! # idb-federation-sql
//!
//! SQL user storage provider for the identity bridge.
//!
//! Bridges a legacy relational account schema (a `users` table plus a
//! `roles`/`role_user` membership pair) into the broker's federation
//! interfaces: lookup, paged querying, and password validation/rotation
//! against the schema's legacy hash format.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod connection;
mod convert;
mod entities;
mod error;
pub mod password;
pub mod provider;
mod queries;
pub mod roles;

pub use config::SqlStoreConfig;
pub use provider::SqlUserStorageProvider;
