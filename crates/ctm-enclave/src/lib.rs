//! # Enclave Boundary
//!
//! Owns all private key material and performs every cryptographic transform
//! for the confidential transaction manager.
//!
//! ## Architecture
//!
//! - **API** (`api.rs`): the `Enclave` trait consumed by the transaction
//!   manager, and `EnclaveError`
//! - **Local enclave** (`local.rs`): in-process implementation backed by
//!   `shared-crypto`
//! - **Config** (`config.rs`): forwarding keys, validated at startup
//!
//! ## Error Discrimination
//!
//! `EnclaveError::WrongKey` is the only "keep searching" condition. Every
//! other variant is a real fault and must not be swallowed by callers that
//! trial-decrypt with several keys.
//!
//! ## Security Notes
//!
//! - Decrypted plaintext is returned only on success; no partial output is
//!   produced on failure
//! - Private keys never leave this crate's types

pub mod api;
pub mod config;
pub mod local;

pub use api::{Enclave, EnclaveError};
pub use config::EnclaveConfig;
pub use local::LocalEnclave;
