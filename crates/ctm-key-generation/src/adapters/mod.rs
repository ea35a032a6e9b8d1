//! # Adapters Layer
//!
//! - `InMemoryKeyVault`: `KeyVaultService` over process memory
//! - `InMemoryKeyVaultProvider`: one in-memory vault per vault type

pub mod in_memory;

pub use in_memory::{InMemoryKeyVault, InMemoryKeyVaultProvider};
