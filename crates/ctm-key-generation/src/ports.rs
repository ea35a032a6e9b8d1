//! # Outbound Ports
//!
//! Vault backends are reached only through these traits. Network clients for
//! Azure, Hashicorp and AWS live outside this crate.

use crate::config::KeyVaultConfig;
use crate::domain::entities::{GetSecretData, SecretReference, SetSecretData};
use crate::domain::errors::{KeyGenError, VaultError};
use async_trait::async_trait;
use std::sync::Arc;

/// Secret storage of one vault backend.
#[async_trait]
pub trait KeyVaultService: Send + Sync {
    /// Store a secret, returning the version created.
    async fn set_secret(&self, data: SetSecretData) -> Result<SecretReference, VaultError>;

    /// Read a secret value.
    async fn get_secret(&self, data: &GetSecretData) -> Result<String, VaultError>;
}

/// Builds the vault service for a validated configuration.
pub trait KeyVaultServiceProvider: Send + Sync {
    fn create(&self, config: &KeyVaultConfig) -> Result<Arc<dyn KeyVaultService>, KeyGenError>;
}
