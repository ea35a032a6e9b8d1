//! # Key Generation Errors

use crate::config::KeyVaultType;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Invalid vault configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Vault URL must be an http(s) URL, got '{0}'")]
    InvalidUrl(String),

    #[error("Hashicorp approle path must not be empty")]
    MissingApprolePath,

    #[error("TLS key store and trust store must both be set or both be absent")]
    IncompleteTlsConfig,
}

/// Failures reported by a vault backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    /// Secret data was built for a different backend.
    #[error("{actual} secret data sent to a {expected} vault")]
    WrongSecretData {
        expected: KeyVaultType,
        actual: KeyVaultType,
    },

    /// The vault returned a version that is not a Hashicorp KV version number.
    #[error("Secret '{name}' stored with unreadable version '{version}'")]
    InvalidVersion { name: String, version: String },

    #[error("Vault backend error: {0}")]
    Backend(String),
}

/// Errors returned by key generators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyGenError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Vault operation failed: {0}")]
    Vault(#[from] VaultError),

    #[error("Key material invalid: {0}")]
    Crypto(#[from] CryptoError),

    /// No service provider is registered for the configured backend.
    #[error("No key vault service available for {0}")]
    UnsupportedVault(KeyVaultType),

    /// A vault-stored key pair was loaded without a vault.
    #[error("Key pair is stored in a {0} vault but no vault service was given")]
    VaultRequired(KeyVaultType),
}
