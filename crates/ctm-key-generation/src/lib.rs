//! # Key Generation
//!
//! Provisions the key pairs the enclave holds. A key pair is either returned
//! inline or stored in a vault (Azure, Hashicorp, AWS), in which case only
//! the secret locations are returned.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): generated key pairs, secret descriptors,
//!   errors
//! - **Ports** (`ports.rs`): `KeyVaultService`, `KeyVaultServiceProvider`
//! - **Generators** (`generator.rs`, `factory.rs`): local and vault-backed
//!   generators, chosen once from `KeyGenerationConfig`
//! - **Adapters** (`adapters/`): in-memory vault
//!
//! Vault network clients and their authentication are provided by the
//! embedding application through `KeyVaultServiceProvider`.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod factory;
pub mod generator;
pub mod ports;

pub use adapters::{InMemoryKeyVault, InMemoryKeyVaultProvider};
pub use config::{KeyGenerationConfig, KeyVaultConfig, KeyVaultType};
pub use domain::entities::{
    ConfigKeyPair, GeneratedKeyPair, GetSecretData, SecretReference, SetSecretData,
};
pub use domain::errors::{ConfigError, KeyGenError, VaultError};
pub use factory::KeyGeneratorFactory;
pub use generator::{load_key_pair, KeyGenerator, LocalKeyGenerator, VaultKeyGenerator};
pub use ports::{KeyVaultService, KeyVaultServiceProvider};
