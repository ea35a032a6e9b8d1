//! # Domain Entities
//!
//! Generated key pairs and the secret descriptors exchanged with vault
//! backends.

use crate::config::KeyVaultType;
use serde::{Deserialize, Serialize};
use shared_types::PublicKey;
use std::collections::BTreeMap;
use std::fmt;

/// Key pair in the form written to node configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigKeyPair {
    /// Both halves inline, base64 encoded.
    #[serde(rename_all = "camelCase")]
    Direct {
        public_key: String,
        private_key: String,
    },
    /// Both halves held by a vault; only their locations are kept.
    #[serde(rename_all = "camelCase")]
    Vault {
        public_key: GetSecretData,
        private_key: GetSecretData,
    },
}

impl ConfigKeyPair {
    /// Backend holding the key pair, `None` for inline keys.
    pub fn vault_type(&self) -> Option<KeyVaultType> {
        match self {
            ConfigKeyPair::Direct { .. } => None,
            ConfigKeyPair::Vault { private_key, .. } => Some(private_key.vault_type()),
        }
    }
}

impl fmt::Debug for ConfigKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKeyPair::Direct { public_key, .. } => f
                .debug_struct("Direct")
                .field("public_key", public_key)
                .field("private_key", &"<redacted>")
                .finish(),
            ConfigKeyPair::Vault {
                public_key,
                private_key,
            } => f
                .debug_struct("Vault")
                .field("public_key", public_key)
                .field("private_key", private_key)
                .finish(),
        }
    }
}

/// Output of a key generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedKeyPair {
    pub config_key_pair: ConfigKeyPair,
    pub public_key: PublicKey,
}

/// A secret to store.
#[derive(Clone, PartialEq, Eq)]
pub enum SetSecretData {
    /// One named secret.
    Azure { name: String, value: String },
    /// Several fields stored at one path of a KV secret engine.
    Hashicorp {
        engine: String,
        name: String,
        values: BTreeMap<String, String>,
    },
    Aws { name: String, value: String },
}

impl SetSecretData {
    pub fn vault_type(&self) -> KeyVaultType {
        match self {
            SetSecretData::Azure { .. } => KeyVaultType::Azure,
            SetSecretData::Hashicorp { .. } => KeyVaultType::Hashicorp,
            SetSecretData::Aws { .. } => KeyVaultType::Aws,
        }
    }
}

impl fmt::Debug for SetSecretData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetSecretData::Azure { name, .. } => {
                f.debug_struct("Azure").field("name", name).finish_non_exhaustive()
            }
            SetSecretData::Hashicorp {
                engine,
                name,
                values,
            } => f
                .debug_struct("Hashicorp")
                .field("engine", engine)
                .field("name", name)
                .field("fields", &values.keys().collect::<Vec<_>>())
                .finish_non_exhaustive(),
            SetSecretData::Aws { name, .. } => {
                f.debug_struct("Aws").field("name", name).finish_non_exhaustive()
            }
        }
    }
}

/// Location of a stored secret.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "vault", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GetSecretData {
    Azure {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
    },
    Hashicorp {
        engine: String,
        name: String,
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<u32>,
    },
    Aws { name: String },
}

impl GetSecretData {
    pub fn vault_type(&self) -> KeyVaultType {
        match self {
            GetSecretData::Azure { .. } => KeyVaultType::Azure,
            GetSecretData::Hashicorp { .. } => KeyVaultType::Hashicorp,
            GetSecretData::Aws { .. } => KeyVaultType::Aws,
        }
    }
}

/// Identity of a secret version created by `set_secret`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretReference {
    pub name: String,
    pub version: String,
}
