//! # Key Generators
//!
//! - `LocalKeyGenerator`: returns both key halves inline
//! - `VaultKeyGenerator`: stores both halves in a vault and returns their
//!   locations
//!
//! Generated keys are secp256k1 key-agreement pairs as used by the local
//! enclave. Public keys are base64 of the compressed point; private keys are
//! base64 of the 32-byte scalar.

use crate::config::KeyVaultType;
use crate::domain::entities::{ConfigKeyPair, GeneratedKeyPair, GetSecretData, SetSecretData};
use crate::domain::errors::{KeyGenError, VaultError};
use crate::ports::KeyVaultService;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared_crypto::{CryptoError, KeyAgreementKeyPair};
use shared_types::PublicKey;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::Span;
use zeroize::Zeroizing;

const HASHICORP_ENGINE: &str = "kv";
const PUBLIC_FIELD: &str = "publicKey";
const PRIVATE_FIELD: &str = "privateKey";

/// Generates a new key pair named `name`.
#[async_trait]
pub trait KeyGenerator: Send + Sync {
    async fn generate(&self, name: &str) -> Result<GeneratedKeyPair, KeyGenError>;
}

fn encode_pair(pair: &KeyAgreementKeyPair) -> (PublicKey, String, Zeroizing<String>) {
    let public_key = PublicKey::from_bytes(pair.public_key());
    let secret = Zeroizing::new(pair.to_bytes());
    (
        public_key,
        public_key.encode_to_base64(),
        Zeroizing::new(STANDARD.encode(secret.as_slice())),
    )
}

/// Key generator with no vault.
#[derive(Debug)]
pub struct LocalKeyGenerator {
    span: Span,
}

impl LocalKeyGenerator {
    pub fn new() -> Self {
        Self { span: Span::none() }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Default for LocalKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyGenerator for LocalKeyGenerator {
    async fn generate(&self, name: &str) -> Result<GeneratedKeyPair, KeyGenError> {
        let pair = KeyAgreementKeyPair::generate();
        let (public_key, public_text, private_text) = encode_pair(&pair);

        tracing::info!(parent: &self.span, name, key = %public_key, "Generated key pair");

        Ok(GeneratedKeyPair {
            config_key_pair: ConfigKeyPair::Direct {
                public_key: public_text,
                private_key: private_text.to_string(),
            },
            public_key,
        })
    }
}

/// Key generator storing both halves in a vault.
///
/// Azure and AWS hold two secrets, `<name>Pub` and `<name>Key`. Hashicorp
/// holds one secret at `kv/<name>` with `publicKey` and `privateKey` fields.
pub struct VaultKeyGenerator {
    vault: Arc<dyn KeyVaultService>,
    vault_type: KeyVaultType,
    span: Span,
}

impl VaultKeyGenerator {
    pub fn new(vault: Arc<dyn KeyVaultService>, vault_type: KeyVaultType) -> Self {
        Self {
            vault,
            vault_type,
            span: Span::none(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn vault_type(&self) -> KeyVaultType {
        self.vault_type
    }

    // Azure and AWS only; Hashicorp stores both halves in one secret.
    async fn store_named(&self, name: String, value: String) -> Result<GetSecretData, KeyGenError> {
        if self.vault_type == KeyVaultType::Aws {
            self.vault
                .set_secret(SetSecretData::Aws {
                    name: name.clone(),
                    value,
                })
                .await?;
            return Ok(GetSecretData::Aws { name });
        }

        let reference = self
            .vault
            .set_secret(SetSecretData::Azure {
                name: name.clone(),
                value,
            })
            .await?;
        Ok(GetSecretData::Azure {
            name,
            version: Some(reference.version),
        })
    }
}

#[async_trait]
impl KeyGenerator for VaultKeyGenerator {
    async fn generate(&self, name: &str) -> Result<GeneratedKeyPair, KeyGenError> {
        let pair = KeyAgreementKeyPair::generate();
        let (public_key, public_text, private_text) = encode_pair(&pair);

        let config_key_pair = match self.vault_type {
            KeyVaultType::Hashicorp => {
                let values = BTreeMap::from([
                    (PUBLIC_FIELD.to_string(), public_text),
                    (PRIVATE_FIELD.to_string(), private_text.to_string()),
                ]);
                let reference = self
                    .vault
                    .set_secret(SetSecretData::Hashicorp {
                        engine: HASHICORP_ENGINE.to_string(),
                        name: name.to_string(),
                        values,
                    })
                    .await?;
                let version = reference.version.parse::<u32>().map_err(|_| {
                    VaultError::InvalidVersion {
                        name: reference.name.clone(),
                        version: reference.version.clone(),
                    }
                })?;
                let location = |field: &str| GetSecretData::Hashicorp {
                    engine: HASHICORP_ENGINE.to_string(),
                    name: name.to_string(),
                    field: field.to_string(),
                    version: Some(version),
                };
                ConfigKeyPair::Vault {
                    public_key: location(PUBLIC_FIELD),
                    private_key: location(PRIVATE_FIELD),
                }
            }
            KeyVaultType::Azure | KeyVaultType::Aws => ConfigKeyPair::Vault {
                public_key: self.store_named(format!("{name}Pub"), public_text).await?,
                private_key: self
                    .store_named(format!("{name}Key"), private_text.to_string())
                    .await?,
            },
        };

        tracing::info!(
            parent: &self.span,
            name,
            vault = %self.vault_type,
            key = %public_key,
            "Generated key pair and stored it in vault"
        );

        Ok(GeneratedKeyPair {
            config_key_pair,
            public_key,
        })
    }
}

/// Load the key-agreement pair described by `config_key_pair`.
///
/// # Errors
/// * `KeyGenError::VaultRequired` - vault-stored pair and no `vault`
/// * `KeyGenError::Vault` - the vault could not return the private key
/// * `KeyGenError::Crypto` - the private key is not valid
pub async fn load_key_pair(
    config_key_pair: &ConfigKeyPair,
    vault: Option<&dyn KeyVaultService>,
) -> Result<KeyAgreementKeyPair, KeyGenError> {
    let private_text = match config_key_pair {
        ConfigKeyPair::Direct { private_key, .. } => Zeroizing::new(private_key.clone()),
        ConfigKeyPair::Vault { private_key, .. } => {
            let vault = vault.ok_or(KeyGenError::VaultRequired(private_key.vault_type()))?;
            Zeroizing::new(vault.get_secret(private_key).await?)
        }
    };

    let private_bytes = Zeroizing::new(
        STANDARD
            .decode(private_text.as_bytes())
            .map_err(|_| CryptoError::InvalidPrivateKey)?,
    );
    Ok(KeyAgreementKeyPair::from_bytes(&private_bytes)?)
}
