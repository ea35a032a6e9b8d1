//! In-memory vault for tests and development.
//!
//! Every secret keeps all of its versions. Azure and AWS secrets are stored
//! under a single `value` field.

use crate::config::{KeyVaultConfig, KeyVaultType};
use crate::domain::entities::{GetSecretData, SecretReference, SetSecretData};
use crate::domain::errors::{KeyGenError, VaultError};
use crate::ports::{KeyVaultService, KeyVaultServiceProvider};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const VALUE_FIELD: &str = "value";

type Versions = Vec<BTreeMap<String, String>>;

/// `KeyVaultService` holding secrets in process memory.
#[derive(Debug)]
pub struct InMemoryKeyVault {
    vault_type: KeyVaultType,
    secrets: RwLock<HashMap<String, Versions>>,
}

impl InMemoryKeyVault {
    pub fn new(vault_type: KeyVaultType) -> Self {
        Self {
            vault_type,
            secrets: RwLock::new(HashMap::new()),
        }
    }

    pub fn vault_type(&self) -> KeyVaultType {
        self.vault_type
    }

    /// Number of distinct secret paths stored.
    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.read().is_empty()
    }

    fn check_type(&self, actual: KeyVaultType) -> Result<(), VaultError> {
        if actual == self.vault_type {
            Ok(())
        } else {
            Err(VaultError::WrongSecretData {
                expected: self.vault_type,
                actual,
            })
        }
    }
}

#[async_trait]
impl KeyVaultService for InMemoryKeyVault {
    async fn set_secret(&self, data: SetSecretData) -> Result<SecretReference, VaultError> {
        self.check_type(data.vault_type())?;

        let (path, fields) = match data {
            SetSecretData::Azure { name, value } | SetSecretData::Aws { name, value } => {
                (name, BTreeMap::from([(VALUE_FIELD.to_string(), value)]))
            }
            SetSecretData::Hashicorp {
                engine,
                name,
                values,
            } => (format!("{engine}/{name}"), values),
        };

        let mut secrets = self.secrets.write();
        let versions = secrets.entry(path.clone()).or_default();
        versions.push(fields);

        Ok(SecretReference {
            name: path,
            version: versions.len().to_string(),
        })
    }

    async fn get_secret(&self, data: &GetSecretData) -> Result<String, VaultError> {
        self.check_type(data.vault_type())?;

        let (path, field, version) = match data {
            GetSecretData::Azure { name, version } => {
                let version = version
                    .as_deref()
                    .map(|v| {
                        v.parse::<usize>()
                            .map_err(|_| VaultError::Backend(format!("invalid version '{v}'")))
                    })
                    .transpose()?;
                (name.clone(), VALUE_FIELD, version)
            }
            GetSecretData::Aws { name } => (name.clone(), VALUE_FIELD, None),
            GetSecretData::Hashicorp {
                engine,
                name,
                field,
                version,
            } => (
                format!("{engine}/{name}"),
                field.as_str(),
                version.map(|v| v as usize),
            ),
        };

        let secrets = self.secrets.read();
        let versions = secrets
            .get(&path)
            .ok_or_else(|| VaultError::SecretNotFound(path.clone()))?;

        let fields = match version {
            Some(v) => v.checked_sub(1).and_then(|i| versions.get(i)),
            None => versions.last(),
        }
        .ok_or_else(|| VaultError::SecretNotFound(path.clone()))?;

        fields
            .get(field)
            .cloned()
            .ok_or_else(|| VaultError::SecretNotFound(format!("{path}#{field}")))
    }
}

/// Hands out one shared `InMemoryKeyVault` per vault type.
#[derive(Debug, Default)]
pub struct InMemoryKeyVaultProvider {
    vaults: Mutex<HashMap<KeyVaultType, Arc<InMemoryKeyVault>>>,
}

impl InMemoryKeyVaultProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vault created for `vault_type`, creating it if needed.
    pub fn vault(&self, vault_type: KeyVaultType) -> Arc<InMemoryKeyVault> {
        self.vaults
            .lock()
            .entry(vault_type)
            .or_insert_with(|| Arc::new(InMemoryKeyVault::new(vault_type)))
            .clone()
    }
}

impl KeyVaultServiceProvider for InMemoryKeyVaultProvider {
    fn create(&self, config: &KeyVaultConfig) -> Result<Arc<dyn KeyVaultService>, KeyGenError> {
        Ok(self.vault(config.vault_type()))
    }
}
