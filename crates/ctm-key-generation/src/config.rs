//! Key vault configuration
//!
//! The vault type is chosen once, at startup, from this configuration.
//!
//! # Example
//!
//! ```ignore
//! let config: KeyGenerationConfig = serde_json::from_str(r#"{
//!     "vault": { "type": "HASHICORP", "url": "https://vault:8200", "approlePath": "approle" }
//! }"#)?;
//! config.validate()?;
//! ```

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Supported vault backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyVaultType {
    Azure,
    Hashicorp,
    Aws,
}

impl fmt::Display for KeyVaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyVaultType::Azure => f.write_str("AZURE"),
            KeyVaultType::Hashicorp => f.write_str("HASHICORP"),
            KeyVaultType::Aws => f.write_str("AWS"),
        }
    }
}

/// Connection settings for one vault backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyVaultConfig {
    #[serde(rename_all = "camelCase")]
    Azure { url: String },
    #[serde(rename_all = "camelCase")]
    Hashicorp {
        url: String,
        #[serde(default = "default_approle_path")]
        approle_path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tls_key_store_path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tls_trust_store_path: Option<PathBuf>,
    },
    #[serde(rename_all = "camelCase")]
    Aws {
        /// Endpoint override; the SDK default is used when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },
}

fn default_approle_path() -> String {
    "approle".to_string()
}

impl KeyVaultConfig {
    pub fn vault_type(&self) -> KeyVaultType {
        match self {
            KeyVaultConfig::Azure { .. } => KeyVaultType::Azure,
            KeyVaultConfig::Hashicorp { .. } => KeyVaultType::Hashicorp,
            KeyVaultConfig::Aws { .. } => KeyVaultType::Aws,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// * `ConfigError::InvalidUrl` - missing or non-http(s) URL
    /// * `ConfigError::MissingApprolePath` - empty Hashicorp approle path
    /// * `ConfigError::IncompleteTlsConfig` - only one TLS store configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            KeyVaultConfig::Azure { url } => validate_url(url),
            KeyVaultConfig::Hashicorp {
                url,
                approle_path,
                tls_key_store_path,
                tls_trust_store_path,
            } => {
                validate_url(url)?;
                if approle_path.trim().is_empty() {
                    return Err(ConfigError::MissingApprolePath);
                }
                if tls_key_store_path.is_some() != tls_trust_store_path.is_some() {
                    return Err(ConfigError::IncompleteTlsConfig);
                }
                Ok(())
            }
            KeyVaultConfig::Aws { endpoint } => match endpoint {
                Some(endpoint) => validate_url(endpoint),
                None => Ok(()),
            },
        }
    }
}

/// Vault endpoints must be absolute `http`/`https` URLs with a host.
fn validate_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidUrl(raw.to_string());
    let url = Url::parse(raw).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Key generation configuration. Without a vault, keys are returned inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<KeyVaultConfig>,
}

impl KeyGenerationConfig {
    pub fn with_vault(mut self, vault: KeyVaultConfig) -> Self {
        self.vault = Some(vault);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vault.as_ref().map_or(Ok(()), KeyVaultConfig::validate)
    }
}
