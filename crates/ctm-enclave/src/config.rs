//! Enclave configuration and validation

use crate::api::EnclaveError;
use serde::{Deserialize, Serialize};
use shared_types::PublicKey;

/// Enclave startup configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclaveConfig {
    /// Base64 public keys that receive every outgoing transaction.
    #[serde(default)]
    pub always_send_to: Vec<String>,
}

impl EnclaveConfig {
    /// Builder-style method to add a forwarding key
    pub fn with_forwarding_key(mut self, key: &PublicKey) -> Self {
        self.always_send_to.push(key.encode_to_base64());
        self
    }

    /// Parse and validate the forwarding keys.
    pub fn forwarding_keys(&self) -> Result<Vec<PublicKey>, EnclaveError> {
        self.always_send_to
            .iter()
            .map(|encoded| {
                PublicKey::from_base64(encoded).map_err(|e| {
                    EnclaveError::InvalidConfig(format!("forwarding key {encoded:?}: {e}"))
                })
            })
            .collect()
    }
}
