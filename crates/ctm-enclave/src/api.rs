//! # Enclave API
//!
//! The narrow interface the transaction manager needs from the component
//! holding key material.

use shared_types::{EncodedPayload, PrivacyMetaData, PublicKey};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by an enclave.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnclaveError {
    /// The key is held locally but the payload was not encrypted for it.
    #[error("Key {0} cannot open this payload")]
    WrongKey(PublicKey),

    /// The key is not held by this enclave.
    #[error("Key {0} is not held by this enclave")]
    UnknownKey(PublicKey),

    /// The payload is structurally invalid or its ciphertext is corrupted.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Encryption could not be performed (e.g. an invalid recipient key).
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Enclave-internal fault.
    #[error("Enclave fault: {0}")]
    Internal(String),

    /// Startup configuration rejected.
    #[error("Invalid enclave configuration: {0}")]
    InvalidConfig(String),
}

impl EnclaveError {
    /// Whether this failure only means "this key is not a recipient".
    pub fn is_wrong_key(&self) -> bool {
        matches!(self, EnclaveError::WrongKey(_))
    }
}

/// Enclave boundary.
///
/// Implementations must be thread-safe (`Send + Sync`); the key store is
/// read-only while the transaction manager is running.
pub trait Enclave: Send + Sync {
    /// Encrypt `message` from `sender` for every key in `recipients`,
    /// embedding `metadata`.
    ///
    /// # Errors
    /// * `EnclaveError::UnknownKey` - the sender's private key is not held
    /// * `EnclaveError::Encryption` - a recipient key is not a valid key
    fn encrypt_payload(
        &self,
        message: &[u8],
        sender: &PublicKey,
        recipients: &[PublicKey],
        metadata: &PrivacyMetaData,
    ) -> Result<EncodedPayload, EnclaveError>;

    /// Decrypt `payload` with the private key matching `key`.
    ///
    /// # Errors
    /// * `EnclaveError::WrongKey` - `key` is held but the payload has no box for it
    /// * `EnclaveError::UnknownKey` - `key` is not held
    /// * `EnclaveError::MalformedPayload` - the payload is corrupted, including
    ///   a box listed for `key` that fails to open
    fn unencrypt_transaction(
        &self,
        payload: &EncodedPayload,
        key: &PublicKey,
    ) -> Result<Vec<u8>, EnclaveError>;

    /// Public keys whose private keys are held, in a stable order.
    fn public_keys(&self) -> Vec<PublicKey>;

    /// Keys that must receive every outgoing transaction.
    fn forwarding_keys(&self) -> Vec<PublicKey>;
}

impl<T: Enclave + ?Sized> Enclave for Arc<T> {
    fn encrypt_payload(
        &self,
        message: &[u8],
        sender: &PublicKey,
        recipients: &[PublicKey],
        metadata: &PrivacyMetaData,
    ) -> Result<EncodedPayload, EnclaveError> {
        (**self).encrypt_payload(message, sender, recipients, metadata)
    }

    fn unencrypt_transaction(
        &self,
        payload: &EncodedPayload,
        key: &PublicKey,
    ) -> Result<Vec<u8>, EnclaveError> {
        (**self).unencrypt_transaction(payload, key)
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        (**self).public_keys()
    }

    fn forwarding_keys(&self) -> Vec<PublicKey> {
        (**self).forwarding_keys()
    }
}
