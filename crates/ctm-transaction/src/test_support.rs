//! Deterministic enclave stub shared by the unit tests.

use ctm_enclave::{Enclave, EnclaveError};
use parking_lot::Mutex;
use shared_types::{
    EncodedPayload, PrivacyMetaData, PublicKey, RecipientBox, SecurityHash, PUBLIC_KEY_LEN,
};

pub fn key(byte: u8) -> PublicKey {
    PublicKey::from_bytes([byte; PUBLIC_KEY_LEN])
}

/// Stores the message as cipher text and opens a payload for any key listed
/// in its recipient keys.
pub struct StubEnclave {
    local: Vec<PublicKey>,
    forwarding: Vec<PublicKey>,
    faulty: Option<PublicKey>,
    attempts: Mutex<Vec<PublicKey>>,
}

impl StubEnclave {
    pub fn new(local: Vec<PublicKey>) -> Self {
        Self {
            local,
            forwarding: Vec::new(),
            faulty: None,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_forwarding(mut self, forwarding: Vec<PublicKey>) -> Self {
        self.forwarding = forwarding;
        self
    }

    /// Decrypting with `key` fails with an internal fault.
    pub fn with_faulty_key(mut self, key: PublicKey) -> Self {
        self.faulty = Some(key);
        self
    }

    /// Keys passed to `unencrypt_transaction`, in call order.
    pub fn attempts(&self) -> Vec<PublicKey> {
        self.attempts.lock().clone()
    }
}

impl Enclave for StubEnclave {
    fn encrypt_payload(
        &self,
        message: &[u8],
        sender: &PublicKey,
        recipients: &[PublicKey],
        metadata: &PrivacyMetaData,
    ) -> Result<EncodedPayload, EnclaveError> {
        EncodedPayload::builder()
            .with_sender_key(*sender)
            .with_cipher_text(message.to_vec())
            .with_recipient_boxes(
                recipients
                    .iter()
                    .map(|key| RecipientBox::new(key.as_bytes().to_vec()))
                    .collect(),
            )
            .with_recipient_keys(recipients.to_vec())
            .with_privacy_mode(metadata.privacy_mode())
            .with_affected_contract_transactions(
                metadata
                    .affected_transactions()
                    .iter()
                    .map(|tx| (*tx.hash(), SecurityHash::new(vec![0u8; 32])))
                    .collect(),
            )
            .with_exec_hash(metadata.exec_hash().to_vec())
            .with_privacy_group_id(metadata.privacy_group_id().cloned())
            .build()
            .map_err(|e| EnclaveError::Internal(e.to_string()))
    }

    fn unencrypt_transaction(
        &self,
        payload: &EncodedPayload,
        key: &PublicKey,
    ) -> Result<Vec<u8>, EnclaveError> {
        self.attempts.lock().push(*key);

        if self.faulty == Some(*key) {
            return Err(EnclaveError::Internal("stub fault".to_string()));
        }
        if payload.recipient_box_for(key).is_none() {
            return Err(EnclaveError::WrongKey(*key));
        }
        Ok(payload.cipher_text().to_vec())
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        self.local.clone()
    }

    fn forwarding_keys(&self) -> Vec<PublicKey> {
        self.forwarding.clone()
    }
}
