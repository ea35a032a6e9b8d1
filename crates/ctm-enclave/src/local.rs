//! # Local Enclave
//!
//! In-process enclave holding secp256k1 key pairs in memory.
//!
//! ## Payload Layout
//!
//! - A random master key encrypts the message (XChaCha20-Poly1305)
//! - For each recipient, the master key is sealed under the ECDH key shared
//!   between the sender and that recipient; all boxes use one recipient nonce
//! - Each affected transaction gets a BLAKE3 hash keyed by the master key

use crate::api::{Enclave, EnclaveError};
use crate::config::EnclaveConfig;
use shared_crypto::symmetric::{self, Nonce as CipherNonce, SecretKey};
use shared_crypto::{blake3_keyed_hash, KeyAgreementKeyPair};
use shared_types::{
    EncodedPayload, Nonce, PrivacyMetaData, PublicKey, RecipientBox, SecurityHash, TxHash,
};
use std::collections::BTreeMap;
use tracing::Span;
use zeroize::Zeroizing;

/// Enclave backed by key pairs held in process memory.
pub struct LocalEnclave {
    keys: Vec<(PublicKey, KeyAgreementKeyPair)>,
    forwarding_keys: Vec<PublicKey>,
    span: Span,
}

impl LocalEnclave {
    /// Create an enclave from key pairs and startup configuration.
    ///
    /// Duplicate key pairs are kept once, in first-seen order.
    ///
    /// # Errors
    /// * `EnclaveError::InvalidConfig` - no key pairs, or an invalid
    ///   forwarding key
    pub fn new(
        key_pairs: Vec<KeyAgreementKeyPair>,
        config: &EnclaveConfig,
    ) -> Result<Self, EnclaveError> {
        if key_pairs.is_empty() {
            return Err(EnclaveError::InvalidConfig(
                "at least one key pair is required".to_string(),
            ));
        }

        let mut keys: Vec<(PublicKey, KeyAgreementKeyPair)> = Vec::with_capacity(key_pairs.len());
        for pair in key_pairs {
            let public = PublicKey::from_bytes(pair.public_key());
            if !keys.iter().any(|(existing, _)| *existing == public) {
                keys.push((public, pair));
            }
        }

        Ok(Self {
            keys,
            forwarding_keys: config.forwarding_keys()?,
            span: Span::none(),
        })
    }

    /// Create an enclave from raw 32-byte private keys.
    pub fn from_private_keys<I, B>(private_keys: I, config: &EnclaveConfig) -> Result<Self, EnclaveError>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let pairs = private_keys
            .into_iter()
            .map(|bytes| {
                KeyAgreementKeyPair::from_bytes(bytes.as_ref())
                    .map_err(|e| EnclaveError::InvalidConfig(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(pairs, config)
    }

    /// Attach the span all enclave events are recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn key_pair(&self, key: &PublicKey) -> Option<&KeyAgreementKeyPair> {
        self.keys
            .iter()
            .find(|(public, _)| public == key)
            .map(|(_, pair)| pair)
    }
}

impl Enclave for LocalEnclave {
    fn encrypt_payload(
        &self,
        message: &[u8],
        sender: &PublicKey,
        recipients: &[PublicKey],
        metadata: &PrivacyMetaData,
    ) -> Result<EncodedPayload, EnclaveError> {
        let sender_pair = self
            .key_pair(sender)
            .ok_or(EnclaveError::UnknownKey(*sender))?;

        let master_key = SecretKey::generate();
        let (cipher_text, cipher_text_nonce) = symmetric::encrypt(&master_key, message)
            .map_err(|e| EnclaveError::Encryption(e.to_string()))?;

        let recipient_nonce = CipherNonce::generate();
        let recipient_boxes = recipients
            .iter()
            .map(|recipient| {
                let shared = sender_pair.shared_key(recipient.as_bytes()).map_err(|_| {
                    EnclaveError::Encryption(format!("invalid recipient key {recipient}"))
                })?;
                symmetric::encrypt_with_nonce(&shared, &recipient_nonce, master_key.as_bytes())
                    .map(RecipientBox::new)
                    .map_err(|e| EnclaveError::Encryption(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let affected: BTreeMap<TxHash, SecurityHash> = metadata
            .affected_transactions()
            .iter()
            .map(|tx| {
                let security_hash = blake3_keyed_hash(master_key.as_bytes(), tx.hash().as_bytes());
                (*tx.hash(), SecurityHash::new(security_hash.to_vec()))
            })
            .collect();

        tracing::debug!(
            parent: &self.span,
            sender = %sender,
            recipients = recipients.len(),
            affected = affected.len(),
            "Encrypted payload"
        );

        EncodedPayload::builder()
            .with_sender_key(*sender)
            .with_cipher_text(cipher_text)
            .with_cipher_text_nonce(Nonce::new(cipher_text_nonce.as_bytes().to_vec()))
            .with_recipient_boxes(recipient_boxes)
            .with_recipient_nonce(Nonce::new(recipient_nonce.as_bytes().to_vec()))
            .with_recipient_keys(recipients.to_vec())
            .with_privacy_mode(metadata.privacy_mode())
            .with_affected_contract_transactions(affected)
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
        let pair = self.key_pair(key).ok_or(EnclaveError::UnknownKey(*key))?;

        let recipient_box = payload
            .recipient_box_for(key)
            .ok_or(EnclaveError::WrongKey(*key))?;

        let shared = pair.shared_key(payload.sender_key().as_bytes()).map_err(|_| {
            EnclaveError::MalformedPayload("sender key is not a valid public key".to_string())
        })?;

        let recipient_nonce = CipherNonce::from_slice(payload.recipient_nonce().as_bytes())
            .map_err(|e| EnclaveError::MalformedPayload(format!("recipient nonce: {e}")))?;

        // The box is listed under `key`, so a box that fails to open is corrupt.
        let master_bytes = Zeroizing::new(
            symmetric::decrypt(&shared, recipient_box.as_bytes(), &recipient_nonce).map_err(|_| {
                EnclaveError::MalformedPayload(format!("recipient box for {key} failed authentication"))
            })?,
        );

        let master_key = SecretKey::from_slice(&master_bytes)
            .map_err(|e| EnclaveError::MalformedPayload(format!("master key: {e}")))?;

        let cipher_text_nonce = CipherNonce::from_slice(payload.cipher_text_nonce().as_bytes())
            .map_err(|e| EnclaveError::MalformedPayload(format!("cipher text nonce: {e}")))?;

        symmetric::decrypt(&master_key, payload.cipher_text(), &cipher_text_nonce).map_err(|_| {
            EnclaveError::MalformedPayload("cipher text failed authentication".to_string())
        })
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.iter().map(|(public, _)| *public).collect()
    }

    fn forwarding_keys(&self) -> Vec<PublicKey> {
        self.forwarding_keys.clone()
    }
}
