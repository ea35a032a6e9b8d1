//! # Encoded Payload
//!
//! Storage and wire representation of an encrypted transaction.

use crate::entities::{Nonce, PrivacyGroupId, PublicKey, RecipientBox, SecurityHash, TxHash};
use crate::errors::TypesError;
use crate::privacy::PrivacyMode;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::BTreeMap;

/// An encrypted transaction as produced by the enclave.
///
/// `recipient_keys[i]` owns `recipient_boxes[i]`. The value is never mutated
/// after construction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    sender_key: PublicKey,
    cipher_text: Vec<u8>,
    cipher_text_nonce: Nonce,
    recipient_boxes: Vec<RecipientBox>,
    recipient_nonce: Nonce,
    recipient_keys: Vec<PublicKey>,
    privacy_mode: PrivacyMode,
    #[serde_as(as = "Vec<(_, _)>")]
    affected_contract_transactions: BTreeMap<TxHash, SecurityHash>,
    exec_hash: Vec<u8>,
    privacy_group_id: Option<PrivacyGroupId>,
}

impl EncodedPayload {
    pub fn builder() -> EncodedPayloadBuilder {
        EncodedPayloadBuilder::default()
    }

    pub fn sender_key(&self) -> &PublicKey {
        &self.sender_key
    }

    pub fn cipher_text(&self) -> &[u8] {
        &self.cipher_text
    }

    pub fn cipher_text_nonce(&self) -> &Nonce {
        &self.cipher_text_nonce
    }

    pub fn recipient_boxes(&self) -> &[RecipientBox] {
        &self.recipient_boxes
    }

    pub fn recipient_nonce(&self) -> &Nonce {
        &self.recipient_nonce
    }

    pub fn recipient_keys(&self) -> &[PublicKey] {
        &self.recipient_keys
    }

    /// Box sealed for `key`, if the payload was encrypted for it.
    pub fn recipient_box_for(&self, key: &PublicKey) -> Option<&RecipientBox> {
        self.recipient_keys
            .iter()
            .position(|k| k == key)
            .and_then(|index| self.recipient_boxes.get(index))
    }

    pub fn privacy_mode(&self) -> PrivacyMode {
        self.privacy_mode
    }

    /// Affected transaction hash to enclave security hash.
    pub fn affected_contract_transactions(&self) -> &BTreeMap<TxHash, SecurityHash> {
        &self.affected_contract_transactions
    }

    pub fn exec_hash(&self) -> &[u8] {
        &self.exec_hash
    }

    pub fn privacy_group_id(&self) -> Option<&PrivacyGroupId> {
        self.privacy_group_id.as_ref()
    }
}

/// Builder for [`EncodedPayload`], used by enclave implementations.
#[derive(Clone, Debug, Default)]
pub struct EncodedPayloadBuilder {
    sender_key: Option<PublicKey>,
    cipher_text: Vec<u8>,
    cipher_text_nonce: Nonce,
    recipient_boxes: Vec<RecipientBox>,
    recipient_nonce: Nonce,
    recipient_keys: Vec<PublicKey>,
    privacy_mode: PrivacyMode,
    affected_contract_transactions: BTreeMap<TxHash, SecurityHash>,
    exec_hash: Vec<u8>,
    privacy_group_id: Option<PrivacyGroupId>,
}

impl EncodedPayloadBuilder {
    pub fn with_sender_key(mut self, key: PublicKey) -> Self {
        self.sender_key = Some(key);
        self
    }

    pub fn with_cipher_text(mut self, cipher_text: Vec<u8>) -> Self {
        self.cipher_text = cipher_text;
        self
    }

    pub fn with_cipher_text_nonce(mut self, nonce: Nonce) -> Self {
        self.cipher_text_nonce = nonce;
        self
    }

    pub fn with_recipient_boxes(mut self, boxes: Vec<RecipientBox>) -> Self {
        self.recipient_boxes = boxes;
        self
    }

    pub fn with_recipient_nonce(mut self, nonce: Nonce) -> Self {
        self.recipient_nonce = nonce;
        self
    }

    pub fn with_recipient_keys(mut self, keys: Vec<PublicKey>) -> Self {
        self.recipient_keys = keys;
        self
    }

    pub fn with_privacy_mode(mut self, mode: PrivacyMode) -> Self {
        self.privacy_mode = mode;
        self
    }

    pub fn with_affected_contract_transactions(
        mut self,
        affected: BTreeMap<TxHash, SecurityHash>,
    ) -> Self {
        self.affected_contract_transactions = affected;
        self
    }

    pub fn with_exec_hash(mut self, exec_hash: impl Into<Vec<u8>>) -> Self {
        self.exec_hash = exec_hash.into();
        self
    }

    pub fn with_privacy_group_id(mut self, group_id: Option<PrivacyGroupId>) -> Self {
        self.privacy_group_id = group_id;
        self
    }

    /// Finalize the payload.
    ///
    /// # Errors
    /// * `TypesError::MissingField` - no sender key
    /// * `TypesError::RecipientBoxMismatch` - keys and boxes differ in count
    pub fn build(self) -> Result<EncodedPayload, TypesError> {
        let sender_key = self.sender_key.ok_or(TypesError::MissingField("sender_key"))?;

        if self.recipient_keys.len() != self.recipient_boxes.len() {
            return Err(TypesError::RecipientBoxMismatch {
                keys: self.recipient_keys.len(),
                boxes: self.recipient_boxes.len(),
            });
        }

        Ok(EncodedPayload {
            sender_key,
            cipher_text: self.cipher_text,
            cipher_text_nonce: self.cipher_text_nonce,
            recipient_boxes: self.recipient_boxes,
            recipient_nonce: self.recipient_nonce,
            recipient_keys: self.recipient_keys,
            privacy_mode: self.privacy_mode,
            affected_contract_transactions: self.affected_contract_transactions,
            exec_hash: self.exec_hash,
            privacy_group_id: self.privacy_group_id,
        })
    }
}
