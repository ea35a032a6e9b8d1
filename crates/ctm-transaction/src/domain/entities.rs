//! # Domain Entities
//!
//! Requests accepted and responses produced by the encoded payload manager.

use shared_types::{AffectedTransaction, MessageHash, PrivacyGroupId, PrivacyMode, PublicKey};
use std::collections::{BTreeSet, HashSet};

/// Request to encrypt a transaction payload.
///
/// Built by the API layer and consumed once by `create`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRequest {
    /// Key the payload is sent from; must be held by the enclave
    pub sender: PublicKey,
    /// Plaintext transaction data
    pub payload: Vec<u8>,
    /// Explicit recipients, possibly empty or with repeats
    pub recipients: Vec<PublicKey>,
    pub privacy_mode: PrivacyMode,
    pub privacy_group_id: Option<PrivacyGroupId>,
    /// Opaque execution hash (merkle root after simulation)
    pub exec_hash: Vec<u8>,
    /// Stored transactions this transaction depends on, already resolved
    pub affected_transactions: Vec<AffectedTransaction>,
}

impl SendRequest {
    /// Standard-private request with no recipients besides the sender.
    pub fn new(sender: PublicKey, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            sender,
            payload: payload.into(),
            recipients: Vec::new(),
            privacy_mode: PrivacyMode::StandardPrivate,
            privacy_group_id: None,
            exec_hash: Vec::new(),
            affected_transactions: Vec::new(),
        }
    }

    pub fn with_recipients(mut self, recipients: Vec<PublicKey>) -> Self {
        self.recipients = recipients;
        self
    }

    pub fn with_privacy_mode(mut self, mode: PrivacyMode) -> Self {
        self.privacy_mode = mode;
        self
    }

    pub fn with_privacy_group_id(mut self, group_id: PrivacyGroupId) -> Self {
        self.privacy_group_id = Some(group_id);
        self
    }

    pub fn with_exec_hash(mut self, exec_hash: impl Into<Vec<u8>>) -> Self {
        self.exec_hash = exec_hash.into();
        self
    }

    pub fn with_affected_transactions(mut self, affected: Vec<AffectedTransaction>) -> Self {
        self.affected_transactions = affected;
        self
    }
}

/// Plaintext and privacy metadata recovered from an encoded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiveResponse {
    pub unencrypted_transaction_data: Vec<u8>,
    pub privacy_mode: PrivacyMode,
    /// Hashes of the transactions the payload declared as affected
    pub affected_transactions: BTreeSet<MessageHash>,
    pub exec_hash: Vec<u8>,
    pub privacy_group_id: Option<PrivacyGroupId>,
    pub sender: PublicKey,
}

/// Sender, then explicit recipients, then forwarding keys, each key kept
/// once at its first position.
pub fn effective_recipients(
    sender: &PublicKey,
    recipients: &[PublicKey],
    forwarding_keys: &[PublicKey],
) -> Vec<PublicKey> {
    let mut seen = HashSet::with_capacity(1 + recipients.len() + forwarding_keys.len());

    std::iter::once(sender)
        .chain(recipients)
        .chain(forwarding_keys)
        .filter(|key| seen.insert(**key))
        .copied()
        .collect()
}
