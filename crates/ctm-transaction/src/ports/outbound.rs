//! # Outbound Ports (Driven Ports / SPI)
//!
//! The enclave port lives in `ctm-enclave`; the remaining collaborators are
//! defined here.

use shared_types::{AffectedTransaction, MessageHash, TxHash};

/// Deterministic content digest used for transaction identity.
pub trait PayloadDigest: Send + Sync {
    /// Hash a payload's cipher text.
    fn digest(&self, cipher_text: &[u8]) -> MessageHash;
}

/// Lookup of stored transactions, used for transitive privacy validation.
pub trait AffectedTransactionSource: Send + Sync {
    /// The stored transaction with `hash`, if present.
    fn find(&self, hash: &TxHash) -> Option<AffectedTransaction>;
}
