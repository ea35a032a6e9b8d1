//! # Transaction Manager Errors
//!
//! Error types for payload creation and decryption.

use ctm_enclave::EnclaveError;
use shared_types::{MessageHash, PrivacyMode, PublicKey, TxHash, TypesError};
use thiserror::Error;

/// A privacy-mode consistency rule that a send request broke.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrivacyViolation {
    /// No recipient remains after adding the sender and forwarding keys.
    #[error("Recipient set is empty")]
    EmptyRecipients,

    /// An affected transaction was recorded under an incompatible mode.
    #[error("Privacy mode mismatch with affected transaction {hash}: expected {expected}, found {actual}")]
    ModeMismatch {
        hash: TxHash,
        expected: PrivacyMode,
        actual: PrivacyMode,
    },

    /// An affected transaction was not shared with every new recipient.
    #[error("Affected transaction {hash} is not shared with {} new recipient(s)", .missing.len())]
    RecipientsNotCovered { hash: TxHash, missing: Vec<PublicKey> },

    /// An affected transaction's recipients differ from the new recipients.
    #[error("Recipients mismatched for affected transaction {hash}")]
    RecipientsMismatch { hash: TxHash },

    /// The affected-transaction graph loops back on itself.
    #[error("Affected transaction graph contains a cycle through {hash}")]
    AffectedTransactionCycle { hash: TxHash },

    /// A transitively affected transaction could not be found.
    #[error("Affected transaction {hash} could not be resolved")]
    UnresolvedAffectedTransaction { hash: TxHash },
}

impl PrivacyViolation {
    /// The transaction the violation was found on, if any.
    pub fn conflicting_transaction(&self) -> Option<&TxHash> {
        match self {
            PrivacyViolation::EmptyRecipients => None,
            PrivacyViolation::ModeMismatch { hash, .. }
            | PrivacyViolation::RecipientsNotCovered { hash, .. }
            | PrivacyViolation::RecipientsMismatch { hash }
            | PrivacyViolation::AffectedTransactionCycle { hash }
            | PrivacyViolation::UnresolvedAffectedTransaction { hash } => Some(hash),
        }
    }
}

/// Errors returned by the encoded payload manager.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// The request broke a privacy-mode rule. Nothing was encrypted.
    #[error("Privacy validation rejected request: {0}")]
    ValidationRejected(#[from] PrivacyViolation),

    /// Privacy metadata could not be assembled.
    #[error("Invalid privacy metadata: {0}")]
    InvalidMetaData(#[from] TypesError),

    /// No locally held key can open the payload.
    #[error("No suitable recipient keys found to decrypt payload for {payload_hash}")]
    RecipientKeyNotFound { payload_hash: MessageHash },

    /// The enclave could not encrypt the payload.
    #[error("Encryption failed: {source}")]
    EncryptionFailure {
        #[source]
        source: EnclaveError,
    },

    /// The enclave could not decrypt the payload.
    #[error("Decryption of payload {payload_hash} failed: {source}")]
    DecryptionFailure {
        payload_hash: MessageHash,
        #[source]
        source: EnclaveError,
    },
}
