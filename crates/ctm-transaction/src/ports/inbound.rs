//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{ReceiveResponse, SendRequest};
use crate::domain::errors::TransactionError;
use shared_types::{EncodedPayload, PublicKey};

/// Primary encoded payload API.
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no state
/// between calls.
pub trait EncodedPayloadManager: Send + Sync {
    /// Validate a send request and encrypt it for every effective recipient.
    ///
    /// # Errors
    /// * `TransactionError::ValidationRejected` - privacy rules rejected the
    ///   request; nothing was encrypted
    /// * `TransactionError::EncryptionFailure` - the enclave could not encrypt
    fn create(&self, request: SendRequest) -> Result<EncodedPayload, TransactionError>;

    /// Decrypt a payload, searching the local keys when `recipient` is `None`.
    ///
    /// # Errors
    /// * `TransactionError::RecipientKeyNotFound` - no local key opens it
    /// * `TransactionError::DecryptionFailure` - enclave fault or corrupted
    ///   payload
    fn decrypt(
        &self,
        payload: &EncodedPayload,
        recipient: Option<PublicKey>,
    ) -> Result<ReceiveResponse, TransactionError>;
}
