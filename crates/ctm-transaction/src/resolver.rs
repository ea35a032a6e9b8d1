//! # Recipient Resolver
//!
//! Trial decryption over the enclave's local keys, used when a receive
//! request does not name the key to decrypt with.

use crate::domain::errors::TransactionError;
use ctm_enclave::Enclave;
use shared_types::{EncodedPayload, MessageHash, PublicKey};
use zeroize::Zeroizing;

/// A local key that opened a payload, with the plaintext it produced.
pub struct ResolvedRecipient {
    pub key: PublicKey,
    pub plaintext: Zeroizing<Vec<u8>>,
}

/// Finds the local key a payload was encrypted for.
pub struct RecipientResolver<'a, E: Enclave + ?Sized> {
    enclave: &'a E,
}

impl<'a, E: Enclave + ?Sized> RecipientResolver<'a, E> {
    pub fn new(enclave: &'a E) -> Self {
        Self { enclave }
    }

    /// Try each local key in the enclave's order and return the first one
    /// that opens `payload`, together with the decrypted transaction.
    ///
    /// Only wrong-key failures move the search on; any other enclave error
    /// ends it.
    ///
    /// # Errors
    /// * `TransactionError::RecipientKeyNotFound` - no local key opens it
    /// * `TransactionError::DecryptionFailure` - the enclave reported a
    ///   fault other than a wrong key
    pub fn resolve(
        &self,
        payload: &EncodedPayload,
        payload_hash: &MessageHash,
    ) -> Result<ResolvedRecipient, TransactionError> {
        for key in self.enclave.public_keys() {
            match self.enclave.unencrypt_transaction(payload, &key) {
                Ok(plaintext) => {
                    return Ok(ResolvedRecipient {
                        key,
                        plaintext: Zeroizing::new(plaintext),
                    })
                }
                Err(e) if e.is_wrong_key() => continue,
                Err(source) => {
                    return Err(TransactionError::DecryptionFailure {
                        payload_hash: *payload_hash,
                        source,
                    })
                }
            }
        }

        Err(TransactionError::RecipientKeyNotFound {
            payload_hash: *payload_hash,
        })
    }
}
