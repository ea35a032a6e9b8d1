//! SHA3-512 payload digest.

use crate::ports::outbound::PayloadDigest;
use shared_crypto::sha3_512;
use shared_types::MessageHash;

/// Hashes cipher text with SHA3-512.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha3PayloadDigest;

impl PayloadDigest for Sha3PayloadDigest {
    fn digest(&self, cipher_text: &[u8]) -> MessageHash {
        MessageHash::from_bytes(sha3_512(cipher_text))
    }
}
