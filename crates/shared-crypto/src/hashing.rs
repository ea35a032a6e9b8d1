//! # Hashing
//!
//! SHA3-512 for payload identity, BLAKE3 for key derivation and keyed
//! security hashes.

use sha3::{Digest, Sha3_512};

/// 512-bit digest output.
pub type Digest512 = [u8; 64];

/// SHA3-512 digest (one-shot).
pub fn sha3_512(data: &[u8]) -> Digest512 {
    let mut hasher = Sha3_512::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut digest = [0u8; 64];
    digest.copy_from_slice(&result);
    digest
}

/// Keyed hash (MAC).
pub fn blake3_keyed_hash(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
    *blake3::keyed_hash(key, data).as_bytes()
}

/// Derive key from context and input key material.
pub fn blake3_derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    blake3::derive_key(context, key_material)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_512_deterministic() {
        assert_eq!(sha3_512(b"payload"), sha3_512(b"payload"));
        assert_ne!(sha3_512(b"payload"), sha3_512(b"payload2"));
    }

    #[test]
    fn test_sha3_512_empty_vector() {
        let digest = sha3_512(b"");
        // Known SHA3-512("") prefix
        assert_eq!(&digest[..4], &[0xa6, 0x9f, 0x73, 0xcc]);
    }

    #[test]
    fn test_keyed_hash() {
        let key = [0xABu8; 32];
        let h1 = blake3_keyed_hash(&key, b"data");
        let h2 = blake3_keyed_hash(&key, b"data");
        let h3 = blake3_keyed_hash(&[0xCDu8; 32], b"data");

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_derive_key_context_separation() {
        let a = blake3_derive_key("ctm recipient box v1", b"secret");
        let b = blake3_derive_key("ctm other context", b"secret");
        assert_ne!(a, b);
    }
}
