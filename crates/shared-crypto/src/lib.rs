//! # Shared Crypto - Enclave Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | XChaCha20-Poly1305 | Payload and recipient-box encryption |
//! | `hashing` | SHA3-512, BLAKE3 | Payload digests, KDF, security hashes |
//! | `key_agreement` | secp256k1 ECDH | Per-recipient shared keys |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit nonce, constant-time, side-channel immune
//! - **ECDH**: shared secrets are never used directly; they pass through a
//!   BLAKE3 KDF with a fixed context string
//! - **Zeroize**: symmetric keys are cleared on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod key_agreement;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake3_derive_key, blake3_keyed_hash, sha3_512, Digest512};
pub use key_agreement::{KeyAgreementKeyPair, COMPRESSED_PUBLIC_KEY_LEN};
pub use symmetric::{decrypt, encrypt, encrypt_with_nonce, Nonce, SecretKey, NONCE_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
