//! # Key Agreement (secp256k1 ECDH)
//!
//! Derives a symmetric key shared between two key pairs. The enclave uses it
//! to seal a payload's master key for each recipient.
//!
//! ## Security Properties
//!
//! - Raw ECDH output is passed through a BLAKE3 KDF before use
//! - Secret scalars are zeroized on drop by `k256::SecretKey`

use crate::hashing::blake3_derive_key;
use crate::symmetric::SecretKey;
use crate::CryptoError;
use k256::ecdh::diffie_hellman;
use k256::elliptic_curve::sec1::ToEncodedPoint;

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// KDF context for shared box keys.
const SHARED_KEY_CONTEXT: &str = "ctm recipient box v1";

/// secp256k1 key pair used for key agreement.
#[derive(Clone)]
pub struct KeyAgreementKeyPair {
    secret: k256::SecretKey,
}

impl KeyAgreementKeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        Self {
            secret: k256::SecretKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let secret = k256::SecretKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { secret })
    }

    /// Public key (compressed, 33 bytes).
    pub fn public_key(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LEN] {
        let encoded = self.secret.public_key().to_encoded_point(true);
        // A compressed SEC1 point is always 33 bytes.
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        bytes.copy_from_slice(encoded.as_bytes());
        bytes
    }

    /// Secret key bytes (for provisioning).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes().into()
    }

    /// Derive the symmetric key shared with `their_public`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidPublicKey` if the bytes are not a point on
    /// the curve.
    pub fn shared_key(&self, their_public: &[u8]) -> Result<SecretKey, CryptoError> {
        let public =
            k256::PublicKey::from_sec1_bytes(their_public).map_err(|_| CryptoError::InvalidPublicKey)?;

        let shared = diffie_hellman(self.secret.to_nonzero_scalar(), public.as_affine());
        let key = blake3_derive_key(SHARED_KEY_CONTEXT, shared.raw_secret_bytes().as_slice());

        Ok(SecretKey::from_bytes(key))
    }
}

impl std::fmt::Debug for KeyAgreementKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyAgreementKeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
