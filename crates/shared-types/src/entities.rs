//! # Core Entities
//!
//! Keys, hashes and opaque byte values used throughout the transaction
//! manager.

use crate::errors::TypesError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use std::str::FromStr;

/// Length of a public key (compressed SEC1 secp256k1 point).
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of a transaction hash (SHA3-512 digest of the ciphertext).
pub const HASH_LEN: usize = 64;

// =============================================================================
// PUBLIC KEY
// =============================================================================

/// Opaque public key identifying a transaction party.
///
/// Equality and hashing use the raw bytes. The canonical text encoding is
/// standard base64, used both in logs and in APIs.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Bytes")] [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Wrap raw key bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, checking the length.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        let array: [u8; PUBLIC_KEY_LEN] =
            bytes.try_into().map_err(|_| TypesError::InvalidLength {
                kind: "public key",
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }

    /// Decode from the canonical base64 form.
    pub fn from_base64(encoded: &str) -> Result<Self, TypesError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| TypesError::InvalidEncoding {
                kind: "public key",
                reason: e.to_string(),
            })?;
        Self::try_from_slice(&bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Canonical base64 encoding.
    pub fn encode_to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_to_base64())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.encode_to_base64())
    }
}

impl FromStr for PublicKey {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

// =============================================================================
// HASHES
// =============================================================================

macro_rules! fixed_hash {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[serde_as]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(#[serde_as(as = "Bytes")] [u8; HASH_LEN]);

        impl $name {
            /// Wrap raw digest bytes.
            pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
                Self(bytes)
            }

            /// Build from a slice, checking the length.
            pub fn try_from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
                let array: [u8; HASH_LEN] =
                    bytes.try_into().map_err(|_| TypesError::InvalidLength {
                        kind: $kind,
                        expected: HASH_LEN,
                        actual: bytes.len(),
                    })?;
                Ok(Self(array))
            }

            /// Decode from base64.
            pub fn from_base64(encoded: &str) -> Result<Self, TypesError> {
                let bytes = STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| TypesError::InvalidEncoding {
                        kind: $kind,
                        reason: e.to_string(),
                    })?;
                Self::try_from_slice(&bytes)
            }

            /// Raw digest bytes.
            pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
                &self.0
            }

            /// Base64 encoding, as used on the wire.
            pub fn encode_to_base64(&self) -> String {
                STANDARD.encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.encode_to_base64())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.encode_to_base64())
            }
        }
    };
}

fixed_hash!(
    /// Digest of a payload's ciphertext; the canonical transaction identifier.
    MessageHash,
    "message hash"
);

fixed_hash!(
    /// Hash of a previously stored transaction, as referenced by an
    /// affected-transaction entry.
    TxHash,
    "transaction hash"
);

impl From<TxHash> for MessageHash {
    fn from(hash: TxHash) -> Self {
        Self(hash.0)
    }
}

impl From<MessageHash> for TxHash {
    fn from(hash: MessageHash) -> Self {
        Self(hash.0)
    }
}

// =============================================================================
// OPAQUE BYTE VALUES
// =============================================================================

macro_rules! opaque_bytes {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Wrap raw bytes.
            pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Base64 encoding.
            pub fn encode_to_base64(&self) -> String {
                STANDARD.encode(&self.0)
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }
    };
}

opaque_bytes!(
    /// Identifier of the privacy group a transaction was sent to.
    PrivacyGroupId
);

opaque_bytes!(
    /// Per-transaction security hash produced by the enclave for an affected
    /// transaction. Not interpreted outside the enclave.
    SecurityHash
);

opaque_bytes!(
    /// Encryption nonce. Length is defined by the enclave's cipher.
    Nonce
);

opaque_bytes!(
    /// Master key sealed for one recipient.
    RecipientBox
);
