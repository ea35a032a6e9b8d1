//! # Shared Types Crate
//!
//! Value types exchanged between the enclave boundary, key generation and the
//! transaction manager core.
//!
//! ## Design Principles
//!
//! - **Immutable values**: `EncodedPayload` and `PrivacyMetaData` expose
//!   getters only; they are assembled once through their builders.
//! - **Byte identity**: keys and hashes compare and hash by raw bytes. Their
//!   canonical text form is standard base64.
//! - **Wire-stable privacy flags**: `PrivacyMode` keeps the integer flags
//!   0, 1 and 3.

pub mod entities;
pub mod errors;
pub mod payload;
pub mod privacy;

pub use entities::*;
pub use errors::*;
pub use payload::{EncodedPayload, EncodedPayloadBuilder};
pub use privacy::*;
