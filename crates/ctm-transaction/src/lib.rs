//! # Confidential Transaction Manager Core
//!
//! Turns send requests into multi-recipient encrypted payloads and encrypted
//! payloads back into plaintext responses.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): entities, errors, privacy validator
//! - **Ports Layer** (`ports/`): `EncodedPayloadManager` (inbound);
//!   `PayloadDigest` and `AffectedTransactionSource` (outbound). The enclave
//!   port is `ctm_enclave::Enclave`.
//! - **Service Layer** (`service.rs`, `resolver.rs`): create/decrypt flows
//!   and trial-decryption key search
//! - **Adapters** (`adapters/`): SHA3-512 digest, in-memory transaction
//!   lookup, receive-response wire shape
//!
//! ## Privacy Modes
//!
//! | Mode | Flag | Affected transactions |
//! |------|------|-----------------------|
//! | Standard private | 0 | unconstrained |
//! | Party protection | 1 | same mode, recipients ⊇ new recipients |
//! | Private state validation | 3 | same mode, recipients = new recipients |
//!
//! ## Security Notes
//!
//! - Validation runs before any encryption; a rejected request never reaches
//!   the enclave
//! - Recipient resolution swallows only wrong-key failures, so corrupted
//!   payloads surface as `DecryptionFailure` instead of "not a recipient"

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod resolver;
pub mod service;

#[cfg(test)]
mod test_support;

// Re-export public API
pub use adapters::{InMemoryAffectedTransactions, ReceiveResponseDto, Sha3PayloadDigest};
pub use config::{TransactionManagerConfig, ValidationDepth};
pub use domain::entities::{effective_recipients, ReceiveResponse, SendRequest};
pub use domain::errors::{PrivacyViolation, TransactionError};
pub use domain::privacy::PrivacyValidator;
pub use ports::inbound::EncodedPayloadManager;
pub use ports::outbound::{AffectedTransactionSource, PayloadDigest};
pub use resolver::{RecipientResolver, ResolvedRecipient};
pub use service::EncodedPayloadService;
