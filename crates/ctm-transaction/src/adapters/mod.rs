//! # Adapters Layer
//!
//! - `Sha3PayloadDigest`: default `PayloadDigest`
//! - `InMemoryAffectedTransactions`: `AffectedTransactionSource` over a map
//! - `ReceiveResponseDto`: receive-response wire shape

pub mod affected_store;
pub mod digest;
pub mod wire;

pub use affected_store::InMemoryAffectedTransactions;
pub use digest::Sha3PayloadDigest;
pub use wire::ReceiveResponseDto;
