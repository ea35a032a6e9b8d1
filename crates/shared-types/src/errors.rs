//! # Error Types
//!
//! Errors raised while constructing or decoding shared value types.

use thiserror::Error;

/// Errors that can occur when building or parsing shared types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypesError {
    /// Byte input has the wrong length for a fixed-size type.
    #[error("Invalid length for {kind}: expected {expected}, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Text input is not valid base64.
    #[error("Invalid base64 encoding for {kind}: {reason}")]
    InvalidEncoding { kind: &'static str, reason: String },

    /// Integer privacy flag outside the wire mapping (0, 1, 3).
    #[error("Unknown privacy flag: {0}")]
    UnknownPrivacyFlag(i64),

    /// A builder was finalized without a required field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Private state validation requires an execution hash.
    #[error("Execution hash is required for private state validation")]
    MissingExecHash,

    /// The recipient key list and recipient box list differ in length.
    #[error("Recipient mismatch: {keys} keys for {boxes} boxes")]
    RecipientBoxMismatch { keys: usize, boxes: usize },
}
