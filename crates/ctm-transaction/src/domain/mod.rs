//! # Domain Layer
//!
//! Request/response entities, errors and the privacy validator. No I/O.

pub mod entities;
pub mod errors;
pub mod privacy;
