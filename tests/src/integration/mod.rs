//! # Integration Tests
//!
//! Cross-crate flows: key provisioning, enclave and transaction manager.

pub mod privacy_graph;
pub mod provisioning;
pub mod scenarios;
