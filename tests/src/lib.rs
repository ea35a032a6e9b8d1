//! # Confidential Transaction Manager Test Suite
//!
//! End-to-end tests running the transaction manager against the real local
//! enclave.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs            # Key pairs and nodes (enclave + service)
//! └── integration/
//!     ├── scenarios.rs       # Send/receive scenarios across nodes
//!     ├── privacy_graph.rs   # Party protection / PSV over stored transactions
//!     └── provisioning.rs    # Key generation feeding the enclave
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ctm-tests
//! cargo test -p ctm-tests integration::scenarios::
//! ```

pub mod fixtures;
pub mod integration;
