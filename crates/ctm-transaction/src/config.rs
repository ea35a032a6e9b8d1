//! Transaction manager configuration
//!
//! # Example
//!
//! ```ignore
//! use ctm_transaction::config::{TransactionManagerConfig, ValidationDepth};
//!
//! let config = TransactionManagerConfig::from_env()
//!     .with_validation_depth(ValidationDepth::Transitive);
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// How far privacy validation follows the affected-transaction graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationDepth {
    /// Only the transactions named by the request.
    #[default]
    OneLevel,
    /// The named transactions and everything they depend on.
    Transitive,
}

impl FromStr for ValidationDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one-level" | "one_level" | "onelevel" => Ok(ValidationDepth::OneLevel),
            "transitive" => Ok(ValidationDepth::Transitive),
            other => Err(format!("unknown validation depth: {other}")),
        }
    }
}

impl fmt::Display for ValidationDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationDepth::OneLevel => f.write_str("one-level"),
            ValidationDepth::Transitive => f.write_str("transitive"),
        }
    }
}

/// Transaction manager configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionManagerConfig {
    /// Privacy validation strictness
    #[serde(default)]
    pub validation_depth: ValidationDepth,
}

impl TransactionManagerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CTM_VALIDATION_DEPTH`: `one-level` or `transitive` (default: one-level)
    pub fn from_env() -> Self {
        let validation_depth = env::var("CTM_VALIDATION_DEPTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { validation_depth }
    }

    /// Builder-style method to set validation depth
    pub fn with_validation_depth(mut self, depth: ValidationDepth) -> Self {
        self.validation_depth = depth;
        self
    }
}
