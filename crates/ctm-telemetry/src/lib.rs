//! # CTM Telemetry
//!
//! Structured logging for the confidential transaction manager.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ctm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let root = init_telemetry(&config)?;
//!
//! let enclave = LocalEnclave::new(pairs, &enclave_config)?
//!     .with_span(ctm_telemetry::component_span(&root, "enclave"));
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `confidential-tx-manager` | Service name on the root span |
//! | `CTM_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CTM_JSON_LOGS` | `false` | JSON output (default `true` in containers) |
//! | `CTM_CONSOLE_OUTPUT` | `true` | Write events to stdout |

mod config;
mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::init_subscriber;

use thiserror::Error;
use tracing::Span;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global subscriber and return the service root span.
///
/// Pass children of the returned span to each component with `with_span`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<Span, TelemetryError> {
    init_subscriber(config)?;
    Ok(root_span(config))
}

/// Root span for the service, without installing a subscriber.
pub fn root_span(config: &TelemetryConfig) -> Span {
    tracing::info_span!("ctm", service = %config.service_name)
}

/// Child span for one component (`enclave`, `transaction`, `keygen`).
pub fn component_span(parent: &Span, component: &'static str) -> Span {
    tracing::info_span!(parent: parent, "component", subsystem = component)
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use ctm_telemetry::subsystem_span;
///
/// let span = subsystem_span!("decrypt", subsystem = "transaction", payload_hash = %hash);
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Helper to emit a structured event under a component span.
///
/// # Example
///
/// ```rust,ignore
/// log_event!(debug, &self.span, "Decrypted payload", payload_hash = %hash);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:ident, $span:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            parent: $span,
            $($($field)*,)?
            $msg
        )
    };
}
