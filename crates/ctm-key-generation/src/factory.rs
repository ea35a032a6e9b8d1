//! # Key Generator Factory
//!
//! Chooses the key generator once from configuration. Generators are not
//! re-selected per call.

use crate::config::KeyGenerationConfig;
use crate::domain::errors::KeyGenError;
use crate::generator::{KeyGenerator, LocalKeyGenerator, VaultKeyGenerator};
use crate::ports::KeyVaultServiceProvider;
use std::sync::Arc;
use tracing::Span;

/// Builds a `KeyGenerator` for a configuration.
pub struct KeyGeneratorFactory {
    provider: Arc<dyn KeyVaultServiceProvider>,
    span: Span,
}

impl KeyGeneratorFactory {
    /// `provider` supplies vault services for vault-backed configurations.
    pub fn new(provider: Arc<dyn KeyVaultServiceProvider>) -> Self {
        Self {
            provider,
            span: Span::none(),
        }
    }

    /// Span handed to every generator this factory creates.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Validate `config` and build its generator.
    ///
    /// # Errors
    /// * `KeyGenError::Config` - invalid vault configuration
    /// * Any error from the vault service provider
    pub fn create(&self, config: &KeyGenerationConfig) -> Result<Box<dyn KeyGenerator>, KeyGenError> {
        config.validate()?;

        match &config.vault {
            Some(vault_config) => {
                let vault = self.provider.create(vault_config)?;
                tracing::debug!(
                    parent: &self.span,
                    vault = %vault_config.vault_type(),
                    "Using vault key generator"
                );
                Ok(Box::new(
                    VaultKeyGenerator::new(vault, vault_config.vault_type())
                        .with_span(self.span.clone()),
                ))
            }
            None => {
                tracing::debug!(parent: &self.span, "Using local key generator");
                Ok(Box::new(LocalKeyGenerator::new().with_span(self.span.clone())))
            }
        }
    }
}
