//! # Encoded Payload Service
//!
//! Application service implementing `EncodedPayloadManager`.
//!
//! ## Flows
//!
//! - **create**: effective recipients → privacy validation → metadata →
//!   enclave encryption
//! - **decrypt**: payload hash → enclave decryption with the explicit key,
//!   or recipient resolution (which decrypts as it searches) → response
//!   assembled from payload metadata
//!
//! The service holds no mutable state; concurrent calls share only the
//! enclave.

use crate::adapters::Sha3PayloadDigest;
use crate::config::TransactionManagerConfig;
use crate::domain::entities::{effective_recipients, ReceiveResponse, SendRequest};
use crate::domain::errors::TransactionError;
use crate::domain::privacy::PrivacyValidator;
use crate::ports::inbound::EncodedPayloadManager;
use crate::ports::outbound::{AffectedTransactionSource, PayloadDigest};
use crate::resolver::RecipientResolver;
use ctm_enclave::Enclave;
use shared_types::{EncodedPayload, MessageHash, PrivacyMetaData, PublicKey};
use std::sync::Arc;
use tracing::Span;
use zeroize::Zeroizing;

/// Encoded payload service.
pub struct EncodedPayloadService<E: Enclave, D: PayloadDigest = Sha3PayloadDigest> {
    enclave: E,
    digest: D,
    validator: PrivacyValidator,
    span: Span,
}

impl<E: Enclave> EncodedPayloadService<E> {
    /// Create a service with one-level validation and the SHA3-512 digest.
    pub fn new(enclave: E) -> Self {
        Self::with_digest(enclave, Sha3PayloadDigest)
    }

    /// Create a service configured from `config`.
    pub fn from_config(enclave: E, config: &TransactionManagerConfig) -> Self {
        Self::new(enclave).with_validator(PrivacyValidator::new(config.validation_depth))
    }
}

impl<E: Enclave, D: PayloadDigest> EncodedPayloadService<E, D> {
    pub fn with_digest(enclave: E, digest: D) -> Self {
        Self {
            enclave,
            digest,
            validator: PrivacyValidator::default(),
            span: Span::none(),
        }
    }

    pub fn with_validator(mut self, validator: PrivacyValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Stored-transaction lookup for transitive validation.
    pub fn with_affected_source(mut self, source: Arc<dyn AffectedTransactionSource>) -> Self {
        self.validator = self.validator.with_source(source);
        self
    }

    /// Attach the span all service events are recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn enclave(&self) -> &E {
        &self.enclave
    }

    /// Content hash identifying `payload`.
    pub fn payload_hash(&self, payload: &EncodedPayload) -> MessageHash {
        self.digest.digest(payload.cipher_text())
    }
}

impl<E: Enclave, D: PayloadDigest> EncodedPayloadManager for EncodedPayloadService<E, D> {
    fn create(&self, request: SendRequest) -> Result<EncodedPayload, TransactionError> {
        let SendRequest {
            sender,
            payload,
            recipients,
            privacy_mode,
            privacy_group_id,
            exec_hash,
            affected_transactions,
        } = request;

        let recipients =
            effective_recipients(&sender, &recipients, &self.enclave.forwarding_keys());

        if let Err(violation) =
            self.validator
                .validate(privacy_mode, &recipients, &affected_transactions)
        {
            tracing::debug!(
                parent: &self.span,
                sender = %sender,
                mode = %privacy_mode,
                reason = %violation,
                "Send request rejected"
            );
            return Err(violation.into());
        }

        let mut metadata = PrivacyMetaData::builder()
            .with_privacy_mode(privacy_mode)
            .with_affected_transactions(affected_transactions)
            .with_exec_hash(exec_hash);
        if let Some(group_id) = privacy_group_id {
            metadata = metadata.with_privacy_group_id(group_id);
        }
        let metadata = metadata.build()?;

        let encoded = self
            .enclave
            .encrypt_payload(&payload, &sender, &recipients, &metadata)
            .map_err(|source| TransactionError::EncryptionFailure { source })?;

        tracing::debug!(
            parent: &self.span,
            sender = %sender,
            mode = %privacy_mode,
            recipients = recipients.len(),
            "Created encoded payload"
        );

        Ok(encoded)
    }

    fn decrypt(
        &self,
        payload: &EncodedPayload,
        recipient: Option<PublicKey>,
    ) -> Result<ReceiveResponse, TransactionError> {
        let payload_hash = self.payload_hash(payload);

        let (key, mut plaintext) = match recipient {
            Some(key) => {
                let plaintext = self
                    .enclave
                    .unencrypt_transaction(payload, &key)
                    .map_err(|source| TransactionError::DecryptionFailure {
                        payload_hash,
                        source,
                    })?;
                (key, Zeroizing::new(plaintext))
            }
            None => {
                let resolved = RecipientResolver::new(&self.enclave)
                    .resolve(payload, &payload_hash)
                    .inspect_err(|e| {
                        tracing::debug!(parent: &self.span, hash = %payload_hash, error = %e, "Recipient resolution failed");
                    })?;
                (resolved.key, resolved.plaintext)
            }
        };

        tracing::debug!(
            parent: &self.span,
            hash = %payload_hash,
            key = %key,
            "Decrypted payload"
        );

        Ok(ReceiveResponse {
            unencrypted_transaction_data: std::mem::take(&mut *plaintext),
            privacy_mode: payload.privacy_mode(),
            affected_transactions: payload
                .affected_contract_transactions()
                .keys()
                .copied()
                .map(MessageHash::from)
                .collect(),
            exec_hash: payload.exec_hash().to_vec(),
            privacy_group_id: payload.privacy_group_id().cloned(),
            sender: *payload.sender_key(),
        })
    }
}
