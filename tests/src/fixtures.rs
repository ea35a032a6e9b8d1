//! Shared fixtures: named parties and nodes holding some of their keys.

use ctm_enclave::{EnclaveConfig, EnclaveError, LocalEnclave};
use ctm_telemetry::{component_span, root_span, TelemetryConfig};
use ctm_transaction::{AffectedTransactionSource, EncodedPayloadService, TransactionManagerConfig};
use shared_crypto::KeyAgreementKeyPair;
use shared_types::PublicKey;
use std::sync::Arc;

/// A party with one key-agreement key pair.
#[derive(Clone, Debug)]
pub struct Party {
    pub pair: KeyAgreementKeyPair,
    pub key: PublicKey,
}

impl Party {
    pub fn generate() -> Self {
        Self::from_pair(KeyAgreementKeyPair::generate())
    }

    pub fn from_pair(pair: KeyAgreementKeyPair) -> Self {
        let key = PublicKey::from_bytes(pair.public_key());
        Self { pair, key }
    }
}

pub type NodeService = EncodedPayloadService<Arc<LocalEnclave>>;

/// Enclave and transaction manager holding the keys of `parties`.
pub struct Node {
    pub enclave: Arc<LocalEnclave>,
    pub service: NodeService,
}

impl Node {
    pub fn new(parties: &[&Party]) -> Result<Self, EnclaveError> {
        Self::with_config(parties, &EnclaveConfig::default(), &TransactionManagerConfig::default())
    }

    pub fn with_config(
        parties: &[&Party],
        enclave_config: &EnclaveConfig,
        config: &TransactionManagerConfig,
    ) -> Result<Self, EnclaveError> {
        let root = root_span(&TelemetryConfig::default());
        let pairs = parties.iter().map(|party| party.pair.clone()).collect();

        let enclave = Arc::new(
            LocalEnclave::new(pairs, enclave_config)?
                .with_span(component_span(&root, "enclave")),
        );
        let service = EncodedPayloadService::from_config(enclave.clone(), config)
            .with_span(component_span(&root, "transaction"));

        Ok(Self { enclave, service })
    }

    /// Look up stored transactions in `source` during transitive validation.
    pub fn with_affected_source(mut self, source: Arc<dyn AffectedTransactionSource>) -> Self {
        self.service = self.service.with_affected_source(source);
        self
    }
}
