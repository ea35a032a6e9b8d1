//! # Privacy Graph
//!
//! Private state validation against a store of previously sent transactions.
//! Each accepted payload is recorded so later requests can depend on it.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Node, Party};
    use ctm_enclave::EnclaveConfig;
    use ctm_transaction::{
        EncodedPayloadManager, InMemoryAffectedTransactions, PrivacyViolation, SendRequest,
        TransactionError, TransactionManagerConfig, ValidationDepth,
    };
    use shared_types::{AffectedTransaction, EncodedPayload, PrivacyMode, PublicKey, TxHash};
    use std::sync::Arc;

    const PSV: PrivacyMode = PrivacyMode::PrivateStateValidation;

    fn transitive_node(party: &Party, store: Arc<InMemoryAffectedTransactions>) -> Node {
        let config = TransactionManagerConfig::default()
            .with_validation_depth(ValidationDepth::Transitive);
        Node::with_config(&[party], &EnclaveConfig::default(), &config)
            .unwrap()
            .with_affected_source(store)
    }

    // Stored form of an accepted payload, keyed by its content hash.
    fn record(
        node: &Node,
        store: &InMemoryAffectedTransactions,
        payload: &EncodedPayload,
    ) -> AffectedTransaction {
        let hash = TxHash::from(node.service.payload_hash(payload));
        let tx = AffectedTransaction::new(
            hash,
            payload.privacy_mode(),
            payload.recipient_keys().to_vec(),
        )
        .with_affected(payload.affected_contract_transactions().keys().copied().collect());
        store.insert(tx.clone());
        tx
    }

    fn psv_request(sender: PublicKey, recipients: Vec<PublicKey>, affected: Vec<AffectedTransaction>) -> SendRequest {
        SendRequest::new(sender, b"state".to_vec())
            .with_recipients(recipients)
            .with_privacy_mode(PSV)
            .with_exec_hash(b"merkle-root".to_vec())
            .with_affected_transactions(affected)
    }

    #[test]
    fn test_psv_chain_accepted() {
        let (s, r1) = (Party::generate(), Party::generate());
        let store = Arc::new(InMemoryAffectedTransactions::new());
        let node = transitive_node(&s, store.clone());

        let first = node.service.create(psv_request(s.key, vec![r1.key], vec![])).unwrap();
        let first_tx = record(&node, &store, &first);

        let second = node
            .service
            .create(psv_request(s.key, vec![r1.key], vec![first_tx]))
            .unwrap();
        let second_tx = record(&node, &store, &second);

        assert!(node
            .service
            .create(psv_request(s.key, vec![r1.key], vec![second_tx]))
            .is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_psv_recipient_change_rejected() {
        let (s, r1, r2) = (Party::generate(), Party::generate(), Party::generate());
        let store = Arc::new(InMemoryAffectedTransactions::new());
        let node = transitive_node(&s, store.clone());

        let first = node.service.create(psv_request(s.key, vec![r1.key], vec![])).unwrap();
        let first_tx = record(&node, &store, &first);

        let result = node
            .service
            .create(psv_request(s.key, vec![r1.key, r2.key], vec![first_tx.clone()]));

        assert_eq!(
            result,
            Err(TransactionError::ValidationRejected(
                PrivacyViolation::RecipientsMismatch { hash: *first_tx.hash() }
            ))
        );
    }

    #[test]
    fn test_psv_over_party_protection_dependency_rejected() {
        let (s, r1) = (Party::generate(), Party::generate());
        let store = Arc::new(InMemoryAffectedTransactions::new());
        let node = transitive_node(&s, store.clone());

        let pp = node
            .service
            .create(
                SendRequest::new(s.key, b"pp".to_vec())
                    .with_recipients(vec![r1.key])
                    .with_privacy_mode(PrivacyMode::PartyProtection),
            )
            .unwrap();
        let pp_tx = record(&node, &store, &pp);

        // A PSV transaction recorded as depending on the party-protection one.
        let psv_tx = AffectedTransaction::new(
            TxHash::from_bytes([0x5A; shared_types::HASH_LEN]),
            PSV,
            vec![s.key, r1.key],
        )
        .with_affected(vec![*pp_tx.hash()]);
        store.insert(psv_tx.clone());

        let result = node.service.create(psv_request(s.key, vec![r1.key], vec![psv_tx]));

        assert_eq!(
            result,
            Err(TransactionError::ValidationRejected(PrivacyViolation::ModeMismatch {
                hash: *pp_tx.hash(),
                expected: PSV,
                actual: PrivacyMode::PartyProtection,
            }))
        );
    }

    #[test]
    fn test_one_level_ignores_stored_dependencies() {
        let (s, r1) = (Party::generate(), Party::generate());
        let node = Node::new(&[&s]).unwrap();
        let affected = AffectedTransaction::new(
            TxHash::from_bytes([0x11; shared_types::HASH_LEN]),
            PSV,
            vec![s.key, r1.key],
        )
        .with_affected(vec![TxHash::from_bytes([0x22; shared_types::HASH_LEN])]);

        assert!(node
            .service
            .create(psv_request(s.key, vec![r1.key], vec![affected]))
            .is_ok());
    }
}
