//! # Send/Receive Scenarios
//!
//! Payloads created on one node and received on others, with the local
//! enclave doing real encryption.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Node, Party};
    use ctm_enclave::{EnclaveConfig, EnclaveError};
    use ctm_transaction::{
        EncodedPayloadManager, PrivacyViolation, ReceiveResponseDto, SendRequest,
        TransactionError, TransactionManagerConfig,
    };
    use proptest::prelude::*;
    use shared_types::{
        AffectedTransaction, EncodedPayload, MessageHash, PrivacyGroupId, PrivacyMode, TxHash,
        HASH_LEN,
    };

    fn tx_hash(byte: u8) -> TxHash {
        TxHash::from_bytes([byte; HASH_LEN])
    }

    // =============================================================================
    // STANDARD PRIVATE
    // =============================================================================

    #[test]
    fn test_standard_private_reaches_sender_and_recipients() {
        let (s, r1, r2) = (Party::generate(), Party::generate(), Party::generate());
        let sender = Node::new(&[&s]).unwrap();

        let payload = sender
            .service
            .create(SendRequest::new(s.key, b"standard".to_vec()).with_recipients(vec![r1.key, r2.key]))
            .unwrap();

        assert_eq!(payload.recipient_keys(), &[s.key, r1.key, r2.key]);
        assert_eq!(payload.recipient_boxes().len(), 3);

        for party in [&r1, &r2] {
            let node = Node::new(&[party]).unwrap();
            let response = node.service.decrypt(&payload, None).unwrap();
            assert_eq!(response.unencrypted_transaction_data, b"standard");
            assert_eq!(response.sender, s.key);
        }
    }

    #[test]
    fn test_duplicate_recipients_boxed_once() {
        let (s, r1) = (Party::generate(), Party::generate());
        let sender = Node::new(&[&s]).unwrap();

        let payload = sender
            .service
            .create(SendRequest::new(s.key, b"tx".to_vec()).with_recipients(vec![r1.key, s.key, r1.key]))
            .unwrap();

        assert_eq!(payload.recipient_keys(), &[s.key, r1.key]);
    }

    // =============================================================================
    // PARTY PROTECTION
    // =============================================================================

    #[test]
    fn test_party_protection_rejects_uncovered_recipient() {
        let (s, r1, r2) = (Party::generate(), Party::generate(), Party::generate());
        let sender = Node::new(&[&s]).unwrap();
        let affected = AffectedTransaction::new(
            tx_hash(1),
            PrivacyMode::PartyProtection,
            vec![s.key, r1.key],
        );

        let result = sender.service.create(
            SendRequest::new(s.key, b"tx".to_vec())
                .with_recipients(vec![r1.key, r2.key])
                .with_privacy_mode(PrivacyMode::PartyProtection)
                .with_affected_transactions(vec![affected]),
        );

        match result {
            Err(TransactionError::ValidationRejected(violation)) => {
                assert_eq!(violation.conflicting_transaction(), Some(&tx_hash(1)));
                assert_eq!(
                    violation,
                    PrivacyViolation::RecipientsNotCovered {
                        hash: tx_hash(1),
                        missing: vec![r2.key],
                    }
                );
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_party_protection_security_hashes_recorded() {
        let (s, r1) = (Party::generate(), Party::generate());
        let sender = Node::new(&[&s]).unwrap();
        let affected = AffectedTransaction::new(
            tx_hash(2),
            PrivacyMode::PartyProtection,
            vec![s.key, r1.key],
        );
        let request = SendRequest::new(s.key, b"tx".to_vec())
            .with_recipients(vec![r1.key])
            .with_privacy_mode(PrivacyMode::PartyProtection)
            .with_affected_transactions(vec![affected]);

        let first = sender.service.create(request.clone()).unwrap();
        let second = sender.service.create(request).unwrap();

        let first_hash = &first.affected_contract_transactions()[&tx_hash(2)];
        let second_hash = &second.affected_contract_transactions()[&tx_hash(2)];
        assert_eq!(first_hash.as_bytes().len(), 32);
        assert_ne!(first_hash, second_hash);

        let response = Node::new(&[&r1]).unwrap().service.decrypt(&first, None).unwrap();
        assert_eq!(response.privacy_mode, PrivacyMode::PartyProtection);
        assert!(response
            .affected_transactions
            .contains(&MessageHash::from(tx_hash(2))));
    }

    // =============================================================================
    // RECEIVING
    // =============================================================================

    #[test]
    fn test_receive_requires_a_local_recipient_key() {
        let (s, r1, r3) = (Party::generate(), Party::generate(), Party::generate());
        let payload = Node::new(&[&s])
            .unwrap()
            .service
            .create(SendRequest::new(s.key, b"for r1".to_vec()).with_recipients(vec![r1.key]))
            .unwrap();

        let recipient = Node::new(&[&r1]).unwrap();
        assert_eq!(
            recipient.service.decrypt(&payload, None).unwrap().unencrypted_transaction_data,
            b"for r1"
        );

        let outsider = Node::new(&[&r3]).unwrap();
        assert_eq!(
            outsider.service.decrypt(&payload, None),
            Err(TransactionError::RecipientKeyNotFound {
                payload_hash: outsider.service.payload_hash(&payload),
            })
        );
    }

    #[test]
    fn test_receive_searches_every_local_key() {
        let (s, r1) = (Party::generate(), Party::generate());
        let others: Vec<Party> = (0..3).map(|_| Party::generate()).collect();
        let payload = Node::new(&[&s])
            .unwrap()
            .service
            .create(SendRequest::new(s.key, b"tx".to_vec()).with_recipients(vec![r1.key]))
            .unwrap();

        let node = Node::new(&[&others[0], &others[1], &r1, &others[2]]).unwrap();

        assert_eq!(
            node.service.decrypt(&payload, None).unwrap().unencrypted_transaction_data,
            b"tx"
        );
    }

    #[test]
    fn test_explicit_key_not_a_recipient() {
        let (s, r1, r3) = (Party::generate(), Party::generate(), Party::generate());
        let payload = Node::new(&[&s])
            .unwrap()
            .service
            .create(SendRequest::new(s.key, b"tx".to_vec()).with_recipients(vec![r1.key]))
            .unwrap();

        let node = Node::new(&[&r1, &r3]).unwrap();

        assert!(matches!(
            node.service.decrypt(&payload, Some(r3.key)),
            Err(TransactionError::DecryptionFailure {
                source: EnclaveError::WrongKey(key),
                ..
            }) if key == r3.key
        ));
    }

    #[test]
    fn test_corrupted_payload_is_a_fault_not_a_missing_key() {
        let (s, r1) = (Party::generate(), Party::generate());
        let payload = Node::new(&[&s])
            .unwrap()
            .service
            .create(SendRequest::new(s.key, b"tx".to_vec()).with_recipients(vec![r1.key]))
            .unwrap();

        let mut json = serde_json::to_value(&payload).unwrap();
        let first = json["cipher_text"][0].as_u64().unwrap();
        json["cipher_text"][0] = serde_json::json!(first ^ 0x01);
        let corrupted: EncodedPayload = serde_json::from_value(json).unwrap();

        let result = Node::new(&[&r1]).unwrap().service.decrypt(&corrupted, None);

        assert!(matches!(
            result,
            Err(TransactionError::DecryptionFailure {
                source: EnclaveError::MalformedPayload(_),
                ..
            })
        ));
    }

    fn flip_low_bit(payload: &EncodedPayload, pointer: &str) -> EncodedPayload {
        let mut json = serde_json::to_value(payload).unwrap();
        let byte = json.pointer_mut(pointer).unwrap();
        *byte = serde_json::json!(byte.as_u64().unwrap() ^ 0x01);
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_corrupted_recipient_box_is_a_fault_not_a_missing_key() {
        let (s, r1) = (Party::generate(), Party::generate());
        let payload = Node::new(&[&s])
            .unwrap()
            .service
            .create(SendRequest::new(s.key, b"tx".to_vec()).with_recipients(vec![r1.key]))
            .unwrap();
        let receiver = Node::new(&[&r1]).unwrap();

        for pointer in ["/recipient_boxes/1/0", "/recipient_nonce/0"] {
            let corrupted = flip_low_bit(&payload, pointer);

            let result = receiver.service.decrypt(&corrupted, None);

            assert!(
                matches!(
                    result,
                    Err(TransactionError::DecryptionFailure {
                        source: EnclaveError::MalformedPayload(_),
                        ..
                    })
                ),
                "{pointer}: {result:?}"
            );
        }
    }

    // =============================================================================
    // FORWARDING KEYS
    // =============================================================================

    #[test]
    fn test_forwarding_key_receives_every_payload() {
        let (s, r1, archive) = (Party::generate(), Party::generate(), Party::generate());
        let sender = Node::with_config(
            &[&s],
            &EnclaveConfig::default().with_forwarding_key(&archive.key),
            &TransactionManagerConfig::default(),
        )
        .unwrap();

        let payload = sender
            .service
            .create(SendRequest::new(s.key, b"tx".to_vec()).with_recipients(vec![r1.key]))
            .unwrap();

        assert_eq!(payload.recipient_keys(), &[s.key, r1.key, archive.key]);
        let response = Node::new(&[&archive]).unwrap().service.decrypt(&payload, None).unwrap();
        assert_eq!(response.unencrypted_transaction_data, b"tx");
    }

    // =============================================================================
    // WIRE SHAPE
    // =============================================================================

    #[test]
    fn test_receive_response_wire_shape() {
        let (s, r1) = (Party::generate(), Party::generate());
        let affected = AffectedTransaction::new(
            tx_hash(3),
            PrivacyMode::PrivateStateValidation,
            vec![s.key, r1.key],
        );
        let payload = Node::new(&[&s])
            .unwrap()
            .service
            .create(
                SendRequest::new(s.key, b"psv".to_vec())
                    .with_recipients(vec![r1.key])
                    .with_privacy_mode(PrivacyMode::PrivateStateValidation)
                    .with_exec_hash(b"root".to_vec())
                    .with_privacy_group_id(PrivacyGroupId::new(b"group".to_vec()))
                    .with_affected_transactions(vec![affected]),
            )
            .unwrap();

        let response = Node::new(&[&r1]).unwrap().service.decrypt(&payload, None).unwrap();
        let json = serde_json::to_value(ReceiveResponseDto::from(&response)).unwrap();

        assert_eq!(json["privacyFlag"], 3);
        assert_eq!(json["payload"], "cHN2");
        assert_eq!(json["execHash"], "cm9vdA==");
        assert_eq!(
            json["affectedContractTransactions"][0],
            tx_hash(3).encode_to_base64()
        );
        assert_eq!(json["privacyGroupId"], "Z3JvdXA=");
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_sender_recovers_what_it_sent(
            message in proptest::collection::vec(any::<u8>(), 0..256),
            exec_hash in proptest::collection::vec(any::<u8>(), 0..32),
            mode in prop_oneof![Just(PrivacyMode::StandardPrivate), Just(PrivacyMode::PartyProtection)],
        ) {
            let (s, r1) = (Party::generate(), Party::generate());
            let node = Node::new(&[&s]).unwrap();

            let payload = node.service.create(
                SendRequest::new(s.key, message.clone())
                    .with_recipients(vec![r1.key])
                    .with_privacy_mode(mode)
                    .with_exec_hash(exec_hash.clone()),
            ).unwrap();
            let response = node.service.decrypt(&payload, Some(s.key)).unwrap();

            prop_assert_eq!(response.unencrypted_transaction_data, message);
            prop_assert_eq!(response.privacy_mode, mode);
            prop_assert_eq!(response.exec_hash, exec_hash);
            prop_assert_eq!(response.privacy_group_id, None);
        }
    }
}
