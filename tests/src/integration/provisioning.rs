//! # Key Provisioning
//!
//! Keys generated through the key generator factory, loaded back and used by
//! the local enclave.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Node, Party};
    use ctm_key_generation::{
        load_key_pair, ConfigKeyPair, GeneratedKeyPair, InMemoryKeyVaultProvider,
        KeyGenerationConfig, KeyGeneratorFactory, KeyVaultConfig, KeyVaultService, KeyVaultType,
    };
    use ctm_transaction::{EncodedPayloadManager, SendRequest};
    use std::sync::Arc;

    async fn generate(
        factory: &KeyGeneratorFactory,
        config: &KeyGenerationConfig,
        name: &str,
    ) -> GeneratedKeyPair {
        factory.create(config).unwrap().generate(name).await.unwrap()
    }

    #[tokio::test]
    async fn test_inline_keys_drive_the_enclave() {
        let factory = KeyGeneratorFactory::new(Arc::new(InMemoryKeyVaultProvider::new()));
        let config = KeyGenerationConfig::default();

        let sender_keys = generate(&factory, &config, "sender").await;
        let recipient_keys = generate(&factory, &config, "recipient").await;
        assert!(matches!(sender_keys.config_key_pair, ConfigKeyPair::Direct { .. }));

        let sender = Party::from_pair(load_key_pair(&sender_keys.config_key_pair, None).await.unwrap());
        let recipient =
            Party::from_pair(load_key_pair(&recipient_keys.config_key_pair, None).await.unwrap());
        assert_eq!(sender.key, sender_keys.public_key);

        let payload = Node::new(&[&sender])
            .unwrap()
            .service
            .create(SendRequest::new(sender.key, b"provisioned".to_vec()).with_recipients(vec![recipient.key]))
            .unwrap();
        let response = Node::new(&[&recipient]).unwrap().service.decrypt(&payload, None).unwrap();

        assert_eq!(response.unencrypted_transaction_data, b"provisioned");
    }

    #[tokio::test]
    async fn test_vault_keys_drive_the_enclave() {
        let provider = Arc::new(InMemoryKeyVaultProvider::new());
        let factory = KeyGeneratorFactory::new(provider.clone());
        let config = KeyGenerationConfig::default().with_vault(KeyVaultConfig::Hashicorp {
            url: "https://vault.local:8200".to_string(),
            approle_path: "approle".to_string(),
            tls_key_store_path: None,
            tls_trust_store_path: None,
        });

        let generated = generate(&factory, &config, "node").await;
        let vault = provider.vault(KeyVaultType::Hashicorp);

        let pair = load_key_pair(
            &generated.config_key_pair,
            Some(vault.as_ref() as &dyn KeyVaultService),
        )
        .await
        .unwrap();
        let party = Party::from_pair(pair);
        assert_eq!(party.key, generated.public_key);

        let node = Node::new(&[&party]).unwrap();
        let payload = node
            .service
            .create(SendRequest::new(party.key, b"self".to_vec()))
            .unwrap();

        assert_eq!(
            node.service.decrypt(&payload, None).unwrap().unencrypted_transaction_data,
            b"self"
        );
    }
}
