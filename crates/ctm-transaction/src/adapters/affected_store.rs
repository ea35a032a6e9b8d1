//! In-memory stored-transaction lookup.

use crate::ports::outbound::AffectedTransactionSource;
use parking_lot::RwLock;
use shared_types::{AffectedTransaction, TxHash};
use std::collections::HashMap;

/// `AffectedTransactionSource` backed by a map, for tests and development.
#[derive(Debug, Default)]
pub struct InMemoryAffectedTransactions {
    transactions: RwLock<HashMap<TxHash, AffectedTransaction>>,
}

impl InMemoryAffectedTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stored transaction, replacing any previous entry.
    pub fn insert(&self, tx: AffectedTransaction) {
        self.transactions.write().insert(*tx.hash(), tx);
    }

    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }
}

impl AffectedTransactionSource for InMemoryAffectedTransactions {
    fn find(&self, hash: &TxHash) -> Option<AffectedTransaction> {
        self.transactions.read().get(hash).cloned()
    }
}
