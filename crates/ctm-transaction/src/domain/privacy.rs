//! # Privacy Validator
//!
//! Decides whether a new transaction's privacy mode and recipients are
//! consistent with the transactions it declares as affected.
//!
//! ## Rules
//!
//! | Mode | Affected transaction must |
//! |------|---------------------------|
//! | Standard private | (nothing) |
//! | Party protection | share the mode; be shared with every new recipient |
//! | Private state validation | share the mode; have exactly the new recipients; with `Transitive` depth, depend only on private-state-validation transactions |
//!
//! Every mode requires a non-empty recipient set. All rules are evaluated;
//! `validate` reports the first violation found in evaluation order.

use crate::config::ValidationDepth;
use crate::domain::errors::PrivacyViolation;
use crate::ports::outbound::AffectedTransactionSource;
use shared_types::{AffectedTransaction, PrivacyMode, PublicKey, TxHash};
use std::collections::HashSet;
use std::sync::Arc;

/// Pure, stateless privacy-mode validator.
#[derive(Clone, Default)]
pub struct PrivacyValidator {
    depth: ValidationDepth,
    source: Option<Arc<dyn AffectedTransactionSource>>,
}

impl PrivacyValidator {
    pub fn new(depth: ValidationDepth) -> Self {
        Self {
            depth,
            source: None,
        }
    }

    /// Stored-transaction lookup used to follow the graph past the first
    /// level. Without one, deeper references are reported as unresolved.
    pub fn with_source(mut self, source: Arc<dyn AffectedTransactionSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn depth(&self) -> ValidationDepth {
        self.depth
    }

    /// Accept or reject a request, naming the first violation.
    pub fn validate(
        &self,
        mode: PrivacyMode,
        recipients: &[PublicKey],
        affected: &[AffectedTransaction],
    ) -> Result<(), PrivacyViolation> {
        match self.violations(mode, recipients, affected).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every violation of the rules for `mode`, in evaluation order.
    pub fn violations(
        &self,
        mode: PrivacyMode,
        recipients: &[PublicKey],
        affected: &[AffectedTransaction],
    ) -> Vec<PrivacyViolation> {
        let mut violations = Vec::new();

        if recipients.is_empty() {
            violations.push(PrivacyViolation::EmptyRecipients);
        }

        let new_recipients: HashSet<&PublicKey> = recipients.iter().collect();

        match mode {
            PrivacyMode::StandardPrivate => {}
            PrivacyMode::PartyProtection => {
                for tx in affected {
                    check_mode(mode, tx, &mut violations);

                    let recorded: HashSet<&PublicKey> = tx.recipients().iter().collect();
                    let missing: Vec<PublicKey> = recipients
                        .iter()
                        .filter(|key| !recorded.contains(key))
                        .copied()
                        .collect();
                    if !missing.is_empty() {
                        violations.push(PrivacyViolation::RecipientsNotCovered {
                            hash: *tx.hash(),
                            missing,
                        });
                    }
                }
            }
            PrivacyMode::PrivateStateValidation => {
                for tx in affected {
                    check_mode(mode, tx, &mut violations);

                    let recorded: HashSet<&PublicKey> = tx.recipients().iter().collect();
                    if recorded != new_recipients {
                        violations.push(PrivacyViolation::RecipientsMismatch { hash: *tx.hash() });
                    }
                }

                if self.depth == ValidationDepth::Transitive {
                    self.check_graph(affected, &mut violations);
                }
            }
        }

        violations
    }

    fn check_graph(&self, affected: &[AffectedTransaction], violations: &mut Vec<PrivacyViolation>) {
        let mut finished = HashSet::new();
        let mut path = Vec::new();

        for tx in affected {
            self.walk(tx, &mut path, &mut finished, violations);
        }
    }

    // Depth-first over stored dependencies. `path` holds the hashes on the
    // current branch so a back edge is reported as a cycle instead of
    // being followed.
    fn walk(
        &self,
        tx: &AffectedTransaction,
        path: &mut Vec<TxHash>,
        finished: &mut HashSet<TxHash>,
        violations: &mut Vec<PrivacyViolation>,
    ) {
        if finished.contains(tx.hash()) {
            return;
        }
        path.push(*tx.hash());

        for hash in tx.affected() {
            if path.contains(hash) {
                violations.push(PrivacyViolation::AffectedTransactionCycle { hash: *hash });
                continue;
            }
            if finished.contains(hash) {
                continue;
            }

            match self.source.as_ref().and_then(|source| source.find(hash)) {
                Some(dependency) => {
                    check_mode(PrivacyMode::PrivateStateValidation, &dependency, violations);
                    self.walk(&dependency, path, finished, violations);
                }
                None => {
                    violations.push(PrivacyViolation::UnresolvedAffectedTransaction { hash: *hash });
                    finished.insert(*hash);
                }
            }
        }

        path.pop();
        finished.insert(*tx.hash());
    }
}

impl std::fmt::Debug for PrivacyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivacyValidator")
            .field("depth", &self.depth)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

fn check_mode(
    expected: PrivacyMode,
    tx: &AffectedTransaction,
    violations: &mut Vec<PrivacyViolation>,
) {
    if tx.privacy_mode() != expected {
        violations.push(PrivacyViolation::ModeMismatch {
            hash: *tx.hash(),
            expected,
            actual: tx.privacy_mode(),
        });
    }
}
