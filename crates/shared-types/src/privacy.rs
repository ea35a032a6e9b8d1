//! # Privacy Metadata
//!
//! Privacy modes, affected-transaction references and the metadata embedded
//! into every encoded payload.

use crate::entities::{PrivacyGroupId, PublicKey, TxHash};
use crate::errors::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PRIVACY MODE
// =============================================================================

/// Transaction-level privacy policy.
///
/// The integer flags are part of the wire contract and skip 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PrivacyMode {
    /// No cross-transaction consistency requirements.
    #[default]
    StandardPrivate,
    /// Every affected transaction must be shared with all new recipients.
    PartyProtection,
    /// All parties must hold identical state for every affected transaction.
    PrivateStateValidation,
}

impl PrivacyMode {
    /// Integer flag used on the wire.
    pub const fn flag(self) -> i64 {
        match self {
            PrivacyMode::StandardPrivate => 0,
            PrivacyMode::PartyProtection => 1,
            PrivacyMode::PrivateStateValidation => 3,
        }
    }

    /// Parse a wire flag.
    pub fn from_flag(flag: i64) -> Result<Self, TypesError> {
        match flag {
            0 => Ok(PrivacyMode::StandardPrivate),
            1 => Ok(PrivacyMode::PartyProtection),
            3 => Ok(PrivacyMode::PrivateStateValidation),
            other => Err(TypesError::UnknownPrivacyFlag(other)),
        }
    }
}

impl fmt::Display for PrivacyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrivacyMode::StandardPrivate => "STANDARD_PRIVATE",
            PrivacyMode::PartyProtection => "PARTY_PROTECTION",
            PrivacyMode::PrivateStateValidation => "PRIVATE_STATE_VALIDATION",
        };
        f.write_str(name)
    }
}

impl TryFrom<i64> for PrivacyMode {
    type Error = TypesError;

    fn try_from(flag: i64) -> Result<Self, Self::Error> {
        Self::from_flag(flag)
    }
}

impl From<PrivacyMode> for i64 {
    fn from(mode: PrivacyMode) -> Self {
        mode.flag()
    }
}

// =============================================================================
// AFFECTED TRANSACTION
// =============================================================================

/// A previously stored transaction the new transaction depends on.
///
/// Carries the stored transaction's recorded privacy mode and recipients.
/// Used for validation only; it is never re-encrypted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedTransaction {
    hash: TxHash,
    privacy_mode: PrivacyMode,
    recipients: Vec<PublicKey>,
    affected: Vec<TxHash>,
}

impl AffectedTransaction {
    /// Reference a stored transaction with its recorded mode and recipients.
    pub fn new(hash: TxHash, privacy_mode: PrivacyMode, recipients: Vec<PublicKey>) -> Self {
        Self {
            hash,
            privacy_mode,
            recipients,
            affected: Vec::new(),
        }
    }

    /// Attach the stored transaction's own affected-transaction hashes.
    pub fn with_affected(mut self, affected: Vec<TxHash>) -> Self {
        self.affected = affected;
        self
    }

    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    pub fn privacy_mode(&self) -> PrivacyMode {
        self.privacy_mode
    }

    pub fn recipients(&self) -> &[PublicKey] {
        &self.recipients
    }

    /// Hashes of the transactions this stored transaction itself affected.
    pub fn affected(&self) -> &[TxHash] {
        &self.affected
    }
}

// =============================================================================
// PRIVACY METADATA
// =============================================================================

/// Privacy metadata embedded into an encoded payload.
///
/// Immutable once built; use [`PrivacyMetaData::builder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyMetaData {
    privacy_mode: PrivacyMode,
    affected_transactions: Vec<AffectedTransaction>,
    privacy_group_id: Option<PrivacyGroupId>,
    exec_hash: Vec<u8>,
}

impl PrivacyMetaData {
    pub fn builder() -> PrivacyMetaDataBuilder {
        PrivacyMetaDataBuilder::default()
    }

    pub fn privacy_mode(&self) -> PrivacyMode {
        self.privacy_mode
    }

    pub fn affected_transactions(&self) -> &[AffectedTransaction] {
        &self.affected_transactions
    }

    pub fn privacy_group_id(&self) -> Option<&PrivacyGroupId> {
        self.privacy_group_id.as_ref()
    }

    pub fn exec_hash(&self) -> &[u8] {
        &self.exec_hash
    }
}

/// Accumulating builder for [`PrivacyMetaData`].
#[derive(Clone, Debug, Default)]
pub struct PrivacyMetaDataBuilder {
    privacy_mode: Option<PrivacyMode>,
    affected_transactions: Vec<AffectedTransaction>,
    privacy_group_id: Option<PrivacyGroupId>,
    exec_hash: Vec<u8>,
}

impl PrivacyMetaDataBuilder {
    pub fn with_privacy_mode(mut self, mode: PrivacyMode) -> Self {
        self.privacy_mode = Some(mode);
        self
    }

    pub fn with_affected_transactions(mut self, affected: Vec<AffectedTransaction>) -> Self {
        self.affected_transactions = affected;
        self
    }

    pub fn with_privacy_group_id(mut self, group_id: PrivacyGroupId) -> Self {
        self.privacy_group_id = Some(group_id);
        self
    }

    pub fn with_exec_hash(mut self, exec_hash: impl Into<Vec<u8>>) -> Self {
        self.exec_hash = exec_hash.into();
        self
    }

    /// Finalize the metadata.
    ///
    /// # Errors
    /// * `TypesError::MissingField` - no privacy mode was set
    /// * `TypesError::MissingExecHash` - private state validation without an
    ///   execution hash
    pub fn build(self) -> Result<PrivacyMetaData, TypesError> {
        let privacy_mode = self
            .privacy_mode
            .ok_or(TypesError::MissingField("privacy_mode"))?;

        if privacy_mode == PrivacyMode::PrivateStateValidation && self.exec_hash.is_empty() {
            return Err(TypesError::MissingExecHash);
        }

        Ok(PrivacyMetaData {
            privacy_mode,
            affected_transactions: self.affected_transactions,
            privacy_group_id: self.privacy_group_id,
            exec_hash: self.exec_hash,
        })
    }
}
