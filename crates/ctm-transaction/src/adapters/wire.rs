//! Receive-response wire shape.
//!
//! Field names and the integer privacy flag are fixed for compatibility with
//! existing API consumers.

use crate::domain::entities::ReceiveResponse;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use shared_types::{PrivacyMode, TypesError};

/// JSON body returned for a receive request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveResponseDto {
    /// Decrypted payload, base64
    pub payload: String,
    /// 0 = standard private, 1 = party protection, 3 = private state validation
    pub privacy_flag: i64,
    /// Affected transaction hashes, base64
    #[serde(default)]
    pub affected_contract_transactions: Vec<String>,
    /// Execution hash, base64
    #[serde(default)]
    pub exec_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_group_id: Option<String>,
}

impl ReceiveResponseDto {
    /// Decode the payload field.
    pub fn decoded_payload(&self) -> Result<Vec<u8>, TypesError> {
        STANDARD
            .decode(&self.payload)
            .map_err(|e| TypesError::InvalidEncoding {
                kind: "payload",
                reason: e.to_string(),
            })
    }

    /// Parse the privacy flag.
    pub fn privacy_mode(&self) -> Result<PrivacyMode, TypesError> {
        PrivacyMode::from_flag(self.privacy_flag)
    }
}

impl From<&ReceiveResponse> for ReceiveResponseDto {
    fn from(response: &ReceiveResponse) -> Self {
        Self {
            payload: STANDARD.encode(&response.unencrypted_transaction_data),
            privacy_flag: response.privacy_mode.flag(),
            affected_contract_transactions: response
                .affected_transactions
                .iter()
                .map(|hash| hash.encode_to_base64())
                .collect(),
            exec_hash: STANDARD.encode(&response.exec_hash),
            privacy_group_id: response
                .privacy_group_id
                .as_ref()
                .map(|id| id.encode_to_base64()),
        }
    }
}
