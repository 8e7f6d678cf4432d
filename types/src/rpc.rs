use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::{Hash, TxHash};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
pub enum AuthMethod {
    #[default]
    PrivateKey,
    /// Browser wallet signing. Accepted on the wire but not supported.
    Wallet,
}

/// Body of `POST /api/execute-withdrawal`.
///
/// Every field defaults to empty so that missing fields are reported by request
/// validation rather than by the JSON decoder.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub hash: String,
    pub l1_rpc_url: String,
    pub l2_rpc_url: String,
    pub auth_method: Option<AuthMethod>,
    pub private_key: String,
    pub wallet_address: String,
}

impl Debug for ExecutionRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionRequest")
            .field("hash", &self.hash)
            .field("l1_rpc_url", &self.l1_rpc_url)
            .field("l2_rpc_url", &self.l2_rpc_url)
            .field("auth_method", &self.auth_method)
            .field("private_key", &"<redacted>")
            .field("wallet_address", &self.wallet_address)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReceipt {
    pub transaction_hash: TxHash,
    pub withdrawal_hash: Hash,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub success: bool,
    pub transaction_hash: TxHash,
    pub message: String,
}

impl From<ProofReceipt> for ExecutionResponse {
    fn from(receipt: ProofReceipt) -> Self {
        Self {
            success: true,
            transaction_hash: receipt.transaction_hash,
            message: receipt.message,
        }
    }
}

/// Failure class reported to API clients, telling "fix your input" apart from
/// "try again later" and "will never succeed".
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, Display,
)]
pub enum ErrorKind {
    ValidationError,
    UnsupportedAuthMethod,
    NotFound,
    UnsupportedRecordShape,
    NetworkError,
    ContractError,
    ConfirmationTimeout,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthStatus {
    Ok,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub withdrawals: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
