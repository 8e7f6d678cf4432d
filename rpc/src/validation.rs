use std::fmt::{self, Debug, Formatter};

use url::Url;
use withdrawer_types::rpc::{AuthMethod, ErrorKind, ExecutionRequest};
use withdrawer_types::Hash;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: hash, l1RpcUrl, l2RpcUrl")]
    MissingFields,
    #[error("Private key is required when using privateKey authentication")]
    MissingPrivateKey,
    #[error("Wallet address is required when using wallet authentication")]
    MissingWalletAddress,
    #[error("Malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("Wallet authentication not yet implemented. Please use private key for now.")]
    UnsupportedAuthMethod,
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedAuthMethod => ErrorKind::UnsupportedAuthMethod,
            _ => ErrorKind::ValidationError,
        }
    }
}

/// An [`ExecutionRequest`] that passed validation, with its fields parsed.
#[derive(Clone)]
pub struct ValidatedRequest {
    pub hash: Hash,
    pub l1_rpc_url: Url,
    pub l2_rpc_url: Url,
    pub private_key: String,
}

impl Debug for ValidatedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRequest")
            .field("hash", &self.hash)
            .field("l1_rpc_url", &self.l1_rpc_url)
            .field("l2_rpc_url", &self.l2_rpc_url)
            .finish_non_exhaustive()
    }
}

/// Checks an execution request before any index or network access.
pub fn validate(request: &ExecutionRequest) -> Result<ValidatedRequest, ValidationError> {
    let ExecutionRequest {
        hash,
        l1_rpc_url,
        l2_rpc_url,
        auth_method,
        private_key,
        wallet_address,
    } = request;

    if hash.is_empty() || l1_rpc_url.is_empty() || l2_rpc_url.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let hash = hash
        .trim()
        .parse::<Hash>()
        .map_err(|err| ValidationError::Malformed {
            field: "hash",
            reason: err.to_string(),
        })?;
    let l1_rpc_url = rpc_url("l1RpcUrl", l1_rpc_url)?;
    let l2_rpc_url = rpc_url("l2RpcUrl", l2_rpc_url)?;

    match auth_method.unwrap_or_default() {
        AuthMethod::PrivateKey if private_key.is_empty() => {
            Err(ValidationError::MissingPrivateKey)
        }
        AuthMethod::PrivateKey => Ok(ValidatedRequest {
            hash,
            l1_rpc_url,
            l2_rpc_url,
            private_key: private_key.clone(),
        }),
        AuthMethod::Wallet if wallet_address.is_empty() => {
            Err(ValidationError::MissingWalletAddress)
        }
        AuthMethod::Wallet => Err(ValidationError::UnsupportedAuthMethod),
    }
}

fn rpc_url(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    let malformed = |reason: String| ValidationError::Malformed { field, reason };
    let url = Url::parse(value.trim()).map_err(|err| malformed(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(malformed(format!("unsupported scheme {scheme}"))),
    }
}
