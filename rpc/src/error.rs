use std::error::Error as StdError;

use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use withdrawer_index::NotFound;
use withdrawer_payload_builder::PayloadError;
use withdrawer_prover::ProofError;
use withdrawer_types::rpc::{ErrorKind, ErrorResponse};
use withdrawer_types::Hash;

use crate::validation::ValidationError;

/// Failure of an API call. `Display` is the coarse message put in the `error` field.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    Body(String),
    #[error("{0}")]
    Validation(ValidationError),
    #[error("Withdrawal not found")]
    WithdrawalNotFound(#[source] NotFound),
    #[error("No withdrawals found for this address or hash")]
    NoMatches(#[source] NotFound),
    #[error("Withdrawal with hash {0} not found")]
    UnknownWithdrawal(Hash),
    #[error("Failed to execute withdrawal")]
    Payload(#[from] PayloadError),
    #[error("Failed to execute withdrawal")]
    Proof(#[from] ProofError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Body(_) => ErrorKind::ValidationError,
            Self::Validation(err) => err.kind(),
            Self::WithdrawalNotFound(_) | Self::NoMatches(_) | Self::UnknownWithdrawal(_) => {
                ErrorKind::NotFound
            }
            Self::Payload(_) => ErrorKind::UnsupportedRecordShape,
            Self::Proof(err) => err.kind(),
        }
    }

    /// Full error chain below the coarse message.
    pub fn details(&self) -> Option<String> {
        let mut cause = self.source()?;
        let mut details = cause.to_string();
        while let Some(next) = cause.source() {
            details.push_str(": ");
            details.push_str(&next.to_string());
            cause = next;
        }
        Some(details)
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
            details: self.details(),
        }
    }
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ValidationError | ErrorKind::UnsupportedAuthMethod => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::UnsupportedRecordShape
            | ErrorKind::NetworkError
            | ErrorKind::ContractError
            | ErrorKind::ConfirmationTimeout => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response
    where
        Self: StdError + Send + Sync + 'static,
    {
        Json(self.body()).with_status(self.status()).into_response()
    }
}
