use std::sync::Arc;

use poem::web::{Data, Json, Path};
use poem::{Endpoint, EndpointExt, Route};
use tracing::{error, info, warn};
use withdrawer_index::{IndexStatus, NotFound, WithdrawalIndexHolder};
use withdrawer_payload_builder::MessagePayloadBuilder;
use withdrawer_prover::{ProofRequest, WithdrawalProver};
use withdrawer_types::record::WithdrawalRecord;
use withdrawer_types::rpc::{
    ErrorKind, ExecutionRequest, ExecutionResponse, HealthResponse, HealthStatus,
};
use withdrawer_types::Hash;

use crate::error::ApiError;
use crate::validation::validate;

/// Records returned by `GET /api/withdrawals`.
pub const LIST_LIMIT: usize = 100;

pub struct Config {
    pub index: Arc<WithdrawalIndexHolder>,
    pub builder: MessagePayloadBuilder,
    pub prover: Arc<dyn WithdrawalProver>,
}

#[derive(Clone)]
struct State {
    index: Arc<WithdrawalIndexHolder>,
    builder: MessagePayloadBuilder,
    prover: Arc<dyn WithdrawalProver>,
}

#[poem::handler]
async fn list_withdrawals(Data(state): Data<&State>) -> Json<Vec<WithdrawalRecord>> {
    let snapshot = state.index.snapshot();
    Json(snapshot.index.list(LIST_LIMIT).to_vec())
}

#[poem::handler]
async fn get_withdrawal(
    Data(state): Data<&State>,
    Path(hash): Path<String>,
) -> Result<Json<WithdrawalRecord>, ApiError> {
    let snapshot = state.index.snapshot();
    // A path that is not a hash cannot name a withdrawal.
    let hash = hash
        .parse::<Hash>()
        .map_err(|_| ApiError::WithdrawalNotFound(NotFound(hash.clone())))?;
    let record = snapshot
        .index
        .lookup(&hash)
        .map_err(ApiError::WithdrawalNotFound)?;
    Ok(Json(record.clone()))
}

#[poem::handler]
async fn search(
    Data(state): Data<&State>,
    Path(query): Path<String>,
) -> Result<Json<Vec<WithdrawalRecord>>, ApiError> {
    let snapshot = state.index.snapshot();
    let found = snapshot
        .index
        .search(&query)
        .map_err(ApiError::NoMatches)?;
    Ok(Json(found.into_iter().cloned().collect()))
}

#[poem::handler]
async fn execute_withdrawal(
    Data(state): Data<&State>,
    body: poem::Result<Json<ExecutionRequest>>,
) -> Result<Json<ExecutionResponse>, ApiError> {
    let Json(request) = body.map_err(|err| ApiError::Body(err.to_string()))?;
    let result = execute(state, request).await;
    match &result {
        Ok(response) => info!(tx_hash = %response.transaction_hash, "Withdrawal proven"),
        Err(err) => match err.kind() {
            ErrorKind::ValidationError | ErrorKind::UnsupportedAuthMethod | ErrorKind::NotFound => {
                warn!(kind = %err.kind(), "Rejected withdrawal execution: {err}")
            }
            _ => error!(
                kind = %err.kind(),
                "Error executing withdrawal: {}",
                err.details().unwrap_or_default()
            ),
        },
    }
    result.map(Json)
}

async fn execute(state: &State, request: ExecutionRequest) -> Result<ExecutionResponse, ApiError> {
    let request = validate(&request)?;
    info!(hash = %request.hash, l1 = %request.l1_rpc_url, "Executing withdrawal");

    let message = {
        let snapshot = state.index.snapshot();
        let record = snapshot
            .index
            .lookup(&request.hash)
            .map_err(|_| ApiError::UnknownWithdrawal(request.hash))?;
        state.builder.build(record)?
    };

    let receipt = state
        .prover
        .prove(ProofRequest {
            message,
            l1_rpc_url: request.l1_rpc_url,
            l2_rpc_url: request.l2_rpc_url,
            private_key: request.private_key,
        })
        .await?;
    Ok(receipt.into())
}

#[poem::handler]
async fn health(Data(state): Data<&State>) -> Json<HealthResponse> {
    let snapshot = state.index.snapshot();
    let (status, details) = match &snapshot.status {
        IndexStatus::Loaded => (HealthStatus::Ok, None),
        IndexStatus::Unavailable(reason) => {
            (HealthStatus::Unavailable, Some(reason.clone()))
        }
    };
    Json(HealthResponse {
        status,
        withdrawals: snapshot.index.len(),
        details,
    })
}

pub fn endpoint(cfg: Config) -> impl Endpoint {
    let Config {
        index,
        builder,
        prover,
    } = cfg;
    Route::new()
        .at("/api/withdrawals", poem::get(list_withdrawals))
        .at("/api/withdrawal/:hash", poem::get(get_withdrawal))
        .at("/api/search/:query", poem::get(search))
        .at("/api/execute-withdrawal", poem::post(execute_withdrawal))
        .at("/api/health", poem::get(health))
        .with(poem::middleware::AddData::new(State {
            index,
            builder,
            prover,
        }))
}
