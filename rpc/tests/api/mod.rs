use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use withdrawer_index::{IndexSource, WithdrawalIndexHolder};
use withdrawer_prover::{ProofSubmitter, ProverConfig};
use withdrawer_types::predeploys;
use withdrawer_types::rpc::{
    ErrorKind, ErrorResponse, ExecutionResponse, HealthResponse, HealthStatus,
};

use super::{hash, StubProver, ALICE, BOB, PROOF_TX};

// Anvil's first development account.
const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

async fn get(url: String) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    (response.status(), response.json().await.unwrap())
}

async fn execute(base: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/execute-withdrawal"))
        .json(&body)
        .send()
        .await
        .unwrap();
    (response.status(), response.json().await.unwrap())
}

fn execution(hash: String) -> Value {
    json!({
        "hash": hash,
        "l1RpcUrl": "http://localhost:8545",
        "l2RpcUrl": "http://localhost:9545",
        "authMethod": "privateKey",
        "privateKey": DEV_KEY,
    })
}

fn error(body: Value) -> ErrorResponse {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn list_and_get() {
    super::init();
    let base = super::start_with_document(Arc::new(StubProver::default())).await;

    let (status, body) = get(format!("{base}/api/withdrawals")).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);
    // Hash is inlined first and source fields are echoed back as ingested.
    let first = records[0].as_object().unwrap();
    assert_eq!(first.keys().next().map(String::as_str), Some("hash"));
    assert_eq!(first["hash"], hash(0x11));
    assert_eq!(first["tokenType"], "ETH");
    assert_eq!(first["amount"], "1000");

    let (status, body) = get(format!("{base}/api/withdrawal/{}", hash(0x22))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hash"], hash(0x22));
    assert_eq!(body["message"], "0xc0ffee");

    // Records that cannot be executed are still served.
    let (status, _) = get(format!("{base}/api/withdrawal/{}", hash(0x33))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(format!("{base}/api/withdrawal/{}", hash(0x44))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = error(body);
    assert_eq!(body.error, "Withdrawal not found");
    assert_eq!(body.kind, ErrorKind::NotFound);

    let (status, _) = get(format!("{base}/api/withdrawal/not-a-hash")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search() {
    super::init();
    let base = super::start_with_document(Arc::new(StubProver::default())).await;

    let upper = ALICE.to_uppercase().replace("0X", "0x");
    let (status, body) = get(format!("{base}/api/search/{upper}")).await;
    assert_eq!(status, StatusCode::OK);
    let hashes: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["hash"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(hashes, vec![hash(0x22), hash(0x33), hash(0x11)]);

    let (status, body) = get(format!("{base}/api/search/{}", hash(0x11))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let unknown = "0x000000000000000000000000000000000000dead";
    let (status, body) = get(format!("{base}/api/search/{unknown}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error(body).error, "No withdrawals found for this address or hash");

    let (status, _) = get(format!("{base}/api/search/{BOB}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn execute_with_stub_prover() {
    super::init();
    let prover = Arc::new(StubProver::default());
    let base = super::start_with_document(prover.clone()).await;

    let (status, body) = execute(&base, execution(hash(0x11))).await;
    assert_eq!(status, StatusCode::OK);
    let response: ExecutionResponse = serde_json::from_value(body).unwrap();
    assert!(response.success);
    assert_eq!(response.transaction_hash, PROOF_TX);
    assert_eq!(response.message, "Withdrawal proven successfully");

    let requests = prover.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].sender, predeploys::L2_STANDARD_BRIDGE);
    assert_eq!(requests[0].target, predeploys::MAINNET_L1_STANDARD_BRIDGE);
    assert_eq!(requests[0].version(), 1);
}

#[tokio::test]
async fn execute_rejections() {
    super::init();
    let prover = Arc::new(StubProver::default());
    let base = super::start_with_document(prover.clone()).await;

    let (status, body) = execute(&base, json!({"hash": hash(0x11)})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = error(body);
    assert_eq!(body.error, "Missing required fields: hash, l1RpcUrl, l2RpcUrl");
    assert_eq!(body.kind, ErrorKind::ValidationError);

    let mut wallet = execution(hash(0x11));
    wallet["authMethod"] = json!("wallet");
    wallet["walletAddress"] = json!(ALICE);
    let (status, body) = execute(&base, wallet).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = error(body);
    assert_eq!(
        body.error,
        "Wallet authentication not yet implemented. Please use private key for now."
    );
    assert_eq!(body.kind, ErrorKind::UnsupportedAuthMethod);

    let (status, body) = execute(&base, execution(hash(0x44))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error(body).error,
        format!("Withdrawal with hash {} not found", hash(0x44))
    );

    let (status, body) = execute(&base, execution(hash(0x33))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = error(body);
    assert_eq!(body.error, "Failed to execute withdrawal");
    assert_eq!(body.kind, ErrorKind::UnsupportedRecordShape);
    assert!(body.details.is_some());

    // Nothing reached the prover.
    assert!(prover.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn execute_against_unreachable_rpc() {
    super::init();
    let prover = ProofSubmitter::new(ProverConfig {
        rpc_timeout: Duration::from_secs(5),
        ..Default::default()
    });
    let base = super::start_with_document(Arc::new(prover)).await;

    let unused = || format!("http://127.0.0.1:{}", portpicker::pick_unused_port().unwrap());
    let mut request = execution(hash(0x22));
    request["l1RpcUrl"] = json!(unused());
    request["l2RpcUrl"] = json!(unused());

    let (status, body) = execute(&base, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = error(body);
    assert_eq!(body.error, "Failed to execute withdrawal");
    assert_eq!(body.kind, ErrorKind::NetworkError);
}

#[tokio::test]
async fn health() {
    super::init();
    let base = super::start_with_document(Arc::new(StubProver::default())).await;
    let (status, body) = get(format!("{base}/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, HealthStatus::Ok);
    assert_eq!(health.withdrawals, 3);

    let missing = PathBuf::from("/nonexistent/withdrawals_parsed.json");
    let holder = WithdrawalIndexHolder::load(IndexSource::File(missing)).await;
    let base = super::start(holder, Arc::new(StubProver::default())).await;

    let (_, body) = get(format!("{base}/api/withdrawals")).await;
    assert_eq!(body, json!([]));
    let (status, body) = get(format!("{base}/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, HealthStatus::Unavailable);
    assert_eq!(health.withdrawals, 0);
    assert!(health.details.is_some());
}
