//! Common test utilities and helpers
//!
//! A wiremock-backed NEAR node that serves the robot contract with a
//! mutable direction, plus settings pointing the harness at it. Responses
//! carry every field the NEAR client's view types expect.

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use robot_e2e::{Direction, KeyPair, Settings};
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const CONTRACT: &str = "robot.alice.testnet";
pub const CLIENT: &str = "alice.testnet";
pub const ACCESS_KEY_NONCE: u64 = 41;
pub const BLOCK_HASH: [u8; 32] = [9u8; 32];
pub const TX_HASH: [u8; 32] = [1u8; 32];
pub const RECEIPT_ID: [u8; 32] = [2u8; 32];

/// JSON-RPC methods that submit a signed transaction
pub const TX_METHODS: [&str; 2] = ["send_tx", "broadcast_tx_commit"];

/// Deterministic client key
pub fn test_key() -> KeyPair {
    KeyPair::from_seed([7u8; 32])
}

pub fn hash(bytes: [u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

pub fn tx_hash() -> String {
    hash(TX_HASH)
}

/// JSON-RPC success envelope
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": result,
    }))
}

/// JSON-RPC handler error with the given cause
pub fn rpc_error(cause: &str, info: Value, data: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "error": {
            "name": "HANDLER_ERROR",
            "cause": {"name": cause, "info": info},
            "code": -32000,
            "message": "Server error",
            "data": data,
        }
    }))
}

/// `call_function` result carrying `value` as JSON bytes
pub fn view_result(value: Value) -> ResponseTemplate {
    let bytes = serde_json::to_vec(&value).unwrap();
    rpc_result(json!({
        "result": bytes,
        "logs": [],
        "block_height": 100,
        "block_hash": hash(BLOCK_HASH),
    }))
}

/// `view_account` result for an existing account
pub fn account_view() -> Value {
    json!({
        "amount": "100000000000000000000000000",
        "locked": "0",
        "code_hash": hash([0u8; 32]),
        "storage_usage": 182,
        "storage_paid_at": 0,
        "block_height": 100,
        "block_hash": hash(BLOCK_HASH),
    })
}

/// Node status as reported by a synced testnet RPC node
pub fn status_view() -> Value {
    json!({
        "version": {"version": "2.3.0", "build": "mock", "commit": "mock", "rustc_version": "1.82.0"},
        "chain_id": "testnet",
        "protocol_version": 73,
        "latest_protocol_version": 73,
        "rpc_addr": "0.0.0.0:3030",
        "validators": [],
        "sync_info": {
            "latest_block_hash": hash(BLOCK_HASH),
            "latest_block_height": 100,
            "latest_state_root": hash([3u8; 32]),
            "latest_block_time": "2024-05-01T12:00:00.000000000Z",
            "syncing": false,
            "earliest_block_hash": hash([4u8; 32]),
            "earliest_block_height": 1,
            "earliest_block_time": "2024-04-01T12:00:00.000000000Z",
            "epoch_id": hash([5u8; 32]),
            "epoch_start_height": 1
        },
        "validator_account_id": null,
        "validator_public_key": null,
        "node_public_key": test_key().public_key(),
        "node_key": null,
        "uptime_sec": 3600,
        "genesis_hash": hash([6u8; 32]),
        "detailed_debug_status": null
    })
}

fn execution_outcome(id: [u8; 32], executor: &str, status: Value, receipt_ids: Vec<String>) -> Value {
    json!({
        "proof": [],
        "block_hash": hash(BLOCK_HASH),
        "id": hash(id),
        "outcome": {
            "logs": [],
            "receipt_ids": receipt_ids,
            "gas_burnt": 2_428_000_000_000u64,
            "tokens_burnt": "242800000000000000000",
            "executor_id": executor,
            "status": status,
            "metadata": {"version": 1, "gas_profile": null}
        }
    })
}

/// Final execution outcome of one `turn_right` call whose receipt ended
/// with `receipt_status`
pub fn tx_outcome(status: Value, receipt_status: Value) -> Value {
    json!({
        "final_execution_status": "FINAL",
        "status": status,
        "transaction": {
            "signer_id": CLIENT,
            "public_key": test_key().public_key(),
            "nonce": ACCESS_KEY_NONCE + 1,
            "receiver_id": CONTRACT,
            "actions": [{"FunctionCall": {
                "method_name": "turn_right",
                "args": "e30=",
                "gas": 30_000_000_000_000u64,
                "deposit": "0"
            }}],
            "priority_fee": 0,
            "signature": format!("ed25519:{}", bs58::encode([8u8; 64]).into_string()),
            "hash": tx_hash()
        },
        "transaction_outcome": execution_outcome(
            TX_HASH,
            CLIENT,
            json!({"SuccessReceiptId": hash(RECEIPT_ID)}),
            vec![hash(RECEIPT_ID)],
        ),
        "receipts_outcome": [execution_outcome(RECEIPT_ID, CONTRACT, receipt_status, vec![])]
    })
}

pub fn tx_success() -> Value {
    tx_outcome(json!({"SuccessValue": ""}), json!({"SuccessValue": ""}))
}

/// A contract panic while executing `turn_right`
pub fn tx_panic(message: &str) -> Value {
    let failure = json!({"ActionError": {
        "index": 0,
        "kind": {"FunctionCallError": {"ExecutionError": message}}
    }});
    tx_outcome(json!({"Failure": failure.clone()}), json!({"Failure": failure}))
}

/// Mount `response` for every transaction submission method
pub async fn mount_tx_response(server: &MockServer, response: ResponseTemplate) {
    for rpc_method in TX_METHODS {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": rpc_method})))
            .respond_with(response.clone())
            .with_priority(1)
            .mount(server)
            .await;
    }
}

/// Borsh bytes of the signed transaction in a submission request
pub fn signed_transaction_bytes(request: &Request) -> Vec<u8> {
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    let encoded = body["params"]["signed_tx_base64"]
        .as_str()
        .or_else(|| body["params"][0].as_str())
        .unwrap();
    STANDARD.decode(encoded).unwrap()
}

pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// `direction` view backed by the shared state
struct DirectionView(Arc<Mutex<Direction>>);

impl Respond for DirectionView {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let direction = *self.0.lock().unwrap();
        view_result(json!(direction.as_str()))
    }
}

/// Transaction submission that applies `turn_right` to the shared state
struct TurnRight(Arc<Mutex<Direction>>);

impl Respond for TurnRight {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let mut direction = self.0.lock().unwrap();
        *direction = direction.turned_right();
        rpc_result(tx_success())
    }
}

/// Mock node serving the robot contract
pub struct MockNode {
    pub server: MockServer,
    direction: Arc<Mutex<Direction>>,
}

impl MockNode {
    /// Node whose contract currently faces `initial`
    pub async fn start(initial: &str) -> Self {
        let server = MockServer::start().await;
        let direction = Arc::new(Mutex::new(Direction::from_str(initial).unwrap()));

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "status"})))
            .respond_with(rpc_result(status_view()))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"params": {"request_type": "view_account"}})))
            .respond_with(rpc_result(account_view()))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"params": {"request_type": "view_access_key"}})))
            .respond_with(rpc_result(json!({
                "nonce": ACCESS_KEY_NONCE,
                "permission": "FullAccess",
                "block_height": 100,
                "block_hash": hash(BLOCK_HASH),
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"params": {"method_name": "get_owner"}})))
            .respond_with(view_result(json!(CONTRACT)))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"params": {"method_name": "direction"}})))
            .respond_with(DirectionView(direction.clone()))
            .mount(&server)
            .await;

        for rpc_method in TX_METHODS {
            Mock::given(method("POST"))
                .and(body_partial_json(json!({"method": rpc_method})))
                .respond_with(TurnRight(direction.clone()))
                .mount(&server)
                .await;
        }

        Self { server, direction }
    }

    pub fn direction(&self) -> Direction {
        *self.direction.lock().unwrap()
    }

    /// Requests whose JSON-RPC method is `rpc_method`
    pub async fn requests_for(&self, rpc_method: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| {
                serde_json::from_slice::<Value>(&r.body)
                    .map(|body| body["method"] == rpc_method)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Transaction submissions, whichever method the client used
    pub async fn transactions(&self) -> Vec<Request> {
        let mut requests = Vec::new();
        for rpc_method in TX_METHODS {
            requests.extend(self.requests_for(rpc_method).await);
        }
        requests
    }

    /// `query` requests of the given `request_type`
    pub async fn queries(&self, request_type: &str) -> Vec<Request> {
        self.requests_for("query")
            .await
            .into_iter()
            .filter(|r| {
                serde_json::from_slice::<Value>(&r.body)
                    .map(|body| body["params"]["request_type"] == request_type)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Settings pointing the harness at this node
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.network.node_url = self.server.uri();
        settings.network.request_timeout = 5;
        settings.contract.contract_name = Some(CONTRACT.to_string());
        settings.client.account_id = Some(CLIENT.to_string());
        settings.client.private_key = Some(test_key().secret_key());
        settings
    }
}
