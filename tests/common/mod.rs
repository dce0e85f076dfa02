// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Minimal Sui JSON-RPC node served by axum on a loopback port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use eduverse_server::blockchain::SuiAddress;

pub const PACKAGE_ID: &str = "0xa11ce";
pub const DATABASE_ID: &str = "0xdb";
pub const DATABASE_SHARED_VERSION: u64 = 3;
pub const OBJECT_VERSION: u64 = 7;
pub const GAS_PRICE: u64 = 1_000;
pub const CHAIN_ID: &str = "4c78adac";

/// Digest reported for every object and coin.
pub fn digest() -> String {
    bs58::encode([3u8; 32]).into_string()
}

pub struct NodeState {
    /// Every JSON-RPC request received, in arrival order.
    pub requests: Mutex<Vec<Value>>,
    /// `(coin id, balance)` pairs owned by every address.
    pub coins: Vec<(String, u64)>,
    /// `returnValues` of every dev-inspect call.
    pub return_values: Value,
    /// Method answered with a JSON-RPC error.
    pub failing_method: Option<String>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            coins: vec![
                ("0x51".into(), 10_000_000),
                ("0x52".into(), 900_000_000),
                ("0x53".into(), 60_000_000),
            ],
            return_values: json!([]),
            failing_method: None,
        }
    }
}

impl NodeState {
    /// Params of every request made with `method`, in order.
    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request["method"] == method)
            .map(|request| request["params"].clone())
            .collect()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

pub struct FakeNode {
    pub url: String,
    pub state: Arc<NodeState>,
}

/// Serve `state` on an ephemeral loopback port.
pub async fn spawn(state: NodeState) -> FakeNode {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeNode {
        url: format!("http://{addr}"),
        state,
    }
}

/// URL of a loopback port with nothing listening.
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn handle_rpc(State(state): State<Arc<NodeState>>, Json(request): Json<Value>) -> Json<Value> {
    state.requests.lock().unwrap().push(request.clone());
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();

    if state.failing_method.as_deref() == Some(method) {
        return Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32000, "message": format!("{method} unavailable") }
        }));
    }

    let result = match method {
        "sui_getObject" => object(&request["params"][0]),
        "suix_getReferenceGasPrice" => json!(GAS_PRICE.to_string()),
        "suix_getCoins" => coins(&state),
        "sui_executeTransactionBlock" => json!({
            "digest": "5Hc8Fq",
            "effects": { "status": { "status": "success" } },
            "objectChanges": [
                { "type": "mutated", "objectType": "0x2::coin::Coin<0x2::sui::SUI>", "objectId": "0x53" },
                { "type": "created", "objectType": format!("{PACKAGE_ID}::courses::Course"), "objectId": "0xc0" }
            ],
            "balanceChanges": [
                { "owner": { "AddressOwner": "0x1" }, "coinType": "0x2::sui::SUI", "amount": "-2500000000" }
            ]
        }),
        "sui_devInspectTransactionBlock" => json!({
            "effects": { "status": { "status": "success" } },
            "results": [ { "returnValues": state.return_values } ]
        }),
        "sui_getChainIdentifier" => json!(CHAIN_ID),
        other => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("Method not found: {other}") }
            }))
        }
    };

    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn object(id: &Value) -> Value {
    let raw = id.as_str().unwrap_or_default();
    let database: SuiAddress = DATABASE_ID.parse().unwrap();
    let owner = if raw.parse::<SuiAddress>().ok() == Some(database) {
        json!({ "Shared": { "initial_shared_version": DATABASE_SHARED_VERSION } })
    } else {
        json!({ "AddressOwner": "0x1" })
    };
    json!({
        "data": {
            "objectId": raw,
            "version": OBJECT_VERSION.to_string(),
            "digest": digest(),
            "owner": owner
        }
    })
}

fn coins(state: &NodeState) -> Value {
    let data: Vec<Value> = state
        .coins
        .iter()
        .map(|(id, balance)| {
            json!({
                "coinType": "0x2::sui::SUI",
                "coinObjectId": id,
                "version": "11",
                "digest": digest(),
                "balance": balance.to_string(),
                "previousTransaction": "5Hc8Fq"
            })
        })
        .collect();
    json!({ "data": data, "nextCursor": null, "hasNextPage": false })
}
