// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sui JSON-RPC request and response shapes.
//!
//! Only the fields this service reads are modelled; everything else in the
//! node's responses is ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

// =============================================================================
// Objects and coins
// =============================================================================

/// `sui_getObject` result.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    pub version: String,
    pub digest: String,
    #[serde(default)]
    owner: Option<Value>,
}

impl ObjectData {
    /// Ownership, if reported in a form this service understands.
    pub fn owner(&self) -> Option<Owner> {
        self.owner
            .clone()
            .and_then(|raw| serde_json::from_value(raw).ok())
    }
}

/// Object ownership as reported with `showOwner`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Owner {
    AddressOwner(String),
    ObjectOwner(String),
    Shared { initial_shared_version: u64 },
    Immutable,
}

/// One page of `suix_getCoins`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<Coin>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_object_id: String,
    pub version: String,
    pub digest: String,
    pub balance: String,
}

// =============================================================================
// Transaction execution
// =============================================================================

/// `sui_executeTransactionBlock` result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    pub effects: Option<TransactionEffects>,
    pub object_changes: Option<Vec<ObjectChange>>,
    pub balance_changes: Option<Vec<BalanceChange>>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// A created, mutated, deleted, wrapped or published object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
}

impl ObjectChange {
    pub fn is_created(&self) -> bool {
        self.kind == "created"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub coin_type: String,
    /// Signed amount in the coin's smallest unit.
    pub amount: String,
}

// =============================================================================
// Dev-inspect
// =============================================================================

/// `sui_devInspectTransactionBlock` result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevInspectResults {
    pub error: Option<String>,
    pub results: Option<Vec<ExecutionResult>>,
}

/// Return values of one command: `(bcs bytes, move type)` pairs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub return_values: Vec<(Vec<u8>, String)>,
}
