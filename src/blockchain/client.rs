// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sui full node client for transaction submission and dev-inspect queries.
//!
//! The client holds one `reqwest` connection pool and issues independent,
//! stateless JSON-RPC requests, so a single instance is shared by every
//! in-flight API request. No timeout or retry is applied here: a transport
//! error surfaces to the caller, and resubmitting after an ambiguous failure
//! may execute the call twice.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::rpc::{
    CoinPage, DevInspectResults, ObjectResponse, Owner, RpcRequest, RpcResponse,
    TransactionBlockResponse,
};
use super::signing::Credential;
use super::transactions::{
    CallArg, GasData, MoveArg, MoveCall, ObjectArg, TransactionData, TransactionKind,
};
use super::types::{
    NetworkConfig, ObjectDigest, ObjectId, ObjectRef, SuiAddress, SUI_COIN_TYPE,
};

/// Default gas budget per transaction, in MIST.
pub const DEFAULT_GAS_BUDGET: u64 = 50_000_000;

/// Errors that can occur while talking to the node.
#[derive(Debug, thiserror::Error)]
pub enum SuiClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("No gas coin covers budget {budget} MIST (largest coin holds {largest})")]
    InsufficientGas { budget: u64, largest: u64 },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// The two operations the contract layer needs from a ledger node.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Sign `call` with `credential` and execute it, waiting for local execution.
    async fn execute_write(
        &self,
        call: &MoveCall,
        credential: &Credential,
    ) -> Result<TransactionBlockResponse, SuiClientError>;

    /// Simulate `call` as `sender` without committing anything.
    async fn execute_read(
        &self,
        call: &MoveCall,
        sender: SuiAddress,
    ) -> Result<DevInspectResults, SuiClientError>;

    /// Identifier of the chain the node serves; used as a liveness probe.
    async fn chain_identifier(&self) -> Result<String, SuiClientError>;
}

/// JSON-RPC client for a Sui full node.
pub struct SuiClient {
    network: NetworkConfig,
    rpc_url: url::Url,
    gas_budget: u64,
    http: Client,
    next_id: AtomicU64,
}

impl SuiClient {
    /// Create a client for `network`, optionally overriding its RPC URL.
    pub fn new(
        network: NetworkConfig,
        rpc_url_override: Option<&str>,
        gas_budget: u64,
    ) -> Result<Self, SuiClientError> {
        let raw_url = rpc_url_override.unwrap_or(network.rpc_url);
        let rpc_url: url::Url = raw_url
            .parse()
            .map_err(|e: url::ParseError| SuiClientError::InvalidRpcUrl(e.to_string()))?;

        let http = Client::builder()
            .build()
            .map_err(|e| SuiClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            network,
            rpc_url,
            gas_budget,
            http,
            next_id: AtomicU64::new(1),
        })
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn rpc_url(&self) -> &url::Url {
        &self.rpc_url
    }

    /// Current reference gas price in MIST.
    pub async fn reference_gas_price(&self) -> Result<u64, SuiClientError> {
        let raw: Value = self.rpc("suix_getReferenceGasPrice", json!([])).await?;
        parse_u64_value(&raw)
            .ok_or_else(|| SuiClientError::InvalidResponse(format!("bad gas price: {raw}")))
    }

    /// Resolve an object id to the input form the transaction needs.
    async fn object_arg(&self, id: ObjectId) -> Result<ObjectArg, SuiClientError> {
        let response: ObjectResponse = self
            .rpc(
                "sui_getObject",
                json!([id.to_string(), { "showOwner": true }]),
            )
            .await?;

        let data = response.data.ok_or_else(|| {
            let detail = response.error.map(|e| e.to_string()).unwrap_or_default();
            SuiClientError::ObjectNotFound(format!("{id} {detail}").trim_end().to_string())
        })?;

        match data.owner() {
            Some(Owner::Shared {
                initial_shared_version,
            }) => Ok(ObjectArg::SharedObject {
                id,
                initial_shared_version,
                mutable: true,
            }),
            _ => Ok(ObjectArg::ImmOrOwnedObject(parse_object_ref(
                &data.object_id,
                &data.version,
                &data.digest,
            )?)),
        }
    }

    /// Turn every call argument into a transaction input, in order.
    async fn resolve_inputs(&self, call: &MoveCall) -> Result<Vec<CallArg>, SuiClientError> {
        let mut inputs = Vec::with_capacity(call.arguments().len());
        for (index, arg) in call.arguments().iter().enumerate() {
            let input = match arg {
                MoveArg::Object(id) => CallArg::Object(self.object_arg(*id).await?),
                pure => CallArg::Pure(pure.pure_bytes().map_err(|e| {
                    SuiClientError::Encoding(format!("argument {index}: {e}"))
                })?),
            };
            inputs.push(input);
        }
        Ok(inputs)
    }

    /// Pick the smallest SUI coin owned by `owner` that covers `budget`.
    async fn select_gas(&self, owner: SuiAddress, budget: u64) -> Result<ObjectRef, SuiClientError> {
        let mut cursor: Option<String> = None;
        let mut best: Option<(u64, ObjectRef)> = None;
        let mut largest = 0u64;

        loop {
            let page: CoinPage = self
                .rpc(
                    "suix_getCoins",
                    json!([owner.to_string(), SUI_COIN_TYPE, cursor, Value::Null]),
                )
                .await?;

            for coin in &page.data {
                let balance: u64 = coin.balance.parse().map_err(|_| {
                    SuiClientError::InvalidResponse(format!("bad coin balance {}", coin.balance))
                })?;
                largest = largest.max(balance);
                if balance < budget {
                    continue;
                }
                if best.as_ref().map_or(true, |(current, _)| balance < *current) {
                    let object_ref =
                        parse_object_ref(&coin.coin_object_id, &coin.version, &coin.digest)?;
                    best = Some((balance, object_ref));
                }
            }

            if !page.has_next_page || page.next_cursor.is_none() {
                break;
            }
            cursor = page.next_cursor;
        }

        best.map(|(_, object_ref)| object_ref)
            .ok_or(SuiClientError::InsufficientGas { budget, largest })
    }

    /// Issue one JSON-RPC call and unwrap its result.
    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, SuiClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| SuiClientError::Transport(format!("{method} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SuiClientError::Transport(format!(
                "{method} returned {status}: {body}"
            )));
        }

        let envelope: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| SuiClientError::InvalidResponse(format!("{method} invalid JSON: {e}")))?;

        if let Some(error) = envelope.error {
            return Err(SuiClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        envelope
            .result
            .ok_or_else(|| SuiClientError::InvalidResponse(format!("{method} returned no result")))
    }
}

#[async_trait]
impl Ledger for SuiClient {
    async fn execute_write(
        &self,
        call: &MoveCall,
        credential: &Credential,
    ) -> Result<TransactionBlockResponse, SuiClientError> {
        let sender = credential.address();
        let inputs = self.resolve_inputs(call).await?;
        let kind = TransactionKind::single_call(call, inputs);

        let price = self.reference_gas_price().await?;
        let payment = self.select_gas(sender, self.gas_budget).await?;
        let data = TransactionData::new(
            kind,
            sender,
            GasData {
                payment: vec![payment],
                owner: sender,
                price,
                budget: self.gas_budget,
            },
        );

        let tx_bytes = bcs::to_bytes(&data)
            .map_err(|e| SuiClientError::Encoding(format!("transaction data: {e}")))?;
        let signature = credential.sign_transaction(&tx_bytes);

        debug!(
            target_fn = %call.target(),
            sender = %sender,
            gas_price = price,
            "Submitting transaction"
        );

        self.rpc(
            "sui_executeTransactionBlock",
            json!([
                Base64::encode_string(&tx_bytes),
                [signature],
                {
                    "showInput": false,
                    "showRawInput": false,
                    "showEffects": true,
                    "showEvents": true,
                    "showObjectChanges": true,
                    "showBalanceChanges": true
                },
                "WaitForLocalExecution"
            ]),
        )
        .await
    }

    async fn execute_read(
        &self,
        call: &MoveCall,
        sender: SuiAddress,
    ) -> Result<DevInspectResults, SuiClientError> {
        let inputs = self.resolve_inputs(call).await?;
        let kind = TransactionKind::single_call(call, inputs);
        let kind_bytes = bcs::to_bytes(&kind)
            .map_err(|e| SuiClientError::Encoding(format!("transaction kind: {e}")))?;

        debug!(target_fn = %call.target(), sender = %sender, "Inspecting call");

        self.rpc(
            "sui_devInspectTransactionBlock",
            json!([
                sender.to_string(),
                Base64::encode_string(&kind_bytes),
                Value::Null,
                Value::Null
            ]),
        )
        .await
    }

    async fn chain_identifier(&self) -> Result<String, SuiClientError> {
        self.rpc("sui_getChainIdentifier", json!([])).await
    }
}

fn parse_object_ref(id: &str, version: &str, digest: &str) -> Result<ObjectRef, SuiClientError> {
    let id: ObjectId = id
        .parse()
        .map_err(|e| SuiClientError::InvalidResponse(format!("bad object id {id}: {e}")))?;
    let version: u64 = version
        .parse()
        .map_err(|_| SuiClientError::InvalidResponse(format!("bad object version {version}")))?;
    let digest = ObjectDigest::from_base58(digest).map_err(SuiClientError::InvalidResponse)?;
    Ok((id, version, digest))
}

/// Sui encodes 64-bit integers as JSON strings; accept plain numbers too.
fn parse_u64_value(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        other => other.as_u64(),
    }
}
