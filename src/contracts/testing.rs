// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory [`Ledger`] for facade and handler tests.
//!
//! Writes commit with an empty change list unless a response was queued;
//! reads answer from per-function queues and report no results once a queue
//! is drained.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::blockchain::rpc::{
    DevInspectResults, ExecutionResult, ExecutionStatus, ObjectChange, TransactionBlockResponse,
    TransactionEffects,
};
use crate::blockchain::{
    Credential, ExecutionOutcome, Ledger, MoveCall, SuiAddress, SuiClientError,
};
use crate::config::ContractAddresses;

use super::EduverseContract;

pub const PACKAGE_ID: &str = "0xa11ce";
pub const DATABASE_ID: &str = "0xdb";

type ReadQueue = VecDeque<Result<DevInspectResults, SuiClientError>>;

#[derive(Default)]
pub struct FakeLedger {
    writes: Mutex<Vec<MoveCall>>,
    reads: Mutex<Vec<(MoveCall, SuiAddress)>>,
    write_results: Mutex<VecDeque<Result<TransactionBlockResponse, SuiClientError>>>,
    read_results: Mutex<HashMap<String, ReadQueue>>,
    unreachable: bool,
    yielding: bool,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield to the runtime inside every call so concurrent calls interleave.
    pub fn yielding(mut self) -> Self {
        self.yielding = true;
        self
    }

    /// Fail the chain identifier probe.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn with_write(self, response: TransactionBlockResponse) -> Self {
        self.write_results.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_write_error(self, error: SuiClientError) -> Self {
        self.write_results.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_read(self, function: &str, results: DevInspectResults) -> Self {
        self.queue_read(function, Ok(results));
        self
    }

    pub fn with_read_error(self, function: &str, error: SuiClientError) -> Self {
        self.queue_read(function, Err(error));
        self
    }

    fn queue_read(&self, function: &str, result: Result<DevInspectResults, SuiClientError>) {
        self.read_results
            .lock()
            .unwrap()
            .entry(function.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn writes(&self) -> Vec<MoveCall> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<MoveCall> {
        self.reads
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub fn read_senders(&self) -> Vec<SuiAddress> {
        self.reads
            .lock()
            .unwrap()
            .iter()
            .map(|(_, sender)| *sender)
            .collect()
    }
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn execute_write(
        &self,
        call: &MoveCall,
        _credential: &Credential,
    ) -> Result<TransactionBlockResponse, SuiClientError> {
        self.writes.lock().unwrap().push(call.clone());
        if self.yielding {
            tokio::task::yield_now().await;
        }
        let queued = self.write_results.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(success_response(Vec::new())))
    }

    async fn execute_read(
        &self,
        call: &MoveCall,
        sender: SuiAddress,
    ) -> Result<DevInspectResults, SuiClientError> {
        self.reads.lock().unwrap().push((call.clone(), sender));
        if self.yielding {
            tokio::task::yield_now().await;
        }
        let queued = self
            .read_results
            .lock()
            .unwrap()
            .get_mut(&call.target().function)
            .and_then(|queue| queue.pop_front());
        queued.unwrap_or_else(|| Ok(DevInspectResults::default()))
    }

    async fn chain_identifier(&self) -> Result<String, SuiClientError> {
        if self.unreachable {
            return Err(SuiClientError::Transport("connection refused".into()));
        }
        Ok("4c78adac".into())
    }
}

pub fn addresses() -> ContractAddresses {
    ContractAddresses {
        package_id: PACKAGE_ID.parse().unwrap(),
        database_id: DATABASE_ID.parse().unwrap(),
    }
}

pub fn credential() -> Arc<Credential> {
    Arc::new(Credential::from_secret_bytes([7u8; 32]))
}

/// A contract handle over `ledger`, plus the ledger for inspection.
pub fn contract_with(ledger: FakeLedger) -> (EduverseContract, Arc<FakeLedger>) {
    let ledger = Arc::new(ledger);
    let contract = EduverseContract::new(ledger.clone(), credential(), addresses());
    (contract, ledger)
}

pub fn success_response(object_changes: Vec<ObjectChange>) -> TransactionBlockResponse {
    TransactionBlockResponse {
        digest: "8vKx2QnTq".into(),
        effects: Some(TransactionEffects {
            status: ExecutionStatus {
                status: "success".into(),
                error: None,
            },
        }),
        object_changes: Some(object_changes),
        balance_changes: None,
        errors: Vec::new(),
    }
}

/// A response without an object-changes section.
pub fn no_changes_response() -> TransactionBlockResponse {
    TransactionBlockResponse {
        object_changes: None,
        ..success_response(Vec::new())
    }
}

pub fn committed(object_changes: Vec<ObjectChange>) -> ExecutionOutcome {
    ExecutionOutcome::Committed {
        digest: "8vKx2QnTq".into(),
        object_changes,
        fee_paid: None,
    }
}

pub fn created(object_type: &str, object_id: &str) -> ObjectChange {
    ObjectChange {
        kind: "created".into(),
        object_type: Some(object_type.into()),
        object_id: Some(object_id.into()),
    }
}

/// Dev-inspect results carrying one command's return values.
pub fn returns(values: Vec<(Vec<u8>, String)>) -> DevInspectResults {
    DevInspectResults {
        error: None,
        results: Some(vec![ExecutionResult {
            return_values: values,
        }]),
    }
}

pub fn string_value(value: &str) -> (Vec<u8>, String) {
    (bcs::to_bytes(value).unwrap(), "0x1::string::String".into())
}

pub fn u64_value(value: u64) -> (Vec<u8>, String) {
    (bcs::to_bytes(&value).unwrap(), "u64".into())
}

pub fn u8_value(value: u8) -> (Vec<u8>, String) {
    (vec![value], "u8".into())
}

pub fn bool_value(value: bool) -> (Vec<u8>, String) {
    (bcs::to_bytes(&value).unwrap(), "bool".into())
}

pub fn address_value(value: &str) -> (Vec<u8>, String) {
    let address: SuiAddress = value.parse().unwrap();
    (bcs::to_bytes(&address).unwrap(), "address".into())
}

pub fn addresses_value(values: &[&str]) -> (Vec<u8>, String) {
    let addresses: Vec<SuiAddress> = values.iter().map(|v| v.parse().unwrap()).collect();
    (bcs::to_bytes(&addresses).unwrap(), "vector<address>".into())
}

/// `get_course_details` result for the "Intro to Move" course.
pub fn course_details_result() -> DevInspectResults {
    returns(vec![
        string_value("Intro to Move"),
        string_value("Objects and abilities"),
        string_value("Programming"),
        address_value("0xc4ea702"),
        u64_value(100),
        u8_value(2),
        string_value("https://img/move.png"),
    ])
}

/// `get_nft_details` result for a certificate owned by `owner`.
pub fn nft_details_result(price: u64, is_for_sale: bool, owner: &str) -> DevInspectResults {
    returns(vec![
        string_value("Move Certificate"),
        string_value("Completed Intro to Move"),
        string_value("https://img/cert.png"),
        u64_value(price),
        bool_value(is_for_sale),
        address_value(owner),
    ])
}
