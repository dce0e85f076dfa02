// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sui integration.
//!
//! This module provides functionality for:
//! - Loading the service signing credential
//! - Building typed Move calls
//! - Submitting signed transactions and dev-inspect queries
//! - Normalizing write responses and decoding query results

pub mod client;
pub mod decode;
pub mod outcome;
pub mod rpc;
pub mod signing;
pub mod transactions;
pub mod types;

pub use client::{Ledger, SuiClient, SuiClientError, DEFAULT_GAS_BUDGET};
pub use decode::{
    decode_record, DecodeError, DecodedRecord, DecodedValue, FieldSpec, FieldType, RecordSchema,
};
pub use outcome::{interpret_write, ExecutionOutcome, NO_STATE_CHANGES};
pub use signing::{Credential, KeyError};
pub use transactions::{ArgKind, BuildError, MoveArg, MoveCall, MoveCallBuilder, MoveTarget};
pub use types::*;
