// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # EduverseX Contract Facades
//!
//! One facade per domain ([`Courses`], [`Users`], [`Nfts`]), each a thin layer
//! over the shared [`EduverseContract`] handle. A facade method builds one
//! [`MoveCall`], hands it to the ledger and interprets the response:
//!
//! - writes return whether the transaction committed (create operations return
//!   the id of the created object)
//! - reads return a fully decoded record or a [`ContractError`]
//!
//! Facades trust their typed parameters; request validation happens in the API
//! layer.

use std::sync::Arc;

use tracing::debug;

use crate::blockchain::{
    decode_record, interpret_write, BuildError, Credential, DecodeError, DecodedRecord,
    ExecutionOutcome, Ledger, MoveCall, MoveCallBuilder, MoveTarget, ObjectId, RecordSchema,
    SuiAddress, SuiClientError,
};
use crate::config::ContractAddresses;

pub mod courses;
pub mod nfts;
pub mod users;

#[cfg(test)]
pub mod testing;

pub use courses::{Courses, NewCourse};
pub use nfts::Nfts;
pub use users::Users;

/// Move module holding the shared database object's entry points.
pub const DATABASE_MODULE: &str = "eduversex_database";

/// Failures of a contract read, or of building a call before submission.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Node(#[from] SuiClientError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ContractError {
    /// The object a read targeted is gone or never existed.
    pub fn is_missing_object(&self) -> bool {
        matches!(
            self,
            ContractError::Decode(DecodeError::NoResult | DecodeError::Aborted(_))
                | ContractError::Node(SuiClientError::ObjectNotFound(_))
        )
    }
}

/// Ledger handle, signing credential and contract addresses shared by all facades.
#[derive(Clone)]
pub struct EduverseContract {
    ledger: Arc<dyn Ledger>,
    credential: Arc<Credential>,
    addresses: ContractAddresses,
}

impl EduverseContract {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        credential: Arc<Credential>,
        addresses: ContractAddresses,
    ) -> Self {
        Self {
            ledger,
            credential,
            addresses,
        }
    }

    pub fn addresses(&self) -> &ContractAddresses {
        &self.addresses
    }

    /// Address that signs writes and sends dev-inspect reads.
    pub fn sender(&self) -> SuiAddress {
        self.credential.address()
    }

    /// Start a call to `module::function` of the published package.
    pub(crate) fn call(&self, module: &str, function: &str) -> Result<MoveCallBuilder, BuildError> {
        let target = MoveTarget::new(self.addresses.package_id, module, function)?;
        Ok(MoveCall::builder(target))
    }

    /// Start a database call with the shared database object as first argument.
    pub(crate) fn database_call(&self, function: &str) -> Result<MoveCallBuilder, BuildError> {
        Ok(self
            .call(DATABASE_MODULE, function)?
            .object(self.addresses.database_id))
    }

    /// Sign and execute `call`, normalizing every failure into the outcome.
    pub async fn submit(&self, call: &MoveCall) -> ExecutionOutcome {
        debug!(target_fn = %call.target(), args = call.arguments().len(), "Executing write");
        let outcome = interpret_write(self.ledger.execute_write(call, &self.credential).await);
        if let ExecutionOutcome::Committed { digest, .. } = &outcome {
            debug!(target_fn = %call.target(), digest = %digest, "Write committed");
        }
        outcome
    }

    /// Inspect `call` and decode its return values against `schema`.
    pub async fn query(
        &self,
        call: &MoveCall,
        schema: &RecordSchema,
    ) -> Result<DecodedRecord, ContractError> {
        debug!(
            target_fn = %call.target(),
            schema = schema.name,
            version = schema.version,
            "Executing read"
        );
        let results = self.ledger.execute_read(call, self.sender()).await?;
        Ok(decode_record(&results, schema)?)
    }
}

/// Parse the textual id of a created object.
fn created_id(outcome: &ExecutionOutcome, type_pattern: &str) -> Option<ObjectId> {
    let raw = outcome.created_object(type_pattern)?;
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(object_id = raw, error = %e, "Created object has an invalid id");
            None
        }
    }
}
