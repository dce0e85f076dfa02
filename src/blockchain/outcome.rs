// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Normalization of write responses into [`ExecutionOutcome`].

use tracing::{info, warn};

use super::client::SuiClientError;
use super::rpc::{BalanceChange, ObjectChange, TransactionBlockResponse};
use super::types::{mist_to_sui, SUI_COIN_TYPE};

/// Reason reported when the node omits the object-changes section.
pub const NO_STATE_CHANGES: &str = "no state changes reported";

/// Uniform result of a submitted write.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Committed {
        digest: String,
        object_changes: Vec<ObjectChange>,
        /// Gas cost in whole SUI, when the node reported balance changes.
        fee_paid: Option<f64>,
    },
    Failed {
        reason: String,
    },
}

impl ExecutionOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        ExecutionOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, ExecutionOutcome::Committed { .. })
    }

    /// Id of the first created object whose Move type contains `type_pattern`
    /// (e.g. `::courses::Course` or `::nft::`).
    pub fn created_object(&self, type_pattern: &str) -> Option<&str> {
        let ExecutionOutcome::Committed { object_changes, .. } = self else {
            return None;
        };
        object_changes
            .iter()
            .filter(|change| change.is_created())
            .find(|change| {
                change
                    .object_type
                    .as_deref()
                    .is_some_and(|ty| ty.contains(type_pattern))
            })
            .and_then(|change| change.object_id.as_deref())
    }
}

/// Interpret the raw result of `execute_write`.
///
/// Transport and node errors become `Failed` values here and never propagate
/// further up as errors.
pub fn interpret_write(
    result: Result<TransactionBlockResponse, SuiClientError>,
) -> ExecutionOutcome {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Transaction submission failed");
            return ExecutionOutcome::failed(e.to_string());
        }
    };

    let fee_paid = response.balance_changes.as_deref().and_then(parse_fee);
    if let Some(fee) = fee_paid {
        info!(digest = %response.digest, cost_sui = fee, "Cost to call the function");
    }

    let Some(object_changes) = response.object_changes else {
        warn!(digest = %response.digest, "RPC did not return objectChanges");
        return ExecutionOutcome::failed(NO_STATE_CHANGES);
    };

    if let Some(status) = response.effects.as_ref().map(|effects| &effects.status) {
        if !status.is_success() {
            let reason = status
                .error
                .clone()
                .unwrap_or_else(|| format!("transaction {}", status.status));
            warn!(digest = %response.digest, reason = %reason, "Transaction aborted on-chain");
            return ExecutionOutcome::failed(reason);
        }
    }

    if !response.errors.is_empty() {
        let reason = response.errors.join("; ");
        warn!(digest = %response.digest, reason = %reason, "Node reported execution errors");
        return ExecutionOutcome::failed(reason);
    }

    ExecutionOutcome::Committed {
        digest: response.digest,
        object_changes,
        fee_paid,
    }
}

/// Cost in whole SUI from the gas coin's balance change.
///
/// Falls back to the first entry when no SUI change is listed.
fn parse_fee(changes: &[BalanceChange]) -> Option<f64> {
    let change = changes
        .iter()
        .find(|change| change.coin_type == SUI_COIN_TYPE)
        .or_else(|| changes.first())?;

    match change.amount.trim().parse::<i128>() {
        Ok(amount) => Some(mist_to_sui(amount)),
        Err(_) => {
            warn!(amount = %change.amount, "Unparseable balance change amount");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::rpc::{ExecutionStatus, TransactionEffects};

    fn created(kind: &str, id: &str) -> ObjectChange {
        ObjectChange {
            kind: "created".into(),
            object_type: Some(kind.into()),
            object_id: Some(id.into()),
        }
    }

    fn response(
        object_changes: Option<Vec<ObjectChange>>,
        amount: Option<&str>,
    ) -> TransactionBlockResponse {
        TransactionBlockResponse {
            digest: "digest".into(),
            effects: Some(TransactionEffects {
                status: ExecutionStatus {
                    status: "success".into(),
                    error: None,
                },
            }),
            object_changes,
            balance_changes: amount.map(|amount| {
                vec![BalanceChange {
                    coin_type: SUI_COIN_TYPE.into(),
                    amount: amount.into(),
                }]
            }),
            errors: Vec::new(),
        }
    }

    #[test]
    fn missing_object_changes_is_failure() {
        let outcome = interpret_write(Ok(response(None, Some("-1000"))));
        assert_eq!(outcome, ExecutionOutcome::failed(NO_STATE_CHANGES));
    }

    #[test]
    fn fee_is_reported_in_whole_units_regardless_of_sign() {
        for amount in ["-5000000000", "5000000000"] {
            let outcome = interpret_write(Ok(response(Some(Vec::new()), Some(amount))));
            let ExecutionOutcome::Committed { fee_paid, .. } = outcome else {
                panic!("expected commit");
            };
            assert_eq!(fee_paid, Some(5.0));
        }
    }

    #[test]
    fn missing_balance_changes_leaves_fee_empty() {
        let outcome = interpret_write(Ok(response(Some(Vec::new()), None)));
        assert!(matches!(
            outcome,
            ExecutionOutcome::Committed { fee_paid: None, .. }
        ));
    }

    #[test]
    fn transport_errors_become_failed_values() {
        let outcome = interpret_write(Err(SuiClientError::Transport("connection refused".into())));
        let ExecutionOutcome::Failed { reason } = outcome else {
            panic!("expected failure");
        };
        assert!(reason.contains("connection refused"));
    }

    #[test]
    fn on_chain_abort_is_failure() {
        let mut raw = response(Some(Vec::new()), Some("-100"));
        raw.effects = Some(TransactionEffects {
            status: ExecutionStatus {
                status: "failure".into(),
                error: Some("MoveAbort(..., 3)".into()),
            },
        });
        assert_eq!(
            interpret_write(Ok(raw)),
            ExecutionOutcome::failed("MoveAbort(..., 3)")
        );
    }

    #[test]
    fn finds_created_object_by_type_suffix() {
        let outcome = interpret_write(Ok(response(
            Some(vec![
                created("0x2::coin::Coin<0x2::sui::SUI>", "0x1"),
                created("0xabc::courses::Course", "0x77"),
            ]),
            None,
        )));
        assert_eq!(outcome.created_object("::courses::Course"), Some("0x77"));
        assert_eq!(outcome.created_object("::nft::"), None);
        assert_eq!(
            ExecutionOutcome::failed("x").created_object("::courses::Course"),
            None
        );
    }
}
