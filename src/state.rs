// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::{Credential, Ledger};
use crate::config::ContractAddresses;
use crate::contracts::{Courses, EduverseContract, Nfts, Users};

/// Shared handler state. Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub courses: Courses,
    pub users: Users,
    pub nfts: Nfts,
    /// Node handle for readiness probes.
    pub ledger: Arc<dyn Ledger>,
}

impl AppState {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        credential: Arc<Credential>,
        addresses: ContractAddresses,
    ) -> Self {
        let contract = EduverseContract::new(ledger.clone(), credential, addresses);
        Self {
            courses: Courses::new(contract.clone()),
            users: Users::new(contract.clone()),
            nfts: Nfts::new(contract),
            ledger,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over a fake ledger, plus the ledger for inspection.
    pub fn with_ledger(
        ledger: crate::contracts::testing::FakeLedger,
    ) -> (Self, Arc<crate::contracts::testing::FakeLedger>) {
        use crate::contracts::testing::{addresses, credential};

        let ledger = Arc::new(ledger);
        let state = Self::new(ledger.clone(), credential(), addresses());
        (state, ledger)
    }
}
