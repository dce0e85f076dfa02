// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::blockchain::{FieldSpec, FieldType, MoveArg, RecordSchema, SuiAddress};
use crate::models::UserDetails;

use super::{ContractError, EduverseContract};

/// Return layout of `eduversex_database::get_user`.
pub const USER_SCHEMA: RecordSchema = RecordSchema {
    name: "user",
    version: 1,
    fields: &[
        FieldSpec::new("name", FieldType::String),
        FieldSpec::new("xp", FieldType::U64),
    ],
};

/// Learner records held in the shared database object.
#[derive(Clone)]
pub struct Users {
    contract: EduverseContract,
}

impl Users {
    pub fn new(contract: EduverseContract) -> Self {
        Self { contract }
    }

    pub async fn add_user(&self, address: SuiAddress, name: &str) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call("add_user")?
            .arg(MoveArg::Address(address))
            .string(name)
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn remove_user(&self, address: SuiAddress) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call("remove_user")?
            .arg(MoveArg::Address(address))
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    /// Set the user's XP to `xp`.
    pub async fn update_xp(&self, address: SuiAddress, xp: u64) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call("update_xp")?
            .arg(MoveArg::Address(address))
            .u64(xp)
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn award_badge(&self, address: SuiAddress, badge: &str) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call("award_badge")?
            .arg(MoveArg::Address(address))
            .string(badge)
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn get_user(&self, address: SuiAddress) -> Result<UserDetails, ContractError> {
        let call = self
            .contract
            .database_call("get_user")?
            .arg(MoveArg::Address(address))
            .build()?;
        let record = self.contract.query(&call, &USER_SCHEMA).await?;
        Ok(UserDetails {
            address: address.to_string(),
            name: record.string("name")?,
            xp: record.u64("xp")?,
        })
    }
}
