// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use tracing::warn;

use crate::blockchain::{FieldSpec, FieldType, ObjectId, RecordSchema};
use crate::models::NftDetails;

use super::{created_id, ContractError, EduverseContract};

const NFT_MODULE: &str = "nft";

/// Matches the Move type of objects created by `nft::create_nft`.
pub const NFT_TYPE: &str = "::nft::";

/// Return layout of `nft::get_nft_details`.
pub const NFT_SCHEMA: RecordSchema = RecordSchema {
    name: "nft",
    version: 1,
    fields: &[
        FieldSpec::new("name", FieldType::String),
        FieldSpec::new("description", FieldType::String),
        FieldSpec::new("image", FieldType::String),
        FieldSpec::new("price", FieldType::U64),
        FieldSpec::new("is_for_sale", FieldType::Bool),
        FieldSpec::new("owner", FieldType::Address),
    ],
};

/// Return layout of `nft::get_all_nfts`.
pub const NFT_IDS_SCHEMA: RecordSchema = RecordSchema {
    name: "nft_ids",
    version: 1,
    fields: &[FieldSpec::new("ids", FieldType::AddressVec)],
};

/// Certificates and rewards minted by the service.
#[derive(Clone)]
pub struct Nfts {
    contract: EduverseContract,
}

impl Nfts {
    pub fn new(contract: EduverseContract) -> Self {
        Self { contract }
    }

    /// Mint an NFT and return its object id.
    pub async fn create_nft(
        &self,
        name: &str,
        description: &str,
        image: &str,
    ) -> Result<Option<ObjectId>, ContractError> {
        let call = self
            .contract
            .call(NFT_MODULE, "create_nft")?
            .string(name)
            .string(description)
            .string(image)
            .build()?;

        let outcome = self.contract.submit(&call).await;
        let id = created_id(&outcome, NFT_TYPE);
        if outcome.is_committed() && id.is_none() {
            warn!(name, "NFT transaction committed without an NFT object");
        }
        Ok(id)
    }

    /// Put `nft` up for sale at `price` MIST.
    pub async fn list_for_sale(&self, nft: ObjectId, price: u64) -> Result<bool, ContractError> {
        let call = self
            .contract
            .call(NFT_MODULE, "list_for_sale")?
            .object(nft)
            .u64(price)
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn remove_from_sale(&self, nft: ObjectId) -> Result<bool, ContractError> {
        let call = self
            .contract
            .call(NFT_MODULE, "remove_from_sale")?
            .object(nft)
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn get_nft_details(&self, nft: ObjectId) -> Result<NftDetails, ContractError> {
        let call = self
            .contract
            .call(NFT_MODULE, "get_nft_details")?
            .object(nft)
            .build()?;
        let record = self.contract.query(&call, &NFT_SCHEMA).await?;

        Ok(NftDetails {
            id: nft.to_string(),
            name: record.string("name")?,
            description: record.string("description")?,
            image: record.string("image")?,
            price: record.u64("price")?,
            is_for_sale: record.bool("is_for_sale")?,
            owner: record.address("owner")?.to_string(),
        })
    }

    pub async fn get_all_nfts(&self) -> Result<Vec<ObjectId>, ContractError> {
        let call = self
            .contract
            .call(NFT_MODULE, "get_all_nfts")?
            .object(self.contract.addresses().database_id)
            .build()?;
        let record = self.contract.query(&call, &NFT_IDS_SCHEMA).await?;
        Ok(record.addresses("ids")?)
    }

    /// Details of every NFT; missing ones are skipped and logged.
    pub async fn get_all_nft_details(&self) -> Result<Vec<NftDetails>, ContractError> {
        let ids = self.get_all_nfts().await?;
        let mut nfts = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_nft_details(id).await {
                Ok(details) => nfts.push(details),
                Err(e) if e.is_missing_object() => {
                    warn!(nft = %id, error = %e, "Skipping missing NFT")
                }
                Err(e) => return Err(e),
            }
        }
        Ok(nfts)
    }
}
