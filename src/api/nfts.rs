// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    api::{parse_address, require},
    error::ApiError,
    models::{
        CreateNftRequest, CreatedObject, ListForSaleRequest, NftDetails, NftResponse,
        RemoveFromSaleRequest,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/nfts",
    tag = "NFTs",
    responses((status = 200, body = [NftDetails]))
)]
pub async fn list_nfts(State(state): State<AppState>) -> Result<Json<Vec<NftDetails>>, ApiError> {
    Ok(Json(state.nfts.get_all_nft_details().await?))
}

#[utoipa::path(
    get,
    path = "/v1/nfts/{id}",
    params(("id" = String, Path, description = "Object id of the NFT")),
    tag = "NFTs",
    responses(
        (status = 200, body = NftDetails),
        (status = 404, description = "NFT not found")
    )
)]
pub async fn get_nft(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<NftDetails>, ApiError> {
    let id = parse_address("id", &id)?;
    Ok(Json(state.nfts.get_nft_details(id).await?))
}

#[utoipa::path(
    post,
    path = "/v1/nfts",
    request_body = CreateNftRequest,
    tag = "NFTs",
    responses(
        (status = 201, body = NftResponse),
        (status = 500, description = "Write failed")
    )
)]
pub async fn create_nft(
    State(state): State<AppState>,
    Json(request): Json<CreateNftRequest>,
) -> Result<(StatusCode, Json<NftResponse>), ApiError> {
    require("name", &request.name)?;
    require("description", &request.description)?;
    require("image", &request.image)?;

    let minted = state
        .nfts
        .create_nft(
            request.name.trim(),
            request.description.trim(),
            request.image.trim(),
        )
        .await?;
    let Some(id) = minted else {
        return Err(ApiError::internal("failed to create nft"));
    };

    let response = match state.nfts.get_nft_details(id).await {
        Ok(details) => NftResponse::Details(details),
        Err(e) => {
            warn!(nft = %id, error = %e, "NFT details unavailable after mint");
            NftResponse::Created(CreatedObject { id: id.to_string() })
        }
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// List an NFT for sale. An NFT that is already listed is returned unchanged.
#[utoipa::path(
    put,
    path = "/v1/nfts/list-for-sale",
    request_body = ListForSaleRequest,
    tag = "NFTs",
    responses(
        (status = 200, body = NftDetails),
        (status = 404, description = "NFT not found"),
        (status = 500, description = "Write failed")
    )
)]
pub async fn list_for_sale(
    State(state): State<AppState>,
    Json(request): Json<ListForSaleRequest>,
) -> Result<Json<NftDetails>, ApiError> {
    let id = parse_address("id", &request.id)?;
    let mut nft = state.nfts.get_nft_details(id).await?;
    if nft.is_for_sale {
        info!(nft = %id, "NFT is already listed");
        return Ok(Json(nft));
    }

    if !state.nfts.list_for_sale(id, request.price).await? {
        return Err(ApiError::internal("could not make nft change"));
    }
    nft.price = request.price;
    nft.is_for_sale = true;
    Ok(Json(nft))
}

/// Remove an NFT from sale. An NFT that is not listed is returned unchanged.
#[utoipa::path(
    put,
    path = "/v1/nfts/remove-from-sale",
    request_body = RemoveFromSaleRequest,
    tag = "NFTs",
    responses(
        (status = 200, body = NftDetails),
        (status = 404, description = "NFT not found"),
        (status = 500, description = "Write failed")
    )
)]
pub async fn remove_from_sale(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromSaleRequest>,
) -> Result<Json<NftDetails>, ApiError> {
    let id = parse_address("id", &request.id)?;
    let mut nft = state.nfts.get_nft_details(id).await?;
    if !nft.is_for_sale {
        return Ok(Json(nft));
    }

    if !state.nfts.remove_from_sale(id).await? {
        return Err(ApiError::internal("could not make nft change"));
    }
    nft.is_for_sale = false;
    Ok(Json(nft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::testing::{
        created, nft_details_result, no_changes_response, success_response, FakeLedger,
    };

    const NFT_ID: &str = "0x4e";

    #[tokio::test]
    async fn list_for_sale_updates_price_and_flag() {
        let ledger =
            FakeLedger::new().with_read("get_nft_details", nft_details_result(0, false, "0xb0b"));
        let (state, ledger) = AppState::with_ledger(ledger);

        let Json(nft) = list_for_sale(
            State(state),
            Json(ListForSaleRequest {
                id: NFT_ID.into(),
                price: 2_000,
            }),
        )
        .await
        .unwrap();

        assert!(nft.is_for_sale);
        assert_eq!(nft.price, 2_000);
        assert_eq!(ledger.writes().len(), 1);
    }

    #[tokio::test]
    async fn list_for_sale_is_a_no_op_when_already_listed() {
        let ledger = FakeLedger::new()
            .with_read("get_nft_details", nft_details_result(1_500, true, "0xb0b"));
        let (state, ledger) = AppState::with_ledger(ledger);

        let Json(nft) = list_for_sale(
            State(state),
            Json(ListForSaleRequest {
                id: NFT_ID.into(),
                price: 9_999,
            }),
        )
        .await
        .unwrap();

        assert_eq!(nft.price, 1_500);
        assert!(ledger.writes().is_empty());
    }

    #[tokio::test]
    async fn remove_from_sale_is_a_no_op_when_not_listed() {
        let ledger =
            FakeLedger::new().with_read("get_nft_details", nft_details_result(0, false, "0xb0b"));
        let (state, ledger) = AppState::with_ledger(ledger);

        let Json(nft) = remove_from_sale(
            State(state),
            Json(RemoveFromSaleRequest { id: NFT_ID.into() }),
        )
        .await
        .unwrap();

        assert!(!nft.is_for_sale);
        assert!(ledger.writes().is_empty());
    }

    #[tokio::test]
    async fn remove_from_sale_failure_is_server_error() {
        let ledger = FakeLedger::new()
            .with_read("get_nft_details", nft_details_result(1_500, true, "0xb0b"))
            .with_write(no_changes_response());
        let (state, _) = AppState::with_ledger(ledger);

        let err = remove_from_sale(
            State(state),
            Json(RemoveFromSaleRequest { id: NFT_ID.into() }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn listing_a_missing_nft_is_not_found() {
        let (state, ledger) = AppState::with_ledger(FakeLedger::new());
        let err = list_for_sale(
            State(state),
            Json(ListForSaleRequest {
                id: NFT_ID.into(),
                price: 1,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(ledger.writes().is_empty());
    }

    #[tokio::test]
    async fn create_nft_returns_details() {
        let ledger = FakeLedger::new()
            .with_write(success_response(vec![created("0xa11ce::nft::EduverseNFT", NFT_ID)]))
            .with_read("get_nft_details", nft_details_result(0, false, "0xb0b"));
        let (state, _) = AppState::with_ledger(ledger);

        let (status, Json(response)) = create_nft(
            State(state),
            Json(CreateNftRequest {
                name: "Move Certificate".into(),
                description: "Completed Intro to Move".into(),
                image: "https://img/cert.png".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let NftResponse::Details(details) = response else {
            panic!("expected nft details");
        };
        assert_eq!(details.name, "Move Certificate");
    }
}
