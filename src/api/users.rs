// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{parse_address, require},
    error::ApiError,
    models::{AddUserRequest, AwardBadgeRequest, UpdateXpRequest, UserDetails},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/users/{address}",
    params(("address" = String, Path, description = "Address of the user")),
    tag = "Users",
    responses(
        (status = 200, body = UserDetails),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserDetails>, ApiError> {
    let address = parse_address("address", &address)?;
    Ok(Json(state.users.get_user(address).await?))
}

#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = AddUserRequest,
    tag = "Users",
    responses((status = 201), (status = 500, description = "Write failed"))
)]
pub async fn add_user(
    State(state): State<AppState>,
    Json(request): Json<AddUserRequest>,
) -> Result<StatusCode, ApiError> {
    require("name", &request.name)?;
    let address = parse_address("address", &request.address)?;

    if !state.users.add_user(address, request.name.trim()).await? {
        return Err(ApiError::internal(format!(
            "could not add user of address {address}"
        )));
    }
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete,
    path = "/v1/users/{address}",
    params(("address" = String, Path, description = "Address of the user")),
    tag = "Users",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn remove_user(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let address = parse_address("address", &address)?;
    if !state.users.remove_user(address).await? {
        return Err(ApiError::internal(format!(
            "could not remove user of address {address}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/v1/users/{address}/xp",
    params(("address" = String, Path, description = "Address of the user")),
    request_body = UpdateXpRequest,
    tag = "Users",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn update_xp(
    Path(address): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateXpRequest>,
) -> Result<StatusCode, ApiError> {
    let address = parse_address("address", &address)?;
    if !state.users.update_xp(address, request.xp).await? {
        return Err(ApiError::internal(format!(
            "could not update xp of user {address}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/users/{address}/badges",
    params(("address" = String, Path, description = "Address of the user")),
    request_body = AwardBadgeRequest,
    tag = "Users",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn award_badge(
    Path(address): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<AwardBadgeRequest>,
) -> Result<StatusCode, ApiError> {
    let address = parse_address("address", &address)?;
    require("badge", &request.badge)?;
    if !state.users.award_badge(address, request.badge.trim()).await? {
        return Err(ApiError::internal(format!(
            "could not award badge to user {address}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{MoveArg, SuiAddress, SuiClientError};
    use crate::contracts::testing::{no_changes_response, FakeLedger};

    fn add_request(address: &str, name: &str) -> AddUserRequest {
        AddUserRequest {
            address: address.into(),
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn add_user_success() {
        let (state, ledger) = AppState::with_ledger(FakeLedger::new());

        let status = add_user(State(state), Json(add_request("0xb0b", "Junior")))
            .await
            .expect("user creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        let call = &ledger.writes()[0];
        assert_eq!(call.target().function, "add_user");
        assert_eq!(call.arguments()[2], MoveArg::String("Junior".into()));
    }

    #[tokio::test]
    async fn add_user_rejects_invalid_input_before_submitting() {
        let (state, ledger) = AppState::with_ledger(FakeLedger::new());

        let err = add_user(State(state.clone()), Json(add_request("bob", "Junior")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = add_user(State(state), Json(add_request("0xb0b", "")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        assert!(ledger.writes().is_empty());
    }

    #[tokio::test]
    async fn failed_write_is_server_error() {
        let (state, _) = AppState::with_ledger(FakeLedger::new().with_write(no_changes_response()));
        let err = remove_user(Path("0xb0b".into()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let (state, _) = AppState::with_ledger(FakeLedger::new());
        let err = get_user(Path("0xb0b".into()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_user_node_down_is_unavailable() {
        let ledger = FakeLedger::new()
            .with_read_error("get_user", SuiClientError::Transport("refused".into()));
        let (state, _) = AppState::with_ledger(ledger);
        let err = get_user(Path("0xb0b".into()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn update_xp_success() {
        let (state, ledger) = AppState::with_ledger(FakeLedger::new());
        let status = update_xp(
            Path("0xb0b".into()),
            State(state),
            Json(UpdateXpRequest { xp: 900 }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        let user: SuiAddress = "0xb0b".parse().unwrap();
        assert_eq!(
            ledger.writes()[0].arguments()[1..],
            [MoveArg::Address(user), MoveArg::U64(900)]
        );
    }

    #[tokio::test]
    async fn award_badge_requires_badge() {
        let (state, _) = AppState::with_ledger(FakeLedger::new());
        let err = award_badge(
            Path("0xb0b".into()),
            State(state),
            Json(AwardBadgeRequest { badge: " ".into() }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
