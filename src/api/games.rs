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
    models::AddGameRequest,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/games",
    request_body = AddGameRequest,
    tag = "Games",
    responses((status = 201), (status = 500, description = "Write failed"))
)]
pub async fn add_game(
    State(state): State<AppState>,
    Json(request): Json<AddGameRequest>,
) -> Result<StatusCode, ApiError> {
    require("name", &request.name)?;
    require("description", &request.description)?;
    let game = parse_address("address", &request.address)?;

    let added = state
        .courses
        .add_game(request.name.trim(), request.description.trim(), game)
        .await?;
    if !added {
        return Err(ApiError::internal(format!("could not add game {game}")));
    }
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete,
    path = "/v1/games/{address}",
    params(("address" = String, Path, description = "Address of the game contract")),
    tag = "Games",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn remove_game(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let game = parse_address("address", &address)?;
    if !state.courses.remove_game(game).await? {
        return Err(ApiError::internal(format!("could not remove game {game}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{MoveArg, SuiClientError};
    use crate::contracts::testing::FakeLedger;

    #[tokio::test]
    async fn add_game_success() {
        let (state, ledger) = AppState::with_ledger(FakeLedger::new());
        let status = add_game(
            State(state),
            Json(AddGameRequest {
                address: "0x9a".into(),
                name: "Borrow Checker".into(),
                description: "Lifetimes puzzle".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let call = &ledger.writes()[0];
        assert_eq!(call.target().function, "add_game");
        assert_eq!(call.arguments()[3], MoveArg::Address("0x9a".parse().unwrap()));
    }

    #[tokio::test]
    async fn remove_game_transport_failure_is_server_error() {
        let ledger =
            FakeLedger::new().with_write_error(SuiClientError::Transport("reset".into()));
        let (state, _) = AppState::with_ledger(ledger);
        let err = remove_game(Path("0x9a".into()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
