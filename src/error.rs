// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::blockchain::{DecodeError, SuiClientError};
use crate::contracts::ContractError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

/// Status for a failed read or a call that could not be built.
///
/// An empty or aborted inspection means the entity is absent; any other
/// decode failure means the node answered with something unusable.
impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        let message = err.to_string();
        let api_error = match &err {
            ContractError::Build(_) => Self::bad_request(message),
            ContractError::Decode(DecodeError::NoResult | DecodeError::Aborted(_)) => {
                Self::not_found(message)
            }
            ContractError::Decode(_) => Self::bad_gateway(message),
            ContractError::Node(SuiClientError::ObjectNotFound(_)) => Self::not_found(message),
            ContractError::Node(
                SuiClientError::Transport(_) | SuiClientError::InvalidRpcUrl(_),
            ) => Self::service_unavailable(message),
            ContractError::Node(_) => Self::bad_gateway(message),
        };
        if api_error.status.is_server_error() {
            warn!(status = api_error.status.as_u16(), error = %err, "Contract read failed");
        }
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
