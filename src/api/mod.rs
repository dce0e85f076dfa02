// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderName,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::{AddressParseError, SuiAddress},
    error::ApiError,
    models::{
        AddGameRequest, AddReviewRequest, AddUserRequest, AwardBadgeRequest,
        CatalogueCourseRequest, CourseDetails, CourseProgressRequest, CourseResponse,
        CreateCourseRequest, CreateNftRequest, CreatedObject, ListForSaleRequest, NftDetails,
        NftResponse, RemoveFromSaleRequest, UpdateXpRequest, UserDetails,
    },
    state::AppState,
};

pub mod courses;
pub mod games;
pub mod health;
pub mod nfts;
pub mod users;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/courses",
            get(courses::list_courses)
                .post(courses::create_course)
                .put(courses::update_course),
        )
        .route("/courses/catalogue", post(courses::add_to_catalogue))
        .route(
            "/courses/{id}",
            get(courses::get_course).delete(courses::remove_course),
        )
        .route("/courses/{id}/enroll", post(courses::enroll))
        .route("/courses/{id}/complete", post(courses::complete))
        .route("/courses/{id}/reviews", post(courses::add_review))
        .route("/games", post(games::add_game))
        .route("/games/{address}", delete(games::remove_game))
        .route("/users", post(users::add_user))
        .route(
            "/users/{address}",
            get(users::get_user).delete(users::remove_user),
        )
        .route("/users/{address}/xp", put(users::update_xp))
        .route("/users/{address}/badges", post(users::award_badge))
        .route("/nfts", get(nfts::list_nfts).post(nfts::create_nft))
        .route("/nfts/list-for-sale", put(nfts::list_for_sale))
        .route("/nfts/remove-from-sale", put(nfts::remove_from_sale))
        .route("/nfts/{id}", get(nfts::get_nft));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// Parse a `0x`-prefixed address or object id from request input.
pub(crate) fn parse_address(field: &str, raw: &str) -> Result<SuiAddress, ApiError> {
    raw.trim()
        .parse()
        .map_err(|e: AddressParseError| ApiError::bad_request(format!("{field}: {e}")))
}

/// Reject blank strings.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::update_course,
        courses::remove_course,
        courses::add_to_catalogue,
        courses::enroll,
        courses::complete,
        courses::add_review,
        games::add_game,
        games::remove_game,
        users::get_user,
        users::add_user,
        users::remove_user,
        users::update_xp,
        users::award_badge,
        nfts::list_nfts,
        nfts::get_nft,
        nfts::create_nft,
        nfts::list_for_sale,
        nfts::remove_from_sale,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            CourseDetails,
            CourseResponse,
            CreatedObject,
            CreateCourseRequest,
            CatalogueCourseRequest,
            CourseProgressRequest,
            AddReviewRequest,
            AddGameRequest,
            UserDetails,
            AddUserRequest,
            UpdateXpRequest,
            AwardBadgeRequest,
            NftDetails,
            NftResponse,
            CreateNftRequest,
            ListForSaleRequest,
            RemoveFromSaleRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Courses", description = "Courses, catalogue, enrolment and reviews"),
        (name = "Games", description = "Game contracts registered in the database"),
        (name = "Users", description = "Learners, XP and badges"),
        (name = "NFTs", description = "Certificates, rewards and sale listings"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
