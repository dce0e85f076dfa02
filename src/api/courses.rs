// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::{
    api::{parse_address, require},
    blockchain::ObjectId,
    contracts::NewCourse,
    error::ApiError,
    models::{
        AddReviewRequest, CatalogueCourseRequest, CourseDetails, CourseProgressRequest,
        CourseResponse, CreateCourseRequest, CreatedObject,
    },
    state::AppState,
};

/// Accepted review ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[utoipa::path(
    get,
    path = "/v1/courses",
    tag = "Courses",
    responses((status = 200, body = [CourseDetails]))
)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseDetails>>, ApiError> {
    Ok(Json(state.courses.get_all_course_details().await?))
}

#[utoipa::path(
    get,
    path = "/v1/courses/{id}",
    params(("id" = String, Path, description = "Object id of the course")),
    tag = "Courses",
    responses(
        (status = 200, body = CourseDetails),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CourseDetails>, ApiError> {
    let id = parse_address("id", &id)?;
    Ok(Json(state.courses.get_course_details(id).await?))
}

#[utoipa::path(
    post,
    path = "/v1/courses",
    request_body = CreateCourseRequest,
    tag = "Courses",
    responses(
        (status = 201, body = CourseResponse),
        (status = 500, description = "Write failed")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    require("name", &request.name)?;
    require("description", &request.description)?;
    require("category", &request.category)?;
    require("image", &request.image)?;
    let creator = parse_address("creator_address", &request.creator_address)?;

    let course = NewCourse {
        name: request.name.trim().to_string(),
        description: request.description.trim().to_string(),
        category: request.category.trim().to_string(),
        creator,
        xp: request.xp,
        difficulty: request.difficulty,
        image: request.image.trim().to_string(),
    };

    let Some(id) = state.courses.create_course(&course).await? else {
        return Err(ApiError::internal(format!(
            "could not create course of name {}",
            course.name
        )));
    };

    Ok((StatusCode::CREATED, Json(read_back(&state, id).await)))
}

#[utoipa::path(
    put,
    path = "/v1/courses",
    request_body = CatalogueCourseRequest,
    tag = "Courses",
    responses(
        (status = 200, body = CourseResponse),
        (status = 500, description = "Write failed")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Json(request): Json<CatalogueCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let (id, name, description) = catalogue_fields(&request)?;

    if !state.courses.update_course(name, description, id).await? {
        return Err(ApiError::internal(format!(
            "could not update course of id {id}"
        )));
    }
    Ok(Json(read_back(&state, id).await))
}

#[utoipa::path(
    delete,
    path = "/v1/courses/{id}",
    params(("id" = String, Path, description = "Object id of the course")),
    tag = "Courses",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn remove_course(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = parse_address("id", &id)?;
    if !state.courses.remove_course(id).await? {
        return Err(ApiError::internal(format!(
            "could not remove course of id {id}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/courses/catalogue",
    request_body = CatalogueCourseRequest,
    tag = "Courses",
    responses((status = 201), (status = 500, description = "Write failed"))
)]
pub async fn add_to_catalogue(
    State(state): State<AppState>,
    Json(request): Json<CatalogueCourseRequest>,
) -> Result<StatusCode, ApiError> {
    let (id, name, description) = catalogue_fields(&request)?;

    if !state.courses.add_course(name, description, id).await? {
        return Err(ApiError::internal(format!(
            "could not add course of id {id} to the catalogue"
        )));
    }
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/v1/courses/{id}/enroll",
    params(("id" = String, Path, description = "Object id of the course")),
    request_body = CourseProgressRequest,
    tag = "Courses",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn enroll(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<CourseProgressRequest>,
) -> Result<StatusCode, ApiError> {
    let course = parse_address("id", &id)?;
    let user = parse_address("user_address", &request.user_address)?;

    if !state.courses.enroll_in_course(user, course).await? {
        return Err(ApiError::internal(format!(
            "could not enroll {user} in course {course}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/courses/{id}/complete",
    params(("id" = String, Path, description = "Object id of the course")),
    request_body = CourseProgressRequest,
    tag = "Courses",
    responses((status = 204), (status = 500, description = "Write failed"))
)]
pub async fn complete(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<CourseProgressRequest>,
) -> Result<StatusCode, ApiError> {
    let course = parse_address("id", &id)?;
    let user = parse_address("user_address", &request.user_address)?;

    if !state.courses.complete_course(user, course).await? {
        return Err(ApiError::internal(format!(
            "could not complete course {course} for {user}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/courses/{id}/reviews",
    params(("id" = String, Path, description = "Object id of the course")),
    request_body = AddReviewRequest,
    tag = "Courses",
    responses(
        (status = 204),
        (status = 400, description = "Rating outside 1..=5"),
        (status = 500, description = "Write failed")
    )
)]
pub async fn add_review(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<AddReviewRequest>,
) -> Result<StatusCode, ApiError> {
    let course = parse_address("id", &id)?;
    let reviewer = parse_address("reviewer_address", &request.reviewer_address)?;
    require("comment", &request.comment)?;
    if !RATING_RANGE.contains(&request.rating) {
        return Err(ApiError::bad_request(format!(
            "rating must be between {} and {}",
            RATING_RANGE.start(),
            RATING_RANGE.end()
        )));
    }

    let added = state
        .courses
        .add_review(course, reviewer, request.rating, request.comment.trim())
        .await?;
    if !added {
        return Err(ApiError::internal(format!(
            "could not add review to course {course}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn catalogue_fields(request: &CatalogueCourseRequest) -> Result<(ObjectId, &str, &str), ApiError> {
    require("name", &request.name)?;
    require("description", &request.description)?;
    let id = parse_address("id", &request.id)?;
    Ok((id, request.name.trim(), request.description.trim()))
}

/// Course details after a write, or only the id if they cannot be read yet.
async fn read_back(state: &AppState, id: ObjectId) -> CourseResponse {
    match state.courses.get_course_details(id).await {
        Ok(details) => CourseResponse::Details(details),
        Err(e) => {
            warn!(course = %id, error = %e, "Course details unavailable after write");
            CourseResponse::Created(CreatedObject { id: id.to_string() })
        }
    }
}
