use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        school::{CreateSchoolDto, SchoolDto, UpdateSchoolDto},
    },
    server::{
        error::AppError,
        model::school::{CreateSchoolParam, School, UpdateSchoolParam},
        state::AppState,
    },
};

/// Tag for grouping school endpoints in OpenAPI documentation
pub static SCHOOL_TAG: &str = "school";

/// List all schools.
///
/// # Returns
/// - `200 OK` - Schools ordered by id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/schools",
    tag = SCHOOL_TAG,
    responses(
        (status = 200, description = "Successfully retrieved schools", body = Vec<SchoolDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_schools(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let schools = state.school_service()?.list().await?;

    Ok((
        StatusCode::OK,
        Json(
            schools
                .into_iter()
                .map(School::into_dto)
                .collect::<Vec<SchoolDto>>(),
        ),
    ))
}

/// Get a school by id.
///
/// # Arguments
/// - `state` - Application state holding the service container
/// - `id` - School id
///
/// # Returns
/// - `200 OK` - The school
/// - `404 Not Found` - No school with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/schools/{id}",
    tag = SCHOOL_TAG,
    params(
        ("id" = i32, Path, description = "School id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved school", body = SchoolDto),
        (status = 404, description = "School not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let school = state.school_service()?.get(id).await?;

    Ok((StatusCode::OK, Json(school.into_dto())))
}

/// Create a new school.
///
/// # Arguments
/// - `state` - Application state holding the service container
/// - `payload` - School data; every field is required and must not be blank
///
/// # Returns
/// - `201 Created` - The created school
/// - `400 Bad Request` - Blank field or malformed email
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/schools",
    tag = SCHOOL_TAG,
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "Successfully created school", body = SchoolDto),
        (status = 400, description = "Invalid school data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_school(
    State(state): State<AppState>,
    Json(payload): Json<CreateSchoolDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = CreateSchoolParam::from_dto(payload)?;
    let school = state.school_service()?.create(param).await?;

    Ok((StatusCode::CREATED, Json(school.into_dto())))
}

/// Update a school.
///
/// Only the fields present in the payload change.
///
/// # Returns
/// - `200 OK` - The updated school
/// - `400 Bad Request` - Blank field or malformed email
/// - `404 Not Found` - No school with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/schools/{id}",
    tag = SCHOOL_TAG,
    params(
        ("id" = i32, Path, description = "School id")
    ),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "Successfully updated school", body = SchoolDto),
        (status = 400, description = "Invalid school data", body = ErrorDto),
        (status = 404, description = "School not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSchoolDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = UpdateSchoolParam::from_dto(payload)?;
    let school = state.school_service()?.update(id, param).await?;

    Ok((StatusCode::OK, Json(school.into_dto())))
}

/// Delete a school.
///
/// Teachers of the school are kept and become unassigned.
///
/// # Returns
/// - `204 No Content` - School deleted
/// - `404 Not Found` - No school with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/schools/{id}",
    tag = SCHOOL_TAG,
    params(
        ("id" = i32, Path, description = "School id")
    ),
    responses(
        (status = 204, description = "Successfully deleted school"),
        (status = 404, description = "School not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.school_service()?.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
