use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        teacher::{CreateTeacherDto, TeacherDto, TeacherFilterParam, UpdateTeacherDto},
    },
    server::{
        controller::school::SCHOOL_TAG,
        error::AppError,
        model::teacher::{CreateTeacherParam, Teacher, UpdateTeacherParam},
        state::AppState,
    },
};

/// Tag for grouping teacher endpoints in OpenAPI documentation
pub static TEACHER_TAG: &str = "teacher";

fn into_dtos(teachers: Vec<Teacher>) -> Vec<TeacherDto> {
    teachers.into_iter().map(Teacher::into_dto).collect()
}

/// List teachers.
///
/// # Arguments
/// - `state` - Application state holding the service container
/// - `filter` - Optional `schoolId` restricting the list to one school
///
/// # Returns
/// - `200 OK` - Teachers ordered by id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/teachers",
    tag = TEACHER_TAG,
    params(TeacherFilterParam),
    responses(
        (status = 200, description = "Successfully retrieved teachers", body = Vec<TeacherDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(filter): Query<TeacherFilterParam>,
) -> Result<impl IntoResponse, AppError> {
    let teachers = state.teacher_service()?.list(filter.school_id).await?;

    Ok((StatusCode::OK, Json(into_dtos(teachers))))
}

/// List the teachers of a school.
///
/// # Returns
/// - `200 OK` - The school's teachers, possibly empty
/// - `404 Not Found` - No school with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/schools/{id}/teachers",
    tag = SCHOOL_TAG,
    params(
        ("id" = i32, Path, description = "School id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved teachers", body = Vec<TeacherDto>),
        (status = 404, description = "School not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_school_teachers(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let teachers = state.teacher_service()?.list_by_school(id).await?;

    Ok((StatusCode::OK, Json(into_dtos(teachers))))
}

/// Get a teacher by id.
///
/// # Returns
/// - `200 OK` - The teacher
/// - `404 Not Found` - No teacher with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/teachers/{id}",
    tag = TEACHER_TAG,
    params(
        ("id" = i32, Path, description = "Teacher id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved teacher", body = TeacherDto),
        (status = 404, description = "Teacher not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = state.teacher_service()?.get(id).await?;

    Ok((StatusCode::OK, Json(teacher.into_dto())))
}

/// Create a new teacher.
///
/// # Arguments
/// - `state` - Application state holding the service container
/// - `payload` - Teacher data; `schoolId` is optional
///
/// # Returns
/// - `201 Created` - The created teacher
/// - `400 Bad Request` - Blank field, malformed email or unknown school
/// - `409 Conflict` - Email already used by another teacher
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/teachers",
    tag = TEACHER_TAG,
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Successfully created teacher", body = TeacherDto),
        (status = 400, description = "Invalid teacher data", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeacherDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = CreateTeacherParam::from_dto(payload)?;
    let teacher = state.teacher_service()?.create(param).await?;

    Ok((StatusCode::CREATED, Json(teacher.into_dto())))
}

/// Update a teacher.
///
/// Only the fields present in the payload change; `"schoolId": null` unassigns
/// the teacher.
///
/// # Returns
/// - `200 OK` - The updated teacher
/// - `400 Bad Request` - Blank field, malformed email or unknown school
/// - `404 Not Found` - No teacher with this id
/// - `409 Conflict` - Email already used by another teacher
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/teachers/{id}",
    tag = TEACHER_TAG,
    params(
        ("id" = i32, Path, description = "Teacher id")
    ),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Successfully updated teacher", body = TeacherDto),
        (status = 400, description = "Invalid teacher data", body = ErrorDto),
        (status = 404, description = "Teacher not found", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTeacherDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = UpdateTeacherParam::from_dto(payload)?;
    let teacher = state.teacher_service()?.update(id, param).await?;

    Ok((StatusCode::OK, Json(teacher.into_dto())))
}

/// Delete a teacher.
///
/// # Returns
/// - `204 No Content` - Teacher deleted
/// - `404 Not Found` - No teacher with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    tag = TEACHER_TAG,
    params(
        ("id" = i32, Path, description = "Teacher id")
    ),
    responses(
        (status = 204, description = "Successfully deleted teacher"),
        (status = 404, description = "Teacher not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.teacher_service()?.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
