use crate::Colleges;
use crate::model::CreateCollegeRequest;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use campus_derive::api_handler;
use campus_kernel::domain::constants::{COLLEGE, COLLEGES_TAG};
use campus_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/colleges` routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_college, list_colleges))
        .routes(routes!(get_college, delete_college))
        .routes(routes!(list_students))
}

#[api_handler(
    post,
    path = "/colleges",
    request_body = CreateCollegeRequest,
    responses(
        (status = CREATED, description = "College created", body = College),
        (status = BAD_REQUEST, description = "Missing or malformed fields", body = ErrorBody),
        (status = CONFLICT, description = "Id already taken", body = ErrorBody),
    ),
    tag = COLLEGES_TAG,
)]
async fn create_college(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<CreateCollegeRequest>,
) -> ApiResult<(StatusCode, Json<College>)> {
    let slice = state.try_get_slice::<Colleges>()?;
    let college = slice.service.create(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(college)))
}

#[api_handler(
    get,
    path = "/colleges",
    responses((status = OK, description = "All colleges by name", body = Vec<College>)),
    tag = COLLEGES_TAG,
)]
async fn list_colleges(State(state): State<ApiState>) -> ApiResult<Json<Vec<College>>> {
    let slice = state.try_get_slice::<Colleges>()?;
    Ok(Json(slice.service.list().await?))
}

#[api_handler(
    get,
    path = "/colleges/{id}",
    params(("id" = String, Path, description = "College id")),
    responses(
        (status = OK, description = "The college", body = College),
        (status = NOT_FOUND, description = "No such college", body = ErrorBody),
    ),
    tag = COLLEGES_TAG,
)]
async fn get_college(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<College>> {
    let id = verified_id("id", COLLEGE, &id)?;
    let slice = state.try_get_slice::<Colleges>()?;
    Ok(Json(slice.service.require(&id).await?))
}

#[api_handler(
    delete,
    path = "/colleges/{id}",
    params(("id" = String, Path, description = "College id")),
    responses(
        (
            status = OK,
            description = "College and everything it owns deleted",
            body = MessageResponse
        ),

        (status = NOT_FOUND, description = "No such college", body = ErrorBody),
    ),
    tag = COLLEGES_TAG,
)]
async fn delete_college(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = verified_id("id", COLLEGE, &id)?;
    let slice = state.try_get_slice::<Colleges>()?;
    slice.service.delete(&id).await?;
    Ok(Json(MessageResponse::new("College deleted successfully")))
}

#[api_handler(
    get,
    path = "/colleges/{id}/students",
    params(("id" = String, Path, description = "College id")),
    responses(
        (status = OK, description = "Students by roll number", body = Vec<Student>),
        (status = NOT_FOUND, description = "No such college", body = ErrorBody),
    ),
    tag = COLLEGES_TAG,
)]
async fn list_students(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Student>>> {
    let id = verified_id("id", COLLEGE, &id)?;
    let slice = state.try_get_slice::<Colleges>()?;
    Ok(Json(slice.service.students(&id).await?))
}
