use crate::Registrations;
use crate::model::{AttendanceRequest, RegisterRequest};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use campus_derive::api_handler;
use campus_kernel::domain::constants::REGISTRATIONS_TAG;
use campus_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/register` and `/attendance`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(register)).routes(routes!(record_attendance))
}

#[api_handler(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = CREATED, description = "Student registered", body = Registration),
        (
            status = BAD_REQUEST,
            description = "Missing fields, or the event is not open to this college",
            body = ErrorBody
        ),

        (status = NOT_FOUND, description = "Unknown college or event", body = ErrorBody),
        (status = CONFLICT, description = "Already registered", body = ErrorBody),
    ),
    tag = REGISTRATIONS_TAG,
)]
async fn register(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    let slice = state.try_get_slice::<Registrations>()?;
    let registration = slice.service.register(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

#[api_handler(
    post,
    path = "/attendance",
    request_body = AttendanceRequest,
    responses(
        (status = OK, description = "Attendance recorded", body = Registration),
        (status = BAD_REQUEST, description = "Missing fields or unknown status", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown student or registration", body = ErrorBody),
    ),
    tag = REGISTRATIONS_TAG,
)]
async fn record_attendance(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<AttendanceRequest>,
) -> ApiResult<Json<Registration>> {
    let slice = state.try_get_slice::<Registrations>()?;
    Ok(Json(slice.service.record_attendance(body.validate()?).await?))
}
