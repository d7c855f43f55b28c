use crate::FeedbackSlice;
use crate::model::FeedbackRequest;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use campus_derive::api_handler;
use campus_kernel::domain::constants::FEEDBACK_TAG;
use campus_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/feedback`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(submit_feedback))
}

#[api_handler(
    post,
    path = "/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = CREATED, description = "Feedback stored", body = Feedback),
        (
            status = BAD_REQUEST,
            description = "Missing fields, rating out of range or foreign event",
            body = ErrorBody
        ),

        (status = NOT_FOUND, description = "Unknown student or event", body = ErrorBody),
    ),
    tag = FEEDBACK_TAG,
)]
async fn submit_feedback(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<FeedbackRequest>,
) -> ApiResult<(StatusCode, Json<Feedback>)> {
    let slice = state.try_get_slice::<FeedbackSlice>()?;
    let feedback = slice.service.submit(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}
