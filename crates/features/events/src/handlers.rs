use crate::Events;
use crate::model::{CreateEventRequest, EventActionResponse, ListEventsQuery};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use campus_derive::api_handler;
use campus_kernel::domain::constants::{EVENT, EVENTS_TAG};
use campus_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/events` routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_event, list_events))
        .routes(routes!(get_event, delete_event))
        .routes(routes!(publish_event))
        .routes(routes!(cancel_event))
        .routes(routes!(complete_event))
}

#[api_handler(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = CREATED, description = "Event created", body = Event),
        (status = BAD_REQUEST, description = "Missing or malformed fields", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown college", body = ErrorBody),
        (status = CONFLICT, description = "Id already taken", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn create_event(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let slice = state.try_get_slice::<Events>()?;
    let event = slice.service.create(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[api_handler(
    get,
    path = "/events",
    params(ListEventsQuery),
    responses(
        (status = OK, description = "Events by start time", body = Vec<Event>),
        (status = BAD_REQUEST, description = "Malformed filter", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn list_events(
    State(state): State<ApiState>,
    QueryParams(query): QueryParams<ListEventsQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let slice = state.try_get_slice::<Events>()?;
    Ok(Json(slice.service.list(query.validate()?).await?))
}

#[api_handler(
    get,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = OK, description = "The event", body = Event),
        (status = NOT_FOUND, description = "No such event", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn get_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Event>> {
    let id = verified_id("id", EVENT, &id)?;
    let slice = state.try_get_slice::<Events>()?;
    Ok(Json(slice.service.require(&id).await?))
}

#[api_handler(
    delete,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (
            status = OK,
            description = "Event, registrations and feedback deleted",
            body = MessageResponse
        ),
        (status = NOT_FOUND, description = "No such event", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn delete_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = verified_id("id", EVENT, &id)?;
    let slice = state.try_get_slice::<Events>()?;
    slice.service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

async fn transition(
    state: &ApiState,
    id: &str,
    target: EventState,
    message: &str,
) -> ApiResult<Json<EventActionResponse>> {
    let id = verified_id("id", EVENT, id)?;
    let slice = state.try_get_slice::<Events>()?;
    let event = slice.service.set_state(&id, target).await?;
    Ok(Json(EventActionResponse { message: message.to_owned(), event }))
}

#[api_handler(
    post,
    path = "/events/{id}/publish",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = OK, description = "Event published", body = EventActionResponse),
        (status = NOT_FOUND, description = "No such event", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn publish_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EventActionResponse>> {
    transition(&state, &id, EventState::Published, "Event published").await
}

#[api_handler(
    post,
    path = "/events/{id}/cancel",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (
            status = OK,
            description = "Event cancelled; the record is kept",
            body = EventActionResponse
        ),

        (status = NOT_FOUND, description = "No such event", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn cancel_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EventActionResponse>> {
    transition(&state, &id, EventState::Cancelled, "Event cancelled").await
}

#[api_handler(
    post,
    path = "/events/{id}/complete",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = OK, description = "Event completed", body = EventActionResponse),
        (status = NOT_FOUND, description = "No such event", body = ErrorBody),
    ),
    tag = EVENTS_TAG,
)]
async fn complete_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EventActionResponse>> {
    transition(&state, &id, EventState::Completed, "Event completed").await
}
