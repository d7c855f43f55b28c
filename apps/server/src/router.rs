use axum::Router;
use campus::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "Campus Hub",
    description = "Campus events, registrations, feedback and reports"
))]

struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();

    // Split the routes from the collected OpenAPI document
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(campus::server::router::system_router())
        .nest("/api", campus::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}
