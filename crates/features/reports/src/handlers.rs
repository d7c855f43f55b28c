use crate::Reports;
use crate::error::ReportError;
use crate::model::{ReportKind, ReportQuery, ReportRows};
use axum::Json;
use axum::extract::{Path, State};
use campus_derive::api_handler;
use campus_kernel::domain::constants::REPORTS_TAG;
use campus_kernel::prelude::*;
use std::str::FromStr;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/reports/{report}`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(get_report))
}

#[api_handler(
    get,
    path = "/reports/{report}",
    params(
        ("report" = ReportKind, Path, description = "Report name"),
        ReportQuery,
    ),
    responses(
        (
            status = OK,
            description = "Report rows; empty when nothing is in scope",
            body = ReportRows
        ),
        (status = BAD_REQUEST, description = "Malformed filter", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown report", body = ErrorBody),
    ),
    tag = REPORTS_TAG,
)]
async fn get_report(
    State(state): State<ApiState>,
    Path(report): Path<String>,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ApiResult<Json<ReportRows>> {
    let kind = ReportKind::from_str(&report).map_err(|_| ReportError::NotFound {
        message: format!("Unknown report {report}").into(),
        context: None,
    })?;

    let params = query.validate()?;

    let slice = state.try_get_slice::<Reports>()?;
    Ok(Json(slice.engine.report(kind, &params).await?))
}
