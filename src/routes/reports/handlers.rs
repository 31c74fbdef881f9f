use axum::{extract::State, Json};
use uuid::Uuid;

use crate::common::{ApiPath, ApiQuery, AppState};
use crate::error::AppResult;
use crate::services::aggregate;

use super::types::{ReportResponse, ReportsListResponse, ReportsQuery};

/// List daily reports, newest first
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    params(ReportsQuery),
    responses(
        (status = 200, description = "Reports retrieved successfully", body = ReportsListResponse),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportsQuery>,
) -> AppResult<Json<ReportsListResponse>> {
    let reports = aggregate::list_reports(&state.db, query.device_id)
        .await?
        .into_iter()
        .map(ReportResponse::from)
        .collect();

    Ok(Json(ReportsListResponse { reports }))
}

/// Get the most recent report for a device
#[utoipa::path(
    get,
    path = "/api/v1/reports/latest/{device_id}",
    params(
        ("device_id" = Uuid, Path, description = "Device UUID"),
    ),
    responses(
        (status = 200, description = "Latest report retrieved successfully", body = ReportResponse),
        (status = 404, description = "Device has no reports"),
    ),
    tag = "reports"
)]
pub async fn get_latest_report(
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<Uuid>,
) -> AppResult<Json<ReportResponse>> {
    let report = aggregate::latest_report_for_device(&state.db, device_id).await?;
    Ok(Json(report.into()))
}
