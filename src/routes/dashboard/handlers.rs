use axum::{extract::State, http::StatusCode, Json};

use crate::common::{ApiJson, ApiQuery, AppState, CallerIdentity};
use crate::error::AppResult;
use crate::services::writer::{NewMaintenanceRecord, NewServiceTicket};
use crate::services::{aggregate, writer};

use super::types::{
    AnalysisResponse, FleetSummaryResponse, MachineQuery, MachinesResponse,
    MaintenanceHistoryResponse, MaintenanceLogResponse, ServiceTicketResponse, SmartLogResponse,
};

/// List the caller's machines with derived status, health and prediction
#[utoipa::path(
    get,
    path = "/api/v1/machines",
    responses(
        (status = 200, description = "Machines retrieved successfully", body = MachinesResponse),
    ),
    tag = "dashboard"
)]
pub async fn list_machines(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<MachinesResponse>> {
    let machines = aggregate::fleet(&state.db, caller.user_id).await?;
    Ok(Json(MachinesResponse { machines }))
}

/// Count the caller's machines by status
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    responses(
        (status = 200, description = "Summary computed successfully", body = FleetSummaryResponse),
    ),
    tag = "dashboard"
)]
pub async fn get_summary(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<FleetSummaryResponse>> {
    let summary = aggregate::fleet_summary(&state.db, caller.user_id).await?;
    Ok(Json(summary.into()))
}

/// Latest report and forecast for a machine
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/machine-detail/analysis",
    params(MachineQuery),
    responses(
        (status = 200, description = "Analysis retrieved successfully", body = AnalysisResponse),
    ),
    tag = "machine-detail"
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MachineQuery>,
) -> AppResult<Json<AnalysisResponse>> {
    let analysis =
        aggregate::machine_analysis(&state.db, query.machine_id, state.config.forecast_order)
            .await?;

    Ok(Json(AnalysisResponse {
        machine_id: query.machine_id,
        report: analysis.report.map(Into::into),
        forecast: analysis.forecast.map(Into::into),
    }))
}

/// Maintenance history for a machine, newest first
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/machine-detail/maintenance",
    params(MachineQuery),
    responses(
        (status = 200, description = "Maintenance history retrieved successfully", body = MaintenanceHistoryResponse),
    ),
    tag = "machine-detail"
)]
pub async fn get_maintenance(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MachineQuery>,
) -> AppResult<Json<MaintenanceHistoryResponse>> {
    let maintenance = aggregate::maintenance_history(&state.db, query.machine_id)
        .await?
        .into_iter()
        .map(MaintenanceLogResponse::from)
        .collect();

    Ok(Json(MaintenanceHistoryResponse {
        machine_id: query.machine_id,
        maintenance,
    }))
}

/// Record a maintenance action
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/machine-detail/maintenance",
    request_body = NewMaintenanceRecord,
    responses(
        (status = 201, description = "Maintenance recorded", body = MaintenanceLogResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "machine-detail"
)]
pub async fn create_maintenance(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<NewMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<MaintenanceLogResponse>)> {
    let created = writer::record_maintenance(&state.db, record).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Machine event log, newest first
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/machine-detail/smart-log",
    params(MachineQuery),
    responses(
        (status = 200, description = "Event log retrieved successfully", body = SmartLogResponse),
    ),
    tag = "machine-detail"
)]
pub async fn get_smart_log(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MachineQuery>,
) -> AppResult<Json<SmartLogResponse>> {
    let smart_log = aggregate::event_history(&state.db, query.machine_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(SmartLogResponse {
        machine_id: query.machine_id,
        smart_log,
    }))
}

/// Request a technician visit
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/machine-detail/service-ticket",
    request_body = NewServiceTicket,
    responses(
        (status = 201, description = "Ticket created", body = ServiceTicketResponse),
        (status = 400, description = "Missing device_id or description"),
    ),
    tag = "machine-detail"
)]
pub async fn create_service_ticket(
    State(state): State<AppState>,
    caller: CallerIdentity,
    ApiJson(ticket): ApiJson<NewServiceTicket>,
) -> AppResult<(StatusCode, Json<ServiceTicketResponse>)> {
    let created = writer::create_service_ticket(&state.db, caller.user_id, ticket).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
