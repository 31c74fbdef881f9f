use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::{forecasts, machine_event_logs, maintenance_logs, service_tickets};
use crate::routes::reports::ReportResponse;
use crate::services::aggregate::FleetSummary;
use crate::services::normalizer::MachineView;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MachineQuery {
    /// Device UUID
    pub machine_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MachinesResponse {
    pub machines: Vec<MachineView>,
}

/// Device counts by display status
#[derive(Debug, Serialize, ToSchema)]
pub struct FleetSummaryResponse {
    pub total: usize,
    pub running: usize,
    pub warning: usize,
    pub danger: usize,
}

impl From<FleetSummary> for FleetSummaryResponse {
    fn from(s: FleetSummary) -> Self {
        Self {
            total: s.total,
            running: s.running,
            warning: s.warning,
            danger: s.danger,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastResponse {
    pub id: Uuid,
    pub device_id: Uuid,
    /// Opaque payload from the forecasting pipeline
    #[schema(value_type = Object)]
    pub forecast_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<forecasts::Model> for ForecastResponse {
    fn from(f: forecasts::Model) -> Self {
        Self {
            id: f.id,
            device_id: f.device_id,
            forecast_data: f.forecast_data,
            created_at: f.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub machine_id: Uuid,
    pub report: Option<ReportResponse>,
    pub forecast: Option<ForecastResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceLogResponse {
    pub id: Uuid,
    pub device_id: Uuid,
    pub action_type: String,
    pub description: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<maintenance_logs::Model> for MaintenanceLogResponse {
    fn from(m: maintenance_logs::Model) -> Self {
        Self {
            id: m.id,
            device_id: m.device_id,
            action_type: m.action_type,
            description: m.description,
            performed_at: m.performed_at.with_timezone(&Utc),
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceHistoryResponse {
    pub machine_id: Uuid,
    pub maintenance: Vec<MaintenanceLogResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventLogResponse {
    pub id: Uuid,
    pub device_id: Uuid,
    pub event_type: String,
    pub message: String,
    pub severity: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl From<machine_event_logs::Model> for EventLogResponse {
    fn from(e: machine_event_logs::Model) -> Self {
        Self {
            id: e.id,
            device_id: e.device_id,
            event_type: e.event_type,
            message: e.message,
            severity: e.severity,
            occurred_at: e.occurred_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SmartLogResponse {
    pub machine_id: Uuid,
    pub smart_log: Vec<EventLogResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceTicketResponse {
    pub id: Uuid,
    pub device_id: Uuid,
    pub description: String,
    pub urgency: String,
    pub scheduled_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<service_tickets::Model> for ServiceTicketResponse {
    fn from(t: service_tickets::Model) -> Self {
        Self {
            id: t.id,
            device_id: t.device_id,
            description: t.description,
            urgency: t.urgency,
            scheduled_date: t.scheduled_date,
            created_at: t.created_at.with_timezone(&Utc),
        }
    }
}
