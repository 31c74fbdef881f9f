use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::daily_reports;

/// Daily health report
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub id: Uuid,
    pub device_id: Uuid,
    pub report_date: NaiveDate,
    /// 0-100
    pub health_score: i32,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<daily_reports::Model> for ReportResponse {
    fn from(r: daily_reports::Model) -> Self {
        Self {
            id: r.id,
            device_id: r.device_id,
            report_date: r.report_date,
            health_score: r.health_score,
            summary: r.summary,
            created_at: r.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportsListResponse {
    pub reports: Vec<ReportResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportsQuery {
    /// Restrict to one device
    pub device_id: Option<Uuid>,
}
