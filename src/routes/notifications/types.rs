use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{notification_settings, notifications};

/// Notification as rendered by the client
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notifications::Model> for NotificationResponse {
    fn from(n: notifications::Model) -> Self {
        Self {
            id: n.id.to_string(),
            notification_type: n.notification_type,
            title: n.title,
            message: n.message,
            is_read: n.is_read,
            created_at: n.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationsListResponse {
    pub notifications: Vec<NotificationResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationSettingsResponse {
    pub push_token: Option<String>,
    pub push_enabled: bool,
    pub kakao_enabled: bool,
    pub anomaly_alerts: bool,
    pub report_alerts: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<notification_settings::Model> for NotificationSettingsResponse {
    fn from(s: notification_settings::Model) -> Self {
        Self {
            push_token: s.push_token,
            push_enabled: s.push_enabled,
            kakao_enabled: s.kakao_enabled,
            anomaly_alerts: s.anomaly_alerts,
            report_alerts: s.report_alerts,
            updated_at: s.updated_at.with_timezone(&Utc),
        }
    }
}
