use axum::{extract::State, Json};
use uuid::Uuid;

use crate::common::{ApiJson, ApiPath, AppState, CallerIdentity};
use crate::error::AppResult;
use crate::services::writer::SettingsUpdate;
use crate::services::{aggregate, writer};

use super::types::{
    NotificationResponse, NotificationSettingsResponse, NotificationsListResponse, StatusResponse,
};

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications retrieved successfully", body = NotificationsListResponse),
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<NotificationsListResponse>> {
    let notifications = aggregate::list_notifications(&state.db, caller.user_id)
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(NotificationsListResponse { notifications }))
}

/// Mark a single notification as read
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{notification_id}/read",
    params(
        ("notification_id" = Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 200, description = "Notification marked read", body = StatusResponse),
    ),
    tag = "notifications"
)]
pub async fn mark_as_read(
    State(state): State<AppState>,
    caller: CallerIdentity,
    ApiPath(notification_id): ApiPath<Uuid>,
) -> AppResult<Json<StatusResponse>> {
    writer::mark_notification_read(&state.db, caller.user_id, notification_id).await?;
    Ok(Json(StatusResponse::success()))
}

/// Mark all of the caller's notifications as read
#[utoipa::path(
    post,
    path = "/api/v1/notifications/mark-all-read",
    responses(
        (status = 200, description = "Notifications marked read", body = StatusResponse),
    ),
    tag = "notifications"
)]
pub async fn mark_all_as_read(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<StatusResponse>> {
    writer::mark_all_notifications_read(&state.db, caller.user_id).await?;
    Ok(Json(StatusResponse::success()))
}

/// Get notification settings, creating defaults on first access
#[utoipa::path(
    get,
    path = "/api/v1/notifications/settings",
    responses(
        (status = 200, description = "Settings retrieved successfully", body = NotificationSettingsResponse),
    ),
    tag = "notifications"
)]
pub async fn get_settings(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<NotificationSettingsResponse>> {
    let settings = writer::get_or_create_settings(&state.db, caller.user_id).await?;
    Ok(Json(settings.into()))
}

/// Update notification settings
///
/// Unrecognised keys in the body are ignored.
#[utoipa::path(
    patch,
    path = "/api/v1/notifications/settings",
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Settings updated", body = NotificationSettingsResponse),
        (status = 400, description = "Malformed settings payload"),
    ),
    tag = "notifications"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    caller: CallerIdentity,
    ApiJson(payload): ApiJson<serde_json::Value>,
) -> AppResult<Json<NotificationSettingsResponse>> {
    let update = SettingsUpdate::from_payload(payload)?;
    let settings = writer::update_settings(&state.db, caller.user_id, update).await?;
    Ok(Json(settings.into()))
}
