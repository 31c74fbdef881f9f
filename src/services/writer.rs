//! Write paths: notification settings, service tickets, maintenance records
//! and read flags.
//!
//! Settings creation and updates go through `INSERT ... ON CONFLICT (user_id)`
//! so concurrent first access still leaves exactly one row per user.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{maintenance_logs, notification_settings, notifications, service_tickets};
use crate::error::{AppError, AppResult};

pub const DEFAULT_URGENCY: &str = "normal";

/// Accepted `performed_at` layouts besides RFC 3339. Browser datetime-local
/// inputs send these without an offset; they are read as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Recognised notification-settings fields. Anything else in a payload is
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SettingsUpdate {
    /// `null` clears the token; omitting the key leaves it unchanged
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub push_token: Option<Option<String>>,
    pub push_enabled: Option<bool>,
    pub kakao_enabled: Option<bool>,
    pub anomaly_alerts: Option<bool>,
    pub report_alerts: Option<bool>,
}

impl SettingsUpdate {
    /// Project a loosely-typed JSON body onto the recognised fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the body is not an object or a
    /// recognised field has the wrong type.
    pub fn from_payload(payload: serde_json::Value) -> AppResult<Self> {
        if !payload.is_object() {
            return Err(AppError::BadRequest(
                "Settings payload must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(payload)
            .map_err(|e| AppError::BadRequest(format!("Invalid settings payload: {e}")))
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewServiceTicket {
    pub device_id: Option<Uuid>,
    pub description: Option<String>,
    /// Defaults to `normal`
    pub urgency: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewMaintenanceRecord {
    pub device_id: Option<Uuid>,
    /// CLEANING, CHECK, PART_REPLACE
    pub action_type: Option<String>,
    pub description: Option<String>,
    /// RFC 3339 or `YYYY-MM-DDTHH:MM[:SS]` (UTC). Defaults to now.
    pub performed_at: Option<String>,
}

fn default_settings(user_id: Uuid, now: DateTimeWithTimeZone) -> notification_settings::ActiveModel {
    notification_settings::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        push_token: Set(None),
        push_enabled: Set(true),
        kakao_enabled: Set(false),
        anomaly_alerts: Set(true),
        report_alerts: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

async fn find_settings(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Option<notification_settings::Model>> {
    Ok(notification_settings::Entity::find()
        .filter(notification_settings::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

async fn reload_settings(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<notification_settings::Model> {
    find_settings(db, user_id).await?.ok_or_else(|| {
        AppError::Database(DbErr::RecordNotFound(format!(
            "notification_settings for user '{user_id}' missing after upsert"
        )))
    })
}

/// Settings for `user_id`, creating the default record on first access.
pub async fn get_or_create_settings(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<notification_settings::Model> {
    if let Some(existing) = find_settings(db, user_id).await? {
        return Ok(existing);
    }

    let inserted = notification_settings::Entity::insert(default_settings(user_id, Utc::now().into()))
        .on_conflict(
            OnConflict::column(notification_settings::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if inserted > 0 {
        tracing::info!(%user_id, "Created default notification settings");
    } else {
        tracing::debug!(%user_id, "Settings created concurrently, reusing existing row");
    }

    reload_settings(db, user_id).await
}

/// Upsert the recognised fields of `update` for `user_id`.
///
/// Absent rows are created from defaults overlaid with `update`; existing rows
/// only have the fields present in `update` (and `updated_at`) overwritten.
pub async fn update_settings(
    db: &DatabaseConnection,
    user_id: Uuid,
    update: SettingsUpdate,
) -> AppResult<notification_settings::Model> {
    use notification_settings::Column;

    let mut model = default_settings(user_id, Utc::now().into());
    let mut columns = vec![Column::UpdatedAt];

    if let Some(token) = update.push_token {
        model.push_token = Set(token);
        columns.push(Column::PushToken);
    }
    if let Some(enabled) = update.push_enabled {
        model.push_enabled = Set(enabled);
        columns.push(Column::PushEnabled);
    }
    if let Some(enabled) = update.kakao_enabled {
        model.kakao_enabled = Set(enabled);
        columns.push(Column::KakaoEnabled);
    }
    if let Some(enabled) = update.anomaly_alerts {
        model.anomaly_alerts = Set(enabled);
        columns.push(Column::AnomalyAlerts);
    }
    if let Some(enabled) = update.report_alerts {
        model.report_alerts = Set(enabled);
        columns.push(Column::ReportAlerts);
    }

    let fields = columns.len() - 1;

    notification_settings::Entity::insert(model)
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns(columns)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    tracing::info!(%user_id, fields, "Notification settings updated");

    reload_settings(db, user_id).await
}

fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Persist a service ticket. Duplicate submissions create duplicate tickets.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if `device_id` or `description` is missing.
pub async fn create_service_ticket(
    db: &DatabaseConnection,
    user_id: Uuid,
    ticket: NewServiceTicket,
) -> AppResult<service_tickets::Model> {
    let device_id = ticket
        .device_id
        .ok_or_else(|| AppError::BadRequest("device_id is required".to_string()))?;
    let description = required_text(ticket.description, "description")?;
    let urgency = ticket
        .urgency
        .map(|u| u.trim().to_lowercase())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_URGENCY.to_string());

    let created = service_tickets::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(device_id),
        user_id: Set(user_id),
        description: Set(description),
        urgency: Set(urgency),
        scheduled_date: Set(ticket.scheduled_date),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    tracing::info!(
        ticket_id = %created.id,
        device_id = %created.device_id,
        urgency = %created.urgency,
        "Service ticket created"
    );

    Ok(created)
}

fn parse_performed_at(raw: &str) -> AppResult<DateTime<FixedOffset>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid performed_at timestamp: '{raw}'")))
}

/// Append a maintenance record for a device.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if `device_id` or `action_type` is missing,
/// or `performed_at` cannot be parsed.
pub async fn record_maintenance(
    db: &DatabaseConnection,
    record: NewMaintenanceRecord,
) -> AppResult<maintenance_logs::Model> {
    let device_id = record
        .device_id
        .ok_or_else(|| AppError::BadRequest("device_id is required".to_string()))?;
    let action_type = required_text(record.action_type, "action_type")?.to_uppercase();

    let now: DateTimeWithTimeZone = Utc::now().into();
    let performed_at = match record.performed_at.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_performed_at(raw)?,
        _ => now,
    };

    let created = maintenance_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(device_id),
        action_type: Set(action_type),
        description: Set(record.description.filter(|d| !d.trim().is_empty())),
        performed_at: Set(performed_at),
        created_at: Set(now),
    }
    .insert(db)
    .await?;

    tracing::info!(
        log_id = %created.id,
        device_id = %created.device_id,
        action_type = %created.action_type,
        "Maintenance recorded"
    );

    Ok(created)
}

/// Mark one of the caller's notifications as read. Returns rows affected.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    user_id: Uuid,
    notification_id: Uuid,
) -> AppResult<u64> {
    let result = notifications::Entity::update_many()
        .col_expr(notifications::Column::IsRead, Expr::value(true))
        .filter(notifications::Column::Id.eq(notification_id))
        .filter(notifications::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Mark every notification of the caller as read. Returns rows affected.
pub async fn mark_all_notifications_read(db: &DatabaseConnection, user_id: Uuid) -> AppResult<u64> {
    let result = notifications::Entity::update_many()
        .col_expr(notifications::Column::IsRead, Expr::value(true))
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    tracing::debug!(%user_id, updated = result.rows_affected, "Notifications marked read");

    Ok(result.rows_affected)
}
