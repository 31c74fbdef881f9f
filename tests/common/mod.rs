//! Shared fixtures: an in-memory SQLite store with the production migrations.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use uuid::Uuid;

use signalcraft_api::common::AppState;
use signalcraft_api::config::{Config, Deployment, ForecastOrder, PLACEHOLDER_USER_ID};
use signalcraft_api::entity::{
    daily_reports, devices, forecasts, machine_event_logs, maintenance_logs, notifications,
};

pub async fn setup_db() -> DatabaseConnection {
    // One connection: every pooled connection would otherwise get its own empty database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    migration::Migrator::up(&db, None)
        .await
        .expect("run migrations");
    db
}

pub fn placeholder_user() -> Uuid {
    PLACEHOLDER_USER_ID.parse().expect("valid placeholder uuid")
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        run_migrations: true,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        disable_rate_limiting: true,
        rate_limit_per_second: 10,
        rate_limit_burst: 60,
        default_user_id: placeholder_user(),
        forecast_order: ForecastOrder::Latest,
        deployment: Deployment::Local,
    }
}

pub async fn test_state() -> AppState {
    AppState::new(setup_db().await, test_config())
}

/// UTC timestamp `minutes` after 2026-01-01T00:00Z.
pub fn ts(minutes: i64) -> DateTime<FixedOffset> {
    (Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(minutes))
        .fixed_offset()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

pub struct DeviceSeed<'a> {
    pub name: &'a str,
    pub status: Option<&'a str>,
    pub location_info: Option<Value>,
    pub config: Option<Value>,
    pub model_type: Option<&'a str>,
    pub created_minute: i64,
}

impl Default for DeviceSeed<'_> {
    fn default() -> Self {
        Self {
            name: "Freezer",
            status: Some("GOOD"),
            location_info: None,
            config: None,
            model_type: None,
            created_minute: 0,
        }
    }
}

pub async fn insert_device(
    db: &DatabaseConnection,
    user_id: Uuid,
    seed: DeviceSeed<'_>,
) -> devices::Model {
    devices::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(seed.name.to_string()),
        status: Set(seed.status.map(str::to_string)),
        location_info: Set(seed.location_info),
        config: Set(seed.config),
        model_type: Set(seed.model_type.map(str::to_string)),
        created_at: Set(ts(seed.created_minute)),
    }
    .insert(db)
    .await
    .expect("insert device")
}

pub async fn insert_report(
    db: &DatabaseConnection,
    device_id: Uuid,
    day: u32,
    health_score: i32,
) -> daily_reports::Model {
    daily_reports::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(device_id),
        report_date: Set(date(day)),
        health_score: Set(health_score),
        summary: Set(Some(format!("report for day {day}"))),
        created_at: Set(ts(i64::from(day) * 1440)),
    }
    .insert(db)
    .await
    .expect("insert report")
}

pub async fn insert_forecast(
    db: &DatabaseConnection,
    device_id: Uuid,
    payload: Value,
    created_minute: i64,
) -> forecasts::Model {
    forecasts::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(device_id),
        forecast_data: Set(payload),
        created_at: Set(ts(created_minute)),
    }
    .insert(db)
    .await
    .expect("insert forecast")
}

pub async fn insert_maintenance(
    db: &DatabaseConnection,
    device_id: Uuid,
    action_type: &str,
    performed_minute: i64,
) -> maintenance_logs::Model {
    maintenance_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(device_id),
        action_type: Set(action_type.to_string()),
        description: Set(None),
        performed_at: Set(ts(performed_minute)),
        created_at: Set(ts(performed_minute)),
    }
    .insert(db)
    .await
    .expect("insert maintenance log")
}

pub async fn insert_event(
    db: &DatabaseConnection,
    device_id: Uuid,
    message: &str,
    occurred_minute: i64,
) -> machine_event_logs::Model {
    machine_event_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(device_id),
        event_type: Set("VIBRATION".to_string()),
        message: Set(message.to_string()),
        severity: Set(Some("info".to_string())),
        occurred_at: Set(ts(occurred_minute)),
    }
    .insert(db)
    .await
    .expect("insert event log")
}

pub async fn insert_notification(
    db: &DatabaseConnection,
    user_id: Uuid,
    title: &str,
    created_minute: i64,
) -> notifications::Model {
    notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        notification_type: Set("anomaly".to_string()),
        title: Set(title.to_string()),
        message: Set(format!("{title} details")),
        is_read: Set(false),
        created_at: Set(ts(created_minute)),
    }
    .insert(db)
    .await
    .expect("insert notification")
}
