//! Read-side composition over the device collections.
//!
//! Store failures propagate as `AppError::Database`; the only read that treats
//! absence as an error is [`latest_report_for_device`].

use futures::future::try_join_all;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use crate::config::ForecastOrder;
use crate::entity::{
    daily_reports, devices, forecasts, machine_event_logs, maintenance_logs, notifications,
};
use crate::error::{AppError, AppResult};
use crate::services::normalizer::{self, DisplayStatus, MachineView};

/// Latest report and a forecast for one device. Either may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineAnalysis {
    pub report: Option<daily_reports::Model>,
    pub forecast: Option<forecasts::Model>,
}

/// Device counts grouped by display status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub total: usize,
    pub running: usize,
    pub warning: usize,
    pub danger: usize,
}

impl FleetSummary {
    #[must_use]
    pub fn tally(machines: &[MachineView]) -> Self {
        machines.iter().fold(Self::default(), |mut acc, m| {
            acc.total += 1;
            match m.display_status {
                DisplayStatus::Running => acc.running += 1,
                DisplayStatus::Warning => acc.warning += 1,
                DisplayStatus::Danger => acc.danger += 1,
            }
            acc
        })
    }
}

fn reports_newest_first() -> Select<daily_reports::Entity> {
    // created_at breaks ties between reports sharing a date
    daily_reports::Entity::find()
        .order_by_desc(daily_reports::Column::ReportDate)
        .order_by_desc(daily_reports::Column::CreatedAt)
}

/// Most recent daily report for a device, if any.
pub async fn latest_report(
    db: &DatabaseConnection,
    device_id: Uuid,
) -> AppResult<Option<daily_reports::Model>> {
    Ok(reports_newest_first()
        .filter(daily_reports::Column::DeviceId.eq(device_id))
        .one(db)
        .await?)
}

/// Most recent daily report for a device.
///
/// # Errors
///
/// Returns `AppError::NotFound` when the device has no reports.
pub async fn latest_report_for_device(
    db: &DatabaseConnection,
    device_id: Uuid,
) -> AppResult<daily_reports::Model> {
    latest_report(db, device_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No report found for device '{device_id}'")))
}

/// Reports newest first, optionally restricted to one device.
pub async fn list_reports(
    db: &DatabaseConnection,
    device_id: Option<Uuid>,
) -> AppResult<Vec<daily_reports::Model>> {
    let mut query = reports_newest_first();

    if let Some(device_id) = device_id {
        query = query.filter(daily_reports::Column::DeviceId.eq(device_id));
    }

    Ok(query.all(db).await?)
}

pub async fn forecast_for(
    db: &DatabaseConnection,
    device_id: Uuid,
    order: ForecastOrder,
) -> AppResult<Option<forecasts::Model>> {
    let query = forecasts::Entity::find().filter(forecasts::Column::DeviceId.eq(device_id));

    let query = match order {
        ForecastOrder::Any => query,
        ForecastOrder::Latest => query.order_by_desc(forecasts::Column::CreatedAt),
        ForecastOrder::Earliest => query.order_by_asc(forecasts::Column::CreatedAt),
    };

    Ok(query.one(db).await?)
}

pub async fn machine_analysis(
    db: &DatabaseConnection,
    device_id: Uuid,
    order: ForecastOrder,
) -> AppResult<MachineAnalysis> {
    let (report, forecast) =
        tokio::try_join!(latest_report(db, device_id), forecast_for(db, device_id, order))?;

    Ok(MachineAnalysis { report, forecast })
}

/// Devices owned by `user_id` in registration order.
pub async fn owned_devices(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Vec<devices::Model>> {
    Ok(devices::Entity::find()
        .filter(devices::Column::UserId.eq(user_id))
        .order_by_asc(devices::Column::CreatedAt)
        .order_by_asc(devices::Column::Id)
        .all(db)
        .await?)
}

/// Normalized view of every device owned by `user_id`.
///
/// Latest reports are fetched concurrently, one lookup per device; output
/// order follows [`owned_devices`].
pub async fn fleet(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Vec<MachineView>> {
    let devices = owned_devices(db, user_id).await?;

    let reports = try_join_all(devices.iter().map(|d| latest_report(db, d.id))).await?;

    tracing::debug!(%user_id, devices = devices.len(), "Fleet aggregated");

    Ok(devices
        .iter()
        .zip(reports.iter())
        .map(|(device, report)| normalizer::normalize(device, report.as_ref()))
        .collect())
}

pub async fn fleet_summary(db: &DatabaseConnection, user_id: Uuid) -> AppResult<FleetSummary> {
    let machines = fleet(db, user_id).await?;
    Ok(FleetSummary::tally(&machines))
}

/// Maintenance history, newest first. Unbounded.
pub async fn maintenance_history(
    db: &DatabaseConnection,
    device_id: Uuid,
) -> AppResult<Vec<maintenance_logs::Model>> {
    Ok(maintenance_logs::Entity::find()
        .filter(maintenance_logs::Column::DeviceId.eq(device_id))
        .order_by_desc(maintenance_logs::Column::PerformedAt)
        .all(db)
        .await?)
}

/// Machine event log, newest first. Unbounded.
pub async fn event_history(
    db: &DatabaseConnection,
    device_id: Uuid,
) -> AppResult<Vec<machine_event_logs::Model>> {
    Ok(machine_event_logs::Entity::find()
        .filter(machine_event_logs::Column::DeviceId.eq(device_id))
        .order_by_desc(machine_event_logs::Column::OccurredAt)
        .all(db)
        .await?)
}

pub async fn list_notifications(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Vec<notifications::Model>> {
    Ok(notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await?)
}
