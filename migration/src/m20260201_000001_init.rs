use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== DEVICES ==========
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Devices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Devices::UserId).uuid().not_null())
                    .col(ColumnDef::new(Devices::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Devices::Status).string_len(32))
                    .col(ColumnDef::new(Devices::LocationInfo).json_binary())
                    .col(ColumnDef::new(Devices::Config).json_binary())
                    .col(ColumnDef::new(Devices::ModelType).string_len(64))
                    .col(
                        ColumnDef::new(Devices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_devices_user")
                    .table(Devices::Table)
                    .col(Devices::UserId)
                    .to_owned(),
            )
            .await?;

        // ========== DAILY REPORTS ==========
        manager
            .create_table(
                Table::create()
                    .table(DailyReports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DailyReports::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(DailyReports::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(DailyReports::ReportDate).date().not_null())
                    .col(ColumnDef::new(DailyReports::HealthScore).integer().not_null())
                    .col(ColumnDef::new(DailyReports::Summary).text())
                    .col(
                        ColumnDef::new(DailyReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_reports_device")
                            .from(DailyReports::Table, DailyReports::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // "latest report for device" lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_reports_device_date")
                    .table(DailyReports::Table)
                    .col(DailyReports::DeviceId)
                    .col(DailyReports::ReportDate)
                    .to_owned(),
            )
            .await?;

        // ========== FORECASTS ==========
        manager
            .create_table(
                Table::create()
                    .table(Forecasts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Forecasts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Forecasts::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(Forecasts::ForecastData).json_binary().not_null())
                    .col(
                        ColumnDef::new(Forecasts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forecasts_device")
                            .from(Forecasts::Table, Forecasts::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== MAINTENANCE LOGS ==========
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MaintenanceLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MaintenanceLogs::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(MaintenanceLogs::ActionType).string_len(32).not_null())
                    .col(ColumnDef::new(MaintenanceLogs::Description).text())
                    .col(
                        ColumnDef::new(MaintenanceLogs::PerformedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_logs_device")
                            .from(MaintenanceLogs::Table, MaintenanceLogs::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_logs_device_time")
                    .table(MaintenanceLogs::Table)
                    .col(MaintenanceLogs::DeviceId)
                    .col(MaintenanceLogs::PerformedAt)
                    .to_owned(),
            )
            .await?;

        // ========== MACHINE EVENT LOGS ==========
        manager
            .create_table(
                Table::create()
                    .table(MachineEventLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MachineEventLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MachineEventLogs::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(MachineEventLogs::EventType).string_len(32).not_null())
                    .col(ColumnDef::new(MachineEventLogs::Message).text().not_null())
                    .col(ColumnDef::new(MachineEventLogs::Severity).string_len(16))
                    .col(
                        ColumnDef::new(MachineEventLogs::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_machine_event_logs_device")
                            .from(MachineEventLogs::Table, MachineEventLogs::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_machine_event_logs_device_time")
                    .table(MachineEventLogs::Table)
                    .col(MachineEventLogs::DeviceId)
                    .col(MachineEventLogs::OccurredAt)
                    .to_owned(),
            )
            .await?;

        // ========== NOTIFICATIONS ==========
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notifications::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::Type).string_len(32).not_null())
                    .col(ColumnDef::new(Notifications::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_time")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ========== NOTIFICATION SETTINGS ==========
        // user_id is the conflict key for get-or-create and upserts
        manager
            .create_table(
                Table::create()
                    .table(NotificationSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationSettings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationSettings::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NotificationSettings::PushToken).text())
                    .col(
                        ColumnDef::new(NotificationSettings::PushEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NotificationSettings::KakaoEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(NotificationSettings::AnomalyAlerts)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NotificationSettings::ReportAlerts)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NotificationSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NotificationSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== SERVICE TICKETS ==========
        manager
            .create_table(
                Table::create()
                    .table(ServiceTickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ServiceTickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ServiceTickets::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(ServiceTickets::UserId).uuid().not_null())
                    .col(ColumnDef::new(ServiceTickets::Description).text().not_null())
                    .col(
                        ColumnDef::new(ServiceTickets::Urgency)
                            .string_len(16)
                            .not_null()
                            .default("normal"),
                    )
                    .col(ColumnDef::new(ServiceTickets::ScheduledDate).date())
                    .col(
                        ColumnDef::new(ServiceTickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_tickets_device")
                            .from(ServiceTickets::Table, ServiceTickets::DeviceId)
                            .to(Devices::Table, Devices::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceTickets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(NotificationSettings::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MachineEventLogs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MaintenanceLogs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Forecasts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyReports::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Devices::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Devices {
    Table,
    Id,
    UserId,
    Name,
    Status,
    LocationInfo,
    Config,
    ModelType,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum DailyReports {
    Table,
    Id,
    DeviceId,
    ReportDate,
    HealthScore,
    Summary,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Forecasts {
    Table,
    Id,
    DeviceId,
    ForecastData,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MaintenanceLogs {
    Table,
    Id,
    DeviceId,
    ActionType,
    Description,
    PerformedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MachineEventLogs {
    Table,
    Id,
    DeviceId,
    EventType,
    Message,
    Severity,
    OccurredAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Type,
    Title,
    Message,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum NotificationSettings {
    Table,
    Id,
    UserId,
    PushToken,
    PushEnabled,
    KakaoEnabled,
    AnomalyAlerts,
    ReportAlerts,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ServiceTickets {
    Table,
    Id,
    DeviceId,
    UserId,
    Description,
    Urgency,
    ScheduledDate,
    CreatedAt,
}
