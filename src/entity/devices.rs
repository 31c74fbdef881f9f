use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub name: String,
    /// Raw status code: GOOD, WARNING, DANGER (other values tolerated)
    pub status: Option<String>,
    /// Expected shape: `{"address": "..."}`
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub location_info: Option<Json>,
    /// Free-form device config; may carry a `prediction` string
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub config: Option<Json>,
    pub model_type: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::daily_reports::Entity")]
    DailyReports,
    #[sea_orm(has_many = "super::forecasts::Entity")]
    Forecasts,
    #[sea_orm(has_many = "super::maintenance_logs::Entity")]
    MaintenanceLogs,
    #[sea_orm(has_many = "super::machine_event_logs::Entity")]
    MachineEventLogs,
    #[sea_orm(has_many = "super::service_tickets::Entity")]
    ServiceTickets,
}

impl Related<super::daily_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReports.def()
    }
}

impl Related<super::forecasts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forecasts.def()
    }
}

impl Related<super::maintenance_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceLogs.def()
    }
}

impl Related<super::machine_event_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineEventLogs.def()
    }
}

impl Related<super::service_tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceTickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
