use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-user notification toggles. Exactly one row per `user_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub push_token: Option<String>,
    pub push_enabled: bool,
    /// KakaoTalk alert channel
    pub kakao_enabled: bool,
    pub anomaly_alerts: bool,
    pub report_alerts: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
