//! Derives the display fields the dashboard renders for a device.
//!
//! Every branch has a default, so [`normalize`] never fails. Richer data wins
//! when present:
//!
//! | Field        | Preferred source              | Fallback                     |
//! |--------------|-------------------------------|------------------------------|
//! | `status`     | raw status table              | `running`                    |
//! | `health`     | latest daily report           | tier from raw status (40 min)|
//! | `location`   | `location_info.address`       | [`LOCATION_PLACEHOLDER`]     |
//! | `prediction` | `config.prediction`           | [`PREDICTION_PLACEHOLDER`]   |
//! | `type`       | `model_type`, lowercased      | [`DEFAULT_DEVICE_TYPE`]      |
//!
//! Unknown raw statuses display as `running` but score the lowest health tier.

use sea_orm::prelude::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{daily_reports, devices};

pub const LOCATION_PLACEHOLDER: &str = "Location not registered";
pub const PREDICTION_PLACEHOLDER: &str = "AI analysis in progress";
pub const DEFAULT_DEVICE_TYPE: &str = "freezer";

const IMAGE_URL_BASE: &str = "https://placehold.co/200x200?text=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Running,
    Warning,
    Danger,
}

impl DisplayStatus {
    /// Map a raw status code. Anything unrecognised, including a missing
    /// status, displays as `Running`.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("WARNING") => Self::Warning,
            Some("DANGER") => Self::Danger,
            _ => Self::Running,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Health used when no daily report exists. Unknown statuses get the
/// lowest tier, unlike [`DisplayStatus::from_raw`].
#[must_use]
pub fn fallback_health(raw: Option<&str>) -> i32 {
    match raw {
        Some("GOOD") => 100,
        Some("WARNING") => 70,
        _ => 40,
    }
}

/// Normalized device view as rendered by the dashboard client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineView {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    #[serde(rename = "status")]
    pub display_status: DisplayStatus,
    /// 0-100
    pub health: i32,
    pub prediction: String,
    pub image_url: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

#[must_use]
pub fn normalize(
    device: &devices::Model,
    latest_report: Option<&daily_reports::Model>,
) -> MachineView {
    let raw_status = device.status.as_deref();

    let health = latest_report.map_or_else(|| fallback_health(raw_status), |r| r.health_score);

    let location = string_field(device.location_info.as_ref(), "address")
        .unwrap_or(LOCATION_PLACEHOLDER)
        .to_string();

    let prediction = string_field(device.config.as_ref(), "prediction")
        .unwrap_or(PREDICTION_PLACEHOLDER)
        .to_string();

    let device_type = device
        .model_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| DEFAULT_DEVICE_TYPE.to_string(), str::to_lowercase);

    MachineView {
        id: device.id,
        name: device.name.clone(),
        location,
        display_status: DisplayStatus::from_raw(raw_status),
        health,
        prediction,
        image_url: image_url(&device.name),
        device_type,
    }
}

/// Placeholder image for `name`. The name is percent-encoded as a query value,
/// with spaces written as `+`.
#[must_use]
pub fn image_url(name: &str) -> String {
    let text = urlencoding::encode(name.trim()).replace("%20", "+");
    format!("{IMAGE_URL_BASE}{text}")
}

/// Non-empty string at `key` of a JSON object. Non-objects, missing keys,
/// non-string values and blank strings all yield `None`.
fn string_field<'a>(value: Option<&'a Json>, key: &str) -> Option<&'a str> {
    value
        .and_then(Json::as_object)
        .and_then(|obj| obj.get(key))
        .and_then(Json::as_str)
        .filter(|s| !s.trim().is_empty())
}
