//! Unit tests for the status normalizer.
//!
//! Run with: cargo test --test normalizer_unit_test

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use signalcraft_api::entity::{daily_reports, devices};
use signalcraft_api::services::normalizer::{
    self, fallback_health, normalize, DisplayStatus, DEFAULT_DEVICE_TYPE, LOCATION_PLACEHOLDER,
    PREDICTION_PLACEHOLDER,
};

fn device(status: Option<&str>) -> devices::Model {
    devices::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Walk-in Freezer".to_string(),
        status: status.map(str::to_string),
        location_info: None,
        config: None,
        model_type: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().fixed_offset(),
    }
}

fn report(device_id: Uuid, health_score: i32) -> daily_reports::Model {
    daily_reports::Model {
        id: Uuid::new_v4(),
        device_id,
        report_date: NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(),
        health_score,
        summary: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 30, 6, 0, 0).unwrap().fixed_offset(),
    }
}

#[test]
fn raw_status_maps_to_display_status() {
    assert_eq!(DisplayStatus::from_raw(Some("GOOD")), DisplayStatus::Running);
    assert_eq!(DisplayStatus::from_raw(Some("WARNING")), DisplayStatus::Warning);
    assert_eq!(DisplayStatus::from_raw(Some("DANGER")), DisplayStatus::Danger);

    // Unknown and missing statuses fail open
    assert_eq!(DisplayStatus::from_raw(Some("OFFLINE")), DisplayStatus::Running);
    assert_eq!(DisplayStatus::from_raw(Some("warning")), DisplayStatus::Running);
    assert_eq!(DisplayStatus::from_raw(None), DisplayStatus::Running);
}

#[test]
fn health_falls_back_to_status_tier_without_report() {
    let cases = [
        (Some("GOOD"), DisplayStatus::Running, 100),
        (Some("WARNING"), DisplayStatus::Warning, 70),
        (Some("DANGER"), DisplayStatus::Danger, 40),
        (Some("MAINTENANCE"), DisplayStatus::Running, 40),
        (None, DisplayStatus::Running, 40),
    ];

    for (raw, expected_status, expected_health) in cases {
        let view = normalize(&device(raw), None);
        assert_eq!(view.display_status, expected_status, "status for {raw:?}");
        assert_eq!(view.health, expected_health, "health for {raw:?}");
        assert_eq!(fallback_health(raw), expected_health);
    }
}

#[test]
fn report_health_wins_over_raw_status() {
    let good = device(Some("GOOD"));
    assert_eq!(normalize(&good, Some(&report(good.id, 12))).health, 12);

    let danger = device(Some("DANGER"));
    let view = normalize(&danger, Some(&report(danger.id, 97)));
    assert_eq!(view.health, 97);
    assert_eq!(view.display_status, DisplayStatus::Danger);
}

#[test]
fn warning_device_without_location_or_report() {
    let mut d = device(Some("WARNING"));
    d.name = "m1".to_string();

    let view = normalize(&d, None);

    assert_eq!(view.display_status, DisplayStatus::Warning);
    assert_eq!(view.health, 70);
    assert_eq!(view.location, LOCATION_PLACEHOLDER);
    assert_eq!(view.prediction, PREDICTION_PLACEHOLDER);
    assert_eq!(view.device_type, DEFAULT_DEVICE_TYPE);
}

#[test]
fn location_uses_address_only_when_well_formed() {
    let mut d = device(Some("GOOD"));

    d.location_info = Some(json!({ "address": "Building A, rear" }));
    assert_eq!(normalize(&d, None).location, "Building A, rear");

    let malformed = [
        json!("Building A"),
        json!([{"address": "Building A"}]),
        json!({}),
        json!({ "address": 42 }),
        json!({ "address": "   " }),
        json!(null),
    ];
    for value in malformed {
        d.location_info = Some(value.clone());
        assert_eq!(
            normalize(&d, None).location,
            LOCATION_PLACEHOLDER,
            "location_info = {value}"
        );
    }
}

#[test]
fn prediction_read_from_config() {
    let mut d = device(Some("WARNING"));

    d.config = Some(json!({ "prediction": "Bearing wear detected (96%)", "rpm": 1200 }));
    assert_eq!(normalize(&d, None).prediction, "Bearing wear detected (96%)");

    d.config = Some(json!({ "rpm": 1200 }));
    assert_eq!(normalize(&d, None).prediction, PREDICTION_PLACEHOLDER);
}

#[test]
fn type_is_lowercased_with_default() {
    let mut d = device(Some("GOOD"));

    d.model_type = Some("HVAC".to_string());
    assert_eq!(normalize(&d, None).device_type, "hvac");

    d.model_type = Some("  ".to_string());
    assert_eq!(normalize(&d, None).device_type, DEFAULT_DEVICE_TYPE);
}

#[test]
fn image_url_templated_from_name() {
    let d = device(Some("GOOD"));
    let view = normalize(&d, None);

    assert_eq!(view.image_url, "https://placehold.co/200x200?text=Walk-in+Freezer");
    assert_eq!(view.image_url, normalizer::image_url(&d.name));
}

#[test]
fn image_url_escapes_reserved_characters() {
    assert_eq!(
        normalizer::image_url("A & B #1"),
        "https://placehold.co/200x200?text=A+%26+B+%231"
    );
    assert_eq!(
        normalizer::image_url(" Line 2/Bay?3 "),
        "https://placehold.co/200x200?text=Line+2%2FBay%3F3"
    );
}

#[test]
fn view_serializes_in_client_shape() {
    let mut d = device(Some("DANGER"));
    d.model_type = Some("Conveyor".to_string());

    let value = serde_json::to_value(normalize(&d, None)).unwrap();

    assert_eq!(value["status"], "danger");
    assert_eq!(value["health"], 40);
    assert_eq!(value["type"], "conveyor");
    assert_eq!(value["location"], LOCATION_PLACEHOLDER);
    assert!(value["imageUrl"].as_str().unwrap().starts_with("https://placehold.co/"));
    assert!(value.get("display_status").is_none());
}
