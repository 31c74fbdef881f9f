//! End-to-end tests through the axum router.
//!
//! Run with: cargo test --test api_test

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::ConnectionTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{insert_device, insert_notification, insert_report, placeholder_user, test_state, DeviceSeed};
use signalcraft_api::common::AppState;
use signalcraft_api::routes::build_router;

async fn app() -> (Router, AppState) {
    let state = test_state().await;
    (build_router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|json| json.to_string())).await
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn root_and_health() {
    let (app, _) = app().await;

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");

    let (status, _) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn machines_and_summary_for_empty_fleet() {
    let (app, _) = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/machines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "machines": [] }));

    let (status, body) = send(&app, Method::GET, "/api/v1/dashboard/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "total": 0, "running": 0, "warning": 0, "danger": 0 })
    );
}

#[tokio::test]
async fn machines_render_normalized_view() {
    let (app, state) = app().await;
    let device = insert_device(
        &state.db,
        placeholder_user(),
        DeviceSeed {
            name: "Compressor",
            status: Some("WARNING"),
            ..Default::default()
        },
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/v1/machines", None).await;
    assert_eq!(status, StatusCode::OK);

    let machine = &body["machines"][0];
    assert_eq!(machine["id"], device.id.to_string());
    assert_eq!(machine["status"], "warning");
    assert_eq!(machine["health"], 70);
    assert_eq!(machine["imageUrl"], "https://placehold.co/200x200?text=Compressor");
}

#[tokio::test]
async fn latest_report_endpoint_returns_404_then_report() {
    let (app, state) = app().await;
    let device = insert_device(&state.db, placeholder_user(), DeviceSeed::default()).await;
    let uri = format!("/api/v1/reports/latest/{}", device.id);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&device.id.to_string()));

    insert_report(&state.db, device.id, 4, 88).await;

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["health_score"], 88);
    assert_eq!(body["report_date"], "2026-01-04");
}

#[tokio::test]
async fn analysis_returns_nulls_when_nothing_computed() {
    let (app, state) = app().await;
    let device = insert_device(&state.db, placeholder_user(), DeviceSeed::default()).await;

    let uri = format!("/api/v1/dashboard/machine-detail/analysis?machine_id={}", device.id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"], Value::Null);
    assert_eq!(body["forecast"], Value::Null);
}

#[tokio::test]
async fn settings_get_or_create_and_update() {
    let (app, _) = app().await;

    let (status, first) = send(&app, Method::GET, "/api/v1/notifications/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["push_enabled"], true);
    assert_eq!(first["kakao_enabled"], false);

    let (status, updated) = send(
        &app,
        Method::POST,
        "/api/v1/notifications/settings",
        Some(json!({ "push_enabled": false, "favourite_colour": "teal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["push_enabled"], false);
    assert!(updated.get("favourite_colour").is_none());

    let (status, patched) = send(
        &app,
        Method::PATCH,
        "/api/v1/notifications/settings",
        Some(json!({ "kakao_enabled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["kakao_enabled"], true);
    assert_eq!(patched["push_enabled"], false);

    let (_, reread) = send(&app, Method::GET, "/api/v1/notifications/settings", None).await;
    assert_eq!(reread["push_enabled"], false);
    assert_eq!(reread["kakao_enabled"], true);
}

#[tokio::test]
async fn service_ticket_validation_and_creation() {
    let (app, state) = app().await;
    let device = insert_device(&state.db, placeholder_user(), DeviceSeed::default()).await;
    let uri = "/api/v1/dashboard/machine-detail/service-ticket";

    let (status, body) = send(&app, Method::POST, uri, Some(json!({ "device_id": device.id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "description is required");

    let (status, body) = send(
        &app,
        Method::POST,
        uri,
        Some(json!({ "device_id": device.id, "description": "Compressor noise" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["urgency"], "normal");
    assert_eq!(body["device_id"], device.id.to_string());
}

#[tokio::test]
async fn maintenance_round_trip_through_history() {
    let (app, state) = app().await;
    let device = insert_device(&state.db, placeholder_user(), DeviceSeed::default()).await;

    for (action, when) in [("CHECK", "2026-01-10T08:00"), ("CLEANING", "2026-01-12T08:00")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/dashboard/machine-detail/maintenance",
            Some(json!({ "device_id": device.id, "action_type": action, "performed_at": when })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/api/v1/dashboard/machine-detail/maintenance?machine_id={}", device.id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let actions: Vec<&str> = body["maintenance"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["action_type"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["CLEANING", "CHECK"]);
}

#[tokio::test]
async fn notifications_list_and_mark_read() {
    let (app, state) = app().await;
    let n = insert_notification(&state.db, placeholder_user(), "Vibration anomaly", 1).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    let first = &body["notifications"][0];
    assert_eq!(first["id"], n.id.to_string());
    assert_eq!(first["type"], "anomaly");
    assert_eq!(first["isRead"], false);
    assert!(first.get("createdAt").is_some());

    let uri = format!("/api/v1/notifications/{}/read", n.id);
    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (_, body) = send(&app, Method::GET, "/api/v1/notifications", None).await;
    assert_eq!(body["notifications"][0]["isRead"], true);

    let (status, body) = send(&app, Method::POST, "/api/v1/notifications/mark-all-read", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn store_failures_surface_as_internal_errors() {
    let (app, state) = app().await;
    let device = insert_device(&state.db, placeholder_user(), DeviceSeed::default()).await;

    state
        .db
        .execute_unprepared("DROP TABLE daily_reports")
        .await
        .unwrap();

    let uris = [
        "/api/v1/machines".to_string(),
        "/api/v1/dashboard/summary".to_string(),
        format!("/api/v1/reports/latest/{}", device.id),
    ];
    for uri in &uris {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Database error:"), "{uri}: {message}");
        assert!(message.contains("daily_reports"), "{uri}: {message}");
    }
}

#[tokio::test]
async fn service_ticket_for_unknown_device_is_a_store_failure() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/dashboard/machine-detail/service-ticket",
        Some(json!({ "device_id": uuid::Uuid::new_v4(), "description": "Leaking" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Database error:"));
}

#[tokio::test]
async fn malformed_requests_use_the_error_body() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/machine-detail/analysis?machine_id=not-a-uuid",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::POST, "/api/v1/notifications/42/read", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(
        &app,
        Method::PATCH,
        "/api/v1/notifications/settings",
        Some("{\"push_enabled\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
