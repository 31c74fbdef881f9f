pub mod dashboard;
pub mod health;
pub mod notifications;
mod rate_limit;
pub mod reports;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use rate_limit::ClientIpKeyExtractor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::services::normalizer::{DisplayStatus, MachineView};
use crate::services::writer::{NewMaintenanceRecord, NewServiceTicket, SettingsUpdate};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::healthz,
        dashboard::list_machines,
        dashboard::get_summary,
        dashboard::get_analysis,
        dashboard::get_maintenance,
        dashboard::create_maintenance,
        dashboard::get_smart_log,
        dashboard::create_service_ticket,
        reports::list_reports,
        reports::get_latest_report,
        notifications::list_notifications,
        notifications::mark_as_read,
        notifications::mark_all_as_read,
        notifications::get_settings,
        notifications::update_settings,
    ),
    components(
        schemas(
            health::RootResponse,
            DisplayStatus,
            MachineView,
            dashboard::MachinesResponse,
            dashboard::FleetSummaryResponse,
            dashboard::AnalysisResponse,
            dashboard::ForecastResponse,
            dashboard::MaintenanceHistoryResponse,
            dashboard::MaintenanceLogResponse,
            dashboard::SmartLogResponse,
            dashboard::EventLogResponse,
            dashboard::ServiceTicketResponse,
            reports::ReportResponse,
            reports::ReportsListResponse,
            notifications::NotificationResponse,
            notifications::NotificationsListResponse,
            notifications::NotificationSettingsResponse,
            notifications::StatusResponse,
            NewMaintenanceRecord,
            NewServiceTicket,
            SettingsUpdate,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Fleet status and summaries"),
        (name = "machine-detail", description = "Per-machine analysis, maintenance and service requests"),
        (name = "reports", description = "Daily health reports"),
        (name = "notifications", description = "Notifications and notification settings"),
    ),
    info(
        title = "SignalCraft API",
        description = "Zero-config AI facility management API",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
    } else {
        tracing::info!(
            rate = %format!("{}/s burst {}", config.rate_limit_per_second, config.rate_limit_burst),
            "Rate limiting configured"
        );
    }

    let machine_detail_routes = Router::new()
        .route("/analysis", get(dashboard::get_analysis))
        .route(
            "/maintenance",
            get(dashboard::get_maintenance).post(dashboard::create_maintenance),
        )
        .route("/smart-log", get(dashboard::get_smart_log))
        .route("/service-ticket", post(dashboard::create_service_ticket));

    let api_routes_base = Router::new()
        .route("/machines", get(dashboard::list_machines))
        .route("/dashboard/summary", get(dashboard::get_summary))
        .nest("/dashboard/machine-detail", machine_detail_routes)
        .route("/reports", get(reports::list_reports))
        .route("/reports/latest/{device_id}", get(reports::get_latest_report))
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/mark-all-read",
            post(notifications::mark_all_as_read),
        )
        .route(
            "/notifications/{notification_id}/read",
            post(notifications::mark_as_read),
        )
        .route(
            "/notifications/settings",
            get(notifications::get_settings)
                .post(notifications::update_settings)
                .patch(notifications::update_settings),
        );

    let api_routes = if config.disable_rate_limiting {
        api_routes_base
    } else {
        let limiter = GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .expect("Failed to create API rate limiter");

        api_routes_base.layer(GovernorLayer {
            config: Arc::new(limiter),
        })
    }
    .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Banner and health check (NO rate limiting)
    let health_routes = Router::new()
        .route("/", get(health::root))
        .route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
