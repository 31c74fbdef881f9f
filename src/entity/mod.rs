pub mod daily_reports;
pub mod devices;
pub mod forecasts;
pub mod machine_event_logs;
pub mod maintenance_logs;
pub mod notification_settings;
pub mod notifications;
pub mod service_tickets;
