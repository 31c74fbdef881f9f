mod handlers;
mod types;

pub use handlers::{get_latest_report, list_reports};
pub use types::{ReportResponse, ReportsListResponse, ReportsQuery};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_get_latest_report, __path_list_reports};
