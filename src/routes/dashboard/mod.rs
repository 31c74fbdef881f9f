mod handlers;
mod types;

pub use handlers::{
    create_maintenance, create_service_ticket, get_analysis, get_maintenance, get_smart_log,
    get_summary, list_machines,
};
pub use types::{
    AnalysisResponse, EventLogResponse, FleetSummaryResponse, ForecastResponse, MachineQuery,
    MachinesResponse, MaintenanceHistoryResponse, MaintenanceLogResponse, ServiceTicketResponse,
    SmartLogResponse,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_maintenance, __path_create_service_ticket, __path_get_analysis,
    __path_get_maintenance, __path_get_smart_log, __path_get_summary, __path_list_machines,
};
