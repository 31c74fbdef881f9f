mod handlers;
mod types;

pub use handlers::{get_settings, list_notifications, mark_all_as_read, mark_as_read, update_settings};
pub use types::{
    NotificationResponse, NotificationSettingsResponse, NotificationsListResponse, StatusResponse,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_get_settings, __path_list_notifications, __path_mark_all_as_read, __path_mark_as_read,
    __path_update_settings,
};
