mod extract;
mod identity;
mod state;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use identity::CallerIdentity;
pub use state::AppState;
