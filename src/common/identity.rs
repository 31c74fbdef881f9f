use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

use super::AppState;

/// Identity of the caller on whose behalf a request runs.
///
/// Resolves to the configured placeholder user until token verification is
/// wired in. Handlers pass `user_id` explicitly into every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            user_id: state.config.default_user_id,
        })
    }
}
