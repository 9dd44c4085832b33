//! Caller identity extraction.
//!
//! Authentication itself happens upstream (the gateway verifies the
//! session and forwards the subject in a header). Handlers only need
//! the user id to scope queries, so identity is modeled as a simple
//! extractor rather than middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Header carrying the verified subject id set by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, extracted from [`USER_ID_HEADER`].
///
/// Rejects with 401 when the header is missing or not valid UTF-8.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing user identity".to_string()))?;

        let user_id = value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Malformed user identity".to_string()))?
            .trim();

        if user_id.is_empty() {
            return Err(AppError::Unauthorized("Missing user identity".to_string()));
        }

        Ok(CurrentUser(user_id.to_string()))
    }
}
