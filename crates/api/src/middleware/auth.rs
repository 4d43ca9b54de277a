//! # Caller Identity
//!
//! The gateway in front of this service authenticates the user and forwards
//! the identifier in the `x-user-id` header. [`AuthUser`] extracts it and
//! rejects requests without one.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use residency_core::ports::AuthProvider;

use crate::middleware::error_handling::AppError;

/// Header carrying the authenticated user identifier
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| AuthUser(value.to_string()))
            .ok_or(AppError::Unauthenticated)
    }
}

impl AuthProvider for AuthUser {
    fn current_user_id(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
