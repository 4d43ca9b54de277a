//! # Error Handling Middleware
//!
//! Maps engine errors to HTTP status codes and a JSON body of the form
//! `{"error": "<message>", "kind": "<machine name>"}`, so every endpoint
//! reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use residency_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use residency_api::middleware::error_handling::AppError;
/// use residency_core::errors::BookingError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(BookingError::NotFound("appointment".to_string()).into());
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub enum AppError {
    /// Failure reported by the engine
    Booking(BookingError),
    /// The request carried no caller identity
    Unauthenticated,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Booking(err) => match err {
                BookingError::InvalidDate(_) => StatusCode::BAD_REQUEST,
                BookingError::Validation(_) => StatusCode::BAD_REQUEST,
                BookingError::NotFound(_) => StatusCode::NOT_FOUND,
                BookingError::ProcessAlreadyBooked(_) => StatusCode::CONFLICT,
                BookingError::SlotUnavailable { .. } => StatusCode::CONFLICT,
                BookingError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
                BookingError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::Booking(err) => err.kind(),
        }
    }
}

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Unauthenticated => "Missing caller identity".to_string(),
            // Backend detail stays in the logs
            AppError::Booking(BookingError::PersistenceFailure(report)) => {
                error!("Persistence failure: {:?}", report);
                "Internal server error".to_string()
            }
            AppError::Booking(err) => err.to_string(),
        };
        let body = Json(json!({ "error": message, "kind": self.kind() }));

        (status, body).into_response()
    }
}

/// Automatic conversion from BookingError to AppError
///
/// Lets handlers use `?` on engine calls.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::Booking(err)
    }
}
