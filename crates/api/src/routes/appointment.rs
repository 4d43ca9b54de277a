use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/appointments", post(handlers::appointment::book_appointment))
        .route(
            "/api/appointments/:id",
            delete(handlers::appointment::cancel_appointment),
        )
}
