use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/processes/:id/appointment",
            get(handlers::process::get_process_appointment),
        )
        .route(
            "/api/processes/:id/schedulable",
            get(handlers::process::get_process_schedulable),
        )
        .route(
            "/api/processes/:id/appointments",
            delete(handlers::process::cancel_process_appointments),
        )
}
