use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use residency_core::{errors::StoreError, models::time_slot::TimeSlot};
use residency_db::{
    mock::repositories::{MockAppointmentRepo, MockProcessRepo, MockUnitRepo},
    MemoryStore,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{server_with, user_header, wednesday};

fn booking_body() -> Value {
    json!({
        "process_id": Uuid::new_v4(),
        "unit_id": Uuid::new_v4(),
        "date": wednesday(),
        "slot": TimeSlot::new(9, 0).unwrap(),
    })
}

#[tokio::test]
async fn test_store_timeout_maps_to_service_unavailable() {
    let mut appointments = MockAppointmentRepo::new();
    appointments
        .expect_exists_for_process()
        .returning(|_| Err(StoreError::Unavailable("pool timed out".to_string())));
    appointments.expect_create_if_available().never();

    let server = server_with(
        Arc::new(MockUnitRepo::new()),
        Arc::new(appointments),
        Arc::new(MockProcessRepo::new()),
    );
    let (name, value) = user_header();

    let response = server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking_body())
        .expect_failure()
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["kind"], "transient");
}

#[tokio::test]
async fn test_backend_failure_hides_detail() {
    let mut appointments = MockAppointmentRepo::new();
    appointments
        .expect_find_by_process()
        .returning(|_| Err(StoreError::Backend(eyre::eyre!("relation \"appointments\" does not exist"))));

    let store = Arc::new(MemoryStore::new());
    let server = server_with(store.clone(), Arc::new(appointments), store);

    let response = server
        .get(&format!("/api/processes/{}/appointment", Uuid::new_v4()))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "persistence_failure");
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_directory_outage_degrades_to_unavailable_city() {
    let mut units = MockUnitRepo::new();
    units
        .expect_units_in_city()
        .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));

    let store = Arc::new(MemoryStore::new());
    let server = server_with(Arc::new(units), store.clone(), store);

    let response = server
        .get("/api/availability/check")
        .add_query_param("city", "Lisboa")
        .add_query_param("date", wednesday())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["available"], false);
}
