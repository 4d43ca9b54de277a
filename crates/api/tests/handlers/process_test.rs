use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use residency_core::models::{
    appointment::{Appointment, CancelAllResponse},
    process::{ProcessStatus, SchedulableResponse},
};
use chrono::Utc;
use residency_core::models::process::Process;
use residency_db::{mock::repositories::MockProcessRepo, MemoryStore};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::test_utils::{server_with, user_header, wednesday, TestContext, USER};

async fn book(ctx: &TestContext, unit_id: Uuid, process_id: Uuid) -> Appointment {
    let (name, value) = user_header();
    ctx.server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&json!({
            "process_id": process_id,
            "unit_id": unit_id,
            "date": wednesday(),
            "slot": "11:30",
        }))
        .await
        .json::<Appointment>()
}

#[rstest]
#[case(ProcessStatus::Approved, true)]
#[case(ProcessStatus::InAnalysis, false)]
#[case(ProcessStatus::Refused, false)]
#[tokio::test]
async fn test_schedulable_follows_status(#[case] status: ProcessStatus, #[case] expected: bool) {
    let ctx = TestContext::new();
    let process = ctx.add_process(status).await;

    let response = ctx
        .server
        .get(&format!("/api/processes/{}/schedulable", process.id))
        .await;
    response.assert_status_ok();

    let body = response.json::<SchedulableResponse>();
    assert_eq!(body.status, status);
    assert_eq!(body.schedulable, expected);
}

#[tokio::test]
async fn test_booked_process_is_not_schedulable() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;
    let process = ctx.add_process(ProcessStatus::Approved).await;

    book(&ctx, unit.id, process.id).await;

    let body = ctx
        .server
        .get(&format!("/api/processes/{}/schedulable", process.id))
        .await
        .json::<SchedulableResponse>();
    assert!(!body.schedulable);
}

#[tokio::test]
async fn test_schedulable_reads_process_once() {
    let process = Process {
        id: Uuid::new_v4(),
        user_id: USER.to_string(),
        service_code: "AR-RENEWAL".to_string(),
        status: ProcessStatus::Approved,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let process_id = process.id;
    let mut processes = MockProcessRepo::new();
    processes
        .expect_process_by_id()
        .times(1)
        .returning(move |_| Ok(Some(process.clone())));

    let store = Arc::new(MemoryStore::new());
    let server = server_with(store.clone(), store, Arc::new(processes));

    let body = server
        .get(&format!("/api/processes/{}/schedulable", process_id))
        .await
        .json::<SchedulableResponse>();

    assert!(body.schedulable);
    assert_eq!(body.status, ProcessStatus::Approved);
}

#[tokio::test]
async fn test_unknown_process_is_not_found() {
    let ctx = TestContext::new();

    ctx.server
        .get(&format!("/api/processes/{}/schedulable", Uuid::new_v4()))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_process_appointment_lookup() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;
    let process_id = Uuid::new_v4();
    let path = format!("/api/processes/{}/appointment", process_id);

    ctx.server
        .get(&path)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let booked = book(&ctx, unit.id, process_id).await;

    let found = ctx.server.get(&path).await.json::<Appointment>();
    assert_eq!(found, booked);
}

#[tokio::test]
async fn test_cancel_all_reports_deleted_count() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;
    let process_id = Uuid::new_v4();
    book(&ctx, unit.id, process_id).await;

    let path = format!("/api/processes/{}/appointments", process_id);
    let (name, value) = user_header();

    let first = ctx
        .server
        .delete(&path)
        .add_header(name.clone(), value.clone())
        .await
        .json::<CancelAllResponse>();
    assert_eq!(first.deleted, 1);
    assert_eq!(first.process_id, process_id);

    let second = ctx
        .server
        .delete(&path)
        .add_header(name, value)
        .await
        .json::<CancelAllResponse>();
    assert_eq!(second.deleted, 0);
}
