use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use residency_core::models::{appointment::Appointment, time_slot::TimeSlot, unit::ServiceUnit};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{saturday, user_header, wednesday, TestContext, USER};

fn booking(unit: &ServiceUnit, process_id: Uuid, slot: &str) -> Value {
    json!({
        "process_id": process_id,
        "unit_id": unit.id,
        "date": wednesday(),
        "slot": slot,
    })
}

async fn post_booking(ctx: &TestContext, body: &Value) -> axum_test::TestResponse {
    let (name, value) = user_header();
    ctx.server
        .post("/api/appointments")
        .add_header(name, value)
        .json(body)
        .await
}

#[test_log::test(tokio::test)]
async fn test_book_creates_appointment_for_caller() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;
    let process_id = Uuid::new_v4();

    let mut body = booking(&unit, process_id, "09:30");
    body["user_id"] = json!("someone-else");

    let response = post_booking(&ctx, &body).await;
    response.assert_status(StatusCode::CREATED);

    let appointment = response.json::<Appointment>();
    assert_eq!(appointment.user_id, USER);
    assert_eq!(appointment.process_id, process_id);
    assert_eq!(appointment.slot, TimeSlot::new(9, 30).unwrap());
    assert_eq!(ctx.store.appointment_count().await, 1);
}

#[tokio::test]
async fn test_book_without_caller_is_unauthorized() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&booking(&unit, Uuid::new_v4(), "09:30"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "unauthenticated");
    assert_eq!(ctx.store.appointment_count().await, 0);
}

#[tokio::test]
async fn test_second_booking_of_process_conflicts() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 2).await;
    let process_id = Uuid::new_v4();

    post_booking(&ctx, &booking(&unit, process_id, "10:00"))
        .await
        .assert_status(StatusCode::CREATED);
    let response = post_booking(&ctx, &booking(&unit, process_id, "11:00")).await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "process_already_booked");
}

#[tokio::test]
async fn test_full_slot_conflicts() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;

    post_booking(&ctx, &booking(&unit, Uuid::new_v4(), "14:00"))
        .await
        .assert_status(StatusCode::CREATED);
    let response = post_booking(&ctx, &booking(&unit, Uuid::new_v4(), "14:00")).await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "slot_unavailable");
    assert_eq!(ctx.store.appointment_count().await, 1);
}

#[tokio::test]
async fn test_rejected_requests() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;

    let mut weekend = booking(&unit, Uuid::new_v4(), "09:00");
    weekend["date"] = json!(saturday());
    let response = post_booking(&ctx, &weekend).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "invalid_date");

    let response = post_booking(&ctx, &booking(&unit, Uuid::new_v4(), "09:15")).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");

    let mut unknown_unit = booking(&unit, Uuid::new_v4(), "09:00");
    unknown_unit["unit_id"] = json!(Uuid::new_v4());
    let response = post_booking(&ctx, &unknown_unit).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "not_found");

    assert_eq!(ctx.store.appointment_count().await, 0);
}

#[tokio::test]
async fn test_cancel_frees_slot_once() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja A", "Lisboa", 1).await;

    let appointment = post_booking(&ctx, &booking(&unit, Uuid::new_v4(), "16:30"))
        .await
        .json::<Appointment>();
    let path = format!("/api/appointments/{}", appointment.id);
    let (name, value) = user_header();

    ctx.server
        .delete(&path)
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(ctx.store.appointment_count().await, 0);

    let again = ctx
        .server
        .delete(&path)
        .add_header(name, value)
        .expect_failure()
        .await;
    again.assert_status(StatusCode::NOT_FOUND);

    post_booking(&ctx, &booking(&unit, Uuid::new_v4(), "16:30"))
        .await
        .assert_status(StatusCode::CREATED);
}
