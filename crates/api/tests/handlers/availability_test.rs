use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use residency_api::handlers::availability::SlotsResponse;
use residency_core::models::{
    availability::{AvailabilityMap, CityAvailabilityResponse},
    time_slot::TimeSlot,
};

use crate::test_utils::{saturday, wednesday, TestContext};

#[tokio::test]
async fn test_slots_lists_default_grid() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/slots").await;
    response.assert_status_ok();

    let slots = response.json::<SlotsResponse>().slots;
    assert_eq!(slots.len(), 17);
    assert_eq!(slots.first(), TimeSlot::new(9, 0).as_ref());
    assert_eq!(slots.last(), TimeSlot::new(17, 0).as_ref());
}

#[test_log::test(tokio::test)]
async fn test_availability_lists_units_by_name_with_free_slots() {
    let ctx = TestContext::new();
    let b = ctx.add_unit("Loja B", "Lisboa", 1).await;
    let a = ctx.add_unit("Loja A", "Lisboa", 2).await;
    ctx.add_unit("Loja Porto", "Porto", 2).await;

    let response = ctx
        .server
        .get("/api/availability")
        .add_query_param("city", "LISBOA")
        .add_query_param("date", wednesday())
        .await;
    response.assert_status_ok();

    let map = response.json::<AvailabilityMap>();
    let ids: Vec<_> = map.units.iter().map(|u| u.unit.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    assert_eq!(map.date, Some(wednesday()));
    assert!(map.units.iter().all(|u| u.slots.len() == 17));
}

#[tokio::test]
async fn test_city_lookup_ignores_accents() {
    let ctx = TestContext::new();
    let unit = ctx.add_unit("Loja Évora", "Évora", 1).await;

    let map = ctx
        .server
        .get("/api/availability")
        .add_query_param("city", " evora ")
        .add_query_param("date", wednesday())
        .await
        .json::<AvailabilityMap>();

    assert_eq!(map.len(), 1);
    assert_eq!(map.units[0].unit.id, unit.id);
}

#[tokio::test]
async fn test_only_available_drops_units_without_slots() {
    let ctx = TestContext::new();
    ctx.add_unit("Sem pessoal", "Lisboa", 0).await;
    let staffed = ctx.add_unit("Com pessoal", "Lisboa", 1).await;

    let all = ctx
        .server
        .get("/api/availability")
        .add_query_param("city", "Lisboa")
        .add_query_param("date", wednesday())
        .await
        .json::<AvailabilityMap>();
    assert_eq!(all.len(), 2);

    let filtered = ctx
        .server
        .get("/api/availability")
        .add_query_param("city", "Lisboa")
        .add_query_param("date", wednesday())
        .add_query_param("only_available", true)
        .await
        .json::<AvailabilityMap>();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.units[0].unit.id, staffed.id);
}

#[tokio::test]
async fn test_weekend_availability_is_empty() {
    let ctx = TestContext::new();
    ctx.add_unit("Loja A", "Lisboa", 2).await;

    let map = ctx
        .server
        .get("/api/availability")
        .add_query_param("city", "Lisboa")
        .add_query_param("date", saturday())
        .await
        .json::<AvailabilityMap>();

    assert!(map.is_empty());
}

#[tokio::test]
async fn test_check_reports_city_availability() {
    let ctx = TestContext::new();
    ctx.add_unit("Loja A", "Lisboa", 1).await;

    let check = |city: &'static str, date| {
        ctx.server
            .get("/api/availability/check")
            .add_query_param("city", city)
            .add_query_param("date", date)
    };

    let lisboa = check("Lisboa", wednesday()).await.json::<CityAvailabilityResponse>();
    assert!(lisboa.available);
    assert_eq!(lisboa.city, "lisboa");

    assert!(!check("Faro", wednesday()).await.json::<CityAvailabilityResponse>().available);
    assert!(!check("Lisboa", saturday()).await.json::<CityAvailabilityResponse>().available);
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/availability")
        .add_query_param("city", "Lisboa")
        .add_query_param("date", "21/10/2026")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
