mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Duration, Utc};
use common::{parse_body, seed_default_setup, seed_expired_hold, Setup, TestApp};
use serde_json::json;

fn slot(days_ahead: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days_ahead)
}

async fn create_hold(app: &TestApp, setup: &Setup, client: &str, scheduled_for: DateTime<Utc>) -> String {
    let res = app.request(
        Method::POST,
        "/api/v1/holds",
        Some(client),
        Some(json!({
            "offering_id": setup.offering_id,
            "scheduled_for": scheduled_for.to_rfc3339(),
            "location_type": "SALON"
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn create_booking(app: &TestApp, setup: &Setup, client: &str, scheduled_for: DateTime<Utc>) -> String {
    let hold_id = create_hold(app, setup, client, scheduled_for).await;
    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(client),
        Some(json!({ "hold_id": hold_id, "client_name": "Alice A.", "client_phone": "+15550123" })),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["booking"]["id"].as_str().unwrap().to_string()
}

async fn reschedule(
    app: &TestApp,
    client: &str,
    booking_id: &str,
    hold_id: &str,
    scheduled_for: DateTime<Utc>,
    location_type: &str,
) -> axum::response::Response {
    app.request(
        Method::POST,
        &format!("/api/v1/bookings/{}/reschedule", booking_id),
        Some(client),
        Some(json!({
            "hold_id": hold_id,
            "scheduled_for": scheduled_for.to_rfc3339(),
            "location_type": location_type
        })),
    ).await
}

async fn booking_start(app: &TestApp, booking_id: &str) -> DateTime<Utc> {
    let res = app.request(
        Method::GET,
        &format!("/api/v1/bookings/{}", booking_id),
        Some("client:alice"),
        None,
    ).await;
    let body = parse_body(res).await;
    DateTime::parse_from_rfc3339(body["scheduled_for"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn reschedule_moves_the_booking_and_consumes_the_hold() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", slot(3)).await;
    let hold_id = create_hold(&app, &setup, "client:alice", target).await;

    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::OK);
    let envelope = parse_body(res).await;
    let moved = &envelope["booking"];

    let new_start = DateTime::parse_from_rfc3339(moved["scheduled_for"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(new_start, target);
    assert_eq!(moved["total_duration_min"], 60);
    assert_eq!(moved["location_time_zone"], "UTC");

    // The consumed hold is gone.
    let res = app.request(
        Method::GET,
        &format!("/api/v1/holds/{}", hold_id),
        Some("client:alice"),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vacated_slot_becomes_bookable_again() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let original = slot(3);

    let booking_id = create_booking(&app, &setup, "client:alice", original).await;
    let hold_id = create_hold(&app, &setup, "client:alice", slot(5)).await;
    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, slot(5), "SALON").await;
    assert_eq!(res.status(), StatusCode::OK);

    // Another client can now take the exact instant alice vacated.
    let other = create_booking(&app, &setup, "client:bob", original).await;
    assert!(!other.is_empty());
}

#[tokio::test]
async fn hold_must_match_the_request_exactly() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", slot(3)).await;
    let hold_id = create_hold(&app, &setup, "client:alice", target).await;

    // Requested instant differs from what the hold pinned.
    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target + Duration::hours(1), "SALON").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Requested location mode differs from the hold's.
    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target, "MOBILE").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Neither attempt moved the booking or burned the hold.
    assert_ne!(booking_start(&app, &booking_id).await, target);
    let res = app.request(
        Method::GET,
        &format!("/api/v1/holds/{}", hold_id),
        Some("client:alice"),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_hold_aborts_before_any_write() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let original = slot(3);
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", original).await;
    let hold_id = seed_expired_hold(&app.pool, &setup, "alice", target).await;

    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(booking_start(&app, &booking_id).await, original);
}

#[tokio::test]
async fn occupied_target_leaves_booking_and_hold_intact() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let original = slot(3);
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", original).await;
    // Bob already occupies the target slot with the same professional.
    create_booking(&app, &setup, "client:bob", target).await;

    // Hold creation is optimistic, so alice can still pin the slot...
    let hold_id = create_hold(&app, &setup, "client:alice", target).await;

    // ...but the commit-time conflict check rejects the move.
    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Nothing was written: the booking stays put and the hold survives
    // for a retry against a different slot.
    assert_eq!(booking_start(&app, &booking_id).await, original);
    let res = app.request(
        Method::GET,
        &format!("/api/v1/holds/{}", hold_id),
        Some("client:alice"),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn a_session_underway_cannot_be_moved() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", slot(3)).await;
    sqlx::query("UPDATE bookings SET started_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(&booking_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let hold_id = create_hold(&app, &setup, "client:alice", target).await;
    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn closed_bookings_cannot_be_moved() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", slot(3)).await;
    let res = app.request(
        Method::POST,
        &format!("/api/v1/bookings/{}/cancel", booking_id),
        Some("client:alice"),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let hold_id = create_hold(&app, &setup, "client:alice", target).await;
    let res = reschedule(&app, "client:alice", &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn only_the_owning_client_may_reschedule() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", slot(3)).await;
    let hold_id = create_hold(&app, &setup, "client:bob", target).await;

    // Someone else's booking looks like no booking at all.
    let res = reschedule(&app, "client:bob", &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The professional cannot move it either; moving is the client's call.
    let pro_auth = format!("pro:{}", setup.professional_id);
    let res = reschedule(&app, &pro_auth, &booking_id, &hold_id, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn hold_for_another_professional_is_rejected() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let other = seed_default_setup(&app).await;
    let target = slot(5);

    let booking_id = create_booking(&app, &setup, "client:alice", slot(3)).await;
    let foreign_hold = create_hold(&app, &other, "client:alice", target).await;

    let res = reschedule(&app, "client:alice", &booking_id, &foreign_hold, target, "SALON").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
