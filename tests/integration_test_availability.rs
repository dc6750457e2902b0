mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use common::{parse_body, seed_booking_row, seed_default_setup, seed_professional, TestApp};

fn target_date() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(10)
}

fn slot_iso(date: NaiveDate, h: u32, m: u32) -> String {
    Utc.from_utc_datetime(&date.and_hms_opt(h, m, 0).unwrap()).to_rfc3339()
}

#[tokio::test]
async fn existing_booking_with_buffer_blocks_neighbouring_slots() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let date = target_date();

    // Occupies 10:00-11:00 plus a 15-minute buffer.
    let start = Utc.from_utc_datetime(&date.and_hms_opt(10, 0, 0).unwrap());
    seed_booking_row(&app.pool, &setup, "someone-else", start, 60, 15).await;

    let res = app.request(
        Method::GET,
        &format!(
            "/api/v1/professionals/{}/availability?service_id={}&date={}&location_type=SALON",
            setup.professional_id, setup.service_id, date
        ),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["time_zone"], "UTC");
    let slots: Vec<String> = body["slots"].as_array().unwrap()
        .iter().map(|s| s.as_str().unwrap().to_string()).collect();

    // Half-open edge: a 60-minute slot ending exactly at 10:00 survives.
    assert!(slots.contains(&slot_iso(date, 9, 0)));
    for (h, m) in [(9u32, 30u32), (10, 0), (10, 30), (11, 0)] {
        assert!(!slots.contains(&slot_iso(date, h, m)), "{:02}:{:02} should be excluded", h, m);
    }
    // First slot clear of the buffered interval.
    assert!(slots.contains(&slot_iso(date, 11, 30)));
    // The working day still ends at 17:00.
    assert!(slots.contains(&slot_iso(date, 16, 0)));
    assert!(!slots.contains(&slot_iso(date, 16, 30)));
}

#[tokio::test]
async fn calendar_block_boundary_is_half_open() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;
    let date = target_date();

    let block_start = Utc.from_utc_datetime(&date.and_hms_opt(10, 0, 0).unwrap());
    sqlx::query(
        "INSERT INTO calendar_blocks (id, professional_id, location_id, start_time, end_time, reason, created_at)
         VALUES (?, ?, NULL, ?, ?, 'inventory', ?)"
    )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&setup.professional_id)
        .bind(block_start)
        .bind(block_start + Duration::hours(2))
        .bind(Utc::now())
        .execute(&app.pool)
        .await
        .unwrap();

    let res = app.request(
        Method::GET,
        &format!(
            "/api/v1/professionals/{}/availability?service_id={}&date={}&location_type=SALON",
            setup.professional_id, setup.service_id, date
        ),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let slots: Vec<String> = body["slots"].as_array().unwrap()
        .iter().map(|s| s.as_str().unwrap().to_string()).collect();

    // candidateEnd == blockStart is NOT an overlap.
    assert!(slots.contains(&slot_iso(date, 9, 0)));
    assert!(!slots.contains(&slot_iso(date, 9, 30)));
    assert!(!slots.contains(&slot_iso(date, 11, 30)));
    // candidateStart == blockEnd is free again.
    assert!(slots.contains(&slot_iso(date, 12, 0)));
}

#[tokio::test]
async fn professional_without_locations_gets_empty_day_not_error() {
    let app = TestApp::new().await;
    let professional_id = seed_professional(&app.pool, "Europe/Berlin").await;

    // An offering must exist for the service; the professional simply
    // has nowhere to perform it.
    let service_id = uuid::Uuid::new_v4().to_string();
    common::seed_offering(&app.pool, &professional_id, &service_id, 5_000, 45).await;

    let res = app.request(
        Method::GET,
        &format!(
            "/api/v1/professionals/{}/availability?service_id={}&date={}&location_type=SALON",
            professional_id, service_id, target_date()
        ),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["slots"].as_array().unwrap().is_empty());
    assert_eq!(body["time_zone"], "Europe/Berlin");
    assert!(body["location_id"].is_null());
}

#[tokio::test]
async fn client_overrides_are_clamped_to_safe_bounds() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;

    // A 1-minute step request lands on the 5-minute floor.
    let res = app.request(
        Method::GET,
        &format!(
            "/api/v1/professionals/{}/availability?service_id={}&date={}&location_type=SALON&step_min=1&lead_time_min=9999",
            setup.professional_id, setup.service_id, target_date()
        ),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["step_min"], 5);
    assert_eq!(body["lead_time_min"], 240);
}

#[tokio::test]
async fn lead_override_cannot_undercut_configured_notice() {
    let app = TestApp::new().await;
    let professional_id = seed_professional(&app.pool, "UTC").await;
    common::seed_location(&app.pool, &professional_id, "UTC", 30, 0, 120).await;
    let service_id = uuid::Uuid::new_v4().to_string();
    common::seed_offering(&app.pool, &professional_id, &service_id, 5_000, 30).await;

    let res = app.request(
        Method::GET,
        &format!(
            "/api/v1/professionals/{}/availability?service_id={}&date={}&location_type=SALON&lead_time_min=0",
            professional_id, service_id, target_date()
        ),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["lead_time_min"], 120);
}

#[tokio::test]
async fn malformed_date_is_rejected_before_io() {
    let app = TestApp::new().await;
    let setup = seed_default_setup(&app).await;

    let res = app.request(
        Method::GET,
        &format!(
            "/api/v1/professionals/{}/availability?service_id={}&date=17-09-2026&location_type=SALON",
            setup.professional_id, setup.service_id
        ),
        None,
        None,
    ).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
