use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{
    availability, booking, consultation, discount, health, hold, lifecycle, session_artifacts,
};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Availability (public browse)
        .route("/api/v1/professionals/{professional_id}/availability", get(availability::get_day_availability))

        // Holds
        .route("/api/v1/holds", post(hold::create_hold))
        .route("/api/v1/holds/{hold_id}", get(hold::get_hold).delete(hold::delete_hold))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/reschedule", post(booking::reschedule_booking))

        // Lifecycle
        .route("/api/v1/bookings/{booking_id}/status", put(lifecycle::set_status))
        .route("/api/v1/bookings/{booking_id}/cancel", post(lifecycle::cancel_booking))
        .route("/api/v1/bookings/{booking_id}/finish", post(lifecycle::finish_booking))
        .route("/api/v1/bookings/{booking_id}/session-step", put(lifecycle::set_session_step))

        // Consultation approval gate
        .route("/api/v1/bookings/{booking_id}/consultation", post(consultation::propose_consultation))
        .route("/api/v1/bookings/{booking_id}/consultation/approve", post(consultation::approve_consultation))
        .route("/api/v1/bookings/{booking_id}/consultation/reject", post(consultation::reject_consultation))

        // Pricing
        .route("/api/v1/bookings/{booking_id}/discount", get(discount::compute_last_minute_discount))

        // Session artifacts
        .route("/api/v1/bookings/{booking_id}/media", post(session_artifacts::add_media))
        .route("/api/v1/bookings/{booking_id}/aftercare", post(session_artifacts::set_aftercare))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        actor_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
