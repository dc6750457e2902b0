use std::sync::Arc;
use std::time::Duration;
use chrono::TimeZone as _;
use chrono_tz::Tz;
use serde_json::json;
use tokio::time::sleep;
use tracing::{error, info, info_span, warn, Instrument};

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::error::AppError;
use crate::state::AppState;

/// Polls the notification job queue and dispatches each due job through
/// the external notify collaborator. Reminder/confirmation traffic reads
/// bookings and writes job status only; it never mutates a booking.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        match state.job_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "background_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                    );

                    let state = state.clone();

                    async move {
                        info!("Processing job: {}", job.job_type);
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            },
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

fn local_start_display(booking: &Booking) -> String {
    let tz: Tz = booking.location_time_zone.parse().unwrap_or(chrono_tz::UTC);
    tz.from_utc_datetime(&booking.scheduled_for.naive_utc())
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

async fn process_job(state: &Arc<AppState>, job: &crate::domain::models::job::Job) -> Result<(), AppError> {
    let booking_id = &job.payload.booking_id;

    let booking = state.booking_repo.find_by_id(booking_id).await?
        .ok_or(AppError::NotFound(format!("Booking {} not found", booking_id)))?;

    // A reminder for a booking cancelled after enqueueing is simply
    // dropped.
    if booking.status == BookingStatus::Cancelled && job.job_type != "CANCELLATION" {
        warn!("Skipping {} job for cancelled booking {}", job.job_type, booking.id);
        return Ok(());
    }

    let Some(phone) = booking.client_phone.as_deref() else {
        warn!("Booking {} has no client phone; skipping {}", booking.id, job.job_type);
        return Ok(());
    };

    let template = match job.job_type.as_str() {
        "CONFIRMATION" => "booking_confirmed",
        "REMINDER" => "booking_reminder_24h",
        "CANCELLATION" => "booking_cancelled",
        "RESCHEDULE" => "booking_rescheduled",
        other => {
            return Err(AppError::InternalWithMsg(format!("Unknown job type {}", other)));
        }
    };

    let context = json!({
        "client_name": booking.client_name,
        "start_time": local_start_display(&booking),
        "time_zone": booking.location_time_zone,
        "address": booking.address,
        "total_amount": booking.total_amount,
    });

    info!("Sending {} notice for booking {}", job.job_type, booking.id);
    state.notify_service.send(phone, template, &context).await?;

    Ok(())
}
