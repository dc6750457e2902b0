use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::infra::identity::http_identity_service::HttpIdentityService;
use crate::infra::notify::http_notify_service::HttpNotifyService;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo,
    sqlite_calendar_block_repo::SqliteCalendarBlockRepo,
    sqlite_consultation_repo::SqliteConsultationRepo,
    sqlite_hold_repo::SqliteHoldRepo,
    sqlite_job_repo::SqliteJobRepo,
    sqlite_last_minute_repo::SqliteLastMinuteRepo,
    sqlite_location_repo::SqliteLocationRepo,
    sqlite_media_repo::SqliteMediaRepo,
    sqlite_offering_repo::SqliteOfferingRepo,
    sqlite_professional_repo::SqliteProfessionalRepo,
    sqlite_uow::SqliteTransactionManager,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let identity_service = Arc::new(HttpIdentityService::new(
        config.identity_service_url.clone(),
        config.identity_service_token.clone(),
    ));
    let notify_service = Arc::new(HttpNotifyService::new(
        config.notify_service_url.clone(),
        config.notify_service_token.clone(),
    ));

    AppState {
        config: config.clone(),
        professional_repo: Arc::new(SqliteProfessionalRepo::new(pool.clone())),
        offering_repo: Arc::new(SqliteOfferingRepo::new(pool.clone())),
        location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
        calendar_block_repo: Arc::new(SqliteCalendarBlockRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        hold_repo: Arc::new(SqliteHoldRepo::new(pool.clone())),
        consultation_repo: Arc::new(SqliteConsultationRepo::new(pool.clone())),
        last_minute_repo: Arc::new(SqliteLastMinuteRepo::new(pool.clone())),
        media_repo: Arc::new(SqliteMediaRepo::new(pool.clone())),
        job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
        tx_manager: Arc::new(SqliteTransactionManager::new(pool.clone())),
        identity_service,
        notify_service,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
