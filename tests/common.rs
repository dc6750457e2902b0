use appointment_backend::{
    api::router::create_router,
    config::Config,
    domain::models::actor::{Actor, Role},
    domain::ports::{IdentityService, NotifyService},
    error::AppError,
    infra::repositories::{
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
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockNotifyService;

#[async_trait]
impl NotifyService for MockNotifyService {
    async fn send(&self, _phone: &str, _template: &str, _context: &Value) -> Result<(), AppError> {
        Ok(())
    }
}

/// Stand-in for the platform identity service: tokens are
/// "client:<id>" or "pro:<id>", anything else is nobody.
pub struct MockIdentityService;

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn resolve(&self, token: &str) -> Result<Option<Actor>, AppError> {
        if let Some(id) = token.strip_prefix("client:") {
            return Ok(Some(Actor { id: id.to_string(), role: Role::Client }));
        }
        if let Some(id) = token.strip_prefix("pro:") {
            return Ok(Some(Actor { id: id.to_string(), role: Role::Professional }));
        }
        Ok(None)
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            identity_service_url: "http://localhost".to_string(),
            identity_service_token: "token".to_string(),
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
            hold_ttl_min: 10,
        };

        let state = Arc::new(AppState {
            config,
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
            identity_service: Arc::new(MockIdentityService),
            notify_service: Arc::new(MockNotifyService),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// One request through the router. `auth` is a raw bearer token,
    /// e.g. "client:alice" or "pro:bella".
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = auth {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const FULL_WEEK_HOURS: &str = r#"{
    "monday": [{"start": "09:00", "end": "17:00"}],
    "tuesday": [{"start": "09:00", "end": "17:00"}],
    "wednesday": [{"start": "09:00", "end": "17:00"}],
    "thursday": [{"start": "09:00", "end": "17:00"}],
    "friday": [{"start": "09:00", "end": "17:00"}],
    "saturday": [{"start": "09:00", "end": "17:00"}],
    "sunday": [{"start": "09:00", "end": "17:00"}]
}"#;

#[allow(dead_code)]
pub struct Setup {
    pub professional_id: String,
    pub location_id: String,
    pub offering_id: String,
    pub service_id: String,
}

#[allow(dead_code)]
pub async fn seed_professional(pool: &Pool<Sqlite>, timezone: &str) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO professionals (id, display_name, timezone, phone, created_at) VALUES (?, ?, ?, ?, ?)"
    )
        .bind(&id)
        .bind("Bella Glow")
        .bind(timezone)
        .bind("+15550100")
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
    id
}

#[allow(dead_code)]
pub async fn seed_location(pool: &Pool<Sqlite>, professional_id: &str, timezone: &str, step_min: i64, buffer_min: i64, min_notice_min: i64) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO locations (id, professional_id, location_type, name, address, timezone, hours_json, step_min, buffer_min, min_notice_min, max_days_ahead, active, created_at)
         VALUES (?, ?, 'SALON', ?, ?, ?, ?, ?, ?, ?, 60, 1, ?)"
    )
        .bind(&id)
        .bind(professional_id)
        .bind("Main Studio")
        .bind("12 High St")
        .bind(timezone)
        .bind(FULL_WEEK_HOURS)
        .bind(step_min)
        .bind(buffer_min)
        .bind(min_notice_min)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
    id
}

#[allow(dead_code)]
pub async fn seed_offering(pool: &Pool<Sqlite>, professional_id: &str, service_id: &str, base_price: i64, salon_duration_min: i64) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO offerings (id, professional_id, service_id, name, base_price, salon_duration_min, mobile_duration_min, buffer_min, active, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, 0, 1, ?)"
    )
        .bind(&id)
        .bind(professional_id)
        .bind(service_id)
        .bind("Signature Service")
        .bind(base_price)
        .bind(salon_duration_min)
        .bind(salon_duration_min + 30)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Professional in UTC with one salon location (09:00-17:00 every day,
/// 30-min steps, no buffer, no notice) and one 60-minute offering at
/// 100.00.
#[allow(dead_code)]
pub async fn seed_default_setup(app: &TestApp) -> Setup {
    let professional_id = seed_professional(&app.pool, "UTC").await;
    let location_id = seed_location(&app.pool, &professional_id, "UTC", 30, 0, 0).await;
    let service_id = Uuid::new_v4().to_string();
    let offering_id = seed_offering(&app.pool, &professional_id, &service_id, 10_000, 60).await;
    Setup {
        professional_id,
        location_id,
        offering_id,
        service_id,
    }
}

/// A non-cancelled booking row occupying [start, start + duration +
/// buffer), inserted the way checkout would have written it.
#[allow(dead_code)]
pub async fn seed_booking_row(
    pool: &Pool<Sqlite>,
    setup: &Setup,
    client_id: &str,
    start: DateTime<Utc>,
    duration_min: i64,
    buffer_min: i64,
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO bookings (id, professional_id, client_id, service_id, offering_id, scheduled_for, total_duration_min, buffer_min, ends_at, location_id, location_type, address, location_time_zone, client_name, client_phone, subtotal, discount_pct, discount_amount, total_amount, status, session_step, started_at, finished_at, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'SALON', '12 High St', 'UTC', 'Test Client', '+15550199', 10000, 0, 0, 10000, 'ACCEPTED', 'NONE', NULL, NULL, ?)"
    )
        .bind(&id)
        .bind(&setup.professional_id)
        .bind(client_id)
        .bind(&setup.service_id)
        .bind(&setup.offering_id)
        .bind(start)
        .bind(duration_min)
        .bind(buffer_min)
        .bind(start + Duration::minutes(duration_min + buffer_min))
        .bind(&setup.location_id)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
    id
}

/// An already-expired hold row, for exercising lazy expiry.
#[allow(dead_code)]
pub async fn seed_expired_hold(pool: &Pool<Sqlite>, setup: &Setup, client_id: &str, start: DateTime<Utc>) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO holds (id, client_id, professional_id, service_id, offering_id, location_id, location_type, scheduled_for, duration_min, location_time_zone, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?, ?, 'SALON', ?, 60, 'UTC', ?, ?)"
    )
        .bind(&id)
        .bind(client_id)
        .bind(&setup.professional_id)
        .bind(&setup.service_id)
        .bind(&setup.offering_id)
        .bind(&setup.location_id)
        .bind(start)
        .bind(Utc::now() - Duration::minutes(5))
        .bind(Utc::now() - Duration::minutes(15))
        .execute(pool)
        .await
        .unwrap();
    id
}
