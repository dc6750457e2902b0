use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub identity_service_url: String,
    pub identity_service_token: String,
    pub notify_service_url: String,
    pub notify_service_token: String,
    pub hold_ttl_min: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            identity_service_url: env::var("IDENTITY_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8100/api/v1/resolve".to_string()),
            identity_service_token: env::var("IDENTITY_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            notify_service_url: env::var("NOTIFY_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8200/api/v1/send".to_string()),
            notify_service_token: env::var("NOTIFY_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            hold_ttl_min: env::var("HOLD_TTL_MIN").unwrap_or_else(|_| "10".to_string()).parse().expect("HOLD_TTL_MIN must be a number"),
        }
    }
}
