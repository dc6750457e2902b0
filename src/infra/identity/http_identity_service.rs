use crate::domain::models::actor::Actor;
use crate::domain::ports::IdentityService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::error;

/// Resolves bearer tokens against the platform identity service. The
/// engine never sees credentials, only the resulting `Actor`.
pub struct HttpIdentityService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpIdentityService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn resolve(&self, token: &str) -> Result<Option<Actor>, AppError> {
        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Identity service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        match res.status() {
            StatusCode::OK => {
                let actor = res.json::<Actor>().await.map_err(|e| {
                    AppError::InternalWithMsg(format!("Identity service returned malformed actor: {}", e))
                })?;
                Ok(Some(actor))
            }
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(None),
            status => {
                let text = res.text().await.unwrap_or_default();
                let msg = format!("Identity service failed. Status: {}, Body: {}", status, text);
                error!("{}", msg);
                Err(AppError::InternalWithMsg(msg))
            }
        }
    }
}
