use crate::domain::ports::NotifyService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

pub struct HttpNotifyService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpNotifyService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct NotifyPayload<'a> {
    to_phone: &'a str,
    template: &'a str,
    context: &'a serde_json::Value,
}

#[async_trait]
impl NotifyService for HttpNotifyService {
    async fn send(&self, phone: &str, template: &str, context: &serde_json::Value) -> Result<(), AppError> {
        let payload = NotifyPayload {
            to_phone: phone,
            template,
            context,
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Notify service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Notify service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
