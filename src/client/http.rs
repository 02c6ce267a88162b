//! reqwest implementation of [`Backend`]

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::dto::{
    AuthResponse, ChatRequest, ChatResponse, CitiesResponse, Credentials, FeedbackRequest,
    MessageResponse, RatingRequest, ReportQuery,
};
use super::error::{ClientError, ClientResult};
use super::Backend;
use crate::config::BackendConfig;
use crate::dashboard::DashboardBundle;

/// HTTP client for the AirAware backend
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a new client for the configured backend
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> ClientResult<Value> {
        tracing::debug!(endpoint = path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(ClientError::transport)?;
        read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        tracing::debug!(endpoint = path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::transport)?;
        read_json(response).await
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> ClientResult<String> {
        let body = self.post_json(path, credentials).await?;
        let auth: AuthResponse = decode(body)?;
        auth.user_id
            .map(|id| id.to_string())
            .ok_or_else(|| ClientError::Malformed("missing user_id".to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn signup(&self, credentials: &Credentials) -> ClientResult<String> {
        self.authenticate("/signup", credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        self.authenticate("/login", credentials).await
    }

    async fn cities(&self) -> ClientResult<Vec<String>> {
        let body = self.get_json("/cities").await?;
        let cities: CitiesResponse = decode(body)?;
        Ok(cities.cities)
    }

    async fn dashboard_data(&self, city: &str) -> ClientResult<DashboardBundle> {
        let path = format!("/dashboard_data?city={}", urlencoding::encode(city));
        let body = self.get_json(&path).await?;
        DashboardBundle::from_json(body).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    async fn chat(&self, request: &ChatRequest) -> ClientResult<Option<String>> {
        let body = self.post_json("/chat", request).await?;
        let chat: ChatResponse = decode(body)?;
        Ok(chat.reply.filter(|r| !r.is_empty()))
    }

    async fn feedback(&self, request: &FeedbackRequest) -> ClientResult<Option<String>> {
        let body = self.post_json("/feedback", request).await?;
        let ack: MessageResponse = decode(body)?;
        Ok(ack.message)
    }

    async fn rate(&self, request: &RatingRequest) -> ClientResult<Option<String>> {
        let body = self.post_json("/rate", request).await?;
        let ack: MessageResponse = decode(body)?;
        Ok(ack.message)
    }

    fn report_url(&self, query: &ReportQuery) -> String {
        format!(
            "{}/download_report?{}",
            self.base_url,
            query.to_query_string()
        )
    }

    async fn download_report(&self, query: &ReportQuery) -> ClientResult<Vec<u8>> {
        let url = self.report_url(query);
        tracing::debug!(city = %query.city, "Downloading report");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let bytes = response.bytes().await.map_err(ClientError::transport)?;
        Ok(bytes.to_vec())
    }
}

/// Read a JSON body, turning `{error}` payloads and non-2xx statuses into errors.
///
/// The backend reports failures in the body even on 4xx, so the body is
/// inspected before the status code. A body that is not JSON is malformed
/// whatever the status.
async fn read_json(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let text = response.text().await.map_err(ClientError::transport)?;

    let body: Option<Value> = serde_json::from_str(&text).ok();

    let Some(body) = body else {
        return Err(ClientError::Malformed(format!(
            "response is not JSON (status {})",
            status.as_u16()
        )));
    };

    // An empty `error` string counts as no error
    if let Some(message) = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
    {
        tracing::warn!(status = status.as_u16(), error = message, "Backend reported error");
        return Err(ClientError::Backend(message.to_string()));
    }

    if !status.is_success() {
        if let Some(message) = body.get("message").and_then(Value::as_str) {
            return Err(ClientError::Backend(message.to_string()));
        }
        return Err(ClientError::Status {
            status: status.as_u16(),
            message: text,
        });
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(body: Value) -> ClientResult<T> {
    Ok(serde_json::from_value(body)?)
}
