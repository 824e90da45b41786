use std::time::Duration;

use board_logging::{board_debug, board_warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::json;
use url::Url;

use crate::{FailureKind, Record, RecordId, StoreError};

/// Connection settings for the hosted REST endpoint.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: String,
    pub table: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl StoreSettings {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            table: "items".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The remote CRUD source behind the controller: one named collection,
/// read newest-first, server-assigned ids and timestamps.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError>;
    async fn insert(&self, text: &str) -> Result<Record, StoreError>;
    async fn delete(&self, id: RecordId) -> Result<(), StoreError>;
}

/// PostgREST-dialect store (Supabase-shaped): `{endpoint}/rest/v1/{table}`
/// with `apikey` and bearer headers on every request.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    settings: StoreSettings,
    client: reqwest::Client,
}

impl PostgrestStore {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .default_headers(auth_headers(&settings.api_key)?)
            .build()
            .map_err(|err| StoreError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn table_url(&self) -> Result<Url, StoreError> {
        let base = Url::parse(&self.settings.endpoint)
            .map_err(|err| StoreError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        base.join(&format!("rest/v1/{}", self.settings.table))
            .map_err(|err| StoreError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
impl RemoteStore for PostgrestStore {
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "id,text,created_at")
            .append_pair("order", "created_at.desc");
        board_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<Vec<Record>>()
            .await
            .map_err(|err| StoreError::new(FailureKind::Decode, err.to_string()))
    }

    async fn insert(&self, text: &str) -> Result<Record, StoreError> {
        let url = self.table_url()?;
        board_debug!("POST {} text_len={}", url, text.len());

        let response = self
            .client
            .post(url)
            // Ask the service to echo the created row back, as a single
            // object rather than a one-element array.
            .header("Prefer", "return=representation")
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<Record>()
            .await
            .map_err(|err| StoreError::new(FailureKind::Decode, err.to_string()))
    }

    async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"));
        board_debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap, StoreError> {
    let invalid = |err: reqwest::header::InvalidHeaderValue| {
        StoreError::new(FailureKind::InvalidApiKey, err.to_string())
    };
    let mut headers = HeaderMap::new();
    headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid)?);
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid)?,
    );
    Ok(headers)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| extract_service_message(&body))
        .unwrap_or_else(|| status.to_string());
    board_warn!("request rejected: {} ({})", status, message);
    Err(StoreError::new(
        FailureKind::HttpStatus(status.as_u16()),
        message,
    ))
}

/// PostgREST error documents carry a human-readable `message` field.
fn extract_service_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        return StoreError::new(FailureKind::Timeout, err.to_string());
    }
    StoreError::new(FailureKind::Network, err.to_string())
}
