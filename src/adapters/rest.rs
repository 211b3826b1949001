use crate::domain::model::ListQuery;
use crate::domain::ports::{DataStore, StoreSettings};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const REST_PREFIX: &str = "rest/v1/";

/// Client for a PostgREST endpoint such as the one Supabase exposes under
/// `/rest/v1`. The anonymous key goes out both as `apikey` and as a bearer
/// token.
#[derive(Debug, Clone)]
pub struct RestStore {
    base_url: Url,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RestStore {
    pub fn new(store_url: &str, anon_key: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(store_url).map_err(|e| SiteError::InvalidConfigValueError {
            field: "store.url".to_string(),
            value: store_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let invalid_key = |reason: String| SiteError::InvalidConfigValueError {
            field: "store.anon_key".to_string(),
            value: "<redacted>".to_string(),
            reason,
        };
        let mut headers = HeaderMap::new();
        let mut apikey =
            HeaderValue::from_str(anon_key).map_err(|e| invalid_key(e.to_string()))?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", anon_key))
            .map_err(|e| invalid_key(e.to_string()))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_settings<S: StoreSettings>(settings: &S) -> Result<Self> {
        Self::new(
            settings.store_url(),
            settings.anon_key(),
            Duration::from_secs(settings.request_timeout_secs()),
        )
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}{}", REST_PREFIX, table))
            .map_err(|e| SiteError::ConfigError {
                message: format!("Cannot build URL for table {}: {}", table, e),
            })
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Value>> {
        let url = self.table_url(query.table)?;
        let mut request = self.client.get(url).query(&[("select", "*")]);
        if let Some(order) = &query.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            request = request.query(&[("order", format!("{}.{}", order.column, direction))]);
        }

        tracing::debug!("GET {} (order: {:?})", query.table, query.order);
        let response = request.send().await?;
        read_rows(response).await
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>> {
        let url = self.table_url(table)?;
        tracing::debug!("POST {} ({} rows)", table, rows.len());
        let response = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        read_rows(response).await
    }
}

async fn read_rows(response: Response) -> Result<Vec<Value>> {
    let status = response.status();
    tracing::debug!("Data store response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SiteError::StoreError {
            status: status.as_u16(),
            message: error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        });
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(&body)? {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        row => Ok(vec![row]),
    }
}

fn error_message(body: &str) -> Option<String> {
    if let Ok(err) = serde_json::from_str::<PostgrestError>(body) {
        if let Some(message) = err.message {
            let mut full = message;
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                full.push_str(&format!(" ({})", details));
            }
            if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                full.push_str(&format!(" hint: {}", hint));
            }
            return Some(full);
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
