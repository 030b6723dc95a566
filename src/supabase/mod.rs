use async_trait::async_trait;
use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, Request, Url};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_TABLE};
use crate::model::{Entry, InsertResult};
use crate::supabase::model::ContentRange;

pub mod model;

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed content-range header: {0:?}")]
    MalformedContentRange(String),
}

/// Operations the batch runner and file loader need from the backend.
#[async_trait]
pub trait WaitlistService: Send + Sync {
    /// Insert one row. Failures are reported in the result, never returned.
    async fn insert(&self, entry: &Entry) -> InsertResult;

    /// Exact row count; 0 when it cannot be determined.
    async fn count(&self) -> u64;
}

#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    key: String,
    table: String,
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    pub fn new(base_url: &str, key: impl Into<String>) -> Result<Self, SupabaseError> {
        Self::with_table(base_url, key, DEFAULT_TABLE)
    }

    pub fn with_table(
        base_url: &str,
        key: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self, SupabaseError> {
        // A trailing slash keeps any path prefix when joining endpoints.
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let http = Client::builder()
            .user_agent(concat!("waitlist-pusher/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            key: key.into(),
            table: table.into(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, SupabaseError> {
        Self::with_table(&cfg.backend.url, cfg.backend.key.clone(), cfg.backend.table.clone())
    }

    fn table_url(&self) -> Result<Url, SupabaseError> {
        Ok(self.base_url.join(&format!("rest/v1/{}", self.table))?)
    }

    pub fn build_insert_request(&self, payload: &Map<String, Value>) -> Result<Request, SupabaseError> {
        Ok(self
            .http
            .post(self.table_url()?)
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(payload)
            .build()?)
    }

    pub fn build_count_request(&self) -> Result<Request, SupabaseError> {
        Ok(self
            .http
            .get(self.table_url()?)
            .query(&[("select", "count")])
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Prefer", "count=exact")
            .build()?)
    }

    async fn execute_insert(&self, payload: &Map<String, Value>) -> Result<u16, SupabaseError> {
        let request = self.build_insert_request(payload)?;
        let body = Value::Object(payload.clone());
        debug!(url = %request.url(), payload = %body, "sending insert request");
        let res = self.http.execute(request).await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SupabaseError::Status { status, body });
        }
        Ok(status.as_u16())
    }

    async fn fetch_count(&self) -> Result<u64, SupabaseError> {
        let request = self.build_count_request()?;
        debug!(url = %request.url(), "sending count request");
        let res = self.http.execute(request).await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SupabaseError::Status { status, body });
        }
        // A response without the header means an empty table.
        let header = match res.headers().get(CONTENT_RANGE) {
            Some(value) => value
                .to_str()
                .map_err(|_| SupabaseError::MalformedContentRange(format!("{:?}", value)))?
                .to_string(),
            None => "0".to_string(),
        };
        Ok(header.parse::<ContentRange>()?.total)
    }
}

#[async_trait]
impl WaitlistService for SupabaseClient {
    async fn insert(&self, entry: &Entry) -> InsertResult {
        let payload = entry.to_payload();
        match self.execute_insert(&payload).await {
            Ok(status) => {
                println!("Successfully added: {} ({})", entry.name, entry.email);
                InsertResult::inserted(payload, status)
            }
            Err(err) => {
                println!("Failed to add {} ({}): {}", entry.name, entry.email, err);
                warn!(email = %entry.email, %err, "insert failed");
                InsertResult::failed(payload, err.to_string())
            }
        }
    }

    async fn count(&self) -> u64 {
        match self.fetch_count().await {
            Ok(total) => total,
            Err(err) => {
                println!("Error getting count: {}", err);
                warn!(%err, "count failed; reporting 0");
                0
            }
        }
    }
}
