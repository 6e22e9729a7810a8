//! Data Fetcher: read-only access to the external `tasks` collection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::task::TaskRecord;

const TASKS_PATH: &str = "/rest/v1/tasks";
/// Column holding the organization key.
const ORG_KEY_COLUMN: &str = "team_id";
/// One initial attempt plus a single retry.
const MAX_ATTEMPTS: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed task rows: {0}")]
    Parse(#[from] serde_json::Error),
}

impl StoreError {
    /// Transport failures, rate limiting and server errors are worth one more try.
    fn is_retryable(&self) -> bool {
        match self {
            StoreError::Http(_) => true,
            StoreError::Api { status, .. } => *status == 429 || *status >= 500,
            StoreError::Parse(_) => false,
        }
    }
}

/// Source of task rows for an organization.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Every task whose organization key equals `org_id`. No pagination.
    /// An unknown organization yields an empty list, not an error.
    async fn fetch_tasks(&self, org_id: &str) -> Result<Vec<TaskRecord>, StoreError>;
}

/// Supabase (PostgREST) backed task store authenticated with a service key.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    tasks_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, service_key: String, timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            tasks_url: format!("{}{}", base_url.trim_end_matches('/'), TASKS_PATH),
            service_key,
        })
    }

    async fn query_once(&self, org_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let filter = format!("eq.{org_id}");
        let response = self
            .client
            .get(&self.tasks_url)
            .query(&[("select", "*"), (ORG_KEY_COLUMN, filter.as_str())])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes of task rows", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TaskStore for SupabaseStore {
    async fn fetch_tasks(&self, org_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let mut attempt = 1;
        loop {
            match self.query_once(org_id).await {
                Ok(tasks) => {
                    info!("Fetched {} tasks for org {}", tasks.len(), org_id);
                    return Ok(tasks);
                }
                Err(e) if attempt < MAX_ATTEMPTS && e.is_retryable() => {
                    warn!(
                        "Task query attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        RETRY_BACKOFF.as_millis()
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
