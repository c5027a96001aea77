use crate::core::cache::{KeyValueCollection, Store};
use crate::core::fund::{FundProvider, FundRecord, HistoryPoint};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const RETRIES: usize = 3;
const RETRY_DELAY_MS: u64 = 500;

/// Client for the fund REST API: `/funds/`, `/funds/{id}/` and
/// `/funds/{id}/history/`.
pub struct FundApiProvider {
    base_url: String,
    client: reqwest::Client,
    cache: Arc<dyn KeyValueCollection>,
    ttl: Duration,
}

impl FundApiProvider {
    pub fn new(base_url: &str, store: &dyn Store, ttl: Duration) -> Result<Self> {
        let cache = store
            .get_collection("fund_api", true, true)
            .or_else(|| store.get_collection("fund_api", false, true))
            .ok_or_else(|| anyhow!("Could not create fund API cache"))?;
        Self::with_collection(base_url, cache, ttl)
    }

    pub fn with_collection(
        base_url: &str,
        cache: Arc<dyn KeyValueCollection>,
        ttl: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fundscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            cache,
            ttl,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        if let Some(cached) = self.cache.get(url.as_bytes()).await {
            match serde_json::from_slice(&cached) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("Discarding unreadable cache entry for {}: {}", url, e);
                    self.cache.remove(url.as_bytes()).await;
                }
            }
        }

        debug!("Requesting {} from {}", what, url);
        let response = with_retry(
            || async { self.client.get(&url).send().await },
            RETRIES,
            RETRY_DELAY_MS,
        )
        .await
        .with_context(|| format!("Failed to send request for {what}"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {what}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Fund API returned {} for {}: '{}'",
                status,
                what,
                response_text.trim()
            ));
        }
        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty response for {}", what));
        }

        let value = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse response for {what}. Response: '{response_text}'")
        })?;

        self.cache
            .put(url.as_bytes(), response_text.as_bytes(), Some(self.ttl))
            .await;
        Ok(value)
    }
}

#[async_trait]
impl FundProvider for FundApiProvider {
    async fn list_funds(&self) -> Result<Vec<FundRecord>> {
        self.get_json("funds/", "fund list").await
    }

    async fn fetch_fund(&self, id: u64) -> Result<FundRecord> {
        self.get_json(&format!("funds/{id}/"), &format!("fund {id}"))
            .await
    }

    async fn fetch_history(&self, id: u64) -> Result<Vec<HistoryPoint>> {
        let history: Vec<HistoryPoint> = self
            .get_json(&format!("funds/{id}/history/"), &format!("history of fund {id}"))
            .await?;
        debug!("Fetched {} history points for fund {}", history.len(), id);
        Ok(history)
    }
}
