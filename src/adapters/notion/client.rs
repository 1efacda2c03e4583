//! Notion HTTP client with rate limiting.
//!
//! Wraps the Notion REST API, providing the operations the synchronizer
//! needs through the [`PageStore`] port. Includes a token-bucket rate
//! limiter to stay within Notion's average of three requests per second.
//! There is no retry layer: every failure is returned to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Block, DatabaseSchema, NotionConfig, NumberEqualsQuery, PageId, PropertySet,
};
use crate::domain::ports::PageStore;

use super::models::{
    NotionAppendChildrenRequest, NotionCreatePageRequest, NotionDatabase, NotionDatabaseParent,
    NotionErrorResponse, NotionPageRef, NotionQueryRequest, NotionQueryResponse,
    NotionUpdatePageRequest,
};

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum tokens in the bucket.
    capacity: u32,
    /// Current available tokens.
    tokens: u32,
    /// Duration of the refill window.
    window: Duration,
    /// When the current window started.
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: u32, window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
                "Notion rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            // After sleeping, refill and consume one token.
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }
}

/// HTTP client for the Notion REST API.
///
/// All methods return [`DomainResult`] and map HTTP / network errors
/// to [`DomainError::Transport`].
#[derive(Debug, Clone)]
pub struct NotionClient {
    /// The underlying HTTP client.
    http: Client,
    /// Integration token.
    token: String,
    /// API root without trailing slash, e.g. `https://api.notion.com`.
    base_url: String,
    /// Value of the `Notion-Version` header.
    api_version: String,
    /// Shared rate limiter.
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl NotionClient {
    /// Create a new client from the Notion section of the configuration.
    pub fn new(config: &NotionConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.requests_per_second, Duration::from_secs(1));
        Self {
            http: Client::new(),
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.api_version)
            .header("Content-Type", "application/json")
    }

    /// Send one request and decode a successful response body as `T`.
    ///
    /// `operation` names the call in error messages and logs.
    async fn send<B, T>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> DomainResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.rate_limited_request(method.clone(), &url).await;
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(operation = operation, method = %method, url = %url, "Notion request");

        let resp = request.send().await.map_err(|e| {
            DomainError::Transport(format!("Notion {operation} request failed: {e}"))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<NotionErrorResponse>(&body_text).map_or(
                body_text,
                |err| format!("{}: {}", err.code, err.message),
            );
            return Err(DomainError::Transport(format!(
                "Notion {operation} returned {status}: {detail}"
            )));
        }

        let body_text = resp.text().await.map_err(|e| {
            DomainError::Transport(format!("Notion {operation} response read failed: {e}"))
        })?;
        serde_json::from_str(&body_text).map_err(|e| {
            tracing::warn!(operation = operation, error = %e, "Undecodable Notion response");
            DomainError::from(e)
        })
    }
}

#[async_trait]
impl PageStore for NotionClient {
    async fn retrieve_database(&self, database_id: &str) -> DomainResult<DatabaseSchema> {
        let database: NotionDatabase = self
            .send::<(), _>(
                "retrieve_database",
                Method::GET,
                &format!("databases/{database_id}"),
                None,
            )
            .await?;
        Ok(database.into())
    }

    async fn query_database(
        &self,
        database_id: &str,
        query: &NumberEqualsQuery,
    ) -> DomainResult<Vec<PageId>> {
        let body = NotionQueryRequest::from(query);
        let resp: NotionQueryResponse = self
            .send(
                "query_database",
                Method::POST,
                &format!("databases/{database_id}/query"),
                Some(&body),
            )
            .await?;
        Ok(resp
            .results
            .into_iter()
            .map(|page| PageId::new(page.id))
            .collect())
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: &PropertySet,
    ) -> DomainResult<PageId> {
        let body = NotionCreatePageRequest {
            parent: NotionDatabaseParent { database_id },
            properties,
        };
        let page: NotionPageRef = self
            .send("create_page", Method::POST, "pages", Some(&body))
            .await?;
        Ok(PageId::new(page.id))
    }

    async fn update_page(&self, page_id: &PageId, properties: &PropertySet) -> DomainResult<()> {
        let body = NotionUpdatePageRequest { properties };
        let _page: NotionPageRef = self
            .send(
                "update_page",
                Method::PATCH,
                &format!("pages/{page_id}"),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn append_block_children(
        &self,
        parent: &PageId,
        children: &[Block],
    ) -> DomainResult<()> {
        let body = NotionAppendChildrenRequest { children };
        let _resp: serde_json::Value = self
            .send(
                "append_block_children",
                Method::PATCH,
                &format!("blocks/{parent}/children"),
                Some(&body),
            )
            .await?;
        Ok(())
    }
}
