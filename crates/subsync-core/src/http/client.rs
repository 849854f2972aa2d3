//! GitHub REST API transport shared by every resource fetcher

use crate::error::{Error, Result};
use crate::http::pagination::parse_next_link;
use crate::http::pulls::PullRequestLister;
use crate::http::rate_limit::RateLimiter;
use crate::http::workflows::{WorkflowRunDetailFetcher, WorkflowRunLocator};
use crate::traits::{HostingApi, SnapshotSink};
use crate::types::{AggregationConfig, PullRequest, WorkflowRunDetail, WorkflowRunSummary};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use std::sync::Arc;

/// GitHub REST API version the response shapes are parsed against
pub const API_VERSION: &str = "2022-11-28";

/// One decoded response plus its continuation link
#[derive(Debug)]
pub(crate) struct JsonResponse {
    pub body: serde_json::Value,
    pub next: Option<String>,
}

/// GitHub API client: bearer credential, shared rate limiter, optional snapshots
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    config: AggregationConfig,
    limiter: RateLimiter,
    snapshots: Option<Arc<dyn SnapshotSink>>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("snapshots", &self.snapshots.is_some())
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a client from an explicit configuration
    pub fn new(config: AggregationConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .user_agent(concat!("subsync/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            limiter: RateLimiter::new(config.max_in_flight_requests, config.min_request_interval),
            config,
            snapshots: None,
        })
    }

    /// Attach an audit writer that receives every raw response
    pub fn with_snapshots(mut self, sink: Arc<dyn SnapshotSink>) -> Self {
        self.snapshots = Some(sink);
        self
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    pub(crate) fn snapshots(&self) -> Option<&dyn SnapshotSink> {
        self.snapshots.as_deref()
    }

    /// Absolute URL for an API path such as `/repos/o/r/pulls`
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource under the shared rate limit
    pub(crate) async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<JsonResponse> {
        let _permit = self.limiter.acquire().await?;

        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        tracing::debug!(url, "GET");
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("GitHub API request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok());
            if remaining == Some("0") || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(Error::RateLimitExceeded(format!(
                    "GitHub API rate limit exceeded ({}). Remaining: {}",
                    status,
                    remaining.unwrap_or("unknown")
                )));
            }
        }

        if !status.is_success() {
            return Err(Error::Transport(format!(
                "GitHub API returned error: {} for {}",
                status,
                response.url().path()
            )));
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_link);

        let body = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse GitHub API response: {}", e)))?;

        Ok(JsonResponse { body, next })
    }
}

impl HostingApi for GitHubApiClient {
    async fn list_pull_requests(&self, org: &str, repo: &str) -> Result<Vec<PullRequest>> {
        PullRequestLister::new(self).list(org, repo).await
    }

    async fn locate_workflow_runs(
        &self,
        org: &str,
        repo: &str,
        pr_number: u64,
        head_sha: &str,
    ) -> Result<Vec<WorkflowRunSummary>> {
        WorkflowRunLocator::new(self)
            .locate(org, repo, pr_number, head_sha)
            .await
    }

    async fn fetch_workflow_run(
        &self,
        org: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<WorkflowRunDetail> {
        WorkflowRunDetailFetcher::new(self).fetch(org, repo, run_id).await
    }
}
