//! Pull request listing

use crate::error::{Error, Result};
use crate::http::client::GitHubApiClient;
use crate::http::pagination::PageFetcher;
use crate::traits::{record_snapshot, Snapshot};
use crate::types::{PullRequest, PullRequestState};
use serde::Deserialize;
use serde_json::Value;

/// GitHub API pull request object, every field optional until validated
#[derive(Debug, Deserialize)]
struct RawPullRequest {
    id: Option<u64>,
    number: Option<u64>,
    state: Option<String>,
    html_url: Option<String>,
    user: Option<RawUser>,
    created_at: Option<String>,
    head: Option<RawHead>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHead {
    sha: Option<String>,
}

/// Validate one raw pull request entry.
///
/// Number and head SHA are required; everything else defaults.
pub fn parse_pull_request(value: &Value) -> Result<PullRequest> {
    let raw = RawPullRequest::deserialize(value)
        .map_err(|e| Error::MalformedRecord(format!("pull request entry: {}", e)))?;

    let number = raw
        .number
        .filter(|n| *n > 0)
        .ok_or_else(|| Error::MalformedRecord("pull request without number".to_string()))?;

    let head_sha = raw
        .head
        .and_then(|h| h.sha)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::MalformedRecord(format!("pull request #{} without head sha", number))
        })?;

    Ok(PullRequest {
        id: raw.id.unwrap_or_default(),
        number,
        state: PullRequestState::from_api(raw.state.as_deref().unwrap_or_default()),
        html_url: raw.html_url.unwrap_or_default(),
        author: raw.user.and_then(|u| u.login).filter(|l| !l.is_empty()),
        created_at: raw.created_at.unwrap_or_default(),
        head_sha,
    })
}

/// Lists every pull request of a repository
pub struct PullRequestLister<'a> {
    client: &'a GitHubApiClient,
}

impl<'a> PullRequestLister<'a> {
    /// Create a lister on a shared client
    pub fn new(client: &'a GitHubApiClient) -> Self {
        Self { client }
    }

    /// Fetch all pull requests (`state=all`), skipping malformed entries
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/pulls
    pub async fn list(&self, org: &str, repo: &str) -> Result<Vec<PullRequest>> {
        let url = self.client.endpoint(&format!("/repos/{}/{}/pulls", org, repo));
        let per_page = self.client.config().pull_request_page_size;

        tracing::info!(org, repo, "fetching pull requests");
        let raw = PageFetcher::new(self.client, url, per_page)
            .query("state", "all")
            .collect_all()
            .await?;

        let body = Value::Array(raw);
        record_snapshot(
            self.client.snapshots(),
            Snapshot::PullRequests { repo, body: &body },
        );

        let entries = body.as_array().map(Vec::as_slice).unwrap_or_default();
        let pulls: Vec<PullRequest> = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match parse_pull_request(entry) {
                Ok(pr) => Some(pr),
                Err(e) => {
                    tracing::warn!(org, repo, index, error = %e, "skipping pull request entry");
                    None
                }
            })
            .collect();

        tracing::info!(
            org,
            repo,
            found = pulls.len(),
            skipped = entries.len() - pulls.len(),
            "fetched pull requests"
        );
        Ok(pulls)
    }
}
