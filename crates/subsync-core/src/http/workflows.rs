//! GitHub Actions workflow run lookups

use crate::error::{Error, Result};
use crate::http::client::GitHubApiClient;
use crate::traits::{record_snapshot, Snapshot};
use crate::types::{RunConclusion, RunStatus, WorkflowRunDetail, WorkflowRunSummary};
use serde::Deserialize;
use serde_json::Value;

/// GitHub API workflow run entry from the runs listing
#[derive(Debug, Deserialize)]
struct RawRunSummary {
    id: Option<u64>,
    head_sha: Option<String>,
}

/// GitHub API workflow run object
#[derive(Debug, Deserialize)]
struct RawWorkflowRun {
    run_number: Option<u64>,
    event: Option<String>,
    status: Option<String>,
    conclusion: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    html_url: Option<String>,
    head_repository: Option<RawHeadRepository>,
}

#[derive(Debug, Deserialize)]
struct RawHeadRepository {
    full_name: Option<String>,
    fork: Option<bool>,
}

/// Validate one entry of a runs listing; the run id is required
pub fn parse_run_summary(value: &Value) -> Result<WorkflowRunSummary> {
    let raw = RawRunSummary::deserialize(value)
        .map_err(|e| Error::MalformedRecord(format!("workflow run entry: {}", e)))?;
    let id = raw
        .id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::MalformedRecord("workflow run without id".to_string()))?;
    Ok(WorkflowRunSummary {
        id,
        head_sha: raw.head_sha,
    })
}

/// Validate a workflow run detail body; `status` is required
pub fn parse_workflow_run(run_id: u64, value: &Value) -> Result<WorkflowRunDetail> {
    let raw = RawWorkflowRun::deserialize(value)
        .map_err(|e| Error::MalformedRecord(format!("workflow run {}: {}", run_id, e)))?;

    let status = raw
        .status
        .as_deref()
        .map(RunStatus::from_api)
        .ok_or_else(|| Error::MalformedRecord(format!("workflow run {} has no status", run_id)))?;

    let (head_repository, fork) = match raw.head_repository {
        Some(repo) => (repo.full_name.unwrap_or_default(), repo.fork.unwrap_or(false)),
        None => (String::new(), false),
    };

    Ok(WorkflowRunDetail {
        run_id,
        run_number: raw.run_number.unwrap_or_default(),
        event: raw.event.unwrap_or_default(),
        status,
        conclusion: raw.conclusion.as_deref().map(RunConclusion::from_api),
        created_at: raw.created_at.unwrap_or_default(),
        updated_at: raw.updated_at.unwrap_or_default(),
        workflow_url: raw.html_url.unwrap_or_default(),
        head_repository,
        fork,
    })
}

/// Finds the workflow runs triggered for a head commit
pub struct WorkflowRunLocator<'a> {
    client: &'a GitHubApiClient,
}

impl<'a> WorkflowRunLocator<'a> {
    /// Create a locator on a shared client
    pub fn new(client: &'a GitHubApiClient) -> Self {
        Self { client }
    }

    /// List runs for `head_sha`, first page only; a `next` link is not followed.
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/runs
    /// Query params: head_sha, per_page, page
    pub async fn locate(
        &self,
        org: &str,
        repo: &str,
        pr_number: u64,
        head_sha: &str,
    ) -> Result<Vec<WorkflowRunSummary>> {
        let url = self
            .client
            .endpoint(&format!("/repos/{}/{}/actions/runs", org, repo));
        let per_page = self.client.config().workflow_run_page_size;

        let response = self
            .client
            .get_json(
                &url,
                &[
                    ("per_page", per_page.to_string()),
                    ("page", "1".to_string()),
                    ("head_sha", head_sha.to_string()),
                ],
            )
            .await?;

        record_snapshot(
            self.client.snapshots(),
            Snapshot::WorkflowRuns {
                repo,
                pr_number,
                head_sha,
                body: &response.body,
            },
        );

        let entries: &[Value] = match response.body.get("workflow_runs") {
            Some(Value::Array(entries)) => entries.as_slice(),
            _ => &[],
        };

        let runs: Vec<WorkflowRunSummary> = entries
            .iter()
            .filter_map(|entry| match parse_run_summary(entry) {
                Ok(run) => Some(run),
                Err(e) => {
                    tracing::warn!(repo, head_sha, error = %e, "dropping workflow run entry");
                    None
                }
            })
            .collect();

        tracing::debug!(repo, head_sha, found = runs.len(), "located workflow runs");
        Ok(runs)
    }
}

/// Fetches one workflow run in full
pub struct WorkflowRunDetailFetcher<'a> {
    client: &'a GitHubApiClient,
}

impl<'a> WorkflowRunDetailFetcher<'a> {
    /// Create a fetcher on a shared client
    pub fn new(client: &'a GitHubApiClient) -> Self {
        Self { client }
    }

    /// Get a specific workflow run
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/runs/{run_id}
    pub async fn fetch(&self, org: &str, repo: &str, run_id: u64) -> Result<WorkflowRunDetail> {
        let url = self
            .client
            .endpoint(&format!("/repos/{}/{}/actions/runs/{}", org, repo, run_id));

        let response = self.client.get_json(&url, &[]).await?;

        record_snapshot(
            self.client.snapshots(),
            Snapshot::WorkflowRun {
                repo,
                run_id,
                body: &response.body,
            },
        );

        parse_workflow_run(run_id, &response.body)
    }
}
