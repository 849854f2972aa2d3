//! Trait seams between the pipeline and its collaborators
//!
//! `HostingApi` is generic (`impl Future + Send` returns). The sinks are
//! synchronous and object-safe, passed around as `&dyn`.

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::Result;
use crate::types::{Assignment, PullRequest, SubmissionRecord, WorkflowRunDetail, WorkflowRunSummary};

/// Read-only access to the three hosting-API resources the pipeline needs
pub trait HostingApi: Sync {
    /// List every pull request (any state) of a repository, in API order.
    ///
    /// Malformed entries are already dropped.
    fn list_pull_requests(
        &self,
        org: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Vec<PullRequest>>> + Send;

    /// List workflow runs triggered for a pull request's head commit (single page)
    fn locate_workflow_runs(
        &self,
        org: &str,
        repo: &str,
        pr_number: u64,
        head_sha: &str,
    ) -> impl Future<Output = Result<Vec<WorkflowRunSummary>>> + Send;

    /// Fetch one workflow run in full
    fn fetch_workflow_run(
        &self,
        org: &str,
        repo: &str,
        run_id: u64,
    ) -> impl Future<Output = Result<WorkflowRunDetail>> + Send;
}

/// A raw API response or final record set handed to the audit writer
#[derive(Debug, Clone, Copy)]
pub enum Snapshot<'a> {
    /// Combined raw entries of a pull request listing
    PullRequests {
        /// Repository name
        repo: &'a str,
        /// JSON array of raw entries
        body: &'a serde_json::Value,
    },
    /// Raw workflow run listing for one pull request's head SHA
    WorkflowRuns {
        /// Repository name
        repo: &'a str,
        /// Pull request the listing was made for
        pr_number: u64,
        /// Head commit the listing was filtered by
        head_sha: &'a str,
        /// Raw response body
        body: &'a serde_json::Value,
    },
    /// Raw detail of one workflow run
    WorkflowRun {
        /// Repository name
        repo: &'a str,
        /// Run identifier
        run_id: u64,
        /// Raw response body
        body: &'a serde_json::Value,
    },
    /// Final record set of an assignment
    Submissions {
        /// Assignment identifier
        assignment_id: i64,
        /// Serialized `AssignmentSubmissions`
        body: &'a serde_json::Value,
    },
}

/// Optional audit writer; the pipeline logs and ignores its failures
pub trait SnapshotSink: Send + Sync {
    /// Persist one snapshot
    fn write(&self, snapshot: Snapshot<'_>) -> Result<()>;
}

/// Receives completed submission records for persistence
pub trait SubmissionSink {
    /// Accept the full record map of one assignment
    fn accept(
        &mut self,
        assignment: &Assignment,
        submissions: &BTreeMap<u64, SubmissionRecord>,
    ) -> Result<()>;
}

/// Hand a snapshot to an optional sink, logging failures
pub(crate) fn record_snapshot(sink: Option<&dyn SnapshotSink>, snapshot: Snapshot<'_>) {
    if let Some(sink) = sink {
        if let Err(e) = sink.write(snapshot) {
            tracing::warn!(error = %e, "failed to write snapshot");
        }
    }
}
