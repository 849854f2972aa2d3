//! # Subsync Core
//!
//! Aggregates coding-assignment submissions from the GitHub REST API.
//!
//! For every assignment the pipeline lists the repository's pull requests,
//! locates the workflow runs of each head commit, picks one canonical run
//! per pull request and assembles a normalized submission record:
//!
//! - **`http`**: the shared rate-limited client, pagination and the three
//!   API resources
//! - **`coordination`**: best-run selection, record assembly and the
//!   per-assignment orchestrator
//! - **`output`**: file-based snapshot and staging writers
//!
//! ## Example
//!
//! ```no_run
//! use subsync_core::{aggregate_submissions, AggregationConfig, AssignmentLoader};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AggregationConfig {
//!     token: std::env::var("GITHUB_TOKEN").ok(),
//!     ..Default::default()
//! };
//! let assignments = AssignmentLoader::from_path("assignments.yaml")?;
//!
//! let report = aggregate_submissions(&config, &assignments, None).await?;
//! println!("Submissions: {}", report.record_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod assignments;
pub mod coordination;
pub mod error;
pub mod http;
pub mod output;
pub mod traits;
pub mod types;

use std::sync::Arc;

pub use assignments::{AssignmentFilter, AssignmentLoader};
pub use coordination::AggregationOrchestrator;
pub use error::{Error, ErrorKind, Result};
pub use http::GitHubApiClient;
pub use output::{SnapshotWriter, StagingRow, StagingWriter};
pub use traits::{HostingApi, Snapshot, SnapshotSink, SubmissionSink};
pub use types::{
    AggregationConfig, Assignment, AssignmentFailure, AssignmentPhase, AssignmentSubmissions,
    BatchReport, PullRequest, PullRequestState, RunConclusion, RunStatus, SubmissionRecord,
    WorkflowRunDetail, WorkflowRunSummary,
};

/// Aggregate submissions for a batch of assignments
///
/// This is the main entry point for the library. It builds the GitHub
/// client from `config`, then runs every assignment through the
/// orchestrator. Raw API responses and final record sets go to `snapshots`
/// when one is given.
///
/// Only configuration problems surface as `Err`; per-assignment failures
/// are reported in the returned `BatchReport`.
pub async fn aggregate_submissions(
    config: &AggregationConfig,
    assignments: &[Assignment],
    snapshots: Option<Arc<dyn SnapshotSink>>,
) -> Result<BatchReport> {
    let mut client = GitHubApiClient::new(config.clone())?;
    if let Some(sink) = &snapshots {
        client = client.with_snapshots(Arc::clone(sink));
    }

    let mut orchestrator = AggregationOrchestrator::new(&client, config);
    if let Some(sink) = snapshots.as_deref() {
        orchestrator = orchestrator.with_snapshots(sink);
    }

    Ok(orchestrator.run(assignments).await)
}

/// Synchronous variant of `aggregate_submissions`
///
/// This creates a new Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn aggregate_submissions_sync(
    config: &AggregationConfig,
    assignments: &[Assignment],
    snapshots: Option<Arc<dyn SnapshotSink>>,
) -> Result<BatchReport> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(aggregate_submissions(config, assignments, snapshots))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        // Smoke test to ensure library compiles
        let _ = env!("CARGO_PKG_VERSION");
    }

    #[test]
    fn test_invalid_config_is_rejected_before_any_request() {
        let config = AggregationConfig {
            pull_request_page_size: 0,
            ..Default::default()
        };
        let result = aggregate_submissions_sync(&config, &[], None);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Config);
    }
}
