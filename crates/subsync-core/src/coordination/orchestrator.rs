//! Assignment → pull request → workflow run aggregation

use crate::coordination::assembler::assemble_submission;
use crate::coordination::selector::select_best_run;
use crate::error::{Error, Result};
use crate::traits::{record_snapshot, HostingApi, Snapshot, SnapshotSink};
use crate::types::{
    AggregationConfig, Assignment, AssignmentFailure, AssignmentPhase, AssignmentSubmissions,
    BatchReport, PullRequest, SubmissionRecord, WorkflowRunDetail, WorkflowRunSummary,
};
use futures::future::try_join_all;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeMap;

/// Drives the pipeline for a batch of assignments.
///
/// Each assignment moves through
/// `Pending → FetchingPullRequests → {LocatingRuns → ResolvingRuns → Assembling}* → Completed | Failed`.
/// A failure abandons the rest of that assignment only.
pub struct AggregationOrchestrator<'a, A: HostingApi> {
    api: &'a A,
    config: &'a AggregationConfig,
    snapshots: Option<&'a dyn SnapshotSink>,
}

impl<'a, A: HostingApi> AggregationOrchestrator<'a, A> {
    /// Create an orchestrator over a hosting API
    pub fn new(api: &'a A, config: &'a AggregationConfig) -> Self {
        Self {
            api,
            config,
            snapshots: None,
        }
    }

    /// Send every completed record set to an audit writer
    pub fn with_snapshots(mut self, sink: &'a dyn SnapshotSink) -> Self {
        self.snapshots = Some(sink);
        self
    }

    /// Aggregate every assignment, collecting successes and failures
    pub async fn run(&self, assignments: &[Assignment]) -> BatchReport {
        let outcomes: Vec<_> = stream::iter(assignments)
            .map(|assignment| async move { (assignment.id, self.aggregate_assignment(assignment).await) })
            .buffered(self.config.assignment_concurrency.max(1))
            .collect()
            .await;

        let mut report = BatchReport::default();
        for (assignment_id, outcome) in outcomes {
            match outcome {
                Ok(submissions) => {
                    if report.completed.insert(assignment_id, submissions).is_some() {
                        tracing::warn!(assignment_id, "duplicate assignment id, keeping the later one");
                    }
                }
                Err(failure) => report.failed.push(failure),
            }
        }

        tracing::info!(
            completed = report.completed.len(),
            failed = report.failed.len(),
            records = report.record_count(),
            "batch finished"
        );
        report
    }

    /// Aggregate one assignment into its PR-number → record map
    #[tracing::instrument(
        skip_all,
        fields(assignment_id = assignment.id, outcome = tracing::field::Empty)
    )]
    pub async fn aggregate_assignment(
        &self,
        assignment: &Assignment,
    ) -> std::result::Result<AssignmentSubmissions, AssignmentFailure> {
        let span = tracing::Span::current();
        let fail = |phase: AssignmentPhase, error: Error| {
            span.record("outcome", AssignmentPhase::Failed.as_str());
            tracing::error!(phase = %phase, error = %error, "assignment failed");
            AssignmentFailure {
                assignment_id: assignment.id,
                phase,
                error,
            }
        };

        let (org, repo) = assignment
            .locator()
            .map_err(|e| fail(AssignmentPhase::Pending, e))?;

        tracing::info!(org, repo, phase = %AssignmentPhase::FetchingPullRequests, "processing assignment");
        let pulls = self
            .api
            .list_pull_requests(org, repo)
            .await
            .map_err(|e| fail(AssignmentPhase::FetchingPullRequests, e))?;

        let records: Vec<SubmissionRecord> = stream::iter(pulls)
            .map(|pull_request| self.process_pull_request(org, repo, pull_request))
            .buffered(self.config.pull_request_concurrency.max(1))
            .try_collect()
            .await
            .map_err(|(phase, e)| fail(phase, e))?;

        let mut pull_requests = BTreeMap::new();
        for record in records {
            let number = record.pr_number;
            if pull_requests.insert(number, record).is_some() {
                tracing::warn!(pr_number = number, "duplicate pull request number, keeping the later entry");
            }
        }

        let submissions = AssignmentSubmissions {
            assignment: assignment.clone(),
            pull_requests,
        };

        match serde_json::to_value(&submissions) {
            Ok(body) => record_snapshot(
                self.snapshots,
                Snapshot::Submissions {
                    assignment_id: assignment.id,
                    body: &body,
                },
            ),
            Err(e) => tracing::warn!(error = %e, "failed to encode submissions snapshot"),
        }

        span.record("outcome", AssignmentPhase::Completed.as_str());
        tracing::info!(
            submissions = submissions.pull_requests.len(),
            "assignment aggregated"
        );
        Ok(submissions)
    }

    #[tracing::instrument(skip_all, fields(pr_number = pull_request.number))]
    async fn process_pull_request(
        &self,
        org: &str,
        repo: &str,
        pull_request: PullRequest,
    ) -> std::result::Result<SubmissionRecord, (AssignmentPhase, Error)> {
        let summaries = self
            .api
            .locate_workflow_runs(org, repo, pull_request.number, &pull_request.head_sha)
            .await
            .map_err(|e| (AssignmentPhase::LocatingRuns, e))?;

        let details = self
            .resolve_runs(org, repo, &summaries)
            .await
            .map_err(|e| (AssignmentPhase::ResolvingRuns, e))?;

        let best_run = select_best_run(details);
        tracing::debug!(
            phase = %AssignmentPhase::Assembling,
            candidates = summaries.len(),
            best_run = best_run.as_ref().map(|r| r.run_id),
            "resolved best run"
        );
        Ok(assemble_submission(pull_request, best_run))
    }

    /// Fetch every run's detail, keeping summary order; malformed runs are skipped
    async fn resolve_runs(
        &self,
        org: &str,
        repo: &str,
        summaries: &[WorkflowRunSummary],
    ) -> Result<Vec<WorkflowRunDetail>> {
        let fetched = try_join_all(summaries.iter().map(|summary| async move {
            match self.api.fetch_workflow_run(org, repo, summary.id).await {
                Ok(detail) => Ok(Some(detail)),
                Err(e) if e.is_malformed() => {
                    tracing::warn!(run_id = summary.id, error = %e, "skipping workflow run");
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        }))
        .await?;

        Ok(fetched.into_iter().flatten().collect())
    }
}
