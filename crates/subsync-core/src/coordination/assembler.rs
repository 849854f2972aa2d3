//! Submission record assembly

use crate::types::{PullRequest, SubmissionRecord, WorkflowRunDetail};

/// Combine a pull request with its best run.
///
/// `passes_preliminary_checks` is true only for a completed, successful run.
pub fn assemble_submission(
    pull_request: PullRequest,
    best_run: Option<WorkflowRunDetail>,
) -> SubmissionRecord {
    let passes_preliminary_checks = best_run
        .as_ref()
        .is_some_and(WorkflowRunDetail::is_successful);

    SubmissionRecord {
        pr_number: pull_request.number,
        pr_id: pull_request.id,
        state: pull_request.state,
        submission_link: pull_request.html_url,
        github_username: pull_request.author,
        submission_time: pull_request.created_at,
        head_sha: pull_request.head_sha,
        passes_preliminary_checks,
        workflow_run: best_run,
    }
}
