//! Best-run selection over the workflow runs of one head commit

use crate::types::WorkflowRunDetail;

/// Index of the canonical run among `runs`.
///
/// Completed successful runs win over everything else; within the winning
/// group the greatest `updated_at` wins, comparing the ISO-8601 strings
/// lexicographically. Ties keep the earliest run in input order.
pub fn best_run_index(runs: &[WorkflowRunDetail]) -> Option<usize> {
    latest(runs.iter().enumerate().filter(|(_, run)| run.is_successful()))
        .or_else(|| latest(runs.iter().enumerate()))
}

/// Take the canonical run out of `runs`, or `None` if empty
pub fn select_best_run(mut runs: Vec<WorkflowRunDetail>) -> Option<WorkflowRunDetail> {
    best_run_index(&runs).map(|index| runs.swap_remove(index))
}

#[inline]
fn latest<'a>(runs: impl Iterator<Item = (usize, &'a WorkflowRunDetail)>) -> Option<usize> {
    runs.fold(None::<(usize, &WorkflowRunDetail)>, |best, (index, run)| match best {
        // strictly greater only, so the first of equal timestamps stays
        Some((_, current)) if run.updated_at <= current.updated_at => best,
        _ => Some((index, run)),
    })
    .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RunConclusion, RunStatus};

    fn run(id: u64, updated_at: &str, status: &str, conclusion: Option<&str>) -> WorkflowRunDetail {
        WorkflowRunDetail {
            run_id: id,
            run_number: id,
            event: "pull_request".to_string(),
            status: RunStatus::from_api(status),
            conclusion: conclusion.map(RunConclusion::from_api),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: updated_at.to_string(),
            workflow_url: format!("https://github.com/org/repo/actions/runs/{}", id),
            head_repository: "student/repo".to_string(),
            fork: false,
        }
    }

    #[test]
    fn test_latest_success_wins_over_newer_failure() {
        let runs = vec![
            run(1, "2024-01-01T10:00:00Z", "completed", Some("success")),
            run(2, "2024-01-01T11:00:00Z", "completed", Some("failure")),
            run(3, "2024-01-01T12:00:00Z", "completed", Some("success")),
        ];
        assert_eq!(select_best_run(runs).map(|r| r.run_id), Some(3));
    }

    #[test]
    fn test_older_success_beats_newest_failure() {
        let runs = vec![
            run(1, "2024-01-01T10:00:00Z", "completed", Some("success")),
            run(2, "2024-01-01T11:00:00Z", "completed", Some("failure")),
        ];
        assert_eq!(select_best_run(runs).map(|r| r.run_id), Some(1));
    }

    #[test]
    fn test_no_success_falls_back_to_most_recent() {
        let runs = vec![
            run(1, "2024-01-01T10:00:00Z", "completed", Some("failure")),
            run(2, "2024-01-01T12:00:00Z", "in_progress", None),
            run(3, "2024-01-01T11:00:00Z", "completed", Some("cancelled")),
        ];
        assert_eq!(select_best_run(runs).map(|r| r.run_id), Some(2));
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        assert_eq!(best_run_index(&[]), None);
        assert_eq!(select_best_run(Vec::new()), None);
    }

    #[test]
    fn test_tie_keeps_first_in_input_order() {
        let runs = vec![
            run(7, "2024-01-01T10:00:00Z", "completed", Some("success")),
            run(8, "2024-01-01T10:00:00Z", "completed", Some("success")),
        ];
        assert_eq!(select_best_run(runs).map(|r| r.run_id), Some(7));

        let runs = vec![
            run(9, "2024-01-01T10:00:00Z", "completed", Some("failure")),
            run(10, "2024-01-01T10:00:00Z", "queued", None),
        ];
        assert_eq!(select_best_run(runs).map(|r| r.run_id), Some(9));
    }

    #[test]
    fn test_success_conclusion_without_completed_status_is_not_success() {
        let runs = vec![
            run(1, "2024-01-01T10:00:00Z", "completed", Some("failure")),
            run(2, "2024-01-01T09:00:00Z", "in_progress", Some("success")),
        ];
        assert_eq!(select_best_run(runs).map(|r| r.run_id), Some(1));
    }

    #[test]
    fn test_missing_timestamp_sorts_first() {
        let runs = vec![
            run(1, "", "completed", Some("failure")),
            run(2, "2024-01-01T09:00:00Z", "completed", Some("failure")),
        ];
        assert_eq!(best_run_index(&runs), Some(1));
    }
}
