//! Core type definitions for assignments, pull requests and workflow runs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// A tracked assignment, as read from the assignment store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment identifier
    #[serde(rename = "assignment_id")]
    pub id: i64,
    /// Human-readable title
    #[serde(rename = "assignment_title", default)]
    pub title: Option<String>,
    /// Link students submit against
    #[serde(rename = "assignment_link", default)]
    pub link: Option<String>,
    /// GitHub organization hosting the assignment repository
    #[serde(default)]
    pub github_org: Option<String>,
    /// Repository name within the organization
    #[serde(default)]
    pub repo_name: Option<String>,
}

impl Assignment {
    /// Borrow organization and repository, both non-empty.
    ///
    /// Returns `Error::InputConfiguration` when either is missing.
    pub fn locator(&self) -> crate::Result<(&str, &str)> {
        let org = self.github_org.as_deref().filter(|s| !s.is_empty());
        let repo = self.repo_name.as_deref().filter(|s| !s.is_empty());
        match (org, repo) {
            (Some(org), Some(repo)) => Ok((org, repo)),
            _ => Err(crate::Error::InputConfiguration(format!(
                "assignment {} is missing GitHub organization or repository name",
                self.id
            ))),
        }
    }
}

/// Pull request state as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestState {
    /// Open pull request
    Open,
    /// Closed pull request
    Closed,
    /// Merged pull request
    Merged,
    /// Any other value, kept verbatim
    Other(String),
}

impl PullRequestState {
    /// Parse the platform's state string (case-sensitive)
    pub fn from_api(s: &str) -> Self {
        match s {
            "open" => Self::Open,
            "closed" => Self::Closed,
            "merged" => Self::Merged,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Merged => "merged",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for PullRequestState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PullRequestState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self::from_api(&s))
    }
}

/// A validated pull request snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Platform-wide identifier
    pub id: u64,
    /// Repository-scoped number, the correlation key
    pub number: u64,
    /// Open/closed/merged
    pub state: PullRequestState,
    /// Public URL of the pull request
    pub html_url: String,
    /// Author handle; `None` for deleted accounts
    pub author: Option<String>,
    /// Creation timestamp (ISO-8601)
    pub created_at: String,
    /// Head commit SHA
    pub head_sha: String,
}

/// Minimal workflow run entry from the runs listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunSummary {
    /// Run identifier
    pub id: u64,
    /// Commit the run was triggered for
    pub head_sha: Option<String>,
}

/// Workflow run lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Waiting in queue
    Queued,
    /// Currently executing
    InProgress,
    /// Finished; conclusion is meaningful
    Completed,
    /// Waiting for an approval or environment
    Waiting,
    /// Requested but not yet queued
    Requested,
    /// Pending a concurrency slot
    Pending,
    /// Any other value, kept verbatim
    Other(String),
}

impl RunStatus {
    /// Parse the platform's status string (case-sensitive)
    pub fn from_api(s: &str) -> Self {
        match s {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "waiting" => Self::Waiting,
            "requested" => Self::Requested,
            "pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Waiting => "waiting",
            Self::Requested => "requested",
            Self::Pending => "pending",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self::from_api(&s))
    }
}

/// Workflow run outcome, only meaningful once completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunConclusion {
    /// All jobs passed
    Success,
    /// At least one job failed
    Failure,
    /// Run was cancelled
    Cancelled,
    /// Run was skipped
    Skipped,
    /// Run exceeded its time limit
    TimedOut,
    /// Neutral result
    Neutral,
    /// Needs manual action
    ActionRequired,
    /// Superseded before completing
    Stale,
    /// Run failed to start
    StartupFailure,
    /// Any other value, kept verbatim
    Other(String),
}

impl RunConclusion {
    /// Parse the platform's conclusion string (case-sensitive)
    pub fn from_api(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "cancelled" => Self::Cancelled,
            "skipped" => Self::Skipped,
            "timed_out" => Self::TimedOut,
            "neutral" => Self::Neutral,
            "action_required" => Self::ActionRequired,
            "stale" => Self::Stale,
            "startup_failure" => Self::StartupFailure,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
            Self::TimedOut => "timed_out",
            Self::Neutral => "neutral",
            Self::ActionRequired => "action_required",
            Self::Stale => "stale",
            Self::StartupFailure => "startup_failure",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for RunConclusion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunConclusion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self::from_api(&s))
    }
}

/// Full detail of one workflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRunDetail {
    /// Run identifier
    pub run_id: u64,
    /// Per-workflow run counter
    pub run_number: u64,
    /// Triggering event (push, pull_request, ...)
    pub event: String,
    /// Lifecycle state
    pub status: RunStatus,
    /// Outcome, `None` until completed
    pub conclusion: Option<RunConclusion>,
    /// Creation timestamp (ISO-8601)
    pub created_at: String,
    /// Last update timestamp (ISO-8601), the selection key
    pub updated_at: String,
    /// Public URL of the run
    pub workflow_url: String,
    /// Full name of the repository the head commit came from
    pub head_repository: String,
    /// Whether the head repository is a fork
    pub fork: bool,
}

impl WorkflowRunDetail {
    /// Completed with a successful conclusion
    #[inline]
    pub fn is_successful(&self) -> bool {
        self.status == RunStatus::Completed && self.conclusion == Some(RunConclusion::Success)
    }
}

/// One pull request with its resolved CI outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Pull request number
    pub pr_number: u64,
    /// Pull request identifier
    pub pr_id: u64,
    /// Pull request state
    pub state: PullRequestState,
    /// Public URL of the pull request
    pub submission_link: String,
    /// Author handle
    pub github_username: Option<String>,
    /// Pull request creation time
    pub submission_time: String,
    /// Head commit SHA
    pub head_sha: String,
    /// Best run completed with success
    pub passes_preliminary_checks: bool,
    /// Best run, serialized as `{}` when none was found
    #[serde(
        serialize_with = "serialize_optional_run",
        deserialize_with = "deserialize_optional_run",
        default
    )]
    pub workflow_run: Option<WorkflowRunDetail>,
}

fn serialize_optional_run<S: Serializer>(
    run: &Option<WorkflowRunDetail>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    match run {
        Some(run) => run.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordedRun {
    Run(WorkflowRunDetail),
    Empty(EmptyObject),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyObject {}

fn deserialize_optional_run<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<WorkflowRunDetail>, D::Error> {
    Ok(match Option::<RecordedRun>::deserialize(deserializer)? {
        Some(RecordedRun::Run(run)) => Some(run),
        Some(RecordedRun::Empty(_)) | None => None,
    })
}

/// Completed submissions for one assignment, keyed by pull request number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentSubmissions {
    /// The assignment the submissions belong to
    #[serde(flatten)]
    pub assignment: Assignment,
    /// Pull request number to record
    pub pull_requests: BTreeMap<u64, SubmissionRecord>,
}

/// On-disk layout of a record set; map keys are strings in JSON
#[derive(Deserialize)]
struct RecordSetFile {
    #[serde(flatten)]
    assignment: Assignment,
    pull_requests: BTreeMap<String, SubmissionRecord>,
}

impl AssignmentSubmissions {
    /// Parse a record set previously written as `final_assignment_submissions_{id}.json`.
    ///
    /// Records are re-keyed by their own `pr_number`.
    pub fn from_json(content: &str) -> crate::Result<Self> {
        let file: RecordSetFile = serde_json::from_str(content)?;
        Ok(Self {
            assignment: file.assignment,
            pull_requests: file
                .pull_requests
                .into_values()
                .map(|record| (record.pr_number, record))
                .collect(),
        })
    }

    /// Read and parse a record set file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Config(format!(
                "Failed to read record set '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }
}

/// Processing phase of one assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentPhase {
    /// Not started
    Pending,
    /// Listing pull requests
    FetchingPullRequests,
    /// Listing workflow runs for a head SHA
    LocatingRuns,
    /// Fetching run details and selecting the best run
    ResolvingRuns,
    /// Building the submission record
    Assembling,
    /// All pull requests processed
    Completed,
    /// Abandoned after an error
    Failed,
}

impl AssignmentPhase {
    /// Get string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::FetchingPullRequests => "fetching_pull_requests",
            Self::LocatingRuns => "locating_runs",
            Self::ResolvingRuns => "resolving_runs",
            Self::Assembling => "assembling",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for AssignmentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An assignment that could not be aggregated
#[derive(Debug)]
pub struct AssignmentFailure {
    /// Assignment identifier
    pub assignment_id: i64,
    /// Phase the assignment was in when it failed
    pub phase: AssignmentPhase,
    /// The underlying error
    pub error: crate::Error,
}

/// Outcome of a whole batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully aggregated assignments by id
    pub completed: BTreeMap<i64, AssignmentSubmissions>,
    /// Failed assignments, in input order
    pub failed: Vec<AssignmentFailure>,
}

impl BatchReport {
    /// True when no assignment failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of submission records across completed assignments
    pub fn record_count(&self) -> usize {
        self.completed.values().map(|a| a.pull_requests.len()).sum()
    }

    /// Terminal phase of an assignment: `Completed`, `Failed`, or `Pending` if absent
    pub fn outcome(&self, assignment_id: i64) -> AssignmentPhase {
        if self.completed.contains_key(&assignment_id) {
            AssignmentPhase::Completed
        } else if self.failed.iter().any(|f| f.assignment_id == assignment_id) {
            AssignmentPhase::Failed
        } else {
            AssignmentPhase::Pending
        }
    }
}

/// Aggregation configuration, threaded explicitly into the client and orchestrator
#[derive(Clone)]
pub struct AggregationConfig {
    /// GitHub REST API root
    pub api_url: String,
    /// Bearer token
    pub token: Option<String>,
    /// Page size for the pull request listing
    pub pull_request_page_size: u32,
    /// Page size for the per-SHA workflow run listing (single page)
    pub workflow_run_page_size: u32,
    /// Safety limit on pages followed for one listing
    pub max_pages: u32,
    /// Assignments processed concurrently
    pub assignment_concurrency: usize,
    /// Pull requests processed concurrently within one assignment
    pub pull_request_concurrency: usize,
    /// Hosting API requests in flight at once, shared by everything
    pub max_in_flight_requests: usize,
    /// Minimum spacing between request starts
    pub min_request_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            pull_request_page_size: 100,
            workflow_run_page_size: 20,
            max_pages: 1000,
            assignment_concurrency: 1,
            pull_request_concurrency: 1,
            max_in_flight_requests: 1,
            min_request_interval: Duration::ZERO,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for AggregationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregationConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("pull_request_page_size", &self.pull_request_page_size)
            .field("workflow_run_page_size", &self.workflow_run_page_size)
            .field("max_pages", &self.max_pages)
            .field("assignment_concurrency", &self.assignment_concurrency)
            .field("pull_request_concurrency", &self.pull_request_concurrency)
            .field("max_in_flight_requests", &self.max_in_flight_requests)
            .field("min_request_interval", &self.min_request_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AggregationConfig {
    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(crate::Error::Config("api_url must not be empty".to_string()));
        }
        if self.pull_request_page_size == 0 || self.workflow_run_page_size == 0 {
            return Err(crate::Error::Config("page sizes must be at least 1".to_string()));
        }
        if self.max_pages == 0 {
            return Err(crate::Error::Config("max_pages must be at least 1".to_string()));
        }
        if self.assignment_concurrency == 0
            || self.pull_request_concurrency == 0
            || self.max_in_flight_requests == 0
        {
            return Err(crate::Error::Config(
                "concurrency limits must be at least 1".to_string(),
            ));
        }
        if matches!(&self.token, Some(t) if t.trim().is_empty()) {
            return Err(crate::Error::Config("token must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(status: &str, conclusion: Option<&str>) -> WorkflowRunDetail {
        WorkflowRunDetail {
            run_id: 1,
            run_number: 1,
            event: "pull_request".to_string(),
            status: RunStatus::from_api(status),
            conclusion: conclusion.map(RunConclusion::from_api),
            created_at: "2024-01-01T09:55:00Z".to_string(),
            updated_at: "2024-01-01T10:00:00Z".to_string(),
            workflow_url: "https://github.com/org/repo/actions/runs/1".to_string(),
            head_repository: "student/repo".to_string(),
            fork: true,
        }
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for s in ["queued", "in_progress", "completed", "waiting", "requested", "pending"] {
            assert_eq!(RunStatus::from_api(s).as_str(), s);
        }
        assert_eq!(RunStatus::from_api("COMPLETED"), RunStatus::Other("COMPLETED".into()));
    }

    #[test]
    fn test_conclusion_unknown_kept_verbatim() {
        assert_eq!(RunConclusion::from_api("success"), RunConclusion::Success);
        assert_eq!(RunConclusion::from_api("timed_out"), RunConclusion::TimedOut);
        let other = RunConclusion::from_api("brand_new");
        assert_eq!(other.as_str(), "brand_new");
    }

    #[test]
    fn test_is_successful_requires_completed() {
        assert!(detail("completed", Some("success")).is_successful());
        assert!(!detail("completed", Some("failure")).is_successful());
        assert!(!detail("in_progress", Some("success")).is_successful());
        assert!(!detail("completed", None).is_successful());
    }

    #[test]
    fn test_record_serializes_empty_run_as_object() {
        let record = SubmissionRecord {
            pr_number: 2,
            pr_id: 200,
            state: PullRequestState::Open,
            submission_link: "https://github.com/org/repo/pull/2".to_string(),
            github_username: Some("student".to_string()),
            submission_time: "2024-01-02T00:00:00Z".to_string(),
            head_sha: "bbb".to_string(),
            passes_preliminary_checks: false,
            workflow_run: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["workflow_run"], serde_json::json!({}));
        assert_eq!(json["state"], "open");
    }

    #[test]
    fn test_record_serializes_run_fields() {
        let record = SubmissionRecord {
            pr_number: 1,
            pr_id: 100,
            state: PullRequestState::Closed,
            submission_link: "https://github.com/org/repo/pull/1".to_string(),
            github_username: None,
            submission_time: "2024-01-01T00:00:00Z".to_string(),
            head_sha: "aaa".to_string(),
            passes_preliminary_checks: true,
            workflow_run: Some(detail("completed", Some("success"))),
        };
        let json = serde_json::to_value(&record).unwrap();
        let run = &json["workflow_run"];
        assert_eq!(run["status"], "completed");
        assert_eq!(run["conclusion"], "success");
        assert_eq!(run["head_repository"], "student/repo");
        assert_eq!(run["fork"], true);
        assert!(json["github_username"].is_null());
    }

    #[test]
    fn test_assignment_locator_requires_org_and_repo() {
        let mut assignment = Assignment {
            id: 7,
            title: None,
            link: None,
            github_org: Some("org".to_string()),
            repo_name: None,
        };
        let err = assignment.locator().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InputConfiguration);

        assignment.repo_name = Some(String::new());
        assert!(assignment.locator().is_err());

        assignment.repo_name = Some("repo".to_string());
        assert_eq!(assignment.locator().unwrap(), ("org", "repo"));
    }

    #[test]
    fn test_config_default_matches_reference_behavior() {
        let config = AggregationConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.pull_request_page_size, 100);
        assert_eq!(config.workflow_run_page_size, 20);
        assert_eq!(config.max_in_flight_requests, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_rejects_zero_limits() {
        let config = AggregationConfig {
            pull_request_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AggregationConfig {
            workflow_run_page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AggregationConfig {
            token: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = AggregationConfig {
            token: Some("ghp_ConfigSecret42".to_string()),
            ..Default::default()
        };
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("ghp_ConfigSecret42"));
        assert!(debug_output.contains("<redacted>"));
    }

    #[test]
    fn test_batch_report_counts() {
        let mut report = BatchReport::default();
        assert!(report.is_complete());
        report.failed.push(AssignmentFailure {
            assignment_id: 1,
            phase: AssignmentPhase::LocatingRuns,
            error: crate::Error::Transport("boom".into()),
        });
        assert!(!report.is_complete());
        assert_eq!(report.record_count(), 0);
        assert_eq!(report.outcome(1), AssignmentPhase::Failed);
        assert_eq!(report.outcome(2), AssignmentPhase::Pending);
    }

    fn recorded_set() -> &'static str {
        r#"{
          "assignment_id": 12,
          "assignment_title": "Trees",
          "assignment_link": null,
          "github_org": "org",
          "repo_name": "trees",
          "pull_requests": {
            "3": {
              "pr_number": 3, "pr_id": 300, "state": "merged",
              "submission_link": "https://github.com/org/trees/pull/3",
              "github_username": "alice", "submission_time": "2024-01-03T00:00:00Z",
              "head_sha": "ccc", "passes_preliminary_checks": true,
              "workflow_run": {
                "run_id": 9, "run_number": 2, "event": "pull_request",
                "status": "completed", "conclusion": "success",
                "created_at": "2024-01-03T00:01:00Z", "updated_at": "2024-01-03T00:05:00Z",
                "workflow_url": "https://github.com/org/trees/actions/runs/9",
                "head_repository": "alice/trees", "fork": true
              }
            },
            "4": {
              "pr_number": 4, "pr_id": 400, "state": "open",
              "submission_link": "https://github.com/org/trees/pull/4",
              "github_username": null, "submission_time": "2024-01-04T00:00:00Z",
              "head_sha": "ddd", "passes_preliminary_checks": false,
              "workflow_run": {}
            }
          }
        }"#
    }

    #[test]
    fn test_record_set_from_json() {
        let set = AssignmentSubmissions::from_json(recorded_set()).unwrap();
        assert_eq!(set.assignment.id, 12);
        assert_eq!(set.assignment.repo_name.as_deref(), Some("trees"));

        let merged = &set.pull_requests[&3];
        assert_eq!(merged.state, PullRequestState::Merged);
        let run = merged.workflow_run.as_ref().unwrap();
        assert!(run.is_successful());
        assert_eq!(run.head_repository, "alice/trees");

        let open = &set.pull_requests[&4];
        assert_eq!(open.workflow_run, None);
        assert_eq!(open.github_username, None);
    }

    #[test]
    fn test_record_set_written_form_reads_back() {
        let set = AssignmentSubmissions::from_json(recorded_set()).unwrap();
        let written = serde_json::to_string_pretty(&set).unwrap();
        assert_eq!(AssignmentSubmissions::from_json(&written).unwrap(), set);
    }

    #[test]
    fn test_record_set_rejects_bad_run() {
        let broken = recorded_set().replace(r#""workflow_run": {}"#, r#""workflow_run": {"run_id": "x"}"#);
        let err = AssignmentSubmissions::from_json(&broken).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Serialization);
    }
}
