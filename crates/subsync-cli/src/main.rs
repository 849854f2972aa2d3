//! subsync CLI - collect assignment submissions and their CI outcomes

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod telemetry;

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use subsync_core::{
    aggregate_submissions, AggregationConfig, Assignment, AssignmentFilter, AssignmentLoader,
    AssignmentSubmissions, BatchReport, SnapshotSink, SnapshotWriter, StagingWriter,
    SubmissionSink,
};

const STAGING_FILE: &str = "assignment_submissions_staging.json";

/// Exit code when some assignments failed but the rest were staged
const EXIT_PARTIAL: i32 = 2;

#[derive(Parser)]
#[command(name = "subsync", version, about = "Assignment submission aggregation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Aggregate submissions and write staging rows
    Collect(CollectArgs),
}

#[derive(clap::Args)]
struct CollectArgs {
    /// YAML or JSON file of assignments
    #[arg(long, env = "SUBSYNC_ASSIGNMENTS")]
    assignments: PathBuf,

    /// Only assignments of this organization
    #[arg(long, env = "GIT_ORG")]
    org: Option<String>,

    /// Only assignments of this repository (case-insensitive)
    #[arg(long, env = "GIT_REPO")]
    repo: Option<String>,

    /// GitHub token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub REST API root (defaults to https://api.github.com)
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Stage a previously written record set instead of calling the API
    #[arg(long, env = "SUBSYNC_JSON_PATH")]
    from_json: Option<PathBuf>,

    /// Root of the timestamped snapshot directories
    #[arg(long, env = "SUBSYNC_LOGS_DIR", default_value = "logs")]
    logs_dir: PathBuf,

    /// Skip raw response snapshots
    #[arg(long)]
    no_snapshots: bool,

    /// Staging rows output file
    #[arg(long, env = "SUBSYNC_OUTPUT")]
    output: Option<PathBuf>,

    /// Assignments processed at the same time
    #[arg(long, default_value_t = 1)]
    assignment_concurrency: usize,

    /// Pull requests processed at the same time within one assignment
    #[arg(long, default_value_t = 1)]
    pull_request_concurrency: usize,

    /// GitHub requests in flight at once, across everything
    #[arg(long, default_value_t = 1)]
    max_in_flight_requests: usize,

    /// Minimum delay between GitHub request starts, in milliseconds
    #[arg(long, default_value_t = 0)]
    min_request_interval_ms: u64,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Collect(args) => {
            telemetry::init_tracing(
                matches!(args.log_format, LogFormat::Json),
                tracing::Level::INFO,
            );
            match run_collect(args) {
                Ok(report) if report.is_complete() => 0,
                Ok(_) => EXIT_PARTIAL,
                Err(e) => {
                    tracing::error!("{e:#}");
                    eprintln!("Error: {e:#}");
                    1
                }
            }
        }
    };
    std::process::exit(code);
}

// Env-provided values may be set but empty
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn build_config(args: &CollectArgs) -> AggregationConfig {
    let mut config = AggregationConfig {
        token: clean_opt(&args.token).map(str::to_string),
        assignment_concurrency: args.assignment_concurrency,
        pull_request_concurrency: args.pull_request_concurrency,
        max_in_flight_requests: args.max_in_flight_requests,
        min_request_interval: Duration::from_millis(args.min_request_interval_ms),
        ..Default::default()
    };
    if let Some(api_url) = clean_opt(&args.api_url) {
        config.api_url = api_url.to_string();
    }
    config
}

fn staging_path(args: &CollectArgs, snapshot_dir: Option<&Path>) -> PathBuf {
    match (&args.output, snapshot_dir) {
        (Some(output), _) => output.clone(),
        (None, Some(dir)) => dir.join(STAGING_FILE),
        (None, None) => args.logs_dir.join(STAGING_FILE),
    }
}

fn run_collect(args: CollectArgs) -> anyhow::Result<BatchReport> {
    let config = build_config(&args);
    config.validate().context("invalid configuration")?;

    let filter = AssignmentFilter {
        org: clean_opt(&args.org).map(str::to_string),
        repo: clean_opt(&args.repo).map(str::to_string),
    };
    let assignments = AssignmentLoader::from_path(&args.assignments)
        .and_then(|all| filter.apply(all))
        .context("failed to load assignments")?;

    let snapshots = if args.no_snapshots {
        None
    } else {
        let writer = SnapshotWriter::timestamped(&args.logs_dir)
            .context("failed to create snapshot directory")?;
        tracing::info!(dir = %writer.dir().display(), "writing snapshots");
        Some(writer)
    };
    let output = staging_path(&args, snapshots.as_ref().map(SnapshotWriter::dir));

    let report = match &args.from_json {
        Some(path) => replay_record_set(path, &assignments)?,
        None => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to create runtime")?;

            let sink = snapshots.map(|w| Arc::new(w) as Arc<dyn SnapshotSink>);
            rt.block_on(aggregate_submissions(&config, &assignments, sink))?
        }
    };

    let mut staging = StagingWriter::new(output);
    for submissions in report.completed.values() {
        staging.accept(&submissions.assignment, &submissions.pull_requests)?;
    }
    let rows = staging.finish().context("failed to write staging rows")?;

    for failure in &report.failed {
        tracing::warn!(
            assignment_id = failure.assignment_id,
            phase = %failure.phase,
            error = %failure.error,
            "assignment not staged"
        );
    }
    tracing::info!(
        completed = report.completed.len(),
        failed = report.failed.len(),
        rows,
        "collection finished"
    );
    Ok(report)
}

/// Stage a recorded set under every selected assignment, without API calls
fn replay_record_set(path: &Path, assignments: &[Assignment]) -> anyhow::Result<BatchReport> {
    let recorded = AssignmentSubmissions::from_path(path)
        .with_context(|| format!("failed to load record set '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        records = recorded.pull_requests.len(),
        "replaying record set"
    );

    let mut report = BatchReport::default();
    for assignment in assignments {
        report.completed.insert(
            assignment.id,
            AssignmentSubmissions {
                assignment: assignment.clone(),
                pull_requests: recorded.pull_requests.clone(),
            },
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> CollectArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Collect(args) => args,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_from_flags() {
        let args = parse(&[
            "subsync",
            "collect",
            "--assignments",
            "a.yaml",
            "--api-url",
            "http://localhost:9999",
            "--pull-request-concurrency",
            "4",
            "--min-request-interval-ms",
            "250",
        ]);
        let config = build_config(&args);
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.pull_request_concurrency, 4);
        assert_eq!(config.assignment_concurrency, 1);
        assert_eq!(config.min_request_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_staging_path_defaults() {
        let args = parse(&["subsync", "collect", "--assignments", "a.yaml", "--logs-dir", "out"]);
        assert_eq!(
            staging_path(&args, Some(Path::new("out/2024_01_01-0000"))),
            PathBuf::from("out/2024_01_01-0000").join(STAGING_FILE)
        );
        assert_eq!(staging_path(&args, None), PathBuf::from("out").join(STAGING_FILE));

        let args = parse(&["subsync", "collect", "--assignments", "a.yaml", "--output", "rows.json"]);
        assert_eq!(staging_path(&args, None), PathBuf::from("rows.json"));
    }

    const RECORD_SET: &str = r#"{
      "assignment_id": 5,
      "github_org": "cs101",
      "repo_name": "trees",
      "pull_requests": {
        "1": {
          "pr_number": 1, "pr_id": 101, "state": "open",
          "submission_link": "https://github.com/cs101/trees/pull/1",
          "github_username": "alice", "submission_time": "2024-01-01T08:00:00Z",
          "head_sha": "aaa", "passes_preliminary_checks": false,
          "workflow_run": {}
        },
        "2": {
          "pr_number": 2, "pr_id": 102, "state": "closed",
          "submission_link": "https://github.com/cs101/trees/pull/2",
          "github_username": null, "submission_time": "2024-01-02T08:00:00Z",
          "head_sha": "bbb", "passes_preliminary_checks": false,
          "workflow_run": {}
        }
      }
    }"#;

    #[test]
    fn test_replay_stages_recorded_set_without_api() {
        let dir = tempfile::TempDir::new().unwrap();
        let assignments = dir.path().join("assignments.yaml");
        std::fs::write(
            &assignments,
            "- assignment_id: 5\n  github_org: cs101\n  repo_name: trees\n\
             - assignment_id: 6\n  github_org: cs202\n  repo_name: graphs\n",
        )
        .unwrap();
        let recorded = dir.path().join("final_assignment_submissions_5.json");
        std::fs::write(&recorded, RECORD_SET).unwrap();
        let output = dir.path().join("rows.json");

        // unroutable API root: any request would fail the assignment
        let args = parse(&[
            "subsync",
            "collect",
            "--assignments",
            assignments.to_str().unwrap(),
            "--org",
            "cs101",
            "--from-json",
            recorded.to_str().unwrap(),
            "--api-url",
            "http://127.0.0.1:9",
            "--no-snapshots",
            "--output",
            output.to_str().unwrap(),
        ]);
        let report = run_collect(args).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.completed.keys().copied().collect::<Vec<_>>(), vec![5]);
        assert_eq!(report.record_count(), 2);

        let rows = std::fs::read_to_string(&output).unwrap();
        assert!(rows.contains(r#""github_username": "alice""#));
        assert!(rows.contains(r#""assignment_id": 5"#));
        assert!(!rows.contains("pull/2"));
    }

    #[test]
    fn test_replay_with_missing_record_set_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let assignments = dir.path().join("assignments.yaml");
        std::fs::write(&assignments, "- assignment_id: 5\n  github_org: cs101\n  repo_name: trees\n")
            .unwrap();

        let args = parse(&[
            "subsync",
            "collect",
            "--assignments",
            assignments.to_str().unwrap(),
            "--from-json",
            dir.path().join("missing.json").to_str().unwrap(),
            "--no-snapshots",
            "--output",
            dir.path().join("rows.json").to_str().unwrap(),
        ]);
        let err = run_collect(args).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }
}
