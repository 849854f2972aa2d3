//! Timestamped audit snapshots of raw responses and final record sets

use crate::error::Result;
use crate::traits::{Snapshot, SnapshotSink};
use std::path::{Path, PathBuf};

const ACTIONS_DIR: &str = "actions_response";
const RUNS_DIR: &str = "workflow_runs_response";

/// Writes snapshots as pretty JSON files under one run directory
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    /// Create `<root>/<YYYY_MM_DD-HHMM>/` from local time and write there
    pub fn timestamped(root: impl AsRef<Path>) -> Result<Self> {
        let stamp = chrono::Local::now().format("%Y_%m_%d-%H%M").to_string();
        Self::new(root.as_ref().join(stamp))
    }

    /// Write into `dir`, creating it and its subdirectories
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(dir.join(ACTIONS_DIR))?;
        std::fs::create_dir_all(dir.join(RUNS_DIR))?;
        tracing::debug!(dir = %dir.display(), "snapshot directory ready");
        Ok(Self { dir })
    }

    /// Run directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Destination file of a snapshot
    pub fn path_for(&self, snapshot: &Snapshot<'_>) -> PathBuf {
        match snapshot {
            Snapshot::PullRequests { repo, .. } => {
                self.dir.join(format!("pulls_response_{}.json", repo))
            }
            Snapshot::WorkflowRuns { repo, pr_number, .. } => self
                .dir
                .join(ACTIONS_DIR)
                .join(format!("{}_pr_{}.json", repo, pr_number)),
            Snapshot::WorkflowRun { repo, run_id, .. } => self
                .dir
                .join(RUNS_DIR)
                .join(format!("{}_runid_{}.json", repo, run_id)),
            Snapshot::Submissions { assignment_id, .. } => self
                .dir
                .join(format!("final_assignment_submissions_{}.json", assignment_id)),
        }
    }
}

impl SnapshotSink for SnapshotWriter {
    fn write(&self, snapshot: Snapshot<'_>) -> Result<()> {
        let body = match snapshot {
            Snapshot::PullRequests { body, .. }
            | Snapshot::WorkflowRuns { body, .. }
            | Snapshot::WorkflowRun { body, .. }
            | Snapshot::Submissions { body, .. } => body,
        };
        let path = self.path_for(&snapshot);
        std::fs::write(&path, serde_json::to_vec_pretty(body)?)?;
        Ok(())
    }
}
