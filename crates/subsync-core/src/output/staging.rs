//! Staging rows handed to the downstream submissions store

use crate::error::Result;
use crate::traits::SubmissionSink;
use crate::types::{Assignment, SubmissionRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flattened per-submission row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagingRow {
    /// Assignment identifier
    pub assignment_id: i64,
    /// Pull request URL
    pub submission_link: String,
    /// Best run completed with success
    pub passes_preliminary_checks: bool,
    /// Pull request creation time
    pub submission_time: String,
    /// The full submission record
    pub pull_request_data: serde_json::Value,
    /// Author handle, resolved to a user id downstream
    pub github_username: String,
    /// Pull request state
    pub pr_state: String,
}

/// Collects staging rows and writes them as one JSON array
#[derive(Debug)]
pub struct StagingWriter {
    path: PathBuf,
    rows: Vec<StagingRow>,
}

impl StagingWriter {
    /// Stage rows for `path`; nothing is written until `finish`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: Vec::new(),
        }
    }

    /// Output file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows staged so far
    pub fn rows(&self) -> &[StagingRow] {
        &self.rows
    }

    /// Write every staged row, returning how many were written
    pub fn finish(self) -> Result<usize> {
        if self.rows.is_empty() {
            tracing::info!("no records to insert");
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&self.rows)?)?;

        tracing::info!(
            rows = self.rows.len(),
            path = %self.path.display(),
            "wrote staging rows"
        );
        Ok(self.rows.len())
    }
}

impl SubmissionSink for StagingWriter {
    fn accept(
        &mut self,
        assignment: &Assignment,
        submissions: &BTreeMap<u64, SubmissionRecord>,
    ) -> Result<()> {
        for record in submissions.values() {
            let Some(username) = record.github_username.as_deref().filter(|u| !u.is_empty())
            else {
                tracing::debug!(pr_number = record.pr_number, "no author, not staged");
                continue;
            };

            self.rows.push(StagingRow {
                assignment_id: assignment.id,
                submission_link: record.submission_link.clone(),
                passes_preliminary_checks: record.passes_preliminary_checks,
                submission_time: record.submission_time.clone(),
                pull_request_data: serde_json::to_value(record)?,
                github_username: username.to_string(),
                pr_state: record.state.as_str().to_string(),
            });
        }
        Ok(())
    }
}
