//! Assignment loading from YAML or JSON files

use crate::error::{Error, Result};
use crate::types::Assignment;
use serde::Deserialize;
use std::path::Path;

/// Accepted file layouts: a bare list, or a mapping with an `assignments` key
#[derive(Deserialize)]
#[serde(untagged)]
enum AssignmentFile {
    List(Vec<Assignment>),
    Wrapped { assignments: Vec<Assignment> },
}

/// Reads assignment rows from disk
pub struct AssignmentLoader;

impl AssignmentLoader {
    /// Load assignments from a YAML or JSON file
    ///
    /// YAML format:
    /// ```yaml
    /// assignments:
    ///   - assignment_id: 42
    ///     assignment_title: Linked lists
    ///     github_org: cs101
    ///     repo_name: linked-lists
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Assignment>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read assignments file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse assignment rows; JSON is accepted as a YAML subset
    pub fn parse(content: &str) -> Result<Vec<Assignment>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let file: AssignmentFile = serde_yaml::from_str(content)?;
        Ok(match file {
            AssignmentFile::List(assignments) => assignments,
            AssignmentFile::Wrapped { assignments } => assignments,
        })
    }
}

/// Restricts a batch to one organization and optionally one repository
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    /// Organization, matched exactly
    pub org: Option<String>,
    /// Repository name, matched case-insensitively
    pub repo: Option<String>,
}

impl AssignmentFilter {
    /// Whether `assignment` passes the filter
    pub fn matches(&self, assignment: &Assignment) -> bool {
        let org_ok = self
            .org
            .as_deref()
            .map_or(true, |org| assignment.github_org.as_deref() == Some(org));
        let repo_ok = self.repo.as_deref().map_or(true, |repo| {
            assignment
                .repo_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(repo))
        });
        org_ok && repo_ok
    }

    /// Keep matching assignments, failing when none are left
    pub fn apply(&self, assignments: Vec<Assignment>) -> Result<Vec<Assignment>> {
        let selected: Vec<Assignment> = assignments
            .into_iter()
            .filter(|a| self.matches(a))
            .collect();

        if selected.is_empty() {
            return Err(Error::Config("no assignments found".to_string()));
        }
        tracing::info!(count = selected.len(), "selected assignments");
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
assignments:
  - assignment_id: 1
    assignment_title: Linked lists
    assignment_link: https://classroom.example/a/1
    github_org: cs101
    repo_name: Linked-Lists
  - assignment_id: 2
    github_org: cs101
    repo_name: trees
  - assignment_id: 3
    github_org: cs202
    repo_name: trees
"#;

    #[test]
    fn test_parse_wrapped_yaml() {
        let assignments = AssignmentLoader::parse(YAML).unwrap();
        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0].id, 1);
        assert_eq!(assignments[0].title.as_deref(), Some("Linked lists"));
        assert_eq!(assignments[1].link, None);
    }

    #[test]
    fn test_parse_json_list() {
        let json = r#"[{"assignment_id": 7, "github_org": "org", "repo_name": null}]"#;
        let assignments = AssignmentLoader::parse(json).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].repo_name, None);
        assert_eq!(
            assignments[0].locator().unwrap_err().kind(),
            ErrorKind::InputConfiguration
        );
    }

    #[test]
    fn test_parse_missing_id_is_error() {
        let result = AssignmentLoader::parse("- github_org: org\n  repo_name: repo\n");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(AssignmentLoader::parse("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let assignments = AssignmentLoader::from_path(file.path()).unwrap();
        assert_eq!(assignments.len(), 3);
    }

    #[test]
    fn test_from_missing_path() {
        let err = AssignmentLoader::from_path("/nonexistent/assignments.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.message().contains("assignments.yaml"));
    }

    #[test]
    fn test_filter_by_org_and_repo_case_insensitive() {
        let assignments = AssignmentLoader::parse(YAML).unwrap();
        let filter = AssignmentFilter {
            org: Some("cs101".to_string()),
            repo: Some("linked-lists".to_string()),
        };
        let selected = filter.apply(assignments).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 1);
    }

    #[test]
    fn test_filter_org_is_exact() {
        let assignments = AssignmentLoader::parse(YAML).unwrap();
        let filter = AssignmentFilter {
            org: Some("CS101".to_string()),
            repo: None,
        };
        let err = filter.apply(assignments).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.message(), "no assignments found");
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let assignments = AssignmentLoader::parse(YAML).unwrap();
        let selected = AssignmentFilter::default().apply(assignments).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_filter_on_empty_batch() {
        assert!(AssignmentFilter::default().apply(Vec::new()).is_err());
    }
}
