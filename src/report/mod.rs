// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report generation module

pub mod diff;
pub mod formatter;
pub mod output;
pub mod stats;

use crate::ts;
use crate::validate::{Issue, Severity, Validator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use diff::{diff_catalogs, CatalogDiff, ChangeKind};
pub use output::{Render, ReportOutputFormat};
pub use stats::{catalog_stats, file_stats, CatalogStats, StatusCounts};

/// Validation outcome for one catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCheck {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub issues: Vec<Issue>,
    /// Set when the file could not be loaded at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileCheck {
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub created_at: String,
    pub files: Vec<FileCheck>,
}

impl CheckReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.files.iter().map(|f| f.count(severity)).sum()
    }

    /// Highest severity found; a file that failed to load counts as an error.
    pub fn worst_severity(&self) -> Option<Severity> {
        let load_error = self
            .files
            .iter()
            .any(|f| f.error.is_some())
            .then_some(Severity::Error);
        self.files
            .iter()
            .flat_map(|f| f.issues.iter().map(|i| i.severity))
            .chain(load_error)
            .max()
    }

    /// True when any finding reaches `threshold`.
    pub fn fails(&self, threshold: Severity) -> bool {
        self.worst_severity().is_some_and(|worst| worst >= threshold)
    }
}

/// Load and validate one file, recording load failures instead of
/// aborting.
pub fn check_file(path: &Path, validator: &Validator) -> FileCheck {
    match ts::load(path) {
        Ok(catalog) => FileCheck {
            path: path.to_path_buf(),
            language: catalog.language.clone(),
            issues: validator.validate(&catalog),
            error: None,
        },
        Err(err) => FileCheck {
            path: path.to_path_buf(),
            language: None,
            issues: Vec::new(),
            error: Some(format!("{:#}", err)),
        },
    }
}

pub fn check_files(paths: &[PathBuf], validator: &Validator) -> CheckReport {
    CheckReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        files: paths.iter().map(|p| check_file(p, validator)).collect(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub created_at: String,
    pub catalogs: Vec<CatalogStats>,
}

impl StatsReport {
    pub fn new(catalogs: Vec<CatalogStats>) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            catalogs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::IssueKind;

    fn file(issues: Vec<Issue>, error: Option<&str>) -> FileCheck {
        FileCheck {
            path: PathBuf::from("i18n/de.ts"),
            language: Some("de".into()),
            issues,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn threshold_respects_severity_order() {
        let report = CheckReport {
            created_at: String::new(),
            files: vec![file(
                vec![Issue::new(IssueKind::PlaceholderMismatch, "A", Some("%1"), "")],
                None,
            )],
        };
        assert!(report.fails(Severity::Warning));
        assert!(report.fails(Severity::Note));
        assert!(!report.fails(Severity::Error));
        assert_eq!(report.count(Severity::Warning), 1);
    }

    #[test]
    fn load_errors_fail_the_check() {
        let report = CheckReport {
            created_at: String::new(),
            files: vec![file(Vec::new(), Some("parsing catalog: no <TS> root element"))],
        };
        assert_eq!(report.worst_severity(), Some(Severity::Error));
    }

    #[test]
    fn missing_file_is_recorded() {
        let check = check_file(Path::new("/nonexistent/catalog.ts"), &Validator::new());
        assert!(check.error.is_some());
        assert!(check.issues.is_empty());
    }
}
