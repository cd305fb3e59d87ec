// SPDX-License-Identifier: PMPL-1.0-or-later

//! `tscat.yaml` project configuration

use crate::lookup::LookupPolicy;
use crate::report::ReportOutputFormat;
use crate::validate::{IssueKind, Severity, Validator};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "tscat.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Let lookups show unfinished entries that already carry text
    pub include_unfinished: bool,
    /// Language codes of sibling catalogs consulted by `lookup`
    pub fallback_languages: Vec<String>,
    pub checks: ChecksConfig,
    pub output: OutputConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub disabled: Vec<String>,
    pub fail_on: Severity,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            fail_on: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub drop_obsolete: bool,
}

impl Config {
    /// `tscat.yaml` in the working directory, or defaults when absent.
    pub fn load_default() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(raw)?;
        // Surface bad names at load time rather than on first use.
        config.disabled_checks()?;
        config.output_format()?;
        Ok(config)
    }

    pub fn disabled_checks(&self) -> Result<Vec<IssueKind>> {
        self.checks
            .disabled
            .iter()
            .map(|name| IssueKind::parse(name).ok_or_else(|| anyhow!("unknown check '{}'", name)))
            .collect()
    }

    pub fn validator(&self) -> Result<Validator> {
        Ok(Validator::with_disabled(self.disabled_checks()?))
    }

    pub fn output_format(&self) -> Result<ReportOutputFormat> {
        ReportOutputFormat::parse(&self.output.format)
            .ok_or_else(|| anyhow!("unknown output format '{}'", self.output.format))
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        LookupPolicy {
            include_unfinished: self.include_unfinished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse("include_unfinished: true\nchecks:\n  fail_on: warning\n").unwrap();
        assert!(config.include_unfinished);
        assert_eq!(config.checks.fail_on, Severity::Warning);
        assert!(config.checks.disabled.is_empty());
        assert_eq!(config.output_format().unwrap(), ReportOutputFormat::Text);
        assert!(!config.sync.drop_obsolete);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn disabled_checks_build_validator() {
        let config = Config::parse("checks:\n  disabled: [punctuation-mismatch, accelerator_mismatch]\n").unwrap();
        let validator = config.validator().unwrap();
        assert!(!validator.is_enabled(IssueKind::PunctuationMismatch));
        assert!(!validator.is_enabled(IssueKind::AcceleratorMismatch));
        assert!(validator.is_enabled(IssueKind::EmptySource));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(Config::parse("checks:\n  disabled: [spelling]\n").is_err());
        assert!(Config::parse("output:\n  format: xml\n").is_err());
    }

    #[test]
    fn load_reports_path_on_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tscat.yaml");
        fs::write(&path, "fallback_languages: [de\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("tscat.yaml"));
    }
}
