// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog validation
//!
//! Structural checks (empty sources, duplicate keys, finished entries
//! without text) and translator-facing checks in the spirit of Qt
//! Linguist's validators (place markers, accelerators, punctuation,
//! plural form counts).

pub mod rules;

use crate::ts;
use crate::types::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "note" | "info" => Some(Severity::Note),
            "warning" | "warn" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    EmptySource,
    DuplicateMessage,
    MissingTranslation,
    EmptyContextName,
    PlaceholderMismatch,
    NumerusFormCount,
    AcceleratorMismatch,
    PunctuationMismatch,
    UnknownLanguage,
    UnsupportedVersion,
    RoundTripLoss,
}

impl IssueKind {
    pub fn all() -> &'static [IssueKind] {
        &[
            IssueKind::EmptySource,
            IssueKind::DuplicateMessage,
            IssueKind::MissingTranslation,
            IssueKind::EmptyContextName,
            IssueKind::PlaceholderMismatch,
            IssueKind::NumerusFormCount,
            IssueKind::AcceleratorMismatch,
            IssueKind::PunctuationMismatch,
            IssueKind::UnknownLanguage,
            IssueKind::UnsupportedVersion,
            IssueKind::RoundTripLoss,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            IssueKind::EmptySource => "empty-source",
            IssueKind::DuplicateMessage => "duplicate-message",
            IssueKind::MissingTranslation => "missing-translation",
            IssueKind::EmptyContextName => "empty-context-name",
            IssueKind::PlaceholderMismatch => "placeholder-mismatch",
            IssueKind::NumerusFormCount => "numerus-form-count",
            IssueKind::AcceleratorMismatch => "accelerator-mismatch",
            IssueKind::PunctuationMismatch => "punctuation-mismatch",
            IssueKind::UnknownLanguage => "unknown-language",
            IssueKind::UnsupportedVersion => "unsupported-version",
            IssueKind::RoundTripLoss => "round-trip-loss",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::all().iter().copied().find(|kind| kind.name() == value)
    }

    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::EmptySource
            | IssueKind::DuplicateMessage
            | IssueKind::MissingTranslation
            | IssueKind::EmptyContextName
            | IssueKind::RoundTripLoss => Severity::Error,
            IssueKind::PlaceholderMismatch
            | IssueKind::NumerusFormCount
            | IssueKind::AcceleratorMismatch
            | IssueKind::UnknownLanguage
            | IssueKind::UnsupportedVersion => Severity::Warning,
            IssueKind::PunctuationMismatch => Severity::Note,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Context name, empty for catalog-level findings
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub detail: String,
}

impl Issue {
    pub fn new(kind: IssueKind, context: &str, source: Option<&str>, detail: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            context: context.to_string(),
            source: source.map(str::to_string),
            detail: detail.into(),
        }
    }
}

/// Runs the enabled checks over a catalog
#[derive(Debug, Clone, Default)]
pub struct Validator {
    disabled: HashSet<IssueKind>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disabled<I: IntoIterator<Item = IssueKind>>(kinds: I) -> Self {
        Self {
            disabled: kinds.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, kind: IssueKind) -> bool {
        !self.disabled.contains(&kind)
    }

    pub fn validate(&self, catalog: &Catalog) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(rules::check_header(catalog));
        for context in &catalog.contexts {
            issues.extend(rules::check_context(context));
            for message in &context.messages {
                issues.extend(rules::check_message(catalog, &context.name, message));
            }
        }
        if self.is_enabled(IssueKind::RoundTripLoss) {
            issues.extend(roundtrip(catalog));
        }
        issues.retain(|issue| self.is_enabled(issue.kind));
        issues
    }
}

/// Validate with every check enabled.
pub fn validate(catalog: &Catalog) -> Vec<Issue> {
    Validator::new().validate(catalog)
}

/// Serialize and re-parse the catalog, reporting anything that changed.
pub fn roundtrip(catalog: &Catalog) -> Vec<Issue> {
    let rendered = ts::to_string(catalog);
    let reparsed = match ts::parse(&rendered) {
        Ok(reparsed) => reparsed,
        Err(err) => {
            return vec![Issue::new(
                IssueKind::RoundTripLoss,
                "",
                None,
                format!("serialized catalog does not parse: {:#}", err),
            )]
        }
    };

    let mut issues = Vec::new();
    if reparsed.version != catalog.version
        || reparsed.language != catalog.language
        || reparsed.source_language != catalog.source_language
    {
        issues.push(Issue::new(
            IssueKind::RoundTripLoss,
            "",
            None,
            "catalog header changed after serialization",
        ));
    }
    if reparsed.contexts.len() != catalog.contexts.len() {
        issues.push(Issue::new(
            IssueKind::RoundTripLoss,
            "",
            None,
            format!(
                "context count changed from {} to {}",
                catalog.contexts.len(),
                reparsed.contexts.len()
            ),
        ));
        return issues;
    }
    for (before, after) in catalog.contexts.iter().zip(&reparsed.contexts) {
        if before.messages.len() != after.messages.len() || before.name != after.name {
            issues.push(Issue::new(
                IssueKind::RoundTripLoss,
                &before.name,
                None,
                format!(
                    "context changed from {} to {} messages",
                    before.messages.len(),
                    after.messages.len()
                ),
            ));
            continue;
        }
        for (a, b) in before.messages.iter().zip(&after.messages) {
            if a != b {
                issues.push(Issue::new(
                    IssueKind::RoundTripLoss,
                    &before.name,
                    Some(&a.source),
                    "message differs after serialization",
                ));
            }
        }
    }
    issues
}

/// Highest severity among the issues.
pub fn worst_severity(issues: &[Issue]) -> Option<Severity> {
    issues.iter().map(|issue| issue.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Note);
        assert_eq!(Severity::parse("WARN"), Some(Severity::Warning));
    }

    #[test]
    fn kind_names_parse_back() {
        for kind in IssueKind::all() {
            assert_eq!(IssueKind::parse(kind.name()), Some(*kind));
        }
        assert_eq!(
            IssueKind::parse("placeholder_mismatch"),
            Some(IssueKind::PlaceholderMismatch)
        );
        assert_eq!(IssueKind::parse("nope"), None);
    }

    #[test]
    fn worst_severity_picks_max() {
        let issues = vec![
            Issue::new(IssueKind::PunctuationMismatch, "A", Some("x"), ""),
            Issue::new(IssueKind::PlaceholderMismatch, "A", Some("y"), ""),
        ];
        assert_eq!(worst_severity(&issues), Some(Severity::Warning));
        assert_eq!(worst_severity(&[]), None);
    }
}
