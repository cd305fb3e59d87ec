// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console rendering of reports

use super::diff::{CatalogDiff, ChangeKind};
use super::output::Render;
use super::stats::CatalogStats;
use super::{CheckReport, StatsReport};
use crate::sweep::SweepReport;
use crate::sync::SyncSummary;
use crate::types::TranslationStatus;
use crate::validate::Severity;
use colored::*;

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Note => "note".blue(),
    }
}

fn percent(ratio: f64) -> ColoredString {
    let text = format!("{:5.1}%", ratio * 100.0);
    if ratio >= 0.999 {
        text.green()
    } else if ratio >= 0.75 {
        text.yellow()
    } else {
        text.red()
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\n', "\\n"))
}

impl Render for CheckReport {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{}", "=== CATALOG CHECK ===".bold().cyan()));
        for file in &self.files {
            lines.push(String::new());
            let language = file.language.as_deref().unwrap_or("?");
            lines.push(format!(
                "{} [{}]",
                file.path.display().to_string().bold(),
                language
            ));
            if let Some(error) = &file.error {
                lines.push(format!("  {}: {}", severity_label(Severity::Error), error));
                continue;
            }
            if file.issues.is_empty() {
                lines.push(format!("  {}", "no issues".green()));
                continue;
            }
            for issue in &file.issues {
                let location = match &issue.source {
                    Some(source) => format!("{} {}", issue.context, quote(source)),
                    None if issue.context.is_empty() => "catalog".to_string(),
                    None => issue.context.clone(),
                };
                lines.push(format!(
                    "  {} [{}] {}: {}",
                    severity_label(issue.severity),
                    issue.kind,
                    location,
                    issue.detail
                ));
            }
        }
        lines.push(String::new());
        lines.push(format!(
            "Summary: {} error(s), {} warning(s), {} note(s) in {} file(s)",
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Note),
            self.files.len()
        ));
        lines.join("\n")
    }
}

fn stats_line(stats: &CatalogStats) -> String {
    let label = match (&stats.path, &stats.language) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(language)) => language.clone(),
        (None, None) => "<catalog>".to_string(),
    };
    let language = match (&stats.language, &stats.language_name, &stats.native_name) {
        (Some(code), Some(name), Some(native)) if name != native => {
            format!("{} ({}, {})", code, name, native)
        }
        (Some(code), Some(name), _) => format!("{} ({})", code, name),
        (Some(code), None, _) => code.clone(),
        _ => "?".to_string(),
    };
    format!(
        "{}  {}  {}  {}/{} translated, {} unfinished, {} vanished, {} obsolete",
        percent(stats.completion()),
        label.bold(),
        language,
        stats.translated,
        stats.counts.active(),
        stats.counts.unfinished,
        stats.counts.vanished,
        stats.counts.obsolete
    )
}

impl Render for CatalogStats {
    fn render(&self) -> String {
        let mut lines = vec![stats_line(self)];
        lines.push(format!(
            "  contexts: {}  messages: {}  numerus: {}  version: {}",
            self.contexts, self.messages, self.numerus, self.version
        ));
        if let Some(digest) = &self.digest {
            lines.push(format!("  blake3: {}", digest));
        }
        let incomplete: Vec<_> = self
            .per_context
            .iter()
            .filter(|c| c.translated < c.counts.active())
            .collect();
        if !incomplete.is_empty() {
            lines.push("  Contexts with pending work:".to_string());
            for context in incomplete {
                lines.push(format!(
                    "    {}: {}/{} ({} {})",
                    context.name,
                    context.translated,
                    context.counts.active(),
                    context.counts.get(TranslationStatus::Unfinished),
                    TranslationStatus::Unfinished
                ));
            }
        }
        lines.join("\n")
    }
}

impl Render for StatsReport {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", "=== TRANSLATION PROGRESS ===".bold().cyan())];
        for stats in &self.catalogs {
            lines.push(String::new());
            lines.push(stats.render());
        }
        lines.join("\n")
    }
}

impl Render for CatalogDiff {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{}", "=== CATALOG DIFF ===".bold().cyan()));
        lines.push(format!("Base: {}", self.base_label));
        lines.push(format!("Compare: {}", self.compare_label));
        lines.push(format!(
            "Added: {}  Removed: {}  Translation changed: {}  Status changed: {}",
            self.count(ChangeKind::Added),
            self.count(ChangeKind::Removed),
            self.count(ChangeKind::TranslationChanged),
            self.count(ChangeKind::StatusChanged)
        ));
        if self.changes.is_empty() {
            lines.push("No differences.".to_string());
            return lines.join("\n");
        }
        lines.push(String::new());
        for change in &self.changes {
            let key = match &change.comment {
                Some(comment) => format!("{} {} ({})", change.context, quote(&change.source), comment),
                None => format!("{} {}", change.context, quote(&change.source)),
            };
            let before = change.before.as_deref().map(quote).unwrap_or_default();
            let after = change.after.as_deref().map(quote).unwrap_or_default();
            let line = match change.kind {
                ChangeKind::Added => format!("{} {} {}", "+".green(), key, after),
                ChangeKind::Removed => format!("{} {} {}", "-".red(), key, before),
                ChangeKind::TranslationChanged => {
                    format!("{} {} {} -> {}", "~".yellow(), key, before, after)
                }
                ChangeKind::StatusChanged => format!(
                    "{} {} {} -> {}",
                    "*".blue(),
                    key,
                    change.before.as_deref().unwrap_or("-"),
                    change.after.as_deref().unwrap_or("-")
                ),
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl Render for SyncSummary {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", "=== SYNC SUMMARY ===".bold().cyan())];
        lines.push(format!("  Kept:       {}", self.kept));
        lines.push(format!("  Revived:    {}", self.revived));
        lines.push(format!("  Added:      {}", self.added.to_string().green()));
        lines.push(format!("  Same text:  {}", self.same_text));
        lines.push(format!("  Vanished:   {}", self.vanished.to_string().yellow()));
        lines.push(format!("  Obsolete:   {}", self.obsoleted.to_string().yellow()));
        lines.push(format!("  Dropped:    {}", self.dropped.to_string().red()));
        lines.join("\n")
    }
}

impl Render for SweepReport {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", "=== CATALOG SWEEP ===".bold().cyan())];
        lines.push(format!("Directory: {}", self.directory.display()));
        lines.push(format!(
            "Catalogs: {}  Skipped .ts files: {}  Messages: {}  Errors: {}  Warnings: {}",
            self.catalogs_found,
            self.skipped,
            self.total_messages,
            self.total_errors,
            self.total_warnings
        ));
        lines.push(String::new());
        for entry in &self.results {
            match (&entry.stats, &entry.error) {
                (_, Some(error)) => lines.push(format!(
                    "{} {}: {}",
                    severity_label(Severity::Error),
                    entry.path.display(),
                    error
                )),
                (Some(stats), None) => {
                    lines.push(stats_line(stats));
                    if entry.errors + entry.warnings > 0 {
                        lines.push(format!(
                            "         {} error(s), {} warning(s)",
                            entry.errors, entry.warnings
                        ));
                    }
                }
                (None, None) => {}
            }
        }
        lines.join("\n")
    }
}
