// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation progress statistics

use crate::lang;
use crate::ts;
use crate::types::*;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
    pub obsolete: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: TranslationStatus) {
        match status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Vanished => self.vanished += 1,
            TranslationStatus::Obsolete => self.obsolete += 1,
        }
    }

    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    pub fn total(&self) -> usize {
        self.active() + self.vanished + self.obsolete
    }

    pub fn get(&self, status: TranslationStatus) -> usize {
        match status {
            TranslationStatus::Finished => self.finished,
            TranslationStatus::Unfinished => self.unfinished,
            TranslationStatus::Vanished => self.vanished,
            TranslationStatus::Obsolete => self.obsolete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextStats {
    pub name: String,
    pub counts: StatusCounts,
    pub translated: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    pub version: String,
    pub contexts: usize,
    pub messages: usize,
    pub numerus: usize,
    pub counts: StatusCounts,
    /// Active entries that are finished with complete text
    pub translated: usize,
    /// blake3 of the file contents, when read from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub per_context: Vec<ContextStats>,
}

impl CatalogStats {
    /// Share of active entries that are translated, 1.0 for a catalog
    /// with nothing left to translate.
    pub fn completion(&self) -> f64 {
        let active = self.counts.active();
        if active == 0 {
            1.0
        } else {
            self.translated as f64 / active as f64
        }
    }
}

pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut counts = StatusCounts::default();
    let mut translated = 0;
    let mut numerus = 0;
    let mut per_context = Vec::with_capacity(catalog.contexts.len());

    for context in &catalog.contexts {
        let mut ctx_counts = StatusCounts::default();
        let mut ctx_translated = 0;
        for message in &context.messages {
            ctx_counts.record(message.status);
            if message.is_translated() {
                ctx_translated += 1;
            }
            if message.numerus {
                numerus += 1;
            }
        }
        counts.finished += ctx_counts.finished;
        counts.unfinished += ctx_counts.unfinished;
        counts.vanished += ctx_counts.vanished;
        counts.obsolete += ctx_counts.obsolete;
        translated += ctx_translated;
        per_context.push(ContextStats {
            name: context.name.clone(),
            counts: ctx_counts,
            translated: ctx_translated,
        });
    }

    CatalogStats {
        path: None,
        language: catalog.language.clone(),
        language_name: catalog
            .language
            .as_deref()
            .and_then(lang::language_name)
            .map(str::to_string),
        native_name: catalog
            .language
            .as_deref()
            .and_then(lang::native_name)
            .map(str::to_string),
        version: catalog.version.clone(),
        contexts: catalog.contexts.len(),
        messages: catalog.message_count(),
        numerus,
        counts,
        translated,
        digest: None,
        per_context,
    }
}

/// Load a catalog file and compute its statistics along with a content
/// digest.
pub fn file_stats(path: &Path) -> Result<(Catalog, CatalogStats)> {
    let bytes = fs::read(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog =
        ts::parse_bytes(&bytes).with_context(|| format!("parsing catalog {}", path.display()))?;
    let mut stats = catalog_stats(&catalog);
    stats.path = Some(path.to_path_buf());
    stats.digest = Some(blake3::hash(&bytes).to_hex().to_string());
    Ok((catalog, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_completion() {
        let mut catalog = Catalog::new("it");
        catalog.push("AboutDialog", Message::new("License:", "Licenza:"));
        catalog.push("AboutDialog", Message::unfinished("Report problems"));
        catalog.push(
            "AboutPage",
            Message::new("About", "Informazioni").with_status(TranslationStatus::Vanished),
        );
        catalog.push("AboutPage", Message::new("Close", ""));

        let stats = catalog_stats(&catalog);
        assert_eq!(stats.language_name.as_deref(), Some("Italian"));
        assert_eq!(stats.messages, 4);
        assert_eq!(stats.counts.finished, 2);
        assert_eq!(stats.counts.unfinished, 1);
        assert_eq!(stats.counts.vanished, 1);
        assert_eq!(stats.translated, 1);
        assert!((stats.completion() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.per_context[1].counts.vanished, 1);
    }

    #[test]
    fn empty_catalog_is_complete() {
        let stats = catalog_stats(&Catalog::new("sl"));
        assert_eq!(stats.completion(), 1.0);
    }
}
