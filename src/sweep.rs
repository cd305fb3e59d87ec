// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sweep: batch statistics across a directory tree of catalogs
//!
//! Walks a directory, keeps `.ts` files whose content looks like a Linguist
//! catalog (TypeScript sources share the extension), then loads and checks
//! each one in parallel. Results are ordered by path.

use crate::report::stats::{file_stats, CatalogStats};
use crate::ts;
use crate::validate::{Severity, Validator};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Results for a single catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CatalogStats>,
    pub errors: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub created_at: String,
    pub directory: PathBuf,
    pub catalogs_found: usize,
    /// `.ts` files that are not Linguist catalogs
    pub skipped: usize,
    pub total_messages: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub results: Vec<SweepEntry>,
}

/// Find `.ts` files under `directory` and split them into catalogs and
/// lookalikes.
fn discover_catalogs(directory: &Path) -> Result<(Vec<PathBuf>, usize)> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut catalogs = Vec::new();
    let mut skipped = 0;
    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("ts") {
            continue;
        }
        match fs::read(path) {
            Ok(bytes) if ts::sniff(&bytes) => catalogs.push(path.to_path_buf()),
            Ok(_) => {
                debug!(path = %path.display(), "skipping non-catalog .ts file");
                skipped += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable file");
                skipped += 1;
            }
        }
    }

    catalogs.sort();
    Ok((catalogs, skipped))
}

fn sweep_file(path: &Path, validator: &Validator) -> SweepEntry {
    match file_stats(path) {
        Ok((catalog, stats)) => {
            let issues = validator.validate(&catalog);
            let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
            SweepEntry {
                path: path.to_path_buf(),
                errors: count(Severity::Error),
                warnings: count(Severity::Warning),
                stats: Some(stats),
                error: None,
            }
        }
        Err(err) => SweepEntry {
            path: path.to_path_buf(),
            stats: None,
            errors: 0,
            warnings: 0,
            error: Some(format!("{:#}", err)),
        },
    }
}

/// Run a sweep over every catalog below `directory`.
pub fn run(directory: &Path, validator: &Validator) -> Result<SweepReport> {
    let (catalogs, skipped) = discover_catalogs(directory)?;
    debug!(found = catalogs.len(), skipped, "sweep discovery finished");

    let mut results: Vec<SweepEntry> = catalogs
        .par_iter()
        .map(|path| sweep_file(path, validator))
        .collect();
    results.sort_by(|a, b| a.path.cmp(&b.path));

    let total_messages = results
        .iter()
        .filter_map(|r| r.stats.as_ref())
        .map(|s| s.messages)
        .sum();
    // A file that fails to load counts as one error.
    let total_errors = results
        .iter()
        .map(|r| r.errors + usize::from(r.error.is_some()))
        .sum();
    let total_warnings = results.iter().map(|r| r.warnings).sum();

    Ok(SweepReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        directory: directory.to_path_buf(),
        catalogs_found: catalogs.len(),
        skipped,
        total_messages,
        total_errors,
        total_warnings,
        results,
    })
}
