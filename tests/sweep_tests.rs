// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for the sweep subcommand (batch catalog scanning)

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tscat::report::{Render, ReportOutputFormat};
use tscat::sweep;
use tscat::validate::Validator;

fn copy_fixture(name: &str, to: &Path) {
    let from = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::copy(from, to).unwrap();
}

#[test]
fn test_sweep_empty_directory() {
    let dir = TempDir::new().unwrap();
    let report = sweep::run(dir.path(), &Validator::new()).expect("sweep should succeed on empty dir");
    assert_eq!(report.catalogs_found, 0);
    assert_eq!(report.total_messages, 0);
    assert!(report.results.is_empty());
}

#[test]
fn test_sweep_finds_nested_catalogs_sorted() {
    let dir = TempDir::new().unwrap();
    copy_fixture("sl.ts", &dir.path().join("app/i18n/sl.ts"));
    copy_fixture("de.ts", &dir.path().join("app/i18n/de.ts"));
    copy_fixture("broken.ts", &dir.path().join("legacy/xx.ts"));
    copy_fixture("lookalike.ts", &dir.path().join("web/src/index.ts"));

    let report = sweep::run(dir.path(), &Validator::new()).expect("sweep should succeed");
    assert_eq!(report.catalogs_found, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.total_messages, 12 + 2 + 5);

    let names: Vec<String> = report
        .results
        .iter()
        .map(|r| r.path.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(names, ["app/i18n/de.ts", "app/i18n/sl.ts", "legacy/xx.ts"]);

    assert_eq!(report.results[0].errors, 0);
    assert!(report.results[2].errors >= 3);
    assert!(report.results[0].stats.as_ref().unwrap().digest.is_some());
}

#[test]
fn test_sweep_records_unparsable_catalog() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("truncated.ts"),
        "<?xml version=\"1.0\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\"><context>",
    )
    .unwrap();

    let report = sweep::run(dir.path(), &Validator::new()).unwrap();
    assert_eq!(report.catalogs_found, 1);
    assert!(report.results[0].error.is_some());
    assert_eq!(report.total_errors, 1);
}

#[test]
fn test_sweep_reads_utf16_catalog_with_licence_header() {
    let dir = TempDir::new().unwrap();
    let text = format!(
        "<?xml version=\"1.0\"?>\n<!--\n{}-->\n<!DOCTYPE TS>\n<TS version=\"2.1\" language=\"de\">\n<context>\n    <name>Main</name>\n    <message>\n        <source>Online</source>\n        <translation>Online</translation>\n    </message>\n</context>\n</TS>\n",
        "  This file is part of the application and is distributed under its licence.\n".repeat(10)
    );
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    fs::write(dir.path().join("de.ts"), bytes).unwrap();

    let report = sweep::run(dir.path(), &Validator::new()).unwrap();
    assert_eq!(report.catalogs_found, 1);
    assert_eq!(report.skipped, 0);
    assert!(report.results[0].error.is_none(), "{:?}", report.results[0].error);
    assert_eq!(report.total_messages, 1);
}

#[test]
fn test_sweep_report_formats() {
    let dir = TempDir::new().unwrap();
    copy_fixture("de.ts", &dir.path().join("de.ts"));
    let report = sweep::run(dir.path(), &Validator::new()).unwrap();

    colored::control::set_override(false);
    assert!(report.render().contains("Catalogs: 1"));

    let json = ReportOutputFormat::Json.serialize(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["catalogs_found"], 1);
    assert_eq!(value["results"][0]["stats"]["language"], "de");
}
