// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for merging translated catalogs with extracted templates

use std::path::Path;
use tscat::sync::{sync, SyncOptions, SyncSummary};
use tscat::ts;
use tscat::types::*;

fn load(name: &str) -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    ts::load(&path).expect("fixture should parse")
}

fn status(catalog: &Catalog, context: &str, source: &str, comment: &str) -> Option<TranslationStatus> {
    catalog.find(context, source, comment).map(|m| m.status)
}

#[test]
fn test_sync_fixture_lifecycle() {
    let (merged, summary) = sync(&load("de.ts"), &load("template.ts"), &SyncOptions::default());

    assert_eq!(
        summary,
        SyncSummary {
            kept: 5,
            revived: 1,
            added: 1,
            same_text: 0,
            vanished: 3,
            obsoleted: 1,
            dropped: 1,
        }
    );
    assert_eq!(merged.language.as_deref(), Some("de"));

    // Revived and refreshed from the template.
    let github = merged
        .find("AboutDialog", "Source code on GitHub", "")
        .expect("revived entry");
    assert_eq!(github.status, TranslationStatus::Finished);
    assert_eq!(github.locations[0].line.as_deref(), Some("66"));

    // Empty unfinished entries are dropped when they disappear.
    assert!(merged.find("AboutDialog", "Report problems", "").is_none());

    assert_eq!(status(&merged, "ChatPage", "Open", "verb"), Some(TranslationStatus::Vanished));
    assert_eq!(
        status(&merged, "ChatPage", "Could not connect to the server.", ""),
        Some(TranslationStatus::Obsolete)
    );
    assert_eq!(
        status(&merged, "SettingsPage", "Multimedia settings", ""),
        Some(TranslationStatus::Obsolete)
    );
    assert_eq!(
        status(&merged, "ChatPage", "Multimedia settings", ""),
        Some(TranslationStatus::Unfinished)
    );

    let kept = merged
        .find("SettingsPage", "Don't show <b>again</b>", "")
        .expect("kept entry");
    assert_eq!(kept.translator_comment.as_deref(), Some("Matches the desktop wording"));
}

#[test]
fn test_sync_keeps_template_order_then_retired() {
    let (merged, _) = sync(&load("de.ts"), &load("template.ts"), &SyncOptions::default());
    let chat: Vec<&str> = merged
        .context("ChatPage")
        .expect("ChatPage")
        .messages
        .iter()
        .map(|m| m.source.as_str())
        .collect();
    assert_eq!(
        chat,
        [
            "Send",
            "%n new message(s)",
            "Multimedia settings",
            "%1 is typing…",
            "Open",
            "Open",
            "Could not connect to the server.",
        ]
    );
}

#[test]
fn test_sync_is_idempotent() {
    let template = load("template.ts");
    let options = SyncOptions::default();
    let (once, _) = sync(&load("de.ts"), &template, &options);
    let (twice, summary) = sync(&once, &template, &options);
    assert!(summary.is_noop(), "{summary:?}");
    assert_eq!(twice, once);
    assert_eq!(ts::to_string(&twice), ts::to_string(&once));
}

#[test]
fn test_sync_drop_obsolete() {
    let options = SyncOptions {
        drop_obsolete: true,
        ..SyncOptions::default()
    };
    let (merged, summary) = sync(&load("de.ts"), &load("template.ts"), &options);
    assert_eq!(summary.vanished, 0);
    assert_eq!(summary.obsoleted, 0);
    assert_eq!(summary.dropped, 6);
    assert!(merged
        .messages()
        .all(|(_, m)| m.is_active()));
}

#[test]
fn test_sync_same_text_prefill() {
    let mut template = load("template.ts");
    template.push("Toolbar", Message::unfinished("Send"));

    let (merged, summary) = sync(&load("de.ts"), &template, &SyncOptions::default());
    assert_eq!(summary.same_text, 1);
    let send = merged.find("Toolbar", "Send", "").expect("prefilled");
    assert_eq!(send.status, TranslationStatus::Unfinished);
    assert_eq!(send.translation, Translation::Single("Senden".into()));

    let options = SyncOptions {
        no_same_text: true,
        ..SyncOptions::default()
    };
    let (plain, summary) = sync(&load("de.ts"), &template, &options);
    assert_eq!(summary.same_text, 0);
    assert!(plain.find("Toolbar", "Send", "").expect("added").translation.is_empty());
}

#[test]
fn test_sync_into_empty_catalog() {
    let template = load("template.ts");
    let existing = Catalog::new("hy");
    let (merged, summary) = sync(&existing, &template, &SyncOptions::default());
    assert_eq!(summary.added, template.message_count());
    assert_eq!(merged.language.as_deref(), Some("hy"));
    assert!(merged.messages().all(|(_, m)| m.status == TranslationStatus::Unfinished));
}

fn numerus_template(numerus: bool) -> Catalog {
    let mut template = Catalog::default();
    let mut message = Message::unfinished("%n file(s)");
    message.numerus = numerus;
    template.push("FileModel", message);
    template
}

#[test]
fn test_sync_plain_entry_becomes_plural() {
    let mut existing = Catalog::new("de");
    existing.push("FileModel", Message::new("%n file(s)", "%n Datei(en)"));

    let (merged, summary) = sync(&existing, &numerus_template(true), &SyncOptions::default());
    assert_eq!(summary.kept, 1);

    let entry = merged.find("FileModel", "%n file(s)", "").expect("kept");
    assert!(entry.numerus);
    assert_eq!(entry.status, TranslationStatus::Unfinished);
    assert_eq!(
        entry.translation,
        Translation::Plural(vec!["%n Datei(en)".to_string(), String::new()])
    );
    assert!(tscat::validate::roundtrip(&merged).is_empty());
}

#[test]
fn test_sync_plural_entry_becomes_plain() {
    let mut existing = Catalog::new("de");
    let mut message = Message::new("%n file(s)", "");
    message.numerus = true;
    message.translation = Translation::Plural(vec!["%n Datei".into(), "%n Dateien".into()]);
    existing.push("FileModel", message);

    let (merged, _) = sync(&existing, &numerus_template(false), &SyncOptions::default());
    let entry = merged.find("FileModel", "%n file(s)", "").expect("kept");
    assert!(!entry.numerus);
    assert_eq!(entry.status, TranslationStatus::Unfinished);
    assert_eq!(entry.translation, Translation::Single("%n Datei".into()));
    assert!(tscat::validate::roundtrip(&merged).is_empty());
}
