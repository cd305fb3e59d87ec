// SPDX-License-Identifier: PMPL-1.0-or-later

//! Individual validation checks

use super::{Issue, IssueKind};
use crate::lang::{self, PluralRule};
use crate::types::*;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

const SUPPORTED_VERSIONS: &[&str] = &["1.1", "2.0", "2.1"];

pub fn check_header(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();
    match catalog.language.as_deref() {
        None | Some("") => issues.push(Issue::new(
            IssueKind::UnknownLanguage,
            "",
            None,
            "catalog declares no target language",
        )),
        Some(language) if !lang::is_valid_locale(language) => issues.push(Issue::new(
            IssueKind::UnknownLanguage,
            "",
            None,
            format!("'{}' is not an ISO 639-1 based locale", language),
        )),
        Some(_) => {}
    }
    if !SUPPORTED_VERSIONS.contains(&catalog.version.as_str()) {
        issues.push(Issue::new(
            IssueKind::UnsupportedVersion,
            "",
            None,
            format!("format version '{}'", catalog.version),
        ));
    }
    issues
}

pub fn check_context(context: &Context) -> Vec<Issue> {
    let mut issues = Vec::new();
    if context.name.trim().is_empty() {
        issues.push(Issue::new(
            IssueKind::EmptyContextName,
            &context.name,
            None,
            format!("context with {} messages has no name", context.messages.len()),
        ));
    }

    let mut seen = HashSet::new();
    for message in &context.messages {
        if !seen.insert((message.source.as_str(), message.comment_key())) {
            let detail = match message.comment.as_deref() {
                Some(comment) if !comment.is_empty() => {
                    format!("source appears more than once (comment '{}')", comment)
                }
                _ => "source appears more than once".to_string(),
            };
            issues.push(Issue::new(
                IssueKind::DuplicateMessage,
                &context.name,
                Some(&message.source),
                detail,
            ));
        }
    }
    issues
}

pub fn check_message(catalog: &Catalog, context: &str, message: &Message) -> Vec<Issue> {
    let mut issues = Vec::new();
    let source = Some(message.source.as_str());

    if message.source.is_empty() {
        issues.push(Issue::new(
            IssueKind::EmptySource,
            context,
            None,
            "message has an empty source string",
        ));
    }

    if message.status == TranslationStatus::Finished && !message.translation.is_complete() {
        issues.push(Issue::new(
            IssueKind::MissingTranslation,
            context,
            source,
            "entry is marked finished but has no translation text",
        ));
    }

    // Retired entries are not shown, so only active ones get text checks.
    if !message.is_active() || message.translation.is_empty() {
        return issues;
    }

    if message.numerus {
        if let Some(language) = catalog.language.as_deref().filter(|l| !l.is_empty()) {
            let expected = PluralRule::for_language(language).form_count();
            let actual = message.translation.forms().len();
            if actual != expected {
                issues.push(Issue::new(
                    IssueKind::NumerusFormCount,
                    context,
                    source,
                    format!("{} plural forms, '{}' uses {}", actual, language, expected),
                ));
            }
        }
    }

    let source_markers = place_markers(&message.source, message.numerus);
    for form in message.translation.forms().iter().filter(|f| !f.is_empty()) {
        let markers = place_markers(form, message.numerus);
        if markers != source_markers {
            issues.push(Issue::new(
                IssueKind::PlaceholderMismatch,
                context,
                source,
                format!(
                    "source uses {} but translation '{}' uses {}",
                    fmt_markers(&source_markers),
                    form,
                    fmt_markers(&markers)
                ),
            ));
        }

        if has_accelerator(&message.source) != has_accelerator(form) {
            issues.push(Issue::new(
                IssueKind::AcceleratorMismatch,
                context,
                source,
                format!("accelerator differs in translation '{}'", form),
            ));
        }

        let expected = ending_punctuation(&message.source);
        let actual = ending_punctuation(form);
        if expected != actual {
            issues.push(Issue::new(
                IssueKind::PunctuationMismatch,
                context,
                source,
                format!(
                    "source ends with {} but translation '{}' ends with {}",
                    expected.map(Punctuation::name).unwrap_or("no punctuation"),
                    form,
                    actual.map(Punctuation::name).unwrap_or("no punctuation")
                ),
            ));
        }
    }

    issues
}

fn marker_regex() -> &'static Regex {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    MARKERS.get_or_init(|| Regex::new(r"%L?([1-9][0-9]?|n)").expect("static regex"))
}

/// Numbered place markers (`%1`, `%L2`) in `text`. `%n` is included only
/// for non-numerus messages, where it has no special meaning.
pub fn place_markers(text: &str, numerus: bool) -> BTreeSet<String> {
    marker_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|marker| !(numerus && marker == "n"))
        .collect()
}

fn fmt_markers(markers: &BTreeSet<String>) -> String {
    if markers.is_empty() {
        return "no place markers".to_string();
    }
    markers
        .iter()
        .map(|m| format!("%{}", m))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A keyboard accelerator is `&` followed by a letter or digit; `&&` is a
/// literal ampersand.
pub fn has_accelerator(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '&' {
            match chars.get(i + 1) {
                Some('&') => {
                    i += 2;
                    continue;
                }
                Some(c) if c.is_alphanumeric() => return true,
                _ => {}
            }
        }
        i += 1;
    }
    false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
    Period,
    Exclamation,
    Question,
    Colon,
    Semicolon,
    Ellipsis,
}

impl Punctuation {
    pub fn name(self) -> &'static str {
        match self {
            Punctuation::Period => "a period",
            Punctuation::Exclamation => "an exclamation mark",
            Punctuation::Question => "a question mark",
            Punctuation::Colon => "a colon",
            Punctuation::Semicolon => "a semicolon",
            Punctuation::Ellipsis => "an ellipsis",
        }
    }
}

/// Ending punctuation class, treating script-specific marks (Armenian
/// `։`, CJK `。`) as their Latin counterparts.
pub fn ending_punctuation(text: &str) -> Option<Punctuation> {
    let trimmed = text.trim_end();
    if trimmed.ends_with("...") || trimmed.ends_with('…') {
        return Some(Punctuation::Ellipsis);
    }
    match trimmed.chars().last()? {
        '.' | '։' | '。' | '।' => Some(Punctuation::Period),
        '!' | '！' => Some(Punctuation::Exclamation),
        '?' | '？' | '՞' => Some(Punctuation::Question),
        ':' | '：' => Some(Punctuation::Colon),
        ';' | '；' => Some(Punctuation::Semicolon),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues_for(language: &str, message: Message) -> Vec<Issue> {
        let mut catalog = Catalog::new(language);
        catalog.push("Ctx", message.clone());
        check_message(&catalog, "Ctx", &message)
    }

    fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn finished_without_text_is_missing() {
        let issues = issues_for("de", Message::new("License:", ""));
        assert_eq!(kinds(&issues), vec![IssueKind::MissingTranslation]);
    }

    #[test]
    fn unfinished_without_text_is_fine() {
        assert!(issues_for("de", Message::unfinished("Report problems")).is_empty());
    }

    #[test]
    fn vanished_entries_skip_text_checks() {
        let message = Message::new("%1 (%2)", "nope").with_status(TranslationStatus::Vanished);
        assert!(issues_for("de", message).is_empty());
    }

    #[test]
    fn detects_place_marker_mismatch() {
        let issues = issues_for("de", Message::new("%1 (%2)", "%1"));
        assert_eq!(kinds(&issues), vec![IssueKind::PlaceholderMismatch]);
        assert!(issues[0].detail.contains("%1, %2"));
        assert!(issues_for("de", Message::new("%1 (%2)", "%2 (%L1)")).is_empty());
    }

    #[test]
    fn numerus_ignores_count_marker_and_checks_form_count() {
        let mut message = Message::new("%n day(s)", "");
        message.numerus = true;
        message.translation = Translation::Plural(vec!["ein Tag".into(), "%n Tage".into()]);
        assert!(issues_for("de", message.clone()).is_empty());

        let issues = issues_for("sl", message);
        assert_eq!(kinds(&issues), vec![IssueKind::NumerusFormCount]);
    }

    #[test]
    fn accelerators_and_punctuation() {
        let issues = issues_for("it", Message::new("&Quit", "Esci"));
        assert_eq!(kinds(&issues), vec![IssueKind::AcceleratorMismatch]);
        assert!(!has_accelerator("Q&&A"));
        assert!(!has_accelerator("Tom & Jerry"));

        let issues = issues_for("it", Message::new("Connecting…", "Connessione"));
        assert_eq!(kinds(&issues), vec![IssueKind::PunctuationMismatch]);
        assert!(issues_for("hy", Message::new("Done.", "Պատրաստ է։")).is_empty());
        assert!(issues_for("de", Message::new("Wait...", "Warten…")).is_empty());
    }

    #[test]
    fn duplicate_keys_respect_comment() {
        let mut context = Context::new("RosterPage");
        context.messages.push(Message::new("Open", "Öffnen"));
        context.messages.push(Message::new("Open", "Offen").with_comment("adjective"));
        assert!(check_context(&context).is_empty());

        context.messages.push(Message::new("Open", "Auf").with_status(TranslationStatus::Vanished));
        let issues = check_context(&context);
        assert_eq!(kinds(&issues), vec![IssueKind::DuplicateMessage]);
    }

    #[test]
    fn header_checks() {
        let mut catalog = Catalog::default();
        assert_eq!(kinds(&check_header(&catalog)), vec![IssueKind::UnknownLanguage]);
        catalog.language = Some("sl_SI".into());
        assert!(check_header(&catalog).is_empty());
        catalog.version = "3.0".into();
        assert_eq!(kinds(&check_header(&catalog)), vec![IssueKind::UnsupportedVersion]);
    }
}
