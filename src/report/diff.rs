// SPDX-License-Identifier: PMPL-1.0-or-later

//! Message-level diff between two catalogs.

use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Added,
    Removed,
    TranslationChanged,
    StatusChanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageChange {
    pub kind: ChangeKind,
    pub context: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDiff {
    pub base_label: String,
    pub compare_label: String,
    pub changes: Vec<MessageChange>,
}

impl CatalogDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }
}

fn display_translation(translation: &Translation) -> String {
    match translation {
        Translation::Single(text) => text.clone(),
        Translation::Plural(forms) => forms.join(" | "),
    }
}

fn comment_of(message: &Message) -> Option<String> {
    message.comment.clone().filter(|c| !c.is_empty())
}

/// Compare two catalogs entry by entry, keyed by (context, source, comment).
/// Changes are listed in the order entries appear in `compare`, followed by
/// removals in `base` order.
pub fn diff_catalogs(base: &Catalog, compare: &Catalog, base_label: &str, compare_label: &str) -> CatalogDiff {
    let base_index: HashMap<(&str, &str, &str), &Message> = base
        .messages()
        .map(|(ctx, m)| ((ctx, m.source.as_str(), m.comment_key()), m))
        .collect();
    let compare_index: HashMap<(&str, &str, &str), &Message> = compare
        .messages()
        .map(|(ctx, m)| ((ctx, m.source.as_str(), m.comment_key()), m))
        .collect();

    let mut changes = Vec::new();
    for (context, after) in compare.messages() {
        let key = (context, after.source.as_str(), after.comment_key());
        let change = |kind, before: Option<String>, after_text: Option<String>| MessageChange {
            kind,
            context: context.to_string(),
            source: after.source.clone(),
            comment: comment_of(after),
            before,
            after: after_text,
        };
        match base_index.get(&key) {
            None => changes.push(change(
                ChangeKind::Added,
                None,
                Some(display_translation(&after.translation)),
            )),
            Some(before) => {
                if before.translation != after.translation {
                    changes.push(change(
                        ChangeKind::TranslationChanged,
                        Some(display_translation(&before.translation)),
                        Some(display_translation(&after.translation)),
                    ));
                }
                if before.status != after.status {
                    changes.push(change(
                        ChangeKind::StatusChanged,
                        Some(before.status.to_string()),
                        Some(after.status.to_string()),
                    ));
                }
            }
        }
    }

    for (context, before) in base.messages() {
        let key = (context, before.source.as_str(), before.comment_key());
        if !compare_index.contains_key(&key) {
            changes.push(MessageChange {
                kind: ChangeKind::Removed,
                context: context.to_string(),
                source: before.source.clone(),
                comment: comment_of(before),
                before: Some(display_translation(&before.translation)),
                after: None,
            });
        }
    }

    CatalogDiff {
        base_label: base_label.to_string(),
        compare_label: compare_label.to_string(),
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_every_change_kind() {
        let mut base = Catalog::new("de");
        base.push("AboutDialog", Message::new("License:", "Lizenz"));
        base.push("AboutDialog", Message::unfinished("Report problems"));
        base.push("AboutPage", Message::new("About", "Über"));

        let mut compare = Catalog::new("de");
        compare.push("AboutDialog", Message::new("License:", "Lizenz:"));
        compare.push("AboutDialog", Message::new("Report problems", "Probleme melden"));
        compare.push("ChatPage", Message::unfinished("Send"));

        let diff = diff_catalogs(&base, &compare, "old", "new");
        assert_eq!(diff.count(ChangeKind::Added), 1);
        assert_eq!(diff.count(ChangeKind::Removed), 1);
        assert_eq!(diff.count(ChangeKind::TranslationChanged), 2);
        assert_eq!(diff.count(ChangeKind::StatusChanged), 1);

        let status = diff
            .changes
            .iter()
            .find(|c| c.kind == ChangeKind::StatusChanged)
            .expect("status change");
        assert_eq!(status.before.as_deref(), Some("unfinished"));
        assert_eq!(status.after.as_deref(), Some("finished"));
        assert_eq!(diff.changes.last().map(|c| c.source.as_str()), Some("About"));
    }

    #[test]
    fn identical_catalogs_have_no_changes() {
        let mut catalog = Catalog::new("hy");
        catalog.push("Main", Message::new("Online", "Առցանց"));
        assert!(diff_catalogs(&catalog, &catalog, "a", "b").is_empty());
    }
}
