// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for tscat
//!
//! Mirrors the structure of a Qt Linguist `.ts` file: a catalog holds
//! contexts, a context holds messages, and each message pairs a source
//! string with its translation and lifecycle status.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a translation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Current translation, used at runtime
    #[default]
    Finished,
    /// Pending, waiting for a translator
    Unfinished,
    /// Source string was removed after being translated
    Vanished,
    /// Source string was removed while the entry was still unfinished
    Obsolete,
}

impl TranslationStatus {
    /// Parse the `type` attribute of a `<translation>` element.
    pub fn from_attr(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("") => Ok(TranslationStatus::Finished),
            Some("unfinished") => Ok(TranslationStatus::Unfinished),
            Some("vanished") => Ok(TranslationStatus::Vanished),
            Some("obsolete") => Ok(TranslationStatus::Obsolete),
            Some(other) => bail!("unknown translation type '{}'", other),
        }
    }

    /// Value written to the `type` attribute, `None` for finished entries.
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Vanished => Some("vanished"),
            TranslationStatus::Obsolete => Some("obsolete"),
        }
    }

    /// Finished and unfinished entries still belong to the application.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TranslationStatus::Finished | TranslationStatus::Unfinished
        )
    }

    pub fn all() -> [TranslationStatus; 4] {
        [
            TranslationStatus::Finished,
            TranslationStatus::Unfinished,
            TranslationStatus::Vanished,
            TranslationStatus::Obsolete,
        ]
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TranslationStatus::Finished => "finished",
            TranslationStatus::Unfinished => "unfinished",
            TranslationStatus::Vanished => "vanished",
            TranslationStatus::Obsolete => "obsolete",
        };
        f.write_str(label)
    }
}

/// Translated text of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Translation {
    Single(String),
    /// One entry per plural form, in the order of the language's plural rule
    Plural(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Single(String::new())
    }
}

impl Translation {
    /// True when there is no text at all. A plural translation is empty
    /// when every form is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Single(text) => text.is_empty(),
            Translation::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// True when every form carries text.
    pub fn is_complete(&self) -> bool {
        match self {
            Translation::Single(text) => !text.is_empty(),
            Translation::Plural(forms) => {
                !forms.is_empty() && forms.iter().all(|form| !form.is_empty())
            }
        }
    }

    pub fn forms(&self) -> &[String] {
        match self {
            Translation::Single(text) => std::slice::from_ref(text),
            Translation::Plural(forms) => forms,
        }
    }
}

/// Where a source string appears in the application sources
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Kept verbatim; lupdate writes relative offsets such as `+3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

/// A single translatable string
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numerus: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// Disambiguation comment, part of the lookup key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    pub translation: Translation,
    pub status: TranslationStatus,
}

impl Message {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: Translation::Single(translation.into()),
            ..Self::default()
        }
    }

    /// Fresh unfinished entry with no translation.
    pub fn unfinished(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            status: TranslationStatus::Unfinished,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Disambiguation comment, with an absent comment treated as empty.
    pub fn comment_key(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_translated(&self) -> bool {
        self.status == TranslationStatus::Finished && self.translation.is_complete()
    }

    /// Same (source, comment) key as `other`.
    pub fn same_key(&self, other: &Message) -> bool {
        self.source == other.source && self.comment_key() == other.comment_key()
    }
}

/// Strings displayed by one UI component
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn find(&self, source: &str, comment: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.source == source && m.comment_key() == comment)
    }

    pub fn find_mut(&mut self, source: &str, comment: &str) -> Option<&mut Message> {
        self.messages
            .iter_mut()
            .find(|m| m.source == source && m.comment_key() == comment)
    }
}

pub const DEFAULT_FORMAT_VERSION: &str = "2.1";

/// A translation catalog for one target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: DEFAULT_FORMAT_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// Target language code, or an empty string when the catalog has none.
    pub fn language_code(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Every message paired with the name of its context, in file order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c.name.as_str(), m)))
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn context_mut_or_insert(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[index]
    }

    pub fn find(&self, context: &str, source: &str, comment: &str) -> Option<&Message> {
        self.context(context)
            .and_then(|ctx| ctx.find(source, comment))
    }

    /// Append a message to the named context, creating the context if needed.
    pub fn push(&mut self, context: &str, message: Message) {
        self.context_mut_or_insert(context).messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_attr_mapping() {
        for status in TranslationStatus::all() {
            let parsed = TranslationStatus::from_attr(status.as_attr()).expect("known status");
            assert_eq!(parsed, status);
        }
        assert!(TranslationStatus::from_attr(Some("done")).is_err());
    }

    #[test]
    fn plural_translation_emptiness() {
        let partial = Translation::Plural(vec!["eine Datei".into(), String::new()]);
        assert!(!partial.is_empty());
        assert!(!partial.is_complete());
        assert!(!Translation::Plural(vec![]).is_complete());
    }

    #[test]
    fn catalog_push_groups_by_context() {
        let mut catalog = Catalog::new("de");
        catalog.push("AboutDialog", Message::new("License:", "Lizenz:"));
        catalog.push("ChatPage", Message::unfinished("Send"));
        catalog.push("AboutDialog", Message::new("Close", "Schließen"));

        assert_eq!(catalog.contexts.len(), 2);
        assert_eq!(catalog.message_count(), 3);
        assert_eq!(
            catalog.find("AboutDialog", "Close", "").map(|m| m.status),
            Some(TranslationStatus::Finished)
        );
        let order: Vec<_> = catalog.messages().map(|(ctx, m)| (ctx, m.source.as_str())).collect();
        assert_eq!(
            order,
            vec![
                ("AboutDialog", "License:"),
                ("AboutDialog", "Close"),
                ("ChatPage", "Send")
            ]
        );
    }

    #[test]
    fn comment_is_part_of_the_key() {
        let mut ctx = Context::new("RosterPage");
        ctx.messages.push(Message::new("Open", "Öffnen").with_comment("verb"));
        assert!(ctx.find("Open", "").is_none());
        assert!(ctx.find("Open", "verb").is_some());
    }
}
