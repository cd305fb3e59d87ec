// SPDX-License-Identifier: PMPL-1.0-or-later

//! Runtime string lookup with fallback to the source text.
//!
//! A [`Translator`] owns a chain of catalogs (most specific first, e.g.
//! `de_AT` then `de`). Lookups walk the chain once and return the source
//! string when no catalog has a usable entry, so the UI always has
//! something to display.
//!
//! Only entries the loader may show are indexed: finished entries with
//! text, plus unfinished ones with text when `include_unfinished` is set.
//! Vanished and obsolete entries never reach the UI.

use crate::lang::PluralRule;
use crate::types::{Catalog, Message, Translation, TranslationStatus};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupPolicy {
    pub include_unfinished: bool,
}

#[derive(Debug)]
struct Entry {
    comment: String,
    translation: Translation,
}

#[derive(Debug)]
struct Layer {
    language: String,
    rule: PluralRule,
    /// context -> source -> entries differing by comment
    index: HashMap<String, HashMap<String, Vec<Entry>>>,
}

impl Layer {
    fn build(catalog: &Catalog, policy: LookupPolicy) -> Self {
        let mut index: HashMap<String, HashMap<String, Vec<Entry>>> = HashMap::new();
        for (context, message) in catalog.messages() {
            if !usable(message, policy) {
                continue;
            }
            index
                .entry(context.to_string())
                .or_default()
                .entry(message.source.clone())
                .or_default()
                .push(Entry {
                    comment: message.comment_key().to_string(),
                    translation: message.translation.clone(),
                });
        }
        Self {
            language: catalog.language_code().to_string(),
            rule: PluralRule::for_language(catalog.language_code()),
            index,
        }
    }

    fn get(&self, context: &str, source: &str, comment: &str) -> Option<&Translation> {
        self.index
            .get(context)?
            .get(source)?
            .iter()
            .find(|entry| entry.comment == comment)
            .map(|entry| &entry.translation)
    }
}

fn usable(message: &Message, policy: LookupPolicy) -> bool {
    let status_ok = match message.status {
        TranslationStatus::Finished => true,
        TranslationStatus::Unfinished => policy.include_unfinished,
        TranslationStatus::Vanished | TranslationStatus::Obsolete => false,
    };
    status_ok && !message.translation.is_empty()
}

/// Immutable after construction, so it can be shared across threads.
#[derive(Debug)]
pub struct Translator {
    layers: Vec<Layer>,
    policy: LookupPolicy,
}

impl Translator {
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_policy(catalog, LookupPolicy::default())
    }

    pub fn with_policy(catalog: &Catalog, policy: LookupPolicy) -> Self {
        Self {
            layers: vec![Layer::build(catalog, policy)],
            policy,
        }
    }

    /// Append a catalog consulted when earlier ones have no entry.
    pub fn with_fallback(mut self, catalog: &Catalog) -> Self {
        self.layers.push(Layer::build(catalog, self.policy));
        self
    }

    /// Languages of the chain, most specific first.
    pub fn languages(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.language.as_str()).collect()
    }

    fn resolve(&self, context: &str, source: &str, comment: Option<&str>) -> Option<(&Layer, &Translation)> {
        let comment = comment.unwrap_or("");
        let exact = self
            .layers
            .iter()
            .find_map(|layer| layer.get(context, source, comment).map(|t| (layer, t)));
        if exact.is_some() || comment.is_empty() {
            return exact;
        }
        self.layers
            .iter()
            .find_map(|layer| layer.get(context, source, "").map(|t| (layer, t)))
    }

    /// Translated text, or `source` itself when nothing usable exists.
    pub fn translate<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
        match self.resolve(context, source, comment) {
            Some((_, Translation::Single(text))) => text,
            // A plural entry looked up without a count shows its first form.
            Some((_, Translation::Plural(forms))) => forms
                .iter()
                .find(|form| !form.is_empty())
                .map(String::as_str)
                .unwrap_or(source),
            None => source,
        }
    }

    /// True when the chain holds a usable entry for the key.
    pub fn contains(&self, context: &str, source: &str, comment: Option<&str>) -> bool {
        self.resolve(context, source, comment).is_some()
    }

    /// Plural-aware lookup. Picks the form for `n` with the plural rule of
    /// the catalog that supplied the entry and replaces `%n` / `%Ln`.
    pub fn translate_n(&self, context: &str, source: &str, comment: Option<&str>, n: i64) -> String {
        let template = match self.resolve(context, source, comment) {
            Some((layer, Translation::Plural(forms))) if !forms.is_empty() => {
                let index = layer.rule.form_index(n).min(forms.len() - 1);
                match forms[index].as_str() {
                    "" => source,
                    form => form,
                }
            }
            Some((_, Translation::Single(text))) => text.as_str(),
            _ => source,
        };
        replace_count(template, n)
    }
}

fn replace_count(template: &str, n: i64) -> String {
    template.replace("%Ln", &n.to_string()).replace("%n", &n.to_string())
}

/// Replace `%1`..`%99` with positional arguments in a single pass.
/// Markers without a matching argument, and `%` not followed by a digit,
/// are left untouched. Substituted text is never rescanned.
///
/// ```
/// use tscat::lookup::substitute;
/// assert_eq!(substitute("%1 (%2)", &["Alice", "online"]), "Alice (online)");
/// assert_eq!(substitute("%1 and %3", &["a"]), "a and %3");
/// ```
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after
            .char_indices()
            .take_while(|(i, c)| *i < 2 && c.is_ascii_digit())
            .count();
        let number = after[..digits].parse::<usize>().ok();
        match number.and_then(|n| n.checked_sub(1)).and_then(|i| args.get(i)) {
            Some(arg) => {
                out.push_str(arg);
                rest = &after[digits..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
