// SPDX-License-Identifier: PMPL-1.0-or-later

//! Entry lifecycle: merge a translated catalog with a freshly extracted
//! template.
//!
//! New source strings become unfinished entries, retired ones are kept as
//! vanished (finished before) or obsolete (unfinished before) so
//! translation history survives, and strings that come back are revived.

use crate::lang::PluralRule;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Drop retired entries instead of keeping them as vanished/obsolete.
    #[serde(default)]
    pub drop_obsolete: bool,
    /// Skip reusing translations of identical strings from other contexts.
    #[serde(default)]
    pub no_same_text: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Template entries that already existed
    pub kept: usize,
    /// Previously retired entries that are in use again
    pub revived: usize,
    /// New entries with no translation
    pub added: usize,
    /// New entries pre-filled from an identical string elsewhere
    pub same_text: usize,
    /// Finished entries retired as vanished
    pub vanished: usize,
    /// Unfinished entries retired as obsolete
    pub obsoleted: usize,
    /// Entries removed outright
    pub dropped: usize,
}

impl SyncSummary {
    pub fn is_noop(&self) -> bool {
        self.revived == 0
            && self.added == 0
            && self.same_text == 0
            && self.vanished == 0
            && self.obsoleted == 0
            && self.dropped == 0
    }
}

type Key = (String, String, String);

fn key(context: &str, message: &Message) -> Key {
    (
        context.to_string(),
        message.source.clone(),
        message.comment_key().to_string(),
    )
}

/// Merge `existing` translations into the structure of `template`.
///
/// The result keeps the header of `existing` and the context/message
/// order of `template`; retired entries follow the live ones of their
/// context and contexts that only exist in `existing` come last.
pub fn sync(existing: &Catalog, template: &Catalog, options: &SyncOptions) -> (Catalog, SyncSummary) {
    let mut summary = SyncSummary::default();
    let mut result = Catalog {
        version: existing.version.clone(),
        language: existing.language.clone(),
        source_language: existing
            .source_language
            .clone()
            .or_else(|| template.source_language.clone()),
        contexts: Vec::new(),
    };

    let form_count = PluralRule::for_language(existing.language_code()).form_count();
    let template_keys: HashSet<Key> = template.messages().map(|(c, m)| key(c, m)).collect();
    let same_text = if options.no_same_text {
        HashMap::new()
    } else {
        same_text_index(existing)
    };

    for template_context in &template.contexts {
        let old_context = existing.context(&template_context.name);
        let mut context = Context {
            name: template_context.name.clone(),
            comment: template_context
                .comment
                .clone()
                .or_else(|| old_context.and_then(|c| c.comment.clone())),
            messages: Vec::new(),
        };

        for template_message in &template_context.messages {
            let previous = old_context
                .and_then(|c| c.find(&template_message.source, template_message.comment_key()));
            let merged = match previous {
                Some(previous) => {
                    let merged = refresh(previous, template_message, form_count);
                    if previous.is_active() {
                        summary.kept += 1;
                    } else {
                        summary.revived += 1;
                    }
                    merged
                }
                None => {
                    let mut fresh = refresh(&Message::default(), template_message, form_count);
                    fresh.status = TranslationStatus::Unfinished;
                    fresh.translation = empty_translation(template_message, form_count);
                    let text_key = (
                        template_message.source.clone(),
                        template_message.comment_key().to_string(),
                    );
                    match same_text.get(&text_key) {
                        Some(translation) if shape_matches(translation, template_message) => {
                            fresh.translation = translation.clone();
                            summary.same_text += 1;
                        }
                        _ => summary.added += 1,
                    }
                    fresh
                }
            };
            context.messages.push(merged);
        }

        if let Some(old_context) = old_context {
            retire(old_context, &template_keys, &mut context, options, &mut summary);
        }
        result.contexts.push(context);
    }

    for old_context in &existing.contexts {
        if template.context(&old_context.name).is_some() {
            continue;
        }
        let mut context = Context {
            name: old_context.name.clone(),
            comment: old_context.comment.clone(),
            messages: Vec::new(),
        };
        retire(old_context, &template_keys, &mut context, options, &mut summary);
        if !context.messages.is_empty() {
            result.contexts.push(context);
        } else {
            debug!(context = %old_context.name, "dropping context with no remaining entries");
        }
    }

    info!(
        kept = summary.kept,
        revived = summary.revived,
        added = summary.added,
        same_text = summary.same_text,
        vanished = summary.vanished,
        obsoleted = summary.obsoleted,
        dropped = summary.dropped,
        "synced catalog"
    );
    (result, summary)
}

/// Carry the translation of `previous` over the template's metadata.
fn refresh(previous: &Message, template: &Message, form_count: usize) -> Message {
    let mut status = match previous.status {
        TranslationStatus::Vanished => TranslationStatus::Finished,
        TranslationStatus::Obsolete => TranslationStatus::Unfinished,
        status => status,
    };
    let translation = if previous.numerus == template.numerus {
        previous.translation.clone()
    } else {
        debug!(source = %template.source, numerus = template.numerus, "plural shape changed");
        // The old text is only a starting point for the new shape.
        status = TranslationStatus::Unfinished;
        reshape(&previous.translation, template.numerus, form_count)
    };
    Message {
        id: template.id.clone(),
        numerus: template.numerus,
        locations: template.locations.clone(),
        source: template.source.clone(),
        old_source: previous.old_source.clone(),
        comment: template.comment.clone(),
        old_comment: previous.old_comment.clone(),
        extra_comment: template.extra_comment.clone(),
        translator_comment: previous.translator_comment.clone(),
        translation,
        status,
    }
}

/// Convert between plain and plural text, keeping the first form.
fn reshape(translation: &Translation, numerus: bool, form_count: usize) -> Translation {
    let first = translation
        .forms()
        .iter()
        .find(|form| !form.is_empty())
        .cloned()
        .unwrap_or_default();
    if numerus {
        let mut forms = vec![String::new(); form_count.max(1)];
        forms[0] = first;
        Translation::Plural(forms)
    } else {
        Translation::Single(first)
    }
}

/// lupdate writes one empty `<numerusform>` per plural form.
fn empty_translation(template: &Message, form_count: usize) -> Translation {
    if template.numerus {
        Translation::Plural(vec![String::new(); form_count])
    } else {
        Translation::Single(String::new())
    }
}

fn shape_matches(translation: &Translation, template: &Message) -> bool {
    matches!(
        (translation, template.numerus),
        (Translation::Single(_), false) | (Translation::Plural(_), true)
    )
}

/// Finished translations keyed by (source, comment), first occurrence wins.
fn same_text_index(catalog: &Catalog) -> HashMap<(String, String), Translation> {
    let mut index = HashMap::new();
    for (_, message) in catalog.messages() {
        if message.is_translated() {
            index
                .entry((message.source.clone(), message.comment_key().to_string()))
                .or_insert_with(|| message.translation.clone());
        }
    }
    index
}

/// Append the entries of `old_context` that the template no longer has.
fn retire(
    old_context: &Context,
    template_keys: &HashSet<Key>,
    into: &mut Context,
    options: &SyncOptions,
    summary: &mut SyncSummary,
) {
    let mut live = HashSet::new();
    for message in &old_context.messages {
        if template_keys.contains(&key(&old_context.name, message)) {
            // The first copy was merged; later duplicates have nowhere to go.
            if !live.insert((message.source.as_str(), message.comment_key())) {
                debug!(
                    context = %old_context.name,
                    source = %message.source,
                    "dropping duplicate entry"
                );
                summary.dropped += 1;
            }
            continue;
        }
        if options.drop_obsolete || message.translation.is_empty() {
            summary.dropped += 1;
            continue;
        }
        let mut retired = message.clone();
        match message.status {
            TranslationStatus::Finished => {
                retired.status = TranslationStatus::Vanished;
                summary.vanished += 1;
            }
            TranslationStatus::Unfinished => {
                retired.status = TranslationStatus::Obsolete;
                summary.obsoleted += 1;
            }
            TranslationStatus::Vanished | TranslationStatus::Obsolete => {}
        }
        into.messages.push(retired);
    }
}
