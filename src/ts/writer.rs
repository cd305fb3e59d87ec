// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serializer producing the layout lupdate writes, so rewritten catalogs
//! produce minimal diffs in version control.

use crate::types::*;
use anyhow::{Context as _, Result};
use quick_xml::escape::escape;
use std::fs;
use std::path::Path;
use tracing::debug;

const INDENT_MESSAGE: &str = "    ";
const INDENT_FIELD: &str = "        ";
const INDENT_FORM: &str = "            ";

/// Render a catalog as `.ts` XML.
pub fn to_string(catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    lines.push(r#"<?xml version="1.0" encoding="utf-8"?>"#.to_string());
    lines.push("<!DOCTYPE TS>".to_string());

    let mut root = format!("<TS version=\"{}\"", escape(catalog.version.as_str()));
    if let Some(language) = &catalog.language {
        root.push_str(&format!(" language=\"{}\"", escape(language.as_str())));
    }
    if let Some(source_language) = &catalog.source_language {
        root.push_str(&format!(
            " sourcelanguage=\"{}\"",
            escape(source_language.as_str())
        ));
    }
    root.push('>');
    lines.push(root);

    for context in &catalog.contexts {
        lines.push("<context>".to_string());
        lines.push(element(INDENT_MESSAGE, "name", &context.name));
        if let Some(comment) = &context.comment {
            lines.push(element(INDENT_MESSAGE, "comment", comment));
        }
        for message in &context.messages {
            write_message(&mut lines, message);
        }
        lines.push("</context>".to_string());
    }

    lines.push("</TS>".to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write a catalog to disk, creating parent directories as needed.
pub fn save(catalog: &Catalog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    fs::write(path, to_string(catalog))
        .with_context(|| format!("writing catalog {}", path.display()))?;
    debug!(path = %path.display(), messages = catalog.message_count(), "saved catalog");
    Ok(())
}

fn write_message(lines: &mut Vec<String>, message: &Message) {
    let mut open = format!("{}<message", INDENT_MESSAGE);
    if let Some(id) = &message.id {
        open.push_str(&format!(" id=\"{}\"", escape(id.as_str())));
    }
    if message.numerus {
        open.push_str(" numerus=\"yes\"");
    }
    open.push('>');
    lines.push(open);

    for location in &message.locations {
        let mut tag = format!("{}<location", INDENT_FIELD);
        if let Some(filename) = &location.filename {
            tag.push_str(&format!(" filename=\"{}\"", escape(filename.as_str())));
        }
        if let Some(line) = &location.line {
            tag.push_str(&format!(" line=\"{}\"", escape(line.as_str())));
        }
        tag.push_str("/>");
        lines.push(tag);
    }

    lines.push(element(INDENT_FIELD, "source", &message.source));
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (tag, value) in optional {
        if let Some(value) = value {
            lines.push(element(INDENT_FIELD, tag, value));
        }
    }

    let status = match message.status.as_attr() {
        Some(kind) => format!(" type=\"{}\"", kind),
        None => String::new(),
    };
    match &message.translation {
        Translation::Plural(forms) if !forms.is_empty() => {
            lines.push(format!("{}<translation{}>", INDENT_FIELD, status));
            for form in forms {
                lines.push(element(INDENT_FORM, "numerusform", form));
            }
            lines.push(format!("{}</translation>", INDENT_FIELD));
        }
        Translation::Plural(_) => {
            lines.push(format!("{}<translation{}></translation>", INDENT_FIELD, status));
        }
        Translation::Single(text) => {
            lines.push(format!(
                "{}<translation{}>{}</translation>",
                INDENT_FIELD,
                status,
                escape_text(text)
            ));
        }
    }

    lines.push(format!("{}</message>", INDENT_MESSAGE));
}

fn element(indent: &str, tag: &str, text: &str) -> String {
    format!("{indent}<{tag}>{}</{tag}>", escape_text(text))
}

/// Escape element text. Control characters XML cannot carry are written
/// as `<byte value="xNN"/>` elements.
pub(crate) fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut plain_start = 0;
    for (index, ch) in raw.char_indices() {
        if ch.is_control() && !matches!(ch, '\n' | '\r' | '\t') {
            out.push_str(&escape(&raw[plain_start..index]));
            out.push_str(&format!("<byte value=\"x{:x}\"/>", ch as u32));
            plain_start = index + ch.len_utf8();
        }
    }
    out.push_str(&escape(&raw[plain_start..]));
    out
}
