// SPDX-License-Identifier: PMPL-1.0-or-later

//! Streaming parser for Qt Linguist `.ts` catalogs

use crate::types::*;
use anyhow::{anyhow, bail, Context as _, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Load and parse a catalog file.
pub fn load(path: &Path) -> Result<Catalog> {
    let bytes = fs::read(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog =
        parse_bytes(&bytes).with_context(|| format!("parsing catalog {}", path.display()))?;
    debug!(
        path = %path.display(),
        language = catalog.language_code(),
        contexts = catalog.contexts.len(),
        messages = catalog.message_count(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Parse raw catalog bytes, honouring a byte order mark or the `encoding`
/// of the XML declaration.
pub fn parse_bytes(bytes: &[u8]) -> Result<Catalog> {
    let text = decode(bytes)?;
    parse(&text)
}

fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            bail!("catalog is not valid {}", encoding.name());
        }
        return Ok(text);
    }

    let label = declared_encoding(bytes);
    let encoding = match label.as_deref() {
        None => encoding_rs::UTF_8,
        Some(label) => encoding_rs::Encoding::for_label(label.as_bytes())
            .ok_or_else(|| anyhow!("unsupported catalog encoding '{}'", label))?,
    };
    if encoding == encoding_rs::UTF_8 {
        return std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .context("catalog is not valid UTF-8");
    }
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        bail!("catalog is not valid {}", encoding.name());
    }
    Ok(text)
}

fn declared_encoding(bytes: &[u8]) -> Option<String> {
    static DECLARATION: OnceLock<Regex> = OnceLock::new();
    let re = DECLARATION.get_or_init(|| {
        Regex::new(r#"^\s*<\?xml[^>]*\bencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
            .expect("static regex")
    });
    // The declaration is ASCII in every encoding we accept.
    let head_len = bytes.len().min(200);
    let head = String::from_utf8_lossy(&bytes[..head_len]);
    re.captures(&head).map(|caps| caps[1].to_string())
}

/// Parse catalog text.
pub fn parse(raw: &str) -> Result<Catalog> {
    let mut reader = Reader::from_str(raw);
    let mut builder = Builder::default();

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|err| anyhow!("line {}: {}", line_at(raw, reader.buffer_position() as usize), err))?;
        let step = match event {
            Event::Start(ref e) => builder.open(e),
            Event::Empty(ref e) => builder
                .open(e)
                .and_then(|_| builder.close(e.name().as_ref())),
            Event::End(ref e) => builder.close(e.name().as_ref()),
            Event::Text(ref e) => e
                .unescape()
                .map_err(anyhow::Error::from)
                .map(|text| builder.text(&text)),
            Event::CData(ref e) => {
                builder.text(&String::from_utf8_lossy(e));
                Ok(())
            }
            Event::Eof => break,
            _ => Ok(()),
        };
        step.map_err(|err| anyhow!("line {}: {:#}", line_at(raw, position), err))?;
    }

    builder.finish()
}

fn line_at(raw: &str, offset: usize) -> usize {
    let end = offset.min(raw.len());
    raw.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn attributes(e: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

fn attribute<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Text-bearing element currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ContextName,
    ContextComment,
    Source,
    OldSource,
    Comment,
    OldComment,
    ExtraComment,
    TranslatorComment,
    Translation,
    NumerusForm,
    LengthVariant,
}

impl Field {
    fn for_message_child(name: &str) -> Option<Self> {
        match name {
            "source" => Some(Field::Source),
            "oldsource" => Some(Field::OldSource),
            "comment" => Some(Field::Comment),
            "oldcomment" => Some(Field::OldComment),
            "extracomment" => Some(Field::ExtraComment),
            "translatorcomment" => Some(Field::TranslatorComment),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Builder {
    catalog: Option<Catalog>,
    closed: bool,
    context: Option<Context>,
    message: Option<Message>,
    saw_translation: bool,
    field: Option<Field>,
    text: String,
    forms: Vec<String>,
    /// `<lengthvariant>` texts of the open translation or plural form
    variants: Vec<String>,
    variant_parent: Option<Field>,
    /// Depth inside an element we do not understand
    skip_depth: usize,
    in_byte: bool,
}

impl Builder {
    fn open(&mut self, e: &BytesStart) -> Result<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }

        if name == "byte" && self.field.is_some() {
            let attrs = attributes(e)?;
            let value = attribute(&attrs, "value")
                .ok_or_else(|| anyhow!("<byte> element without value"))?;
            self.text.push(decode_byte_value(value)?);
            self.in_byte = true;
            return Ok(());
        }

        if self.catalog.is_none() {
            if name != "TS" {
                bail!("expected <TS> root element, found <{}>", name);
            }
            let attrs = attributes(e)?;
            self.catalog = Some(Catalog {
                version: attribute(&attrs, "version")
                    .unwrap_or(DEFAULT_FORMAT_VERSION)
                    .to_string(),
                language: attribute(&attrs, "language").map(str::to_string),
                source_language: attribute(&attrs, "sourcelanguage").map(str::to_string),
                contexts: Vec::new(),
            });
            return Ok(());
        }

        if self.closed {
            bail!("content after closing </TS>");
        }
        if self.message.is_some() {
            return self.open_in_message(&name, e);
        }
        if self.context.is_some() {
            return self.open_in_context(&name, e);
        }

        match name.as_str() {
            "context" => self.context = Some(Context::default()),
            "TS" => bail!("nested <TS> element"),
            other => self.skip_unknown(other),
        }
        Ok(())
    }

    fn open_in_context(&mut self, name: &str, e: &BytesStart) -> Result<()> {
        match name {
            "name" => self.begin_field(Field::ContextName),
            "comment" => self.begin_field(Field::ContextComment),
            "message" => {
                let attrs = attributes(e)?;
                self.message = Some(Message {
                    id: attribute(&attrs, "id").map(str::to_string),
                    numerus: attribute(&attrs, "numerus") == Some("yes"),
                    ..Message::default()
                });
                self.saw_translation = false;
            }
            other => self.skip_unknown(other),
        }
        Ok(())
    }

    fn open_in_message(&mut self, name: &str, e: &BytesStart) -> Result<()> {
        if self.field == Some(Field::Translation) && name == "numerusform" {
            self.begin_field(Field::NumerusForm);
            return Ok(());
        }
        if matches!(self.field, Some(Field::Translation | Field::NumerusForm)) && name == "lengthvariant" {
            self.variant_parent = self.field;
            self.begin_field(Field::LengthVariant);
            return Ok(());
        }
        if self.field.is_some() {
            self.skip_unknown(name);
            return Ok(());
        }
        let Some(message) = self.message.as_mut() else {
            bail!("<{}> outside <message>", name);
        };
        match name {
            "location" => {
                let attrs = attributes(e)?;
                message.locations.push(Location {
                    filename: attribute(&attrs, "filename").map(str::to_string),
                    line: attribute(&attrs, "line").map(str::to_string),
                });
                self.skip_depth = 1;
            }
            "translation" => {
                let attrs = attributes(e)?;
                message.status = TranslationStatus::from_attr(attribute(&attrs, "type"))?;
                self.saw_translation = true;
                self.forms.clear();
                self.begin_field(Field::Translation);
            }
            other => match Field::for_message_child(other) {
                Some(field) => self.begin_field(field),
                None => self.skip_unknown(other),
            },
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> Result<()> {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }
        if self.in_byte && name == b"byte" {
            self.in_byte = false;
            return Ok(());
        }

        if let Some(field) = self.field {
            let mut text = std::mem::take(&mut self.text);
            // Only the longest (first) length variant is kept.
            if field != Field::LengthVariant && !self.variants.is_empty() {
                text = std::mem::take(&mut self.variants).swap_remove(0);
            }
            match field {
                Field::LengthVariant => {
                    self.variants.push(text);
                    self.field = self.variant_parent.take();
                    return Ok(());
                }
                Field::NumerusForm => {
                    self.forms.push(text);
                    self.field = Some(Field::Translation);
                    return Ok(());
                }
                Field::ContextName | Field::ContextComment => {
                    let context = self
                        .context
                        .as_mut()
                        .ok_or_else(|| anyhow!("context field outside <context>"))?;
                    if field == Field::ContextName {
                        context.name = text;
                    } else {
                        context.comment = Some(text);
                    }
                }
                _ => {
                    let message = self
                        .message
                        .as_mut()
                        .ok_or_else(|| anyhow!("message field outside <message>"))?;
                    match field {
                        Field::Source => message.source = text,
                        Field::OldSource => message.old_source = Some(text),
                        Field::Comment => message.comment = Some(text),
                        Field::OldComment => message.old_comment = Some(text),
                        Field::ExtraComment => message.extra_comment = Some(text),
                        Field::TranslatorComment => message.translator_comment = Some(text),
                        Field::Translation => {
                            let forms = std::mem::take(&mut self.forms);
                            message.translation = if message.numerus || !forms.is_empty() {
                                Translation::Plural(forms)
                            } else {
                                Translation::Single(text)
                            };
                        }
                        Field::ContextName
                        | Field::ContextComment
                        | Field::NumerusForm
                        | Field::LengthVariant => {}
                    }
                }
            }
            self.field = None;
            return Ok(());
        }

        match name {
            b"message" => {
                let mut message = self
                    .message
                    .take()
                    .ok_or_else(|| anyhow!("unbalanced </message>"))?;
                if !self.saw_translation && message.numerus {
                    message.translation = Translation::Plural(Vec::new());
                }
                self.context
                    .as_mut()
                    .ok_or_else(|| anyhow!("<message> outside <context>"))?
                    .messages
                    .push(message);
            }
            b"context" => {
                let context = self
                    .context
                    .take()
                    .ok_or_else(|| anyhow!("unbalanced </context>"))?;
                self.catalog
                    .as_mut()
                    .ok_or_else(|| anyhow!("<context> outside <TS>"))?
                    .contexts
                    .push(context);
            }
            b"TS" => self.closed = true,
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.field.is_some() && self.skip_depth == 0 {
            self.text.push_str(text);
        }
    }

    fn begin_field(&mut self, field: Field) {
        self.field = Some(field);
        self.text.clear();
    }

    fn skip_unknown(&mut self, name: &str) {
        warn!(element = name, "skipping unsupported catalog element");
        self.skip_depth = 1;
    }

    fn finish(self) -> Result<Catalog> {
        let catalog = self
            .catalog
            .ok_or_else(|| anyhow!("no <TS> root element"))?;
        if !self.closed || self.context.is_some() || self.message.is_some() {
            bail!("unexpected end of catalog");
        }
        Ok(catalog)
    }
}

/// `<byte value="x1b"/>` carries a hex (`x` prefix) or decimal code point.
fn decode_byte_value(value: &str) -> Result<char> {
    let code = match value.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .with_context(|| format!("invalid <byte> value '{}'", value))?;
    char::from_u32(code).ok_or_else(|| anyhow!("invalid <byte> value '{}'", value))
}
