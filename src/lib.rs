// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscat: toolkit for Qt Linguist `.ts` translation catalogs.
//!
//! A catalog holds translatable strings for one target language, grouped by
//! context (the UI component showing them). This crate reads and writes the
//! XML format, looks strings up at runtime with fallback to the source text,
//! validates catalogs and keeps them in step with freshly extracted
//! templates.
//!
//! - [`ts`]: reader and writer for the `.ts` format
//! - [`lookup`]: runtime translation with a fallback chain
//! - [`validate`]: structural and translator-facing checks
//! - [`sync`]: entry lifecycle (unfinished, vanished, obsolete)
//! - [`report`] and [`sweep`]: progress statistics, diffs and batch scans

pub mod config;
pub mod lang;
pub mod logging;
pub mod lookup;
pub mod report;
pub mod sweep;
pub mod sync;
pub mod ts;
pub mod types;
pub mod validate;

pub use lookup::Translator;
pub use types::{Catalog, Context, Message, Translation, TranslationStatus};
