// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language metadata for catalogs.
//!
//! | Code | Language  | Forms |
//! |------|-----------|-------|
//! | de   | German    | 2     |
//! | hy   | Armenian  | 2     |
//! | it   | Italian   | 2     |
//! | sl   | Slovenian | 4     |
//!
//! Codes are validated against ISO 639-1; plural form selection follows
//! the Qt Linguist numerus rules so forms line up with what translators
//! filled in.

mod iso639;
mod plural;

pub use iso639::{
    is_valid_iso639_1, is_valid_locale, language_name, native_name, primary_subtag,
};
pub use plural::PluralRule;
