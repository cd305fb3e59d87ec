// SPDX-License-Identifier: PMPL-1.0-or-later

//! ISO 639-1 language codes and Qt-style locale names.
//!
//! Catalog `language` attributes are either a bare ISO 639-1 code (`de`)
//! or a Qt locale name (`de_DE`, `pt_BR`, `zh_Hant_TW`). Hyphenated BCP 47
//! spellings (`pt-BR`) are accepted as well.
//!
//! Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>

/// All two-letter ISO 639-1 codes, sorted for binary search.
const ISO639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

/// (code, English name, native name) for languages shown in reports.
const NAMES: &[(&str, &str, &str)] = &[
    ("ar", "Arabic", "العربية"),
    ("be", "Belarusian", "Беларуская"),
    ("bg", "Bulgarian", "Български"),
    ("ca", "Catalan", "Català"),
    ("cs", "Czech", "Čeština"),
    ("da", "Danish", "Dansk"),
    ("de", "German", "Deutsch"),
    ("el", "Greek", "Ελληνικά"),
    ("en", "English", "English"),
    ("eo", "Esperanto", "Esperanto"),
    ("es", "Spanish", "Español"),
    ("et", "Estonian", "Eesti"),
    ("eu", "Basque", "Euskara"),
    ("fa", "Persian", "فارسی"),
    ("fi", "Finnish", "Suomi"),
    ("fr", "French", "Français"),
    ("ga", "Irish", "Gaeilge"),
    ("gl", "Galician", "Galego"),
    ("he", "Hebrew", "עברית"),
    ("hi", "Hindi", "हिन्दी"),
    ("hr", "Croatian", "Hrvatski"),
    ("hu", "Hungarian", "Magyar"),
    ("hy", "Armenian", "Հայերեն"),
    ("id", "Indonesian", "Bahasa Indonesia"),
    ("it", "Italian", "Italiano"),
    ("ja", "Japanese", "日本語"),
    ("ko", "Korean", "한국어"),
    ("lt", "Lithuanian", "Lietuvių"),
    ("lv", "Latvian", "Latviešu"),
    ("ms", "Malay", "Bahasa Melayu"),
    ("nb", "Norwegian Bokmål", "Norsk bokmål"),
    ("nl", "Dutch", "Nederlands"),
    ("pl", "Polish", "Polski"),
    ("pt", "Portuguese", "Português"),
    ("ro", "Romanian", "Română"),
    ("ru", "Russian", "Русский"),
    ("sk", "Slovak", "Slovenčina"),
    ("sl", "Slovenian", "Slovenščina"),
    ("sq", "Albanian", "Shqip"),
    ("sr", "Serbian", "Српски"),
    ("sv", "Swedish", "Svenska"),
    ("th", "Thai", "ไทย"),
    ("tr", "Turkish", "Türkçe"),
    ("uk", "Ukrainian", "Українська"),
    ("vi", "Vietnamese", "Tiếng Việt"),
    ("zh", "Chinese", "中文"),
];

/// Validates whether a string is a known ISO 639-1 two-letter code.
///
/// Codes are case-sensitive and must be lowercase.
///
/// # Examples
/// ```
/// assert!(tscat::lang::is_valid_iso639_1("hy"));
/// assert!(!tscat::lang::is_valid_iso639_1("xx"));
/// ```
pub fn is_valid_iso639_1(code: &str) -> bool {
    ISO639_1.binary_search(&code).is_ok()
}

/// Language subtag of a locale name: `de_DE` -> `de`, `pt-BR` -> `pt`.
pub fn primary_subtag(locale: &str) -> &str {
    locale
        .split(|c| c == '_' || c == '-')
        .next()
        .unwrap_or(locale)
}

/// Checks a Qt locale name: an ISO 639-1 language, then optional script
/// (four letters, title case) and territory (two uppercase letters or
/// three digits) subtags.
pub fn is_valid_locale(locale: &str) -> bool {
    let mut parts = locale.split(|c| c == '_' || c == '-');
    let Some(language) = parts.next() else {
        return false;
    };
    if !is_valid_iso639_1(language) {
        return false;
    }
    let rest: Vec<&str> = parts.collect();
    match rest.as_slice() {
        [] => true,
        [one] => is_script(one) || is_territory(one),
        [script, territory] => is_script(script) && is_territory(territory),
        _ => false,
    }
}

fn is_script(tag: &str) -> bool {
    let mut chars = tag.chars();
    tag.len() == 4
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_lowercase())
}

fn is_territory(tag: &str) -> bool {
    (tag.len() == 2 && tag.chars().all(|c| c.is_ascii_uppercase()))
        || (tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit()))
}

fn lookup_names(code: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    let language = primary_subtag(code);
    NAMES
        .binary_search_by(|(c, _, _)| c.cmp(&language))
        .ok()
        .map(|index| &NAMES[index])
}

/// English name for a language code or locale name.
pub fn language_name(code: &str) -> Option<&'static str> {
    lookup_names(code).map(|(_, english, _)| *english)
}

/// Name of a language written in that language.
pub fn native_name(code: &str) -> Option<&'static str> {
    lookup_names(code).map(|(_, _, native)| *native)
}
