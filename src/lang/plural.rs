// SPDX-License-Identifier: PMPL-1.0-or-later

//! Numerus rules used to pick a plural form.
//!
//! Form order follows Qt Linguist, which is the order translators see for
//! `<numerusform>` elements in a catalog.

use super::iso639::primary_subtag;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluralRule {
    /// No grammatical number (Japanese, Chinese, ...)
    SingleForm,
    /// singular for 1, plural otherwise
    EnglishStyle,
    /// singular for 0 and 1, plural otherwise
    FrenchStyle,
    /// 1 | 2..4 | other
    Czech,
    /// 1 | 2..4 except 12..14 | other
    Polish,
    /// ends in 1 except 11 | ends in 2..4 except 12..14 | other
    RussianStyle,
    /// n % 100 == 1 | == 2 | 3..4 | other
    Slovenian,
    /// 1 | 2 | other
    Irish,
    /// ends in 1 except 11 | ends in 2..9 except 12..19 | other
    Lithuanian,
    /// ends in 1 except 11 | non-zero | zero
    Latvian,
    /// 1 | 0 or ends in 1..19 | other
    Romanian,
}

impl PluralRule {
    /// Rule for a language code or locale name. Unknown languages get the
    /// English two-form rule.
    pub fn for_language(locale: &str) -> Self {
        let normalized = locale.replace('-', "_");
        if normalized == "pt_BR" {
            return PluralRule::FrenchStyle;
        }
        match primary_subtag(&normalized) {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "fa" | "ka" | "lo" | "my"
            | "bo" | "dz" | "km" => PluralRule::SingleForm,
            "fr" | "hy" | "ak" | "am" | "ln" | "mg" | "ti" | "wa" | "oc" => {
                PluralRule::FrenchStyle
            }
            "cs" | "sk" => PluralRule::Czech,
            "pl" => PluralRule::Polish,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => PluralRule::RussianStyle,
            "sl" => PluralRule::Slovenian,
            "ga" => PluralRule::Irish,
            "lt" => PluralRule::Lithuanian,
            "lv" => PluralRule::Latvian,
            "ro" => PluralRule::Romanian,
            _ => PluralRule::EnglishStyle,
        }
    }

    pub fn form_count(&self) -> usize {
        match self {
            PluralRule::SingleForm => 1,
            PluralRule::EnglishStyle | PluralRule::FrenchStyle => 2,
            PluralRule::Czech
            | PluralRule::Polish
            | PluralRule::RussianStyle
            | PluralRule::Irish
            | PluralRule::Lithuanian
            | PluralRule::Latvian
            | PluralRule::Romanian => 3,
            PluralRule::Slovenian => 4,
        }
    }

    /// Index of the form to use for `n`. Always `< form_count()`.
    pub fn form_index(&self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            PluralRule::SingleForm => 0,
            PluralRule::EnglishStyle => usize::from(n != 1),
            PluralRule::FrenchStyle => usize::from(n > 1),
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::RussianStyle => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            PluralRule::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralRule::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            PluralRule::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_languages_map_to_expected_rules() {
        assert_eq!(PluralRule::for_language("de"), PluralRule::EnglishStyle);
        assert_eq!(PluralRule::for_language("it"), PluralRule::EnglishStyle);
        assert_eq!(PluralRule::for_language("hy"), PluralRule::FrenchStyle);
        assert_eq!(PluralRule::for_language("sl_SI"), PluralRule::Slovenian);
        assert_eq!(PluralRule::for_language("pt-BR"), PluralRule::FrenchStyle);
        assert_eq!(PluralRule::for_language("pt_PT"), PluralRule::EnglishStyle);
        assert_eq!(PluralRule::for_language(""), PluralRule::EnglishStyle);
    }

    #[test]
    fn slovenian_uses_four_forms() {
        let rule = PluralRule::Slovenian;
        assert_eq!(rule.form_count(), 4);
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(101), 0);
        assert_eq!(rule.form_index(2), 1);
        assert_eq!(rule.form_index(3), 2);
        assert_eq!(rule.form_index(104), 2);
        assert_eq!(rule.form_index(5), 3);
        assert_eq!(rule.form_index(0), 3);
        assert_eq!(rule.form_index(11), 3);
    }

    #[test]
    fn russian_style_teens() {
        let rule = PluralRule::RussianStyle;
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(21), 0);
        assert_eq!(rule.form_index(11), 2);
        assert_eq!(rule.form_index(22), 1);
        assert_eq!(rule.form_index(12), 2);
        assert_eq!(rule.form_index(25), 2);
    }

    #[test]
    fn french_style_treats_zero_as_singular() {
        assert_eq!(PluralRule::FrenchStyle.form_index(0), 0);
        assert_eq!(PluralRule::EnglishStyle.form_index(0), 1);
        assert_eq!(PluralRule::EnglishStyle.form_index(-1), 0);
    }

    #[test]
    fn index_always_within_form_count() {
        let rules = [
            PluralRule::SingleForm,
            PluralRule::EnglishStyle,
            PluralRule::FrenchStyle,
            PluralRule::Czech,
            PluralRule::Polish,
            PluralRule::RussianStyle,
            PluralRule::Slovenian,
            PluralRule::Irish,
            PluralRule::Lithuanian,
            PluralRule::Latvian,
            PluralRule::Romanian,
        ];
        for rule in rules {
            for n in -5..=250 {
                assert!(rule.form_index(n) < rule.form_count(), "{rule:?} n={n}");
            }
        }
    }
}
