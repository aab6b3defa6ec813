// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Built-in plural rules, by language code (derived from CLDR).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralFamily {
    /// One form for all numbers (Japanese, Chinese, Turkish, ...).
    Singular,
    /// Singular for 1 only (English, German, Spanish, ...).
    OneOther,
    /// Singular for 0 and 1 (French, Hindi, ...).
    ZeroOneOther,
    Latvian,
    /// Singular, dual, plural (Sami languages, Inuktitut, Cornish).
    OneTwoOther,
    Irish,
    Romanian,
    Lithuanian,
    /// East Slavic and Serbo-Croatian languages.
    Slavic,
    /// Czech and Slovak.
    Czech,
    Polish,
    Slovenian,
    Maltese,
    Macedonian,
    Welsh,
    Arabic,
    /// Colognian and Langi.
    ZeroOneOtherDistinct,
    Tachelhit,
    Tamazight,
    Manx,
    ScottishGaelic,
}

impl PluralFamily {
    /// Return the plural family of a language code (for example `ru`).
    ///
    /// Unknown codes get the [`PluralFamily::Singular`] family.
    #[must_use]
    pub fn from_language_code(code: &str) -> Self {
        match code {
            "az" | "bm" | "bo" | "dz" | "fa" | "id" | "ig" | "ii" | "hu" | "ja" | "jv" | "ka"
            | "kde" | "kea" | "km" | "kn" | "ko" | "lo" | "ms" | "my" | "sah" | "ses" | "sg"
            | "th" | "to" | "tr" | "vi" | "wo" | "yo" | "zh" => PluralFamily::Singular,
            "asa" | "af" | "bem" | "bez" | "bg" | "bn" | "brx" | "ca" | "cgg" | "chr" | "da"
            | "de" | "dv" | "ee" | "el" | "en" | "eo" | "es" | "et" | "eu" | "fi" | "fo"
            | "fur" | "fy" | "gl" | "gsw" | "gu" | "ha" | "haw" | "he" | "is" | "it" | "jmc"
            | "kaj" | "kcg" | "kk" | "kl" | "ksb" | "ku" | "lb" | "lg" | "mas" | "ml" | "mn"
            | "mr" | "nah" | "nb" | "nd" | "ne" | "nl" | "nn" | "no" | "nr" | "ny" | "nyn"
            | "om" | "or" | "pa" | "pap" | "ps" | "pt" | "rof" | "rm" | "rwk" | "saq" | "seh"
            | "sn" | "so" | "sq" | "ss" | "ssy" | "st" | "sv" | "sw" | "syr" | "ta" | "te"
            | "teo" | "tig" | "tk" | "tn" | "ts" | "ur" | "wae" | "ve" | "vun" | "xh" | "xog"
            | "zu" => PluralFamily::OneOther,
            "ak" | "am" | "bh" | "fil" | "ff" | "fr" | "guw" | "hi" | "kab" | "ln" | "mg"
            | "nso" | "ti" | "wa" => PluralFamily::ZeroOneOther,
            "lv" => PluralFamily::Latvian,
            "iu" | "kw" | "naq" | "se" | "sma" | "smi" | "smj" | "smn" | "sms" => {
                PluralFamily::OneTwoOther
            }
            "ga" => PluralFamily::Irish,
            "ro" | "mo" => PluralFamily::Romanian,
            "lt" => PluralFamily::Lithuanian,
            "be" | "bs" | "hr" | "ru" | "sh" | "sr" | "uk" => PluralFamily::Slavic,
            "cs" | "sk" => PluralFamily::Czech,
            "pl" => PluralFamily::Polish,
            "sl" => PluralFamily::Slovenian,
            "mt" => PluralFamily::Maltese,
            "mk" => PluralFamily::Macedonian,
            "cy" => PluralFamily::Welsh,
            "ar" => PluralFamily::Arabic,
            "lag" | "ksh" => PluralFamily::ZeroOneOtherDistinct,
            "shi" => PluralFamily::Tachelhit,
            "tzm" => PluralFamily::Tamazight,
            "gv" => PluralFamily::Manx,
            "gd" => PluralFamily::ScottishGaelic,
            _ => PluralFamily::Singular,
        }
    }

    #[must_use]
    pub fn num_plurals(self) -> usize {
        match self {
            PluralFamily::Singular => 1,
            PluralFamily::OneOther
            | PluralFamily::ZeroOneOther
            | PluralFamily::Macedonian
            | PluralFamily::Tamazight
            | PluralFamily::Manx => 2,
            PluralFamily::Latvian
            | PluralFamily::OneTwoOther
            | PluralFamily::Romanian
            | PluralFamily::Lithuanian
            | PluralFamily::Slavic
            | PluralFamily::Czech
            | PluralFamily::Polish
            | PluralFamily::ZeroOneOtherDistinct
            | PluralFamily::Tachelhit => 3,
            PluralFamily::Slovenian | PluralFamily::Maltese | PluralFamily::ScottishGaelic => 4,
            PluralFamily::Irish => 5,
            PluralFamily::Welsh | PluralFamily::Arabic => 6,
        }
    }

    /// Return the plural form index for the count `n`.
    #[must_use]
    pub fn evaluate(self, n: i64) -> i64 {
        match self {
            PluralFamily::Singular => 0,
            PluralFamily::OneOther => i64::from(n != 1),
            PluralFamily::ZeroOneOther => i64::from(n != 0 && n != 1),
            PluralFamily::Latvian => {
                if n == 0 {
                    0
                } else if n % 10 == 1 && n % 100 != 11 {
                    1
                } else {
                    2
                }
            }
            PluralFamily::OneTwoOther => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralFamily::Irish => match n {
                1 => 0,
                2 => 1,
                3..=6 => 2,
                7..=10 => 3,
                _ => 4,
            },
            PluralFamily::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (n % 100 > 0 && n % 100 < 20) {
                    1
                } else {
                    2
                }
            }
            PluralFamily::Lithuanian => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if n % 10 >= 2 && (n % 100 < 10 || n % 100 >= 20) {
                    1
                } else {
                    2
                }
            }
            PluralFamily::Slavic => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if (2..=4).contains(&(n % 10)) && (n % 100 < 10 || n % 100 >= 20) {
                    1
                } else {
                    2
                }
            }
            PluralFamily::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralFamily::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&(n % 10)) && (n % 100 < 12 || n % 100 > 14) {
                    1
                } else {
                    2
                }
            }
            PluralFamily::Slovenian => match n % 100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            PluralFamily::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (n % 100 > 1 && n % 100 < 11) {
                    1
                } else if n % 100 > 10 && n % 100 < 20 {
                    2
                } else {
                    3
                }
            }
            PluralFamily::Macedonian => i64::from(!(n % 10 == 1 && n != 11)),
            PluralFamily::Welsh => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                3 => 3,
                6 => 4,
                _ => 5,
            },
            PluralFamily::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                3..=10 => 3,
                11..=99 => 4,
                _ => 5,
            },
            PluralFamily::ZeroOneOtherDistinct => match n {
                0 => 0,
                1 => 1,
                _ => 2,
            },
            PluralFamily::Tachelhit => match n {
                0 | 1 => 0,
                2..=10 => 1,
                _ => 2,
            },
            PluralFamily::Tamazight => i64::from(!matches!(n, 0 | 1 | 11..=99)),
            PluralFamily::Manx => i64::from(!(n % 10 == 1 || n % 10 == 2 || n % 20 == 0)),
            PluralFamily::ScottishGaelic => match n {
                1 | 11 => 0,
                2 | 12 => 1,
                3..=10 | 13..=19 => 2,
                _ => 3,
            },
        }
    }

    /// Return the rule as a gettext plural expression.
    #[must_use]
    pub fn formula(self) -> &'static str {
        match self {
            PluralFamily::Singular => "0",
            PluralFamily::OneOther => "n != 1",
            PluralFamily::ZeroOneOther => "n != 0 && n != 1",
            PluralFamily::Latvian => "n == 0 ? 0 : n % 10 == 1 && n % 100 != 11 ? 1 : 2",
            PluralFamily::OneTwoOther => "n == 1 ? 0 : n == 2 ? 1 : 2",
            PluralFamily::Irish => {
                "n == 1 ? 0 : n == 2 ? 1 : n >= 3 && n <= 6 ? 2 : n >= 7 && n <= 10 ? 3 : 4"
            }
            PluralFamily::Romanian => {
                "n == 1 ? 0 : (n == 0 || (n % 100 > 0 && n % 100 < 20)) ? 1 : 2"
            }
            PluralFamily::Lithuanian => {
                "n % 10 == 1 && n % 100 != 11 ? 0 : n % 10 >= 2 && (n % 100 < 10 || n % 100 >= 20) ? 1 : 2"
            }
            PluralFamily::Slavic => {
                "n % 10 == 1 && n % 100 != 11 ? 0 : n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 10 || n % 100 >= 20) ? 1 : 2"
            }
            PluralFamily::Czech => "n == 1 ? 0 : n >= 2 && n <= 4 ? 1 : 2",
            PluralFamily::Polish => {
                "n == 1 ? 0 : n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 12 || n % 100 > 14) ? 1 : 2"
            }
            PluralFamily::Slovenian => {
                "n % 100 == 1 ? 0 : n % 100 == 2 ? 1 : n % 100 == 3 || n % 100 == 4 ? 2 : 3"
            }
            PluralFamily::Maltese => {
                "n == 1 ? 0 : n == 0 || (n % 100 > 1 && n % 100 < 11) ? 1 : n % 100 > 10 && n % 100 < 20 ? 2 : 3"
            }
            PluralFamily::Macedonian => "n % 10 == 1 && n != 11 ? 0 : 1",
            PluralFamily::Welsh => {
                "n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : n == 3 ? 3 : n == 6 ? 4 : 5"
            }
            PluralFamily::Arabic => {
                "n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : n >= 3 && n <= 10 ? 3 : n >= 11 && n <= 99 ? 4 : 5"
            }
            PluralFamily::ZeroOneOtherDistinct => "n == 0 ? 0 : n == 1 ? 1 : 2",
            PluralFamily::Tachelhit => "n == 0 || n == 1 ? 0 : n >= 2 && n <= 10 ? 1 : 2",
            PluralFamily::Tamazight => "n == 0 || n == 1 || (n >= 11 && n <= 99) ? 0 : 1",
            PluralFamily::Manx => "n % 10 == 1 || n % 10 == 2 || n % 20 == 0 ? 0 : 1",
            PluralFamily::ScottishGaelic => {
                "n == 1 || n == 11 ? 0 : n == 2 || n == 12 ? 1 : (n >= 3 && n <= 10) || (n >= 13 && n <= 19) ? 2 : 3"
            }
        }
    }
}
