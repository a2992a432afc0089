//! Closed grammatical categories shared by the morphology and paradigm engines.
//!
//! Table cells encode several categories in one key (`dative_singular`,
//! `present_3_plural`). Those keys are parsed here once, at load time, so
//! the engines only ever see typed values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a closed, snake_case-labelled category enum with `ALL`,
/// `as_str`, `FromStr` and `Display`. Parsing accepts `-` for `_`.
macro_rules! category {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('-', "_").as_str() {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} \"{other}\"",
                        stringify!($name).to_lowercase()
                    )),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

pub(crate) use category;

category!(
    /// Grammatical case.
    Case {
        Nominative => "nominative",
        Genitive => "genitive",
        Dative => "dative",
        Accusative => "accusative",
        Instrumental => "instrumental",
        Locative => "locative",
        Vocative => "vocative",
    }
);

category!(
    /// Grammatical number. Mycenaean still has a productive dual.
    Number {
        Singular => "singular",
        Plural => "plural",
        Dual => "dual",
    }
);

category!(
    Gender {
        Masculine => "masculine",
        Feminine => "feminine",
        Neuter => "neuter",
    }
);

category!(
    Tense {
        Present => "present",
        Future => "future",
        Aorist => "aorist",
    }
);

category!(
    Mood {
        Indicative => "indicative",
    }
);

category!(
    Voice {
        Active => "active",
    }
);

category!(
    PartOfSpeech {
        Noun => "noun",
        ProperNoun => "proper_noun",
        Adjective => "adjective",
        Verb => "verb",
        Adverb => "adverb",
        Particle => "particle",
        Numeral => "numeral",
    }
);

impl PartOfSpeech {
    /// Declines through a noun template.
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun | Self::Adjective)
    }
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl Person {
    /// Parse the person digit used in conjugation cell keys.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::First),
            '2' => Some(Self::Second),
            '3' => Some(Self::Third),
            _ => None,
        }
    }

    /// Ordinal label: `1st`, `2nd`, `3rd`.
    pub fn ordinal(self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.ordinal())
    }
}

/// A declension cell: `dative_singular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NounCell {
    pub case: Case,
    pub number: Number,
}

impl FromStr for NounCell {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (case, number) = key
            .rsplit_once('_')
            .ok_or_else(|| format!("cell \"{key}\" is not <case>_<number>"))?;
        Ok(Self {
            case: case.parse()?,
            number: number.parse()?,
        })
    }
}

/// A conjugation cell: `present_3_plural`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VerbCell {
    pub tense: Tense,
    pub person: Person,
    pub number: Number,
}

impl FromStr for VerbCell {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split('_').collect();
        let [tense, person, number] = parts.as_slice() else {
            return Err(format!("cell \"{key}\" is not <tense>_<person>_<number>"));
        };
        let mut digits = person.chars();
        let person = match (digits.next(), digits.next()) {
            (Some(d), None) => Person::from_digit(d),
            _ => None,
        }
        .ok_or_else(|| format!("cell \"{key}\": person must be 1, 2 or 3"))?;
        Ok(Self {
            tense: tense.parse()?,
            person,
            number: number.parse()?,
        })
    }
}
