//! Letter and diacritic engine for classical Greek and Latin text.
//!
//! This module provides character classification for the three alphabets the
//! pipeline handles (Latin, Unicode Greek, and BetaCode Greek), bidirectional
//! transliteration between the two Greek representations, and the accent
//! normalization rules that lookup and match verification depend on.
//!
//! # Examples
//!
//! ```
//! use lexis::alphabet::{Alphabet, is_letter};
//!
//! assert!(is_letter('q', Alphabet::GreekBetaCode)); // theta
//! assert!(is_letter('λ', Alphabet::GreekUnicode));
//! assert!(!is_letter('λ', Alphabet::Latin));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LexisError, Result};

pub mod betacode;
pub mod latin;
pub mod unigreek;

/// Language of a word or text.
///
/// The lexical service addresses Latin as `la`; analysis feature maps carry
/// the full name `latin`. [`Language::service_code`] and the `Display`
/// implementation keep the two spellings apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Latin.
    Latin,
    /// Ancient Greek.
    Greek,
}

impl Language {
    /// The language code used when addressing the lexical service.
    pub fn service_code(&self) -> &'static str {
        match self {
            Language::Latin => "la",
            Language::Greek => "greek",
        }
    }

    /// Parse a language tag as it appears in configuration or responses.
    ///
    /// Accepts both the service code (`la`) and the full name.
    pub fn parse(tag: &str) -> Result<Language> {
        match tag {
            "la" | "latin" => Ok(Language::Latin),
            "greek" => Ok(Language::Greek),
            other => Err(LexisError::config(format!("illegal lang {other}"))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Latin => write!(f, "latin"),
            Language::Greek => write!(f, "greek"),
        }
    }
}

/// Sub-encoding of Greek text. Irrelevant for Latin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GreekEncoding {
    /// ASCII BetaCode transliteration.
    BetaCode,
    /// Unicode Greek (combining diacritics).
    Unicode,
}

/// An alphabet for character classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alphabet {
    /// The Latin script.
    Latin,
    /// Unicode Greek, including the coronis mark.
    GreekUnicode,
    /// The BetaCode character set, including diacritic and shift symbols.
    GreekBetaCode,
}

/// Case rendering mode for Unicode → BetaCode transliteration.
///
/// `ForceUpper` produces old-style (TLG) BetaCode, `ForceLower` the Perseus
/// dialect, and `Preserve` keeps the incoming case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseMode {
    /// Render every letter upper case.
    ForceUpper,
    /// Render every letter lower case.
    ForceLower,
    /// Keep the incoming case.
    Preserve,
}

/// Is `c` a letter of the given alphabet?
///
/// For the Unicode alphabets this is a letter-category test intersected with
/// a script check; for BetaCode it is membership in the fixed character set.
pub fn is_letter(c: char, alphabet: Alphabet) -> bool {
    match alphabet {
        Alphabet::Latin => latin::is_letter(c),
        Alphabet::GreekUnicode => unigreek::is_letter(c),
        Alphabet::GreekBetaCode => betacode::is_letter(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Latin.service_code(), "la");
        assert_eq!(Language::Greek.service_code(), "greek");
        assert_eq!(Language::Latin.to_string(), "latin");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("la").unwrap(), Language::Latin);
        assert_eq!(Language::parse("latin").unwrap(), Language::Latin);
        assert_eq!(Language::parse("greek").unwrap(), Language::Greek);
        assert!(Language::parse("etruscan").is_err());
    }

    #[test]
    fn test_is_letter_dispatch() {
        assert!(is_letter('a', Alphabet::Latin));
        assert!(is_letter('*', Alphabet::GreekBetaCode));
        assert!(is_letter('ϊ', Alphabet::GreekUnicode));
        assert!(!is_letter('.', Alphabet::Latin));
    }
}
