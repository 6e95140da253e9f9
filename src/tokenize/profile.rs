//! Per-language punctuation and abbreviation tables.
//!
//! These are consumed configuration: the constructors bake in the standard
//! punctuation of each language, and callers supply the already-parsed
//! abbreviation word list (for Latin, conventionally the praenomina).

use crate::alphabet::GreekEncoding;

/// Middle dot, the Greek semicolon-equivalent clause separator.
const MIDDLE_DOT: char = '\u{00B7}';

/// Punctuation and abbreviation configuration for one language.
#[derive(Clone, Debug)]
pub struct PunctuationProfile {
    separators: Vec<char>,
    terminators: Vec<char>,
    abbreviation_terminator: Option<char>,
    abbreviations: Vec<String>,
}

impl PunctuationProfile {
    /// Build a profile from explicit tables.
    pub fn new(
        separators: Vec<char>,
        terminators: Vec<char>,
        abbreviation_terminator: Option<char>,
        abbreviations: Vec<String>,
    ) -> Self {
        PunctuationProfile {
            separators,
            terminators,
            abbreviation_terminator,
            abbreviations,
        }
    }

    /// The standard Latin profile. Abbreviations end in a period, so `M.`
    /// does not close a sentence.
    pub fn latin(abbreviations: Vec<String>) -> Self {
        PunctuationProfile::new(vec![',', ';', ':'], vec!['.', '?'], Some('.'), abbreviations)
    }

    /// The standard Greek profile for the given encoding. Unicode Greek adds
    /// the middle dot as a clause separator.
    pub fn greek(encoding: GreekEncoding) -> Self {
        match encoding {
            GreekEncoding::BetaCode => {
                PunctuationProfile::new(vec![',', ':'], vec!['.', ';'], None, vec![])
            }
            GreekEncoding::Unicode => {
                PunctuationProfile::new(vec![',', ':', MIDDLE_DOT], vec!['.', ';'], None, vec![])
            }
        }
    }

    /// Is `c` a clause separator?
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }

    /// Is `c` a sentence terminator?
    pub fn is_terminator(&self, c: char) -> bool {
        self.terminators.contains(&c)
    }

    /// Is `c` either kind of boundary punctuation?
    pub fn is_boundary(&self, c: char) -> bool {
        self.is_separator(c) || self.is_terminator(c)
    }

    /// Does the stripped word, with the abbreviation terminator appended,
    /// match a known abbreviation?
    pub fn is_abbreviation(&self, stripped: &str) -> bool {
        if self.abbreviations.is_empty() {
            return false;
        }
        let probe = match self.abbreviation_terminator {
            Some(t) => format!("{stripped}{t}"),
            None => stripped.to_string(),
        };
        self.abbreviations.iter().any(|a| *a == probe)
    }
}
