//! Unicode Greek: classification, transliteration to BetaCode, accent fixes.
//!
//! All transforms here work on the decomposed (NFD) form, so a combining
//! diacritic is always a separate code point following its base letter. The
//! output of [`crate::alphabet::betacode::to_unicode`] is already decomposed.

use unicode_normalization::UnicodeNormalization;

use crate::alphabet::CaseMode;
use crate::alphabet::betacode::GREEK_TO_BETA;
use crate::error::{LexisError, Result};

/// The coronis mark. A combining diacritic in Unicode, but treated as a
/// letter for tokenization so crasis forms survive segmentation.
pub const CORONIS: char = '\u{1FBD}';

const ACUTE: char = '\u{0301}';
const GRAVE: char = '\u{0300}';
const PERISPOMENI: char = '\u{0342}';

/// Is `c` a Greek letter (coronis included)?
pub fn is_letter(c: char) -> bool {
    if c == CORONIS {
        return true;
    }
    if !(c.is_lowercase() || c.is_uppercase()) {
        return false;
    }
    matches!(c,
        '\u{0370}'..='\u{03FF}' |  // Greek and Coptic
        '\u{1F00}'..='\u{1FFF}'    // Greek Extended
    )
}

fn translate(c: char) -> char {
    *GREEK_TO_BETA.get(&c).unwrap_or(&c)
}

fn apply_mode(b: char, mode: CaseMode) -> char {
    match mode {
        CaseMode::ForceUpper => b.to_ascii_uppercase(),
        CaseMode::ForceLower => b.to_ascii_lowercase(),
        CaseMode::Preserve => b,
    }
}

/// Transliterate a Unicode Greek string to BetaCode.
///
/// The input is decomposed first so base letters and combining diacritics
/// convert independently. An upper-case letter emits the `*` shift marker,
/// then its diacritics, then the letter, per the historical convention.
///
/// Returns an encoding error for an empty string.
pub fn to_betacode(s: &str, mode: CaseMode) -> Result<String> {
    if s.is_empty() {
        return Err(LexisError::encoding("empty Greek input"));
    }

    let chars: Vec<char> = s.nfd().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_uppercase() {
            out.push('*');
            i += 1;
            while i < chars.len() && !chars[i].is_alphabetic() {
                out.push(translate(chars[i]));
                i += 1;
            }
            out.push(apply_mode(translate(c), mode));
        } else if c.is_alphabetic() {
            out.push(apply_mode(translate(c), mode));
            i += 1;
        } else {
            out.push(translate(c));
            i += 1;
        }
    }
    Ok(out)
}

/// Remove the eight word diacritics, keeping base letters only.
pub fn cleanse(s: &str) -> String {
    s.nfd()
        .filter(|&c| !matches!(c, '\u{0300}'..='\u{0345}' | CORONIS))
        .collect()
}

/// Replace every grave accent with an acute. Returns the decomposed form.
pub fn fix_grave(s: &str) -> String {
    s.nfd().map(|c| if c == GRAVE { ACUTE } else { c }).collect()
}

/// Remove a second accent picked up from an enclitic in running text.
///
/// Counts acutes and circumflexes in the decomposed form; if more than one
/// is present the last acute is dropped. Idempotent. Returns the decomposed
/// form.
pub fn fix_second_accent(s: &str) -> String {
    let chars: Vec<char> = s.nfd().collect();
    let n = chars
        .iter()
        .filter(|&&c| c == ACUTE || c == PERISPOMENI)
        .count();
    if n > 1 {
        if let Some(i) = chars.iter().rposition(|&c| c == ACUTE) {
            return chars[..i].iter().chain(&chars[i + 1..]).collect();
        }
    }
    chars.into_iter().collect()
}
