//! BetaCode Greek: classification, transliteration to Unicode, accent fixes.
//!
//! BetaCode is the ASCII transliteration scheme the lexical service speaks.
//! Lower-case ASCII letters stand for Greek letters, a `*` shift marker
//! introduces an upper-case letter (with its diacritics written between the
//! marker and the letter), and the symbols `` /\()=+|' `` stand for the
//! combining diacritics.
//!
//! # Examples
//!
//! ```
//! use lexis::alphabet::betacode;
//!
//! let u = betacode::to_unicode("lo/gos", false).unwrap();
//! assert!(u.starts_with('λ'));
//! assert!(u.ends_with('ς')); // word-final sigma
//! assert_eq!(betacode::cleanse("lo/gos"), "logos");
//! ```

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::{LexisError, Result};

/// The upper-case shift marker.
pub const UC_SHIFT: char = '*';

/// BetaCode letter / Unicode Greek letter pairs (lower case; sigma is
/// handled separately because three Greek glyphs share one BetaCode letter).
const LETTER_PAIRS: &[(char, char)] = &[
    ('a', 'α'),
    ('b', 'β'),
    ('g', 'γ'),
    ('d', 'δ'),
    ('e', 'ε'),
    ('z', 'ζ'),
    ('h', 'η'),
    ('q', 'θ'),
    ('i', 'ι'),
    ('k', 'κ'),
    ('l', 'λ'),
    ('m', 'μ'),
    ('n', 'ν'),
    ('c', 'ξ'),
    ('o', 'ο'),
    ('p', 'π'),
    ('r', 'ρ'),
    ('t', 'τ'),
    ('u', 'υ'),
    ('f', 'φ'),
    ('x', 'χ'),
    ('y', 'ψ'),
    ('w', 'ω'),
    ('v', 'ϝ'),
];

/// BetaCode diacritic symbol / combining mark pairs. The coronis (U+1FBD) is
/// a spacing mark but travels with the diacritics here.
const DIACRITIC_PAIRS: &[(char, char)] = &[
    ('/', '\u{0301}'),  // acute
    ('\\', '\u{0300}'), // grave
    ('(', '\u{0314}'),  // rough breathing
    (')', '\u{0313}'),  // smooth breathing
    ('=', '\u{0342}'),  // perispomeni
    ('+', '\u{0308}'),  // diaeresis
    ('|', '\u{0345}'),  // iota subscript
    ('\'', '\u{1FBD}'), // coronis
];

/// Non-final, final, and lunate sigma.
pub const SIGMA: char = 'σ';
pub const FINAL_SIGMA: char = 'ς';
pub const LUNATE_SIGMA: char = 'ϲ';

lazy_static! {
    /// BetaCode character → Unicode Greek character, both cases plus
    /// diacritics. Sigma is absent; the converters special-case it.
    static ref BETA_TO_GREEK: HashMap<char, char> = {
        let mut m = HashMap::new();
        for &(b, g) in LETTER_PAIRS {
            m.insert(b, g);
            if let Some(gu) = g.to_uppercase().next() {
                m.insert(b.to_ascii_uppercase(), gu);
            }
        }
        for &(b, g) in DIACRITIC_PAIRS {
            m.insert(b, g);
        }
        m
    };

    /// Unicode Greek character → BetaCode character, covering all three
    /// sigma glyphs and both cases.
    pub(crate) static ref GREEK_TO_BETA: HashMap<char, char> = {
        let mut m = HashMap::new();
        for &(b, g) in LETTER_PAIRS {
            m.insert(g, b);
            if let Some(gu) = g.to_uppercase().next() {
                m.insert(gu, b.to_ascii_uppercase());
            }
        }
        for s in [SIGMA, FINAL_SIGMA, LUNATE_SIGMA] {
            m.insert(s, 's');
            if let Some(su) = s.to_uppercase().next() {
                m.insert(su, 'S');
            }
        }
        for &(b, g) in DIACRITIC_PAIRS {
            m.insert(g, b);
        }
        m
    };
}

/// Is `c` a BetaCode letter? The set includes the diacritic symbols and the
/// upper-case shift marker, since all of them can occur inside a word.
pub fn is_letter(c: char) -> bool {
    if c == UC_SHIFT {
        return true;
    }
    if c.is_ascii_alphabetic() {
        // Every ASCII letter except j is assigned in the BetaCode alphabet.
        return !matches!(c, 'j' | 'J');
    }
    matches!(c, '/' | '\\' | '(' | ')' | '=' | '+' | '|' | '\'')
}

fn translate(c: char) -> char {
    *BETA_TO_GREEK.get(&c).unwrap_or(&c)
}

/// Convert a BetaCode string to Unicode Greek (decomposed form).
///
/// A `*` shift marker consumes all following non-letter diacritic symbols,
/// emits the letter in upper case, and attaches the diacritics after it. A
/// trailing sigma is rewritten to the word-final form. `lunate` selects the
/// lunate sigma glyph throughout (which has no distinct final form).
///
/// Returns an encoding error for an empty string or a shift marker with no
/// following letter.
pub fn to_unicode(s: &str, lunate: bool) -> Result<String> {
    if s.is_empty() {
        return Err(LexisError::encoding("empty BetaCode input"));
    }

    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == UC_SHIFT {
            i += 1;
            let mark_start = i;
            while i < chars.len() && !chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i == chars.len() {
                return Err(LexisError::encoding(format!(
                    "case shift without a following letter in {s:?}"
                )));
            }
            let letter = chars[i];
            if matches!(letter, 's' | 'S') {
                out.push(if lunate { 'Ϲ' } else { 'Σ' });
            } else {
                let g = translate(letter.to_ascii_lowercase());
                out.extend(g.to_uppercase());
            }
            for &m in &chars[mark_start..i] {
                out.push(translate(m));
            }
            i += 1;
        } else if c.is_ascii_alphabetic() {
            if matches!(c, 's' | 'S') {
                out.push(if lunate { LUNATE_SIGMA } else { SIGMA });
            } else {
                out.push(translate(c));
            }
            i += 1;
        } else {
            out.push(translate(c));
            i += 1;
        }
    }

    if out.ends_with(SIGMA) {
        out.pop();
        out.push(FINAL_SIGMA);
    }
    Ok(out)
}

/// Strip diacritic symbols, keeping letters only, for service-lookup use.
pub fn cleanse(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Replace every grave accent with an acute. Dictionary headwords never
/// carry grave.
pub fn fix_grave(s: &str) -> String {
    s.replace('\\', "/")
}

/// Remove a second accent picked up from an enclitic in running text.
///
/// If the word carries more than one acute/circumflex, the last acute is
/// dropped; the dictionary form has only the first. Idempotent.
pub fn fix_second_accent(s: &str) -> String {
    let n = s.matches('/').count() + s.matches('=').count();
    if n > 1 {
        if let Some(i) = s.rfind('/') {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..i]);
            out.push_str(&s[i + 1..]);
            return out;
        }
    }
    s.to_string()
}

/// Lower-case a capitalized BetaCode word.
///
/// Drops the shift marker and moves the diacritics written before the letter
/// to their lower-case position after it.
pub fn uncap(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.first() != Some(&UC_SHIFT) {
        return s.to_string();
    }
    let mut i = 1;
    while i < chars.len() && !chars[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == chars.len() {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    out.push(chars[i]);
    out.extend(&chars[1..i]);
    out.extend(&chars[i + 1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_letter() {
        assert!(is_letter('a'));
        assert!(is_letter('*'));
        assert!(is_letter('/'));
        assert!(is_letter('='));
        assert!(!is_letter('j'));
        assert!(!is_letter('.'));
        assert!(!is_letter(' '));
    }

    #[test]
    fn test_to_unicode_basic() {
        assert_eq!(to_unicode("logos", false).unwrap(), "λογος");
        assert_eq!(to_unicode("mh=nin", false).unwrap(), "μη\u{342}νιν");
    }

    #[test]
    fn test_to_unicode_final_sigma() {
        let u = to_unicode("qeos", false).unwrap();
        assert!(u.ends_with(FINAL_SIGMA));
        let u = to_unicode("sofia", false).unwrap();
        assert!(u.starts_with(SIGMA));
    }

    #[test]
    fn test_to_unicode_lunate() {
        let u = to_unicode("qeos", true).unwrap();
        assert!(u.ends_with(LUNATE_SIGMA));
    }

    #[test]
    fn test_to_unicode_uppercase_shift() {
        // *(ellas: rough breathing attaches after the capital epsilon.
        let u = to_unicode("*(ella/s", false).unwrap();
        let mut chars = u.chars();
        assert_eq!(chars.next(), Some('Ε'));
        assert_eq!(chars.next(), Some('\u{0314}'));
    }

    #[test]
    fn test_to_unicode_malformed() {
        assert!(to_unicode("", false).is_err());
        assert!(to_unicode("lo/gos*", false).is_err());
        assert!(to_unicode("*/", false).is_err());
    }

    #[test]
    fn test_cleanse() {
        assert_eq!(cleanse("lo/gos"), "logos");
        assert_eq!(cleanse("mh=nin"), "mhnin");
        assert_eq!(cleanse("*(ella/s"), "ellas");
    }

    #[test]
    fn test_fix_grave() {
        assert_eq!(fix_grave("kai\\"), "kai/");
        assert_eq!(fix_grave("kai/"), "kai/");
    }

    #[test]
    fn test_fix_second_accent() {
        // Enclitic-induced second acute is dropped.
        assert_eq!(fix_second_accent("a)/nqrwpo/s"), "a)/nqrwpos");
        // Circumflex plus acute: the acute goes.
        assert_eq!(fix_second_accent("mou=sa/"), "mou=sa");
        // Single accent untouched.
        assert_eq!(fix_second_accent("lo/gos"), "lo/gos");
    }

    #[test]
    fn test_fix_second_accent_idempotent() {
        let w = "a)/nqrwpo/s";
        let once = fix_second_accent(w);
        assert_eq!(fix_second_accent(&once), once);
    }

    #[test]
    fn test_uncap() {
        assert_eq!(uncap("*(ella/s"), "e(lla/s");
        assert_eq!(uncap("lo/gos"), "lo/gos");
    }
}
