//! Canonical lookup keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::{CaseMode, GreekEncoding, Language, betacode, unigreek};
use crate::error::{LexisError, Result};
use crate::tokenize::Word;

/// The canonical (word, language) pair used to address the service and key
/// the cache.
///
/// The text is url-safe: lower-cased for Latin; for Greek, the
/// diacritic-stripped lower-case BetaCode form regardless of the word's
/// source encoding. Two words that denote the same lexical item under the
/// service's matching rules map to the same key.
///
/// # Examples
///
/// ```
/// use lexis::alphabet::{GreekEncoding, Language};
/// use lexis::lookup::LookupKey;
/// use lexis::tokenize::Word;
///
/// let bc = Word::bare("lo/gos", Language::Greek, Some(GreekEncoding::BetaCode));
/// let uni = Word::bare("λόγος", Language::Greek, Some(GreekEncoding::Unicode));
/// assert_eq!(LookupKey::for_word(&bc).unwrap(), LookupKey::for_word(&uni).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LookupKey {
    text: String,
    lang: Language,
}

impl LookupKey {
    /// Build a key from already-canonical parts. Prefer [`LookupKey::for_word`].
    pub fn new<S: Into<String>>(text: S, lang: Language) -> Self {
        LookupKey {
            text: text.into(),
            lang,
        }
    }

    /// Derive the canonical key for a word.
    pub fn for_word(word: &Word) -> Result<LookupKey> {
        let text = match word.lang() {
            Language::Latin => word.text().to_lowercase(),
            Language::Greek => match word.encoding() {
                Some(GreekEncoding::BetaCode) => {
                    betacode::cleanse(word.text()).to_lowercase()
                }
                Some(GreekEncoding::Unicode) => {
                    betacode::cleanse(&unigreek::to_betacode(word.text(), CaseMode::ForceLower)?)
                }
                None => {
                    return Err(LexisError::config(format!(
                        "Greek word {:?} has no encoding",
                        word.text()
                    )));
                }
            },
        };
        Ok(LookupKey {
            text,
            lang: word.lang(),
        })
    }

    /// The canonical lookup text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The language tag.
    pub fn lang(&self) -> Language {
        self.lang
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_key_lowercases() {
        let w = Word::bare("Arma", Language::Latin, None);
        let k = LookupKey::for_word(&w).unwrap();
        assert_eq!(k.text(), "arma");
        assert_eq!(k.lang(), Language::Latin);
    }

    #[test]
    fn test_betacode_key_strips_diacritics() {
        let w = Word::bare("lo/gos", Language::Greek, Some(GreekEncoding::BetaCode));
        let k = LookupKey::for_word(&w).unwrap();
        assert_eq!(k.text(), "logos");
    }

    #[test]
    fn test_unicode_key_transliterates() {
        let w = Word::bare("μῆνιν", Language::Greek, Some(GreekEncoding::Unicode));
        let k = LookupKey::for_word(&w).unwrap();
        assert_eq!(k.text(), "mhnin");
    }

    #[test]
    fn test_equal_lexical_items_share_keys() {
        let bc = Word::bare("qea/", Language::Greek, Some(GreekEncoding::BetaCode));
        let uni = Word::bare("θεά", Language::Greek, Some(GreekEncoding::Unicode));
        assert_eq!(
            LookupKey::for_word(&bc).unwrap(),
            LookupKey::for_word(&uni).unwrap()
        );
    }

    #[test]
    fn test_missing_encoding_is_config_error() {
        let w = Word::bare("qea", Language::Greek, None);
        assert!(matches!(
            LookupKey::for_word(&w),
            Err(LexisError::Config(_))
        ));
    }
}
