//! The segmented word value type.

use std::fmt;

use crate::alphabet::{GreekEncoding, Language};

/// One segmented word with its scope label, language, and position.
///
/// Created by the tokenizer once per token and immutable thereafter. The
/// ordinals are zero-based and monotonically non-decreasing across a single
/// tokenization pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    label: Option<String>,
    text: String,
    lang: Language,
    encoding: Option<GreekEncoding>,
    word_ordinal: usize,
    clause_ordinal: usize,
    sentence_ordinal: usize,
    terminator: Option<char>,
}

impl Word {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        label: Option<String>,
        text: String,
        lang: Language,
        encoding: Option<GreekEncoding>,
        word_ordinal: usize,
        clause_ordinal: usize,
        sentence_ordinal: usize,
        terminator: Option<char>,
    ) -> Self {
        Word {
            label,
            text,
            lang,
            encoding,
            word_ordinal,
            clause_ordinal,
            sentence_ordinal,
            terminator,
        }
    }

    /// Construct a word with no textual context, for one-off lookups.
    /// The label is absent and all ordinals are zero.
    pub fn bare<S: Into<String>>(
        text: S,
        lang: Language,
        encoding: Option<GreekEncoding>,
    ) -> Self {
        Word::new(None, text.into(), lang, encoding, 0, 0, 0, None)
    }

    /// The scope label of the containing text, if any (e.g. `Hom. Od. i`).
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The surface text, stripped of punctuation.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The word's language.
    pub fn lang(&self) -> Language {
        self.lang
    }

    /// The Greek sub-encoding. `None` for Latin words.
    pub fn encoding(&self) -> Option<GreekEncoding> {
        self.encoding
    }

    /// Zero-based ordinal of this word in the text.
    pub fn word_ordinal(&self) -> usize {
        self.word_ordinal
    }

    /// Zero-based ordinal of the containing clause.
    pub fn clause_ordinal(&self) -> usize {
        self.clause_ordinal
    }

    /// Zero-based ordinal of the containing sentence.
    pub fn sentence_ordinal(&self) -> usize {
        self.sentence_ordinal
    }

    /// The separator or terminator observed after this word, if any.
    pub fn terminator(&self) -> Option<char> {
        self.terminator
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) word no. {} in '{}'",
            self.text,
            self.lang,
            self.word_ordinal,
            self.label.as_deref().unwrap_or("no label")
        )
    }
}
