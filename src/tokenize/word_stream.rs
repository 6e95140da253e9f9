//! The streaming word/clause/sentence tokenizer.

use crate::alphabet::{self, Alphabet, GreekEncoding, Language};
use crate::error::{LexisError, Result};
use crate::tokenize::profile::PunctuationProfile;
use crate::tokenize::word::Word;

/// A stream of [`Word`]s read from a character stream.
///
/// The stream is a small state machine: characters accumulate into a word
/// until whitespace or boundary punctuation ends it. Boundary punctuation
/// ends a word even with no intervening whitespace; characters that are
/// neither letters nor boundaries (parentheses, dashes, digits) are
/// discarded. Word, clause, and sentence ordinals advance as words are
/// emitted, with the profile's abbreviation list suppressing spurious
/// boundaries after forms like `M.`.
///
/// In mixed mode each word's language is inferred from its letters; a token
/// mixing both scripts is a configuration error, so iteration yields
/// `Result<Word>`.
///
/// # Examples
///
/// ```
/// use lexis::alphabet::Language;
/// use lexis::tokenize::{PunctuationProfile, WordStream};
///
/// let profile = PunctuationProfile::latin(vec![]);
/// let stream =
///     WordStream::from_text(Some("Verg. A. 1"), "Arma virumque cano.", Language::Latin, None, false, profile)
///         .unwrap();
/// for word in stream {
///     let word = word.unwrap();
///     println!("{} @ {}", word.text(), word.word_ordinal());
/// }
/// ```
pub struct WordStream<I: Iterator<Item = char>> {
    chars: I,
    label: Option<String>,
    lang: Language,
    encoding: Option<GreekEncoding>,
    mixed: bool,
    profile: PunctuationProfile,
    word_ordinal: usize,
    clause_ordinal: usize,
    sentence_ordinal: usize,
    acc: String,
    letters: usize,
    done: bool,
}

impl<'a> WordStream<std::str::Chars<'a>> {
    /// Construct a stream over a string.
    pub fn from_text(
        label: Option<&str>,
        text: &'a str,
        lang: Language,
        encoding: Option<GreekEncoding>,
        mixed: bool,
        profile: PunctuationProfile,
    ) -> Result<Self> {
        WordStream::new(label, text.chars(), lang, encoding, mixed, profile)
    }
}

impl<I: Iterator<Item = char>> WordStream<I> {
    /// Construct a stream over an arbitrary character iterator.
    ///
    /// `lang` fixes every word's language unless `mixed` is set, in which
    /// case it only selects the punctuation rules and each word's language
    /// is inferred. Returns a configuration error if Greek is requested
    /// without an encoding, or if mixed mode is combined with BetaCode
    /// (per-word inference needs the scripts to be distinguishable).
    pub fn new(
        label: Option<&str>,
        chars: I,
        lang: Language,
        encoding: Option<GreekEncoding>,
        mixed: bool,
        profile: PunctuationProfile,
    ) -> Result<Self> {
        if lang == Language::Greek && encoding.is_none() {
            return Err(LexisError::config("Greek text requires an encoding"));
        }
        if mixed && lang == Language::Greek && encoding != Some(GreekEncoding::Unicode) {
            return Err(LexisError::config(
                "BetaCode Greek specified in mixed text mode",
            ));
        }
        Ok(WordStream {
            chars,
            label: label.map(str::to_string),
            lang,
            encoding,
            mixed,
            profile,
            word_ordinal: 0,
            clause_ordinal: 0,
            sentence_ordinal: 0,
            acc: String::new(),
            letters: 0,
            done: false,
        })
    }

    /// Number of words emitted so far.
    pub fn word_count(&self) -> usize {
        self.word_ordinal
    }

    /// Number of clause boundaries seen so far.
    pub fn clause_count(&self) -> usize {
        self.clause_ordinal
    }

    /// Number of sentence boundaries seen so far.
    pub fn sentence_count(&self) -> usize {
        self.sentence_ordinal
    }

    /// Drain the stream into a vector.
    pub fn collect_words(self) -> Result<Vec<Word>> {
        self.collect()
    }

    fn is_word_letter(&self, c: char) -> bool {
        if self.mixed {
            return alphabet::is_letter(c, Alphabet::Latin)
                || alphabet::is_letter(c, Alphabet::GreekUnicode);
        }
        match (self.lang, self.encoding) {
            (Language::Latin, _) => alphabet::is_letter(c, Alphabet::Latin),
            (Language::Greek, Some(GreekEncoding::Unicode)) => {
                alphabet::is_letter(c, Alphabet::GreekUnicode)
            }
            (Language::Greek, Some(GreekEncoding::BetaCode)) => {
                alphabet::is_letter(c, Alphabet::GreekBetaCode)
            }
            // Rejected at construction.
            (Language::Greek, None) => false,
        }
    }

    fn infer_lang(&self, text: &str) -> Result<(Language, Option<GreekEncoding>)> {
        if !self.mixed {
            return Ok((self.lang, self.encoding));
        }
        if text.chars().all(|c| alphabet::is_letter(c, Alphabet::Latin)) {
            return Ok((Language::Latin, None));
        }
        if text
            .chars()
            .all(|c| alphabet::is_letter(c, Alphabet::GreekUnicode))
        {
            return Ok((Language::Greek, Some(GreekEncoding::Unicode)));
        }
        Err(LexisError::config(format!(
            "undetermined language for mixed text token {text:?}"
        )))
    }

    /// Turn the accumulator into a [`Word`] and advance the ordinals.
    fn finish_word(&mut self) -> Result<Word> {
        let raw = std::mem::take(&mut self.acc);
        self.letters = 0;

        let last = raw.chars().last();
        let terminator = last.filter(|&c| self.profile.is_boundary(c));
        let stripped = raw.trim_end_matches(|c| self.profile.is_boundary(c));

        let (lang, encoding) = self.infer_lang(stripped)?;
        let text = if lang == Language::Greek {
            stripped.to_lowercase()
        } else {
            stripped.to_string()
        };

        let word = Word::new(
            self.label.clone(),
            text,
            lang,
            encoding,
            self.word_ordinal,
            self.clause_ordinal,
            self.sentence_ordinal,
            terminator,
        );

        self.word_ordinal += 1;
        if let Some(t) = terminator {
            let abbreviated = self.profile.is_abbreviation(stripped);
            if !abbreviated {
                self.clause_ordinal += 1;
                if self.profile.is_terminator(t) {
                    self.sentence_ordinal += 1;
                }
            }
        }
        Ok(word)
    }
}

impl<I: Iterator<Item = char>> Iterator for WordStream<I> {
    type Item = Result<Word>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.chars.next() {
                None => {
                    self.done = true;
                    // A stream ending mid-word still emits the final word.
                    if self.letters > 0 {
                        return Some(self.finish_word());
                    }
                    return None;
                }
                Some(c) if c.is_whitespace() => {
                    if self.letters > 0 {
                        return Some(self.finish_word());
                    }
                }
                Some(c) if self.profile.is_boundary(c) => {
                    // A terminator ends a word even without whitespace, but
                    // emits nothing on an empty accumulator.
                    if self.letters > 0 {
                        self.acc.push(c);
                        return Some(self.finish_word());
                    }
                }
                Some(c) if self.is_word_letter(c) => {
                    self.acc.push(c);
                    self.letters += 1;
                }
                Some(_) => {}
            }
        }
    }
}
