//! The Latin pronoun-person table and line-oriented config parsing.
//!
//! The service omits grammatical person from Latin pronoun analyses (though
//! not from Greek ones), so verb agreement cannot be computed without a
//! side table mapping pronoun lemmas to persons. A built-in table covers
//! the personal and demonstrative pronouns; callers with a larger word
//! list load their own with [`PronounLexicon::parse`].

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::{LexisError, Result};

lazy_static! {
    static ref LATIN_PRONOUNS: PronounLexicon = PronounLexicon::from_pairs([
        ("ego", "1st"),
        ("nos", "1st"),
        ("tu", "2nd"),
        ("vos", "2nd"),
        ("sui", "3rd"),
        ("is", "3rd"),
        ("hic", "3rd"),
        ("ille", "3rd"),
        ("iste", "3rd"),
        ("ipse", "3rd"),
        ("idem", "3rd"),
    ]);
}

/// A pronoun lemma → grammatical person table.
#[derive(Clone, Debug, Default)]
pub struct PronounLexicon {
    persons: HashMap<String, String>,
}

impl PronounLexicon {
    /// The built-in table for Latin.
    pub fn latin_default() -> &'static PronounLexicon {
        &LATIN_PRONOUNS
    }

    /// Build a table from (lemma, person) pairs.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        PronounLexicon {
            persons: pairs
                .into_iter()
                .map(|(l, p)| (l.into(), p.into()))
                .collect(),
        }
    }

    /// Parse a pair file: one `lemma person` pair per line, whitespace
    /// separated. Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut persons = HashMap::new();
        for line in config_lines(text) {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(lemma), Some(person), None) => {
                    persons.insert(lemma.to_string(), person.to_string());
                }
                _ => {
                    return Err(LexisError::config(format!(
                        "malformed pronoun line `{line}`, expected `lemma person`"
                    )));
                }
            }
        }
        Ok(PronounLexicon { persons })
    }

    /// The person of a pronoun lemma, if the table knows it.
    pub fn person(&self, lemma: &str) -> Option<&str> {
        self.persons.get(lemma).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

/// Parse a word-list file: one entry per line, trailing whitespace
/// trimmed. Blank lines and lines starting with `#` are skipped.
///
/// Used for abbreviation lists fed to
/// [`PunctuationProfile`](crate::tokenize::PunctuationProfile).
pub fn parse_word_list(text: &str) -> Vec<String> {
    config_lines(text).map(str::to_string).collect()
}

fn config_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}
