//! The ordered sequence of readings for one word.

use std::collections::HashSet;

use crate::analysis::lexicon::PronounLexicon;
use crate::analysis::parser;
use crate::analysis::record::AnalysisRecord;
use crate::error::{LexisError, Result};
use crate::tokenize::Word;

/// One `tag=value` filtering constraint.
///
/// A leading `!` inverts the test; a leading `#` compares the values as
/// integers instead of strings. Applying a constraint to a record lacking
/// the tag is a structural error, so a part-of-speech-narrowing constraint
/// must precede any constraint on a feature specific to that part of
/// speech.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    tag: String,
    value: String,
    negate: bool,
    numeric: bool,
}

impl Constraint {
    /// Parse a constraint such as `pos=verb`, `!mood=ind`, or `#person=3`.
    pub fn parse(expr: &str) -> Result<Constraint> {
        let mut rest = expr.trim();
        let mut negate = false;
        let mut numeric = false;
        loop {
            if let Some(r) = rest.strip_prefix('!') {
                negate = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix('#') {
                numeric = true;
                rest = r;
            } else {
                break;
            }
        }
        let (tag, value) = rest.split_once('=').ok_or_else(|| {
            LexisError::config(format!("constraint `{expr}` is not of the form tag=value"))
        })?;
        if tag.is_empty() || value.is_empty() {
            return Err(LexisError::config(format!(
                "constraint `{expr}` has an empty tag or value"
            )));
        }
        if numeric {
            value.parse::<i64>().map_err(|_| {
                LexisError::config(format!("constraint `{expr}` compares a non-integer value"))
            })?;
        }
        Ok(Constraint {
            tag: tag.to_string(),
            value: value.to_string(),
            negate,
            numeric,
        })
    }

    /// Does the record satisfy this constraint? Errors if the record has
    /// no such feature.
    pub fn satisfied_by(&self, record: &AnalysisRecord) -> Result<bool> {
        let actual = record.get(&self.tag)?;
        let hit = if self.numeric {
            let want: i64 = self.value.parse().map_err(|_| {
                LexisError::config(format!("constraint value `{}` is not an integer", self.value))
            })?;
            let got: i64 = actual.parse().map_err(|_| {
                LexisError::feature(format!(
                    "feature {} value `{actual}` is not an integer",
                    self.tag
                ))
            })?;
            got == want
        } else {
            actual == self.value
        };
        Ok(hit != self.negate)
    }
}

/// The readings returned for one word, in document order.
#[derive(Clone, Debug)]
pub struct AnalysisList {
    word: Word,
    records: Vec<AnalysisRecord>,
}

impl AnalysisList {
    /// Parse an analysis document into a list of readings for `word`.
    pub fn parse(document: &str, word: &Word) -> Result<Self> {
        Ok(AnalysisList {
            word: word.clone(),
            records: parser::parse_analyses(document, word)?,
        })
    }

    /// The word these readings were returned for.
    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&AnalysisRecord> {
        self.records.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AnalysisRecord> {
        self.records
    }

    /// Run the fix pipeline over every reading.
    pub fn normalize(&mut self, lexicon: &PronounLexicon) {
        for record in &mut self.records {
            record.apply_fixes(lexicon);
        }
    }

    /// The readings satisfying every constraint, as a new list.
    pub fn filter(&self, constraints: &[Constraint]) -> Result<AnalysisList> {
        let keep = self.evaluate(constraints)?;
        let records = self
            .records
            .iter()
            .zip(keep)
            .filter(|(_, keep)| *keep)
            .map(|(record, _)| record.clone())
            .collect();
        Ok(AnalysisList {
            word: self.word.clone(),
            records,
        })
    }

    /// Drop the readings failing any constraint, in place. On error the
    /// list is left unchanged.
    pub fn retain(&mut self, constraints: &[Constraint]) -> Result<()> {
        let keep = self.evaluate(constraints)?;
        let mut flags = keep.into_iter();
        self.records.retain(|_| flags.next().unwrap_or(false));
        Ok(())
    }

    // Constraints are applied left to right; the first failing or erroring
    // one settles a record.
    fn evaluate(&self, constraints: &[Constraint]) -> Result<Vec<bool>> {
        let mut keep = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let mut hit = true;
            for constraint in constraints {
                if !constraint.satisfied_by(record)? {
                    hit = false;
                    break;
                }
            }
            keep.push(hit);
        }
        Ok(keep)
    }

    /// Collapse structurally identical readings to one representative,
    /// keeping the first of each.
    pub fn dedupe(&mut self) {
        let mut seen = HashSet::new();
        self.records.retain(|record| {
            let signature: Vec<(String, String)> = record
                .signature()
                .into_iter()
                .map(|(t, v)| (t.to_string(), v.to_string()))
                .collect();
            seen.insert(signature)
        });
    }

    /// A deduplicated copy, leaving this list untouched.
    pub fn deduped(&self) -> AnalysisList {
        let mut copy = self.clone();
        copy.dedupe();
        copy
    }

    /// Drop the readings whose returned form does not match the submitted
    /// word. On error the list is left unchanged.
    pub fn retain_matched(&mut self) -> Result<()> {
        let mut keep = Vec::with_capacity(self.records.len());
        for record in &self.records {
            keep.push(record.is_matched()?);
        }
        let mut flags = keep.into_iter();
        self.records.retain(|_| flags.next().unwrap_or(false));
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AnalysisList {
    type Item = &'a AnalysisRecord;
    type IntoIter = std::slice::Iter<'a, AnalysisRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
