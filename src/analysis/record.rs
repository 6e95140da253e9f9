//! One candidate morphological reading and its fix pipeline.

use std::collections::BTreeMap;

use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::alphabet::{CaseMode, GreekEncoding, Language, betacode, latin, unigreek};
use crate::analysis::lexicon::PronounLexicon;
use crate::error::{LexisError, Result};
use crate::tokenize::Word;

/// Features defined for every part of speech. Everything else a record
/// carries is inflectional, specific to its part of speech.
pub const CORE_FEATURES: &[&str] = &[
    "form",
    "lemma",
    "expandedForm",
    "pos",
    "lang",
    "dialect",
    "feature",
    "lemma_sfx",
];

/// One candidate reading: a mutable feature map plus the word it was
/// produced for.
///
/// Records are created by parsing one analysis unit of the response
/// document and mutated in place by the fix pipeline; they are never
/// shared across words. Equality covers the complete feature set except
/// the synthetic `lemma_sfx`, so two parses of the same reading compare
/// equal after fixing.
#[derive(Clone, Debug)]
pub struct AnalysisRecord {
    features: BTreeMap<String, String>,
    word: Word,
    pron_fix_failed: bool,
}

impl AnalysisRecord {
    pub(crate) fn new(word: Word, features: BTreeMap<String, String>) -> Self {
        AnalysisRecord {
            features,
            word,
            pron_fix_failed: false,
        }
    }

    /// The word this reading was produced for.
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// The value of a feature. Requesting an absent feature is an error,
    /// never an empty default: a silently missing value would corrupt
    /// downstream export.
    pub fn get(&self, tag: &str) -> Result<&str> {
        self.try_get(tag)
            .ok_or_else(|| LexisError::feature(format!("no feature {tag} in analysis")))
    }

    /// The value of a feature, or `None` if absent.
    pub fn try_get(&self, tag: &str) -> Option<&str> {
        self.features.get(tag).map(String::as_str)
    }

    /// Set or replace a feature value.
    pub fn set<S: Into<String>, T: Into<String>>(&mut self, tag: S, value: T) {
        self.features.insert(tag.into(), value.into());
    }

    /// The full feature map, for export.
    pub fn features(&self) -> &BTreeMap<String, String> {
        &self.features
    }

    /// Names of the features specific to this part of speech, sorted.
    pub fn inflectional_features(&self) -> Vec<&str> {
        self.features
            .keys()
            .map(String::as_str)
            .filter(|tag| !CORE_FEATURES.contains(tag))
            .collect()
    }

    /// Did the pronoun fix fail for this record?
    pub fn pron_fix_failed(&self) -> bool {
        self.pron_fix_failed
    }

    /// Run the whole fix pipeline. The order matters: the lemma fix must
    /// precede the pronoun fix, since suffixed lemmas miss the table.
    pub fn apply_fixes(&mut self, lexicon: &PronounLexicon) {
        self.fix_lemma();
        self.fix_part();
        self.fix_pron(lexicon);
        self.fix_person();
        self.fix_mood();
        self.fix_form();
    }

    /// Split a trailing digit run off the lemma into `lemma_sfx`.
    /// Homograph lemmas come back numbered (`arma1`); the bare lemma is
    /// what the pronoun table and dictionary references use.
    pub fn fix_lemma(&mut self) {
        let (stem, sfx) = {
            let Some(lemma) = self.try_get("lemma") else {
                return;
            };
            let stem = lemma.trim_end_matches(|c: char| c.is_ascii_digit());
            if stem.len() == lemma.len() {
                return;
            }
            (stem.to_string(), lemma[stem.len()..].to_string())
        };
        self.set("lemma", stem);
        self.set("lemma_sfx", sfx);
    }

    /// Supply the voice the service omits from the Latin present
    /// participle.
    pub fn fix_part(&mut self) {
        if self.try_get("pos") == Some("part")
            && self.try_get("lang") == Some("latin")
            && self.try_get("tense") == Some("pres")
        {
            self.set("voice", "act");
        }
    }

    /// Supply the person the service omits from Latin pronouns, so verb
    /// agreement can be computed. An unknown lemma flags the record
    /// rather than failing; the rest of the reading is still usable.
    pub fn fix_pron(&mut self, lexicon: &PronounLexicon) {
        if self.try_get("pos") != Some("pron") || self.try_get("lang") != Some("latin") {
            return;
        }
        let Some(lemma) = self.try_get("lemma").map(str::to_string) else {
            return;
        };
        match lexicon.person(&lemma) {
            Some(person) => self.set("person", person),
            None => {
                warn!(lemma = %lemma, word = %self.word, "pronoun person unknown");
                self.pron_fix_failed = true;
            }
        }
    }

    /// Truncate the person to its leading digit (`1st` → `1`).
    pub fn fix_person(&mut self) {
        let digit = self
            .try_get("person")
            .and_then(|p| p.chars().next())
            .filter(|c| c.is_ascii_digit());
        if let Some(digit) = digit {
            self.set("person", digit.to_string());
        }
    }

    /// Reclassify the non-finite "moods" as parts of speech: a supine,
    /// infinitive, or gerundive reading moves the mood value into `pos`
    /// and drops `mood`, normalizing arity for fact-style export.
    pub fn fix_mood(&mut self) {
        let Some(mood) = self.try_get("mood").map(str::to_string) else {
            return;
        };
        // "inf" is the wire form of infinitive.
        if matches!(mood.as_str(), "supine" | "inf" | "infinitive" | "gerundive") {
            self.set("pos", mood);
            self.features.remove("mood");
        }
    }

    /// Title-case the form to match a capitalized lemma (proper names
    /// come back with a lower-case form).
    pub fn fix_form(&mut self) {
        let lemma_capitalized = self
            .try_get("lemma")
            .and_then(|l| l.chars().next())
            .is_some_and(char::is_uppercase);
        if !lemma_capitalized {
            return;
        }
        let fixed = {
            let Some(form) = self.try_get("form") else {
                return;
            };
            let mut chars = form.chars();
            match chars.next() {
                Some(first) if first.is_lowercase() => {
                    let mut s: String = first.to_uppercase().collect();
                    s.push_str(chars.as_str());
                    s
                }
                _ => return,
            }
        };
        self.set("form", fixed);
    }

    /// Does the returned form match the submitted word?
    ///
    /// The submitted text is accent-normalized for Greek (grave to acute,
    /// spurious second accent dropped; Latin needs no accent work) and
    /// compared case-insensitively against the `form` feature; separately,
    /// the first-character case category of the submitted word must agree
    /// with the lemma's. Both must hold.
    pub fn is_matched(&self) -> Result<bool> {
        let form = self.get("form")?;
        let lemma = self.get("lemma")?;
        let submitted = self.word.text();

        let (norm_word, norm_form) = match self.word.lang() {
            Language::Latin => (latin::uncap(submitted), latin::uncap(form)),
            Language::Greek => match self.word.encoding() {
                Some(GreekEncoding::BetaCode) => {
                    let w = betacode::fix_second_accent(&betacode::fix_grave(submitted));
                    let f = unigreek::to_betacode(form, CaseMode::ForceLower)?;
                    (betacode::uncap(&w), betacode::uncap(&f))
                }
                Some(GreekEncoding::Unicode) => {
                    let w = unigreek::fix_second_accent(&unigreek::fix_grave(submitted));
                    (lower_first(&w), lower_first(&form.nfd().collect::<String>()))
                }
                None => {
                    return Err(LexisError::config(format!(
                        "Greek word {} has no encoding",
                        self.word
                    )));
                }
            },
        };
        if norm_word != norm_form {
            return Ok(false);
        }

        let word_capitalized = match self.word.encoding() {
            Some(GreekEncoding::BetaCode) => submitted.starts_with(betacode::UC_SHIFT),
            _ => submitted.chars().next().is_some_and(char::is_uppercase),
        };
        let lemma_capitalized = lemma.chars().next().is_some_and(char::is_uppercase);
        Ok(word_capitalized == lemma_capitalized)
    }

    /// The complete feature set minus the synthetic `lemma_sfx`, as the
    /// equality/deduplication identity of this reading.
    pub(crate) fn signature(&self) -> Vec<(&str, &str)> {
        self.features
            .iter()
            .filter(|(tag, _)| tag.as_str() != "lemma_sfx")
            .map(|(tag, value)| (tag.as_str(), value.as_str()))
            .collect()
    }
}

impl PartialEq for AnalysisRecord {
    fn eq(&self, other: &Self) -> bool {
        // pos/lemma short-circuit before the full feature walk.
        if self.try_get("pos") != other.try_get("pos")
            || self.try_get("lemma") != other.try_get("lemma")
        {
            return false;
        }
        self.signature() == other.signature()
    }
}

impl Eq for AnalysisRecord {}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin_record(pairs: &[(&str, &str)]) -> AnalysisRecord {
        record(pairs, Word::bare("arma", Language::Latin, None))
    }

    fn record(pairs: &[(&str, &str)], word: Word) -> AnalysisRecord {
        let features = pairs
            .iter()
            .map(|(t, v)| (t.to_string(), v.to_string()))
            .collect();
        AnalysisRecord::new(word, features)
    }

    #[test]
    fn test_get_absent_feature_is_error() {
        let r = latin_record(&[("pos", "noun")]);
        assert_eq!(r.get("pos").unwrap(), "noun");
        assert!(matches!(r.get("tense"), Err(LexisError::Feature(_))));
    }

    #[test]
    fn test_inflectional_features() {
        let r = latin_record(&[
            ("form", "arma"),
            ("lemma", "arma"),
            ("pos", "noun"),
            ("case", "nom"),
            ("number", "pl"),
        ]);
        assert_eq!(r.inflectional_features(), vec!["case", "number"]);
    }

    #[test]
    fn test_fix_lemma_splits_suffix() {
        let mut r = latin_record(&[("lemma", "arma1")]);
        r.fix_lemma();
        assert_eq!(r.get("lemma").unwrap(), "arma");
        assert_eq!(r.get("lemma_sfx").unwrap(), "1");

        let mut r = latin_record(&[("lemma", "cano")]);
        r.fix_lemma();
        assert_eq!(r.get("lemma").unwrap(), "cano");
        assert!(r.try_get("lemma_sfx").is_none());
    }

    #[test]
    fn test_fix_part_inserts_active_voice() {
        let mut r = latin_record(&[("pos", "part"), ("lang", "latin"), ("tense", "pres")]);
        r.fix_part();
        assert_eq!(r.get("voice").unwrap(), "act");

        // Perfect participles already carry their voice.
        let mut r = latin_record(&[("pos", "part"), ("lang", "latin"), ("tense", "perf")]);
        r.fix_part();
        assert!(r.try_get("voice").is_none());
    }

    #[test]
    fn test_fix_pron_known_lemma() {
        let mut r = latin_record(&[("pos", "pron"), ("lang", "latin"), ("lemma", "ego")]);
        r.fix_pron(PronounLexicon::latin_default());
        assert_eq!(r.get("person").unwrap(), "1st");
        assert!(!r.pron_fix_failed());

        r.fix_person();
        assert_eq!(r.get("person").unwrap(), "1");
    }

    #[test]
    fn test_fix_pron_unknown_lemma_flags_without_error() {
        let mut r = latin_record(&[("pos", "pron"), ("lang", "latin"), ("lemma", "quisquis")]);
        r.fix_pron(PronounLexicon::latin_default());
        assert!(r.try_get("person").is_none());
        assert!(r.pron_fix_failed());
    }

    #[test]
    fn test_fix_mood_reclassifies() {
        let mut r = latin_record(&[("pos", "verb"), ("mood", "supine")]);
        r.fix_mood();
        assert_eq!(r.get("pos").unwrap(), "supine");
        assert!(r.try_get("mood").is_none());

        let mut r = latin_record(&[("pos", "verb"), ("mood", "ind")]);
        r.fix_mood();
        assert_eq!(r.get("pos").unwrap(), "verb");
        assert_eq!(r.get("mood").unwrap(), "ind");
    }

    #[test]
    fn test_fix_form_follows_capitalized_lemma() {
        let mut r = latin_record(&[("lemma", "Troia"), ("form", "troiae")]);
        r.fix_form();
        assert_eq!(r.get("form").unwrap(), "Troiae");

        let mut r = latin_record(&[("lemma", "arma"), ("form", "arma")]);
        r.fix_form();
        assert_eq!(r.get("form").unwrap(), "arma");
    }

    #[test]
    fn test_is_matched_latin() {
        let r = latin_record(&[("form", "arma"), ("lemma", "arma")]);
        assert!(r.is_matched().unwrap());

        let r = latin_record(&[("form", "armis"), ("lemma", "arma")]);
        assert!(!r.is_matched().unwrap());
    }

    #[test]
    fn test_is_matched_requires_case_agreement() {
        // Capitalized word against a lower-case lemma: form text matches
        // but the case categories disagree.
        let word = Word::bare("Arma", Language::Latin, None);
        let r = record(&[("form", "arma"), ("lemma", "arma")], word);
        assert!(!r.is_matched().unwrap());

        let word = Word::bare("Troiae", Language::Latin, None);
        let r = record(&[("form", "Troiae"), ("lemma", "Troia")], word);
        assert!(r.is_matched().unwrap());
    }

    #[test]
    fn test_is_matched_betacode_word_against_unicode_form() {
        let word = Word::bare("mh=nin", Language::Greek, Some(GreekEncoding::BetaCode));
        let r = record(&[("form", "μῆνιν"), ("lemma", "μῆνις")], word);
        assert!(r.is_matched().unwrap());
    }

    #[test]
    fn test_is_matched_normalizes_grave_accent() {
        // Running text carries a grave where the dictionary form has an
        // acute.
        let word = Word::bare("kai\\", Language::Greek, Some(GreekEncoding::BetaCode));
        let r = record(&[("form", "καί"), ("lemma", "καί")], word);
        assert!(r.is_matched().unwrap());
    }

    #[test]
    fn test_equality_ignores_lemma_suffix() {
        let a = latin_record(&[("lemma", "arma"), ("pos", "noun"), ("case", "nom")]);
        let mut b = latin_record(&[("lemma", "arma"), ("pos", "noun"), ("case", "nom")]);
        b.set("lemma_sfx", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_distinguishes_inflection() {
        let a = latin_record(&[("lemma", "arma"), ("pos", "noun"), ("case", "nom")]);
        let b = latin_record(&[("lemma", "arma"), ("pos", "noun"), ("case", "acc")]);
        assert_ne!(a, b);
    }
}
