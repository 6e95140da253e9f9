//! End-to-end pipeline tests: tokenize, look up against a scripted
//! service, cache, and normalize the returned analyses.

use std::collections::HashMap;

use lexis::alphabet::{CaseMode, GreekEncoding, Language, betacode, unigreek};
use lexis::analysis::{AnalysisList, Constraint, PronounLexicon};
use lexis::cache::{AnalysisCache, SnapshotCache};
use lexis::error::Result;
use lexis::lookup::{LookupKey, LookupService, RemoteResult, fetch_with_cache, retry_all};
use lexis::tokenize::{PunctuationProfile, Word, WordStream};

/// Serves canned analysis documents keyed by canonical lookup text.
struct MapService {
    documents: HashMap<String, String>,
}

impl MapService {
    fn new(entries: &[(&str, &str)]) -> Self {
        MapService {
            documents: entries
                .iter()
                .map(|(k, d)| (k.to_string(), d.to_string()))
                .collect(),
        }
    }
}

impl LookupService for MapService {
    fn fetch(&self, key: &LookupKey) -> Result<RemoteResult> {
        match self.documents.get(key.text()) {
            Some(doc) => Ok(RemoteResult::Ok(doc.clone())),
            None => Ok(RemoteResult::Rejected {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        }
    }
}

fn noun_doc(form: &str, lemma: &str, case: &str) -> String {
    format!(
        "<analyses><analysis><form lang=\"la\">{form}</form><lemma>{lemma}</lemma>\
         <pos>noun</pos><number>pl</number><gender>neut</gender><case>{case}</case>\
         </analysis></analyses>"
    )
}

fn latin_words(text: &str) -> Result<Vec<Word>> {
    let stream = WordStream::from_text(
        Some("Verg. A. 1"),
        text,
        Language::Latin,
        None,
        false,
        PunctuationProfile::latin(vec![]),
    )?;
    stream.collect_words()
}

#[test]
fn test_latin_ordinals_across_sentence_boundary() -> Result<()> {
    let words = latin_words("Arma virumque cano. Troiae qui primus ab oris")?;
    let texts: Vec<&str> = words.iter().map(|w| w.text()).collect();
    assert_eq!(texts, vec![
        "Arma", "virumque", "cano", "Troiae", "qui", "primus", "ab", "oris"
    ]);

    for (i, word) in words.iter().enumerate() {
        assert_eq!(word.word_ordinal(), i);
    }
    // One boundary, exactly after "cano."
    for word in &words[..3] {
        assert_eq!(word.clause_ordinal(), 0);
        assert_eq!(word.sentence_ordinal(), 0);
    }
    for word in &words[3..] {
        assert_eq!(word.clause_ordinal(), 1);
        assert_eq!(word.sentence_ordinal(), 1);
    }
    assert_eq!(words[2].terminator(), Some('.'));
    Ok(())
}

#[test]
fn test_latin_lookup_and_normalize() -> Result<()> {
    let service = MapService::new(&[(
        "arma",
        "<analyses>\
         <analysis><form lang=\"la\">arma</form><lemma>arma1</lemma>\
         <pos>noun</pos><number>pl</number><gender>neut</gender><case>nom</case></analysis>\
         <analysis><form lang=\"la\">arma</form><lemma>arma1</lemma>\
         <pos>noun</pos><number>pl</number><gender>neut</gender><case>acc</case></analysis>\
         </analyses>",
    )]);
    let mut cache = SnapshotCache::in_memory();

    let words = latin_words("Arma virumque cano.")?;
    let arma = &words[0];

    let result = fetch_with_cache(&service, &mut cache, arma)?;
    let doc = result.document().expect("lookup succeeded");

    let mut list = AnalysisList::parse(doc, arma)?;
    list.normalize(PronounLexicon::latin_default());
    assert_eq!(list.len(), 2);

    // The homograph suffix is split off every reading.
    for record in &list {
        assert_eq!(record.get("lemma")?, "arma");
        assert_eq!(record.get("lemma_sfx")?, "1");
        assert_eq!(record.get("lang")?, "latin");
    }

    // Narrow to the accusative reading.
    let acc = list.filter(&[Constraint::parse("case=acc")?])?;
    assert_eq!(acc.len(), 1);

    // The cache now serves the same document without the service.
    let key = LookupKey::for_word(arma)?;
    assert_eq!(cache.lookup(&key)?, Some(result));
    Ok(())
}

#[test]
fn test_greek_betacode_pipeline() -> Result<()> {
    // Iliad 1.1, BetaCode. Keys are diacritic-stripped.
    let service = MapService::new(&[(
        "mhnin",
        "<analyses><analysis><form lang=\"greek\">μῆνιν</form>\
         <lemma>μῆνις</lemma><pos>noun</pos><number>sg</number>\
         <gender>fem</gender><case>acc</case></analysis></analyses>",
    )]);
    let mut cache = SnapshotCache::in_memory();

    let stream = WordStream::from_text(
        Some("Hom. Il. 1"),
        "mh=nin a)/eide qea/",
        Language::Greek,
        Some(GreekEncoding::BetaCode),
        false,
        PunctuationProfile::greek(GreekEncoding::BetaCode),
    )?;
    let words = stream.collect_words()?;
    assert_eq!(words[0].text(), "mh=nin");

    let key = LookupKey::for_word(&words[0])?;
    assert_eq!(key.text(), "mhnin");
    assert_eq!(key.lang(), Language::Greek);

    let result = fetch_with_cache(&service, &mut cache, &words[0])?;
    let mut list = AnalysisList::parse(result.document().expect("lookup succeeded"), &words[0])?;
    list.normalize(PronounLexicon::latin_default());

    // The returned Unicode form matches the submitted BetaCode word.
    list.retain_matched()?;
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0).expect("one reading").get("case")?, "acc");
    Ok(())
}

#[test]
fn test_retry_batch_recovers_rejections() -> Result<()> {
    // "virumque" is missing from the service, so its fetch is rejected
    // and stays rejected through every retry round.
    let arma = noun_doc("arma", "arma", "nom");
    let cano = noun_doc("cano", "cano", "nom");
    let service = MapService::new(&[("arma", arma.as_str()), ("cano", cano.as_str())]);
    let mut cache = SnapshotCache::in_memory();

    let words = latin_words("arma virumque cano")?;
    let mut pending = Vec::new();
    for word in &words {
        let result = fetch_with_cache(&service, &mut cache, word)?;
        pending.push((word.clone(), result));
    }
    assert_eq!(pending.iter().filter(|(_, r)| r.is_ok()).count(), 2);

    let outcome = retry_all(&service, &mut cache, pending, 2)?;
    assert!(!outcome.all_ok);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.results.len(), 3);
    assert!(!outcome.results[1].1.is_ok());

    // The rejection is cached as such, distinguishable from "never tried".
    let key = LookupKey::for_word(&words[1])?;
    assert!(matches!(
        cache.lookup(&key)?,
        Some(RemoteResult::Rejected { .. })
    ));
    Ok(())
}

#[test]
fn test_betacode_round_trip_is_stable() -> Result<()> {
    for beta in ["mh=nin", "qea/", "lo/gos", "a)/nqrwpos", "*(ella/s"] {
        let uni = betacode::to_unicode(beta, false)?;
        let beta2 = unigreek::to_betacode(&uni, CaseMode::Preserve)?;
        let uni2 = betacode::to_unicode(&beta2, false)?;
        assert_eq!(uni, uni2, "round trip diverged for {beta}");
    }
    Ok(())
}
