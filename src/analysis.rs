//! Analysis normalization.
//!
//! A successful lookup returns an XML document holding zero or more
//! candidate morphological readings for one word. This module parses that
//! document into [`AnalysisRecord`]s, applies an ordered pipeline of
//! structural fixes (the service's output has a few well-known gaps),
//! verifies each returned form against the submitted word, and deduplicates
//! structurally identical readings.
//!
//! The normalized output per record is a flat, name-addressable feature
//! map; building interchange strings from it is the caller's business.
//!
//! # Examples
//!
//! ```
//! use lexis::alphabet::Language;
//! use lexis::analysis::{AnalysisList, PronounLexicon};
//! use lexis::tokenize::Word;
//!
//! let doc = r#"<analyses><analysis>
//!     <form lang="la">arma</form><lemma>arma1</lemma>
//!     <pos>noun</pos><number>pl</number><case>nom</case><gender>neut</gender>
//! </analysis></analyses>"#;
//!
//! let word = Word::bare("arma", Language::Latin, None);
//! let mut list = AnalysisList::parse(doc, &word).unwrap();
//! list.normalize(PronounLexicon::latin_default());
//! let record = list.get(0).unwrap();
//! assert_eq!(record.get("lemma").unwrap(), "arma");
//! assert_eq!(record.get("lemma_sfx").unwrap(), "1");
//! ```

pub mod lexicon;
pub mod list;
pub mod parser;
pub mod record;

pub use lexicon::{PronounLexicon, parse_word_list};
pub use list::{AnalysisList, Constraint};
pub use record::{AnalysisRecord, CORE_FEATURES};
