//! Word segmentation for classical text.
//!
//! This module turns a character stream into [`Word`] values carrying
//! structural position: a zero-based word ordinal, plus the ordinals of the
//! clause and sentence the word belongs to. Clause and sentence boundaries
//! are recognized from per-language punctuation tables, with an abbreviation
//! list preventing Latin praenomina from being counted as sentence ends.
//!
//! # Examples
//!
//! ```
//! use lexis::alphabet::Language;
//! use lexis::tokenize::{PunctuationProfile, WordStream};
//!
//! let profile = PunctuationProfile::latin(vec![]);
//! let stream = WordStream::from_text(None, "Arma virumque cano.", Language::Latin, None, false, profile).unwrap();
//! let words = stream.collect_words().unwrap();
//! assert_eq!(words.len(), 3);
//! assert_eq!(words[2].text(), "cano");
//! assert_eq!(words[2].terminator(), Some('.'));
//! ```

pub mod profile;
pub mod word;
pub mod word_stream;

pub use profile::PunctuationProfile;
pub use word::Word;
pub use word_stream::WordStream;
