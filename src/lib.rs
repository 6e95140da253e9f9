//! # Lexis
//!
//! A morphological analysis client for classical Greek and Latin text.
//!
//! Lexis segments running text into words with structural position
//! (word/clause/sentence ordinals), looks each word up against the Perseus
//! Morpheus lexical service, caches the raw responses, and normalizes the
//! returned analyses into stable, name-addressable feature maps.
//!
//! ## Components
//!
//! - Letter/diacritic engine with bidirectional BetaCode ↔ Unicode Greek
//!   transliteration
//! - Streaming word/clause/sentence tokenizer
//! - Lookup-key derivation and a retry-aware remote client
//! - Pluggable response cache (flat snapshot or SQLite)
//! - Analysis normalization pipeline (fixes, match verification, dedup)

pub mod alphabet;
pub mod analysis;
pub mod cache;
pub mod error;
pub mod lookup;
pub mod tokenize;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
