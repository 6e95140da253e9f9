//! Lookup keys and the remote lexical-service client.
//!
//! A [`Word`](crate::tokenize::Word) is addressed to the service by its
//! [`LookupKey`]: a lower-cased, diacritic-stripped BetaCode form plus the
//! language tag. The [`LookupService`] trait seams out the transport so the
//! pipeline can run against the real HTTP endpoint or a test double, and
//! [`RemoteResult`] carries the retryable-vs-fatal outcome split: a rejected
//! request is a cacheable value, a broken connection is an error that aborts
//! the batch.

pub mod client;
pub mod key;
pub mod retry;

pub use client::{HttpLookupService, LookupService, RemoteResult};
pub use key::LookupKey;
pub use retry::{RetryOutcome, fetch_with_cache, retry_all};
