//! Cache-aware fetching and the bounded batch retry policy.

use tracing::debug;

use crate::cache::AnalysisCache;
use crate::error::Result;
use crate::lookup::client::{LookupService, RemoteResult};
use crate::lookup::key::LookupKey;
use crate::tokenize::Word;

/// Result of a [`retry_all`] pass.
#[derive(Debug)]
pub struct RetryOutcome {
    /// Number of retry rounds actually performed.
    pub attempts: usize,
    /// Final results, in the same order as the input.
    pub results: Vec<(Word, RemoteResult)>,
    /// Did every entry end up with a successful fetch?
    pub all_ok: bool,
}

/// Fetch a word's analysis document, consulting the cache first.
///
/// A cached success is returned without touching the network. An absent
/// entry or a cached rejection triggers a fresh fetch whose outcome
/// (success or rejection) is stored back into the cache. Fatal transport
/// errors propagate without being cached.
pub fn fetch_with_cache<S, C>(service: &S, cache: &mut C, word: &Word) -> Result<RemoteResult>
where
    S: LookupService + ?Sized,
    C: AnalysisCache + ?Sized,
{
    let key = LookupKey::for_word(word)?;
    if let Some(cached) = cache.lookup(&key)? {
        if cached.is_ok() {
            debug!(%key, "serving analysis from cache");
            return Ok(cached);
        }
        debug!(%key, "cached rejection, refetching");
    }
    let result = service.fetch(&key)?;
    cache.store(&key, &result)?;
    Ok(result)
}

/// Re-fetch the not-yet-successful entries of a batch, up to `max_attempts`
/// rounds.
///
/// Entries that already succeeded are never re-fetched. If the bound is
/// exhausted the last-seen retryable results are returned with
/// `all_ok == false`; a fatal transport error still aborts immediately.
pub fn retry_all<S, C>(
    service: &S,
    cache: &mut C,
    pending: Vec<(Word, RemoteResult)>,
    max_attempts: usize,
) -> Result<RetryOutcome>
where
    S: LookupService + ?Sized,
    C: AnalysisCache + ?Sized,
{
    let mut results = pending;
    let mut attempts = 0;

    while attempts < max_attempts && results.iter().any(|(_, r)| !r.is_ok()) {
        attempts += 1;
        debug!(attempt = attempts, "retrying rejected lookups");
        for entry in results.iter_mut().filter(|(_, r)| !r.is_ok()) {
            let fresh = fetch_with_cache(service, cache, &entry.0)?;
            entry.1 = fresh;
        }
    }

    let all_ok = results.iter().all(|(_, r)| r.is_ok());
    Ok(RetryOutcome {
        attempts,
        results,
        all_ok,
    })
}
