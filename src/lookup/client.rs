//! The remote lexical-service client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LexisError, Result};
use crate::lookup::key::LookupKey;

/// Default base URL of the Morpheus service.
pub const DEFAULT_BASE_URL: &str = "http://www.perseus.tufts.edu/hopper/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one lookup request, as stored in the cache.
///
/// `Ok` holds the raw analysis document; `Rejected` records a structured
/// rejection from the endpoint with enough information to report it later
/// without re-raising the transport error. Fatal transport failures are
/// *not* represented here — they surface as [`LexisError::Remote`] and are
/// never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteResult {
    /// The service answered with an analysis document.
    Ok(String),
    /// The service rejected this request; retryable.
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Human-readable rejection message.
        message: String,
    },
}

impl RemoteResult {
    /// Did the fetch succeed?
    pub fn is_ok(&self) -> bool {
        matches!(self, RemoteResult::Ok(_))
    }

    /// The raw document, if the fetch succeeded.
    pub fn document(&self) -> Option<&str> {
        match self {
            RemoteResult::Ok(doc) => Some(doc),
            RemoteResult::Rejected { .. } => None,
        }
    }
}

/// Transport seam for the lexical service.
///
/// Implementations issue one request per key and classify the outcome:
/// a response (success or structured rejection) is returned as a
/// [`RemoteResult`]; an unusable connection is a fatal error.
pub trait LookupService {
    /// Fetch the analysis document for one canonical key.
    fn fetch(&self, key: &LookupKey) -> Result<RemoteResult>;
}

/// Blocking HTTP implementation of [`LookupService`].
///
/// Requests are addressed as `{base}xmlmorph?lang={lang}&lookup={text}`.
pub struct HttpLookupService {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpLookupService {
    /// Create a client against the default Perseus endpoint.
    pub fn new() -> Result<Self> {
        HttpLookupService::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate endpoint (e.g. a local mirror).
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LexisError::remote(format!("failed to build HTTP client: {e}")))?;
        Ok(HttpLookupService {
            client,
            base_url: base_url.into(),
        })
    }

    /// The request URL for a key.
    pub fn url_for(&self, key: &LookupKey) -> String {
        format!(
            "{}xmlmorph?lang={}&lookup={}",
            self.base_url,
            key.lang().service_code(),
            key.text()
        )
    }
}

impl LookupService for HttpLookupService {
    fn fetch(&self, key: &LookupKey) -> Result<RemoteResult> {
        let url = self.url_for(key);
        debug!(%url, "fetching analysis document");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LexisError::remote(format!("request for {key} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .map_err(|e| LexisError::remote(format!("reading response for {key}: {e}")))?;
            Ok(RemoteResult::Ok(body))
        } else {
            // The endpoint answered but refused this request; cacheable and
            // retryable, not fatal.
            Ok(RemoteResult::Rejected {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unrecognized status")
                    .to_string(),
            })
        }
    }
}
