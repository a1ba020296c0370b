// Session and per-call retry state.
//
// A `Session` is produced by login and handed to every authorized call.
// It is never patched in place: re-login builds a new one.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// The authenticated context for one alarm site.
#[derive(Debug, Clone)]
pub struct Session {
    site_id: String,
    cookie: SecretString,
    api_version: String,
}

impl Session {
    pub fn new(site_id: impl Into<String>, cookie: SecretString, api_version: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            cookie,
            api_version: api_version.into(),
        }
    }

    /// The panel identifier every endpoint is scoped to.
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Version tag scraped from the login page; echoed in every payload.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub(crate) fn cookie_header(&self) -> &str {
        self.cookie.expose_secret()
    }
}

/// Bounded, fixed-delay retry on session expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one. `0` means a single attempt.
    pub max_retries: u32,
    /// Pause before each reissue.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Policy for endpoints that surface the first 401 directly.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(3000))
    }
}

/// Response body text, untyped until it reaches the field mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse(String);

impl RawResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Stand-in for a listing endpoint that answered "nothing provisioned".
    pub(crate) fn empty_list() -> Self {
        Self("[]".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
