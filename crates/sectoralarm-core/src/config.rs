// ── Runtime configuration ──
//
// What a `Site` needs to run: credentials and transport tuning in
// `SiteConfig`, retry and output behaviour in `Settings`. Core never reads
// config files; `sectoralarm-config` or the caller builds these.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use sectoralarm_api::{RetryPolicy, TransportConfig};

/// Retry and output behaviour shared by every call on a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Extra attempts after a 401 (0 = single attempt).
    pub number_of_retries: u32,
    /// Fixed wait between attempts.
    pub retry_delay_in_ms: u64,
    /// Render results as JSON strings instead of structured values.
    pub json_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            number_of_retries: 3,
            retry_delay_in_ms: 3000,
            json_output: true,
        }
    }
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.number_of_retries,
            Duration::from_millis(self.retry_delay_in_ms),
        )
    }
}

/// Account and transport details for one alarm site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub email: String,
    pub password: SecretString,
    /// Panel identifier, as shown on the vendor's web pages.
    pub site_id: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl SiteConfig {
    /// Config against the production host with the default timeout.
    pub fn new(
        email: impl Into<String>,
        password: SecretString,
        site_id: impl Into<String>,
    ) -> Self {
        let transport = TransportConfig::default();
        Self {
            email: email.into(),
            password,
            site_id: site_id.into(),
            base_url: transport.base_url,
            timeout: transport.timeout,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}
