// Request executor
//
// Wraps `reqwest::Client` with URL construction, manual cookie handling,
// response classification, and the bounded session-expiry retry loop.
// Endpoint-specific calls live in `auth.rs` and `panel.rs` as inherent
// methods so this module stays focused on transport mechanics.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, COOKIE};
use secrecy::ExposeSecret;
use tracing::{debug, trace, warn};
use url::Url;

use crate::endpoint::{ApiRequest, Payload};
use crate::error::Error;
use crate::session::{RawResponse, RetryPolicy, Session};
use crate::transport::TransportConfig;

const ACCEPT_JSON: &str = "application/json, text/plain, */*";

/// Raw HTTP client for the vendor's browser-facing endpoints.
///
/// Holds no session state: every authorized call receives the `Session`
/// explicitly, and the cookie is sent as a plain `Cookie` header.
#[derive(Debug, Clone)]
pub struct SectorAlarmClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Transient retry bookkeeping for one logical call.
#[derive(Debug, Clone, Copy)]
struct RetryState {
    attempts_remaining: u32,
    delay: std::time::Duration,
}

impl From<RetryPolicy> for RetryState {
    fn from(policy: RetryPolicy) -> Self {
        Self {
            attempts_remaining: policy.max_retries,
            delay: policy.delay,
        }
    }
}

impl SectorAlarmClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: transport.base_url.clone(),
        })
    }


    // ── Request helpers ──────────────────────────────────────────────

    /// Send a request and hand back the raw response, unclassified.
    ///
    /// Only transport failures are errors here; the login flow inspects
    /// status and headers itself.
    pub(crate) async fn send(
        &self,
        request: &ApiRequest,
        cookie: Option<&str>,
    ) -> Result<reqwest::Response, Error> {
        let url = request.route.resolve(&self.base_url)?;
        let method = request.endpoint.method();
        debug!(%method, path = %request.route, "sending request");

        let mut builder = self.http.request(method, url).header(ACCEPT, ACCEPT_JSON);
        if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
            builder = builder.header(COOKIE, cookie);
        }
        builder = match &request.payload {
            Payload::None => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Form(fields) => {
                let exposed: Vec<(&str, &str)> = fields
                    .iter()
                    .map(|(name, value)| (*name, value.expose_secret()))
                    .collect();
                builder.form(&exposed)
            }
        };

        builder.send().await.map_err(Error::Transport)
    }

    /// Issue one authorized request and classify the response.
    ///
    /// A 401 surfaces as `InvalidSession { attempts: 1 }`; callers wanting
    /// the retry behaviour use [`execute_with_retry`](Self::execute_with_retry).
    pub async fn execute(&self, request: &ApiRequest, session: &Session) -> Result<RawResponse, Error> {
        let resp = self.send(request, Some(session.cookie_header())).await?;
        classify(request, resp).await
    }

    /// Issue a request, reissuing it unchanged after each 401 until the
    /// policy's retries are spent.
    ///
    /// With `max_retries = N` at most `N + 1` requests go out. Attempts are
    /// strictly sequential with a fixed pause in between.
    pub async fn execute_with_retry(
        &self,
        request: &ApiRequest,
        session: &Session,
        policy: RetryPolicy,
    ) -> Result<RawResponse, Error> {
        let mut state = RetryState::from(policy);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match self.execute(request, session).await {
                Err(Error::InvalidSession { .. }) if state.attempts_remaining > 0 => {
                    state.attempts_remaining -= 1;
                    warn!(
                        path = %request.route,
                        attempt = attempts,
                        attempts_remaining = state.attempts_remaining,
                        delay_ms = u64::try_from(state.delay.as_millis()).unwrap_or(u64::MAX),
                        "session expired, retrying"
                    );
                    tokio::time::sleep(state.delay).await;
                }
                Err(Error::InvalidSession { .. }) => return Err(Error::InvalidSession { attempts }),
                other => return other,
            }
        }
    }

    /// Route a request through the retry loop only if its endpoint allows it.
    pub(crate) async fn run(
        &self,
        request: &ApiRequest,
        session: &Session,
        policy: RetryPolicy,
    ) -> Result<RawResponse, Error> {
        if request.endpoint.retries_on_expiry() {
            self.execute_with_retry(request, session, policy).await
        } else {
            self.execute(request, session).await
        }
    }
}

/// Map an HTTP response onto success / session-expired / failure.
async fn classify(request: &ApiRequest, resp: reqwest::Response) -> Result<RawResponse, Error> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::InvalidSession { attempts: 1 });
    }

    if status == StatusCode::INTERNAL_SERVER_ERROR && request.endpoint.empty_on_server_error() {
        debug!(path = %request.route, "HTTP 500 from listing endpoint, treating as empty");
        return Ok(RawResponse::empty_list());
    }

    if !status.is_success() {
        return Err(Error::UnexpectedStatus {
            status: status.as_u16(),
            path: request.route.to_string(),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(path = %request.route, len = body.len(), "response body received");

    if looks_like_html(&body) {
        return Err(Error::HtmlResponse {
            path: request.route.to_string(),
        });
    }

    Ok(RawResponse::new(body))
}

/// Does the body open with a markup declaration or an `<html>` tag?
pub(crate) fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with("<!") || head.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("<html"))
}
