// Fixed endpoint table.
//
// Every vendor call is one row here: method, route, payload shape,
// and the two per-endpoint quirks the executor needs to know about.

use std::fmt;

use reqwest::Method;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

use crate::command::{LockCommand, PanelCommand};
use crate::session::Session;

/// One fixed vendor URL template plus its HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Metadata,
    Login,
    Overview,
    History,
    Temperatures,
    Locks,
    Lock,
    Unlock,
    ArmPanel,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Self::Metadata | Self::History | Self::Locks => Method::GET,
            Self::Login
            | Self::Overview
            | Self::Temperatures
            | Self::Lock
            | Self::Unlock
            | Self::ArmPanel => Method::POST,
        }
    }

    /// Whether a 401 from this endpoint is retried under the caller's policy.
    ///
    /// Listing endpoints and the login flow surface the first 401 directly.
    pub fn retries_on_expiry(self) -> bool {
        matches!(
            self,
            Self::Overview | Self::Temperatures | Self::Lock | Self::Unlock | Self::ArmPanel
        )
    }

    /// The lock listing answers 500 when no locks are provisioned.
    pub fn empty_on_server_error(self) -> bool {
        matches!(self, Self::Locks)
    }

    /// Path segments and query pairs below the base URL.
    pub fn route(self, session: Option<&Session>) -> Route {
        let (site_id, version) = session.map_or(("", ""), |s| (s.site_id(), s.api_version()));
        match self {
            Self::Metadata => Route::new(&["User", "Login"]),
            Self::Login => Route::new(&["User", "Login"]).query("ReturnUrl", "/"),
            Self::Overview => Route::new(&["Panel", "GetOverview", ""]),
            Self::History => {
                Route::new(&["Panel", "GetPanelHistory", site_id]).query("Version", version)
            }
            Self::Temperatures => Route::new(&["Panel", "GetTempratures", ""]),
            Self::Locks => Route::new(&["Locks", "GetLocks", ""])
                .query("WithStatus", "true")
                .query("id", site_id)
                .query("Version", version),
            Self::Lock => Route::new(&["Locks", "Lock"]),
            Self::Unlock => Route::new(&["Locks", "Unlock"]),
            Self::ArmPanel => Route::new(&["Panel", "ArmPanel", ""]),
        }
    }
}

// ── Route ────────────────────────────────────────────────────────────

/// Unencoded path segments and query pairs. Encoding happens only in
/// [`resolve`](Self::resolve), so site ids and versions never leak
/// reserved characters into the request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl Route {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| (*s).to_owned()).collect(),
            query: Vec::new(),
        }
    }

    fn query(mut self, key: &'static str, value: &str) -> Self {
        self.query.push((key, value.to_owned()));
        self
    }

    /// Append this route to `base`, keeping any path prefix `base` has.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

/// Human-readable form for logs and errors; not percent-encoded.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

impl From<LockCommand> for Endpoint {
    fn from(command: LockCommand) -> Self {
        match command {
            LockCommand::Lock => Self::Lock,
            LockCommand::Unlock => Self::Unlock,
        }
    }
}

/// Request body shapes used by the vendor.
///
/// Form values are kept secret so a logged request never leaks a password.
#[derive(Debug, Clone)]
pub enum Payload {
    None,
    Json(Value),
    Form(Vec<(&'static str, SecretString)>),
}

/// A fully described call: endpoint, route, and body.
///
/// Built once per logical operation and reissued unchanged on retry.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub route: Route,
    pub payload: Payload,
}

impl ApiRequest {
    fn new(endpoint: Endpoint, session: Option<&Session>, payload: Payload) -> Self {
        Self {
            endpoint,
            route: endpoint.route(session),
            payload,
        }
    }

    pub fn metadata() -> Self {
        Self::new(Endpoint::Metadata, None, Payload::None)
    }

    pub fn login(email: &str, password: &SecretString) -> Self {
        Self::new(
            Endpoint::Login,
            None,
            Payload::Form(vec![
                ("userID", SecretString::from(email.to_owned())),
                ("password", password.clone()),
            ]),
        )
    }

    pub fn overview(session: &Session) -> Self {
        let body = json!({
            "PanelId": session.site_id(),
            "Version": session.api_version(),
        });
        Self::new(Endpoint::Overview, Some(session), Payload::Json(body))
    }

    pub fn history(session: &Session) -> Self {
        Self::new(Endpoint::History, Some(session), Payload::None)
    }

    pub fn temperatures(session: &Session) -> Self {
        let body = json!({
            "id": session.site_id(),
            "Version": session.api_version(),
        });
        Self::new(Endpoint::Temperatures, Some(session), Payload::Json(body))
    }

    pub fn locks(session: &Session) -> Self {
        Self::new(Endpoint::Locks, Some(session), Payload::None)
    }

    pub fn act_on_lock(session: &Session, lock_id: &str, code: &str, command: LockCommand) -> Self {
        let body = json!({
            "id": session.site_id(),
            "LockSerial": lock_id,
            "DisarmCode": code,
            "Version": session.api_version(),
        });
        Self::new(command.into(), Some(session), Payload::Json(body))
    }

    pub fn arm_panel(session: &Session, code: &str, command: PanelCommand) -> Self {
        let body = json!({
            "ArmCmd": command.as_ref(),
            "PanelCode": code,
            "HasLocks": false,
            "id": session.site_id(),
            "Version": session.api_version(),
        });
        Self::new(Endpoint::ArmPanel, Some(session), Payload::Json(body))
    }
}
