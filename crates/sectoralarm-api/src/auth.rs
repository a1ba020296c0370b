// Login flow
//
// Two calls: a metadata probe against the login page (pre-auth cookie plus
// the API version scraped from a script reference), then the credential
// POST whose only success signal is a 302 carrying the session cookie.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, SET_COOKIE};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::SectorAlarmClient;
use crate::endpoint::ApiRequest;
use crate::error::Error;

/// What the login page tells an anonymous visitor.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// Pre-auth cookies, already in `Cookie` header form.
    pub cookie: SecretString,
    /// Version tag of the vendor's web bundle (e.g. `v1_2_M03`).
    pub api_version: String,
}

impl SectorAlarmClient {
    /// Probe the login page for the pre-auth cookie and API version.
    ///
    /// `GET /User/Login`
    pub async fn fetch_metadata(&self) -> Result<Metadata, Error> {
        let request = ApiRequest::metadata();
        let resp = self.send(&request, None).await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                path: request.route.to_string(),
            });
        }

        let cookie = cookie_header(resp.headers());
        let page = resp.text().await.map_err(Error::Transport)?;
        let api_version = extract_version(&page).ok_or(Error::MissingVersion)?;
        debug!(%api_version, "fetched login metadata");

        Ok(Metadata {
            cookie: SecretString::from(cookie),
            api_version,
        })
    }

    /// Post credentials and return the session cookie.
    ///
    /// `POST /User/Login?ReturnUrl=%2f`. Anything but a 302 with cookies is
    /// a credential failure; nothing partial is ever returned.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
        metadata: &Metadata,
    ) -> Result<SecretString, Error> {
        let request = ApiRequest::login(email, password);
        let resp = self
            .send(&request, Some(metadata.cookie.expose_secret()))
            .await?;

        let status = resp.status();
        if status != StatusCode::FOUND {
            return Err(Error::InvalidCredentials {
                status: status.as_u16(),
            });
        }

        let issued = cookie_header(resp.headers());
        if issued.is_empty() {
            return Err(Error::InvalidCredentials {
                status: status.as_u16(),
            });
        }

        Ok(SecretString::from(merge_cookies(
            metadata.cookie.expose_secret(),
            &issued,
        )))
    }
}

/// Pull the version out of `.../Scripts/main.js?<version>"`.
pub fn extract_version(page: &str) -> Option<String> {
    let (_, rest) = page.split_once("main.js?")?;
    let version = rest.split(['"', '\'', '&', '>']).next()?.trim();
    (!version.is_empty()).then(|| version.to_owned())
}

/// Fold every `Set-Cookie` header into one `Cookie` header value.
fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Browser-style merge: cookies in `update` replace same-named ones in `base`.
fn merge_cookies(base: &str, update: &str) -> String {
    let name = |pair: &str| pair.split('=').next().unwrap_or_default().trim().to_owned();
    let updated: Vec<String> = update.split("; ").map(name).collect();

    base.split("; ")
        .filter(|pair| !pair.is_empty() && !updated.contains(&name(*pair)))
        .chain(update.split("; "))
        .collect::<Vec<_>>()
        .join("; ")
}
