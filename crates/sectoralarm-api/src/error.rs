use thiserror::Error;

/// Top-level error type for the `sectoralarm-api` crate.
///
/// Transport-shaped: it says what happened on the wire. `sectoralarm-core`
/// folds these into the user-facing error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was answered with something other than the expected redirect.
    #[error("Invalid login credentials, or account is locked out (HTTP {status})")]
    InvalidCredentials { status: u16 },

    /// The vendor answered 401 on every attempt.
    #[error("Invalid session after {attempts} attempt(s) -- please re-login")]
    InvalidSession { attempts: u32 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A status code the executor has no rule for.
    #[error("Unexpected HTTP status {status} from {path}")]
    UnexpectedStatus { status: u16, path: String },

    /// The vendor served its HTML error page where JSON was expected.
    #[error("Received an HTML document from {path} where JSON was expected")]
    HtmlResponse { path: String },

    /// The login page did not reference a versioned script bundle.
    #[error("API version reference not found in the login page")]
    MissingVersion,

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl Error {
    /// Returns `true` if no usable response ever reached the executor.
    pub fn is_communication(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::UnexpectedStatus { .. }
                | Self::HtmlResponse { .. }
                | Self::MissingVersion
                | Self::InvalidUrl(_)
                | Self::Client(_)
        )
    }
}
