// ── Core error types ──
//
// User-facing errors from sectoralarm-core. Seven kinds, nothing else:
// callers branch on `kind()` and never see HTTP status codes directly.
// The `From<sectoralarm_api::Error>` impl folds transport-layer errors
// into these kinds.

use std::fmt;

use thiserror::Error;

/// Boxed cause carried by errors that wrap another failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Transport failure, unexpected status, or an HTML page where JSON
    /// was expected.
    #[error("Communication with Sector Alarm failed: {message}")]
    Communication {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Invalid login credentials, or account is locked out")]
    InvalidCredentials {
        #[source]
        source: Option<BoxError>,
    },

    /// Still 401 after every permitted attempt (0 = never logged in).
    #[error("Invalid session after {attempts} attempt(s), please re-login")]
    InvalidSession { attempts: u32 },

    /// Rejected before any network call was made.
    #[error("Invalid command '{command}', expected one of: {allowed}")]
    InvalidCommand { command: String, allowed: String },

    /// The vendor accepted the request but refused the action.
    #[error("Invalid code, the action was rejected (status: {status})")]
    InvalidCode { status: String },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The vendor no longer accepts the API version scraped at login.
    #[error("API version mismatch, log in again to refresh the version")]
    InvalidVersion,
}

/// Discriminant of [`CoreError`], with the stable string codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Communication,
    InvalidCredentials,
    InvalidSession,
    InvalidCommand,
    InvalidCode,
    Parsing,
    InvalidVersion,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Communication => "ERR_COMMUNICATION_ERROR",
            Self::InvalidCredentials => "ERR_INVALID_CREDENTIALS",
            Self::InvalidSession => "ERR_INVALID_SESSION",
            Self::InvalidCommand => "ERR_INVALID_COMMAND",
            Self::InvalidCode => "ERR_INVALID_CODE",
            Self::Parsing => "ERR_PARSING_ERROR",
            Self::InvalidVersion => "ERR_INVALID_VERSION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Communication { .. } => ErrorKind::Communication,
            Self::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Self::InvalidSession { .. } => ErrorKind::InvalidSession,
            Self::InvalidCommand { .. } => ErrorKind::InvalidCommand,
            Self::InvalidCode { .. } => ErrorKind::InvalidCode,
            Self::Parsing { .. } => ErrorKind::Parsing,
            Self::InvalidVersion => ErrorKind::InvalidVersion,
        }
    }

    pub(crate) fn parsing(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sectoralarm_api::Error> for CoreError {
    fn from(err: sectoralarm_api::Error) -> Self {
        match err {
            sectoralarm_api::Error::InvalidSession { attempts } => Self::InvalidSession { attempts },
            sectoralarm_api::Error::InvalidCredentials { .. } => Self::InvalidCredentials {
                source: Some(Box::new(err)),
            },
            other => Self::Communication {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}
