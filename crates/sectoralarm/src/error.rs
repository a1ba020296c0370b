//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code per failure class.

use miette::Diagnostic;
use thiserror::Error;

use sectoralarm_config::ConfigError;
use sectoralarm_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not talk to Sector Alarm: {message}")]
    #[diagnostic(
        code(sectoralarm::communication_error),
        help("Check your network connection, or raise the timeout in your profile.")
    )]
    Communication {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("The vendor rejected the API version in use")]
    #[diagnostic(
        code(sectoralarm::invalid_version),
        help("Run the command again; logging in refreshes the version.")
    )]
    InvalidVersion,

    #[error("Unexpected response from Sector Alarm: {message}")]
    #[diagnostic(code(sectoralarm::parsing_error))]
    Parsing { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login failed")]
    #[diagnostic(
        code(sectoralarm::invalid_credentials),
        help("Verify e-mail and password, or wait if the account is temporarily locked.")
    )]
    InvalidCredentials,

    #[error("Session expired after {attempts} attempt(s)")]
    #[diagnostic(
        code(sectoralarm::invalid_session),
        help("Try again, or raise --retries / --retry-delay-ms.")
    )]
    InvalidSession { attempts: u32 },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(sectoralarm::no_credentials),
        help(
            "Set password or password_env in the profile,\n\
             or pass --password / set SECTORALARM_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Commands ─────────────────────────────────────────────────────

    #[error("Invalid command '{command}'")]
    #[diagnostic(code(sectoralarm::invalid_command), help("Expected one of: {allowed}"))]
    InvalidCommand { command: String, allowed: String },

    #[error("The panel rejected the action (status: {status})")]
    #[diagnostic(code(sectoralarm::invalid_code), help("Check the panel code."))]
    InvalidCode { status: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sectoralarm::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sectoralarm::profile_not_found),
        help(
            "Add [profiles.{name}] to {path},\n\
             or pass --email, --password and --site-id."
        )
    )]
    ProfileNotFound { name: String, path: String },

    #[error("Could not load configuration: {0}")]
    #[diagnostic(code(sectoralarm::config))]
    Config(String),

    // ── Runtime ──────────────────────────────────────────────────────

    #[error("Status watcher stopped unexpectedly: {message}")]
    #[diagnostic(code(sectoralarm::watcher))]
    Watcher { message: String },

    #[error("Could not write output")]
    #[diagnostic(code(sectoralarm::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Communication { .. } => exit_code::CONNECTION,
            Self::InvalidCredentials | Self::InvalidSession { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::InvalidCommand { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::InvalidCode { .. } => exit_code::REJECTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Communication { message, source } => Self::Communication { message, source },
            CoreError::InvalidCredentials { .. } => Self::InvalidCredentials,
            CoreError::InvalidSession { attempts } => Self::InvalidSession { attempts },
            CoreError::InvalidCommand { command, allowed } => {
                Self::InvalidCommand { command, allowed }
            }
            CoreError::InvalidCode { status } => Self::InvalidCode { status },
            CoreError::Parsing { message, .. } => Self::Parsing { message },
            CoreError::InvalidVersion => Self::InvalidVersion,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name } => Self::ProfileNotFound {
                name,
                path: sectoralarm_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Config(e.to_string()),
        }
    }
}
