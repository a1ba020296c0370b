//! Shared configuration for Sector Alarm tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `sectoralarm_core::{SiteConfig, Settings}`. The CLI layers its flag
//! overrides on top through [`Overrides`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use sectoralarm_core::{Settings, SiteConfig};

/// Environment variable consulted for the password when a profile names none.
pub const PASSWORD_ENV: &str = "SECTORALARM_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named site profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// `table` or `json`.
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_retries")]
    pub number_of_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay_in_ms: u64,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            number_of_retries: default_retries(),
            retry_delay_in_ms: default_retry_delay(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_retries() -> u32 {
    Settings::default().number_of_retries
}
fn default_retry_delay() -> u64 {
    Settings::default().retry_delay_in_ms
}
fn default_timeout() -> u64 {
    30
}

/// A named site profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Account e-mail used to log in.
    pub email: Option<String>,

    /// Password (plaintext -- prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Panel identifier.
    pub site_id: Option<String>,

    /// Override the vendor host (proxies, test servers).
    pub base_url: Option<String>,

    pub number_of_retries: Option<u32>,
    pub retry_delay_in_ms: Option<u64>,
    pub timeout: Option<u64>,
}

/// Values given on the command line; each one wins over the profile.
#[derive(Debug, Default)]
pub struct Overrides {
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub site_id: Option<String>,
    pub number_of_retries: Option<u32>,
    pub retry_delay_in_ms: Option<u64>,
    pub json_output: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "sectoralarm", "sectoralarm").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("sectoralarm");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` + environment. A missing file yields defaults.
///
/// Nested keys come from the environment with `__` as separator, e.g.
/// `SECTORALARM_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SECTORALARM_").split("__"))
        .extract()?;
    Ok(config)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the password: `password_env`, then `SECTORALARM_PASSWORD`,
/// then plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_password_with(profile, profile_name, |name| std::env::var(name).ok())
}

fn resolve_password_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    profile
        .password_env
        .as_deref()
        .and_then(&env)
        .or_else(|| env(PASSWORD_ENV))
        .or_else(|| profile.password.clone())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Build the core configuration for a profile, applying `overrides`.
///
/// `name` defaults to the config's `default_profile`. A profile that does
/// not exist is only an error when the overrides cannot stand in for it.
pub fn resolve_profile(
    config: &Config,
    name: Option<&str>,
    overrides: Overrides,
) -> Result<(SiteConfig, Settings), ConfigError> {
    resolve_profile_with(config, name, overrides, |var| std::env::var(var).ok())
}

fn resolve_profile_with(
    config: &Config,
    name: Option<&str>,
    overrides: Overrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(SiteConfig, Settings), ConfigError> {
    let profile_name = name
        .or(config.default_profile.as_deref())
        .unwrap_or("default");

    let fallback = Profile::default();
    let profile = match config.profiles.get(profile_name) {
        Some(profile) => profile,
        None if overrides.email.is_some() && overrides.site_id.is_some() => &fallback,
        None => {
            return Err(ConfigError::ProfileNotFound {
                name: profile_name.into(),
            });
        }
    };

    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let email = overrides
        .email
        .or_else(|| profile.email.clone())
        .ok_or_else(no_credentials)?;
    let password = match overrides.password {
        Some(password) => password,
        None => resolve_password_with(profile, profile_name, env)?,
    };
    let site_id = overrides
        .site_id
        .or_else(|| profile.site_id.clone())
        .ok_or_else(|| ConfigError::Validation {
            field: "site_id".into(),
            reason: format!("no site id for profile '{profile_name}'"),
        })?;

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout));
    let mut site = SiteConfig::new(email, password, site_id).with_timeout(timeout);
    if let Some(ref raw) = profile.base_url {
        let base_url: Url = raw.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        site = site.with_base_url(base_url);
    }

    let settings = Settings {
        number_of_retries: overrides
            .number_of_retries
            .or(profile.number_of_retries)
            .unwrap_or(config.defaults.number_of_retries),
        retry_delay_in_ms: overrides
            .retry_delay_in_ms
            .or(profile.retry_delay_in_ms)
            .unwrap_or(config.defaults.retry_delay_in_ms),
        json_output: overrides
            .json_output
            .unwrap_or(config.defaults.output == "json"),
    };

    Ok((site, settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    const SAMPLE: &str = r#"
default_profile = "home"

[defaults]
output = "json"
number_of_retries = 5
timeout = 10

[profiles.home]
email = "user@example.com"
password = "plaintext"
site_id = "1000"

[profiles.cabin]
email = "cabin@example.com"
password_env = "CABIN_PW"
site_id = "2000"
base_url = "http://127.0.0.1:8080"
retry_delay_in_ms = 250
"#;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.defaults.number_of_retries, 3);
        assert_eq!(config.defaults.retry_delay_in_ms, 3000);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn default_profile_resolves_with_file_defaults() {
        let file = write_config(SAMPLE);
        let config = load_config_from(file.path()).unwrap();

        let (site, settings) =
            resolve_profile_with(&config, None, Overrides::default(), no_env).unwrap();

        assert_eq!(site.email, "user@example.com");
        assert_eq!(site.password.expose_secret(), "plaintext");
        assert_eq!(site.site_id, "1000");
        assert_eq!(site.base_url.as_str(), "https://mypagesapi.sectoralarm.net/");
        assert_eq!(site.timeout, Duration::from_secs(10));
        assert_eq!(
            settings,
            Settings {
                number_of_retries: 5,
                retry_delay_in_ms: 3000,
                json_output: true,
            }
        );
    }

    #[test]
    fn named_profile_reads_password_from_env() {
        let file = write_config(SAMPLE);
        let config = load_config_from(file.path()).unwrap();
        let env = |name: &str| (name == "CABIN_PW").then(|| "from-env".to_string());

        let (site, settings) =
            resolve_profile_with(&config, Some("cabin"), Overrides::default(), env).unwrap();

        assert_eq!(site.password.expose_secret(), "from-env");
        assert_eq!(site.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(settings.retry_delay_in_ms, 250);
    }

    #[test]
    fn overrides_win_over_profile() {
        let file = write_config(SAMPLE);
        let config = load_config_from(file.path()).unwrap();
        let overrides = Overrides {
            site_id: Some("3000".into()),
            password: Some(SecretString::from("flag".to_string())),
            number_of_retries: Some(0),
            json_output: Some(false),
            ..Overrides::default()
        };

        let (site, settings) =
            resolve_profile_with(&config, Some("home"), overrides, no_env).unwrap();

        assert_eq!(site.site_id, "3000");
        assert_eq!(site.password.expose_secret(), "flag");
        assert_eq!(settings.number_of_retries, 0);
        assert!(!settings.json_output);
    }

    #[test]
    fn overrides_alone_need_no_profile() {
        let overrides = Overrides {
            email: Some("a@b.c".into()),
            site_id: Some("1".into()),
            password: Some(SecretString::from("pw".to_string())),
            ..Overrides::default()
        };

        let (site, settings) =
            resolve_profile_with(&Config::default(), None, overrides, no_env).unwrap();

        assert_eq!(site.email, "a@b.c");
        assert_eq!(settings, Settings { json_output: false, ..Settings::default() });
    }

    #[test]
    fn unknown_profile_is_reported() {
        let err = resolve_profile_with(&Config::default(), Some("nope"), Overrides::default(), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { ref name } if name == "nope"));
    }

    #[test]
    fn profile_without_password_has_no_credentials() {
        let file = write_config(
            "[profiles.default]\nemail = \"a@b.c\"\nsite_id = \"1\"\n",
        );
        let config = load_config_from(file.path()).unwrap();

        let err = resolve_profile_with(&config, None, Overrides::default(), no_env).unwrap_err();

        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "default"));
    }

    #[test]
    fn bad_base_url_is_a_validation_error() {
        let file = write_config(
            "[profiles.default]\nemail = \"a@b.c\"\npassword = \"x\"\nsite_id = \"1\"\nbase_url = \"not a url\"\n",
        );
        let config = load_config_from(file.path()).unwrap();

        let err = resolve_profile_with(&config, None, Overrides::default(), no_env).unwrap_err();

        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }
}
