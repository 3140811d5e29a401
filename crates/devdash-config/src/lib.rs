//! Configuration for devdash.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `devdash_core::AppConfig`. The CLI layers its global
//! flag overrides on top.

use std::collections::BTreeMap;
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

use devdash_core::{AppConfig, Credentials, DeviceSourceConfig, LogoutPolicy, TlsVerification};

/// Service name used for keyring entries.
pub const KEYRING_SERVICE: &str = "devdash";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "DEVDASH_CONFIG";
pub const PASSWORD_ENV: &str = "DEVDASH_PASSWORD";
pub const EMAIL_ENV: &str = "DEVDASH_EMAIL";

const ENV_PREFIX: &str = "DEVDASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use when none is given explicitly.
    pub fn default_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named auth-service profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Auth service base URL (e.g., "https://dash.example.com").
    pub server: String,

    /// Login email for one-shot sessions.
    pub email: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,

    /// Device data file; the bundled sample data is used when unset.
    pub devices_file: Option<PathBuf>,

    pub logout_policy: Option<LogoutPolicy>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `DEVDASH_CONFIG`, then XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "devdash", "devdash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("devdash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, then apply `DEVDASH_*` overrides. Nested keys use a
/// double underscore: `DEVDASH_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__").only(&[
            "default_profile",
            "defaults.output",
            "defaults.color",
            "defaults.insecure",
            "defaults.timeout",
        ]));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

/// Resolve a profile's password.
///
/// Order: the profile's `password_env` variable, `DEVDASH_PASSWORD`, the
/// system keyring, then plaintext in the config.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(val));
    }

    if let Ok(pw) = keyring_entry(profile_name).and_then(|e| e.get_password().map_err(ConfigError::from)) {
        return Some(SecretString::from(pw));
    }

    profile.password.clone().map(SecretString::from)
}

/// Resolve email + password for a one-shot login.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var(EMAIL_ENV).ok())
        .ok_or_else(no_credentials)?;
    let password = resolve_password(profile, profile_name).ok_or_else(no_credentials)?;

    Ok(Credentials { email, password })
}

/// Parse and validate a server URL.
pub fn parse_server_url(server: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("expected an http(s) URL, got '{server}'"),
        });
    }
    Ok(url)
}

/// Build an `AppConfig` from a profile, with no flag overrides.
///
/// `insecure` and `timeout` fall back to `[defaults]` when the profile
/// leaves them unset. Credentials are attached when they resolve; a profile
/// without them still yields a usable config for commands that don't log in.
pub fn profile_to_app_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::new(parse_server_url(&profile.server)?);

    config.credentials = resolve_credentials(profile, profile_name).ok();
    config.tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.logout_policy = profile.logout_policy.unwrap_or_default();
    config.devices = profile
        .devices_file
        .clone()
        .map_or(DeviceSourceConfig::Bundled, DeviceSourceConfig::File);

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn profile() -> Profile {
        Profile {
            server: "https://dash.example.com".into(),
            email: Some("ops@example.com".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile_name(), "default");
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.default_profile = Some("lab".into());
        let mut lab = profile();
        lab.logout_policy = Some(LogoutPolicy::AlwaysClear);
        lab.devices_file = Some(PathBuf::from("/srv/devices.json"));
        cfg.profiles.insert("lab".into(), lab);

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.default_profile_name(), "lab");
        let lab = loaded.profile("lab").unwrap();
        assert_eq!(lab.server, "https://dash.example.com");
        assert_eq!(lab.logout_policy, Some(LogoutPolicy::AlwaysClear));
        assert_eq!(lab.devices_file, Some(PathBuf::from("/srv/devices.json")));
    }

    #[test]
    fn logout_policy_is_kebab_case_in_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[profiles.home]\nserver = \"http://localhost:3000\"\nlogout_policy = \"always-clear\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(
            cfg.profile("home").unwrap().logout_policy,
            Some(LogoutPolicy::AlwaysClear)
        );
    }

    #[test]
    fn profile_env_var_wins_over_plaintext() {
        let mut p = profile();
        p.password = Some("plaintext".into());
        p.password_env = Some("PATH".into());

        let resolved = resolve_password(&p, "test-profile-env").unwrap();
        assert_eq!(resolved.expose_secret(), std::env::var("PATH").unwrap());
    }

    #[test]
    fn credentials_need_an_email() {
        let mut p = profile();
        p.email = None;
        p.password = Some("pw".into());
        if std::env::var(EMAIL_ENV).is_err() {
            assert!(matches!(
                resolve_credentials(&p, "test-no-email"),
                Err(ConfigError::NoCredentials { .. })
            ));
        }
    }

    #[test]
    fn app_config_from_profile() {
        let mut p = profile();
        p.ca_cert = Some(PathBuf::from("/etc/devdash/ca.pem"));
        p.timeout = Some(5);

        let cfg = profile_to_app_config(&p, "test-app-config", &Defaults::default()).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://dash.example.com/");
        assert_eq!(
            cfg.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/devdash/ca.pem"))
        );
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.logout_policy, LogoutPolicy::PreserveOnRejection);
        assert_eq!(cfg.devices, DeviceSourceConfig::Bundled);
    }

    #[test]
    fn insecure_overrides_custom_ca() {
        let mut p = profile();
        p.insecure = Some(true);
        p.ca_cert = Some(PathBuf::from("/etc/devdash/ca.pem"));

        let cfg = profile_to_app_config(&p, "test-insecure", &Defaults::default()).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn unset_profile_fields_fall_back_to_defaults() {
        let defaults = Defaults {
            insecure: true,
            timeout: 90,
            ..Defaults::default()
        };

        let cfg = profile_to_app_config(&profile(), "test-defaults", &defaults).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(90));

        let mut p = profile();
        p.insecure = Some(false);
        p.timeout = Some(10);
        let cfg = profile_to_app_config(&p, "test-defaults", &defaults).unwrap();
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn defaults_table_loads_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\ntimeout = 12\ninsecure = true\n\n[profiles.home]\nserver = \"http://localhost:3000\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        let app = profile_to_app_config(cfg.profile("home").unwrap(), "home", &cfg.defaults).unwrap();
        assert_eq!(app.timeout, Duration::from_secs(12));
        assert_eq!(app.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn rejects_non_http_server() {
        assert!(matches!(
            parse_server_url("ftp://dash.example.com"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(parse_server_url("not a url").is_err());
    }
}
