// ── Runtime configuration ──
//
// These types describe *how* to reach the auth service and where device
// data comes from. They carry credential data and connection tuning, but
// never touch disk. The CLI constructs an `AppConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Login credentials for unattended sessions (CLI one-shot mode).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// What `logout` does to local state when the service answers
/// `{success: false}`.
///
/// A transport failure always clears local state; this only governs the
/// case where the service is reachable and refuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoutPolicy {
    /// Keep the session as it was. The service still considers us logged
    /// in, so the local view stays in step with it.
    #[default]
    PreserveOnRejection,
    /// Always drop the local session once logout was requested.
    AlwaysClear,
}

/// Where the device list is loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeviceSourceConfig {
    /// The sample data compiled into the binary.
    #[default]
    Bundled,
    /// A JSON document with a top-level `items` list.
    File(PathBuf),
}

/// Configuration for one dashboard instance.
///
/// Built by the CLI, passed to [`App`](crate::App) -- core never reads
/// config files.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Auth service root (e.g. `https://dash.example.com`).
    pub base_url: Url,
    /// Credentials for one-shot sessions. `None` means the caller logs in
    /// explicitly.
    pub credentials: Option<Credentials>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    pub logout_policy: LogoutPolicy,
    pub devices: DeviceSourceConfig,
}

impl AppConfig {
    /// A config with defaults for everything but the service URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            credentials: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            logout_policy: LogoutPolicy::default(),
            devices: DeviceSourceConfig::default(),
        }
    }
}
