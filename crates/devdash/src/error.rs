//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use devdash_config::ConfigError;
use devdash_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to auth service at {url}")]
    #[diagnostic(
        code(devdash::connection_failed),
        help(
            "Check that the auth service is running and reachable.\n\
             URL: {url}\n\
             Try: devdash session status --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP client setup failed: {reason}")]
    #[diagnostic(
        code(devdash::tls_error),
        help(
            "If the service uses a self-signed certificate, use --insecure (-k)\n\
             or set ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login rejected: {message}")]
    #[diagnostic(
        code(devdash::auth_failed),
        help(
            "Verify the email and password for profile '{profile}'.\n\
             Store a new password with: devdash config set-password"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(devdash::not_authenticated),
        help("Log in at {login_url}\nor configure credentials with: devdash config init")
    )]
    NotAuthenticated { login_url: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(devdash::no_credentials),
        help(
            "Configure credentials with: devdash config init\n\
             Or set DEVDASH_EMAIL and DEVDASH_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Access denied: {reason}")]
    #[diagnostic(code(devdash::access_denied))]
    AccessDenied { reason: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(devdash::not_found),
        help("Run: devdash {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Cannot load device data from {origin}: {reason}")]
    #[diagnostic(
        code(devdash::device_data),
        help("Check devices_file in your profile; it must be JSON with an \"items\" list.")
    )]
    DeviceData { origin: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(devdash::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(devdash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(devdash::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: devdash config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No auth service configured")]
    #[diagnostic(
        code(devdash::no_config),
        help(
            "Create a config with: devdash config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(devdash::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(devdash::json))]
    Json(#[from] serde_json::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(devdash::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotAuthenticated { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::AccessDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ClientSetup { reason } => CliError::TlsError { reason },

            CoreError::LoginRejected { message } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },

            CoreError::DeviceNotFound { id } => CliError::NotFound {
                resource_type: "device".into(),
                identifier: id,
                list_command: "devices list".into(),
            },

            CoreError::DeviceSource { origin, reason } => CliError::DeviceData { origin, reason },
        }
    }
}
