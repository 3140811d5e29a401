//! CLI configuration: thin wrapper around `devdash_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--server, --email, --insecure, ...).

use devdash_core::{AppConfig, Credentials, DeviceSourceConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use devdash_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// The active profile with flag overrides applied, plus its name.
///
/// Without a stored profile, `--server` alone is enough to run; an
/// explicitly requested profile that doesn't exist is an error.
pub fn resolve_profile(global: &GlobalOpts) -> Result<(Profile, String), CliError> {
    resolve_profile_in(global, &load_config_or_default())
}

fn resolve_profile_in(global: &GlobalOpts, cfg: &Config) -> Result<(Profile, String), CliError> {
    let name = active_profile_name(global, cfg);

    let mut profile = match cfg.profile(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let available: Vec<_> = cfg.profiles.keys().cloned().collect();
            return Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if let Some(ref email) = global.email {
        profile.email = Some(email.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok((profile, name))
}

/// Translate the active profile + global flags into an `AppConfig`.
pub fn resolve_app_config(global: &GlobalOpts) -> Result<(AppConfig, String), CliError> {
    let cfg = load_config_or_default();
    let (profile, name) = resolve_profile_in(global, &cfg)?;

    if profile.server.is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    let config = devdash_config::profile_to_app_config(&profile, &name, &cfg.defaults)?;
    Ok((config, name))
}

/// Like [`resolve_app_config`], but credentials must resolve.
pub fn resolve_app_config_with_credentials(
    global: &GlobalOpts,
) -> Result<(AppConfig, String), CliError> {
    let (config, name) = resolve_app_config(global)?;
    if config.credentials.is_none() {
        return Err(CliError::NoCredentials { profile: name });
    }
    Ok((config, name))
}

/// Where device data comes from for the active profile. Needs no server.
pub fn device_source(global: &GlobalOpts) -> Result<DeviceSourceConfig, CliError> {
    let (profile, _) = resolve_profile(global)?;
    Ok(profile
        .devices_file
        .map_or(DeviceSourceConfig::Bundled, DeviceSourceConfig::File))
}

/// An `AppConfig` without credentials, for interactive login.
pub fn interactive_app_config(
    global: &GlobalOpts,
    email: String,
    password: secrecy::SecretString,
) -> Result<AppConfig, CliError> {
    let (mut config, _) = resolve_app_config(global)?;
    config.credentials = Some(Credentials { email, password });
    Ok(config)
}
