//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use devdash_core::{AccessDecision, App};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for a secret without echo, rejecting empty input.
pub fn prompt_secret(prompt: &str, field: &str) -> Result<SecretString, CliError> {
    let value = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    if value.is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "value cannot be empty".into(),
        });
    }
    Ok(SecretString::from(value))
}

/// Await `fut` behind a stderr spinner when attached to a terminal.
pub async fn with_spinner<F, T>(global: &GlobalOpts, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    if global.quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

/// Turn a non-granted access decision into the matching CLI error.
pub fn decision_to_result(app: &App, decision: AccessDecision) -> Result<(), CliError> {
    match decision {
        AccessDecision::Granted => Ok(()),
        AccessDecision::Redirect { to } => Err(CliError::NotAuthenticated {
            login_url: to
                .url(&app.config().base_url)
                .map_or_else(|_| to.path().to_owned(), |u| u.to_string()),
        }),
        AccessDecision::Denied { reason } => Err(CliError::AccessDenied {
            reason: reason.to_string(),
        }),
    }
}

/// Error for a failed service check: unreachable service or refusal.
pub fn refusal(app: &App, message: String) -> CliError {
    if message == devdash_core::auth::NETWORK_ERROR {
        CliError::ConnectionFailed {
            url: app.config().base_url.to_string(),
            source: message.into(),
        }
    } else {
        CliError::AccessDenied { reason: message }
    }
}
