// ── Results of auth service calls ──
//
// Every auth operation resolves to one of these. Transport failures are
// folded in as failures carrying `NETWORK_ERROR`, never as `Err`.

use secrecy::SecretString;
use serde::Serialize;

use crate::model::User;

/// Message attached to every result that failed before the service answered.
pub const NETWORK_ERROR: &str = "network error";
pub const ACCESS_GRANTED: &str = "access granted";
pub const ACCESS_DENIED: &str = "access denied";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginOutcome {
    Success { user: User },
    /// `error` is whatever the service said, or [`NETWORK_ERROR`].
    Failure { error: Option<String> },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => error.as_deref(),
        }
    }

    pub(crate) fn network_error() -> Self {
        Self::Failure {
            error: Some(NETWORK_ERROR.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogoutOutcome {
    Success,
    Failure { error: Option<String> },
}

impl LogoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => error.as_deref(),
        }
    }

    pub(crate) fn network_error() -> Self {
        Self::Failure {
            error: Some(NETWORK_ERROR.to_owned()),
        }
    }
}

/// Result of a group passphrase check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCheck {
    /// The service answered with a success status.
    pub success: bool,
    pub message: String,
    /// Whether the group exists, when the service says so.
    pub exists: Option<bool>,
    /// Whether the passphrase matched, when the service says so.
    pub valid_password: Option<bool>,
}

impl GroupCheck {
    pub(crate) fn network_error() -> Self {
        Self {
            success: false,
            message: NETWORK_ERROR.to_owned(),
            exists: None,
            valid_password: None,
        }
    }

    /// The group exists and the passphrase matched.
    pub fn grants_access(&self) -> bool {
        self.exists == Some(true) && self.valid_password == Some(true)
    }
}

/// Result of generating a group passphrase.
#[derive(Debug, Clone)]
pub struct GeneratedPassword {
    pub success: bool,
    pub password: Option<SecretString>,
    pub message: Option<String>,
}

impl GeneratedPassword {
    pub(crate) fn network_error() -> Self {
        Self {
            success: false,
            password: None,
            message: Some(NETWORK_ERROR.to_owned()),
        }
    }
}
