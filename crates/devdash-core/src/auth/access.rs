// ── Access decisions ──
//
// Guards decide; callers navigate. A decision names where to go, it never
// goes there itself.

use std::fmt;

use serde::Serialize;

use crate::router::ExternalRoute;

/// Why an authenticated user was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AccessDenied {
    /// The user lacks the required role.
    InsufficientRole { required: String },
    /// The group does not exist or the passphrase did not match.
    GroupRequired { group: String },
    /// The group check itself could not be completed.
    GroupCheckFailed { group: String },
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientRole { required } => {
                write!(f, "insufficient access rights (requires role '{required}')")
            }
            Self::GroupRequired { group } => write!(f, "access to group '{group}' is required"),
            Self::GroupCheckFailed { group } => {
                write!(f, "could not verify access to group '{group}'")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Granted,
    /// Not logged in: send the user to an auth service page.
    Redirect { to: ExternalRoute },
    /// Logged in but not allowed: show a notice, stay put.
    Denied { reason: AccessDenied },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub(crate) fn login() -> Self {
        Self::Redirect {
            to: ExternalRoute::Login,
        }
    }
}
