// ── Auth client ──
//
// The session state machine. Each operation is one round trip to the auth
// service, never retried, and never returns `Err`: transport and decoding
// failures collapse into a logged-out session or a failed result.

mod access;
mod outcome;

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use devdash_api::AuthApiClient;

use crate::config::LogoutPolicy;
use crate::model::User;
use crate::model::user::ADMIN_ROLE;
use crate::session::SessionStore;

pub use access::{AccessDecision, AccessDenied};
pub use outcome::{
    ACCESS_DENIED, ACCESS_GRANTED, GeneratedPassword, GroupCheck, LoginOutcome, LogoutOutcome,
    NETWORK_ERROR,
};

/// Issues session and group calls and keeps the [`SessionStore`] in step.
pub struct AuthClient {
    api: AuthApiClient,
    session: Arc<SessionStore>,
    logout_policy: LogoutPolicy,
}

impl AuthClient {
    pub fn new(api: AuthApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            logout_policy: LogoutPolicy::default(),
        }
    }

    pub fn with_logout_policy(mut self, policy: LogoutPolicy) -> Self {
        self.logout_policy = policy;
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> &AuthApiClient {
        &self.api
    }

    // ── Session calls ────────────────────────────────────────────────

    /// Ask the service who we are and record the answer.
    ///
    /// Returns the user when the session is live. Any failure (error status,
    /// "not authenticated", undecodable body, unreachable service) clears
    /// the session and returns `None`.
    pub async fn check_session(&self) -> Option<User> {
        let _loading = self.session.begin_loading();

        match self.api.check_auth().await {
            Ok(resp) if resp.authenticated => {
                let user = resp.user.map(User::from).unwrap_or_default();
                debug!(role = ?user.role, "session is live");
                self.session.set_authenticated(user.clone());
                Some(user)
            }
            Ok(_) => {
                debug!("service reports no session");
                self.session.clear();
                None
            }
            Err(e) if e.is_unauthorized() => {
                debug!(error = %e, "session cookie rejected");
                self.session.clear();
                None
            }
            Err(e) => {
                warn!(error = %e, "session check failed");
                self.session.clear();
                None
            }
        }
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> LoginOutcome {
        let _loading = self.session.begin_loading();

        match self.api.login(email, password).await {
            Ok(resp) if resp.success => {
                let user = resp.user.map(User::from).unwrap_or_default();
                info!(email, role = ?user.role, "logged in");
                self.session.set_authenticated(user.clone());
                LoginOutcome::Success { user }
            }
            Ok(resp) => {
                info!(email, error = ?resp.error, "login rejected");
                self.session.clear();
                LoginOutcome::Failure { error: resp.error }
            }
            Err(e) => {
                warn!(error = %e, "login request failed");
                self.session.clear();
                LoginOutcome::network_error()
            }
        }
    }

    /// End the session.
    ///
    /// A rejection from the service leaves local state alone under
    /// [`LogoutPolicy::PreserveOnRejection`]. A transport failure always
    /// clears it.
    pub async fn logout(&self) -> LogoutOutcome {
        let _loading = self.session.begin_loading();

        match self.api.logout().await {
            Ok(resp) if resp.success => {
                info!("logged out");
                self.session.clear();
                LogoutOutcome::Success
            }
            Ok(resp) => {
                warn!(error = ?resp.error, "logout rejected");
                if self.logout_policy == LogoutPolicy::AlwaysClear {
                    self.session.clear();
                }
                LogoutOutcome::Failure { error: resp.error }
            }
            Err(e) => {
                warn!(error = %e, "logout request failed, clearing local session");
                self.session.clear();
                LogoutOutcome::network_error()
            }
        }
    }

    /// Probe the auth service's dashboard page. Does not touch the session.
    pub async fn check_auth_status(&self) -> bool {
        match self.api.probe_dashboard().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!(error = %e, "dashboard probe failed");
                false
            }
        }
    }

    // ── Group calls ──────────────────────────────────────────────────

    /// Check a group passphrase. Does not touch the session.
    pub async fn check_group_password(&self, group: &str, password: &SecretString) -> GroupCheck {
        match self.api.check_group(group, password).await {
            Ok(reply) => {
                let success = reply.is_success();
                let fallback = if success { ACCESS_GRANTED } else { ACCESS_DENIED };
                GroupCheck {
                    success,
                    message: reply
                        .body
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| fallback.to_owned()),
                    exists: reply.body.exists,
                    valid_password: reply.body.valid_password,
                }
            }
            Err(e) => {
                warn!(group, error = %e, "group check failed");
                GroupCheck::network_error()
            }
        }
    }

    /// Generate a new passphrase for a group (admin only, enforced by the
    /// service). Does not touch the session.
    pub async fn generate_group_password(&self, group: &str) -> GeneratedPassword {
        match self.api.generate_password(group).await {
            Ok(reply) => GeneratedPassword {
                success: reply.is_success(),
                password: reply.body.password.map(SecretString::from),
                message: reply.body.message,
            },
            Err(e) => {
                warn!(group, error = %e, "password generation failed");
                GeneratedPassword::network_error()
            }
        }
    }

    // ── Predicates ───────────────────────────────────────────────────

    pub fn has_role(&self, role: &str) -> bool {
        self.session.has_role(role)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.session.has_group(name)
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    // ── Access decisions ─────────────────────────────────────────────

    /// Logged in at all. Reads local state only.
    pub fn require_auth(&self) -> AccessDecision {
        if self.session.authenticated() {
            AccessDecision::Granted
        } else {
            AccessDecision::login()
        }
    }

    /// Logged in as an administrator. Reads local state only.
    pub fn require_admin(&self) -> AccessDecision {
        self.require_role(ADMIN_ROLE)
    }

    pub fn require_role(&self, role: &str) -> AccessDecision {
        if !self.session.authenticated() {
            return AccessDecision::login();
        }
        if !self.has_role(role) {
            return AccessDecision::Denied {
                reason: AccessDenied::InsufficientRole {
                    required: role.to_owned(),
                },
            };
        }
        AccessDecision::Granted
    }

    /// Logged in and holding a valid passphrase for `group`.
    ///
    /// Without a passphrase the service is asked with an empty one, which
    /// only passes for groups that have none set.
    pub async fn require_group(
        &self,
        group: &str,
        passphrase: Option<&SecretString>,
    ) -> AccessDecision {
        if !self.session.authenticated() {
            return AccessDecision::login();
        }

        let empty = SecretString::from(String::new());
        let reply = match self
            .api
            .check_group(group, passphrase.unwrap_or(&empty))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(group, error = %e, "group access check failed");
                return AccessDecision::Denied {
                    reason: AccessDenied::GroupCheckFailed {
                        group: group.to_owned(),
                    },
                };
            }
        };

        if reply.body.exists == Some(true) && reply.body.valid_password == Some(true) {
            AccessDecision::Granted
        } else {
            debug!(group, status = %reply.status, "group access refused");
            AccessDecision::Denied {
                reason: AccessDenied::GroupRequired {
                    group: group.to_owned(),
                },
            }
        }
    }
}
