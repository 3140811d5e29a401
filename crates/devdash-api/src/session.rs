// Session endpoints
//
// Cookie-based check/login/logout. The login endpoint sets a session
// cookie in the client's jar; every later request presents it.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::{AuthApiClient, Reply, decode};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{CheckAuthResponse, LoginRequest, LoginResponse, LogoutResponse};

impl AuthApiClient {
    /// Ask the service whether the current cookie belongs to a live session.
    ///
    /// A non-success status is an error here: only a 2xx body is trusted
    /// to say anything about the session.
    pub async fn check_auth(&self) -> Result<CheckAuthResponse, Error> {
        let reply = self.send_text(Endpoint::CheckAuth, None::<&()>).await?;
        if !reply.is_success() {
            return Err(Error::Http {
                status: reply.status.as_u16(),
                body: reply.body,
            });
        }
        decode(&reply.body)
    }

    /// Submit credentials.
    ///
    /// The body is decoded whatever the status; the service reports
    /// rejection as `{success: false, error}`.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        debug!(email, "logging in");
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let reply: Reply<LoginResponse> = self.send_json(Endpoint::Login, Some(&body)).await?;
        debug!(status = %reply.status, success = reply.body.success, "login answered");
        Ok(reply.body)
    }

    /// End the current session on the service side.
    pub async fn logout(&self) -> Result<LogoutResponse, Error> {
        let reply: Reply<LogoutResponse> =
            self.send_json(Endpoint::Logout, None::<&()>).await?;
        debug!(status = %reply.status, success = reply.body.success, "logout answered");
        Ok(reply.body)
    }

    /// Probe the rendered dashboard page. HTTP 200 means the cookie is
    /// accepted; anything else (redirect to login included) means it isn't.
    pub async fn probe_dashboard(&self) -> Result<bool, Error> {
        let status = self.send_status(Endpoint::Dashboard).await?;
        Ok(status == reqwest::StatusCode::OK)
    }
}
