// Group endpoints
//
// Passphrase checks and (admin-only) passphrase generation. Both report
// success through the HTTP status and carry a JSON body either way.

use secrecy::{ExposeSecret, SecretString};

use crate::client::{AuthApiClient, Reply};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{GeneratePasswordResponse, GroupCheckRequest, GroupCheckResponse, GroupRequest};

impl AuthApiClient {
    /// Check a group passphrase for the current user.
    pub async fn check_group(
        &self,
        group_name: &str,
        password_phrase: &SecretString,
    ) -> Result<Reply<GroupCheckResponse>, Error> {
        let body = GroupCheckRequest {
            group_name,
            password_phrase: password_phrase.expose_secret(),
        };
        self.send_json(Endpoint::CheckGroup, Some(&body)).await
    }

    /// Generate a fresh passphrase for a group. The service refuses this
    /// for non-admin sessions with a non-success status.
    pub async fn generate_password(
        &self,
        group_name: &str,
    ) -> Result<Reply<GeneratePasswordResponse>, Error> {
        let body = GroupRequest { group_name };
        self.send_json(Endpoint::GeneratePassword, Some(&body)).await
    }
}
