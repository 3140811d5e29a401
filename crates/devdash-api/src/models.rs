// Wire types for the auth service.
//
// Every field the service may omit is optional here; `devdash-core`
// applies the defaults. Unknown user fields are kept in `extra` so a
// round trip through the client never drops data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A group membership as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiGroup {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user object embedded in check-auth and login responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub groups: Option<Vec<ApiGroup>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /auth/api/check-auth`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckAuthResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<ApiUser>,
}

/// `POST /api/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/logout`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /auth/api/check-group`
///
/// Success is carried by the HTTP status, not the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupCheckResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub valid_password: Option<bool>,
}

/// `POST /auth/api/generate-password`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratePasswordResponse {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct GroupCheckRequest<'a> {
    pub group_name: &'a str,
    pub password_phrase: &'a str,
}

#[derive(Serialize)]
pub(crate) struct GroupRequest<'a> {
    pub group_name: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_keeps_unknown_fields() {
        let user: ApiUser = serde_json::from_value(json!({
            "role": "admin",
            "groups": [{ "name": "ops", "id": 7 }],
            "email": "root@admin.com",
            "id": 1
        }))
        .unwrap();

        assert_eq!(user.role.as_deref(), Some("admin"));
        let groups = user.groups.unwrap();
        assert_eq!(groups[0].name, "ops");
        assert_eq!(groups[0].extra["id"], json!(7));
        assert_eq!(user.extra["email"], json!("root@admin.com"));
    }

    #[test]
    fn empty_bodies_decode_to_failure_shapes() {
        let check: CheckAuthResponse = serde_json::from_str("{}").unwrap();
        assert!(!check.authenticated);
        assert!(check.user.is_none());

        let login: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(!login.success);
        assert!(login.error.is_none());
    }
}
