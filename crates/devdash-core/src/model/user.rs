// ── User domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use devdash_api::{ApiGroup, ApiUser};

/// Role name the service gives administrators.
pub const ADMIN_ROLE: &str = "admin";

/// A named access-control group the user belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

/// The authenticated user as last reported by the service.
///
/// `role` and `groups` are the only fields the dashboard reasons about;
/// everything else the service sends is kept verbatim in `attributes`.
/// A user the service sent without a role matches no role check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// A string attribute such as `email` or `username`, if the service
    /// sent one.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

impl From<ApiGroup> for Group {
    fn from(g: ApiGroup) -> Self {
        Self { name: g.name }
    }
}

impl From<ApiUser> for User {
    fn from(u: ApiUser) -> Self {
        Self {
            role: u.role,
            groups: u
                .groups
                .unwrap_or_default()
                .into_iter()
                .map(Group::from)
                .collect(),
            attributes: u.extra,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_user(v: Value) -> ApiUser {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn converts_role_groups_and_attributes() {
        let user = User::from(api_user(json!({
            "role": "admin",
            "groups": [{ "name": "ops" }, { "name": "noc" }],
            "email": "root@admin.com"
        })));

        assert!(user.is_admin());
        assert!(user.has_group("noc"));
        assert!(!user.has_group("sales"));
        assert_eq!(user.attribute("email"), Some("root@admin.com"));
    }

    #[test]
    fn missing_role_matches_no_role() {
        let user = User::from(api_user(json!({ "email": "x@y.z" })));
        assert_eq!(user.role, None);
        assert!(user.groups.is_empty());
        assert!(!user.has_role("admin"));
        assert!(!user.has_role(""));
    }

    #[test]
    fn explicit_empty_role_is_kept() {
        let user = User::from(api_user(json!({ "role": "" })));
        assert!(user.has_role(""));
        assert!(!user.is_admin());
    }
}
