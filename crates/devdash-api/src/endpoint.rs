/// Every call the client makes against the auth service.
///
/// The service splits its surface across two prefixes: session plumbing
/// and group administration under `/auth/api`, login/logout under `/api`.
/// The dashboard probe hits a rendered page, not the JSON API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /auth/api/check-auth`
    CheckAuth,
    /// `POST /api/login`
    Login,
    /// `POST /api/logout`
    Logout,
    /// `POST /auth/api/check-group`
    CheckGroup,
    /// `POST /auth/api/generate-password` (admin only)
    GeneratePassword,
    /// `GET /auth/dashboard` -- 200 means the cookie is still good.
    Dashboard,
}

impl Endpoint {
    /// Absolute path on the service, rooted at `/`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::CheckAuth => "/auth/api/check-auth",
            Self::Login => "/api/login",
            Self::Logout => "/api/logout",
            Self::CheckGroup => "/auth/api/check-group",
            Self::GeneratePassword => "/auth/api/generate-password",
            Self::Dashboard => "/auth/dashboard",
        }
    }

    pub fn method(&self) -> reqwest::Method {
        match self {
            Self::CheckAuth | Self::Dashboard => reqwest::Method::GET,
            Self::Login | Self::Logout | Self::CheckGroup | Self::GeneratePassword => {
                reqwest::Method::POST
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_calls_live_under_api_prefix() {
        assert_eq!(Endpoint::Login.path(), "/api/login");
        assert_eq!(Endpoint::Logout.path(), "/api/logout");
        assert_eq!(Endpoint::Login.method(), reqwest::Method::POST);
    }

    #[test]
    fn group_calls_live_under_auth_api_prefix() {
        assert!(Endpoint::CheckGroup.path().starts_with("/auth/api/"));
        assert!(Endpoint::GeneratePassword.path().starts_with("/auth/api/"));
        assert_eq!(Endpoint::CheckAuth.method(), reqwest::Method::GET);
    }
}
