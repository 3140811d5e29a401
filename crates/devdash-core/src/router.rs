// ── Client routes and the navigation guard ──
//
// Three client-side routes, all behind a session check. Pages owned by the
// auth service are `ExternalRoute`s: the dashboard only ever links to them.

use std::fmt;

use serde::Serialize;
use strum::{EnumIter, IntoStaticStr};
use tracing::debug;
use url::Url;

use crate::auth::AuthClient;

/// Pages served by the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExternalRoute {
    Login,
    Logout,
    AdminUsers,
    Dashboard,
    Profile,
}

impl ExternalRoute {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Logout => "/auth/logout",
            Self::AdminUsers => "/auth/admin/users",
            Self::Dashboard => "/auth/dashboard",
            Self::Profile => "/auth/profile",
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Absolute URL of this page on the service at `base`.
    pub fn url(self, base: &Url) -> Result<Url, url::ParseError> {
        let root = base.as_str().trim_end_matches('/');
        Url::parse(&format!("{root}{}", self.path()))
    }
}

/// A resolved client-side route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// `/` -- the device overview.
    Home,
    /// `/device` -- the device overview under its own name.
    Devices,
    /// `/device/:id`
    Device { id: String },
    /// Anything the table doesn't know.
    NotFound { path: String },
}

impl Route {
    /// Route name as the page table knows it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home | Self::Devices => "devices",
            Self::Device { .. } => "device",
            Self::NotFound { .. } => "not_found",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Devices => "/device".into(),
            Self::Device { id } => format!("/device/{id}"),
            Self::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The route table.
pub struct Router;

impl Router {
    /// Match a path against the route table.
    ///
    /// Query strings and fragments are ignored and a trailing slash is
    /// tolerated, so `/device/7/?tab=sim` is the device page for `7`.
    pub fn resolve(path: &str) -> Route {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let mut segments = bare.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Route::Home,
            (Some("device"), None, _) => Route::Devices,
            (Some("device"), Some(id), None) => Route::Device { id: id.to_owned() },
            _ => Route::NotFound {
                path: path.to_owned(),
            },
        }
    }
}

/// Where a navigation attempt ends up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "navigation", rename_all = "snake_case")]
pub enum Navigation {
    Proceed { route: Route },
    Redirect { to: ExternalRoute },
}

/// Runs before every client-side navigation.
pub struct RouteGuard<'a> {
    auth: &'a AuthClient,
}

impl<'a> RouteGuard<'a> {
    pub fn new(auth: &'a AuthClient) -> Self {
        Self { auth }
    }

    /// Re-check the session with the service, then let the navigation
    /// through or send the user to the login page. A failed check counts
    /// as logged out.
    pub async fn before_each(&self, to: Route) -> Navigation {
        if self.auth.check_session().await.is_some() {
            debug!(route = %to, "navigation allowed");
            Navigation::Proceed { route: to }
        } else {
            debug!(route = %to, "not authenticated, redirecting to login");
            Navigation::Redirect {
                to: ExternalRoute::Login,
            }
        }
    }
}
