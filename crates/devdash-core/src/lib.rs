//! Session state, access checks, and the device store behind the devdash
//! dashboard.
//!
//! - **[`App`]**: one dashboard instance. Builds the HTTP client from an
//!   [`AppConfig`], owns the [`AuthClient`] and [`DeviceStore`], and routes
//!   navigation through the [`RouteGuard`]. [`App::oneshot()`] logs in,
//!   runs a closure, and drops everything, which is what CLI commands use.
//!
//! - **[`SessionStore`]**: the observable session (`authenticated`, `user`,
//!   `loading`) built on `tokio::sync::watch`. Only the auth client writes
//!   to it; anyone can [`subscribe()`](SessionStore::subscribe) for a
//!   [`SessionWatch`].
//!
//! - **[`AuthClient`]**: login, logout, session checks, group passphrase
//!   checks. Never fails with `Err`: network trouble degrades to a
//!   logged-out session or a failed outcome. Access checks
//!   (`require_auth`, `require_admin`, `require_role`, `require_group`)
//!   return an [`AccessDecision`] instead of redirecting.
//!
//! - **[`DeviceStore`]**: the normalized device list with tag selection and
//!   free-text search, recomputed on every read.

pub mod app;
pub mod auth;
pub mod config;
pub mod device;
pub mod error;
pub mod model;
pub mod router;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use app::App;
pub use auth::{
    AccessDecision, AccessDenied, AuthClient, GeneratedPassword, GroupCheck, LoginOutcome,
    LogoutOutcome,
};
pub use config::{AppConfig, Credentials, DeviceSourceConfig, LogoutPolicy, TlsVerification};
pub use device::{DeviceFilter, DeviceSource, DeviceStore};
pub use error::CoreError;
pub use model::{Device, Group, RawDevice, SimCard, User};
pub use router::{ExternalRoute, Navigation, Route, RouteGuard, Router};
pub use session::{Session, SessionStore, SessionWatch};
