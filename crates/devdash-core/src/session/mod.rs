// ── Session store ──
//
// Process-wide view of "who is logged in". One `SessionStore` is built at
// startup and shared behind an `Arc`; only the auth client mutates it.
// State is published through a `watch` channel so consumers can take a
// snapshot or wait for the next change.

mod stream;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::trace;

use crate::model::User;

pub use stream::{SessionWatch, SessionWatchStream};

/// The client's belief about the current session.
///
/// `user` is `Some` exactly when `authenticated` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
}

impl Session {
    pub fn has_role(&self, role: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_group(name))
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Shared session state, mutated only through [`AuthClient`](crate::AuthClient).
pub struct SessionStore {
    state: watch::Sender<Session>,
    /// Calls currently holding a [`LoadingGuard`].
    in_flight: AtomicUsize,
    /// Bumped on every change to `authenticated` / `user`.
    version: AtomicU64,
    last_checked: watch::Sender<Option<DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Session::default());
        let (last_checked, _) = watch::channel(None);
        Self {
            state,
            in_flight: AtomicUsize::new(0),
            version: AtomicU64::new(0),
            last_checked,
        }
    }

    // ── Readers ──────────────────────────────────────────────────────

    /// Current state (cheap clone of the latest value).
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.state.borrow().has_role(role)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.state.borrow().has_group(name)
    }

    /// Number of authentication changes since startup.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// When the service last answered a session-affecting call.
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        *self.last_checked.borrow()
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> SessionWatch {
        SessionWatch::new(self.state.subscribe())
    }

    // ── Mutations (auth client only) ─────────────────────────────────

    pub(crate) fn set_authenticated(&self, user: User) {
        self.state.send_modify(|s| {
            s.authenticated = true;
            s.user = Some(user);
        });
        self.touch();
    }

    pub(crate) fn clear(&self) {
        self.state.send_modify(|s| {
            s.authenticated = false;
            s.user = None;
        });
        self.touch();
    }

    /// Mark a call as in flight. `loading` stays true until the last
    /// outstanding guard is dropped.
    pub(crate) fn begin_loading(&self) -> LoadingGuard<'_> {
        self.state.send_modify(|s| {
            self.in_flight.fetch_add(1, Ordering::AcqRel);
            s.loading = true;
        });
        trace!("session loading");
        LoadingGuard { store: self }
    }

    fn touch(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);
        self.last_checked.send_replace(Some(Utc::now()));
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds `loading = true` for as long as it lives.
///
/// Dropped on every return path of an auth call, early returns included.
#[must_use = "loading is released as soon as the guard is dropped"]
pub(crate) struct LoadingGuard<'a> {
    store: &'a SessionStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.state.send_modify(|s| {
            if self.store.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
                s.loading = false;
            }
        });
        trace!("session loading released");
    }
}
