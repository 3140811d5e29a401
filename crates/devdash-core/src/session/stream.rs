// ── Session subscriptions ──

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::Session;

/// A subscription to the session.
///
/// Provides both point-in-time snapshot access and change notification
/// via [`changed()`](Self::changed) or by converting to a `Stream`.
/// Derived values such as `is_admin` are recomputed from each snapshot.
pub struct SessionWatch {
    current: Session,
    receiver: watch::Receiver<Session>,
}

impl SessionWatch {
    pub(crate) fn new(receiver: watch::Receiver<Session>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &Session {
        &self.current
    }

    /// The latest session (may have changed since `current`).
    pub fn latest(&self) -> Session {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new session.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Session> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the current value first, then every change.
    pub fn into_stream(self) -> SessionWatchStream {
        SessionWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct SessionWatchStream {
    inner: WatchStream<Session>,
}

impl Stream for SessionWatchStream {
    type Item = Session;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::SessionStore;
    use crate::model::User;

    #[tokio::test]
    async fn changed_reports_new_session() {
        let store = SessionStore::new();
        let mut watch = store.subscribe();
        assert!(!watch.current().authenticated);

        store.set_authenticated(User {
            role: Some("admin".into()),
            ..User::default()
        });

        let next = watch.changed().await.unwrap();
        assert!(next.authenticated);
        assert!(next.is_admin());
        assert!(watch.current().is_admin());
    }

    #[tokio::test]
    async fn changed_returns_none_after_store_dropped() {
        let store = SessionStore::new();
        let mut watch = store.subscribe();
        drop(store);
        assert!(watch.changed().await.is_none());
    }
}
