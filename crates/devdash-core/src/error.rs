// ── Core error types ──
//
// User-facing errors from devdash-core. Auth operations never return these:
// they degrade to a logged-out or failed result instead. `CoreError` covers
// the construction paths (building the HTTP client, loading device data,
// resolving a device by id) and a rejected one-shot login.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup errors ─────────────────────────────────────────────────
    /// The HTTP client could not be built (unreadable or invalid CA
    /// certificate, TLS backend failure).
    #[error("Cannot set up HTTP client: {reason}")]
    ClientSetup { reason: String },

    #[error("Login rejected: {message}")]
    LoginRejected { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {id}")]
    DeviceNotFound { id: String },

    #[error("Cannot load device data from {origin}: {reason}")]
    DeviceSource { origin: String, reason: String },
}

impl From<devdash_api::Error> for CoreError {
    fn from(err: devdash_api::Error) -> Self {
        CoreError::ClientSetup {
            reason: err.to_string(),
        }
    }
}
