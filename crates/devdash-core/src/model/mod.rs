// ── Domain model ──
//
// Canonical types handed to consumers. Wire types from devdash-api are
// converted at the boundary so defaults are applied exactly once.

pub mod device;
pub mod user;

pub use device::{Device, RawDevice, SimCard};
pub use user::{Group, User};
