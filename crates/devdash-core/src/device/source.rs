// ── Device data source ──
//
// Device records come from a static JSON document with a top-level
// `items` list. A sample document is compiled in; a file on disk can
// replace it.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::DeviceSourceConfig;
use crate::error::CoreError;
use crate::model::RawDevice;

const BUNDLED_DEVICES: &str = include_str!("../../data/devices.json");

/// A parsed device document, not yet normalized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceSource {
    #[serde(default)]
    pub items: Vec<RawDevice>,
}

impl DeviceSource {
    /// The sample data shipped with the crate.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_DEVICES, "bundled sample data")
    }

    /// Parse a JSON document. `origin` names it in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::DeviceSource {
            origin: origin.to_owned(),
            reason: e.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let origin = path.display().to_string();
        debug!(path = %origin, "loading device data");
        let json = std::fs::read_to_string(path).map_err(|e| CoreError::DeviceSource {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json, &origin)
    }

    pub fn load(config: &DeviceSourceConfig) -> Result<Self, CoreError> {
        match config {
            DeviceSourceConfig::Bundled => Self::bundled(),
            DeviceSourceConfig::File(path) => Self::from_path(path),
        }
    }
}
