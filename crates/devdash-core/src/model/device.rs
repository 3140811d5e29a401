// ── Device domain types ──

use serde::{Deserialize, Serialize};

/// Placeholder for text fields the source left empty.
pub const MISSING_TEXT: &str = "—";
pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_IP: &str = "0.0.0.0";
pub const DEFAULT_MAC: &str = "00:00:00:00:00:00";
pub const DEFAULT_SPEED: &str = "0 Мбит/с";

/// A SIM card slot on a cellular-capable device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimCard {
    pub operator: String,
    pub active: bool,
    pub connection: String,
    pub speed: String,
}

/// Device identifiers show up as strings or bare numbers in source data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    /// The id as text, or `None` when it counts as missing: an empty string
    /// or a numeric zero. The string `"0"` is a real id.
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) if s.is_empty() => None,
            Self::Number(n) if n.as_f64() == Some(0.0) => None,
            Self::Text(s) => Some(s),
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

/// A device record exactly as the data source has it: every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub mac: Option<String>,
    pub speed: Option<String>,
    pub last_seen: Option<String>,
    pub online: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub firmware: Option<String>,
    pub uptime: Option<String>,
    pub cpu_load: Option<f64>,
    pub memory_usage: Option<f64>,
    pub download_speed: Option<String>,
    pub upload_speed: Option<String>,
    pub sim_cards: Option<Vec<SimCard>>,
    pub available_tags: Option<Vec<String>>,
}

/// The canonical Device type. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub mac: String,
    pub speed: String,
    pub last_seen: String,
    pub online: bool,
    pub tags: Vec<String>,

    pub firmware: String,
    pub uptime: String,
    pub cpu_load: f64,
    pub memory_usage: f64,
    pub download_speed: String,
    pub upload_speed: String,
    pub sim_cards: Vec<SimCard>,
    pub available_tags: Vec<String>,
}

impl Device {
    /// Normalize a raw record. `position` is the record's zero-based index
    /// in the source list; it becomes the id when the record has none.
    ///
    /// Empty strings count as missing, as does a numeric zero id. `online`
    /// only defaults when absent, so an explicit `false` is kept.
    pub fn from_raw(raw: RawDevice, position: usize) -> Self {
        let id = raw
            .id
            .and_then(RawId::into_text)
            .unwrap_or_else(|| (position + 1).to_string());

        Self {
            id,
            name: text_or(raw.name, DEFAULT_NAME),
            ip: text_or(raw.ip, DEFAULT_IP),
            mac: text_or(raw.mac, DEFAULT_MAC),
            speed: text_or(raw.speed, DEFAULT_SPEED),
            last_seen: text_or(raw.last_seen, MISSING_TEXT),
            online: raw.online.unwrap_or(false),
            tags: raw.tags.unwrap_or_default(),

            firmware: text_or(raw.firmware, MISSING_TEXT),
            uptime: text_or(raw.uptime, MISSING_TEXT),
            cpu_load: number_or_zero(raw.cpu_load),
            memory_usage: number_or_zero(raw.memory_usage),
            download_speed: text_or(raw.download_speed, MISSING_TEXT),
            upload_speed: text_or(raw.upload_speed, MISSING_TEXT),
            sim_cards: raw.sim_cards.unwrap_or_default(),
            available_tags: raw.available_tags.unwrap_or_default(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn active_sim(&self) -> Option<&SimCard> {
        self.sim_cards.iter().find(|s| s.active)
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn number_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(v: serde_json::Value) -> RawDevice {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn sparse_record_gets_placeholders() {
        let d = Device::from_raw(
            raw(json!({ "id": "1", "name": "Router-A", "ip": "10.0.0.1", "tags": ["lan"] })),
            0,
        );

        assert_eq!(d.id, "1");
        assert_eq!(d.name, "Router-A");
        assert_eq!(d.speed, "0 Мбит/с");
        assert!(!d.online);
        assert_eq!(d.firmware, "—");
        assert_eq!(d.mac, DEFAULT_MAC);
        assert_eq!(d.last_seen, MISSING_TEXT);
        assert_eq!(d.cpu_load, 0.0);
        assert!(d.sim_cards.is_empty());
        assert!(d.available_tags.is_empty());
    }

    #[test]
    fn missing_id_falls_back_to_position() {
        let d = Device::from_raw(RawDevice::default(), 4);
        assert_eq!(d.id, "5");
        assert_eq!(d.name, DEFAULT_NAME);
        assert_eq!(d.ip, DEFAULT_IP);
    }

    #[test]
    fn numeric_id_is_stringified() {
        let d = Device::from_raw(raw(json!({ "id": 42 })), 0);
        assert_eq!(d.id, "42");
    }

    #[test]
    fn zero_ids_fall_back_to_position() {
        for id in [json!(0), json!(0.0), json!(-0.0), json!("")] {
            let d = Device::from_raw(raw(json!({ "id": id })), 4);
            assert_eq!(d.id, "5", "id {id}");
        }
    }

    #[test]
    fn string_zero_id_is_kept() {
        let d = Device::from_raw(raw(json!({ "id": "0" })), 4);
        assert_eq!(d.id, "0");

        let d = Device::from_raw(raw(json!({ "id": 0.5 })), 4);
        assert_eq!(d.id, "0.5");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let d = Device::from_raw(raw(json!({ "name": "", "uptime": "" })), 0);
        assert_eq!(d.name, DEFAULT_NAME);
        assert_eq!(d.uptime, MISSING_TEXT);
    }

    #[test]
    fn explicit_values_are_kept() {
        let d = Device::from_raw(
            raw(json!({
                "online": true,
                "cpuLoad": 37.5,
                "memoryUsage": 61,
                "simCards": [
                    { "operator": "MTS", "active": false, "connection": "4G", "speed": "20 Мбит/с" },
                    { "operator": "Beeline", "active": true, "connection": "LTE", "speed": "50 Мбит/с" }
                ],
                "availableTags": ["lan", "wifi"]
            })),
            0,
        );

        assert!(d.online);
        assert_eq!(d.cpu_load, 37.5);
        assert_eq!(d.memory_usage, 61.0);
        assert_eq!(d.active_sim().unwrap().operator, "Beeline");
        assert_eq!(d.available_tags, vec!["lan".to_owned(), "wifi".to_owned()]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let d = Device::from_raw(raw(json!({ "lastSeen": "5 мин назад" })), 0);
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["lastSeen"], json!("5 мин назад"));
        assert!(v.get("last_seen").is_none());
    }
}
