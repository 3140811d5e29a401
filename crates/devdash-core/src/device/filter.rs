// ── Device filter predicate ──

use std::collections::BTreeSet;

use crate::model::Device;

/// Tag selection plus free-text search.
///
/// A device matches when it carries every selected tag and the query is a
/// case-insensitive substring of its name or a plain substring of its IP.
/// An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub tags: BTreeSet<String>,
    pub query: String,
}

impl DeviceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn matches(&self, device: &Device) -> bool {
        self.matches_tags(device) && self.matches_search(device)
    }

    fn matches_tags(&self, device: &Device) -> bool {
        self.tags.iter().all(|tag| device.has_tag(tag))
    }

    fn matches_search(&self, device: &Device) -> bool {
        device
            .name
            .to_lowercase()
            .contains(&self.query.to_lowercase())
            || device.ip.contains(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawDevice;

    fn device(name: &str, ip: &str, tags: &[&str]) -> Device {
        Device::from_raw(
            RawDevice {
                name: Some(name.into()),
                ip: Some(ip.into()),
                tags: Some(tags.iter().map(|t| (*t).to_owned()).collect()),
                ..RawDevice::default()
            },
            0,
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(DeviceFilter::new().matches(&device("x", "1.2.3.4", &[])));
    }

    #[test]
    fn name_search_ignores_case() {
        let d = device("Router-A", "10.0.0.1", &["lan"]);
        assert!(DeviceFilter::new().with_query("router").matches(&d));
        assert!(DeviceFilter::new().with_query("ROUTER-a").matches(&d));
        assert!(!DeviceFilter::new().with_query("switch").matches(&d));
    }

    #[test]
    fn ip_search_is_substring() {
        let d = device("Router-A", "10.0.0.1", &["lan"]);
        assert!(DeviceFilter::new().with_query("10.0.0").matches(&d));
        assert!(DeviceFilter::new().with_query("0.1").matches(&d));
    }

    #[test]
    fn every_selected_tag_is_required() {
        let d = device("Router-A", "10.0.0.1", &["lan"]);
        assert!(DeviceFilter::new().with_tag("lan").matches(&d));
        assert!(
            !DeviceFilter::new()
                .with_tag("lan")
                .with_tag("wifi")
                .matches(&d)
        );
    }

    #[test]
    fn tags_and_search_combine() {
        let d = device("AP-Lobby", "192.168.1.21", &["wifi"]);
        let f = DeviceFilter::new().with_tag("wifi").with_query("lobby");
        assert!(f.matches(&d));
        assert!(!f.clone().with_query("router").matches(&d));
    }
}
