// ── Device store ──
//
// Holds the normalized device list and the current filter. Filtering is
// recomputed on every read; the list is small and never changes after load.

use std::collections::BTreeSet;

use tracing::debug;

use super::{DeviceFilter, DeviceSource};
use crate::error::CoreError;
use crate::model::{Device, RawDevice};

#[derive(Debug, Clone, Default)]
pub struct DeviceStore {
    devices: Vec<Device>,
    filter: DeviceFilter,
}

impl DeviceStore {
    pub fn from_source(source: DeviceSource) -> Self {
        Self::from_raw(source.items)
    }

    /// Normalize raw records. Position in `raw` is the fallback id.
    pub fn from_raw(raw: Vec<RawDevice>) -> Self {
        let devices: Vec<Device> = raw
            .into_iter()
            .enumerate()
            .map(|(position, raw)| Device::from_raw(raw, position))
            .collect();
        debug!(count = devices.len(), "device store loaded");
        Self {
            devices,
            filter: DeviceFilter::default(),
        }
    }

    /// Store over the sample data compiled into the crate.
    pub fn bundled() -> Result<Self, CoreError> {
        DeviceSource::bundled().map(Self::from_source)
    }

    // ── Filter state ─────────────────────────────────────────────────

    /// Select `tag` if it isn't selected, deselect it if it is.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.filter.tags.remove(tag) {
            self.filter.tags.insert(tag.to_owned());
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn clear_filters(&mut self) {
        self.filter = DeviceFilter::default();
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.filter.tags
    }

    pub fn search_query(&self) -> &str {
        &self.filter.query
    }

    pub fn filter(&self) -> &DeviceFilter {
        &self.filter
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Devices passing the current filter, in source order.
    pub fn filtered_devices(&self) -> Vec<&Device> {
        self.devices
            .iter()
            .filter(|d| self.filter.matches(d))
            .collect()
    }

    /// Every tag used by any device, first occurrence wins the position.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.devices
            .iter()
            .flat_map(|d| d.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Like [`device`](Self::device), as an error for callers that need one.
    pub fn require_device(&self, id: &str) -> Result<&Device, CoreError> {
        self.device(id)
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.devices.iter().filter(|d| d.online).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(name: &str, ip: &str, tags: &[&str]) -> RawDevice {
        RawDevice {
            name: Some(name.into()),
            ip: Some(ip.into()),
            tags: Some(tags.iter().map(|t| (*t).to_owned()).collect()),
            ..RawDevice::default()
        }
    }

    fn store() -> DeviceStore {
        DeviceStore::from_raw(vec![
            raw("Router-A", "10.0.0.1", &["lan"]),
            raw("AP-2", "10.0.0.2", &["wifi", "lan"]),
            raw("Modem", "172.16.0.1", &["lte"]),
        ])
    }

    fn names(store: &DeviceStore) -> Vec<&str> {
        store
            .filtered_devices()
            .into_iter()
            .map(|d| d.name.as_str())
            .collect()
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut store = store();
        store.toggle_tag("lan");
        assert!(store.selected_tags().contains("lan"));
        store.toggle_tag("lan");
        assert!(store.selected_tags().is_empty());
    }

    #[test]
    fn no_filter_returns_everything_in_order() {
        assert_eq!(names(&store()), vec!["Router-A", "AP-2", "Modem"]);
    }

    #[test]
    fn tag_and_search_narrow_together() {
        let mut store = store();
        store.toggle_tag("lan");
        store.set_search_query("router");
        assert_eq!(names(&store), vec!["Router-A"]);
    }

    #[test]
    fn selecting_two_tags_requires_both() {
        let mut store = store();
        store.toggle_tag("lan");
        store.toggle_tag("wifi");
        assert_eq!(names(&store), vec!["AP-2"]);
    }

    #[test]
    fn search_matches_ip_substring() {
        let mut store = store();
        store.set_search_query("172.16");
        assert_eq!(names(&store), vec!["Modem"]);
    }

    #[test]
    fn all_tags_keeps_first_seen_order() {
        assert_eq!(store().all_tags(), vec!["lan", "wifi", "lte"]);
    }

    #[test]
    fn lookup_by_generated_id() {
        let store = store();
        assert_eq!(store.device("2").unwrap().name, "AP-2");
        assert!(store.device("9").is_none());
        assert!(matches!(
            store.require_device("9"),
            Err(CoreError::DeviceNotFound { .. })
        ));
    }

    #[test]
    fn clear_filters_resets_both_parts() {
        let mut store = store();
        store.toggle_tag("lte");
        store.set_search_query("x");
        store.clear_filters();
        assert_eq!(store.filtered_devices().len(), 3);
        assert_eq!(store.search_query(), "");
    }

    #[test]
    fn bundled_store_has_unique_ids() {
        let store = DeviceStore::bundled().unwrap();
        let ids: BTreeSet<&str> = store.devices().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), store.len());
        assert!(store.online_count() <= store.len());
    }
}
