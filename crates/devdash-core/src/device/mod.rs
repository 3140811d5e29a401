//! Device list, tag/search filtering, and the data source behind it.

mod filter;
mod source;
mod store;

pub use filter::DeviceFilter;
pub use source::DeviceSource;
pub use store::DeviceStore;
