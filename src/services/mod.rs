//! Service layer: the building blocks of a synchronization run.
//!
//! - `property_mapper`: pure event → property set mapping
//! - `status_resolver`: fetches the `Status` select options
//! - `page_locator`: finds the page joined to an issue id

pub mod page_locator;
pub mod property_mapper;
pub mod status_resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use page_locator::locate_page;
pub use property_mapper::{find_status_option, map_properties};
pub use status_resolver::resolve_status_options;
