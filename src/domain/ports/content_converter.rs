//! Issue body conversion port.

use crate::domain::models::{Block, PropertyValue};

/// Context handed to the block converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionContext {
    /// Repository clone URL; relative links in the body resolve against it.
    pub source_url: Option<String>,
}

/// Port for turning free-form issue text into store content.
///
/// Both conversions are infallible: an absent or empty body yields an empty
/// block list and an empty rich-text value.
pub trait ContentConverter: Send + Sync {
    /// Convert the body into page content blocks.
    fn to_blocks(&self, body: Option<&str>, context: &ConversionContext) -> Vec<Block>;

    /// Summarize the body as a single property value.
    fn to_property_value(&self, body: Option<&str>) -> PropertyValue;
}
