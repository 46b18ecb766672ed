//! Tag categorization and display formatting.
//!
//! Maps raw tag names to human-readable names, one of eight
//! [`ExifCategory`](crate::types::ExifCategory) groups, and a value format.

mod format;
mod group;
mod table;

pub use format::{format_aperture, format_value, with_unit};
pub use group::{descriptions, group_by_category, group_for_display, map_tags};
pub use table::{
    category, display_name, mapping_for, ExifPropertyMapping, ValueFormat,
    EXIF_PROPERTY_MAPPINGS,
};
