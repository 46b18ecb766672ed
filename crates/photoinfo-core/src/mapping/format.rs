//! Value formatting for mapped tags.
//!
//! Descriptions from tag readers are often already formatted ("2.22 mm",
//! "f/1.8"), so every formatter passes such input through unchanged.

use super::table::{mapping_for, ValueFormat};

/// Format a tag description for display.
///
/// Unknown tags and tags without a format return the description as-is.
pub fn format_value(tag_name: &str, description: &str) -> String {
    match mapping_for(tag_name).map(|m| m.format) {
        Some(ValueFormat::Custom(format)) => format(description),
        Some(ValueFormat::Unit(unit)) => with_unit(description, unit),
        Some(ValueFormat::Plain) | None => description.to_string(),
    }
}

/// Append a unit unless the value already ends with it, either spaced
/// ("2.22 mm") or directly after a digit ("3024px").
pub fn with_unit(value: &str, unit: &str) -> String {
    if has_unit(value.trim_end(), unit) {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}

fn has_unit(value: &str, unit: &str) -> bool {
    let Some(prefix) = value.strip_suffix(unit) else {
        return false;
    };
    prefix.ends_with(' ') || prefix.ends_with(|c: char| c.is_ascii_digit())
}

/// Render an aperture as `f/<value>`.
pub fn format_aperture(value: &str) -> String {
    if value.starts_with("f/") {
        value.to_string()
    } else {
        format!("f/{value}")
    }
}
