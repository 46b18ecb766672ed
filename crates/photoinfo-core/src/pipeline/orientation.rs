//! Orientation classification and dimension correction.

use crate::tags::{KnownTag, TagAccessor, TagValue};
use crate::types::Orientation;

/// Orientation tag descriptions that mean the image is stored rotated a
/// quarter turn.
const ROTATED_MARKERS: [&str; 2] = ["right-top", "left-top"];

/// Classified orientation with dimensions corrected to match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDimensions {
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
}

/// Whether an orientation tag description marks a rotated image.
pub fn is_rotated(orientation_tag: Option<&str>) -> bool {
    orientation_tag.is_some_and(|tag| ROTATED_MARKERS.contains(&tag.trim()))
}

/// Classify orientation and correct the dimensions.
///
/// Equal, non-zero dimensions are square. Taller-than-wide images or a
/// rotated marker are portrait. When the dimensions say landscape but the
/// tag says rotated, width and height are swapped. Unknown dimensions
/// default to landscape.
pub fn normalize(width: u32, height: u32, orientation_tag: Option<&str>) -> NormalizedDimensions {
    let rotated = is_rotated(orientation_tag);

    let orientation = if width == height && width > 0 {
        Orientation::Square
    } else if height > width || rotated {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };

    let (width, height) = if width > height && rotated {
        (height, width)
    } else {
        (width, height)
    };

    NormalizedDimensions {
        orientation,
        width,
        height,
    }
}

/// Pixel dimensions as reported by the tags; missing values are 0.
pub fn extract_dimensions(tags: &TagAccessor<'_>) -> (u32, u32) {
    let read = |tag| {
        tags.value_with(tag, TagValue::as_f64)
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as u32)
            .unwrap_or(0)
    };
    (read(KnownTag::ImageWidth), read(KnownTag::ImageHeight))
}
