//! Core data types produced by the derivation.
//!
//! [`PhotoInfo`] is built once per file and never mutated afterwards. The
//! mapped and grouped views are plain maps so they serialize directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::tags::{TagMap, TagValue};

/// The display-ready record derived from a photo's tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PhotoInfo {
    // === Camera ===
    /// Camera manufacturer
    pub make: Option<String>,

    /// Camera model
    pub model: Option<String>,

    // === Geometry ===
    /// Horizontal angle of view in degrees (4 dp)
    pub angle_of_view: Option<f64>,

    /// Angle of view for the map marker: vertical for portrait shots,
    /// otherwise the horizontal value
    pub effective_angle_of_view: Option<f64>,

    /// Focal length in mm (2 dp)
    pub focal_length: Option<f64>,

    /// 35mm-equivalent focal length in mm
    pub focal_length_in_35mm: Option<f64>,

    // === GPS ===
    pub gps_position: Option<Position>,
    pub gps_accuracy: Option<GpsAccuracy>,
    pub gps_speed: Option<GpsSpeed>,

    /// Compass direction the camera was pointing, in degrees
    pub bearing: Option<f64>,

    // === Image ===
    /// Pixel width, corrected for orientation
    pub width: u32,

    /// Pixel height, corrected for orientation
    pub height: u32,

    pub orientation: Orientation,

    /// Whether the shot came from a front-facing camera
    pub front_camera: bool,

    // === Capture settings ===
    /// Capture date-time as `YYYY-MM-DDTHH:MM:SS`
    pub date_time: Option<String>,

    pub exposure_time: Option<String>,
    pub exposure_program: Option<String>,

    /// Aperture (e.g., "f/1.78")
    pub f_number: Option<String>,

    /// Lens description
    pub lens: Option<String>,

    /// Raw tags, only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_tags: Option<TagMap>,
}

/// A GPS position: latitude and longitude in degrees (7 dp) and an
/// optional altitude in meters (2 dp).
///
/// Serializes as `[lat, lon]` or `[lat, lon, alt]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl From<Position> for Vec<f64> {
    fn from(position: Position) -> Self {
        let mut parts = vec![position.latitude, position.longitude];
        parts.extend(position.altitude);
        parts
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(parts: Vec<f64>) -> Result<Self, Self::Error> {
        match parts.as_slice() {
            [latitude, longitude] => Ok(Self {
                latitude: *latitude,
                longitude: *longitude,
                altitude: None,
            }),
            [latitude, longitude, altitude] => Ok(Self {
                latitude: *latitude,
                longitude: *longitude,
                altitude: Some(*altitude),
            }),
            other => Err(format!(
                "position needs 2 or 3 components, got {}",
                other.len()
            )),
        }
    }
}

/// Letter grade for GPS horizontal accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GpsAccuracyGrade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for GpsAccuracyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// GPS accuracy grade with the underlying error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsAccuracy {
    /// Horizontal positioning error in meters (2 dp)
    pub error: f64,
    pub grade: GpsAccuracyGrade,
    pub description: String,
}

/// Speed of the receiver when the photo was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsSpeed {
    pub value: f64,

    /// Unit label, abbreviated where known (e.g., "km/h")
    pub unit: String,
}

/// Photo orientation after applying the orientation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
    Square,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landscape => write!(f, "landscape"),
            Self::Portrait => write!(f, "portrait"),
            Self::Square => write!(f, "square"),
        }
    }
}

/// Display category of a mapped tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExifCategory {
    Camera,
    Lens,
    Exposure,
    Image,
    Gps,
    Time,
    Advanced,
    Vendor,
}

impl ExifCategory {
    /// Every category, in display order.
    pub const ALL: [ExifCategory; 8] = [
        Self::Camera,
        Self::Lens,
        Self::Exposure,
        Self::Image,
        Self::Gps,
        Self::Time,
        Self::Advanced,
        Self::Vendor,
    ];
}

/// One tag with its display name and formatted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedTag {
    pub value: TagValue,
    pub display_name: String,
    pub formatted_value: String,
}

/// Mapped tags keyed by raw tag name.
pub type MappedExifData = BTreeMap<String, MappedTag>;

/// Category to (display name to formatted value).
pub type GroupedExifData = BTreeMap<ExifCategory, BTreeMap<String, String>>;

/// All three views of one photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensivePhotoInfo {
    /// Derived record, including the raw tags
    pub original: PhotoInfo,
    pub mapped: MappedExifData,
    pub grouped: GroupedExifData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_serializes_as_array() {
        let position = Position {
            latitude: 51.5042361,
            longitude: 0.0465306,
            altitude: Some(6.49),
        };
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, "[51.5042361,0.0465306,6.49]");

        let flat = Position {
            altitude: None,
            ..position
        };
        assert_eq!(serde_json::to_string(&flat).unwrap(), "[51.5042361,0.0465306]");
    }

    #[test]
    fn test_position_roundtrip_and_rejects_bad_length() {
        let parsed: Position = serde_json::from_str("[52.3586194,4.9417333,0.37]").unwrap();
        assert_eq!(parsed.altitude, Some(0.37));

        assert!(serde_json::from_str::<Position>("[1.0]").is_err());
    }

    #[test]
    fn test_orientation_and_grade_serde() {
        assert_eq!(
            serde_json::to_string(&Orientation::Portrait).unwrap(),
            "\"portrait\""
        );
        assert_eq!(serde_json::to_string(&GpsAccuracyGrade::F).unwrap(), "\"F\"");
        assert_eq!(
            serde_json::to_string(&ExifCategory::Gps).unwrap(),
            "\"gps\""
        );
        assert_eq!(Orientation::default(), Orientation::Landscape);
    }

    #[test]
    fn test_photo_info_skips_absent_original_tags() {
        let info = PhotoInfo::default();
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("original_tags"));
        assert!(json.contains("\"gps_position\":null"));
        assert!(json.contains("\"orientation\":\"landscape\""));
    }

    #[test]
    fn test_grouped_data_uses_lowercase_category_keys() {
        let mut grouped = GroupedExifData::new();
        grouped.insert(
            ExifCategory::Camera,
            BTreeMap::from([("Camera Make".to_string(), "Canon".to_string())]),
        );
        let json = serde_json::to_string(&grouped).unwrap();
        assert_eq!(json, r#"{"camera":{"Camera Make":"Canon"}}"#);
    }
}
