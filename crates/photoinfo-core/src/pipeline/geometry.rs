//! Lens and sensor geometry: crop factor, sensor size, and angle of view.
//!
//! All angles are in degrees. Sensor sizes are in millimeters, estimated
//! against the 36x24mm full-frame reference.

use std::fmt;

use crate::math::{non_zero, round_to};
use crate::types::Orientation;

/// Full-frame reference width in mm.
pub const FULL_FRAME_WIDTH: f64 = 36.0;

/// Full-frame reference height in mm.
pub const FULL_FRAME_HEIGHT: f64 = 24.0;

/// Aspect ratio assumed when none can be inferred.
pub const DEFAULT_ASPECT_RATIO: &str = "4:3";

/// Above this crop factor the sensor is treated as a phone sensor and the
/// angle of view is taken straight from the 35mm equivalent.
pub const PHONE_CROP_FACTOR: f64 = 5.0;

/// Common photographic aspect ratios, in inference preference order.
const COMMON_RATIOS: [(&str, f64); 5] = [
    ("3:2", 3.0 / 2.0),
    ("4:3", 4.0 / 3.0),
    ("16:9", 16.0 / 9.0),
    ("5:4", 5.0 / 4.0),
    ("1:1", 1.0),
];

/// A `W:H` aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    /// Parse `"W:H"`. Non-positive or malformed parts yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.split_once(':')?;
        let width: f64 = w.trim().parse().ok()?;
        let height: f64 = h.trim().parse().ok()?;
        (width > 0.0 && height > 0.0).then_some(Self { width, height })
    }

    /// Width over height.
    pub fn value(&self) -> f64 {
        self.width / self.height
    }

    fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 3.0,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Physical sensor dimensions in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSize {
    pub width: f64,
    pub height: f64,
}

/// Horizontal and vertical angle of view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnglesOfView {
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
}

/// Published angle of view plus the orientation-adjusted value used for
/// map markers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldOfView {
    pub angle_of_view: Option<f64>,
    pub effective_angle_of_view: Option<f64>,
}

/// Diagonal of a sensor.
pub fn sensor_diagonal(width: f64, height: f64) -> f64 {
    width.hypot(height)
}

fn full_frame_diagonal() -> f64 {
    sensor_diagonal(FULL_FRAME_WIDTH, FULL_FRAME_HEIGHT)
}

/// Crop factor of a sensor relative to full frame (2 dp).
pub fn crop_factor_from_sensor(sensor_width: f64, sensor_height: f64) -> f64 {
    round_to(
        full_frame_diagonal() / sensor_diagonal(sensor_width, sensor_height),
        2,
    )
}

/// Crop factor from the 35mm equivalent and the actual focal length.
pub fn crop_factor_from_focal_lengths(focal_length_in_35mm: f64, focal_length: f64) -> f64 {
    focal_length_in_35mm / focal_length
}

/// 35mm-equivalent focal length for a lens on the given sensor, rounded to
/// whole millimeters.
pub fn equivalent_focal_length(focal_length: f64, sensor_width: f64, sensor_height: f64) -> f64 {
    (focal_length * crop_factor_from_sensor(sensor_width, sensor_height)).round()
}

/// Estimate the sensor size from the crop factor implied by the two focal
/// lengths, split by `aspect_ratio` (2 dp each).
pub fn estimate_sensor_size(
    focal_length_in_35mm: f64,
    focal_length: f64,
    aspect_ratio: AspectRatio,
) -> SensorSize {
    let crop_factor = crop_factor_from_focal_lengths(focal_length_in_35mm, focal_length);
    let diagonal = full_frame_diagonal() / crop_factor;
    let ratio_diagonal = aspect_ratio.diagonal();

    SensorSize {
        width: round_to(diagonal * aspect_ratio.width / ratio_diagonal, 2),
        height: round_to(diagonal * aspect_ratio.height / ratio_diagonal, 2),
    }
}

/// Angle subtended by `extent` mm at `focal_length` mm (4 dp). Zero and
/// non-finite results are `None`.
fn subtended_angle(extent: f64, focal_length: f64) -> Option<f64> {
    let degrees = (2.0 * (extent / (2.0 * focal_length)).atan()).to_degrees();
    non_zero(round_to(degrees, 4))
}

fn resolve_aspect_ratio(aspect_ratio: Option<&str>) -> AspectRatio {
    aspect_ratio.and_then(AspectRatio::parse).unwrap_or_default()
}

/// Horizontal angle of view from the estimated sensor width.
///
/// Without a 35mm equivalent the sensor is assumed full frame.
pub fn angle_of_view(
    focal_length: f64,
    focal_length_in_35mm: Option<f64>,
    aspect_ratio: Option<&str>,
) -> Option<f64> {
    angles_of_view(focal_length, focal_length_in_35mm, aspect_ratio).horizontal
}

/// Horizontal and vertical angle of view from the estimated sensor size.
pub fn angles_of_view(
    focal_length: f64,
    focal_length_in_35mm: Option<f64>,
    aspect_ratio: Option<&str>,
) -> AnglesOfView {
    let sensor = estimate_sensor_size(
        focal_length_in_35mm.unwrap_or(focal_length),
        focal_length,
        resolve_aspect_ratio(aspect_ratio),
    );

    AnglesOfView {
        horizontal: subtended_angle(sensor.width, focal_length),
        vertical: subtended_angle(sensor.height, focal_length),
    }
}

/// Vertical angle of view from a horizontal one and the width/height ratio
/// (4 dp).
pub fn vertical_from_horizontal_fov(horizontal_degrees: f64, aspect_ratio: f64) -> f64 {
    let half = horizontal_degrees.to_radians() / 2.0;
    round_to((2.0 * (half.tan() / aspect_ratio).atan()).to_degrees(), 4)
}

/// Nearest common aspect ratio for pixel dimensions.
///
/// Ratios more than 0.05 away from every common ratio fall back to 3:2 or
/// 4:3, whichever is closer. Zero dimensions yield `None`.
pub fn infer_aspect_ratio(width: u32, height: u32) -> Option<&'static str> {
    if width == 0 || height == 0 {
        return None;
    }
    let ratio = f64::from(width.max(height)) / f64::from(width.min(height));

    let (mut closest, first) = COMMON_RATIOS[0];
    let mut smallest = (ratio - first).abs();
    for (format, value) in COMMON_RATIOS {
        let diff = (ratio - value).abs();
        if diff < smallest {
            smallest = diff;
            closest = format;
        }
    }

    if smallest > 0.05 {
        let format = if (ratio - 1.5).abs() < (ratio - 1.333).abs() {
            "3:2"
        } else {
            "4:3"
        };
        return Some(format);
    }
    Some(closest)
}

/// Decide the published and effective angle of view.
///
/// An explicit `FieldOfView` tag wins and is taken as horizontal; portrait
/// shots derive the vertical angle from the aspect ratio. Without one, phone
/// sensors (crop factor above [`PHONE_CROP_FACTOR`]) use the 35mm equivalent
/// against the full-frame reference, and everything else uses the estimated
/// sensor size. The effective value is vertical for portrait shots.
pub fn compute_field_of_view(
    exif_field_of_view: Option<f64>,
    focal_length: Option<f64>,
    focal_length_in_35mm: Option<f64>,
    aspect_ratio: Option<&str>,
    orientation: Orientation,
) -> FieldOfView {
    let portrait = orientation == Orientation::Portrait;

    if let Some(horizontal) = exif_field_of_view.and_then(non_zero) {
        let horizontal = round_to(horizontal, 4);
        let effective = match aspect_ratio.and_then(AspectRatio::parse) {
            Some(ratio) if portrait => vertical_from_horizontal_fov(horizontal, ratio.value()),
            _ => horizontal,
        };
        return FieldOfView {
            angle_of_view: Some(horizontal),
            effective_angle_of_view: Some(effective),
        };
    }

    let Some(focal_length) = focal_length.and_then(non_zero) else {
        return FieldOfView::default();
    };

    let crop_factor = focal_length_in_35mm
        .map(|f35| crop_factor_from_focal_lengths(f35, focal_length))
        .unwrap_or(1.0);

    match focal_length_in_35mm {
        Some(f35) if crop_factor > PHONE_CROP_FACTOR => {
            let horizontal = subtended_angle(FULL_FRAME_WIDTH, f35);
            let effective = if portrait {
                subtended_angle(FULL_FRAME_HEIGHT, f35)
            } else {
                horizontal
            };
            FieldOfView {
                angle_of_view: horizontal,
                effective_angle_of_view: effective,
            }
        }
        _ => {
            let angles = angles_of_view(focal_length, focal_length_in_35mm, aspect_ratio);
            FieldOfView {
                angle_of_view: angles.horizontal,
                effective_angle_of_view: if portrait {
                    angles.vertical
                } else {
                    angles.horizontal
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_diagonal_and_crop_factor() {
        assert_eq!(round_to(sensor_diagonal(36.0, 24.0), 4), 43.2666);
        assert_eq!(crop_factor_from_sensor(5.6, 4.2), 6.18);
        assert_eq!(crop_factor_from_sensor(36.0, 24.0), 1.0);
        assert_eq!(crop_factor_from_focal_lengths(28.0, 4.0), 7.0);
    }

    #[test]
    fn test_equivalent_focal_length() {
        assert_eq!(equivalent_focal_length(2.22, 5.6, 4.2), 14.0);
    }

    #[test]
    fn test_estimate_sensor_size() {
        let size = estimate_sensor_size(14.0, 2.22, AspectRatio::default());
        assert_eq!(size, SensorSize { width: 5.49, height: 4.12 });

        let size = estimate_sensor_size(36.0, 24.0, AspectRatio::parse("3:2").unwrap());
        assert_eq!(size, SensorSize { width: 24.0, height: 16.0 });
    }

    #[test]
    fn test_angle_of_view() {
        assert_eq!(angle_of_view(2.22, Some(14.0), None), Some(102.0721));
        assert_eq!(angle_of_view(6.86, Some(24.0), None), Some(71.5716));
        assert_eq!(angle_of_view(9.0, Some(78.0), None), Some(24.9969));
        assert_eq!(angle_of_view(8.67, Some(77.0), None), Some(25.3513));
        assert_eq!(angle_of_view(55.0, None, None), Some(34.9309));
    }

    #[test]
    fn test_angle_of_view_zero_focal_length() {
        assert_eq!(angle_of_view(0.0, Some(24.0), None), None);
        assert_eq!(angle_of_view(0.0, None, None), None);
    }

    #[test]
    fn test_angles_of_view() {
        let angles = angles_of_view(50.0, Some(75.0), Some("3:2"));
        assert_eq!(angles.horizontal, Some(26.9915));
        assert_eq!(angles.vertical, Some(18.1806));

        let angles = angles_of_view(6.86, Some(24.0), Some("4:3"));
        assert_eq!(angles.vertical, Some(56.8105));
    }

    #[test]
    fn test_malformed_aspect_ratio_falls_back() {
        assert_eq!(
            angles_of_view(2.22, Some(14.0), Some("wide")),
            angles_of_view(2.22, Some(14.0), None)
        );
        assert!(AspectRatio::parse("0:3").is_none());
        assert_eq!(AspectRatio::parse("16:9").unwrap().to_string(), "16:9");
    }

    #[test]
    fn test_vertical_from_horizontal_fov() {
        assert_eq!(vertical_from_horizontal_fov(60.0, 4.0 / 3.0), 46.8264);
        assert_eq!(vertical_from_horizontal_fov(65.5, 1.5), 46.4207);
    }

    #[test]
    fn test_infer_aspect_ratio() {
        assert_eq!(infer_aspect_ratio(6000, 4000), Some("3:2"));
        assert_eq!(infer_aspect_ratio(4000, 6000), Some("3:2"));
        assert_eq!(infer_aspect_ratio(4032, 3024), Some("4:3"));
        assert_eq!(infer_aspect_ratio(1920, 1080), Some("16:9"));
        assert_eq!(infer_aspect_ratio(2000, 1600), Some("5:4"));
        assert_eq!(infer_aspect_ratio(3000, 3000), Some("1:1"));
        assert_eq!(infer_aspect_ratio(0, 3000), None);
    }

    #[test]
    fn test_infer_aspect_ratio_fallback() {
        // 1.40 sits between 4:3 and 3:2, more than 0.05 from both
        assert_eq!(infer_aspect_ratio(1400, 1000), Some("4:3"));
        assert_eq!(infer_aspect_ratio(1430, 1000), Some("3:2"));
        // 2.4:1 is far from everything
        assert_eq!(infer_aspect_ratio(2400, 1000), Some("3:2"));
    }

    #[test]
    fn test_field_of_view_from_exif_tag() {
        let fov = compute_field_of_view(
            Some(60.0),
            Some(4.0),
            Some(28.0),
            Some("4:3"),
            Orientation::Landscape,
        );
        assert_eq!(fov.angle_of_view, Some(60.0));
        assert_eq!(fov.effective_angle_of_view, Some(60.0));

        let fov = compute_field_of_view(Some(60.0), None, None, Some("4:3"), Orientation::Portrait);
        assert_eq!(fov.angle_of_view, Some(60.0));
        assert_eq!(fov.effective_angle_of_view, Some(46.8264));

        let fov = compute_field_of_view(Some(60.0), None, None, None, Orientation::Portrait);
        assert_eq!(fov.effective_angle_of_view, Some(60.0));
    }

    #[test]
    fn test_field_of_view_phone_sensor() {
        let fov = compute_field_of_view(
            None,
            Some(2.22),
            Some(14.0),
            Some("4:3"),
            Orientation::Landscape,
        );
        assert_eq!(fov.angle_of_view, Some(104.25));
        assert_eq!(fov.effective_angle_of_view, Some(104.25));

        let fov = compute_field_of_view(
            None,
            Some(4.0),
            Some(28.0),
            Some("4:3"),
            Orientation::Portrait,
        );
        assert_eq!(fov.angle_of_view, Some(65.4705));
        assert_eq!(fov.effective_angle_of_view, Some(46.3972));
    }

    #[test]
    fn test_field_of_view_sensor_based() {
        let fov = compute_field_of_view(
            None,
            Some(50.0),
            Some(75.0),
            Some("3:2"),
            Orientation::Landscape,
        );
        assert_eq!(fov.angle_of_view, Some(26.9915));
        assert_eq!(fov.effective_angle_of_view, Some(26.9915));

        let fov = compute_field_of_view(
            None,
            Some(50.0),
            Some(75.0),
            Some("3:2"),
            Orientation::Portrait,
        );
        assert_eq!(fov.angle_of_view, Some(26.9915));
        assert_eq!(fov.effective_angle_of_view, Some(18.1806));
    }

    #[test]
    fn test_field_of_view_without_focal_length() {
        let fov = compute_field_of_view(None, None, Some(28.0), None, Orientation::Landscape);
        assert_eq!(fov, FieldOfView::default());

        let fov = compute_field_of_view(Some(0.0), Some(0.0), None, None, Orientation::Landscape);
        assert_eq!(fov, FieldOfView::default());
    }
}
