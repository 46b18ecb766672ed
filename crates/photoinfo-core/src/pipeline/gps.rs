//! GPS extraction and accuracy grading.

use crate::math::{non_zero, round_to};
use crate::tags::{KnownTag, TagAccessor, TagValue};
use crate::types::{GpsAccuracy, GpsAccuracyGrade, GpsSpeed, Position};

/// Hemisphere sign from a reference tag value: `positive` (e.g. "N") is +1,
/// anything else -1.
fn hemisphere_sign(value: &TagValue, positive: char) -> Option<f64> {
    let reference = value.as_text()?;
    Some(if reference.starts_with(positive) { 1.0 } else { -1.0 })
}

/// Signed decimal degrees for one axis. Both the coordinate and its
/// reference must be present.
fn signed_coordinate(
    tags: &TagAccessor<'_>,
    coordinate: KnownTag,
    reference: KnownTag,
    positive: char,
) -> Option<f64> {
    let sign = tags.value_with(reference, |v| hemisphere_sign(v, positive))?;
    let degrees = tags.description_with(coordinate, |d| d.trim().parse::<f64>().ok())?;
    let signed = degrees * sign;
    signed.is_finite().then(|| round_to(signed, 7))
}

/// Extract the GPS position.
///
/// Returns `None` unless both latitude and longitude resolve. Altitude is
/// attached only when it reduces to a non-zero value, and is negated when
/// `GPSAltitudeRef` marks it as below sea level.
pub fn extract_position(tags: &TagAccessor<'_>) -> Option<Position> {
    if !tags.contains(KnownTag::GpsLatitude) || !tags.contains(KnownTag::GpsLongitude) {
        return None;
    }

    let latitude = signed_coordinate(tags, KnownTag::GpsLatitude, KnownTag::GpsLatitudeRef, 'N')?;
    let longitude =
        signed_coordinate(tags, KnownTag::GpsLongitude, KnownTag::GpsLongitudeRef, 'E')?;

    let below_sea_level = tags
        .value_with(KnownTag::GpsAltitudeRef, TagValue::as_f64)
        .is_some_and(|r| r == 1.0);
    let altitude = tags
        .value_with(KnownTag::GpsAltitude, |v| non_zero(v.reduce_ratio()))
        .map(|alt| round_to(if below_sea_level { -alt } else { alt }, 2));

    Some(Position {
        latitude,
        longitude,
        altitude,
    })
}

/// Abbreviate well-known speed unit labels; unknown labels pass through.
pub fn truncate_speed_unit(unit: &str) -> String {
    match unit {
        "Kilometers per hour" => "km/h",
        "Miles per hour" => "mph",
        "Knots" => "kn",
        other => other,
    }
    .to_string()
}

/// Extract receiver speed. Needs both a numeric speed value and its unit.
pub fn extract_speed(tags: &TagAccessor<'_>) -> Option<GpsSpeed> {
    let value = tags.value_with(KnownTag::GpsSpeed, |v| match v {
        TagValue::Number(n) => n.is_finite().then_some(*n),
        other => other.as_numbers().map(|_| other.reduce_ratio()),
    })?;
    let unit = tags.description(KnownTag::GpsSpeedRef)?;
    Some(GpsSpeed {
        value,
        unit: truncate_speed_unit(unit),
    })
}

/// Extract the camera bearing in degrees (2 dp).
pub fn extract_bearing(tags: &TagAccessor<'_>) -> Option<f64> {
    tags.description_with(KnownTag::GpsImgDirection, |d| {
        d.trim()
            .parse::<f64>()
            .ok()
            .filter(|b| b.is_finite())
            .map(|b| round_to(b, 2))
    })
}

/// Extract the raw horizontal positioning error in meters.
pub fn extract_gps_error(tags: &TagAccessor<'_>) -> Option<f64> {
    tags.value_with(KnownTag::GpsHPositioningError, |v| Some(v.reduce_ratio()))
}

/// Grade a horizontal positioning error.
///
/// A missing error is graded A, since receivers usually omit the tag when
/// the fix is good.
pub fn grade_accuracy(error: Option<f64>) -> GpsAccuracy {
    let Some(error) = error else {
        return GpsAccuracy {
            error: 0.0,
            grade: GpsAccuracyGrade::A,
            description: "Excellent - No positioning error reported".to_string(),
        };
    };

    let (grade, description) = if error < 5.0 {
        (GpsAccuracyGrade::A, "Excellent - Strong satellite fix")
    } else if error < 10.0 {
        (GpsAccuracyGrade::B, "Good - Typical smartphone accuracy")
    } else if error < 20.0 {
        (GpsAccuracyGrade::C, "Fair - Some obstructions")
    } else if error < 50.0 {
        (GpsAccuracyGrade::D, "Poor - Weak signal or just acquired")
    } else {
        (GpsAccuracyGrade::F, "Very poor - Unreliable GPS data")
    };

    GpsAccuracy {
        error: round_to(error, 2),
        grade,
        description: description.to_string(),
    }
}
