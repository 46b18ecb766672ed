//! Camera, lens, exposure and capture-time fields.

use crate::math::{non_zero, round_to};
use crate::tags::{KnownTag, TagAccessor, TagValue};

/// Camera make and model descriptions.
pub fn extract_camera(tags: &TagAccessor<'_>) -> (Option<String>, Option<String>) {
    (
        tags.description(KnownTag::Make).map(str::to_string),
        tags.description(KnownTag::Model).map(str::to_string),
    )
}

/// Lens description and whether it is a front-facing camera.
///
/// The vendor `Lens` value wins over `LensModel`; only the vendor value
/// marks front cameras.
pub fn extract_lens(tags: &TagAccessor<'_>) -> (Option<String>, bool) {
    let vendor_lens = tags.value_with(KnownTag::Lens, TagValue::as_text);
    let front_camera = vendor_lens.is_some_and(|lens| lens.contains(" front "));
    let lens = vendor_lens
        .or_else(|| tags.description(KnownTag::LensModel))
        .map(str::to_string);
    (lens, front_camera)
}

/// Actual focal length in mm (2 dp).
pub fn extract_focal_length(tags: &TagAccessor<'_>) -> Option<f64> {
    tags.value_with(KnownTag::FocalLength, |v| non_zero(v.reduce_ratio()))
        .map(|f| round_to(f, 2))
}

/// 35mm-equivalent focal length in mm.
pub fn extract_focal_length_in_35mm(tags: &TagAccessor<'_>) -> Option<f64> {
    tags.value_with(KnownTag::FocalLengthIn35mmFilm, |v| match v {
        TagValue::Number(n) => non_zero(*n),
        other => non_zero(other.reduce_ratio()),
    })
}

/// Aperture as `f/<n>`.
pub fn extract_f_number(tags: &TagAccessor<'_>) -> Option<String> {
    tags.value_with(KnownTag::FNumber, |v| non_zero(v.reduce_ratio()))
        .map(|n| format!("f/{n}"))
}

/// Field of view reported by the camera, in degrees.
///
/// Accepts a plain number or text with a leading number ("69.4 deg").
pub fn extract_exif_field_of_view(tags: &TagAccessor<'_>) -> Option<f64> {
    tags.value_with(KnownTag::FieldOfView, |v| match v {
        TagValue::Number(n) => non_zero(*n),
        other => other.as_text().and_then(leading_number).and_then(non_zero),
    })
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// Exposure time and program descriptions.
pub fn extract_exposure(tags: &TagAccessor<'_>) -> (Option<String>, Option<String>) {
    (
        tags.description(KnownTag::ExposureTime).map(str::to_string),
        tags.description(KnownTag::ExposureProgram).map(str::to_string),
    )
}

/// Rewrite an EXIF `YYYY:MM:DD HH:MM:SS` timestamp as
/// `YYYY-MM-DDTHH:MM:SS`. Empty input yields `None`.
pub fn reformat_date(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let (date, time) = match input.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (input, None),
    };
    let date = date.replace(':', "-");
    Some(match time {
        Some(time) if !time.is_empty() => format!("{date}T{time}"),
        _ => date,
    })
}

/// Capture date-time, preferring `DateTime` over the original and
/// digitized timestamps.
pub fn extract_date_time(tags: &TagAccessor<'_>) -> Option<String> {
    [
        KnownTag::DateTime,
        KnownTag::DateTimeOriginal,
        KnownTag::DateTimeDigitized,
    ]
    .into_iter()
    .find_map(|tag| tags.description_with(tag, reformat_date))
}
