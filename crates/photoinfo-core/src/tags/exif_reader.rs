//! Tag source backed by `kamadak-exif`.
//!
//! Reads the primary IFD of a photo and normalizes it into the [`TagMap`]
//! shape the derivation expects: rationals as `[numerator, denominator]`,
//! GPS coordinates described in unsigned decimal degrees, orientation codes
//! described as `right-top` style markers, and pixel dimensions exposed as
//! `Image Width` / `Image Height`.

use async_trait::async_trait;
use exif::{Field, In, Reader, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{KnownTag, Tag, TagMap, TagSource, TagValue};
use crate::error::{TagSourceError, TagSourceResult};

/// Decodes EXIF tags from JPEG, TIFF, HEIF, PNG and WebP containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTagSource;

impl ExifTagSource {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous decode (runs in `spawn_blocking`).
    pub fn read_sync(path: &Path) -> TagSourceResult<TagMap> {
        let file = File::open(path).map_err(|source| TagSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| TagSourceError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let tags = Self::to_tag_map(exif.fields().filter(|f| f.ifd_num == In::PRIMARY));
        tracing::trace!("Decoded {} tags from {:?}", tags.len(), path);
        Ok(tags)
    }

    /// Normalize decoded fields into a tag map.
    pub fn to_tag_map<'a>(fields: impl Iterator<Item = &'a Field>) -> TagMap {
        let mut tags = TagMap::new();

        for field in fields {
            let name = field.tag.to_string();
            // Unregistered tags render as `Tag(Context, number)`.
            if name.contains('(') {
                continue;
            }
            let Some(value) = convert_value(&field.value) else {
                continue;
            };
            let description = describe(&name, field, &value);
            tags.insert(
                canonical_name(&name).to_string(),
                Tag {
                    value,
                    description: Some(description),
                },
            );
        }

        synthesize_dimensions(&mut tags);
        tags
    }
}

#[async_trait]
impl TagSource for ExifTagSource {
    async fn load(&self, path: &Path) -> TagSourceResult<TagMap> {
        if !path.exists() {
            return Err(TagSourceError::NotFound(path.to_path_buf()));
        }

        let path_owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::read_sync(&path_owned))
            .await
            .map_err(|e| TagSourceError::Join {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
    }
}

/// Names that differ between EXIF 2.3 and the browser-side readers the
/// mapping table follows.
fn canonical_name(name: &str) -> &str {
    match name {
        "PhotographicSensitivity" => "ISOSpeedRatings",
        other => other,
    }
}

/// Convert a raw EXIF value into the tag model.
pub(crate) fn convert_value(value: &Value) -> Option<TagValue> {
    fn numbers<T: Copy + Into<f64>>(items: &[T]) -> Option<TagValue> {
        match items {
            [] => None,
            [single] => Some(TagValue::Number((*single).into())),
            many => Some(TagValue::List(
                many.iter().map(|n| TagValue::Number((*n).into())).collect(),
            )),
        }
    }

    fn rationals(pairs: Vec<(f64, f64)>) -> Option<TagValue> {
        match pairs.as_slice() {
            [] => None,
            [(num, denom)] => Some(TagValue::rational(*num, *denom)),
            many => Some(TagValue::List(
                many.iter()
                    .map(|(num, denom)| TagValue::rational(*num, *denom))
                    .collect(),
            )),
        }
    }

    match value {
        Value::Byte(v) => numbers(v),
        Value::Short(v) => numbers(v),
        Value::Long(v) => numbers(v),
        Value::SByte(v) => numbers(v),
        Value::SShort(v) => numbers(v),
        Value::SLong(v) => numbers(v),
        Value::Float(v) => numbers(v),
        Value::Double(v) => numbers(v),
        Value::Rational(v) => rationals(
            v.iter()
                .map(|r| (f64::from(r.num), f64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(v) => rationals(
            v.iter()
                .map(|r| (f64::from(r.num), f64::from(r.denom)))
                .collect(),
        ),
        Value::Ascii(lines) => Some(TagValue::List(
            lines
                .iter()
                .map(|line| TagValue::Text(String::from_utf8_lossy(line).trim().to_string()))
                .collect(),
        )),
        Value::Undefined(bytes, _) => Some(TagValue::Text(
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string(),
        )),
        _ => None,
    }
}

/// Human-readable description for a field, normalized where the
/// derivation depends on a specific spelling.
fn describe(name: &str, field: &Field, value: &TagValue) -> String {
    let normalized = match name {
        n if n == KnownTag::GpsLatitude.name() || n == KnownTag::GpsLongitude.name() => {
            dms_to_decimal(value).map(|d| d.to_string())
        }
        n if n == KnownTag::GpsImgDirection.name() => {
            value.as_numbers().and_then(|parts| match parts.as_slice() {
                [num, denom] if *denom != 0.0 => Some((num / denom).to_string()),
                _ => None,
            })
        }
        n if n == KnownTag::Orientation.name() => field
            .value
            .get_uint(0)
            .and_then(orientation_description)
            .map(str::to_string),
        n if n == KnownTag::GpsSpeedRef.name() => value
            .as_text()
            .and_then(speed_ref_description)
            .map(str::to_string),
        _ => None,
    };

    normalized.unwrap_or_else(|| {
        field
            .display_value()
            .to_string()
            .trim_matches('"')
            .to_string()
    })
}

/// Convert a `[[deg], [min], [sec]]` rational triple to decimal degrees.
pub(crate) fn dms_to_decimal(value: &TagValue) -> Option<f64> {
    let TagValue::List(parts) = value else {
        return None;
    };
    let components: Vec<f64> = parts
        .iter()
        .map(|part| match part.as_numbers()?.as_slice() {
            [num, denom] if *denom != 0.0 => Some(num / denom),
            _ => None,
        })
        .collect::<Option<_>>()?;

    match components.as_slice() {
        [degrees, minutes, seconds, ..] => Some(degrees + minutes / 60.0 + seconds / 3600.0),
        _ => None,
    }
}

/// Orientation code (1-8) to its row/column marker.
pub(crate) fn orientation_description(code: u32) -> Option<&'static str> {
    Some(match code {
        1 => "top-left",
        2 => "top-right",
        3 => "bottom-right",
        4 => "bottom-left",
        5 => "left-top",
        6 => "right-top",
        7 => "right-bottom",
        8 => "left-bottom",
        _ => return None,
    })
}

/// GPS speed reference letter to its unit name.
pub(crate) fn speed_ref_description(reference: &str) -> Option<&'static str> {
    Some(match reference {
        "K" => "Kilometers per hour",
        "M" => "Miles per hour",
        "N" => "Knots",
        _ => return None,
    })
}

/// Expose pixel dimensions under the `Image Width` / `Image Height` names,
/// preferring the EXIF pixel dimensions over the TIFF image size.
fn synthesize_dimensions(tags: &mut TagMap) {
    let pairs = [
        (KnownTag::ImageWidth, ["PixelXDimension", "ImageWidth"]),
        (KnownTag::ImageHeight, ["PixelYDimension", "ImageLength"]),
    ];

    for (target, sources) in pairs {
        if tags.contains_key(target.name()) {
            continue;
        }
        let pixels = sources
            .iter()
            .find_map(|name| tags.get(*name).and_then(|t| t.value.as_f64()));
        if let Some(pixels) = pixels {
            tags.insert(
                target.name().to_string(),
                Tag::new(pixels, format!("{pixels}px")),
            );
        }
    }
}
