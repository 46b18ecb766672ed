//! Raw tag model and the sources that produce it.
//!
//! A [`TagSource`] turns a photo file into a [`TagMap`]: tag name to a raw
//! value plus a human-readable description. Everything else in the crate
//! reads tags through [`TagAccessor`], which is keyed by the closed
//! [`KnownTag`] set.
//!
//! - **exif_reader**: decodes files with `kamadak-exif`
//! - **json**: reads pre-extracted tag dumps
//! - [`MemoryTagSource`]: fixed tags (or a fixed failure) for embedding and tests

pub mod exif_reader;
pub mod json;

pub use exif_reader::ExifTagSource;
pub use json::JsonTagSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{TagSourceError, TagSourceResult};
use crate::math::{ratio_reduce, DEFAULT_RATIO_PRECISION};

/// Decoded tags keyed by tag name.
pub type TagMap = BTreeMap<String, Tag>;

/// A raw tag value.
///
/// Rationals are two-element lists (`[numerator, denominator]`);
/// multi-component rationals such as GPS coordinates nest them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Number(f64),
    Text(String),
    List(Vec<TagValue>),
}

impl TagValue {
    /// Build a `[numerator, denominator]` rational.
    pub fn rational(numerator: f64, denominator: f64) -> Self {
        Self::List(vec![Self::Number(numerator), Self::Number(denominator)])
    }

    /// The value as a single number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a flat list of numbers. Nested lists and text yield `None`.
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        match self {
            Self::List(items) => items.iter().map(Self::as_f64).collect(),
            _ => None,
        }
    }

    /// The value as text, taking the first element of a list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(items) => items.first().and_then(Self::as_text),
            Self::Number(_) => None,
        }
    }

    /// Reduce a rational list to a number; anything that is not a flat
    /// numeric list reduces to `0.0`.
    pub fn reduce_ratio(&self) -> f64 {
        self.as_numbers()
            .map(|items| ratio_reduce(&items, DEFAULT_RATIO_PRECISION))
            .unwrap_or(0.0)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One decoded tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Raw value as stored in the file
    pub value: TagValue,

    /// Human-readable rendering of the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    /// Create a tag with a value and description.
    pub fn new(value: impl Into<TagValue>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: Some(description.into()),
        }
    }

    /// Create a tag that has no description.
    pub fn value_only(value: impl Into<TagValue>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }
}

/// The tags the derivation pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownTag {
    Make,
    Model,
    Lens,
    LensModel,
    FocalLength,
    FocalLengthIn35mmFilm,
    FNumber,
    FieldOfView,
    ExposureTime,
    ExposureProgram,
    DateTime,
    DateTimeOriginal,
    DateTimeDigitized,
    Orientation,
    ImageWidth,
    ImageHeight,
    GpsLatitude,
    GpsLatitudeRef,
    GpsLongitude,
    GpsLongitudeRef,
    GpsAltitude,
    GpsAltitudeRef,
    GpsImgDirection,
    GpsSpeed,
    GpsSpeedRef,
    GpsHPositioningError,
}

impl KnownTag {
    /// Tag name as spelled in a [`TagMap`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Model => "Model",
            Self::Lens => "Lens",
            Self::LensModel => "LensModel",
            Self::FocalLength => "FocalLength",
            Self::FocalLengthIn35mmFilm => "FocalLengthIn35mmFilm",
            Self::FNumber => "FNumber",
            Self::FieldOfView => "FieldOfView",
            Self::ExposureTime => "ExposureTime",
            Self::ExposureProgram => "ExposureProgram",
            Self::DateTime => "DateTime",
            Self::DateTimeOriginal => "DateTimeOriginal",
            Self::DateTimeDigitized => "DateTimeDigitized",
            Self::Orientation => "Orientation",
            Self::ImageWidth => "Image Width",
            Self::ImageHeight => "Image Height",
            Self::GpsLatitude => "GPSLatitude",
            Self::GpsLatitudeRef => "GPSLatitudeRef",
            Self::GpsLongitude => "GPSLongitude",
            Self::GpsLongitudeRef => "GPSLongitudeRef",
            Self::GpsAltitude => "GPSAltitude",
            Self::GpsAltitudeRef => "GPSAltitudeRef",
            Self::GpsImgDirection => "GPSImgDirection",
            Self::GpsSpeed => "GPSSpeed",
            Self::GpsSpeedRef => "GPSSpeedRef",
            Self::GpsHPositioningError => "GPSHPositioningError",
        }
    }
}

/// Typed read access to a [`TagMap`].
///
/// Every getter returns `None` when the tag is absent, so extractors never
/// need to distinguish "missing" from "unusable".
#[derive(Debug, Clone, Copy)]
pub struct TagAccessor<'a> {
    tags: &'a TagMap,
}

impl<'a> TagAccessor<'a> {
    pub fn new(tags: &'a TagMap) -> Self {
        Self { tags }
    }

    /// Whether the tag is present at all.
    pub fn contains(&self, tag: KnownTag) -> bool {
        self.tags.contains_key(tag.name())
    }

    /// Raw value of a tag.
    pub fn value(&self, tag: KnownTag) -> Option<&'a TagValue> {
        self.tags.get(tag.name()).map(|t| &t.value)
    }

    /// Description of a tag.
    pub fn description(&self, tag: KnownTag) -> Option<&'a str> {
        self.tags.get(tag.name())?.description.as_deref()
    }

    /// Raw value passed through a transform.
    pub fn value_with<V>(
        &self,
        tag: KnownTag,
        transform: impl FnOnce(&'a TagValue) -> Option<V>,
    ) -> Option<V> {
        self.value(tag).and_then(transform)
    }

    /// Description passed through a transform.
    pub fn description_with<V>(
        &self,
        tag: KnownTag,
        transform: impl FnOnce(&'a str) -> Option<V>,
    ) -> Option<V> {
        self.description(tag).and_then(transform)
    }
}

/// Decodes a photo file into named tags.
///
/// This is the only suspension point of the derivation; implementations
/// may fail, and callers in this crate degrade a failure to an empty tag set.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Decode all tags from the file at `path`.
    async fn load(&self, path: &Path) -> TagSourceResult<TagMap>;
}

#[async_trait]
impl<T: TagSource + ?Sized> TagSource for Box<T> {
    async fn load(&self, path: &Path) -> TagSourceResult<TagMap> {
        (**self).load(path).await
    }
}

#[async_trait]
impl<T: TagSource + ?Sized> TagSource for std::sync::Arc<T> {
    async fn load(&self, path: &Path) -> TagSourceResult<TagMap> {
        (**self).load(path).await
    }
}

/// A tag source that ignores the path and returns fixed tags.
#[derive(Debug, Clone)]
pub struct MemoryTagSource {
    tags: Option<TagMap>,
}

impl MemoryTagSource {
    /// Always return `tags`.
    pub fn new(tags: TagMap) -> Self {
        Self { tags: Some(tags) }
    }

    /// Always fail with a decode error.
    pub fn failing() -> Self {
        Self { tags: None }
    }
}

#[async_trait]
impl TagSource for MemoryTagSource {
    async fn load(&self, path: &Path) -> TagSourceResult<TagMap> {
        self.tags.clone().ok_or_else(|| TagSourceError::Decode {
            path: path.to_path_buf(),
            message: "no tags available".to_string(),
        })
    }
}
