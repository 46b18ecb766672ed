//! Aggregation - wires the extractors together into the public views.

use std::path::Path;
use std::time::Instant;

use crate::config::ExtractionConfig;
use crate::mapping::{descriptions, group_by_category, group_for_display, map_tags};
use crate::tags::{KnownTag, TagAccessor, TagMap, TagSource};
use crate::types::{ComprehensivePhotoInfo, GroupedExifData, MappedExifData, PhotoInfo};

use super::{camera, geometry, gps, orientation};

/// Options for a single extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Attach the raw tags to the result
    pub include_original_tags: bool,
    /// Log the raw tags and the derived record at info level
    pub debug: bool,
}

impl From<&ExtractionConfig> for ExtractOptions {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            include_original_tags: config.include_original_tags,
            debug: config.debug,
        }
    }
}

/// Derive a [`PhotoInfo`] from decoded tags.
///
/// Never fails: every field that cannot be derived falls back to its
/// absent value.
pub fn derive_photo_info(tags: &TagMap, options: &ExtractOptions) -> PhotoInfo {
    let access = TagAccessor::new(tags);

    let gps_position = gps::extract_position(&access);
    let gps_accuracy = gps_position.map(|_| gps::grade_accuracy(gps::extract_gps_error(&access)));

    let focal_length = camera::extract_focal_length(&access);
    let focal_length_in_35mm = camera::extract_focal_length_in_35mm(&access);
    let (lens, front_camera) = camera::extract_lens(&access);
    let (make, model) = camera::extract_camera(&access);
    let (exposure_time, exposure_program) = camera::extract_exposure(&access);

    let (raw_width, raw_height) = orientation::extract_dimensions(&access);
    let dims = orientation::normalize(
        raw_width,
        raw_height,
        access.description(KnownTag::Orientation),
    );

    let aspect_ratio = geometry::infer_aspect_ratio(raw_width, raw_height);
    let fov = geometry::compute_field_of_view(
        camera::extract_exif_field_of_view(&access),
        focal_length,
        focal_length_in_35mm,
        aspect_ratio,
        dims.orientation,
    );

    let info = PhotoInfo {
        make,
        model,
        angle_of_view: fov.angle_of_view,
        effective_angle_of_view: fov.effective_angle_of_view,
        focal_length,
        focal_length_in_35mm,
        gps_position,
        gps_accuracy,
        gps_speed: gps::extract_speed(&access),
        bearing: gps::extract_bearing(&access),
        width: dims.width,
        height: dims.height,
        orientation: dims.orientation,
        front_camera,
        date_time: camera::extract_date_time(&access),
        exposure_time,
        exposure_program,
        f_number: camera::extract_f_number(&access),
        lens,
        original_tags: options.include_original_tags.then(|| tags.clone()),
    };

    if options.debug {
        tracing::info!(?tags, "Decoded tags");
        tracing::info!(?info, "Derived photo info");
    }

    info
}

/// Group tags by category, keyed by display name. Every category is present.
pub fn group_tags(tags: &TagMap) -> GroupedExifData {
    group_by_category(&descriptions(tags))
}

/// [`group_tags`] without the empty categories.
pub fn group_tags_for_display(tags: &TagMap) -> GroupedExifData {
    group_for_display(&descriptions(tags))
}

/// Runs a [`TagSource`] and derives the public views from its output.
///
/// None of the operations fail: a file the source cannot decode is logged
/// and treated as having no tags.
pub struct PhotoInfoProcessor<S> {
    source: S,
}

impl<S: TagSource> PhotoInfoProcessor<S> {
    /// Create a processor reading tags from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Load tags, degrading a failure to an empty tag set.
    pub async fn load_tags(&self, path: &Path) -> TagMap {
        let start = Instant::now();
        match self.source.load(path).await {
            Ok(tags) => {
                tracing::trace!("  Load tags: {:?} ({} tags)", start.elapsed(), tags.len());
                tags
            }
            Err(e) => {
                tracing::warn!("Failed to read tags from {:?}: {}", path, e);
                TagMap::new()
            }
        }
    }

    /// Derive the display-ready record for one photo.
    pub async fn photo_info(&self, path: &Path, options: &ExtractOptions) -> PhotoInfo {
        let start = Instant::now();
        tracing::debug!("Extracting: {:?}", path);

        let tags = self.load_tags(path).await;
        let info = derive_photo_info(&tags, options);

        tracing::debug!(
            "Extracted {:?} in {:?} ({}x{}, {})",
            path,
            start.elapsed(),
            info.width,
            info.height,
            info.orientation
        );
        info
    }

    /// Mapped tags with display names and formatted values.
    pub async fn mapped_photo_info(&self, path: &Path) -> MappedExifData {
        let tags = self.load_tags(path).await;
        map_tags(&tags)
    }

    /// Tags grouped by category for display; all eight categories are keyed.
    pub async fn grouped_photo_info(&self, path: &Path) -> GroupedExifData {
        let tags = self.load_tags(path).await;
        group_tags(&tags)
    }

    /// All three views, derived concurrently from independent loads.
    ///
    /// The record always carries its raw tags, and the grouped view leaves
    /// out empty categories.
    pub async fn comprehensive_photo_info(
        &self,
        path: &Path,
        options: &ExtractOptions,
    ) -> ComprehensivePhotoInfo {
        let options = ExtractOptions {
            include_original_tags: true,
            ..*options
        };
        let (original, mapped, grouped) = tokio::join!(
            self.photo_info(path, &options),
            self.mapped_photo_info(path),
            async { group_tags_for_display(&self.load_tags(path).await) },
        );
        ComprehensivePhotoInfo {
            original,
            mapped,
            grouped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{MemoryTagSource, Tag, TagValue};
    use crate::types::{ExifCategory, GpsAccuracyGrade, Orientation};

    fn iphone_tags() -> TagMap {
        let mut tags = TagMap::new();
        tags.insert("Make".into(), Tag::new("Apple", "Apple"));
        tags.insert("Model".into(), Tag::new("iPhone 15 Pro", "iPhone 15 Pro"));
        tags.insert(
            "FocalLength".into(),
            Tag::new(TagValue::rational(222.0, 100.0), "2.22 mm"),
        );
        tags.insert("FocalLengthIn35mmFilm".into(), Tag::new(14.0, "14"));
        tags.insert("Image Width".into(), Tag::new(4032.0, "4032px"));
        tags.insert("Image Height".into(), Tag::new(3024.0, "3024px"));
        tags.insert("Orientation".into(), Tag::new(1.0, "top-left"));
        tags.insert(
            "GPSLatitude".into(),
            Tag::new(TagValue::List(vec![]), "51.504236111"),
        );
        tags.insert(
            "GPSLatitudeRef".into(),
            Tag::new(TagValue::List(vec!["N".into()]), "North latitude"),
        );
        tags.insert(
            "GPSLongitude".into(),
            Tag::new(TagValue::List(vec![]), "0.046530555"),
        );
        tags.insert(
            "GPSLongitudeRef".into(),
            Tag::new(TagValue::List(vec!["E".into()]), "East longitude"),
        );
        tags.insert(
            "GPSHPositioningError".into(),
            Tag::new(TagValue::rational(35.0, 1.0), "35 m"),
        );
        tags
    }

    #[test]
    fn test_derive_photo_info() {
        let info = derive_photo_info(&iphone_tags(), &ExtractOptions::default());

        assert_eq!(info.make.as_deref(), Some("Apple"));
        assert_eq!(info.angle_of_view, Some(104.25));
        assert_eq!(info.effective_angle_of_view, Some(104.25));
        assert_eq!(info.focal_length, Some(2.22));
        assert_eq!(info.orientation, Orientation::Landscape);
        assert_eq!((info.width, info.height), (4032, 3024));

        let accuracy = info.gps_accuracy.unwrap();
        assert_eq!(accuracy.grade, GpsAccuracyGrade::D);
        assert_eq!(accuracy.error, 35.0);
        assert!(info.original_tags.is_none());
    }

    #[test]
    fn test_accuracy_requires_position() {
        let mut tags = iphone_tags();
        tags.remove("GPSLatitude");
        let info = derive_photo_info(&tags, &ExtractOptions::default());
        assert!(info.gps_position.is_none());
        assert!(info.gps_accuracy.is_none());
    }

    #[test]
    fn test_empty_tags_degrade_to_defaults() {
        let info = derive_photo_info(&TagMap::new(), &ExtractOptions::default());
        assert_eq!(info, PhotoInfo::default());
    }

    #[test]
    fn test_include_original_tags() {
        let options = ExtractOptions {
            include_original_tags: true,
            debug: true,
        };
        let info = derive_photo_info(&iphone_tags(), &options);
        assert_eq!(info.original_tags.unwrap().len(), iphone_tags().len());
    }

    #[tokio::test]
    async fn test_decode_failure_yields_default_record() {
        let processor = PhotoInfoProcessor::new(MemoryTagSource::failing());
        let path = Path::new("broken.jpg");

        let info = processor.photo_info(path, &ExtractOptions::default()).await;
        assert_eq!(info, PhotoInfo::default());
        assert!(processor.mapped_photo_info(path).await.is_empty());

        let grouped = processor.grouped_photo_info(path).await;
        assert_eq!(grouped.len(), 8);
        assert!(grouped.values().all(|group| group.is_empty()));

        let result = processor
            .comprehensive_photo_info(path, &ExtractOptions::default())
            .await;
        assert!(result.grouped.is_empty());
    }

    #[tokio::test]
    async fn test_grouped_view_keeps_empty_categories() {
        let mut tags = TagMap::new();
        tags.insert("Make".into(), Tag::new("Apple", "Apple"));
        let processor = PhotoInfoProcessor::new(MemoryTagSource::new(tags));

        let grouped = processor.grouped_photo_info(Path::new("photo.jpg")).await;
        assert_eq!(grouped.len(), 8);
        assert_eq!(grouped[&ExifCategory::Camera]["Camera Make"], "Apple");
        assert!(grouped[&ExifCategory::Gps].is_empty());
    }

    #[tokio::test]
    async fn test_comprehensive_photo_info() {
        let processor = PhotoInfoProcessor::new(MemoryTagSource::new(iphone_tags()));
        let result = processor
            .comprehensive_photo_info(Path::new("photo.jpg"), &ExtractOptions::default())
            .await;

        assert!(result.original.original_tags.is_some());
        assert_eq!(result.mapped["Make"].display_name, "Camera Make");
        assert_eq!(
            result.grouped[&ExifCategory::Lens]["Focal Length"],
            "2.22 mm"
        );
        assert!(!result.grouped.contains_key(&ExifCategory::Vendor));
    }
}
