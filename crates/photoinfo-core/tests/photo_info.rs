//! End-to-end derivation over JSON tag dumps.

use std::path::{Path, PathBuf};

use photoinfo_core::{
    ExifCategory, ExifTagSource, ExtractOptions, GpsAccuracyGrade, JsonTagSource, Orientation,
    PhotoInfo, PhotoInfoProcessor, Position,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn processor() -> PhotoInfoProcessor<JsonTagSource> {
    PhotoInfoProcessor::new(JsonTagSource::new())
}

async fn photo_info(name: &str) -> PhotoInfo {
    processor()
        .photo_info(&fixture(name), &ExtractOptions::default())
        .await
}

#[tokio::test]
async fn test_iphone_ultra_wide_landscape() {
    let info = photo_info("iphone_landscape.json").await;

    assert_eq!(info.make.as_deref(), Some("Apple"));
    assert_eq!(info.model.as_deref(), Some("iPhone 15 Pro"));
    assert_eq!(info.focal_length, Some(2.22));
    assert_eq!(info.focal_length_in_35mm, Some(14.0));
    assert_eq!(info.angle_of_view, Some(104.25));
    assert_eq!(info.effective_angle_of_view, Some(104.25));
    assert_eq!(info.orientation, Orientation::Landscape);
    assert_eq!((info.width, info.height), (4032, 3024));
    assert_eq!(
        info.gps_position,
        Some(Position {
            latitude: 51.5042361,
            longitude: 0.0465306,
            altitude: Some(6.49),
        })
    );

    let accuracy = info.gps_accuracy.unwrap();
    assert_eq!(accuracy.grade, GpsAccuracyGrade::A);
    assert_eq!(accuracy.error, 3.54);
    assert_eq!(accuracy.description, "Excellent - Strong satellite fix");

    let speed = info.gps_speed.unwrap();
    assert_eq!(speed.value, 0.0);
    assert_eq!(speed.unit, "km/h");
    assert_eq!(info.bearing, Some(271.61));
    assert_eq!(info.date_time.as_deref(), Some("2023-10-13T10:48:38"));
    assert_eq!(info.exposure_time.as_deref(), Some("1/120"));
    assert_eq!(info.exposure_program.as_deref(), Some("Normal program"));
    assert_eq!(info.f_number.as_deref(), Some("f/2.2"));
    assert_eq!(
        info.lens.as_deref(),
        Some("iPhone 15 Pro back triple camera 2.22mm f/2.2")
    );
    assert!(!info.front_camera);
}

#[tokio::test]
async fn test_rotated_portrait_in_southern_western_hemisphere() {
    let info = photo_info("iphone_x_portrait.json").await;

    assert_eq!(info.orientation, Orientation::Portrait);
    assert_eq!((info.width, info.height), (3024, 4032));
    assert_eq!(info.angle_of_view, Some(65.4705));
    assert_eq!(info.effective_angle_of_view, Some(46.3972));

    let position = info.gps_position.unwrap();
    assert_eq!(position.latitude, -22.9517528);
    assert_eq!(position.longitude, -43.2105194);
    assert_eq!(position.altitude, None);

    let accuracy = info.gps_accuracy.unwrap();
    assert_eq!(accuracy.grade, GpsAccuracyGrade::A);
    assert_eq!(accuracy.error, 0.0);
    assert_eq!(
        accuracy.description,
        "Excellent - No positioning error reported"
    );

    let speed = info.gps_speed.unwrap();
    assert_eq!((speed.value, speed.unit.as_str()), (3.5, "mph"));
    assert_eq!(info.date_time.as_deref(), Some("2019-07-04T18:22:05"));
    assert_eq!(info.f_number.as_deref(), Some("f/1.8"));
    assert_eq!(
        info.lens.as_deref(),
        Some("iPhone X back dual camera 4mm f/1.8")
    );
}

#[tokio::test]
async fn test_full_frame_uses_sensor_geometry() {
    let info = photo_info("dslr_below_sea_level.json").await;

    assert_eq!(info.angle_of_view, Some(39.5978));
    assert_eq!(info.effective_angle_of_view, Some(39.5978));
    assert_eq!(
        info.gps_position,
        Some(Position {
            latitude: 31.5,
            longitude: 35.5,
            altitude: Some(-430.0),
        })
    );
    assert_eq!(info.gps_accuracy.unwrap().grade, GpsAccuracyGrade::D);
    assert!(info.gps_speed.is_none());
    assert!(info.bearing.is_none());
    assert_eq!(info.date_time.as_deref(), Some("2022-03-01T07:15:00"));
}

#[tokio::test]
async fn test_reported_field_of_view_wins() {
    let info = photo_info("exif_fov_portrait.json").await;

    assert_eq!(info.orientation, Orientation::Portrait);
    assert_eq!(info.angle_of_view, Some(65.5));
    assert_eq!(info.effective_angle_of_view, Some(51.5068));
    assert!(info.gps_position.is_none());
    assert!(info.gps_accuracy.is_none());
}

#[tokio::test]
async fn test_undecodable_file_degrades_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_photo.jpg");
    std::fs::write(&path, b"definitely not a jpeg").unwrap();

    let processor = PhotoInfoProcessor::new(ExifTagSource::new());
    let info = processor
        .photo_info(&path, &ExtractOptions::default())
        .await;
    assert_eq!(info, PhotoInfo::default());

    let missing = processor
        .photo_info(&dir.path().join("missing.jpg"), &ExtractOptions::default())
        .await;
    assert_eq!(missing, PhotoInfo::default());
}

#[tokio::test]
async fn test_mapped_view() {
    let mapped = processor()
        .mapped_photo_info(&fixture("iphone_landscape.json"))
        .await;

    assert_eq!(mapped["FNumber"].display_name, "Aperture");
    assert_eq!(mapped["FNumber"].formatted_value, "f/2.2");
    assert_eq!(mapped["FocalLength"].formatted_value, "2.22 mm");
    assert_eq!(mapped["XResolution"].formatted_value, "72 dpi");
    assert_eq!(mapped["Lens"].display_name, "Lens Info");
    assert!(!mapped.contains_key("GPSLatitudeRef"));
    assert!(!mapped.contains_key("MakerNote"));
}

#[tokio::test]
async fn test_grouped_view_keeps_every_category() {
    let grouped = processor()
        .grouped_photo_info(&fixture("exif_fov_portrait.json"))
        .await;

    assert_eq!(grouped.len(), 8);
    assert_eq!(grouped[&ExifCategory::Camera]["Camera Make"], "Google");
    assert_eq!(grouped[&ExifCategory::Advanced]["Field of View"], "65.5 °");
    assert_eq!(grouped[&ExifCategory::Image]["Width"], "3024px");
    assert!(grouped[&ExifCategory::Gps].is_empty());
    assert!(grouped[&ExifCategory::Vendor].is_empty());
}

#[tokio::test]
async fn test_comprehensive_view_prunes_empty_categories() {
    let result = processor()
        .comprehensive_photo_info(
            &fixture("exif_fov_portrait.json"),
            &ExtractOptions::default(),
        )
        .await;

    assert!(result.grouped.contains_key(&ExifCategory::Camera));
    assert!(!result.grouped.contains_key(&ExifCategory::Gps));
    assert!(!result.grouped.contains_key(&ExifCategory::Vendor));
}

#[tokio::test]
async fn test_comprehensive_view() {
    let result = processor()
        .comprehensive_photo_info(
            &fixture("iphone_landscape.json"),
            &ExtractOptions::default(),
        )
        .await;

    let original_tags = result.original.original_tags.as_ref().unwrap();
    assert!(original_tags.contains_key("GPSLatitudeRef"));
    assert_eq!(result.original.angle_of_view, Some(104.25));
    assert_eq!(result.mapped["Make"].formatted_value, "Apple");
    assert_eq!(result.grouped[&ExifCategory::Vendor].len(), 1);
    assert_eq!(result.grouped[&ExifCategory::Gps]["Altitude"], "6.49 m");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["original"]["orientation"], "landscape");
    assert_eq!(
        json["original"]["gps_position"],
        serde_json::json!([51.5042361, 0.0465306, 6.49])
    );
    assert_eq!(json["grouped"]["camera"]["Camera Model"], "iPhone 15 Pro");
}

#[tokio::test]
async fn test_comprehensive_view_of_missing_file() {
    let result = processor()
        .comprehensive_photo_info(&fixture("missing.json"), &ExtractOptions::default())
        .await;

    assert_eq!(result.original.original_tags.as_ref().map(|t| t.len()), Some(0));
    assert!(result.mapped.is_empty());
    assert!(result.grouped.is_empty());
}
