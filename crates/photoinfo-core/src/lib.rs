//! photoinfo core - photo metadata derivation library.
//!
//! Turns the EXIF tags embedded in a photo into a display-ready record:
//! angle of view (orientation-aware), GPS position with an accuracy grade,
//! orientation with corrected dimensions, and categorized human-readable
//! tags. Built for map applications that plot photos as field-of-view
//! markers.
//!
//! # Architecture
//!
//! ```text
//! Photo → TagSource (decode) → TagMap → derive (gps, geometry, orientation, camera)
//!                                     │    → PhotoInfo
//!                                     └→ mapping (display names, categories)
//!                                          → mapped / grouped views
//! ```
//!
//! Decoding is the only fallible, asynchronous step. A file that cannot be
//! decoded produces a record with every field absent rather than an error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use photoinfo_core::{ExifTagSource, ExtractOptions, PhotoInfoProcessor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let processor = PhotoInfoProcessor::new(ExifTagSource::new());
//!     let info = processor
//!         .photo_info("./IMG_0001.jpg".as_ref(), &ExtractOptions::default())
//!         .await;
//!     println!("FOV: {:?}", info.effective_angle_of_view);
//! }
//! ```

pub mod config;
pub mod error;
pub mod mapping;
pub mod math;
pub mod output;
pub mod pipeline;
pub mod tags;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, PhotoInfoError, Result, TagSourceError, TagSourceResult};
pub use mapping::{group_by_category, group_for_display, map_tags};
pub use math::ratio_reduce;
pub use output::{OutputFormat, OutputWriter, PhotoReport};
pub use pipeline::{
    derive_photo_info, group_tags, group_tags_for_display, DiscoveredFile, ExtractOptions,
    FileDiscovery, PhotoInfoProcessor,
};
pub use tags::{
    ExifTagSource, JsonTagSource, KnownTag, MemoryTagSource, Tag, TagAccessor, TagMap,
    TagSource, TagValue,
};
pub use types::{
    ComprehensivePhotoInfo, ExifCategory, GpsAccuracy, GpsAccuracyGrade,
    GpsSpeed, GroupedExifData, MappedExifData, MappedTag, Orientation, PhotoInfo, Position,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
