//! Metadata derivation pipeline.
//!
//! Each stage reads a decoded tag set through a
//! [`TagAccessor`](crate::tags::TagAccessor) and derives part of the
//! [`PhotoInfo`](crate::types::PhotoInfo) record:
//! - **gps**: position, speed, bearing and accuracy grade
//! - **geometry**: sensor size, crop factor and angle of view
//! - **orientation**: landscape/portrait/square and dimension correction
//! - **camera**: make, model, lens, exposure and capture time
//! - **processor**: runs the stages and assembles the public views
//! - **discovery**: finds photo files in directories

pub mod camera;
pub mod discovery;
pub mod geometry;
pub mod gps;
pub mod orientation;
pub mod processor;

pub use discovery::{DiscoveredFile, FileDiscovery};
pub use processor::{
    derive_photo_info, group_tags, group_tags_for_display, ExtractOptions, PhotoInfoProcessor,
};
