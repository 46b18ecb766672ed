//! Tag source for pre-extracted JSON tag dumps.
//!
//! The dump is an object keyed by tag name whose entries carry `value` and
//! `description`, the shape browser-side EXIF readers emit. Entries that are
//! not tag objects (bare strings, nulls) are skipped.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

use super::{Tag, TagMap, TagSource};
use crate::error::{TagSourceError, TagSourceResult};

/// Reads tags from a JSON file instead of decoding the photo itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTagSource;

impl JsonTagSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse a tag dump from a JSON string.
    pub fn parse(content: &str, path: &Path) -> TagSourceResult<TagMap> {
        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(content).map_err(|source| TagSourceError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let tags: TagMap = raw
            .into_iter()
            .filter_map(|(name, entry)| {
                serde_json::from_value::<Tag>(entry)
                    .ok()
                    .map(|tag| (name, tag))
            })
            .collect();
        Ok(tags)
    }
}

#[async_trait]
impl TagSource for JsonTagSource {
    async fn load(&self, path: &Path) -> TagSourceResult<TagMap> {
        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                TagSourceError::NotFound(path.to_path_buf())
            } else {
                TagSourceError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(&content, path)
    }
}
