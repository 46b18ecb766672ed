//! Photo discovery over files and directory trees.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Finds photo files by extension.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

/// A photo found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl FileDiscovery {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Find supported photos at `path`.
    ///
    /// A file is returned as-is when its extension is supported. A directory
    /// is walked recursively. Results are sorted by path.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredFile> {
        if path.is_file() {
            return self.entry(path).into_iter().collect();
        }

        let mut files: Vec<DiscoveredFile> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| self.entry(e.path()))
            .collect();

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Discover across several inputs, keeping input order and dropping
    /// duplicates.
    pub fn discover_all(&self, paths: &[PathBuf]) -> Vec<DiscoveredFile> {
        let mut seen = std::collections::HashSet::new();
        paths
            .iter()
            .flat_map(|p| self.discover(p))
            .filter(|f| seen.insert(f.path.clone()))
            .collect()
    }

    fn entry(&self, path: &Path) -> Option<DiscoveredFile> {
        if !self.is_supported(path) {
            return None;
        }
        let meta = std::fs::metadata(path).ok()?;
        Some(DiscoveredFile {
            path: path.to_path_buf(),
            size: meta.len(),
        })
    }

    /// Whether the extension is one of `supported_formats` (case-insensitive).
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
    }

    /// Total size of the discovered files in bytes.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}
