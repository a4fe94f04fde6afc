//! On-disk cache of downloaded archives and extracted tool trees.
//!
//! The cache root is an explicit, injected value so tests can use a
//! disposable temporary root. Entries are written at most once per
//! (kind, version) and never deleted by this crate; the cache is
//! append-only across process lifetimes.
//!
//! Structure:
//! ```text
//! <root>/
//! ├── gradle-4.7-bin.zip        # downloaded archives
//! └── gradle-4.7/               # extracted trees, named by the
//!                               # archive's own top-level entry
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Distinguishes staging paths created by concurrent callers within
/// one process; the process id separates callers across processes.
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

use crate::descriptor::ToolDescriptor;
use crate::Result;

/// On-disk store of downloaded archives and their extracted contents.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    /// Create a cache at the specified root directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the archive for a descriptor at a version.
    #[must_use]
    pub fn archive_path(&self, descriptor: &ToolDescriptor, version: &str) -> PathBuf {
        self.root.join(descriptor.archive_name(version))
    }

    /// Check whether the archive for a version is already downloaded.
    #[must_use]
    pub fn has_archive(&self, descriptor: &ToolDescriptor, version: &str) -> bool {
        let present = self.archive_path(descriptor, version).exists();
        trace!(kind = %descriptor.kind(), version, present, "Archive cache check");
        present
    }

    /// Path of the extracted tool directory, given the archive's
    /// top-level entry name.
    #[must_use]
    pub fn install_dir(&self, top_level: &str) -> PathBuf {
        self.root.join(top_level)
    }

    /// Staging path used while downloading or extracting, renamed into
    /// place on completion. Unique per call, so concurrent provisioners
    /// never share a staging path.
    #[must_use]
    pub fn staging_path(&self, name: &str) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!(".{name}.{}-{seq}.tmp", std::process::id()))
    }

    /// Ensure the cache root exists.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ToolKind;
    use tempfile::TempDir;

    #[test]
    fn test_archive_path() {
        let cache = ToolCache::new(PathBuf::from("/tmp/tools"));
        let descriptor = ToolKind::Gradle.descriptor();
        assert_eq!(
            cache.archive_path(&descriptor, "4.7"),
            PathBuf::from("/tmp/tools/gradle-4.7-bin.zip")
        );
    }

    #[test]
    fn test_install_dir() {
        let cache = ToolCache::new(PathBuf::from("/tmp/tools"));
        assert_eq!(cache.install_dir("gradle-4.7"), PathBuf::from("/tmp/tools/gradle-4.7"));
    }

    #[test]
    fn test_staging_path_is_hidden_and_tmp_suffixed() {
        let cache = ToolCache::new(PathBuf::from("/tmp/tools"));
        let staging = cache.staging_path("gradle-4.7");
        let name = staging.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with(".gradle-4.7."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn test_staging_paths_are_unique_per_call() {
        let cache = ToolCache::new(PathBuf::from("/tmp/tools"));
        assert_ne!(
            cache.staging_path("gradle-4.7"),
            cache.staging_path("gradle-4.7")
        );
    }

    #[test]
    fn test_has_archive_missing() {
        let temp = TempDir::new().unwrap();
        let cache = ToolCache::new(temp.path().to_path_buf());
        let descriptor = ToolKind::Ant.descriptor();
        assert!(!cache.has_archive(&descriptor, "1.10.3"));
    }

    #[test]
    fn test_has_archive_present() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = ToolCache::new(temp.path().to_path_buf());
        let descriptor = ToolKind::Ant.descriptor();
        std::fs::write(cache.archive_path(&descriptor, "1.10.3"), b"zip bytes")?;
        assert!(cache.has_archive(&descriptor, "1.10.3"));
        Ok(())
    }

    #[test]
    fn test_ensure_root() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = ToolCache::new(temp.path().join("nested").join("tools"));
        cache.ensure_root()?;
        assert!(cache.root().is_dir());
        Ok(())
    }
}
