//! Orchestrates cache-check, download, extraction and executable lookup.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::archive;
use crate::cache::ToolCache;
use crate::descriptor::ToolKind;
use crate::platform::executable_suffix;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};

/// Provisions versioned external build tools on demand, idempotently.
///
/// Warm calls for an already-installed (kind, version) perform only
/// existence checks: no network, no extraction. Concurrent callers are
/// safe against each other because downloads and installs are staged
/// under temporary names and renamed into place; a caller that loses
/// the rename race simply uses the winner's result.
pub struct ToolProvisioner {
    cache: ToolCache,
    transport: Box<dyn Transport>,
    project_root: PathBuf,
}

impl ToolProvisioner {
    /// Create a provisioner over an HTTP transport.
    ///
    /// `project_root` is the sibling project directory holding the
    /// `gradlew` wrapper used by the trivial-resolution case.
    #[must_use]
    pub fn new(cache_root: PathBuf, project_root: PathBuf) -> Self {
        Self::with_transport(cache_root, project_root, Box::new(HttpTransport::new()))
    }

    /// Create a provisioner with a custom transport.
    #[must_use]
    pub fn with_transport(
        cache_root: PathBuf,
        project_root: PathBuf,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            cache: ToolCache::new(cache_root),
            transport,
            project_root,
        }
    }

    /// The cache this provisioner installs into.
    #[must_use]
    pub fn cache(&self) -> &ToolCache {
        &self.cache
    }

    /// Provision a tool at a version, returning the absolute path of
    /// its executable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DownloadFailed`], [`Error::ArchiveUnreadable`],
    /// [`Error::ExtractionFailed`] or [`Error::ExecutableNotFound`];
    /// each is fatal to the calling run and never retried here.
    pub async fn provision(&self, kind: ToolKind, version: &str) -> Result<PathBuf> {
        // Trivial case: the Gradle wrapper from the sibling project,
        // short-circuiting before any cache or download logic.
        if kind == ToolKind::Gradle && version.is_empty() {
            let wrapper = self
                .project_root
                .join(format!("gradlew{}", executable_suffix()));
            debug!(?wrapper, "Resolved wrapper without cache");
            return Ok(std::path::absolute(wrapper)?);
        }

        info!(%kind, version, "Provisioning tool");
        let descriptor = kind.descriptor();
        self.cache.ensure_root()?;

        // Download the archive if absent, staged then renamed so a
        // concurrent download never leaves a truncated archive behind.
        let archive_name = descriptor.archive_name(version);
        let archive_path = self.cache.archive_path(&descriptor, version);
        if archive_path.exists() {
            debug!(?archive_path, "Archive already cached");
        } else {
            let staging = self.cache.staging_path(&archive_name);
            let fetched = self
                .transport
                .fetch(&descriptor.download_uri(version), &staging)
                .await;
            if let Err(e) = fetched {
                let _ = std::fs::remove_file(&staging);
                return Err(e);
            }
            commit_staged(&staging, &archive_path)?;
        }

        // Discover the extracted directory's name from the archive's
        // own top-level entry, then install atomically if absent.
        let top_level = archive::top_level_dir(&archive_path)?;
        let install_dir = self.cache.install_dir(&top_level);
        if install_dir.exists() {
            debug!(?install_dir, "Tool already extracted");
        } else {
            self.install(&archive_path, &top_level, &install_dir)?;
        }

        let executable = install_dir.join(descriptor.executable_relative_path());
        if !executable.exists() {
            return Err(Error::executable_not_found(&executable));
        }
        Ok(std::path::absolute(executable)?)
    }

    /// Extract `archive_path` to a staging directory and rename the
    /// extracted tree into place.
    fn install(&self, archive_path: &Path, top_level: &str, install_dir: &Path) -> Result<()> {
        let staging = self.cache.staging_path(top_level);
        if staging.exists() {
            std::fs::remove_dir_all(&staging)?;
        }

        if let Err(e) = archive::extract(archive_path, &staging) {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(e);
        }

        let extracted = staging.join(top_level);
        if !extracted.exists() {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(Error::extraction_failed(
                archive_path,
                format!("archive did not produce '{top_level}'"),
            ));
        }

        if let Err(e) = std::fs::rename(&extracted, install_dir) {
            // A concurrent provisioner may have won the race; its fully
            // renamed tree is just as good as ours.
            if !install_dir.exists() {
                let _ = std::fs::remove_dir_all(&staging);
                return Err(Error::extraction_failed(archive_path, e.to_string()));
            }
        }
        let _ = std::fs::remove_dir_all(&staging);

        info!(?install_dir, "Installed tool");
        Ok(())
    }
}

/// Rename a staged download into its final cache location.
fn commit_staged(staging: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = std::fs::rename(staging, dest) {
        // Lost a concurrent download race: keep the winner's archive.
        if dest.exists() {
            let _ = std::fs::remove_file(staging);
        } else {
            return Err(e.into());
        }
    }
    Ok(())
}
