//! Materializes clean, isolated working directories from fixture
//! templates.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{Error, Result};

/// Prepares one workspace per fixture name under a shared work root.
///
/// Fixture templates under the projects root are read-only from this
/// component's perspective and are never mutated. Concurrent callers
/// must use distinct fixture names; the workspace path is owned
/// exclusively by the run that prepared it.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    work_root: PathBuf,
    projects_root: PathBuf,
}

impl WorkspaceManager {
    /// Create a manager over a work root and a fixture template root.
    #[must_use]
    pub fn new(work_root: PathBuf, projects_root: PathBuf) -> Self {
        Self {
            work_root,
            projects_root,
        }
    }

    /// The directory holding fixture templates.
    #[must_use]
    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    /// Resolve the workspace path for a fixture name.
    #[must_use]
    pub fn workspace_path(&self, fixture_name: &str) -> PathBuf {
        self.work_root.join(fixture_name)
    }

    /// Prepare a clean workspace for a fixture.
    ///
    /// Any prior contents at the workspace path are discarded
    /// unconditionally, then the fixture template is deep-copied in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkspaceCleanupFailed`] if stale contents
    /// cannot be removed (e.g. a file held open), and
    /// [`Error::FixtureCopyFailed`] if the template is missing or the
    /// copy fails.
    pub fn prepare(&self, fixture_name: &str) -> Result<PathBuf> {
        let workspace = self.workspace_path(fixture_name);

        if workspace.exists() {
            debug!(?workspace, "Discarding stale workspace");
            std::fs::remove_dir_all(&workspace)
                .map_err(|e| Error::workspace_cleanup_failed(&workspace, e.to_string()))?;
        }

        let template = self.projects_root.join(fixture_name);
        if !template.is_dir() {
            return Err(Error::fixture_copy_failed(
                fixture_name,
                format!("no fixture template at '{}'", template.display()),
            ));
        }

        copy_dir_recursive(&template, &workspace)
            .map_err(|e| Error::fixture_copy_failed(fixture_name, e.to_string()))?;

        info!(fixture = fixture_name, ?workspace, "Prepared workspace");
        Ok(workspace)
    }
}

/// Deep-copy a directory tree, preserving relative structure.
fn copy_dir_recursive(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
