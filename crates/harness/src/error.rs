//! Error types for workspace preparation and process execution.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing a workspace or running a tool.
///
/// A non-zero subprocess exit status is *not* an error of this crate;
/// it is ordinary data in the [`crate::ExecutionReport`] and
/// interpreting it is the verification layer's job.
#[derive(Error, Debug)]
pub enum Error {
    /// A stale workspace could not be removed before preparation.
    #[error("Failed to clean workspace '{path}': {message}")]
    WorkspaceCleanupFailed {
        /// The workspace path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The fixture template could not be copied into the workspace.
    #[error("Failed to copy fixture '{fixture}': {message}")]
    FixtureCopyFailed {
        /// The fixture name.
        fixture: String,
        /// Error message.
        message: String,
    },

    /// The subprocess could not be launched at all (executable missing,
    /// not executable, OS-level spawn error). Distinct from a launched
    /// subprocess exiting non-zero.
    #[error("Failed to launch '{executable}': {message}")]
    ProcessLaunchFailed {
        /// The executable path.
        executable: PathBuf,
        /// Error message.
        message: String,
    },

    /// The subprocess outlived its deadline and was terminated.
    #[error("Process timed out after {0:?}")]
    ProcessTimedOut(Duration),

    /// A display name was blank or absent.
    #[error("Display name must not be blank")]
    BlankDisplayName,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a workspace cleanup error.
    #[must_use]
    pub fn workspace_cleanup_failed(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::WorkspaceCleanupFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a fixture copy error.
    #[must_use]
    pub fn fixture_copy_failed(fixture: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FixtureCopyFailed {
            fixture: fixture.into(),
            message: message.into(),
        }
    }

    /// Create a process launch error.
    #[must_use]
    pub fn process_launch_failed(
        executable: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::ProcessLaunchFailed {
            executable: executable.into(),
            message: message.into(),
        }
    }
}
