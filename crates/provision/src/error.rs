//! Error types for tool provisioning.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for provisioning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while provisioning a tool.
///
/// All variants are terminal to the run that triggered them; the
/// provisioner never retries internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Downloading the tool archive failed (network error, non-2xx
    /// response, truncated transfer).
    #[error("Failed to download '{uri}': {message}")]
    DownloadFailed {
        /// The download URI.
        uri: String,
        /// Error message.
        message: String,
    },

    /// The archive could not be listed, or its layout does not match
    /// the expected single top-level directory.
    #[error("Unreadable archive '{archive}': {message}")]
    ArchiveUnreadable {
        /// Path to the offending archive.
        archive: PathBuf,
        /// Error message.
        message: String,
    },

    /// Extracting the archive failed partway through.
    #[error("Failed to extract '{archive}': {message}")]
    ExtractionFailed {
        /// Path to the offending archive.
        archive: PathBuf,
        /// Error message.
        message: String,
    },

    /// The descriptor's executable path does not exist in the
    /// extracted tree.
    #[error("Executable not found at '{0}'")]
    ExecutableNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a download failed error.
    #[must_use]
    pub fn download_failed(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create an archive unreadable error.
    #[must_use]
    pub fn archive_unreadable(archive: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ArchiveUnreadable {
            archive: archive.into(),
            message: message.into(),
        }
    }

    /// Create an extraction failed error.
    #[must_use]
    pub fn extraction_failed(archive: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            archive: archive.into(),
            message: message.into(),
        }
    }

    /// Create an executable not found error.
    #[must_use]
    pub fn executable_not_found(path: &Path) -> Self {
        Self::ExecutableNotFound(path.to_path_buf())
    }
}
