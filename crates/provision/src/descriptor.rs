//! Naming rules for the supported external build tools.
//!
//! A descriptor is pure knowledge: how an archive is named, where it is
//! downloaded from, and where the launcher script lives inside the
//! extracted tree. Templates expand `{version}` and perform no I/O.

use std::fmt;
use std::path::PathBuf;

use crate::platform::executable_suffix;

/// Enumerated identity of one external build tool family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// The Gradle build tool.
    Gradle,
    /// Apache Ant.
    Ant,
}

impl ToolKind {
    /// Get the naming rules for this tool kind.
    #[must_use]
    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::for_kind(self)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradle => write!(f, "gradle"),
            Self::Ant => write!(f, "ant"),
        }
    }
}

/// Immutable naming rules for locating and launching one tool kind at a
/// given version.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    kind: ToolKind,
    archive_template: &'static str,
    uri_template: &'static str,
    executable: &'static str,
}

impl ToolDescriptor {
    /// Get the descriptor for a tool kind.
    #[must_use]
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Gradle => Self {
                kind,
                archive_template: "gradle-{version}-bin.zip",
                uri_template: "https://services.gradle.org/distributions/gradle-{version}-bin.zip",
                executable: "bin/gradle",
            },
            ToolKind::Ant => Self {
                kind,
                archive_template: "apache-ant-{version}-bin.zip",
                uri_template: "https://archive.apache.org/dist/ant/binaries/apache-ant-{version}-bin.zip",
                executable: "bin/ant",
            },
        }
    }

    /// The tool kind this descriptor names.
    #[must_use]
    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    /// Archive file name for a version.
    ///
    /// The version string is passed through unvalidated; validation is
    /// the caller's responsibility.
    #[must_use]
    pub fn archive_name(&self, version: &str) -> String {
        self.archive_template.replace("{version}", version)
    }

    /// Download URI for a version.
    #[must_use]
    pub fn download_uri(&self, version: &str) -> String {
        self.uri_template.replace("{version}", version)
    }

    /// Launcher path relative to the extracted tool directory, with the
    /// host-appropriate suffix applied.
    #[must_use]
    pub fn executable_relative_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", self.executable, executable_suffix()))
    }
}
