//! Immutable result record of one tool run.

use std::path::{Path, PathBuf};

/// Captured outcome of a single subprocess run.
///
/// Produced exactly once per run and never re-read or mutated by the
/// harness afterwards. The verification layer re-reads the capture
/// files independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    status: i32,
    stdout: PathBuf,
    stderr: PathBuf,
}

impl ExecutionReport {
    pub(crate) fn new(status: i32, stdout: PathBuf, stderr: PathBuf) -> Self {
        Self {
            status,
            stdout,
            stderr,
        }
    }

    /// Exit status of the subprocess.
    ///
    /// On unix a signal-terminated subprocess reports `128 + signal`.
    #[must_use]
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Path of the stdout capture file.
    #[must_use]
    pub fn stdout(&self) -> &Path {
        &self.stdout
    }

    /// Path of the stderr capture file.
    #[must_use]
    pub fn stderr(&self) -> &Path {
        &self.stderr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access() {
        let report = ExecutionReport::new(
            1,
            PathBuf::from("/ws/stdout.txt"),
            PathBuf::from("/ws/stderr.txt"),
        );
        assert_eq!(report.status(), 1);
        assert_eq!(report.stdout(), Path::new("/ws/stdout.txt"));
        assert_eq!(report.stderr(), Path::new("/ws/stderr.txt"));
    }

    #[test]
    fn test_equality() {
        let a = ExecutionReport::new(0, PathBuf::from("out"), PathBuf::from("err"));
        let b = ExecutionReport::new(0, PathBuf::from("out"), PathBuf::from("err"));
        let c = ExecutionReport::new(1, PathBuf::from("out"), PathBuf::from("err"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
