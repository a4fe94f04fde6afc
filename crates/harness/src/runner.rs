//! Subprocess execution with file-redirected output capture.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::report::ExecutionReport;
use crate::{Error, Result, STDERR_CAPTURE, STDOUT_CAPTURE};

/// Runs a provisioned tool inside a prepared workspace.
///
/// Both output streams are redirected straight to capture files inside
/// the workspace rather than buffered in memory, so capture size is
/// unbounded by process memory and large outputs cannot deadlock the
/// run.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    deadline: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner that waits for the subprocess indefinitely.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a deadline after which the subprocess is killed and the run
    /// reports [`Error::ProcessTimedOut`] instead of hanging.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Launch `executable` with `args`, cwd set to `workspace`, and
    /// wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProcessLaunchFailed`] if the subprocess cannot
    /// be spawned at all, and [`Error::ProcessTimedOut`] if a deadline
    /// expires. A launched subprocess exiting non-zero is not an
    /// error; its status lands in the report.
    pub async fn run(
        &self,
        workspace: &Path,
        executable: &Path,
        args: &[&str],
    ) -> Result<ExecutionReport> {
        let stdout_path = workspace.join(STDOUT_CAPTURE);
        let stderr_path = workspace.join(STDERR_CAPTURE);
        let stdout_file = std::fs::File::create(&stdout_path)?;
        let stderr_file = std::fs::File::create(&stderr_path)?;

        debug!(?executable, ?args, ?workspace, "Spawning tool");

        let mut child = Command::new(executable)
            .args(args)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file))
            .stderr(Stdio::from(stderr_file))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::process_launch_failed(executable, e.to_string()))?;

        let status = match self.deadline {
            None => child.wait().await?,
            Some(deadline) => match timeout(deadline, child.wait()).await {
                Ok(waited) => waited?,
                Err(_) => {
                    warn!(?executable, ?deadline, "Deadline expired, killing subprocess");
                    child.start_kill().ok();
                    child.wait().await.ok();
                    return Err(Error::ProcessTimedOut(deadline));
                }
            },
        };

        let status = status_code(status);
        info!(?executable, status, "Tool exited");
        Ok(ExecutionReport::new(status, stdout_path, stderr_path))
    }
}

/// Collapse an exit status to an integer; unix signal terminations map
/// to the conventional `128 + signal`.
fn status_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_deadline() {
        assert!(ProcessRunner::new().deadline.is_none());
    }

    #[test]
    fn test_with_deadline() {
        let runner = ProcessRunner::new().with_deadline(Duration::from_secs(30));
        assert_eq!(runner.deadline, Some(Duration::from_secs(30)));
    }
}
