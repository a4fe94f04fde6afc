//! Isolated fixture workspaces and captured subprocess execution.
//!
//! A run proceeds in three steps:
//! 1. [`WorkspaceManager::prepare`] materializes a clean working
//!    directory from a read-only fixture template
//! 2. [`ProcessRunner::run`] launches the tool inside the workspace,
//!    with both output streams redirected to capture files
//! 3. The returned [`ExecutionReport`] hands exit status and capture
//!    paths to the verification layer
//!
//! The harness introduces no concurrency of its own. Callers running
//! fixtures in parallel must use distinct fixture names; two runs over
//! the same workspace path are not supported.

mod error;
mod node;
mod report;
mod runner;
mod workspace;

pub use error::{Error, Result};
pub use node::{TestNode, TestSource};
pub use report::ExecutionReport;
pub use runner::ProcessRunner;
pub use workspace::WorkspaceManager;

/// Well-known name of the stdout capture file inside a workspace.
pub const STDOUT_CAPTURE: &str = "stdout.txt";

/// Well-known name of the stderr capture file inside a workspace.
pub const STDERR_CAPTURE: &str = "stderr.txt";
