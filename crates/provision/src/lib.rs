//! On-demand provisioning of versioned external build tools.
//!
//! This crate turns a (tool kind, version) request into an absolute path
//! to a ready-to-run executable:
//! - Descriptors carry the pure naming rules for each supported tool
//! - Downloaded archives and extracted trees are cached under an
//!   injected cache root, append-only across process lifetimes
//! - Installs are atomic (stage-then-rename), so concurrent callers
//!   never observe a partially extracted tool
//!
//! # Example
//!
//! ```ignore
//! use toolchest_provision::{ToolKind, ToolProvisioner};
//!
//! let provisioner = ToolProvisioner::new(cache_root, project_root);
//! let gradle = provisioner.provision(ToolKind::Gradle, "4.7").await?;
//! ```

mod archive;
mod cache;
mod descriptor;
mod error;
mod platform;
mod provisioner;
mod transport;

pub use archive::{extract, top_level_dir};
pub use cache::ToolCache;
pub use descriptor::{ToolDescriptor, ToolKind};
pub use error::{Error, Result};
pub use platform::executable_suffix;
pub use provisioner::ToolProvisioner;
pub use transport::{HttpTransport, Transport};
