//! Platform-conditional executable suffix selection.
//!
//! The one platform branch in this crate: Windows-family hosts launch
//! build tools through `.bat` shims, everything else runs the plain
//! script.

/// Get the executable suffix for the current host.
#[must_use]
pub fn executable_suffix() -> &'static str {
    suffix_for(std::env::consts::OS)
}

/// Get the executable suffix for a named operating system.
#[must_use]
pub(crate) fn suffix_for(os: &str) -> &'static str {
    if os == "windows" { ".bat" } else { "" }
}
