//! Display-name model for dynamically generated test nodes.
//!
//! Construction validates the display name up front; attaching a source
//! locator is a builder step that returns a new immutable value, so a
//! node shared by multiple consumers can never be mutated under them.

use std::fmt;

use crate::{Error, Result};

/// A container or test case generated at runtime, identified by a
/// non-blank display name and an optional source locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestNode {
    display_name: String,
    source: Option<TestSource>,
}

impl TestNode {
    /// Create a node with a display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlankDisplayName`] if the name is empty or
    /// whitespace-only.
    pub fn new(display_name: impl Into<String>) -> Result<Self> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(Error::BlankDisplayName);
        }
        Ok(Self {
            display_name,
            source: None,
        })
    }

    /// Return a copy of this node carrying the given source locator.
    #[must_use]
    pub fn with_source(self, source: TestSource) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    /// The display name of this node.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The optional source locator of this node.
    #[must_use]
    pub fn source(&self) -> Option<&TestSource> {
        self.source.as_ref()
    }
}

impl fmt::Display for TestNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Locator of the source a test node was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSource {
    uri: String,
}

impl TestSource {
    /// Create a source locator from a URI-style string.
    #[must_use]
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// The locator URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}
