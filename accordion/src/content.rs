//! Nested content: descriptors, the instantiation seam and content regions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ContentError;

/// Description of one nested content item, as stored in the parameters.
///
/// `library` is the versioned machine name, e.g. `"H5P.AdvancedText 1.1"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDescriptor {
    #[serde(default)]
    pub library: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_content_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ContentDescriptor {
    pub fn new(library: impl Into<String>, params: Value) -> Self {
        Self {
            library: library.into(),
            params,
            sub_content_id: None,
            metadata: None,
        }
    }

    /// Library name without the version, e.g. `"H5P.AdvancedText"`.
    pub fn machine_name(&self) -> &str {
        self.library
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }

    /// Library version, if the library string carries one.
    pub fn version(&self) -> Option<&str> {
        self.library.split_whitespace().nth(1)
    }
}

/// The area a content instance attaches itself to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    id: String,
    lines: Vec<String>,
}

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append one line of content.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Height of the region in lines.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// An instantiated content item that can render itself into a region.
pub trait ContentInstance: std::fmt::Debug {
    /// Fill `region` with this content.
    fn attach(&mut self, region: &mut Region);
}

/// Creates content instances from descriptors.
///
/// Implemented for closures, so tests and small hosts can pass a function.
pub trait ContentFactory {
    /// Instantiate `descriptor` for the content identified by `context_id`.
    fn instantiate(
        &self,
        descriptor: &ContentDescriptor,
        context_id: &str,
    ) -> Result<Box<dyn ContentInstance>, ContentError>;
}

impl<F> ContentFactory for F
where
    F: Fn(&ContentDescriptor, &str) -> Result<Box<dyn ContentInstance>, ContentError>,
{
    fn instantiate(
        &self,
        descriptor: &ContentDescriptor,
        context_id: &str,
    ) -> Result<Box<dyn ContentInstance>, ContentError> {
        self(descriptor, context_id)
    }
}

/// Content that renders nothing. Stands in for content that failed to load.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContent;

impl ContentInstance for EmptyContent {
    fn attach(&mut self, _region: &mut Region) {}
}
