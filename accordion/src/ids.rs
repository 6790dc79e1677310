//! Element identifiers for panels.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out id prefixes so several accordions on one page get distinct
/// element ids.
///
/// Share one source (via `Arc`) between all accordions that render into the
/// same document.
#[derive(Debug, Default)]
pub struct IdSource {
    next: AtomicUsize,
}

impl IdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Next unused prefix, e.g. `"0-"`, `"1-"`.
    pub fn next_prefix(&self) -> String {
        format!("{}-", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Identifiers of one panel's header and content region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelIds {
    pub title: String,
    pub content: String,
}

impl PanelIds {
    pub fn new(prefix: &str, index: usize) -> Self {
        Self {
            title: format!("h5p-panel-link-{}{}", prefix, index),
            content: format!("h5p-panel-content-{}{}", prefix, index),
        }
    }
}
