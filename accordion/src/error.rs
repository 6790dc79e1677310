//! Error types.

use std::any::Any;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading accordion parameters.
///
/// Individual malformed fields never produce an error: they fall back to
/// their defaults. Only input that is not a JSON document at all fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is not valid JSON.
    #[error("invalid accordion parameters: {0}")]
    Parse(#[from] serde_json::Error),

    /// The parameters file could not be read.
    #[error("failed to read parameters from {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors reported by a [`ContentFactory`](crate::content::ContentFactory).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The descriptor does not name a library.
    #[error("content descriptor has no library")]
    MissingLibrary,

    /// No content type is known for the library.
    #[error("no content type available for library '{0}'")]
    UnknownLibrary(String),

    /// The library is known but its parameters are unusable.
    #[error("invalid parameters for '{library}': {message}")]
    InvalidParams {
        /// Library the parameters belong to.
        library: String,
        /// What is wrong with them.
        message: String,
    },
}

/// Errors returned by [`Accordion`](crate::Accordion) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccordionError {
    /// A panel index past the end of the panel list.
    #[error("panel {index} out of range (accordion has {len} panels)")]
    PanelOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of panels.
        len: usize,
    },

    /// A panel's content could not be instantiated.
    #[error("failed to instantiate content of panel {index}: {source}")]
    Content {
        /// Index of the failing panel.
        index: usize,
        /// Error from the content factory.
        #[source]
        source: ContentError,
    },
}

/// Failure of a single resize-loop invocation. Stops the loop that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CallbackError(String);

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Message carried by a panic payload: the `&str` or `String` passed to
/// `panic!`, or a placeholder for other payload types.
pub fn extract_panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "callback panicked".to_owned())
}
