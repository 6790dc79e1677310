//! Accordion parameters and runtime timing.
//!
//! Parameters arrive as JSON from the host. Decoding is lenient: a field that
//! is missing or has the wrong shape falls back to its default (with a
//! warning) instead of failing the whole accordion.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::ContentDescriptor;
use crate::error::ConfigError;
use crate::slide::Easing;

/// Default duration of a slide animation.
pub const SLIDE_DURATION: Duration = Duration::from_millis(200);

/// Default cadence of resize notifications while a slide is running.
pub const RESIZE_INTERVAL: Duration = Duration::from_millis(40);

/// Heading element used for panel titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    /// Numeric level (2 to 6).
    pub fn level(&self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which panels are expanded when the accordion is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitialMode {
    #[default]
    CollapsedAll,
    ExpandedAll,
    ExpandedFirstOnly,
}

/// Whether opening a panel closes the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpenMode {
    /// Opening a panel collapses whichever panel is open.
    #[default]
    OpenOne,
    /// Panels toggle independently.
    OpenMany,
}

impl OpenMode {
    pub fn is_single(&self) -> bool {
        matches!(self, OpenMode::OpenOne)
    }
}

/// One panel definition: a title and the content shown when expanded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelParams {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: ContentDescriptor,
}

impl PanelParams {
    pub fn new(title: impl Into<String>, content: ContentDescriptor) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }
}

/// Accordion parameters as provided by the host.
///
/// Serializes with the host's field names (`hTag`, `expandCollapseOption`,
/// `multipleAccordionsOpen`, `panels`); decoding also accepts `headingLevel`,
/// `expandCollapseMode` and `openMode`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccordionConfig {
    #[serde(rename = "hTag")]
    pub heading_level: HeadingLevel,
    #[serde(rename = "expandCollapseOption")]
    pub initial_mode: InitialMode,
    #[serde(rename = "multipleAccordionsOpen")]
    pub open_mode: OpenMode,
    pub panels: Vec<PanelParams>,
}

/// Wire shape before per-field fallbacks are applied.
///
/// Alternative names are separate fields so a document carrying both names
/// still decodes; the host name wins.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default, rename = "hTag")]
    heading_level: Option<Value>,
    #[serde(default, rename = "headingLevel")]
    heading_level_alt: Option<Value>,
    #[serde(default, rename = "expandCollapseOption")]
    initial_mode: Option<Value>,
    #[serde(default, rename = "expandCollapseMode")]
    initial_mode_alt: Option<Value>,
    #[serde(default, rename = "multipleAccordionsOpen")]
    open_mode: Option<Value>,
    #[serde(default, rename = "openMode")]
    open_mode_alt: Option<Value>,
    #[serde(default)]
    panels: Option<Value>,
}

impl AccordionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading level.
    pub fn heading_level(mut self, level: HeadingLevel) -> Self {
        self.heading_level = level;
        self
    }

    /// Set the initial expansion mode.
    pub fn initial_mode(mut self, mode: InitialMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Set the open mode.
    pub fn open_mode(mut self, mode: OpenMode) -> Self {
        self.open_mode = mode;
        self
    }

    /// Append a panel.
    pub fn panel(mut self, title: impl Into<String>, content: ContentDescriptor) -> Self {
        self.panels.push(PanelParams::new(title, content));
        self
    }

    /// Parse parameters from a JSON string.
    ///
    /// Fails only when `json` is not JSON; see [`AccordionConfig::from_value`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Read and parse a parameters file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build parameters from a JSON value, applying defaults for every
    /// missing or malformed field.
    pub fn from_value(value: Value) -> Self {
        let raw = match serde_json::from_value::<RawConfig>(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Accordion parameters are not an object ({}), using defaults", e);
                RawConfig::default()
            }
        };

        Self {
            heading_level: field_or_default(
                "hTag",
                first_present(raw.heading_level, raw.heading_level_alt),
            ),
            initial_mode: field_or_default(
                "expandCollapseOption",
                first_present(raw.initial_mode, raw.initial_mode_alt),
            ),
            open_mode: field_or_default(
                "multipleAccordionsOpen",
                first_present(raw.open_mode, raw.open_mode_alt),
            ),
            panels: panels_or_default(raw.panels),
        }
    }
}

fn first_present(primary: Option<Value>, alternative: Option<Value>) -> Option<Value> {
    primary
        .filter(|value| !value.is_null())
        .or(alternative)
}

fn field_or_default<T>(name: &str, value: Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("Ignoring invalid '{}' value {} ({}), using default", name, value, e);
            T::default()
        }),
    }
}

fn panels_or_default(value: Option<Value>) -> Vec<PanelParams> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Ignoring 'panels' value {}: expected a list", other);
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<PanelParams>(item) {
            Ok(panel) => Some(panel),
            Err(e) => {
                warn!("Skipping malformed panel {}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Animation timing of an accordion instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Duration of one slide (show or hide) of a content region.
    pub slide_duration: Duration,
    /// Interval between resize notifications while a slide runs.
    pub resize_interval: Duration,
    /// If true, slides complete instantly and no resize loop runs.
    pub reduce_motion: bool,
    /// Curve of the visible fraction over a slide.
    pub easing: Easing,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            slide_duration: SLIDE_DURATION,
            resize_interval: RESIZE_INTERVAL,
            reduce_motion: false,
            easing: Easing::default(),
        }
    }
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slide duration.
    pub fn slide_duration(mut self, duration: Duration) -> Self {
        self.slide_duration = duration;
        self
    }

    /// Set the resize notification interval.
    pub fn resize_interval(mut self, interval: Duration) -> Self {
        self.resize_interval = interval;
        self
    }

    /// Enable or disable reduced motion.
    pub fn reduce_motion(mut self, enabled: bool) -> Self {
        self.reduce_motion = enabled;
        self
    }

    /// Set the easing curve of slides.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Effective slide duration (zero with reduced motion).
    pub fn effective_slide_duration(&self) -> Duration {
        if self.reduce_motion {
            Duration::ZERO
        } else {
            self.slide_duration
        }
    }
}
