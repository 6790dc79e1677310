//! Snapshot of the accordion for a host to render.

use crate::config::{HeadingLevel, InitialMode};

/// One panel as the host should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub index: usize,
    pub title: String,
    pub title_id: String,
    pub content_id: String,
    pub heading: HeadingLevel,
    pub expanded: bool,
    /// The header that takes keyboard focus (the only tabbable one).
    pub selected: bool,
    /// Fraction of the content region currently visible; between 0 and 1
    /// while a slide runs.
    pub visible: f32,
    pub lines: Vec<String>,
}

impl Section {
    /// Number of content lines the host should show right now.
    pub fn visible_lines(&self) -> usize {
        let total = self.lines.len() as f32;
        (total * self.visible.clamp(0.0, 1.0)).ceil() as usize
    }
}

/// The host element an accordion attaches into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    /// Initial mode of the attached accordion, kept as a style hint.
    pub mode: Option<InitialMode>,
    /// True when several panels may be open at once.
    pub multiselectable: bool,
    pub sections: Vec<Section>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.mode = None;
        self.multiselectable = false;
        self.sections.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
