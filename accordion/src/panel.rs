//! Panels and the record of which ones are expanded.

use std::collections::BTreeSet;
use std::fmt;

use log::warn;

use crate::config::{InitialMode, OpenMode};
use crate::content::{ContentInstance, Region};
use crate::ids::PanelIds;

/// Visibility of a panel's content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn is_expanded(&self) -> bool {
        matches!(self, PanelState::Expanded)
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelState::Collapsed => f.write_str("collapsed"),
            PanelState::Expanded => f.write_str("expanded"),
        }
    }
}

/// One section of the accordion: a title and its instantiated content.
#[derive(Debug)]
pub struct Panel {
    index: usize,
    title: String,
    ids: PanelIds,
    content: Box<dyn ContentInstance>,
    region: Region,
    attached: bool,
}

impl Panel {
    pub(crate) fn new(
        index: usize,
        title: String,
        ids: PanelIds,
        content: Box<dyn ContentInstance>,
    ) -> Self {
        let region = Region::new(ids.content.clone());
        Self {
            index,
            title,
            ids,
            content,
            region,
            attached: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn ids(&self) -> &PanelIds {
        &self.ids
    }

    /// The content region, filled once the accordion is attached.
    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Let the content fill its region. Only the first call has an effect.
    pub(crate) fn attach_content(&mut self) {
        if !self.attached {
            self.content.attach(&mut self.region);
            self.attached = true;
        }
    }
}

/// Which panels are expanded.
///
/// Single-open accordions keep one optional reference, so more than one open
/// panel cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    Single(Option<usize>),
    Many(BTreeSet<usize>),
}

impl Expansion {
    /// Expansion right after construction.
    ///
    /// `ExpandedAll` in single-open mode opens only the first panel.
    pub fn initial(open_mode: OpenMode, initial_mode: InitialMode, len: usize) -> Self {
        if len == 0 {
            return Self::empty(open_mode);
        }
        match (open_mode, initial_mode) {
            (_, InitialMode::CollapsedAll) => Self::empty(open_mode),
            (OpenMode::OpenOne, InitialMode::ExpandedFirstOnly) => Expansion::Single(Some(0)),
            (OpenMode::OpenOne, InitialMode::ExpandedAll) => {
                if len > 1 {
                    warn!("expandedAll is not possible with openOne, expanding the first panel only");
                }
                Expansion::Single(Some(0))
            }
            (OpenMode::OpenMany, InitialMode::ExpandedFirstOnly) => {
                Expansion::Many(BTreeSet::from([0]))
            }
            (OpenMode::OpenMany, InitialMode::ExpandedAll) => Expansion::Many((0..len).collect()),
        }
    }

    fn empty(open_mode: OpenMode) -> Self {
        match open_mode {
            OpenMode::OpenOne => Expansion::Single(None),
            OpenMode::OpenMany => Expansion::Many(BTreeSet::new()),
        }
    }

    pub fn contains(&self, panel: usize) -> bool {
        match self {
            Expansion::Single(open) => *open == Some(panel),
            Expansion::Many(open) => open.contains(&panel),
        }
    }

    /// Mark `panel` expanded. In single-open mode, returns the panel it
    /// displaced.
    pub fn insert(&mut self, panel: usize) -> Option<usize> {
        match self {
            Expansion::Single(open) => open.replace(panel).filter(|&p| p != panel),
            Expansion::Many(open) => {
                open.insert(panel);
                None
            }
        }
    }

    /// Mark `panel` collapsed. Returns true if it was expanded.
    pub fn remove(&mut self, panel: usize) -> bool {
        match self {
            Expansion::Single(open) => {
                if *open == Some(panel) {
                    *open = None;
                    true
                } else {
                    false
                }
            }
            Expansion::Many(open) => open.remove(&panel),
        }
    }

    /// Expanded panels in ascending order.
    pub fn to_vec(&self) -> Vec<usize> {
        match self {
            Expansion::Single(open) => open.iter().copied().collect(),
            Expansion::Many(open) => open.iter().copied().collect(),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Expansion::Single(open) => usize::from(open.is_some()),
            Expansion::Many(open) => open.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_insert_displaces() {
        let mut expansion = Expansion::initial(OpenMode::OpenOne, InitialMode::CollapsedAll, 3);
        assert_eq!(expansion.insert(0), None);
        assert_eq!(expansion.insert(2), Some(0));
        assert_eq!(expansion.insert(2), None);
        assert_eq!(expansion.to_vec(), vec![2]);
    }

    #[test]
    fn test_many_insert_keeps_others() {
        let mut expansion = Expansion::initial(OpenMode::OpenMany, InitialMode::CollapsedAll, 3);
        expansion.insert(0);
        expansion.insert(2);
        assert_eq!(expansion.to_vec(), vec![0, 2]);
        assert!(expansion.remove(0));
        assert!(!expansion.remove(0));
        assert_eq!(expansion.count(), 1);
    }

    #[test]
    fn test_initial_modes() {
        assert_eq!(
            Expansion::initial(OpenMode::OpenMany, InitialMode::ExpandedAll, 3).to_vec(),
            vec![0, 1, 2]
        );
        assert_eq!(
            Expansion::initial(OpenMode::OpenOne, InitialMode::ExpandedAll, 3).to_vec(),
            vec![0]
        );
        assert_eq!(
            Expansion::initial(OpenMode::OpenMany, InitialMode::ExpandedFirstOnly, 3).to_vec(),
            vec![0]
        );
        assert_eq!(
            Expansion::initial(OpenMode::OpenOne, InitialMode::ExpandedFirstOnly, 0).count(),
            0
        );
    }
}
