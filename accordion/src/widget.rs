//! The accordion: panel registry, expand/collapse state machine and keyboard
//! navigation.
//!
//! Every transition starts a slide on the affected panel and (re)starts the
//! resize loop, which signals [`AccordionEvent::Resize`] to the host until a
//! slide completes. Slides and the loop are local tasks, so an accordion
//! with animations enabled must be driven from inside a
//! [`tokio::task::LocalSet`]. Without any Tokio runtime, transitions fall
//! back to instant slides.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{AccordionConfig, Timing};
use crate::content::{ContentDescriptor, ContentFactory, ContentInstance, EmptyContent};
use crate::error::AccordionError;
use crate::events::{AccordionEvent, EventEmitter};
use crate::ids::{IdSource, PanelIds};
use crate::keys::{EventResult, Key};
use crate::notifier::ResizeNotifier;
use crate::panel::{Expansion, Panel, PanelState};
use crate::slide::{OnComplete, Slide, SlideDirection, SlideTracker};
use crate::view::{Container, Section};
use crate::xapi::XapiStatement;

/// Builder for [`Accordion`].
#[derive(Debug, Clone)]
pub struct AccordionBuilder {
    config: AccordionConfig,
    content_id: String,
    timing: Timing,
    ids: Option<Arc<IdSource>>,
    emitter: Option<EventEmitter>,
}

impl AccordionBuilder {
    pub fn new(config: AccordionConfig) -> Self {
        Self {
            config,
            content_id: "0".into(),
            timing: Timing::default(),
            ids: None,
            emitter: None,
        }
    }

    /// Id of the content this accordion belongs to. Passed to the content
    /// factory and used as the xAPI activity.
    pub fn content_id(mut self, id: impl Into<String>) -> Self {
        self.content_id = id.into();
        self
    }

    /// Set animation timing.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Share an id source with other accordions in the same document.
    pub fn id_source(mut self, ids: Arc<IdSource>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Publish through an existing emitter.
    pub fn emitter(mut self, emitter: EventEmitter) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Build the accordion. Panels whose content fails to instantiate get
    /// empty content.
    pub fn build(self, factory: &dyn ContentFactory) -> Accordion {
        let content_id = self.content_id.clone();
        let built = self.assemble::<Infallible>(|index, descriptor| {
            Ok(factory
                .instantiate(descriptor, &content_id)
                .unwrap_or_else(|e| {
                    warn!("Panel {} content unavailable: {}", index, e);
                    Box::new(EmptyContent) as Box<dyn ContentInstance>
                }))
        });
        match built {
            Ok(accordion) => accordion,
            Err(never) => match never {},
        }
    }

    /// Build the accordion, failing on the first panel whose content cannot
    /// be instantiated.
    pub fn try_build(self, factory: &dyn ContentFactory) -> Result<Accordion, AccordionError> {
        let content_id = self.content_id.clone();
        self.assemble(|index, descriptor| {
            factory
                .instantiate(descriptor, &content_id)
                .map_err(|source| AccordionError::Content { index, source })
        })
    }

    fn assemble<E>(
        self,
        mut instantiate: impl FnMut(usize, &ContentDescriptor) -> Result<Box<dyn ContentInstance>, E>,
    ) -> Result<Accordion, E> {
        let ids = self.ids.unwrap_or_else(IdSource::shared);
        let id_prefix = ids.next_prefix();

        let mut panels = Vec::with_capacity(self.config.panels.len());
        for (index, params) in self.config.panels.iter().enumerate() {
            let content = instantiate(index, &params.content)?;
            panels.push(Panel::new(
                index,
                params.title.clone(),
                PanelIds::new(&id_prefix, index),
                content,
            ));
        }

        let expansion =
            Expansion::initial(self.config.open_mode, self.config.initial_mode, panels.len());
        debug!(
            "Accordion {} created: {} panels, {:?}/{:?}, expanded {:?}",
            self.content_id,
            panels.len(),
            self.config.open_mode,
            self.config.initial_mode,
            expansion.to_vec()
        );

        Ok(Accordion {
            content_id: self.content_id,
            config: self.config,
            timing: self.timing,
            id_prefix,
            panels,
            expansion,
            focused: 0,
            consumed: false,
            runtime_warned: false,
            emitter: self.emitter.unwrap_or_default(),
            notifier: ResizeNotifier::new(),
            slides: SlideTracker::new(),
        })
    }
}

/// An accordion instance.
#[derive(Debug)]
pub struct Accordion {
    content_id: String,
    config: AccordionConfig,
    timing: Timing,
    id_prefix: String,
    panels: Vec<Panel>,
    expansion: Expansion,
    focused: usize,
    consumed: bool,
    runtime_warned: bool,
    emitter: EventEmitter,
    notifier: ResizeNotifier,
    slides: SlideTracker,
}

impl Accordion {
    pub fn builder(config: AccordionConfig) -> AccordionBuilder {
        AccordionBuilder::new(config)
    }

    /// Create an accordion with default timing. See [`AccordionBuilder::build`].
    pub fn new(
        config: AccordionConfig,
        content_id: impl Into<String>,
        factory: &dyn ContentFactory,
    ) -> Self {
        AccordionBuilder::new(config)
            .content_id(content_id)
            .build(factory)
    }

    /// Create an accordion with default timing. See
    /// [`AccordionBuilder::try_build`].
    pub fn try_new(
        config: AccordionConfig,
        content_id: impl Into<String>,
        factory: &dyn ContentFactory,
    ) -> Result<Self, AccordionError> {
        AccordionBuilder::new(config)
            .content_id(content_id)
            .try_build(factory)
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &AccordionConfig {
        &self.config
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Prefix of this instance's element ids.
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// State of `index`. Out-of-range panels report collapsed.
    pub fn state(&self, index: usize) -> PanelState {
        if self.expansion.contains(index) {
            PanelState::Expanded
        } else {
            PanelState::Collapsed
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.state(index).is_expanded()
    }

    /// Expanded panels in ascending order.
    pub fn expanded(&self) -> Vec<usize> {
        self.expansion.to_vec()
    }

    /// Index of the header holding keyboard focus.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// True while a slide runs on `index`.
    pub fn is_animating(&self, index: usize) -> bool {
        self.slides.is_sliding(index)
    }

    /// True while the resize loop runs.
    pub fn is_resizing(&self) -> bool {
        self.notifier.is_active()
    }

    /// True once the consumed statement has been sent.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// The emitter hosts subscribe to.
    pub fn events(&self) -> &EventEmitter {
        &self.emitter
    }

    pub fn notifier(&self) -> &ResizeNotifier {
        &self.notifier
    }

    // -------------------------------------------------------------------------
    // Attaching
    // -------------------------------------------------------------------------

    /// Fill `container` with the panels.
    ///
    /// The first call attaches every panel's content and sends the consumed
    /// statement; later calls only refill the container.
    pub fn attach(&mut self, container: &mut Container) {
        if !self.consumed {
            self.consumed = true;
            self.trigger_consumed();
            for panel in &mut self.panels {
                panel.attach_content();
            }
        }

        container.clear();
        container.mode = Some(self.config.initial_mode);
        container.multiselectable = !self.config.open_mode.is_single();
        container.sections = self.sections();
    }

    fn trigger_consumed(&self) {
        let statement = XapiStatement::consumed(&self.content_id);
        info!(
            "Accordion {} consumed (statement {})",
            self.content_id, statement.id
        );
        self.emitter.publish(&AccordionEvent::Xapi(statement));
    }

    /// Current view of every panel.
    pub fn sections(&self) -> Vec<Section> {
        let now = tokio::time::Instant::now();
        self.panels
            .iter()
            .map(|panel| {
                let index = panel.index();
                let expanded = self.is_expanded(index);
                let visible = match self.slides.get(index) {
                    Some(slide) => slide.visible_fraction(now),
                    None if expanded => 1.0,
                    None => 0.0,
                };
                Section {
                    index,
                    title: panel.title().to_string(),
                    title_id: panel.ids().title.clone(),
                    content_id: panel.ids().content.clone(),
                    heading: self.config.heading_level,
                    expanded,
                    selected: index == self.focused,
                    visible,
                    lines: panel.region().lines().to_vec(),
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<(), AccordionError> {
        if index < self.panels.len() {
            Ok(())
        } else {
            Err(AccordionError::PanelOutOfRange {
                index,
                len: self.panels.len(),
            })
        }
    }

    /// Expand `index` if collapsed, collapse it if expanded.
    ///
    /// In single-open mode, expanding a panel collapses the open one; both
    /// slides run concurrently.
    ///
    /// # Panics
    ///
    /// With animations enabled, panics if called inside a Tokio runtime but
    /// outside a [`tokio::task::LocalSet`].
    pub fn toggle(&mut self, index: usize) -> Result<PanelState, AccordionError> {
        self.check_index(index)?;
        Ok(self.toggle_unchecked(index))
    }

    /// Expand `index`. Does nothing if it is already expanded.
    ///
    /// # Panics
    ///
    /// With animations enabled, panics if called inside a Tokio runtime but
    /// outside a [`tokio::task::LocalSet`].
    pub fn expand(&mut self, index: usize) -> Result<(), AccordionError> {
        self.check_index(index)?;
        if !self.is_expanded(index) {
            self.toggle_unchecked(index);
        }
        Ok(())
    }

    /// Collapse `index`. Does nothing if it is already collapsed.
    ///
    /// # Panics
    ///
    /// With animations enabled, panics if called inside a Tokio runtime but
    /// outside a [`tokio::task::LocalSet`].
    pub fn collapse(&mut self, index: usize) -> Result<(), AccordionError> {
        self.check_index(index)?;
        if self.is_expanded(index) {
            self.toggle_unchecked(index);
        }
        Ok(())
    }

    /// Pointer activation of a header: focus it and toggle it.
    ///
    /// # Panics
    ///
    /// With animations enabled, panics if called inside a Tokio runtime but
    /// outside a [`tokio::task::LocalSet`].
    pub fn click(&mut self, index: usize) -> Result<PanelState, AccordionError> {
        self.check_index(index)?;
        self.focused = index;
        Ok(self.toggle_unchecked(index))
    }

    fn toggle_unchecked(&mut self, index: usize) -> PanelState {
        let animated = self.animated();
        let duration = if animated {
            self.timing.effective_slide_duration()
        } else {
            Duration::ZERO
        };

        let state = if self.expansion.remove(index) {
            self.slide(index, SlideDirection::Up, duration);
            self.emitter
                .publish(&AccordionEvent::Collapsed { panel: index });
            PanelState::Collapsed
        } else {
            if let Some(displaced) = self.expansion.insert(index) {
                self.slide(displaced, SlideDirection::Up, duration);
                self.emitter
                    .publish(&AccordionEvent::Collapsed { panel: displaced });
            }
            self.slide(index, SlideDirection::Down, duration);
            self.emitter
                .publish(&AccordionEvent::Expanded { panel: index });
            PanelState::Expanded
        };
        debug!(
            "Accordion {} panel {} {}, expanded {:?}",
            self.content_id,
            index,
            state,
            self.expansion.to_vec()
        );

        if animated {
            self.animate_resize();
        }
        state
    }

    /// True if this transition should animate. Animations need a Tokio
    /// runtime; without one slides complete instantly.
    fn animated(&mut self) -> bool {
        if self.timing.reduce_motion {
            return false;
        }
        if tokio::runtime::Handle::try_current().is_ok() {
            return true;
        }
        if !self.runtime_warned {
            self.runtime_warned = true;
            warn!(
                "Accordion {} used outside a Tokio runtime, animations disabled",
                self.content_id
            );
        }
        false
    }

    /// Start a slide on `index`. Its completion stops the resize loop, even
    /// when another slide still runs, and sends one last resize.
    fn slide(&self, index: usize, direction: SlideDirection, duration: Duration) {
        let notifier = self.notifier.clone();
        let emitter = self.emitter.clone();
        let on_complete: OnComplete = Arc::new(move || {
            notifier.stop_active();
            emitter.publish(&AccordionEvent::Resize);
        });
        let slide = Slide::new(index, direction, duration).with_easing(self.timing.easing);
        self.slides.start(slide, on_complete);
    }

    /// Signal resizes to the host for as long as a slide runs.
    fn animate_resize(&self) {
        let emitter = self.emitter.clone();
        self.notifier.start(
            move || {
                emitter.publish(&AccordionEvent::Resize);
                Ok(())
            },
            self.timing.resize_interval,
        );
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Move focus to `index`. Returns true if focus changed.
    pub fn focus(&mut self, index: usize) -> Result<bool, AccordionError> {
        self.check_index(index)?;
        let changed = self.focused != index;
        self.focused = index;
        Ok(changed)
    }

    /// Focus the previous header. Does nothing on the first one.
    pub fn focus_previous(&mut self) -> bool {
        if self.focused == 0 {
            return false;
        }
        self.focused -= 1;
        true
    }

    /// Focus the next header. Does nothing on the last one.
    pub fn focus_next(&mut self) -> bool {
        if self.focused + 1 >= self.panels.len() {
            return false;
        }
        self.focused += 1;
        true
    }

    /// Handle a key pressed on the focused header.
    ///
    /// Arrows move focus (no wrapping), Space and Enter toggle.
    ///
    /// # Panics
    ///
    /// With animations enabled, panics if called inside a Tokio runtime but
    /// outside a [`tokio::task::LocalSet`].
    pub fn handle_key(&mut self, key: Key) -> EventResult {
        if self.panels.is_empty() {
            return EventResult::Ignored;
        }
        match key {
            Key::Up | Key::Left => {
                self.focus_previous();
                EventResult::Consumed
            }
            Key::Down | Key::Right => {
                self.focus_next();
                EventResult::Consumed
            }
            Key::Space | Key::Enter => {
                self.toggle_unchecked(self.focused);
                EventResult::Consumed
            }
            Key::Char(_) | Key::Other => EventResult::Ignored,
        }
    }
}

impl Drop for Accordion {
    fn drop(&mut self) {
        self.slides.cancel_all();
        self.notifier.stop_active();
    }
}
