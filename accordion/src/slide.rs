//! Slide transitions of panel content regions.
//!
//! A slide reveals (`Down`) or hides (`Up`) a content region over a fixed
//! duration. Each panel has at most one slide in flight: starting another
//! jumps the old one to its end, which runs its completion immediately.
//! Every slide's completion runs exactly once, unless the tracker cancels it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Easing applied to slide progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// Slow start and end.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `0.0..=1.0` to eased progress.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Direction of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideDirection {
    /// Reveal the content region.
    Down,
    /// Hide the content region.
    Up,
}

/// One timed show/hide of a panel's content region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub panel: usize,
    pub direction: SlideDirection,
    pub started: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl Slide {
    pub fn new(panel: usize, direction: SlideDirection, duration: Duration) -> Self {
        Self {
            panel,
            direction,
            started: Instant::now(),
            duration,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress at `now`, `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Fraction of the content region visible at `now`.
    pub fn visible_fraction(&self, now: Instant) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        match self.direction {
            SlideDirection::Down => eased,
            SlideDirection::Up => 1.0 - eased,
        }
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Completion callback of a slide.
pub type OnComplete = Arc<dyn Fn() + Send + Sync>;

struct ActiveSlide {
    id: u64,
    slide: Slide,
    token: CancellationToken,
    on_complete: OnComplete,
}

#[derive(Default)]
struct TrackerInner {
    next_id: u64,
    active: HashMap<usize, ActiveSlide>,
}

/// Runs the slides of one accordion. Clones share state.
#[derive(Clone, Default)]
pub struct SlideTracker {
    inner: Arc<Mutex<TrackerInner>>,
}

impl SlideTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `slide`, calling `on_complete` when it finishes.
    ///
    /// A slide already running on the same panel is jumped to its end first.
    /// Zero-length slides complete before this returns.
    ///
    /// # Panics
    ///
    /// Panics if a non-zero slide is started outside a
    /// [`tokio::task::LocalSet`].
    pub fn start(&self, slide: Slide, on_complete: OnComplete) {
        self.finish(slide.panel);

        if slide.duration.is_zero() {
            on_complete();
            return;
        }

        let token = CancellationToken::new();
        let id = {
            let mut guard = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let id = guard.next_id;
            guard.next_id += 1;
            guard.active.insert(
                slide.panel,
                ActiveSlide {
                    id,
                    slide,
                    token: token.clone(),
                    on_complete,
                },
            );
            id
        };

        let tracker = self.clone();
        let panel = slide.panel;
        let duration = slide.duration;
        tokio::task::spawn_local(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(duration) => tracker.complete(panel, id),
            }
        });
    }

    /// Jump the slide on `panel` (if any) to its end, running its completion.
    /// Returns true if a slide was running.
    pub fn finish(&self, panel: usize) -> bool {
        let taken = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .active
            .remove(&panel);
        match taken {
            Some(active) => {
                active.token.cancel();
                (active.on_complete)();
                true
            }
            None => false,
        }
    }

    fn complete(&self, panel: usize, id: u64) {
        let taken = {
            let mut guard = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if guard.active.get(&panel).is_some_and(|a| a.id == id) {
                guard.active.remove(&panel)
            } else {
                None
            }
        };
        if let Some(active) = taken {
            (active.on_complete)();
        }
    }

    /// Drop every running slide without running completions.
    pub fn cancel_all(&self) {
        let drained: Vec<ActiveSlide> = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .active
            .drain()
            .map(|(_, active)| active)
            .collect();
        for active in drained {
            active.token.cancel();
        }
    }

    /// The slide currently running on `panel`.
    pub fn get(&self, panel: usize) -> Option<Slide> {
        self.inner
            .lock()
            .ok()
            .and_then(|guard| guard.active.get(&panel).map(|a| a.slide))
    }

    pub fn is_sliding(&self, panel: usize) -> bool {
        self.get(panel).is_some()
    }

    /// Number of slides in flight.
    pub fn active_count(&self) -> usize {
        self.inner
            .lock()
            .map(|guard| guard.active.len())
            .unwrap_or(0)
    }
}

impl fmt::Debug for SlideTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideTracker")
            .field("active", &self.active_count())
            .finish_non_exhaustive()
    }
}
