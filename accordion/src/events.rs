//! Events published by an accordion and the emitter that delivers them.
//!
//! The accordion owns an [`EventEmitter`]; hosts subscribe to it to learn
//! about resize signals, state transitions and xAPI statements.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::xapi::XapiStatement;

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum AccordionEvent {
    /// The accordion's height may have changed.
    Resize,
    /// A panel transitioned to expanded.
    Expanded { panel: usize },
    /// A panel transitioned to collapsed.
    Collapsed { panel: usize },
    /// An xAPI statement for the host's reporting.
    Xapi(XapiStatement),
}

impl AccordionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AccordionEvent::Resize => EventKind::Resize,
            AccordionEvent::Expanded { .. } => EventKind::Expanded,
            AccordionEvent::Collapsed { .. } => EventKind::Collapsed,
            AccordionEvent::Xapi(_) => EventKind::Xapi,
        }
    }
}

/// Discriminant of [`AccordionEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Expanded,
    Collapsed,
    Xapi,
}

/// Callback receiving published events.
pub type Listener = Arc<dyn Fn(&AccordionEvent) + Send + Sync>;

/// Identifies one subscription, for [`EventEmitter::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    filter: Option<EventKind>,
    listener: Listener,
}

#[derive(Default)]
struct EmitterInner {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

/// Publish/subscribe hub. Cheap to clone; clones share subscriptions.
#[derive(Clone, Default)]
pub struct EventEmitter {
    inner: Arc<Mutex<EmitterInner>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&AccordionEvent) + Send + Sync + 'static,
    {
        self.add(None, Arc::new(listener))
    }

    /// Subscribe to events of one kind.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&AccordionEvent) + Send + Sync + 'static,
    {
        self.add(Some(kind), Arc::new(listener))
    }

    fn add(&self, filter: Option<EventKind>, listener: Listener) -> SubscriptionId {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = SubscriptionId(guard.next_id);
        guard.next_id += 1;
        guard.subscriptions.push(Subscription {
            id,
            filter,
            listener,
        });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = guard.subscriptions.len();
        guard.subscriptions.retain(|s| s.id != id);
        guard.subscriptions.len() != before
    }

    /// Deliver `event` to every matching listener, in subscription order.
    ///
    /// Listeners run without the subscription lock held, so they may
    /// subscribe or unsubscribe themselves.
    pub fn publish(&self, event: &AccordionEvent) {
        let kind = event.kind();
        let listeners: Vec<Listener> = match self.inner.lock() {
            Ok(guard) => guard
                .subscriptions
                .iter()
                .filter(|s| s.filter.is_none_or(|f| f == kind))
                .map(|s| Arc::clone(&s.listener))
                .collect(),
            Err(_) => return,
        };

        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .lock()
            .map(|guard| guard.subscriptions.len())
            .unwrap_or(0)
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
