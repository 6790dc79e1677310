//! Cancellable repeating loop used to signal resizes while a slide runs.
//!
//! A [`ResizeNotifier`] belongs to one owner and runs at most one loop at a
//! time: starting a loop stops the previous one. Loops are local tasks on the
//! current thread's [`tokio::task::LocalSet`]; each tick sleeps for the
//! interval, re-checks its cancellation token, then runs the callback.
//!
//! A callback that returns an error or panics ends its loop for good. The
//! failure is logged and never reaches the owner.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::error::{CallbackError, extract_panic_message};

/// Shortest interval a loop will use.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Unique id of one loop, unique per notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(u64);

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loop-{}", self.0)
    }
}

/// Handle to a running loop.
///
/// Cancelling is idempotent. A tick already scheduled for a cancelled loop
/// does nothing.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    id: LoopId,
    token: CancellationToken,
}

impl LoopHandle {
    pub fn id(&self) -> LoopId {
        self.id
    }

    /// Stop the loop. A tick in progress finishes; no further tick runs.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug, Default)]
struct NotifierInner {
    next_id: AtomicU64,
    active: Mutex<Option<LoopHandle>>,
}

impl NotifierInner {
    /// Clear the active slot if it still holds `id`.
    fn release(&self, id: LoopId) -> Option<LoopHandle> {
        let mut active = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if active.as_ref().is_some_and(|h| h.id == id) {
            active.take()
        } else {
            None
        }
    }
}

impl Drop for NotifierInner {
    fn drop(&mut self) {
        let active = self
            .active
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = active.take() {
            handle.cancel();
        }
    }
}

/// Runs at most one repeating callback loop for its owner.
///
/// Clones share the same loop slot.
#[derive(Debug, Clone, Default)]
pub struct ResizeNotifier {
    inner: Arc<NotifierInner>,
}

impl ResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start invoking `callback` every `interval` until stopped.
    ///
    /// Any loop already running for this notifier is stopped first, so its
    /// callback never runs again.
    ///
    /// # Panics
    ///
    /// Panics if called outside a [`tokio::task::LocalSet`].
    pub fn start<F>(&self, mut callback: F, interval: Duration) -> LoopHandle
    where
        F: FnMut() -> Result<(), CallbackError> + 'static,
    {
        let handle = LoopHandle {
            id: LoopId(self.inner.next_id.fetch_add(1, Ordering::SeqCst)),
            token: CancellationToken::new(),
        };

        let previous = self
            .inner
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle.clone());
        if let Some(previous) = previous {
            debug!("{} superseded by {}", previous.id, handle.id);
            previous.cancel();
        }

        let id = handle.id;
        let token = handle.token.clone();
        let owner: Weak<NotifierInner> = Arc::downgrade(&self.inner);
        let interval = interval.max(MIN_INTERVAL);
        debug!("{} started ({:?})", id, interval);

        tokio::task::spawn_local(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback()));
                let failure = match outcome {
                    Ok(Ok(())) => continue,
                    Ok(Err(e)) => e.to_string(),
                    Err(payload) => extract_panic_message(&*payload),
                };
                debug!("{} stopped after callback failure: {}", id, failure);
                token.cancel();
                if let Some(owner) = owner.upgrade() {
                    owner.release(id);
                }
                break;
            }
        });

        handle
    }

    /// Stop `handle`'s loop. Stopping twice, or stopping a loop that already
    /// ended, does nothing.
    pub fn stop(&self, handle: &LoopHandle) {
        if !handle.is_cancelled() {
            debug!("{} stopped", handle.id);
        }
        handle.cancel();
        self.inner.release(handle.id);
    }

    /// Stop whichever loop is active. Returns its id, if there was one.
    pub fn stop_active(&self) -> Option<LoopId> {
        let handle = self
            .inner
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()?;
        debug!("{} stopped", handle.id);
        handle.cancel();
        Some(handle.id)
    }

    /// True while a loop is running.
    pub fn is_active(&self) -> bool {
        self.active_id().is_some()
    }

    /// Id of the running loop, if any.
    pub fn active_id(&self) -> Option<LoopId> {
        self.inner
            .active
            .lock()
            .ok()
            .and_then(|active| active.as_ref().filter(|h| !h.is_cancelled()).map(|h| h.id))
    }
}
