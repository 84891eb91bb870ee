//! Dismissal watcher - closes the suggestion panel on pointer-down outside
//! the search surface
//!
//! Pure event-interest logic: no network, no ordering concerns. The
//! broadcast subscription is the registered interest; it is released when
//! the owning view tears the watcher down, so nothing leaks across mounts.

use tokio::sync::broadcast;
use tracing::debug;

use crate::controller::ControllerHandle;

/// Identifies a hit-testable region of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionId(pub u32);

/// A pointer-down event and the region it landed on, if any
#[derive(Debug, Clone, Copy)]
pub struct PointerDown {
    pub region: Option<RegionId>,
}

/// Source of pointer-down events; views register watchers against it
#[derive(Clone)]
pub struct PointerEvents {
    tx: broadcast::Sender<PointerDown>,
}

impl PointerEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Broadcast a pointer-down to every registered watcher
    pub fn pointer_down(&self, region: Option<RegionId>) {
        // no receivers just means no view is mounted
        let _ = self.tx.send(PointerDown { region });
    }

    fn subscribe(&self) -> broadcast::Receiver<PointerDown> {
        self.tx.subscribe()
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Watches for pointer-downs outside the guarded region and asks the
/// controller to hide the suggestion panel
pub struct DismissalWatcher {
    guarded: RegionId,
    events: broadcast::Receiver<PointerDown>,
    controller: ControllerHandle,
}

impl DismissalWatcher {
    /// Register interest in pointer events for the lifetime of the watcher
    pub fn register(events: &PointerEvents, guarded: RegionId, controller: ControllerHandle) -> Self {
        Self {
            guarded,
            events: events.subscribe(),
            controller,
        }
    }

    /// Whether this event falls outside the guarded surface
    fn is_outside(&self, event: &PointerDown) -> bool {
        event.region != Some(self.guarded)
    }

    /// Consume pointer events until the source goes away. Dropping the
    /// returned future deregisters the interest.
    pub async fn run(mut self) {
        loop {
            match self.events.recv().await {
                Ok(event) => {
                    if self.is_outside(&event) {
                        self.controller.dismiss_suggestions();
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("dismissal watcher lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
