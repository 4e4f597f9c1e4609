//! Resize notifications.
//!
//! Hosts fire a [`ResizeSource`] whenever a container or the viewport
//! changes size; subscribers (typically a layout context) re-run a full
//! layout pass in response. Notifications carry no payload: they are
//! fire-and-forget triggers, and rapid bursts simply cause multiple
//! independent passes with the last one winning.
//!
//! Subscriptions are explicit objects with a [`cancel`](Subscription::cancel)
//! operation instead of lifetimes implicitly tied to scene-graph nodes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// A single-threaded resize event stream.
#[derive(Clone, Default)]
pub struct ResizeSource {
    registry: Rc<RefCell<Registry>>,
}

impl ResizeSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback fired on every notification.
    #[must_use = "dropping the subscription without cancelling leaves it active"]
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Rc::new(callback)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Fire all registered callbacks.
    ///
    /// The subscriber list is snapshotted first, so a callback may cancel
    /// subscriptions or subscribe anew without invalidating the pass.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .registry
            .borrow()
            .subscribers
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            callback();
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }
}

impl std::fmt::Debug for ResizeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSource")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for one registered callback.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the callback from the source.
    ///
    /// A no-op when the source is already gone.
    pub fn cancel(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }

    /// Whether the callback is still registered on a live source.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().subscribers.iter().any(|(id, _)| *id == self.id))
    }
}
