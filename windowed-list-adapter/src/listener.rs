use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

/// A change reported by the hosting viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportEvent {
    /// The scroll offset changed.
    Scroll(f64),
    /// The container height changed.
    Resize(f64),
}

/// Events a single subscription may hold before its queue is compacted.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug)]
struct Hub {
    next_id: u64,
    capacity: usize,
    queues: Vec<(u64, Vec<ViewportEvent>)>,
}

/// The event source a host pushes viewport changes into.
///
/// Every live [`ScrollSubscription`] receives every event published after it subscribed, in
/// order. The hub is single-threaded (`Rc`-based) like the frame loop it feeds.
///
/// Queues are bounded. When a subscription that is never drained (for example a hidden screen
/// that stays attached) reaches the capacity, its queue is compacted down to the latest scroll
/// and the latest resize, so the final viewport state survives but intermediate scroll ticks
/// are lost. Hosts that stop ticking a controller should `detach` it.
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Debug, Default)]
pub struct ViewportEvents {
    hub: Rc<RefCell<Hub>>,
}

impl Default for Hub {
    fn default() -> Self {
        Self {
            next_id: 0,
            capacity: DEFAULT_QUEUE_CAPACITY,
            queues: Vec::new(),
        }
    }
}

impl ViewportEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hub whose per-subscription queues hold at most `capacity` events (minimum 2).
    pub fn with_queue_capacity(capacity: usize) -> Self {
        let hub = Hub {
            capacity: capacity.max(2),
            ..Hub::default()
        };
        Self {
            hub: Rc::new(RefCell::new(hub)),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.hub.borrow().capacity
    }

    /// Registers a new listener. Dropping the returned subscription unsubscribes it.
    pub fn subscribe(&self) -> ScrollSubscription {
        let mut hub = self.hub.borrow_mut();
        let id = hub.next_id;
        hub.next_id = hub.next_id.wrapping_add(1);
        hub.queues.push((id, Vec::new()));
        adebug!(id, subscribers = hub.queues.len(), "subscribe");
        ScrollSubscription {
            id,
            hub: Rc::downgrade(&self.hub),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.borrow().queues.len()
    }

    pub fn scroll_to(&self, offset: f64) {
        self.publish(ViewportEvent::Scroll(offset));
    }

    pub fn resize(&self, container_height: f64) {
        self.publish(ViewportEvent::Resize(container_height));
    }

    pub fn publish(&self, event: ViewportEvent) {
        let mut hub = self.hub.borrow_mut();
        let capacity = hub.capacity;
        let mut compacted = 0usize;
        for (_, queue) in hub.queues.iter_mut() {
            if queue.len() >= capacity {
                compact(queue);
                compacted += 1;
            }
            queue.push(event);
        }
        if compacted > 0 {
            adebug!(compacted, capacity, "undrained viewport queues compacted");
        }
    }
}

/// Keeps only the last scroll and the last resize, in the order they were published.
fn compact(queue: &mut Vec<ViewportEvent>) {
    let last_scroll = queue
        .iter()
        .rposition(|e| matches!(e, ViewportEvent::Scroll(_)));
    let last_resize = queue
        .iter()
        .rposition(|e| matches!(e, ViewportEvent::Resize(_)));
    let mut index = 0;
    queue.retain(|_| {
        let keep = Some(index) == last_scroll || Some(index) == last_resize;
        index += 1;
        keep
    });
}

/// A live registration on a [`ViewportEvents`] hub.
///
/// Events queue up until drained. Dropping the subscription unsubscribes; a subscription whose
/// hub is gone simply yields nothing.
#[derive(Debug)]
pub struct ScrollSubscription {
    id: u64,
    hub: Weak<RefCell<Hub>>,
}

impl ScrollSubscription {
    /// Whether the hub still exists and this subscription is registered on it.
    pub fn is_active(&self) -> bool {
        self.hub
            .upgrade()
            .is_some_and(|hub| hub.borrow().queues.iter().any(|(id, _)| *id == self.id))
    }

    /// Moves every queued event into `out` (appending, oldest first).
    pub fn drain_into(&self, out: &mut Vec<ViewportEvent>) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut hub = hub.borrow_mut();
        if let Some((_, queue)) = hub.queues.iter_mut().find(|(id, _)| *id == self.id) {
            out.append(queue);
        }
    }

    pub fn drain(&self) -> Vec<ViewportEvent> {
        let mut out = Vec::new();
        self.drain_into(&mut out);
        out
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut hub = hub.borrow_mut();
        hub.queues.retain(|(id, _)| *id != self.id);
        adebug!(id = self.id, subscribers = hub.queues.len(), "unsubscribe");
    }
}
