use alloc::sync::Arc;
use alloc::vec::Vec;

use windowed_list::{Align, Frame, ListKey, ListOptions, WindowedList};

use crate::{
    ScrollAnchor, ScrollSubscription, ViewportEvent, ViewportEvents, apply_anchor,
    apply_anchor_by_scan, capture_first_visible_anchor,
};

/// A framework-neutral controller that wraps a [`WindowedList`] and drives it from viewport
/// events.
///
/// This type does not hold any UI objects. Adapters drive it by:
/// - attaching it to a [`ViewportEvents`] hub (or calling `on_scroll` / `on_resize` directly),
/// - calling `tick(render)` once per frame and painting the returned [`Frame`], if any,
/// - reporting laid-out sizes through `list_mut().on_item_measured(..)` or `measure_key(..)`.
///
/// `tick` only renders when something changed: the resolved range moved, a measurement
/// recompute is pending, or the collection/options were replaced.
#[derive(Debug)]
pub struct Controller<T, K> {
    list: WindowedList<T, K>,
    subscription: Option<ScrollSubscription>,
    scratch: Vec<ViewportEvent>,
}

impl<T, K: ListKey> Controller<T, K> {
    pub fn new(items: impl Into<Arc<[T]>>, options: ListOptions<T, K>) -> Self {
        Self::from_list(WindowedList::new(items, options))
    }

    pub fn from_list(list: WindowedList<T, K>) -> Self {
        Self {
            list,
            subscription: None,
            scratch: Vec::new(),
        }
    }

    pub fn list(&self) -> &WindowedList<T, K> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut WindowedList<T, K> {
        &mut self.list
    }

    pub fn into_list(self) -> WindowedList<T, K> {
        self.list
    }

    /// Subscribes to `events`, replacing (and unsubscribing) any previous subscription.
    pub fn attach(&mut self, events: &ViewportEvents) {
        self.subscription = Some(events.subscribe());
    }

    /// Unsubscribes from the current hub. Queued but undrained events are dropped.
    pub fn detach(&mut self) {
        if self.subscription.take().is_some() {
            adebug!("Controller::detach");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(ScrollSubscription::is_active)
    }

    /// Call this when the UI reports a scroll offset change outside of a subscribed hub.
    pub fn on_scroll(&mut self, scroll_offset: f64) {
        self.list.apply_scroll_event(scroll_offset);
    }

    pub fn on_resize(&mut self, container_height: f64) {
        self.list.set_container_height(container_height);
    }

    /// Advances one frame.
    ///
    /// Drains pending viewport events (firing `on_scroll` for each scroll tick), then renders if
    /// the frame would differ from the previous one. Returns `None` when nothing changed.
    pub fn tick<N>(&mut self, render_item: impl FnMut(&T, usize) -> N) -> Option<Frame<K, N>> {
        if let Some(subscription) = &self.subscription {
            subscription.drain_into(&mut self.scratch);
        }
        for event in self.scratch.drain(..) {
            match event {
                ViewportEvent::Scroll(offset) => self.list.apply_scroll_event(offset),
                ViewportEvent::Resize(height) => self.list.set_container_height(height),
            }
        }

        if !self.list.needs_frame() {
            return None;
        }
        let frame = self.list.frame(render_item);
        atrace!(
            items = frame.items.len(),
            total = frame.total_content_height,
            "Controller::tick rendered"
        );
        Some(frame)
    }

    /// Scrolls to `index` immediately (no animation) and returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        let offset = self.list.scroll_to_index_offset(index, align);
        self.list.apply_scroll_event(offset);
        offset
    }

    /// Replaces the collection while keeping the first visible item where it was on screen.
    ///
    /// If that item is gone from the new collection, the scroll offset is only clamped.
    /// Returns `true` when the anchor was preserved.
    pub fn replace_items(&mut self, items: impl Into<Arc<[T]>>) -> bool {
        let anchor = capture_first_visible_anchor(&mut self.list);
        self.list.set_items(items);
        let preserved = anchor
            .as_ref()
            .is_some_and(|anchor| apply_anchor_by_scan(&mut self.list, anchor));
        if !preserved {
            let offset = self.list.scroll_offset();
            self.list.set_scroll_offset_clamped(offset);
        }
        adebug!(count = self.list.len(), preserved, "Controller::replace_items");
        preserved
    }

    pub fn capture_first_visible_anchor(&mut self) -> Option<ScrollAnchor<K>> {
        capture_first_visible_anchor(&mut self.list)
    }

    /// Captures an anchor for the item at a given offset in the viewport.
    ///
    /// For example, `offset_in_viewport = 0.0` anchors the item at the top of the viewport.
    pub fn capture_anchor_at_offset_in_viewport(
        &mut self,
        offset_in_viewport: f64,
    ) -> Option<ScrollAnchor<K>> {
        let scroll = self.list.scroll_offset();
        let index = self.list.index_at_offset(scroll + offset_in_viewport)?;
        let start = self.list.position(index)?.offset;
        let key = (self.list.options().get_item_key)(&self.list.items()[index], index)?;
        Some(ScrollAnchor {
            key,
            offset_in_viewport: scroll - start,
        })
    }

    pub fn apply_anchor(
        &mut self,
        anchor: &ScrollAnchor<K>,
        key_to_index: impl FnMut(&K) -> Option<usize>,
    ) -> bool {
        apply_anchor(&mut self.list, anchor, key_to_index)
    }
}
