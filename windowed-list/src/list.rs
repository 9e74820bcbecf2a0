use alloc::sync::Arc;

use crate::dispatcher::RenderDispatcher;
use crate::key::ListKey;
use crate::measurement::MeasurementLoop;
use crate::resolver;
use crate::{
    Align, Frame, ListOptions, MeasureOutcome, PositionCache, PositionRecord, RenderKey,
    ViewportState, VisibleRange,
};

/// A windowed list over a collection of `T`, keyed by `K`.
///
/// Each instance owns its own position cache; nothing is shared between lists. The type holds
/// no UI objects: the host feeds it scroll offsets, container heights and measured sizes, and
/// pulls [`Frame`]s out of it.
///
/// A typical frame:
/// 1. `apply_scroll_event` / `set_container_height` as the viewport changes,
/// 2. `frame(render)` to get the positioned items,
/// 3. `on_item_measured` / `measure_key` once the host has laid the items out.
///
/// Measurements update positions immediately but only mark a recompute as pending; the next
/// `frame` picks it up, so a burst of measurements costs one re-resolution.
pub struct WindowedList<T, K> {
    options: ListOptions<T, K>,
    items: Arc<[T]>,
    cache: PositionCache,
    measurement: MeasurementLoop,
    dispatcher: RenderDispatcher<K>,
    scroll_offset: f64,
    last_range: Option<VisibleRange>,
    stale: bool,
}

impl<T, K: ListKey> WindowedList<T, K> {
    pub fn new(items: impl Into<Arc<[T]>>, options: ListOptions<T, K>) -> Self {
        let items = items.into();
        ldebug!(
            count = items.len(),
            container_height = options.container_height,
            overscan = options.overscan,
            "WindowedList::new"
        );
        let cache = PositionCache::new(items.len(), Arc::clone(&options.estimate_size))
            .with_item_spacing(options.item_spacing)
            .with_min_item_size(options.min_item_size);
        let mut measurement = MeasurementLoop::new(options.measure_epsilon);
        measurement.set_enabled(options.measurement_enabled);
        Self {
            options,
            items,
            cache,
            measurement,
            dispatcher: RenderDispatcher::new(),
            scroll_offset: 0.0,
            last_range: None,
            stale: true,
        }
    }

    pub fn options(&self) -> &ListOptions<T, K> {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions<T, K>) {
        let key_fn_unchanged = Arc::ptr_eq(&self.options.get_item_key, &options.get_item_key);
        let estimate_unchanged = Arc::ptr_eq(&self.options.estimate_size, &options.estimate_size);
        self.options = options;
        ltrace!(
            container_height = self.options.container_height,
            overscan = self.options.overscan,
            "WindowedList::set_options"
        );

        if !estimate_unchanged {
            self.measurement.cancel();
            self.cache.set_estimate(Arc::clone(&self.options.estimate_size));
        }
        if !key_fn_unchanged {
            self.dispatcher.clear();
        }
        self.cache.set_min_item_size(self.options.min_item_size);
        self.cache.set_item_spacing(self.options.item_spacing);
        self.measurement.set_epsilon(self.options.measure_epsilon);
        self.measurement.set_enabled(self.options.measurement_enabled);
        self.stale = true;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions<T, K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the collection.
    ///
    /// Passing the same `Arc` is a no-op. A different one discards any pending recompute and
    /// invalidates every cached position; the scroll offset is kept (and clamped on the next
    /// resolve).
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) {
            return;
        }
        ldebug!(
            previous = self.items.len(),
            count = items.len(),
            "WindowedList::set_items"
        );
        self.items = items;
        self.measurement.cancel();
        self.cache.reset(self.items.len());
        self.dispatcher.clear();
        self.stale = true;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset without notifying `on_scroll`. Non-finite values become `0`.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = if offset.is_finite() { offset } else { 0.0 };
    }

    /// Applies a scroll offset reported by the viewport and fires `on_scroll`.
    pub fn apply_scroll_event(&mut self, offset: f64) {
        ltrace!(offset, "apply_scroll_event");
        self.set_scroll_offset(offset);
        if let Some(cb) = &self.options.on_scroll {
            cb(self.scroll_offset);
        }
    }

    /// Sets the scroll offset clamped to the scrollable range.
    pub fn set_scroll_offset_clamped(&mut self, offset: f64) {
        let height = self.options.container_height;
        self.scroll_offset = resolver::clamp_scroll_offset(&mut self.cache, offset, height);
    }

    pub fn container_height(&self) -> f64 {
        self.options.container_height
    }

    pub fn set_container_height(&mut self, container_height: f64) {
        self.options.container_height = container_height;
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            scroll_offset: self.scroll_offset,
            container_height: self.options.container_height,
        }
    }

    pub fn restore_viewport_state(&mut self, state: ViewportState) {
        self.set_container_height(state.container_height);
        self.set_scroll_offset_clamped(state.scroll_offset);
    }

    fn has_viewport(&self) -> bool {
        let h = self.options.container_height;
        h.is_finite() && h > 0.0
    }

    /// Height of the scrollable track, or `0` while the container has no usable height.
    pub fn total_content_height(&mut self) -> f64 {
        if !self.has_viewport() {
            return 0.0;
        }
        self.cache.total_size()
    }

    pub fn max_scroll_offset(&mut self) -> f64 {
        resolver::max_scroll_offset(&mut self.cache, self.options.container_height)
    }

    pub fn position(&mut self, index: usize) -> Option<PositionRecord> {
        self.cache.get(index)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.cache.is_measured(index)
    }

    pub fn position_cache(&self) -> &PositionCache {
        &self.cache
    }

    pub fn index_at_offset(&mut self, offset: f64) -> Option<usize> {
        resolver::index_at_offset(&mut self.cache, offset)
    }

    /// The range of items at least partially inside the viewport (no overscan).
    pub fn visible_range(&mut self) -> Option<VisibleRange> {
        resolver::resolve_visible(
            &mut self.cache,
            self.scroll_offset,
            self.options.container_height,
        )
    }

    /// The visible range widened by `overscan`: the items a frame renders.
    pub fn range(&mut self) -> Option<VisibleRange> {
        resolver::resolve(
            &mut self.cache,
            self.scroll_offset,
            self.options.container_height,
            self.options.overscan,
        )
    }

    /// The range the most recent frame was rendered for.
    pub fn last_range(&self) -> Option<VisibleRange> {
        self.last_range
    }

    pub fn has_pending_recompute(&self) -> bool {
        self.measurement.is_pending()
    }

    /// Whether the next `frame` would differ from the previous one: a measurement recompute
    /// is pending, the collection or options changed, or the resolved range moved.
    pub fn needs_frame(&mut self) -> bool {
        self.stale || self.measurement.is_pending() || self.range() != self.last_range
    }

    /// Feeds back the laid-out size of the item at `index`.
    pub fn on_item_measured(&mut self, index: usize, observed_size: f64) -> MeasureOutcome {
        self.measurement
            .on_item_measured(&mut self.cache, index, observed_size)
    }

    /// Feeds back a size for the item rendered under `key` in the most recent frame.
    ///
    /// Keys that were not part of that frame are ignored.
    pub fn measure_key(&mut self, key: &RenderKey<K>, observed_size: f64) -> MeasureOutcome {
        let Some(index) = self.dispatcher.index_of(key) else {
            return MeasureOutcome::Ignored;
        };
        self.on_item_measured(index, observed_size)
    }

    /// Feeds back many sizes at once. Returns how many were applied.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, f64)>) -> usize {
        measurements
            .into_iter()
            .filter(|&(index, size)| self.on_item_measured(index, size).is_applied())
            .count()
    }

    /// Drops every measured size and falls back to estimates.
    pub fn reset_measurements(&mut self) {
        self.measurement.cancel();
        self.cache.invalidate();
        self.stale = true;
    }

    /// Computes the scroll offset that brings `index` into view.
    pub fn scroll_to_index_offset(&mut self, index: usize, align: Align) -> f64 {
        resolver::scroll_to_index_offset(
            &mut self.cache,
            index,
            align,
            self.scroll_offset,
            self.options.container_height,
        )
    }

    /// Scrolls to `index` (no animation) and returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    /// Resolves the current range and renders it.
    ///
    /// Consumes any pending measurement recompute.
    pub fn frame<N>(&mut self, render_item: impl FnMut(&T, usize) -> N) -> Frame<K, N> {
        if self.measurement.take_pending() {
            ltrace!("applying deferred measurement recompute");
        }
        self.stale = false;

        let range = self.range();
        self.last_range = range;
        if range.is_none() {
            self.dispatcher.clear();
            return Frame::empty();
        }

        let get_item_key = Arc::clone(&self.options.get_item_key);
        let dispatch = self.dispatcher.dispatch(
            range,
            &self.items[..],
            &mut self.cache,
            |item, index| get_item_key(item, index),
            render_item,
        );

        Frame {
            items: dispatch.items,
            total_content_height: self.cache.total_size(),
            range,
            key_fallbacks: dispatch.key_fallbacks,
        }
    }
}

impl<T, K> core::fmt::Debug for WindowedList<T, K>
where
    K: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedList")
            .field("options", &self.options)
            .field("count", &self.items.len())
            .field("cache", &self.cache)
            .field("measurement", &self.measurement)
            .field("dispatcher", &self.dispatcher)
            .field("scroll_offset", &self.scroll_offset)
            .field("last_range", &self.last_range)
            .finish_non_exhaustive()
    }
}
