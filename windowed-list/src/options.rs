use alloc::sync::Arc;

use crate::measurement::DEFAULT_MEASURE_EPSILON;
use crate::position_cache::{DEFAULT_MIN_ITEM_SIZE, EstimateSize};

/// Returns the identity key of an item, or `None` if it has none.
pub type GetItemKey<T, K> = Arc<dyn Fn(&T, usize) -> Option<K> + Send + Sync>;

/// Fired with the new scroll offset on every scroll event.
pub type OnScrollCallback = Arc<dyn Fn(f64) + Send + Sync>;

pub(crate) const DEFAULT_OVERSCAN: usize = 2;

/// Configuration for [`crate::WindowedList`].
///
/// Closures are stored in `Arc`s so options are cheap to clone: adapters can tweak a field and
/// call `WindowedList::set_options` without reallocating closures. Pointer identity of
/// `estimate_size` matters: a different `Arc` invalidates every cached position.
pub struct ListOptions<T, K> {
    pub estimate_size: EstimateSize,
    pub get_item_key: GetItemKey<T, K>,

    /// Height of the viewport. Non-positive heights render nothing.
    pub container_height: f64,

    /// Items rendered beyond each edge of the viewport.
    pub overscan: usize,

    /// When `false`, measurement callbacks are ignored and estimates are final.
    pub measurement_enabled: bool,

    /// Space between consecutive items (not added after the last one).
    pub item_spacing: f64,

    /// Measured sizes within this distance of the cached size are treated as unchanged.
    ///
    /// Dense text lists usually want a sub-pixel value; fixed-height rows can use a larger one.
    pub measure_epsilon: f64,

    /// Estimated or measured sizes below this (or non-finite ones) are clamped up to it.
    pub min_item_size: f64,

    pub on_scroll: Option<OnScrollCallback>,
}

impl<T, K> Clone for ListOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            estimate_size: Arc::clone(&self.estimate_size),
            get_item_key: Arc::clone(&self.get_item_key),
            container_height: self.container_height,
            overscan: self.overscan,
            measurement_enabled: self.measurement_enabled,
            item_spacing: self.item_spacing,
            measure_epsilon: self.measure_epsilon,
            min_item_size: self.min_item_size,
            on_scroll: self.on_scroll.clone(),
        }
    }
}

impl<T> ListOptions<T, usize> {
    /// Creates options for a list keyed by index.
    ///
    /// Index keys are only stable while the collection is not re-sorted or filtered; prefer
    /// [`ListOptions::new`] with a real identity when it is.
    pub fn keyed_by_index(estimate_size: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(estimate_size, |_, i| Some(i))
    }
}

impl<T, K> ListOptions<T, K> {
    /// Creates options with a custom identity key.
    ///
    /// `get_item_key(item, index)` should return the same key for the same logical item across
    /// collection replacements.
    pub fn new(
        estimate_size: impl Fn(usize) -> f64 + Send + Sync + 'static,
        get_item_key: impl Fn(&T, usize) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        Self {
            estimate_size: Arc::new(estimate_size),
            get_item_key: Arc::new(get_item_key),
            container_height: 0.0,
            overscan: DEFAULT_OVERSCAN,
            measurement_enabled: true,
            item_spacing: 0.0,
            measure_epsilon: DEFAULT_MEASURE_EPSILON,
            min_item_size: DEFAULT_MIN_ITEM_SIZE,
            on_scroll: None,
        }
    }

    pub fn with_estimate_size(
        mut self,
        estimate_size: impl Fn(usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.estimate_size = Arc::new(estimate_size);
        self
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(&T, usize) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_measurement_enabled(mut self, measurement_enabled: bool) -> Self {
        self.measurement_enabled = measurement_enabled;
        self
    }

    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_measure_epsilon(mut self, measure_epsilon: f64) -> Self {
        self.measure_epsilon = measure_epsilon;
        self
    }

    pub fn with_min_item_size(mut self, min_item_size: f64) -> Self {
        self.min_item_size = min_item_size;
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(f64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for ListOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("container_height", &self.container_height)
            .field("overscan", &self.overscan)
            .field("measurement_enabled", &self.measurement_enabled)
            .field("item_spacing", &self.item_spacing)
            .field("measure_epsilon", &self.measure_epsilon)
            .field("min_item_size", &self.min_item_size)
            .finish_non_exhaustive()
    }
}
