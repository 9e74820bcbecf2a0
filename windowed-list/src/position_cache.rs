use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::PositionRecord;

/// Returns the estimated size of the item at an index.
pub type EstimateSize = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

pub(crate) const DEFAULT_MIN_ITEM_SIZE: f64 = 1.0;

/// Per-index offsets and sizes for one list.
///
/// Records are created lazily from the estimate function the first time an index (or any index
/// after it) is read. Offsets are a running prefix sum that is only re-derived from the first
/// changed index forward, and only when something reads past that point, so a reader never
/// observes an offset that is stale with respect to an earlier size change.
#[derive(Clone)]
pub struct PositionCache {
    len: usize,
    estimate: EstimateSize,
    item_spacing: f64,
    min_item_size: f64,
    records: Vec<PositionRecord>,
    // Offsets of `records[..derived]` satisfy the prefix-sum invariant.
    derived: usize,
}

impl PositionCache {
    pub fn new(len: usize, estimate: EstimateSize) -> Self {
        Self {
            len,
            estimate,
            item_spacing: 0.0,
            min_item_size: DEFAULT_MIN_ITEM_SIZE,
            records: Vec::new(),
            derived: 0,
        }
    }

    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.set_item_spacing(item_spacing);
        self
    }

    pub fn with_min_item_size(mut self, min_item_size: f64) -> Self {
        self.set_min_item_size(min_item_size);
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn item_spacing(&self) -> f64 {
        self.item_spacing
    }

    pub fn min_item_size(&self) -> f64 {
        self.min_item_size
    }

    pub fn estimate(&self) -> &EstimateSize {
        &self.estimate
    }

    /// Number of records whose offsets are currently derived.
    pub fn derived_len(&self) -> usize {
        self.derived
    }

    /// Number of records that hold an observed size.
    pub fn measured_count(&self) -> usize {
        self.records.iter().filter(|r| r.measured).count()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.records.get(index).is_some_and(|r| r.measured)
    }

    /// Returns the record at `index`, creating estimate-based records up to it if needed.
    pub fn get(&mut self, index: usize) -> Option<PositionRecord> {
        if index >= self.len {
            return None;
        }
        self.derive_through(index);
        Some(self.records[index])
    }

    /// Records an observed size for `index`.
    ///
    /// Offsets of every later index are invalidated and re-derived before the next read.
    pub fn set_measured(&mut self, index: usize, size: f64) {
        if index >= self.len {
            return;
        }
        self.materialize_through(index);
        let size = self.sanitize(size);
        let record = &mut self.records[index];
        record.size = size;
        record.measured = true;
        self.derived = self.derived.min(index + 1);
    }

    pub fn total_size(&mut self) -> f64 {
        match self.len.checked_sub(1) {
            Some(last) => {
                self.derive_through(last);
                self.records[last].end()
            }
            None => 0.0,
        }
    }

    /// Derives every record and returns them in index order.
    ///
    /// Offsets in the returned slice are non-decreasing, which is what makes binary search over
    /// it valid.
    pub fn settle(&mut self) -> &[PositionRecord] {
        if let Some(last) = self.len.checked_sub(1) {
            self.derive_through(last);
        }
        &self.records[..self.len]
    }

    /// Drops every record. The next read rebuilds from the estimate function.
    pub fn invalidate(&mut self) {
        ldebug!(len = self.len, measured = self.measured_count(), "PositionCache::invalidate");
        self.records.clear();
        self.derived = 0;
    }

    /// Invalidates and changes the item count.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.invalidate();
    }

    /// Swaps the estimate function. A different function (by pointer identity) invalidates the
    /// cache; the same `Arc` is a no-op.
    pub fn set_estimate(&mut self, estimate: EstimateSize) {
        if Arc::ptr_eq(&self.estimate, &estimate) {
            return;
        }
        self.estimate = estimate;
        self.invalidate();
    }

    /// Changes the space between consecutive items. Sizes are kept; offsets are re-derived.
    pub fn set_item_spacing(&mut self, item_spacing: f64) {
        let item_spacing = if item_spacing.is_finite() {
            item_spacing.max(0.0)
        } else {
            0.0
        };
        if self.item_spacing == item_spacing {
            return;
        }
        self.item_spacing = item_spacing;
        self.derived = 0;
    }

    pub fn set_min_item_size(&mut self, min_item_size: f64) {
        let min_item_size = if min_item_size.is_finite() && min_item_size > 0.0 {
            min_item_size
        } else {
            DEFAULT_MIN_ITEM_SIZE
        };
        if self.min_item_size == min_item_size {
            return;
        }
        self.min_item_size = min_item_size;
        self.invalidate();
    }

    fn sanitize(&self, size: f64) -> f64 {
        if size.is_finite() {
            size.max(self.min_item_size)
        } else {
            self.min_item_size
        }
    }

    fn materialize_through(&mut self, index: usize) {
        let start = self.records.len();
        if start > index {
            return;
        }
        self.records.reserve(index + 1 - start);
        for i in start..=index {
            let raw = (self.estimate)(i);
            if !(raw.is_finite() && raw >= self.min_item_size) {
                ltrace!(index = i, raw, "estimate clamped to min_item_size");
            }
            let size = self.sanitize(raw);
            self.records.push(PositionRecord {
                offset: 0.0,
                size,
                measured: false,
            });
        }
        self.derived = self.derived.min(start);
    }

    fn derive_through(&mut self, index: usize) {
        self.materialize_through(index);
        if self.derived > index {
            return;
        }
        let spacing = self.item_spacing;
        let mut next = match self.derived.checked_sub(1) {
            Some(prev) => self.records[prev].end() + spacing,
            None => 0.0,
        };
        for record in &mut self.records[self.derived..=index] {
            record.offset = next;
            next = record.end() + spacing;
        }
        self.derived = index + 1;
    }
}

impl core::fmt::Debug for PositionCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PositionCache")
            .field("len", &self.len)
            .field("item_spacing", &self.item_spacing)
            .field("min_item_size", &self.min_item_size)
            .field("materialized", &self.records.len())
            .field("derived", &self.derived)
            .finish_non_exhaustive()
    }
}
