use crate::PositionCache;

pub(crate) const DEFAULT_MEASURE_EPSILON: f64 = 0.5;

/// Result of feeding one observed size back into the cache.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasureOutcome {
    /// The cache was updated; `delta` is `new size - previous size`.
    Applied { delta: f64 },
    /// The observed size was within epsilon of the cached one; nothing changed.
    Unchanged,
    /// Measurement is disabled, the index is out of range, or the size is not finite.
    Ignored,
}

impl MeasureOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Feeds observed item sizes into a [`PositionCache`] and coalesces the resulting
/// re-resolutions.
///
/// The cache write is synchronous. The re-resolution is not: an applied measurement raises a
/// single pending flag which the frame driver consumes once, however many measurements landed
/// since the previous frame.
///
/// Size changes within `epsilon` of the cached size are dropped, so a measurement that feeds a
/// re-render that re-measures the same size settles instead of looping.
#[derive(Clone, Debug)]
pub struct MeasurementLoop {
    epsilon: f64,
    enabled: bool,
    pending: bool,
}

impl Default for MeasurementLoop {
    fn default() -> Self {
        Self::new(DEFAULT_MEASURE_EPSILON)
    }
}

impl MeasurementLoop {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: sanitize_epsilon(epsilon),
            enabled: true,
            pending: false,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = sanitize_epsilon(epsilon);
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops any pending recompute.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending = false;
        }
    }

    pub fn on_item_measured(
        &mut self,
        cache: &mut PositionCache,
        index: usize,
        observed_size: f64,
    ) -> MeasureOutcome {
        if !self.enabled {
            return MeasureOutcome::Ignored;
        }
        if !observed_size.is_finite() {
            lwarn!(index, "ignoring non-finite measurement");
            return MeasureOutcome::Ignored;
        }
        let Some(current) = cache.get(index) else {
            ldebug!(index, len = cache.len(), "ignoring out-of-range measurement");
            return MeasureOutcome::Ignored;
        };

        let observed = observed_size.max(cache.min_item_size());
        let delta = observed - current.size;
        if delta.abs() <= self.epsilon {
            return MeasureOutcome::Unchanged;
        }

        ltrace!(index, previous = current.size, observed, "on_item_measured");
        cache.set_measured(index, observed);
        self.pending = true;
        MeasureOutcome::Applied { delta }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumes the pending flag. Returns `true` at most once per burst of measurements.
    pub fn take_pending(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    /// Drops a pending recompute without running it.
    pub fn cancel(&mut self) {
        if self.pending {
            ldebug!("discarding pending measurement recompute");
        }
        self.pending = false;
    }
}

fn sanitize_epsilon(epsilon: f64) -> f64 {
    if epsilon.is_finite() && epsilon >= 0.0 {
        epsilon
    } else {
        DEFAULT_MEASURE_EPSILON
    }
}
