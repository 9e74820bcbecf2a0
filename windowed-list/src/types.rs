use alloc::vec::Vec;

/// Where an item should land inside the viewport when scrolling to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset if the item is already fully visible, otherwise scroll the
    /// minimal distance.
    Auto,
}

/// The cached layout of a single item.
///
/// `measured = false` means `size` is still the estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRecord {
    pub offset: f64,
    pub size: f64,
    pub measured: bool,
}

impl PositionRecord {
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }
}

/// An inclusive range of item indexes.
///
/// Always satisfies `start <= end`. Empty ranges are expressed as `Option::<VisibleRange>::None`
/// by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "VisibleRange: start={start} > end={end}");
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of indexes in the range (always at least one).
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Widens both bounds by `overscan`, clamped to `[0, count - 1]`.
    pub fn widen(&self, overscan: usize, count: usize) -> Self {
        let last = count.saturating_sub(1);
        Self {
            start: self.start.saturating_sub(overscan).min(last),
            end: self.end.saturating_add(overscan).min(last),
        }
    }

    pub fn indexes(&self) -> core::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// The identity a rendered item is emitted under.
///
/// `Placeholder` keys are synthesized from the index when the caller's key is missing or was
/// already used earlier in the same pass, so they can never collide with a caller key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderKey<K> {
    Item(K),
    Placeholder(usize),
}

impl<K> RenderKey<K> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn item(&self) -> Option<&K> {
        match self {
            Self::Item(k) => Some(k),
            Self::Placeholder(_) => None,
        }
    }
}

/// One positioned render instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<K, N> {
    pub key: RenderKey<K>,
    pub index: usize,
    /// Absolute vertical offset inside the scrollable track.
    pub offset: f64,
    /// Current size (measured or estimated).
    pub size: f64,
    pub node: N,
}

/// Everything a host needs to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<K, N> {
    pub items: Vec<RenderedItem<K, N>>,
    /// Height of the scrollable track.
    pub total_content_height: f64,
    /// The overscanned range the items were rendered for.
    pub range: Option<VisibleRange>,
    /// Number of items emitted under a placeholder key this frame.
    pub key_fallbacks: usize,
}

impl<K, N> Frame<K, N> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_content_height: 0.0,
            range: None,
            key_fallbacks: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
