//! Offset → index resolution over a [`PositionCache`].
//!
//! Every function here settles the cache first, so offsets are monotonically non-decreasing and
//! binary search over them is valid. Item sizes are clamped to a positive minimum by the cache,
//! which makes item ends strictly increasing as well.

use crate::{Align, PositionCache, VisibleRange};

/// Largest scroll offset that still fills the viewport: `max(total - viewport_height, 0)`.
pub fn max_scroll_offset(cache: &mut PositionCache, viewport_height: f64) -> f64 {
    let view = finite_or_zero(viewport_height).max(0.0);
    (cache.total_size() - view).max(0.0)
}

/// Clamps `scroll_offset` into `[0, max_scroll_offset]`. Non-finite offsets map to `0`.
pub fn clamp_scroll_offset(
    cache: &mut PositionCache,
    scroll_offset: f64,
    viewport_height: f64,
) -> f64 {
    let max = max_scroll_offset(cache, viewport_height);
    finite_or_zero(scroll_offset).clamp(0.0, max)
}

/// Resolves the strictly visible range (no overscan).
///
/// The start is the first item whose end lies past `scroll_offset`; an item that begins exactly
/// at `scroll_offset` is included. The end is the last item that begins before
/// `scroll_offset + viewport_height`.
///
/// Returns `None` when the list is empty or `viewport_height` is not a positive finite number.
pub fn resolve_visible(
    cache: &mut PositionCache,
    scroll_offset: f64,
    viewport_height: f64,
) -> Option<VisibleRange> {
    if cache.is_empty() || !(viewport_height.is_finite() && viewport_height > 0.0) {
        return None;
    }

    let scroll = clamp_scroll_offset(cache, scroll_offset, viewport_height);
    let viewport_end = scroll + viewport_height;

    let records = cache.settle();
    let last = records.len() - 1;
    let start = records.partition_point(|r| r.end() <= scroll).min(last);
    let end = records
        .partition_point(|r| r.offset < viewport_end)
        .saturating_sub(1)
        .clamp(start, last);

    Some(VisibleRange::new(start, end))
}

/// Resolves the visible range widened by `overscan` items on both sides.
pub fn resolve(
    cache: &mut PositionCache,
    scroll_offset: f64,
    viewport_height: f64,
    overscan: usize,
) -> Option<VisibleRange> {
    let visible = resolve_visible(cache, scroll_offset, viewport_height)?;
    let range = visible.widen(overscan, cache.len());
    ltrace!(
        scroll_offset,
        viewport_height,
        start = range.start,
        end = range.end,
        "resolve"
    );
    Some(range)
}

/// Returns the index of the item covering `offset`.
///
/// Offsets before the first item map to `0`, offsets past the end map to the last item, and an
/// offset inside the spacing between two items maps to the item after the gap.
pub fn index_at_offset(cache: &mut PositionCache, offset: f64) -> Option<usize> {
    if cache.is_empty() {
        return None;
    }
    let offset = finite_or_zero(offset);
    let records = cache.settle();
    let last = records.len() - 1;
    Some(records.partition_point(|r| r.end() <= offset).min(last))
}

/// Computes the scroll offset that brings `index` into view with the given alignment.
///
/// `index` is clamped to the last item. The result is clamped to the scrollable range.
pub fn scroll_to_index_offset(
    cache: &mut PositionCache,
    index: usize,
    align: Align,
    scroll_offset: f64,
    viewport_height: f64,
) -> f64 {
    let Some(last) = cache.len().checked_sub(1) else {
        return 0.0;
    };
    let Some(item) = cache.get(index.min(last)) else {
        return 0.0;
    };
    let view = finite_or_zero(viewport_height).max(0.0);

    let target = match align {
        Align::Start => item.offset,
        Align::End => item.end() - view,
        Align::Center => item.offset + item.size / 2.0 - view / 2.0,
        Align::Auto => {
            let cur = finite_or_zero(scroll_offset);
            if item.offset >= cur && item.end() <= cur + view {
                cur
            } else if item.offset < cur {
                item.offset
            } else {
                item.end() - view
            }
        }
    };

    clamp_scroll_offset(cache, target, viewport_height)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
