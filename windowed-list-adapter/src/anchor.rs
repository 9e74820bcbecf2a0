use core::fmt;

use windowed_list::{ListKey, WindowedList};

/// A scroll anchor that can be used to preserve visual position across collection
/// replacements.
///
/// Typical use cases:
/// - message lists that prepend older messages above the viewport
/// - candidate/job lists re-filtered or re-sorted upstream while the user is mid-scroll
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// The distance from the anchor item's start to the viewport's scroll offset.
    pub offset_in_viewport: f64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the first visible item (by key).
///
/// Returns `None` if nothing is visible or the first visible item has no key.
pub fn capture_first_visible_anchor<T, K: ListKey>(
    list: &mut WindowedList<T, K>,
) -> Option<ScrollAnchor<K>> {
    let index = list.visible_range()?.start;
    let start = list.position(index)?.offset;
    let key = (list.options().get_item_key)(&list.items()[index], index)?;
    Some(ScrollAnchor {
        key,
        offset_in_viewport: list.scroll_offset() - start,
    })
}

/// Applies a previously captured anchor by adjusting the scroll offset.
///
/// The adapter provides a `key_to_index` mapping for the *current* collection.
///
/// Returns `true` when the anchor was applied.
pub fn apply_anchor<T, K: ListKey>(
    list: &mut WindowedList<T, K>,
    anchor: &ScrollAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    let Some(record) = list.position(index) else {
        return false;
    };
    list.set_scroll_offset_clamped(record.offset + anchor.offset_in_viewport);
    true
}

/// Like [`apply_anchor`], but finds the anchor item by scanning the current collection with the
/// list's own key function.
///
/// This is `O(n)`; adapters that already keep a key → index map should use [`apply_anchor`].
pub fn apply_anchor_by_scan<T, K: ListKey>(
    list: &mut WindowedList<T, K>,
    anchor: &ScrollAnchor<K>,
) -> bool {
    let get_item_key = alloc::sync::Arc::clone(&list.options().get_item_key);
    let found = list
        .items()
        .iter()
        .enumerate()
        .position(|(i, item)| get_item_key(item, i).as_ref() == Some(&anchor.key));
    apply_anchor(list, anchor, |_| found)
}
