use alloc::vec::Vec;

use crate::key::{KeyIndexMap, KeySet, ListKey};
use crate::{PositionCache, RenderKey, RenderedItem, VisibleRange};

/// The output of one dispatch pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch<K, N> {
    pub items: Vec<RenderedItem<K, N>>,
    /// How many items were emitted under a [`RenderKey::Placeholder`].
    pub key_fallbacks: usize,
}

/// Turns a resolved range into positioned, keyed render instructions.
///
/// Keys are guaranteed unique within one pass: when the caller's key function returns `None`
/// or a key already emitted earlier in the pass, the item is emitted under
/// `RenderKey::Placeholder(index)` and a warning is logged. No item is ever dropped.
///
/// The dispatcher also remembers which index each key was emitted for in the most recent pass,
/// so measurement callbacks that only know the key can be routed back to an index.
#[derive(Clone, Debug)]
pub struct RenderDispatcher<K> {
    seen: KeySet<K>,
    last_pass: KeyIndexMap<RenderKey<K>>,
}

impl<K: ListKey> Default for RenderDispatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ListKey> RenderDispatcher<K> {
    pub fn new() -> Self {
        Self {
            seen: KeySet::<K>::new(),
            last_pass: KeyIndexMap::<RenderKey<K>>::new(),
        }
    }

    pub fn dispatch<T, N>(
        &mut self,
        range: Option<VisibleRange>,
        items: &[T],
        cache: &mut PositionCache,
        mut key_fn: impl FnMut(&T, usize) -> Option<K>,
        mut render_fn: impl FnMut(&T, usize) -> N,
    ) -> Dispatch<K, N> {
        self.seen.clear();
        self.last_pass.clear();

        let Some(range) = range else {
            return Dispatch {
                items: Vec::new(),
                key_fallbacks: 0,
            };
        };

        debug_assert!(
            items.len() == cache.len(),
            "collection length ({}) and position cache length ({}) diverged",
            items.len(),
            cache.len()
        );

        let mut out = Vec::with_capacity(range.count());
        let mut key_fallbacks = 0usize;

        for index in range.indexes() {
            let (Some(item), Some(record)) = (items.get(index), cache.get(index)) else {
                lwarn!(index, count = items.len(), "dispatch: index out of bounds");
                break;
            };

            let key = match key_fn(item, index) {
                Some(k) if !self.seen.contains(&k) => {
                    self.seen.insert(k.clone());
                    RenderKey::Item(k)
                }
                Some(_) => {
                    lwarn!(
                        index,
                        "duplicate item key; rendering under a placeholder key to keep identities unique"
                    );
                    key_fallbacks += 1;
                    RenderKey::Placeholder(index)
                }
                None => {
                    lwarn!(index, "missing item key; rendering under a placeholder key");
                    key_fallbacks += 1;
                    RenderKey::Placeholder(index)
                }
            };

            self.last_pass.insert(key.clone(), index);
            out.push(RenderedItem {
                key,
                index,
                offset: record.offset,
                size: record.size,
                node: render_fn(item, index),
            });
        }

        ltrace!(
            start = range.start,
            end = range.end,
            emitted = out.len(),
            key_fallbacks,
            "dispatch"
        );

        Dispatch {
            items: out,
            key_fallbacks,
        }
    }

    /// Returns the index the key was emitted for in the most recent pass.
    pub fn index_of(&self, key: &RenderKey<K>) -> Option<usize> {
        self.last_pass.get(key).copied()
    }

    /// Forgets the most recent pass (e.g. after the collection was replaced).
    pub fn clear(&mut self) {
        self.seen.clear();
        self.last_pass.clear();
    }
}
