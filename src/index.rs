//! Key-to-handle index
//!
//! The heap never looks keys up itself; callers keep an index from key to the
//! [`NodeHandle`] currently representing it. Operations that re-create nodes
//! (top-k reports, merges) return remap lists that the index applies.

use crate::fibonacci::TopK;
use crate::storage::NodeHandle;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// Maps keys to the heap node currently holding them
#[derive(Debug, Clone)]
pub struct KeyIndex<K> {
    handles: FxHashMap<K, NodeHandle>,
}

impl<K> Default for KeyIndex<K> {
    fn default() -> Self {
        KeyIndex {
            handles: FxHashMap::default(),
        }
    }
}

impl<K: Hash + Eq> KeyIndex<K> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle currently mapped to `key`
    pub fn lookup<Q>(&self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.get(key).copied()
    }

    /// Maps `key` to `handle`, returning the handle it replaced
    pub fn insert_or_update(&mut self, key: K, handle: NodeHandle) -> Option<NodeHandle> {
        self.handles.insert(key, handle)
    }

    /// Removes `key`, returning its handle
    pub fn remove<Q>(&mut self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.remove(key)
    }

    /// Applies a `(key, new handle)` remap list
    pub fn apply_remap<I>(&mut self, remap: I)
    where
        I: IntoIterator<Item = (K, NodeHandle)>,
    {
        self.handles.extend(remap);
    }

    /// Rebinds every key reported by a top-k call to its new handle
    pub fn apply_top_k<V>(&mut self, top: &TopK<K, V>)
    where
        K: Clone,
    {
        for (key, handle) in top.remap() {
            match self.handles.get_mut(key) {
                Some(slot) => *slot = handle,
                None => {
                    self.handles.insert(key.clone(), handle);
                }
            }
        }
    }

    /// Keeps only the entries for which `f` returns true
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, NodeHandle) -> bool,
    {
        self.handles.retain(|key, handle| f(key, *handle));
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no key is indexed
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Removes every key
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
