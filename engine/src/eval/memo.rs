//! Per-function-node memoization of pure applications.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::model::value::DVal;

/// Content-addressed cache owned by a single function node.
///
/// Keys are the canonical serialization of the resolved argument map.
/// Entries are never evicted for the lifetime of the node; the cache is
/// cleared when the node's function name changes. Writes are monotonic —
/// once a key is written its value is stable — so nested recursive
/// evaluation needs no coordination beyond the interior lock.
pub struct MemoCache {
    inner: Mutex<HashMap<String, DVal>>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<DVal> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: String, value: DVal) {
        self.inner.lock().unwrap().insert(key, value);
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoCache {
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.inner.lock().unwrap().clone()),
        }
    }
}

impl fmt::Debug for MemoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache").field("len", &self.len()).finish()
    }
}
