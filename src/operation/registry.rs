// ============================================================================
// Operation Registry
// Explicit ownership of outstanding cancel handles
// ============================================================================

use super::cancelable::CancelHandle;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Arena of outstanding pending operations, keyed by their owner's id.
///
/// An owner that starts observing something registers the handle here and
/// releases it at a well-defined teardown point. Releasing cancels;
/// forgetting drops a handle whose operation already settled.
pub struct OperationRegistry<K> {
    handles: Mutex<HashMap<K, CancelHandle>>,
}

impl<K> OperationRegistry<K>
where
    K: Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Track `handle` under `key`.
    ///
    /// A handle already registered under the same key is canceled, since
    /// nothing could release it afterwards.
    pub fn register(&self, key: K, handle: CancelHandle) {
        let replaced = self.handles.lock().insert(key, handle);
        if let Some(previous) = replaced {
            tracing::debug!("replacing outstanding operation, canceling the previous one");
            previous.cancel();
        }
    }

    /// Cancel and drop the operation registered under `key`.
    ///
    /// Returns `false` if nothing was registered.
    pub fn release(&self, key: &K) -> bool {
        let removed = self.handles.lock().remove(key);
        match removed {
            Some(handle) => {
                tracing::debug!(?key, "releasing pending operation");
                handle.cancel();
                true
            },
            None => false,
        }
    }

    /// Drop the handle under `key` without canceling it.
    pub fn forget(&self, key: &K) -> bool {
        self.handles.lock().remove(key).is_some()
    }

    /// Cancel every outstanding operation. Returns how many were released.
    pub fn release_all(&self) -> usize {
        let drained: Vec<CancelHandle> = self.handles.lock().drain().map(|(_, h)| h).collect();
        for handle in &drained {
            handle.cancel();
        }
        if !drained.is_empty() {
            tracing::debug!(count = drained.len(), "released all pending operations");
        }
        drained.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.handles.lock().contains_key(key)
    }

    /// Number of operations still being observed.
    pub fn outstanding(&self) -> usize {
        self.handles.lock().len()
    }
}

impl<K> Default for OperationRegistry<K>
where
    K: Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for OperationRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("outstanding", &self.handles.lock().len())
            .finish()
    }
}
