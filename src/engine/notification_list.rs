// ============================================================================
// Notification List
// Transaction notifications and the confirmations they wait for
// ============================================================================

use crate::domain::{Notification, NotificationId};
use crate::operation::{make_cancelable, OperationRegistry};
use parking_lot::RwLock;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A notification plus whether its transaction is still unconfirmed
#[derive(Debug)]
pub struct NotificationItem {
    notification: Notification,
    pending: AtomicBool,
}

impl NotificationItem {
    fn new(notification: Notification) -> Self {
        Self {
            notification,
            pending: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> NotificationId {
        self.notification.id
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn title(&self) -> String {
        self.notification.title()
    }

    fn settle(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

/// Notifications shown to the user, newest first.
///
/// The list owns the observation of every pending confirmation. Observations
/// end when the confirmation settles, when the item is dismissed, or at
/// [`teardown`](Self::teardown); after the latter two nothing the
/// confirmation does can touch the list.
pub struct NotificationList {
    /// Newest first
    items: RwLock<Vec<Arc<NotificationItem>>>,

    /// Cancel handles of confirmations still being observed
    pending_ops: Arc<OperationRegistry<NotificationId>>,
}

impl NotificationList {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            pending_ops: Arc::new(OperationRegistry::new()),
        }
    }

    /// Add a notification at the top of the list
    pub fn push(&self, notification: Notification) -> NotificationId {
        let id = notification.id;
        self.items
            .write()
            .insert(0, Arc::new(NotificationItem::new(notification)));
        id
    }

    /// Observe the transaction confirmation of notification `id`.
    ///
    /// Marks the item pending and returns the observation for the caller to
    /// drive (await or spawn it). Settlement clears the pending flag. Returns
    /// `None` if `id` is unknown or its kind does not wait for a
    /// confirmation.
    pub fn watch<F, T, E>(&self, id: NotificationId, confirmation: F) -> Option<impl Future<Output = ()>>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let item = self.find(&id)?;
        if !item.notification.kind.awaits_confirmation() {
            return None;
        }

        item.pending.store(true, Ordering::Release);
        let (confirmation, handle) = make_cancelable(confirmation);
        self.pending_ops.register(id, handle);

        let confirmed = (Arc::clone(&item), Arc::clone(&self.pending_ops));
        let failed = (item, Arc::clone(&self.pending_ops));

        Some(confirmation.observe(
            move |_| {
                let (item, pending_ops) = confirmed;
                tracing::debug!(title = %item.title(), "transaction confirmed");
                item.settle();
                pending_ops.forget(&id);
            },
            move |error| {
                let (item, pending_ops) = failed;
                tracing::warn!(title = %item.title(), %error, "transaction failed");
                item.settle();
                pending_ops.forget(&id);
            },
        ))
    }

    /// Remove a notification, releasing its pending confirmation.
    pub fn dismiss(&self, id: &NotificationId) -> bool {
        self.pending_ops.release(id);

        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id() != *id);
        items.len() != before
    }

    /// Release every pending confirmation.
    ///
    /// Items keep whatever pending flag they had; no settlement will change
    /// it afterwards. Returns how many observations were released.
    pub fn teardown(&self) -> usize {
        let released = self.pending_ops.release_all();
        tracing::debug!(released, "notification list torn down");
        released
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn find(&self, id: &NotificationId) -> Option<Arc<NotificationItem>> {
        self.items
            .read()
            .iter()
            .find(|item| item.id() == *id)
            .map(Arc::clone)
    }

    pub fn is_pending(&self, id: &NotificationId) -> Option<bool> {
        self.find(id).map(|item| item.is_pending())
    }

    /// Snapshot of the items, newest first
    pub fn items(&self) -> Vec<Arc<NotificationItem>> {
        self.items.read().clone()
    }

    /// Number of confirmations still being observed
    pub fn outstanding(&self) -> usize {
        self.pending_ops.outstanding()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Default for NotificationList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationList")
            .field("items", &self.len())
            .field("outstanding", &self.outstanding())
            .finish()
    }
}
