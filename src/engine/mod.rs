// ============================================================================
// Engine Module
// Consumers that tie amounts and pending operations together
// ============================================================================

mod notification_list;

pub use notification_list::{NotificationItem, NotificationList};
