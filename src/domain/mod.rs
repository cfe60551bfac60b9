// ============================================================================
// Domain Models Module
// Contains the core domain entities and value objects
// ============================================================================

pub mod config;
pub mod notification;

pub use config::InputConfig;
pub use notification::{Notification, NotificationId, NotificationKind, Side, Token};
