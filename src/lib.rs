// ============================================================================
// Transaction & Amount Core Library
// Cancelable transaction observation and exact token amounts for trading UIs
// ============================================================================

//! # Tx Amount Core
//!
//! The concurrency-and-precision core of a token trading front end.
//!
//! ## Features
//!
//! - **Exact token amounts**: lossless conversion between on-chain smallest
//!   units and decimal text, with no floating point anywhere
//! - **Bounded decimal input**: state machine for a live amount field with
//!   min/max rejection and correction from authoritative values
//! - **Cancelable operations**: stop observing a pending transaction without
//!   any late state update leaking through
//! - **Notifications**: pending-confirmation tracking with explicit teardown
//!
//! ## Example
//!
//! ```rust
//! use tx_amount_core::prelude::*;
//! use std::sync::Arc;
//!
//! // 0..=100 tokens with 2 decimals
//! let config = InputConfig::new(2)
//!     .with_min(TokenAmount::ZERO)
//!     .with_max(TokenAmount::from_i128(10_000));
//! let mut input = BoundedDecimalInput::new(config, TokenAmount::ZERO, Arc::new(NoOpEventHandler));
//!
//! assert_eq!(input.edit("12.5"), Ok(TokenAmount::from_i128(1_250)));
//! assert!(input.edit("250").is_err());
//! assert_eq!(input.current_text(), "12.5");
//!
//! // The upstream recompute echoes the amount back: the text is kept
//! input.set_value(TokenAmount::from_i128(1_250));
//! assert_eq!(input.current_text(), "12.5");
//!
//! // Stop caring about a pending confirmation
//! let (confirmation, handle) = make_cancelable(async { Ok::<_, ()>("mined") });
//! handle.cancel();
//! assert!(futures::executor::block_on(confirmation).is_canceled());
//! ```

pub mod domain;
pub mod engine;
pub mod input;
pub mod interfaces;
pub mod numeric;
pub mod operation;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        InputConfig, Notification, NotificationId, NotificationKind, Side, Token,
    };
    pub use crate::engine::{NotificationItem, NotificationList};
    pub use crate::input::{
        BoundedDecimalInput, EditRejection, InputState, InputTransition, InputView,
        RangeRejection,
    };
    pub use crate::interfaces::{EventHandler, InputEvent, LoggingEventHandler, NoOpEventHandler};
    pub use crate::numeric::{
        to_display_string, to_smallest_units, NumericError, NumericResult, TokenAmount,
    };
    pub use crate::operation::{
        make_cancelable, CancelHandle, CancelableOperation, OperationRegistry, Settlement,
    };
    #[cfg(feature = "async")]
    pub use crate::operation::{spawn_cancelable, TaskError};
}
