// ============================================================================
// Operation Module
// Cancelable observation of long-running operations
// ============================================================================
//
// This module provides:
// - make_cancelable: wrap a pending operation so its outcome can be disowned
// - CancelHandle: idempotent, synchronous cancellation of that observation
// - OperationRegistry: explicit owner of outstanding handles, released at teardown
// - spawn_cancelable: tokio-backed variant (feature "async")
//
// Canceling never aborts the underlying work, it only hides its outcome.

mod cancelable;
mod registry;
#[cfg(feature = "async")]
mod spawn;

pub use cancelable::{make_cancelable, CancelHandle, CancelableOperation, Settlement};
pub use registry::OperationRegistry;
#[cfg(feature = "async")]
pub use spawn::{spawn_cancelable, TaskError};
