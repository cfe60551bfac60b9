// ============================================================================
// Spawned Operations
// Run work on tokio and observe it through a cancelable wrapper
// ============================================================================

use super::cancelable::{make_cancelable, CancelHandle, CancelableOperation};
use std::fmt;
use std::future::Future;

/// Failure of a spawned operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError<E> {
    /// The operation itself returned an error
    Failed(E),
    /// The task panicked or was aborted by the runtime
    Join(String),
}

impl<E: fmt::Display> fmt::Display for TaskError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Failed(error) => write!(f, "operation failed: {}", error),
            TaskError::Join(reason) => write!(f, "operation task did not complete: {}", reason),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for TaskError<E> {}

/// Spawn `operation` on the current tokio runtime and observe it cancelably.
///
/// The spawned task runs to completion whatever happens to the observer:
/// canceling or dropping the returned operation only detaches from it.
///
/// # Panics
/// Panics if called outside a tokio runtime.
pub fn spawn_cancelable<F, T, E>(
    operation: F,
) -> (
    CancelableOperation<impl Future<Output = Result<T, TaskError<E>>>>,
    CancelHandle,
)
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let task = tokio::spawn(operation);

    make_cancelable(async move {
        match task.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(TaskError::Failed(error)),
            Err(join_error) => {
                tracing::warn!(%join_error, "spawned operation did not complete");
                Err(TaskError::Join(join_error.to_string()))
            },
        }
    })
}
