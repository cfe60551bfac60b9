// ============================================================================
// Cancelable Operation
// Observation of a pending operation that the observer can disown
// ============================================================================

//! Wraps a pending operation so that its owner can stop caring about it.
//!
//! # Cancellation only stops observation
//!
//! [`CancelHandle::cancel`] does **not** abort the underlying work. The wrapper
//! stops polling the future it holds and reports [`Settlement::Canceled`];
//! whether the work itself keeps running depends on what that future is. Wrap
//! a handle to work that runs independently (a `oneshot::Receiver`, a tokio
//! `JoinHandle`, see `spawn_cancelable`) and the
//! work runs to completion or failure regardless, with its outcome discarded.
//!
//! # Ordering
//!
//! Cancellation is observed synchronously: once `cancel()` returns, no later
//! poll can deliver `Resolved` or `Rejected`, even if the underlying future
//! already settled and was simply not polled yet.
//!
//! There is no timeout here. Race the wrapped future against a timer before
//! wrapping it (e.g. `tokio::time::timeout`) if one is needed.

use futures::future::FusedFuture;
use futures::task::AtomicWaker;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Settlement
// ============================================================================

/// Outcome delivered by a [`CancelableOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Settlement<T, E> {
    /// The operation succeeded before anyone canceled it
    Resolved(T),
    /// The operation failed before anyone canceled it
    Rejected(E),
    /// The observer canceled; any outcome of the operation was dropped
    Canceled,
}

impl<T, E> Settlement<T, E> {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Settlement::Canceled)
    }

    /// The operation's own result, or `None` if it was canceled.
    pub fn into_result(self) -> Option<Result<T, E>> {
        match self {
            Settlement::Resolved(value) => Some(Ok(value)),
            Settlement::Rejected(error) => Some(Err(error)),
            Settlement::Canceled => None,
        }
    }
}

// ============================================================================
// Cancel Handle
// ============================================================================

#[derive(Debug, Default)]
struct CancelState {
    canceled: AtomicBool,
    waker: AtomicWaker,
}

impl CancelState {
    #[inline]
    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}

/// Disowns interest in a [`CancelableOperation`].
///
/// Cloning yields another handle to the same operation.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    state: Arc<CancelState>,
}

impl CancelHandle {
    /// Cancel observation of the operation.
    ///
    /// Idempotent, and a no-op if the operation already settled. Returns `true`
    /// only for the call that actually set the flag.
    pub fn cancel(&self) -> bool {
        let first = !self.state.canceled.swap(true, Ordering::AcqRel);
        if first {
            tracing::debug!("pending operation canceled by its owner");
            // Let a task blocked on the operation finish with `Canceled`
            self.state.waker.wake();
        }
        first
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.state.is_canceled()
    }
}

// ============================================================================
// Cancelable Operation
// ============================================================================

/// A pending operation whose outcome can be unsubscribed from.
///
/// Resolves to [`Settlement`]. Once canceled it resolves to
/// `Settlement::Canceled` and never to the operation's own outcome.
/// Polling after completion returns `Pending`.
#[must_use = "futures do nothing unless polled"]
pub struct CancelableOperation<F> {
    inner: Option<Pin<Box<F>>>,
    state: Arc<CancelState>,
}

/// Wrap `operation` so that its outcome can be disowned.
///
/// # Example
/// ```
/// use tx_amount_core::operation::{make_cancelable, Settlement};
///
/// let (confirmation, handle) = make_cancelable(async { Ok::<_, ()>("mined") });
/// handle.cancel();
/// let settlement = futures::executor::block_on(confirmation);
/// assert_eq!(settlement, Settlement::Canceled);
/// ```
pub fn make_cancelable<F, T, E>(operation: F) -> (CancelableOperation<F>, CancelHandle)
where
    F: Future<Output = Result<T, E>>,
{
    let state = Arc::new(CancelState::default());
    let handle = CancelHandle {
        state: Arc::clone(&state),
    };

    (
        CancelableOperation {
            inner: Some(Box::pin(operation)),
            state,
        },
        handle,
    )
}

impl<F, T, E> CancelableOperation<F>
where
    F: Future<Output = Result<T, E>>,
{
    /// Another handle that cancels this operation.
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.state.is_canceled()
    }

    /// Run `on_resolved` or `on_rejected` once the operation settles.
    ///
    /// If the operation is canceled first, neither continuation runs and the
    /// returned future simply completes.
    pub async fn observe<S, R>(self, on_resolved: S, on_rejected: R)
    where
        S: FnOnce(T),
        R: FnOnce(E),
    {
        match self.await {
            Settlement::Resolved(value) => on_resolved(value),
            Settlement::Rejected(error) => on_rejected(error),
            Settlement::Canceled => {},
        }
    }

    fn finish_canceled(&mut self) -> Poll<Settlement<T, E>> {
        self.inner = None;
        Poll::Ready(Settlement::Canceled)
    }
}

impl<F, T, E> Future for CancelableOperation<F>
where
    F: Future<Output = Result<T, E>>,
{
    type Output = Settlement<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.inner.is_none() {
            return Poll::Pending;
        }
        if this.state.is_canceled() {
            return this.finish_canceled();
        }

        this.state.waker.register(cx.waker());
        // A cancel between the first check and registration would be missed
        if this.state.is_canceled() {
            return this.finish_canceled();
        }

        let polled = match this.inner.as_mut() {
            Some(inner) => inner.as_mut().poll(cx),
            None => return Poll::Pending,
        };
        let result = match polled {
            Poll::Ready(result) => result,
            Poll::Pending => return Poll::Pending,
        };

        // Cancellation wins over a settlement that raced it
        if this.state.is_canceled() {
            tracing::trace!("dropping settlement of canceled operation");
            return this.finish_canceled();
        }

        this.inner = None;
        Poll::Ready(match result {
            Ok(value) => Settlement::Resolved(value),
            Err(error) => Settlement::Rejected(error),
        })
    }
}

impl<F, T, E> FusedFuture for CancelableOperation<F>
where
    F: Future<Output = Result<T, E>>,
{
    fn is_terminated(&self) -> bool {
        self.inner.is_none()
    }
}

impl<F> fmt::Debug for CancelableOperation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelableOperation")
            .field("canceled", &self.state.is_canceled())
            .field("terminated", &self.inner.is_none())
            .finish()
    }
}
