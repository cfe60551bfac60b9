// ============================================================================
// Event Handler Interface
// Defines the contract for consuming amount input events
// ============================================================================

use crate::input::EditRejection;
use crate::numeric::TokenAmount;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by a bounded decimal input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputEvent {
    /// The user committed a valid edit; the amount goes upstream
    ValueChanged { amount: TokenAmount },

    /// An authoritative value replaced the text being edited
    TextCorrected { previous: String, text: String },

    /// An edit was refused and the text left untouched
    EditRejected { text: String, reason: EditRejection },

    /// The input wants keyboard focus (autofocus on first activation)
    FocusRequested,
}

/// Event handler trait for processing input events
/// Implementations forward amounts upstream, move focus, log, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an input event
    fn on_event(&self, event: InputEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<InputEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// Closures work as handlers, e.g. a plain `onChange` callback
impl<F> EventHandler for F
where
    F: Fn(InputEvent) + Send + Sync,
{
    fn on_event(&self, event: InputEvent) {
        self(event)
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: InputEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: InputEvent) {
        tracing::debug!("Amount input event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(InputEvent::FocusRequested);
        // Should not panic
    }

    #[test]
    fn test_closure_handler_receives_batch() {
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        let handler = move |event: InputEvent| {
            if matches!(event, InputEvent::ValueChanged { .. }) {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        };

        handler.on_events(vec![
            InputEvent::ValueChanged {
                amount: TokenAmount::from_i128(1),
            },
            InputEvent::FocusRequested,
            InputEvent::ValueChanged {
                amount: TokenAmount::from_i128(2),
            },
        ]);

        assert_eq!(changes.load(Ordering::Relaxed), 2);
    }
}
