// ============================================================================
// Bounded Decimal Input
// State machine behind a live numeric text field for token amounts
// ============================================================================

use crate::domain::InputConfig;
use crate::interfaces::{EventHandler, InputEvent};
use crate::numeric::{to_display_string, to_smallest_units, NumericError, TokenAmount};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events produced by a single transition
pub type InputEvents = SmallVec<[InputEvent; 2]>;

// ============================================================================
// Rejections
// ============================================================================

/// A syntactically valid amount outside the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RangeRejection {
    BelowMin { min: TokenAmount },
    AboveMax { max: TokenAmount },
}

/// Why an edit was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditRejection {
    /// The text is not a decimal amount at the token's precision
    Malformed(NumericError),
    /// The amount is outside `[min, max]`
    OutOfRange(RangeRejection),
}

impl fmt::Display for EditRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditRejection::Malformed(error) => write!(f, "malformed amount: {}", error),
            EditRejection::OutOfRange(RangeRejection::BelowMin { min }) => {
                write!(f, "amount below minimum of {} units", min)
            },
            EditRejection::OutOfRange(RangeRejection::AboveMax { max }) => {
                write!(f, "amount above maximum of {} units", max)
            },
        }
    }
}

// ============================================================================
// Input State Machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputState {
    /// Text reflects the authoritative value
    Synced = 0,
    /// Text is a user edit not yet echoed back by the owner
    Editing = 1,
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTransition {
    /// A new authoritative value arrived from upstream
    ExternalValue(TokenAmount),
    /// The user changed the text
    UserEdit(String),
    /// The hosting view became active
    Activate,
}

/// Stateless projection of the input for whatever renders it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputView {
    pub text: String,
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
    pub autofocus: bool,
}

/// Editable decimal amount with min/max bounds.
///
/// Keeps the raw text the user typed while it still parses to the
/// authoritative value, and overwrites it with the canonical rendering when
/// it no longer does. Edits that parse outside `[min, max]` are refused
/// outright, so the field can never pass through an out-of-range value,
/// not even transiently while typing.
///
/// Transitions are applied one at a time through `&mut self`.
pub struct BoundedDecimalInput {
    config: InputConfig,
    /// Last authoritative value from upstream
    value: TokenAmount,
    current_text: String,
    state: InputState,
    focus_requested: bool,
    event_handler: Arc<dyn EventHandler>,
}

impl BoundedDecimalInput {
    /// Create an input showing `value` in canonical form.
    pub fn new(config: InputConfig, value: TokenAmount, event_handler: Arc<dyn EventHandler>) -> Self {
        let current_text = to_display_string(value, config.decimals);
        Self {
            config,
            value,
            current_text,
            state: InputState::Synced,
            focus_requested: false,
            event_handler,
        }
    }

    /// Apply a transition, forward its events to the handler and return them.
    pub fn apply(&mut self, transition: InputTransition) -> InputEvents {
        let events = match transition {
            InputTransition::ExternalValue(value) => self.external_value(value),
            InputTransition::UserEdit(text) => {
                let (_, event) = self.user_edit(text);
                smallvec![event]
            },
            InputTransition::Activate => self.activation(),
        };

        self.dispatch(&events);
        events
    }

    /// Deliver a new authoritative value.
    ///
    /// Returns `true` if the text was overwritten.
    pub fn set_value(&mut self, value: TokenAmount) -> bool {
        let events = self.apply(InputTransition::ExternalValue(value));
        events
            .iter()
            .any(|event| matches!(event, InputEvent::TextCorrected { .. }))
    }

    /// Apply a user edit. On success the parsed amount has been sent upstream.
    pub fn edit(&mut self, text: impl Into<String>) -> Result<TokenAmount, EditRejection> {
        let (outcome, event) = self.user_edit(text.into());
        self.dispatch(&[event]);
        outcome
    }

    /// Signal that the hosting view became active.
    ///
    /// Returns `true` if focus was requested by this call.
    pub fn activate(&mut self) -> bool {
        let events = self.apply(InputTransition::Activate);
        !events.is_empty()
    }

    /// Parse `text` the way an edit would, without applying it.
    pub fn check_edit(&self, text: &str) -> Result<TokenAmount, EditRejection> {
        let candidate =
            to_smallest_units(text, self.config.decimals).map_err(EditRejection::Malformed)?;

        if let Some(min) = self.config.min {
            if candidate < min {
                return Err(EditRejection::OutOfRange(RangeRejection::BelowMin { min }));
            }
        }
        if let Some(max) = self.config.max {
            if candidate > max {
                return Err(EditRejection::OutOfRange(RangeRejection::AboveMax { max }));
            }
        }

        Ok(candidate)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub fn value(&self) -> TokenAmount {
        self.value
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Render the bounds and step the same way as the text.
    pub fn view(&self) -> InputView {
        let render = |amount: Option<TokenAmount>| {
            amount.map(|amount| to_display_string(amount, self.config.decimals))
        };

        InputView {
            text: self.current_text.clone(),
            min: render(self.config.min),
            max: render(self.config.max),
            step: render(self.config.step),
            autofocus: self.config.autofocus,
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn external_value(&mut self, value: TokenAmount) -> InputEvents {
        self.value = value;
        self.state = InputState::Synced;

        match to_smallest_units(&self.current_text, self.config.decimals) {
            // Same amount, keep the user's formatting (e.g. trailing zeros)
            Ok(parsed) if parsed == value => InputEvents::new(),
            _ => {
                let text = to_display_string(value, self.config.decimals);
                let previous = std::mem::replace(&mut self.current_text, text.clone());
                tracing::debug!(%previous, %text, "authoritative value replaced input text");
                smallvec![InputEvent::TextCorrected { previous, text }]
            },
        }
    }

    fn user_edit(&mut self, text: String) -> (Result<TokenAmount, EditRejection>, InputEvent) {
        match self.check_edit(&text) {
            Ok(amount) => {
                self.current_text = text;
                self.state = InputState::Editing;
                (Ok(amount), InputEvent::ValueChanged { amount })
            },
            Err(reason) => {
                tracing::debug!(%text, %reason, "input edit rejected");
                (Err(reason), InputEvent::EditRejected { text, reason })
            },
        }
    }

    fn activation(&mut self) -> InputEvents {
        if self.config.autofocus && !self.focus_requested {
            self.focus_requested = true;
            smallvec![InputEvent::FocusRequested]
        } else {
            InputEvents::new()
        }
    }

    fn dispatch(&self, events: &[InputEvent]) {
        if !events.is_empty() {
            self.event_handler.on_events(events.to_vec());
        }
    }
}

impl fmt::Debug for BoundedDecimalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedDecimalInput")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("current_text", &self.current_text)
            .field("state", &self.state)
            .field("focus_requested", &self.focus_requested)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOpEventHandler;
    use parking_lot::Mutex;
    use proptest::prelude::*;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<InputEvent>>,
    }

    impl RecordingHandler {
        fn changes(&self) -> Vec<TokenAmount> {
            self.events
                .lock()
                .iter()
                .filter_map(|event| match event {
                    InputEvent::ValueChanged { amount } => Some(*amount),
                    _ => None,
                })
                .collect()
        }

        fn count(&self) -> usize {
            self.events.lock().len()
        }
    }

    impl EventHandler for RecordingHandler {
        fn on_event(&self, event: InputEvent) {
            self.events.lock().push(event);
        }
    }

    fn units(n: i128) -> TokenAmount {
        TokenAmount::from_i128(n)
    }

    fn make_input(config: InputConfig, value: i128) -> (BoundedDecimalInput, Arc<RecordingHandler>) {
        let handler = Arc::new(RecordingHandler::default());
        let input = BoundedDecimalInput::new(config, units(value), handler.clone());
        (input, handler)
    }

    #[test]
    fn test_initial_state() {
        let (input, handler) = make_input(InputConfig::new(2), 150);

        assert_eq!(input.current_text(), "1.50");
        assert_eq!(input.state(), InputState::Synced);
        assert_eq!(input.value(), units(150));
        assert_eq!(handler.count(), 0);
    }

    #[test]
    fn test_accepted_edit_keeps_text_verbatim() {
        let (mut input, handler) = make_input(InputConfig::new(2), 0);

        assert_eq!(input.edit("1.5"), Ok(units(150)));
        assert_eq!(input.current_text(), "1.5");
        assert_eq!(input.state(), InputState::Editing);
        assert_eq!(handler.changes(), vec![units(150)]);

        // The owner has not echoed anything back yet
        assert_eq!(input.value(), units(0));
    }

    #[test]
    fn test_out_of_range_edit_leaves_state_untouched() {
        let config = InputConfig::new(0)
            .with_min(units(0))
            .with_max(units(100));
        let (mut input, handler) = make_input(config, 50);

        assert_eq!(
            input.edit("150"),
            Err(EditRejection::OutOfRange(RangeRejection::AboveMax {
                max: units(100)
            }))
        );
        assert_eq!(input.current_text(), "50");
        assert_eq!(input.state(), InputState::Synced);
        assert!(handler.changes().is_empty());

        assert_eq!(
            input.edit("-1"),
            Err(EditRejection::OutOfRange(RangeRejection::BelowMin {
                min: units(0)
            }))
        );
        assert!(handler.changes().is_empty());
    }

    #[test]
    fn test_cannot_type_through_out_of_range_prefix() {
        let config = InputConfig::new(0).with_min(units(10));
        let (mut input, handler) = make_input(config, 10);

        // Typing "50" one key at a time fails at "5"
        assert!(input.edit("5").is_err());
        assert_eq!(input.current_text(), "10");
        assert!(handler.changes().is_empty());
    }

    #[test]
    fn test_malformed_edit_rejected() {
        let (mut input, handler) = make_input(InputConfig::new(2), 100);

        assert_eq!(
            input.edit("1.2.3"),
            Err(EditRejection::Malformed(NumericError::InvalidInput))
        );
        assert_eq!(
            input.edit("1.234"),
            Err(EditRejection::Malformed(NumericError::PrecisionLoss))
        );
        assert_eq!(input.current_text(), "1.00");
        assert!(handler.changes().is_empty());
        assert_eq!(handler.count(), 2);
    }

    #[test]
    fn test_empty_edit_is_zero() {
        let (mut input, handler) = make_input(InputConfig::token_amount(18), 5);

        assert_eq!(input.edit(""), Ok(TokenAmount::ZERO));
        assert_eq!(input.current_text(), "");
        assert_eq!(handler.changes(), vec![TokenAmount::ZERO]);
    }

    #[test]
    fn test_external_correction_overwrites() {
        let (mut input, handler) = make_input(InputConfig::new(2), 150);
        input.edit("1.5").unwrap();

        assert!(input.set_value(units(200)));
        assert_eq!(input.current_text(), "2.00");
        assert_eq!(input.state(), InputState::Synced);
        assert!(handler.events.lock().contains(&InputEvent::TextCorrected {
            previous: "1.5".to_string(),
            text: "2.00".to_string(),
        }));
    }

    #[test]
    fn test_external_echo_keeps_formatting() {
        let (mut input, _handler) = make_input(InputConfig::new(2), 150);

        assert!(!input.set_value(units(150)));
        assert_eq!(input.current_text(), "1.50");

        // In-progress edit survives the owner echoing the amount back
        let amount = input.edit("1.5").unwrap();
        assert!(!input.set_value(amount));
        assert_eq!(input.current_text(), "1.5");
        assert_eq!(input.state(), InputState::Synced);

        let amount = input.edit("1.").unwrap();
        assert!(!input.set_value(amount));
        assert_eq!(input.current_text(), "1.");
    }

    #[test]
    fn test_autofocus_requested_once() {
        let (mut input, handler) = make_input(InputConfig::new(0).with_autofocus(true), 0);

        assert!(input.activate());
        assert!(!input.activate());
        assert_eq!(*handler.events.lock(), vec![InputEvent::FocusRequested]);

        let (mut plain, handler) = make_input(InputConfig::new(0), 0);
        assert!(!plain.activate());
        assert_eq!(handler.count(), 0);
    }

    #[test]
    fn test_apply_returns_dispatched_events() {
        let (mut input, handler) = make_input(InputConfig::new(1), 0);

        let events = input.apply(InputTransition::UserEdit("2.5".to_string()));
        assert_eq!(events.as_slice(), &[InputEvent::ValueChanged { amount: units(25) }]);

        let events = input.apply(InputTransition::ExternalValue(units(30)));
        assert_eq!(events.len(), 1);
        assert_eq!(input.current_text(), "3.0");
        assert_eq!(handler.count(), 2);
    }

    #[test]
    fn test_view_projection() {
        let config = InputConfig::new(2)
            .with_min(units(0))
            .with_max(units(12_345))
            .with_step(units(5));
        let input = BoundedDecimalInput::new(config, units(100), Arc::new(NoOpEventHandler));

        assert_eq!(
            input.view(),
            InputView {
                text: "1.00".to_string(),
                min: Some("0.00".to_string()),
                max: Some("123.45".to_string()),
                step: Some("0.05".to_string()),
                autofocus: false,
            }
        );
    }

    #[test]
    fn test_rejection_display() {
        let reason = EditRejection::OutOfRange(RangeRejection::AboveMax { max: units(100) });
        assert_eq!(reason.to_string(), "amount above maximum of 100 units");
    }

    #[derive(Debug, Clone)]
    enum Step {
        Edit(String),
        External(i128),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            "-?[0-9]{0,4}(\\.[0-9]{0,3})?".prop_map(Step::Edit),
            (-20_000i128..20_000).prop_map(Step::External),
        ]
    }

    proptest! {
        #[test]
        fn prop_text_always_parses_and_syncs(steps in prop::collection::vec(step(), 1..40)) {
            let config = InputConfig::new(2).with_min(units(-5_000)).with_max(units(5_000));
            let (mut input, _handler) = make_input(config, 0);

            for step in steps {
                match step {
                    Step::Edit(text) => {
                        let before = input.current_text().to_string();
                        match input.edit(text.clone()) {
                            Ok(amount) => {
                                prop_assert_eq!(input.current_text(), text.as_str());
                                prop_assert!(amount >= units(-5_000) && amount <= units(5_000));
                            },
                            Err(_) => {
                                prop_assert_eq!(input.current_text(), before.as_str());
                            },
                        }
                    },
                    Step::External(value) => {
                        input.set_value(units(value));
                        prop_assert_eq!(input.state(), InputState::Synced);
                        prop_assert_eq!(to_smallest_units(input.current_text(), 2), Ok(units(value)));
                    },
                }
                prop_assert!(to_smallest_units(input.current_text(), 2).is_ok());
            }
        }
    }
}
