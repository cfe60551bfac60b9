// ============================================================================
// Input Module
// Editable numeric fields backed by exact token amounts
// ============================================================================

mod bounded_decimal;

pub use bounded_decimal::{
    BoundedDecimalInput, EditRejection, InputEvents, InputState, InputTransition, InputView,
    RangeRejection,
};
