// ============================================================================
// Numeric Module
// Exact smallest-unit amounts for on-chain token values
// ============================================================================
//
// This module provides:
// - TokenAmount: signed 256-bit integer of a token's smallest units
// - to_display_string / to_smallest_units: lossless text conversions
// - NumericError: Error types for conversions and arithmetic
//
// Design principles:
// - No floating-point operations
// - All conversions return Result (no panics)
// - Decimal places are supplied per call, never stored in the amount
// - Excess fractional digits are rejected, never rounded

mod errors;
mod token_amount;

pub use errors::{NumericError, NumericResult};
pub use token_amount::{to_display_string, to_smallest_units, TokenAmount};
