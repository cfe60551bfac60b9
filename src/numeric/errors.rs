// ============================================================================
// Numeric Errors
// Error types for smallest-unit amount conversions
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur while converting token amounts.
///
/// These are recoverable by design of the callers: a text field treats any of
/// them as "no valid amount yet" and keeps its previous text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericError {
    /// Result exceeded the 256-bit maximum
    Overflow,
    /// Result below the 256-bit minimum
    Underflow,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string is not a plain decimal number
    InvalidInput,
    /// Number of decimal places is not representable by the target type
    ScaleOutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: more fractional digits than the token supports"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::ScaleOutOfRange => {
                write!(f, "scale out of range: too many decimal places")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
