// ============================================================================
// Token Amount
// Exact conversion between smallest units and decimal display strings
// ============================================================================

use super::errors::{NumericError, NumericResult};
use ethnum::I256;
use std::fmt;
use std::str::FromStr;

/// A signed integer number of a token's smallest units.
///
/// This is the on-chain representation: `1.5` of an 18-decimal token is
/// stored as `1_500_000_000_000_000_000`. The amount has no scale of its own;
/// every conversion to or from text takes the token's `decimals` explicitly.
///
/// Internally a 256-bit signed integer, wide enough for realistic `uint256`
/// balances. No floating point is involved anywhere.
///
/// # Example
/// ```
/// use tx_amount_core::numeric::TokenAmount;
///
/// let amount = TokenAmount::parse_units("1.5", 2).unwrap();
/// assert_eq!(amount, TokenAmount::from_i128(150));
/// assert_eq!(amount.to_display_string(2), "1.50");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TokenAmount(I256);

impl TokenAmount {
    /// Zero units
    pub const ZERO: Self = Self(I256::ZERO);

    /// Largest representable amount
    pub const MAX: Self = Self(I256::MAX);

    /// Smallest representable amount
    pub const MIN: Self = Self(I256::MIN);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a raw 256-bit integer of smallest units.
    #[inline]
    pub const fn from_raw(raw: I256) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn from_i128(units: i128) -> Self {
        Self(I256::new(units))
    }

    /// Parse a decimal string into smallest units.
    ///
    /// See [`to_smallest_units`] for the accepted syntax.
    #[inline]
    pub fn parse_units(text: &str, decimals: u8) -> NumericResult<Self> {
        to_smallest_units(text, decimals)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn raw_value(self) -> I256 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == I256::ZERO
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_positive()
    }

    /// Render as a decimal string with exactly `decimals` fractional digits.
    #[inline]
    pub fn to_display_string(self, decimals: u8) -> String {
        to_display_string(self, decimals)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or(if rhs.is_positive() {
            NumericError::Overflow
        } else {
            NumericError::Underflow
        })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or(if rhs.is_negative() {
            NumericError::Overflow
        } else {
            NumericError::Underflow
        })
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Render `amount / 10^decimals` as a plain decimal string.
///
/// The fractional part always has exactly `decimals` digits, so `200` with
/// two decimals renders as `"2.00"` and `5` with three as `"0.005"`. With
/// `decimals = 0` the integer literal is returned unchanged.
pub fn to_display_string(amount: TokenAmount, decimals: u8) -> String {
    let literal = amount.0.to_string();
    if decimals == 0 {
        return literal;
    }

    let (sign, digits) = match literal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", literal.as_str()),
    };

    let width = decimals as usize + 1;
    let padded = format!("{:0>width$}", digits, width = width);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals as usize);

    format!("{}{}.{}", sign, int_part, frac_part)
}

/// Parse a decimal string into an integer number of smallest units.
///
/// Accepted syntax: optional leading `-`, ASCII digits, at most one `.`, and
/// at least one digit overall (`".5"` and `"1."` are fine). Surrounding
/// whitespace is ignored and empty text is zero.
///
/// Fractional digits beyond `decimals` are only accepted when they are all
/// zeros. Anything else is rejected rather than rounded.
///
/// # Errors
/// - `InvalidInput` for malformed text (exponents, stray characters, multiple points)
/// - `PrecisionLoss` for non-zero digits beyond `decimals`
/// - `Overflow` / `Underflow` if the amount exceeds the 256-bit range
pub fn to_smallest_units(text: &str, decimals: u8) -> NumericResult<TokenAmount> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(TokenAmount::ZERO);
    }

    let (is_negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (int_str, frac_str) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_str) || !is_digits(frac_str) {
        return Err(NumericError::InvalidInput);
    }
    if int_str.is_empty() && frac_str.is_empty() {
        return Err(NumericError::InvalidInput);
    }

    let scale = decimals as usize;
    let frac_str = if frac_str.len() > scale {
        let (kept, excess) = frac_str.split_at(scale);
        if excess.bytes().any(|b| b != b'0') {
            return Err(NumericError::PrecisionLoss);
        }
        kept
    } else {
        frac_str
    };

    let mut digits = String::with_capacity(1 + int_str.len() + scale);
    if is_negative {
        digits.push('-');
    }
    if int_str.is_empty() {
        digits.push('0');
    }
    digits.push_str(int_str);
    digits.push_str(frac_str);
    digits.extend(std::iter::repeat('0').take(scale - frac_str.len()));

    // Only digits reach the parser, so any failure is a range failure
    I256::from_str_radix(&digits, 10)
        .map(TokenAmount)
        .map_err(|_| {
            if is_negative {
                NumericError::Underflow
            } else {
                NumericError::Overflow
            }
        })
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl From<i128> for TokenAmount {
    #[inline]
    fn from(units: i128) -> Self {
        Self::from_i128(units)
    }
}

impl From<u64> for TokenAmount {
    #[inline]
    fn from(units: u64) -> Self {
        Self::from_i128(units as i128)
    }
}

impl From<I256> for TokenAmount {
    #[inline]
    fn from(raw: I256) -> Self {
        Self(raw)
    }
}

impl FromStr for TokenAmount {
    type Err = NumericError;

    /// Parse an integer literal of smallest units, e.g. `"1500000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(NumericError::InvalidInput);
        }
        to_smallest_units(s, 0)
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAmount({})", self.0)
    }
}

/// Displays the raw smallest-unit integer. Use [`to_display_string`] for
/// a human-readable amount.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

/// Largest scale a `rust_decimal::Decimal` can carry
const DECIMAL_MAX_SCALE: u8 = 28;

impl TokenAmount {
    /// Convert to a `rust_decimal::Decimal` carrying `decimals` as its scale.
    ///
    /// # Errors
    /// - `ScaleOutOfRange` if `decimals` exceeds what `Decimal` supports (28)
    /// - `Overflow` if the amount does not fit a 96-bit mantissa
    pub fn to_decimal(self, decimals: u8) -> NumericResult<rust_decimal::Decimal> {
        if decimals > DECIMAL_MAX_SCALE {
            return Err(NumericError::ScaleOutOfRange);
        }

        rust_decimal::Decimal::from_str_exact(&to_display_string(self, decimals))
            .map_err(|_| NumericError::Overflow)
    }

    /// Convert from a `rust_decimal::Decimal` expressed in whole tokens.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if `d` has significant digits beyond `decimals`.
    pub fn from_decimal(d: rust_decimal::Decimal, decimals: u8) -> NumericResult<Self> {
        to_smallest_units(&d.to_string(), decimals)
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for TokenAmount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TokenAmount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
