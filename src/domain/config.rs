// ============================================================================
// Amount Input Configuration
// Decimal places, bounds and UI affordances for a numeric amount field
// ============================================================================

use crate::numeric::{to_display_string, TokenAmount};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a bounded decimal input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Number of fractional digits of the token (e.g. 18 for most ERC-20s)
    pub decimals: u8,

    /// Optional: Smallest accepted amount, in smallest units
    pub min: Option<TokenAmount>,

    /// Optional: Largest accepted amount, in smallest units
    pub max: Option<TokenAmount>,

    /// Optional: Increment hint for the UI, in smallest units
    /// Display only, never enforced
    pub step: Option<TokenAmount>,

    /// Request focus once when the input is first activated
    pub autofocus: bool,
}

impl InputConfig {
    /// Create a new configuration with required parameters
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals,
            min: None,
            max: None,
            step: None,
            autofocus: false,
        }
    }

    /// Builder method: Set lower bound
    pub fn with_min(mut self, min: TokenAmount) -> Self {
        self.min = Some(min);
        self
    }

    /// Builder method: Set upper bound
    pub fn with_max(mut self, max: TokenAmount) -> Self {
        self.max = Some(max);
        self
    }

    /// Builder method: Set step hint
    pub fn with_step(mut self, step: TokenAmount) -> Self {
        self.step = Some(step);
        self
    }

    /// Builder method: Request focus on activation
    pub fn with_autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(format!(
                    "Minimum {} exceeds maximum {}",
                    to_display_string(min, self.decimals),
                    to_display_string(max, self.decimals)
                ));
            }
        }

        if let Some(step) = self.step {
            if !step.is_positive() {
                return Err("Step must be positive".to_string());
            }
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl InputConfig {
    /// Non-negative amount of an ERC-20 style token
    pub fn token_amount(decimals: u8) -> Self {
        Self::new(decimals).with_min(TokenAmount::ZERO)
    }

    /// Amount bounded by an available balance, e.g. a sell form
    pub fn spendable(decimals: u8, balance: TokenAmount) -> Self {
        Self::token_amount(decimals).with_max(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = InputConfig::new(18);

        assert_eq!(config.decimals, 18);
        assert_eq!(config.min, None);
        assert!(!config.autofocus);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = InputConfig::new(2)
            .with_min(TokenAmount::ZERO)
            .with_max(TokenAmount::from_i128(10_000))
            .with_step(TokenAmount::from_i128(50))
            .with_autofocus(true);

        assert_eq!(config.max, Some(TokenAmount::from_i128(10_000)));
        assert_eq!(config.step, Some(TokenAmount::from_i128(50)));
        assert!(config.autofocus);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let inverted = InputConfig::new(2)
            .with_min(TokenAmount::from_i128(500))
            .with_max(TokenAmount::from_i128(100));
        assert_eq!(
            inverted.validate(),
            Err("Minimum 5.00 exceeds maximum 1.00".to_string())
        );

        let zero_step = InputConfig::new(0).with_step(TokenAmount::ZERO);
        assert!(zero_step.validate().is_err());
    }

    #[test]
    fn test_preset_configs() {
        let spendable = InputConfig::spendable(6, TokenAmount::from_i128(1_000_000));
        assert_eq!(spendable.min, Some(TokenAmount::ZERO));
        assert_eq!(spendable.max, Some(TokenAmount::from_i128(1_000_000)));
        assert!(spendable.validate().is_ok());
    }
}
