// ============================================================================
// Notification Domain Model
// ============================================================================

use crate::numeric::{to_display_string, TokenAmount};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Network id of Ethereum mainnet
pub const MAINNET_ID: u64 = 1;

/// Transaction page prefix on the mainnet block explorer
pub const ETHERSCAN_MAINNET_URL: &str = "https://etherscan.io/tx";

/// Transaction page prefix on the Kovan testnet block explorer
pub const ETHERSCAN_KOVAN_URL: &str = "https://kovan.etherscan.io/tx";

/// Length of a `0x`-prefixed 32-byte transaction hash
const TX_HASH_LEN: usize = 66;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

/// Token metadata needed to render an amount
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// What a notification reports. Closed set: adding a kind must be handled
/// everywhere it is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NotificationKind {
    /// Market order submitted on-chain
    Market { side: Side },
    /// Order cancellation submitted on-chain
    CancelOrder,
    /// Limit order signed and posted off-chain
    Limit { side: Side },
    /// One of the user's orders was filled
    OrderFilled { side: Side },
}

impl NotificationKind {
    /// Whether the notification waits for a transaction to be mined
    pub fn awaits_confirmation(&self) -> bool {
        match self {
            NotificationKind::Market { .. } | NotificationKind::CancelOrder => true,
            NotificationKind::Limit { .. } | NotificationKind::OrderFilled { .. } => false,
        }
    }

    /// Operation label used in titles
    pub fn operation_label(&self) -> &'static str {
        match self {
            NotificationKind::Market { side: Side::Buy } => "Market Buy",
            NotificationKind::Market { side: Side::Sell } => "Market Sell",
            NotificationKind::CancelOrder => "Cancelled Order",
            NotificationKind::Limit { side: Side::Buy } => "Limit Buy",
            NotificationKind::Limit { side: Side::Sell } => "Limit Sell",
            NotificationKind::OrderFilled { side: Side::Buy } => "Buy Order Filled",
            NotificationKind::OrderFilled { side: Side::Sell } => "Sell Order Filled",
        }
    }
}

// ============================================================================
// Notification Entity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub token: Token,
    /// Amount in the token's smallest units
    pub amount: TokenAmount,
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        token: Token,
        amount: TokenAmount,
        tx_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            token,
            amount,
            tx_hash: tx_hash.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// e.g. `"Market Buy 1.50 ZRX"`
    pub fn title(&self) -> String {
        format!(
            "{} {} {}",
            self.kind.operation_label(),
            to_display_string(self.amount, self.token.decimals),
            self.token.symbol.to_uppercase()
        )
    }

    /// Block explorer page of the notification's transaction.
    ///
    /// Unknown networks fall back to the Kovan explorer.
    pub fn explorer_url(&self, network_id: Option<u64>) -> String {
        let base = match network_id {
            Some(MAINNET_ID) => ETHERSCAN_MAINNET_URL,
            _ => ETHERSCAN_KOVAN_URL,
        };
        let hash: String = self.tx_hash.chars().take(TX_HASH_LEN).collect();
        format!("{}/{}", base, hash)
    }

    /// Relative age such as `"Just now"` or `"3 minutes ago"`.
    pub fn age_text(&self, now: DateTime<Utc>) -> String {
        const MINUTE: i64 = 60;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;
        const WEEK: i64 = 7 * DAY;
        const MONTH: i64 = 30 * DAY;
        const YEAR: i64 = 365 * DAY;

        let seconds = now.signed_duration_since(self.timestamp).num_seconds();
        let (value, unit) = match seconds {
            s if s < MINUTE => return "Just now".to_string(),
            s if s < HOUR => (s / MINUTE, "minute"),
            s if s < DAY => (s / HOUR, "hour"),
            s if s < WEEK => (s / DAY, "day"),
            s if s < MONTH => (s / WEEK, "week"),
            s if s < YEAR => (s / MONTH, "month"),
            s => (s / YEAR, "year"),
        };

        format!("{} {}{} ago", value, unit, if value > 1 { "s" } else { "" })
    }
}
