//! Closed trade records and their wire representation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Position side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// Bought first, sold later.
    Long,
    /// Sold first, bought later.
    Short,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            _ => Err(ParseError::UnknownSide(s.to_string())),
        }
    }
}

/// Order type used to open the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Anything the venue reports that is neither market nor limit.
    #[default]
    Other,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "market"),
            Self::Limit => write!(f, "limit"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for OrderType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "market" => Ok(Self::Market),
            "limit" => Ok(Self::Limit),
            "other" => Ok(Self::Other),
            _ => Err(ParseError::UnknownOrderType(s.to_string())),
        }
    }
}

/// Per-category split of the fees paid on a trade.
///
/// The components are expected to sum to the trade's `fees` field; the
/// engine sums them as-is and does not enforce the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FeesBreakdown {
    /// Maker (resting order) fees.
    #[serde(default)]
    pub maker: f64,
    /// Taker (crossing order) fees.
    #[serde(default)]
    pub taker: f64,
    /// Funding, gas, and anything else.
    #[serde(default)]
    pub other: f64,
}

/// An immutable closed position record.
///
/// `pnl` is the realized figure net of fees, precomputed at ingestion. The
/// engine trusts it and never recomputes pnl from entry/exit/side; a trade
/// with `pnl == 0` counts as neither win nor loss for win-rate purposes but
/// still counts toward total-trade counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Opaque unique identifier.
    pub id: String,
    /// Instrument symbol (e.g. "SOL-PERP").
    pub symbol: String,
    /// Position side.
    pub side: TradeSide,
    /// Order type used to open the position.
    #[serde(default)]
    pub order_type: OrderType,
    /// Position size in base units.
    pub size: f64,
    /// Average entry price.
    pub entry_price: f64,
    /// Average exit price.
    pub exit_price: f64,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Exit timestamp (at or after entry by contract, not enforced here).
    pub exit_time: DateTime<Utc>,
    /// Realized pnl, signed, net of fees.
    pub pnl: f64,
    /// Total fees paid (non-negative).
    #[serde(default)]
    pub fees: f64,
    /// Fee split by category.
    #[serde(default)]
    pub fees_breakdown: FeesBreakdown,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// Alpha tags attached by the trader.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the trader has marked this trade as reviewed.
    #[serde(default)]
    pub reviewed: bool,
}

impl Trade {
    /// Check if this trade was profitable.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    /// Check if this trade lost money.
    #[must_use]
    pub fn is_loser(&self) -> bool {
        self.pnl < 0.0
    }

    /// Holding period in minutes, signed.
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        let millis = (self.exit_time - self.entry_time).num_milliseconds();
        millis as f64 / 60_000.0
    }
}
