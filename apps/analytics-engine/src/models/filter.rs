//! Trade list filtering.
//!
//! Mirrors the dashboard's global filter bar: an optional exit-time window,
//! a symbol search, a side toggle, and a tag search. All predicates are
//! conjunctive; an empty filter passes everything through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trade::{Trade, TradeSide};

/// Conjunctive filter over a trade list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilter {
    /// Window start. The window is only applied when both bounds are set.
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    /// Window end, inclusive.
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring match on the symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Exact side match. `None` means both sides.
    #[serde(default)]
    pub side: Option<TradeSide>,
    /// Case-insensitive substring match against any of the trade's tags.
    #[serde(default)]
    pub tag: Option<String>,
}

impl TradeFilter {
    /// Check whether a single trade passes every active predicate.
    #[must_use]
    pub fn matches(&self, trade: &Trade) -> bool {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if trade.exit_time < from || trade.exit_time > to {
                return false;
            }
        }

        if let Some(symbol) = &self.symbol {
            let needle = symbol.to_lowercase();
            if !trade.symbol.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(side) = self.side {
            if trade.side != side {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            let needle = tag.to_lowercase();
            if !trade
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }

    /// Apply the filter, returning matching trades in input order.
    #[must_use]
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
