//! Cross-section aggregates of a trade list.
//!
//! Hour-of-day, order-type, tag, and activity breakdowns for the analytics
//! and journal views. Unlike the core KPI win rate, the hour and tag
//! aggregates count breakeven trades in their denominators; each function
//! documents its own rule.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::models::trade::{OrderType, Trade};

/// Aggregate of trades closed within one UTC hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyMetrics {
    /// Hour of day, 0 through 23.
    pub hour: u32,
    /// Sum of pnl for the hour.
    pub pnl: f64,
    /// Number of trades closed in the hour.
    pub trades_count: u64,
    /// Wins over all trades in the hour (breakeven counts against).
    pub win_rate: f64,
}

/// Aggregate of trades grouped by entry order type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTypeMetrics {
    /// The order type this row covers.
    pub order_type: OrderType,
    /// Sum of pnl.
    pub pnl: f64,
    /// Sum of fees.
    pub fees: f64,
    /// Number of trades.
    pub trades_count: u64,
}

/// Per-tag performance aggregate for the journal view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAggregate {
    /// The tag.
    pub tag: String,
    /// Sum of pnl across trades carrying the tag.
    pub total_pnl: f64,
    /// Number of trades carrying the tag.
    pub trades_count: u64,
    /// Wins over all tagged trades (breakeven counts against).
    pub win_rate: f64,
    /// Mean pnl of winning tagged trades.
    pub avg_win: f64,
    /// Mean absolute pnl of losing tagged trades (reported positive).
    pub avg_loss: f64,
    /// `winRate * avgWin - (1 - winRate) * avgLoss`.
    pub expectancy: f64,
}

/// Trader activity counters for the achievements view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ActivityStats {
    /// Distinct symbols traded.
    pub unique_symbols: u64,
    /// Trades marked as reviewed.
    pub reviewed_count: u64,
    /// Longest run of consecutive winners in exit-time order.
    pub max_win_streak: u64,
}

/// Group trades by UTC hour of exit time, ascending by hour.
///
/// Only hours with at least one trade appear.
#[must_use]
pub fn calculate_time_of_day_metrics(trades: &[Trade]) -> Vec<HourlyMetrics> {
    let mut hours: BTreeMap<u32, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        hours.entry(trade.exit_time.hour()).or_default().push(trade);
    }

    hours
        .into_iter()
        .map(|(hour, hour_trades)| {
            let wins = hour_trades.iter().filter(|t| t.pnl > 0.0).count();
            HourlyMetrics {
                hour,
                pnl: hour_trades.iter().map(|t| t.pnl).sum(),
                trades_count: hour_trades.len() as u64,
                win_rate: wins as f64 / hour_trades.len() as f64,
            }
        })
        .collect()
}

/// Pnl, fee, and count totals for market and limit entries.
///
/// Always returns exactly two rows, `Market` then `Limit`; trades with
/// order type `Other` are not reported.
#[must_use]
pub fn calculate_order_type_metrics(trades: &[Trade]) -> Vec<OrderTypeMetrics> {
    [OrderType::Market, OrderType::Limit]
        .into_iter()
        .map(|order_type| {
            let subset: Vec<&Trade> =
                trades.iter().filter(|t| t.order_type == order_type).collect();
            OrderTypeMetrics {
                order_type,
                pnl: subset.iter().map(|t| t.pnl).sum(),
                fees: subset.iter().map(|t| t.fees).sum(),
                trades_count: subset.len() as u64,
            }
        })
        .collect()
}

/// Per-tag aggregates, sorted by total pnl descending.
///
/// A trade carrying several tags contributes to each of them.
#[must_use]
pub fn calculate_tag_aggregates(trades: &[Trade]) -> Vec<TagAggregate> {
    let mut tags: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        for tag in &trade.tags {
            tags.entry(tag.as_str()).or_default().push(trade);
        }
    }

    let mut aggregates: Vec<TagAggregate> = tags
        .into_iter()
        .map(|(tag, tag_trades)| {
            let wins: Vec<f64> = tag_trades
                .iter()
                .filter(|t| t.pnl > 0.0)
                .map(|t| t.pnl)
                .collect();
            let losses: Vec<f64> = tag_trades
                .iter()
                .filter(|t| t.pnl < 0.0)
                .map(|t| t.pnl.abs())
                .collect();

            let win_rate = wins.len() as f64 / tag_trades.len() as f64;
            let avg_win = if wins.is_empty() {
                0.0
            } else {
                wins.iter().sum::<f64>() / wins.len() as f64
            };
            let avg_loss = if losses.is_empty() {
                0.0
            } else {
                losses.iter().sum::<f64>() / losses.len() as f64
            };

            TagAggregate {
                tag: tag.to_string(),
                total_pnl: tag_trades.iter().map(|t| t.pnl).sum(),
                trades_count: tag_trades.len() as u64,
                win_rate,
                avg_win,
                avg_loss,
                expectancy: win_rate * avg_win - (1.0 - win_rate) * avg_loss,
            }
        })
        .collect();

    aggregates.sort_by(|a, b| b.total_pnl.total_cmp(&a.total_pnl));
    aggregates
}

/// Symbol, review, and win-streak counters.
///
/// The streak scan walks trades in ascending exit-time order; a breakeven
/// trade resets the streak.
#[must_use]
pub fn calculate_activity_stats(trades: &[Trade]) -> ActivityStats {
    let unique_symbols = trades
        .iter()
        .map(|t| t.symbol.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u64;
    let reviewed_count = trades.iter().filter(|t| t.reviewed).count() as u64;

    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.exit_time);

    let mut current_streak = 0u64;
    let mut max_win_streak = 0u64;
    for trade in sorted {
        if trade.pnl > 0.0 {
            current_streak += 1;
            max_win_streak = max_win_streak.max(current_streak);
        } else {
            current_streak = 0;
        }
    }

    ActivityStats {
        unique_symbols,
        reviewed_count,
        max_win_streak,
    }
}
