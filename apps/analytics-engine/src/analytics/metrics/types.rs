//! Core types for performance metrics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One point on the reconstructed equity time series, created by replaying
/// trades in ascending exit-time order over a starting capital value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Exit timestamp of the originating trade.
    pub timestamp: DateTime<Utc>,
    /// Calendar day of the exit timestamp (UTC).
    pub date: NaiveDate,
    /// Starting capital plus cumulative pnl up to and including this trade.
    pub equity: f64,
    /// Running sum of pnl.
    pub cumulative_pnl: f64,
    /// Percentage distance below the running peak; 0 at or above the peak,
    /// negative below.
    pub drawdown_pct: f64,
}

/// Deepest peak-to-trough decline of an equity curve.
///
/// Both fields are zero or negative; an empty curve yields zeros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MaxDrawdown {
    /// Most negative percentage distance below the running peak.
    pub pct: f64,
    /// Equity lost at that point, in capital units.
    pub absolute: f64,
}

/// Per-calendar-day aggregation of trades, keyed by exit date (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Calendar day.
    pub date: NaiveDate,
    /// Sum of pnl for the day.
    pub pnl: f64,
    /// Number of trades closed that day.
    pub trades_count: u64,
    /// Trades with positive pnl.
    pub win_count: u64,
    /// Trades with negative pnl.
    pub loss_count: u64,
    /// Wins over trades with non-zero pnl.
    pub win_rate: f64,
    /// Sum of fees for the day.
    pub fees: f64,
}

/// Flat record of scalar statistics computed once per trade list.
///
/// The default value is the all-zero KPI set reported for an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KpiSet {
    /// Sum of realized pnl.
    pub total_pnl: f64,
    /// Wins over trades with non-zero pnl.
    pub win_rate: f64,
    /// Mean pnl of winning trades.
    pub avg_win: f64,
    /// Mean pnl of losing trades (zero or negative).
    pub avg_loss: f64,
    /// Largest single-trade gain.
    pub largest_gain: f64,
    /// Largest single-trade loss.
    pub largest_loss: f64,
    /// Mean holding period in minutes.
    pub avg_duration_minutes: f64,
    /// Fraction of trades opened long.
    pub long_ratio: f64,
    /// Fraction of trades opened short.
    pub short_ratio: f64,
    /// Sum of fees paid.
    pub total_fees: f64,
    /// Expected pnl per trade given historical win rate and payoff sizes.
    pub expectancy: f64,
    /// Gross profit over gross loss, capped at 100 when loss-free.
    pub profit_factor: f64,
    /// Risk-adjusted return over period volatility.
    pub sharpe: f64,
    /// Risk-adjusted return over downside deviation.
    pub sortino: f64,
    /// Standard deviation of period returns.
    pub volatility: f64,
    /// Deepest drawdown as a percentage (zero or negative).
    pub max_drawdown_pct: f64,
    /// Deepest drawdown in capital units (zero or negative).
    pub max_drawdown_absolute: f64,
    /// Regression-slope consistency measure of equity growth.
    pub k_ratio: f64,
    /// Return on starting capital over drawdown depth.
    pub calmar: f64,
    /// Optimal-fraction-of-capital heuristic, floored at zero.
    pub kelly_criterion: f64,
    /// Total pnl over drawdown depth.
    pub recovery_factor: f64,
    /// Number of trades in the list.
    pub trades_count: u64,
}
