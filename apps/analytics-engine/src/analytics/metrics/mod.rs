//! Performance metrics over trade lists and equity curves.
//!
//! Implements the dashboard's metric family:
//! - Equity curve replay and drawdown tracking
//! - Sharpe ratio (risk-adjusted returns)
//! - Sortino ratio (downside risk-adjusted returns)
//! - Calmar ratio (drawdown-adjusted returns)
//! - K-Ratio (equity growth consistency)
//! - Kelly criterion, expectancy, recovery factor, profit factor
//! - Win rate, payoff, fee, and duration statistics
//!
//! All operations are total over empty input and perform no validation:
//! degenerate cases yield documented zero sentinels (profit factor's cap
//! of 100 is the one exception) and non-finite inputs propagate.

mod constants;
mod equity;
mod format;
mod kpis;
mod math;
mod trade_stats;
mod types;

pub use constants::{
    DEFAULT_RISK_FREE_RATE, DEFAULT_STARTING_CAPITAL, PROFIT_FACTOR_CAP,
    TRADING_PERIODS_PER_YEAR,
};
pub use equity::{
    build_daily_metrics, build_equity_curve, calculate_calmar_ratio, calculate_k_ratio,
    calculate_max_drawdown, calculate_recovery_factor, calculate_sharpe_ratio,
    calculate_sortino_ratio, calculate_volatility,
};
pub use format::{format_percent, format_pnl};
pub use kpis::calculate_kpis;
pub use trade_stats::{
    calculate_average_duration_minutes, calculate_average_loss, calculate_average_win,
    calculate_expectancy, calculate_fees_breakdown, calculate_kelly_criterion,
    calculate_largest_gain, calculate_largest_loss, calculate_long_short_ratio,
    calculate_profit_factor, calculate_total_fees, calculate_total_pnl, calculate_win_rate,
};
pub use types::{DailyMetrics, EquityPoint, KpiSet, MaxDrawdown};
