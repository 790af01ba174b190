//! One-call KPI computation over a trade list.

use crate::models::trade::Trade;

use super::equity::{
    build_equity_curve, calculate_calmar_ratio, calculate_k_ratio, calculate_max_drawdown,
    calculate_recovery_factor, calculate_sharpe_ratio, calculate_sortino_ratio,
    calculate_volatility,
};
use super::trade_stats::{
    calculate_average_duration_minutes, calculate_average_loss, calculate_average_win,
    calculate_expectancy, calculate_kelly_criterion, calculate_largest_gain,
    calculate_largest_loss, calculate_long_short_ratio, calculate_profit_factor,
    calculate_total_fees, calculate_total_pnl, calculate_win_rate,
};
use super::types::KpiSet;

/// Compute the full KPI record for a trade list.
///
/// Builds the equity curve internally from `starting_capital` and derives
/// every scalar in one pass over the same inputs the individual
/// `calculate_*` functions take. An empty list yields the all-zero set.
#[must_use]
pub fn calculate_kpis(
    trades: &[Trade],
    starting_capital: f64,
    annual_risk_free_rate: f64,
) -> KpiSet {
    if trades.is_empty() {
        return KpiSet::default();
    }

    let curve = build_equity_curve(trades, starting_capital);
    let total_pnl = calculate_total_pnl(trades);
    let max_drawdown = calculate_max_drawdown(&curve);
    let (long_ratio, short_ratio) = calculate_long_short_ratio(trades);

    KpiSet {
        total_pnl,
        win_rate: calculate_win_rate(trades),
        avg_win: calculate_average_win(trades),
        avg_loss: calculate_average_loss(trades),
        largest_gain: calculate_largest_gain(trades),
        largest_loss: calculate_largest_loss(trades),
        avg_duration_minutes: calculate_average_duration_minutes(trades),
        long_ratio,
        short_ratio,
        total_fees: calculate_total_fees(trades),
        expectancy: calculate_expectancy(trades),
        profit_factor: calculate_profit_factor(trades),
        sharpe: calculate_sharpe_ratio(&curve, annual_risk_free_rate),
        sortino: calculate_sortino_ratio(&curve, annual_risk_free_rate),
        volatility: calculate_volatility(&curve),
        max_drawdown_pct: max_drawdown.pct,
        max_drawdown_absolute: max_drawdown.absolute,
        k_ratio: calculate_k_ratio(&curve),
        calmar: calculate_calmar_ratio(trades, &curve, starting_capital),
        kelly_criterion: calculate_kelly_criterion(trades),
        recovery_factor: calculate_recovery_factor(total_pnl, max_drawdown.absolute),
        trades_count: trades.len() as u64,
    }
}
