//! Equity curve construction and curve-derived metrics.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::trade::Trade;

use super::constants::TRADING_PERIODS_PER_YEAR;
use super::math::{downside_deviation, mean, ols_slope, population_std_dev};
use super::trade_stats::calculate_total_pnl;
use super::types::{DailyMetrics, EquityPoint, MaxDrawdown};

/// Replay trades in ascending exit-time order over a starting capital.
///
/// Ties in exit time keep their input order. The running peak is seeded
/// from the starting capital, so the first point can already be in
/// drawdown. Input is never mutated; an empty list yields an empty curve.
#[must_use]
pub fn build_equity_curve(trades: &[Trade], starting_capital: f64) -> Vec<EquityPoint> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.exit_time);

    let mut curve = Vec::with_capacity(sorted.len());
    let mut cumulative_pnl = 0.0;
    let mut peak = starting_capital;

    for trade in sorted {
        cumulative_pnl += trade.pnl;
        let equity = starting_capital + cumulative_pnl;
        peak = peak.max(equity);
        let drawdown_pct = (equity - peak) / peak * 100.0;

        curve.push(EquityPoint {
            timestamp: trade.exit_time,
            date: trade.exit_time.date_naive(),
            equity,
            cumulative_pnl,
            drawdown_pct,
        });
    }

    curve
}

/// Deepest peak-to-trough decline of the curve, as `{pct, absolute}`.
///
/// The peak is seeded from the first point and only moves forward; both
/// outputs are zero or negative. An empty curve yields zeros.
#[must_use]
pub fn calculate_max_drawdown(curve: &[EquityPoint]) -> MaxDrawdown {
    let Some(first) = curve.first() else {
        return MaxDrawdown::default();
    };

    let mut peak = first.equity;
    let mut max_drawdown = MaxDrawdown::default();

    for point in curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let drawdown = (point.equity - peak) / peak * 100.0;
        if drawdown < max_drawdown.pct {
            max_drawdown.pct = drawdown;
            max_drawdown.absolute = point.equity - peak;
        }
    }

    max_drawdown
}

/// Period-over-period returns between consecutive equity points.
fn period_returns(curve: &[EquityPoint]) -> Vec<f64> {
    curve
        .windows(2)
        .map(|w| (w[1].equity - w[0].equity) / w[0].equity)
        .collect()
}

/// Sharpe ratio of the curve's period returns.
///
/// The annual risk-free rate is de-annualized by dividing by
/// [`TRADING_PERIODS_PER_YEAR`] regardless of the curve's actual sampling
/// frequency. Fewer than 2 points or zero volatility yields 0.
#[must_use]
pub fn calculate_sharpe_ratio(curve: &[EquityPoint], annual_risk_free_rate: f64) -> f64 {
    if curve.len() < 2 {
        return 0.0;
    }

    let returns = period_returns(curve);
    let Some(mean_return) = mean(&returns) else {
        return 0.0;
    };
    let Some(std) = population_std_dev(&returns) else {
        return 0.0;
    };
    if std == 0.0 {
        return 0.0;
    }

    let periodic_risk_free = annual_risk_free_rate / TRADING_PERIODS_PER_YEAR;
    (mean_return - periodic_risk_free) / std
}

/// Sortino ratio: the Sharpe numerator over downside deviation.
///
/// Downside deviation is taken over negative returns only but divides by
/// the full return count. Fewer than 2 points or no negative returns
/// yields 0.
#[must_use]
pub fn calculate_sortino_ratio(curve: &[EquityPoint], annual_risk_free_rate: f64) -> f64 {
    if curve.len() < 2 {
        return 0.0;
    }

    let returns = period_returns(curve);
    let Some(mean_return) = mean(&returns) else {
        return 0.0;
    };
    let Some(downside) = downside_deviation(&returns) else {
        return 0.0;
    };
    if downside == 0.0 {
        return 0.0;
    }

    let periodic_risk_free = annual_risk_free_rate / TRADING_PERIODS_PER_YEAR;
    (mean_return - periodic_risk_free) / downside
}

/// Population standard deviation of the curve's period returns.
#[must_use]
pub fn calculate_volatility(curve: &[EquityPoint]) -> f64 {
    if curve.len() < 2 {
        return 0.0;
    }
    population_std_dev(&period_returns(curve)).unwrap_or(0.0)
}

/// K-Ratio: OLS slope of equity against its index, scaled by 1/100.
///
/// Fewer than 3 points or a non-positive slope yields 0.
#[must_use]
pub fn calculate_k_ratio(curve: &[EquityPoint]) -> f64 {
    if curve.len() < 3 {
        return 0.0;
    }

    let equities: Vec<f64> = curve.iter().map(|p| p.equity).collect();
    let Some(slope) = ols_slope(&equities) else {
        return 0.0;
    };

    if slope > 0.0 { slope / 100.0 } else { 0.0 }
}

/// Calmar ratio: return on starting capital over drawdown depth.
///
/// Computed as `(totalPnL / startingCapital) / (|maxDrawdownPct| / 100)`.
/// Fewer than 2 equity points or zero drawdown yields 0.
#[must_use]
pub fn calculate_calmar_ratio(
    trades: &[Trade],
    curve: &[EquityPoint],
    starting_capital: f64,
) -> f64 {
    if curve.len() < 2 {
        return 0.0;
    }

    let total_pnl = calculate_total_pnl(trades);
    let mdd = calculate_max_drawdown(curve).pct;
    if mdd == 0.0 {
        return 0.0;
    }

    (total_pnl / starting_capital) / (mdd.abs() / 100.0)
}

/// Recovery factor: total pnl over the absolute drawdown depth.
///
/// Zero drawdown yields 0.
#[must_use]
pub fn calculate_recovery_factor(total_pnl: f64, max_drawdown_absolute: f64) -> f64 {
    if max_drawdown_absolute == 0.0 {
        return 0.0;
    }
    total_pnl / max_drawdown_absolute.abs()
}

/// Group trades by exit date (UTC calendar day), ascending.
///
/// The per-day win rate follows the core rule: breakeven trades count
/// toward `trades_count` but not the win-rate denominator.
#[must_use]
pub fn build_daily_metrics(trades: &[Trade]) -> Vec<DailyMetrics> {
    let mut days: BTreeMap<NaiveDate, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        days.entry(trade.exit_time.date_naive())
            .or_default()
            .push(trade);
    }

    days.into_iter()
        .map(|(date, day_trades)| {
            let win_count = day_trades.iter().filter(|t| t.pnl > 0.0).count() as u64;
            let loss_count = day_trades.iter().filter(|t| t.pnl < 0.0).count() as u64;
            let closed = day_trades.iter().filter(|t| t.pnl != 0.0).count();
            let win_rate = if closed == 0 {
                0.0
            } else {
                win_count as f64 / closed as f64
            };

            DailyMetrics {
                date,
                pnl: day_trades.iter().map(|t| t.pnl).sum(),
                trades_count: day_trades.len() as u64,
                win_count,
                loss_count,
                win_rate,
                fees: day_trades.iter().map(|t| t.fees).sum(),
            }
        })
        .collect()
}
