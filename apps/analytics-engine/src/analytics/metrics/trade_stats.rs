//! Scalar statistics over a trade list.
//!
//! Every function is total: an empty list or empty subset yields 0, never
//! an error. Non-finite pnl values are not sanitized and flow through the
//! arithmetic unchanged.

use crate::models::trade::{FeesBreakdown, Trade, TradeSide};

use super::constants::PROFIT_FACTOR_CAP;

/// Sum of realized pnl.
#[must_use]
pub fn calculate_total_pnl(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.pnl).sum()
}

/// Winning trades over trades with non-zero pnl.
///
/// Breakeven trades are excluded from the denominator; a list with no
/// non-zero-pnl trades yields 0.
#[must_use]
pub fn calculate_win_rate(trades: &[Trade]) -> f64 {
    let closed = trades.iter().filter(|t| t.pnl != 0.0).count();
    if closed == 0 {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.pnl > 0.0).count();
    winners as f64 / closed as f64
}

/// Mean pnl of winning trades; 0 when there are none.
#[must_use]
pub fn calculate_average_win(trades: &[Trade]) -> f64 {
    let wins: Vec<f64> = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).collect();
    if wins.is_empty() {
        return 0.0;
    }
    wins.iter().sum::<f64>() / wins.len() as f64
}

/// Mean pnl of losing trades, zero or negative; 0 when there are none.
#[must_use]
pub fn calculate_average_loss(trades: &[Trade]) -> f64 {
    let losses: Vec<f64> = trades.iter().filter(|t| t.pnl < 0.0).map(|t| t.pnl).collect();
    if losses.is_empty() {
        return 0.0;
    }
    losses.iter().sum::<f64>() / losses.len() as f64
}

/// Expectancy per trade: `winRate * avgWin - (1 - winRate) * |avgLoss|`.
#[must_use]
pub fn calculate_expectancy(trades: &[Trade]) -> f64 {
    let win_rate = calculate_win_rate(trades);
    let avg_win = calculate_average_win(trades);
    let avg_loss = calculate_average_loss(trades);
    win_rate * avg_win - (1.0 - win_rate) * avg_loss.abs()
}

/// Largest single-trade pnl; 0 for an empty list.
#[must_use]
pub fn calculate_largest_gain(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.pnl).fold(f64::NEG_INFINITY, f64::max)
}

/// Smallest single-trade pnl; 0 for an empty list.
#[must_use]
pub fn calculate_largest_loss(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.pnl).fold(f64::INFINITY, f64::min)
}

/// Mean holding period in minutes; 0 for an empty list.
#[must_use]
pub fn calculate_average_duration_minutes(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let total: f64 = trades.iter().map(Trade::duration_minutes).sum();
    total / trades.len() as f64
}

/// Fraction of trades opened long and short, as `(long_ratio, short_ratio)`.
///
/// An empty list yields `(0, 0)`.
#[must_use]
pub fn calculate_long_short_ratio(trades: &[Trade]) -> (f64, f64) {
    let total = trades.len();
    if total == 0 {
        return (0.0, 0.0);
    }
    let longs = trades.iter().filter(|t| t.side == TradeSide::Long).count();
    let shorts = trades.iter().filter(|t| t.side == TradeSide::Short).count();
    (longs as f64 / total as f64, shorts as f64 / total as f64)
}

/// Sum of fees paid.
#[must_use]
pub fn calculate_total_fees(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.fees).sum()
}

/// Field-wise sum of the per-category fee breakdown.
#[must_use]
pub fn calculate_fees_breakdown(trades: &[Trade]) -> FeesBreakdown {
    trades.iter().fold(FeesBreakdown::default(), |acc, t| FeesBreakdown {
        maker: acc.maker + t.fees_breakdown.maker,
        taker: acc.taker + t.fees_breakdown.taker,
        other: acc.other + t.fees_breakdown.other,
    })
}

/// Gross profit over gross loss.
///
/// When losses sum to zero the result is the capped sentinel 100 if any
/// wins exist, otherwise 0.
#[must_use]
pub fn calculate_profit_factor(trades: &[Trade]) -> f64 {
    let wins: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let losses: f64 = trades
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl)
        .sum::<f64>()
        .abs();

    if losses == 0.0 {
        return if wins > 0.0 { PROFIT_FACTOR_CAP } else { 0.0 };
    }
    wins / losses
}

/// Kelly criterion: `max(0, winRate - (1 - winRate) / winLossRatio)` where
/// the win/loss ratio is `avgWin / |avgLoss|`.
///
/// Yields 0 when the average loss is zero. The raw Kelly fraction is
/// returned, not a half-Kelly.
#[must_use]
pub fn calculate_kelly_criterion(trades: &[Trade]) -> f64 {
    let win_rate = calculate_win_rate(trades);
    let avg_win = calculate_average_win(trades);
    let avg_loss = calculate_average_loss(trades).abs();

    if avg_loss == 0.0 {
        return 0.0;
    }
    let win_loss_ratio = avg_win / avg_loss;
    let kelly = win_rate - (1.0 - win_rate) / win_loss_ratio;
    kelly.max(0.0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use test_case::test_case;

    use crate::models::trade::OrderType;

    use super::*;

    fn make_trade(id: &str, pnl: f64) -> Trade {
        let entry = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        Trade {
            id: id.to_string(),
            symbol: "SOL-PERP".to_string(),
            side: TradeSide::Long,
            order_type: OrderType::Market,
            size: 10.0,
            entry_price: 100.0,
            exit_price: 100.0,
            entry_time: entry,
            exit_time: entry + Duration::minutes(90),
            pnl,
            fees: 2.0,
            fees_breakdown: FeesBreakdown {
                maker: 0.5,
                taker: 1.0,
                other: 0.5,
            },
            note: String::new(),
            tags: vec![],
            reviewed: false,
        }
    }

    fn sample_trades() -> Vec<Trade> {
        vec![
            make_trade("1", 500.0),
            make_trade("2", -200.0),
            make_trade("3", 300.0),
            make_trade("4", -100.0),
        ]
    }

    #[test]
    fn test_total_pnl() {
        assert_eq!(calculate_total_pnl(&sample_trades()), 500.0);
        assert_eq!(calculate_total_pnl(&[]), 0.0);
    }

    #[test]
    fn test_win_rate_excludes_breakeven_trades() {
        let mut trades = sample_trades();
        trades.push(make_trade("5", 0.0));

        // 2 winners over 4 non-zero-pnl trades; the breakeven trade does
        // not enter the denominator
        assert_eq!(calculate_win_rate(&trades), 0.5);
    }

    #[test_case(&[] => 0.0; "empty list")]
    #[test_case(&[0.0, 0.0] => 0.0; "all breakeven")]
    #[test_case(&[10.0, 20.0] => 1.0; "all winners")]
    #[test_case(&[-10.0, -20.0] => 0.0; "all losers")]
    #[test_case(&[10.0, -20.0, 30.0, 0.0] => 2.0 / 3.0; "mixed with breakeven")]
    fn test_win_rate_table(pnls: &[f64]) -> f64 {
        let trades: Vec<Trade> = pnls
            .iter()
            .enumerate()
            .map(|(i, pnl)| make_trade(&i.to_string(), *pnl))
            .collect();
        calculate_win_rate(&trades)
    }

    #[test]
    fn test_average_win_and_loss() {
        let trades = sample_trades();
        assert_eq!(calculate_average_win(&trades), 400.0);
        assert_eq!(calculate_average_loss(&trades), -150.0);

        assert_eq!(calculate_average_win(&[]), 0.0);
        assert_eq!(calculate_average_loss(&[]), 0.0);
    }

    #[test]
    fn test_expectancy() {
        let trades = sample_trades();
        // 0.5 * 400 - 0.5 * 150 = 125
        assert_eq!(calculate_expectancy(&trades), 125.0);
    }

    #[test]
    fn test_largest_gain_and_loss() {
        let trades = sample_trades();
        assert_eq!(calculate_largest_gain(&trades), 500.0);
        assert_eq!(calculate_largest_loss(&trades), -200.0);

        assert_eq!(calculate_largest_gain(&[]), 0.0);
        assert_eq!(calculate_largest_loss(&[]), 0.0);

        // All-positive list: largest loss is the smallest gain
        let winners = vec![make_trade("1", 10.0), make_trade("2", 30.0)];
        assert_eq!(calculate_largest_loss(&winners), 10.0);
    }

    #[test]
    fn test_average_duration_minutes() {
        assert_eq!(calculate_average_duration_minutes(&sample_trades()), 90.0);
        assert_eq!(calculate_average_duration_minutes(&[]), 0.0);
    }

    #[test]
    fn test_long_short_ratio() {
        let mut trades = sample_trades();
        trades[1].side = TradeSide::Short;

        let (long_ratio, short_ratio) = calculate_long_short_ratio(&trades);
        assert_eq!(long_ratio, 0.75);
        assert_eq!(short_ratio, 0.25);

        assert_eq!(calculate_long_short_ratio(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_fees() {
        let trades = sample_trades();
        assert_eq!(calculate_total_fees(&trades), 8.0);

        let breakdown = calculate_fees_breakdown(&trades);
        assert_eq!(breakdown.maker, 2.0);
        assert_eq!(breakdown.taker, 4.0);
        assert_eq!(breakdown.other, 2.0);

        assert_eq!(calculate_fees_breakdown(&[]), FeesBreakdown::default());
    }

    #[test]
    fn test_profit_factor() {
        let trades = sample_trades();
        // 800 gross profit over 300 gross loss
        assert!((calculate_profit_factor(&trades) - 800.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_profit_factor_sentinels() {
        // Wins and no losses: capped at 100
        let winners = vec![make_trade("1", 50.0), make_trade("2", 10.0)];
        assert_eq!(calculate_profit_factor(&winners), 100.0);

        // Neither wins nor losses: 0
        assert_eq!(calculate_profit_factor(&[]), 0.0);
        assert_eq!(calculate_profit_factor(&[make_trade("1", 0.0)]), 0.0);
    }

    #[test]
    fn test_kelly_criterion() {
        let trades = sample_trades();
        // W = 0.5, R = 400/150; kelly = 0.5 - 0.5 / (8/3) = 0.3125
        assert!((calculate_kelly_criterion(&trades) - 0.3125).abs() < 1e-12);
    }

    #[test]
    fn test_kelly_is_floored_at_zero() {
        // Low win rate with poor payoff goes negative and is clamped
        let trades = vec![
            make_trade("1", 10.0),
            make_trade("2", -100.0),
            make_trade("3", -100.0),
            make_trade("4", -100.0),
        ];
        assert_eq!(calculate_kelly_criterion(&trades), 0.0);

        // No losses: avgLoss is 0, guard returns 0
        let winners = vec![make_trade("1", 10.0)];
        assert_eq!(calculate_kelly_criterion(&winners), 0.0);
    }
}
