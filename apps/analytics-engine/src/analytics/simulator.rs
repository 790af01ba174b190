//! What-if scenario simulation over a trade list.
//!
//! Applies parametrized perturbations (position-size multiplier, stop-loss
//! clamp, worst-N exclusion) to a copy of the trade list and replays both
//! the original and the modified list through the equity-curve builder for
//! side-by-side comparison.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::trade::Trade;

use super::metrics::{
    DEFAULT_RISK_FREE_RATE, DEFAULT_STARTING_CAPITAL, EquityPoint, build_equity_curve,
    calculate_max_drawdown, calculate_sharpe_ratio, calculate_win_rate,
};

fn default_position_multiplier() -> f64 {
    1.0
}

/// Perturbation parameters for a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Factor applied to every trade's pnl. Zero and negative values are
    /// accepted numerically and flatten or invert the history; constraining
    /// the range is the caller's concern.
    #[serde(default = "default_position_multiplier")]
    pub position_multiplier: f64,
    /// Stop-loss distance as a percent of position cost; 0 disables the
    /// clamp.
    #[serde(default)]
    pub stop_loss_pct: f64,
    /// Number of worst trades (by pnl) to drop before replay.
    #[serde(default)]
    pub exclude_worst_n: usize,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            position_multiplier: default_position_multiplier(),
            stop_loss_pct: 0.0,
            exclude_worst_n: 0,
        }
    }
}

/// Metric snapshot of one side of a scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    /// Last equity value, or the starting capital for an empty curve.
    pub final_equity: f64,
    /// Deepest drawdown percentage (zero or negative).
    pub max_drawdown_pct: f64,
    /// Sharpe ratio of the curve.
    pub sharpe: f64,
    /// Win rate of the trade list behind the curve.
    pub win_rate: f64,
}

/// Summary deltas between the baseline and the simulated curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Baseline final equity.
    pub original_final_equity: f64,
    /// Simulated final equity.
    pub simulated_final_equity: f64,
    /// Simulated minus baseline final equity.
    pub difference: f64,
    /// Difference as a percent of the baseline final equity.
    pub percent_change_pct: f64,
    /// Simulated minus baseline max drawdown percentage.
    pub drawdown_change: f64,
    /// Simulated minus baseline Sharpe ratio.
    pub sharpe_change: f64,
}

/// Complete scenario simulation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Parameters used for the run.
    pub params: ScenarioParams,
    /// Baseline equity curve.
    pub original_equity: Vec<EquityPoint>,
    /// Equity curve of the perturbed trade list.
    pub simulated_equity: Vec<EquityPoint>,
    /// Baseline metric snapshot.
    pub original_metrics: ScenarioMetrics,
    /// Simulated metric snapshot.
    pub simulated_metrics: ScenarioMetrics,
    /// Summary deltas.
    pub comparison: ScenarioComparison,
}

/// Apply the scenario transform to a trade list, in order: worst-N
/// exclusion, position multiplier, stop-loss clamp.
///
/// Exclusion picks the N lowest-pnl trades of the *original* list (stable
/// ties) and removes them by id. The stop-loss clamp bounds the adjusted
/// pnl at `-(entryPrice * size * stopLossPct / 100)`; price fields are
/// left untouched. The input is never mutated.
#[must_use]
pub fn apply_scenario(trades: &[Trade], params: &ScenarioParams) -> Vec<Trade> {
    let mut modified: Vec<Trade> = trades.to_vec();

    if params.exclude_worst_n > 0 {
        let mut by_pnl: Vec<&Trade> = trades.iter().collect();
        by_pnl.sort_by(|a, b| a.pnl.total_cmp(&b.pnl));
        let excluded: HashSet<&str> = by_pnl
            .iter()
            .take(params.exclude_worst_n)
            .map(|t| t.id.as_str())
            .collect();
        modified.retain(|t| !excluded.contains(t.id.as_str()));
    }

    for trade in &mut modified {
        let mut pnl = trade.pnl * params.position_multiplier;

        if params.stop_loss_pct > 0.0 {
            let max_loss = trade.entry_price * trade.size * (params.stop_loss_pct / 100.0);
            if pnl < -max_loss {
                pnl = -max_loss;
            }
        }

        trade.pnl = pnl;
    }

    modified
}

/// Scenario simulator holding the baseline trades and engine context.
#[derive(Debug)]
pub struct ScenarioSimulator {
    params: ScenarioParams,
    trades: Vec<Trade>,
    starting_capital: f64,
    annual_risk_free_rate: f64,
}

impl ScenarioSimulator {
    /// Create a simulator with the default starting capital and risk-free
    /// rate.
    #[must_use]
    pub fn new(params: ScenarioParams, trades: Vec<Trade>) -> Self {
        Self {
            params,
            trades,
            starting_capital: DEFAULT_STARTING_CAPITAL,
            annual_risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Run the scenario and compare against the baseline.
    ///
    /// The identity parameters (multiplier 1, stop 0, exclude 0) reproduce
    /// the baseline curve exactly.
    #[must_use]
    pub fn run(&self) -> ScenarioResult {
        info!(
            multiplier = self.params.position_multiplier,
            stop_loss_pct = self.params.stop_loss_pct,
            exclude_worst_n = self.params.exclude_worst_n,
            trades = self.trades.len(),
            "Running scenario simulation"
        );

        let simulated_trades = apply_scenario(&self.trades, &self.params);
        debug!(remaining = simulated_trades.len(), "Applied scenario transform");

        let original_equity = build_equity_curve(&self.trades, self.starting_capital);
        let simulated_equity = build_equity_curve(&simulated_trades, self.starting_capital);

        let original_metrics = self.snapshot_metrics(&self.trades, &original_equity);
        let simulated_metrics = self.snapshot_metrics(&simulated_trades, &simulated_equity);

        let difference = simulated_metrics.final_equity - original_metrics.final_equity;
        let comparison = ScenarioComparison {
            original_final_equity: original_metrics.final_equity,
            simulated_final_equity: simulated_metrics.final_equity,
            difference,
            percent_change_pct: difference / original_metrics.final_equity * 100.0,
            drawdown_change: simulated_metrics.max_drawdown_pct
                - original_metrics.max_drawdown_pct,
            sharpe_change: simulated_metrics.sharpe - original_metrics.sharpe,
        };

        ScenarioResult {
            params: self.params.clone(),
            original_equity,
            simulated_equity,
            original_metrics,
            simulated_metrics,
            comparison,
        }
    }

    fn snapshot_metrics(&self, trades: &[Trade], curve: &[EquityPoint]) -> ScenarioMetrics {
        ScenarioMetrics {
            final_equity: curve.last().map_or(self.starting_capital, |p| p.equity),
            max_drawdown_pct: calculate_max_drawdown(curve).pct,
            sharpe: calculate_sharpe_ratio(curve, self.annual_risk_free_rate),
            win_rate: calculate_win_rate(trades),
        }
    }
}

/// Builder for scenario simulations.
#[derive(Debug)]
pub struct ScenarioBuilder {
    params: ScenarioParams,
    trades: Vec<Trade>,
    starting_capital: f64,
    annual_risk_free_rate: f64,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self {
            params: ScenarioParams::default(),
            trades: Vec::new(),
            starting_capital: DEFAULT_STARTING_CAPITAL,
            annual_risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl ScenarioBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole parameter set.
    #[must_use]
    pub fn params(mut self, params: ScenarioParams) -> Self {
        self.params = params;
        self
    }

    /// Set the position-size multiplier.
    #[must_use]
    pub const fn position_multiplier(mut self, multiplier: f64) -> Self {
        self.params.position_multiplier = multiplier;
        self
    }

    /// Set the stop-loss percent.
    #[must_use]
    pub const fn stop_loss_pct(mut self, pct: f64) -> Self {
        self.params.stop_loss_pct = pct;
        self
    }

    /// Set the number of worst trades to exclude.
    #[must_use]
    pub const fn exclude_worst_n(mut self, n: usize) -> Self {
        self.params.exclude_worst_n = n;
        self
    }

    /// Set the starting capital.
    #[must_use]
    pub const fn starting_capital(mut self, capital: f64) -> Self {
        self.starting_capital = capital;
        self
    }

    /// Set the annual risk-free rate.
    #[must_use]
    pub const fn risk_free_rate(mut self, rate: f64) -> Self {
        self.annual_risk_free_rate = rate;
        self
    }

    /// Set the baseline trades.
    #[must_use]
    pub fn trades(mut self, trades: Vec<Trade>) -> Self {
        self.trades = trades;
        self
    }

    /// Build the simulator.
    #[must_use]
    pub fn build(self) -> ScenarioSimulator {
        ScenarioSimulator {
            params: self.params,
            trades: self.trades,
            starting_capital: self.starting_capital,
            annual_risk_free_rate: self.annual_risk_free_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::models::trade::{OrderType, TradeSide};

    use super::*;

    fn make_trade(id: &str, pnl: f64, exit_time: DateTime<Utc>) -> Trade {
        Trade {
            id: id.to_string(),
            symbol: "SOL-PERP".to_string(),
            side: TradeSide::Long,
            order_type: OrderType::Market,
            size: 1.0,
            entry_price: 100.0,
            exit_price: 100.0,
            entry_time: exit_time - Duration::hours(1),
            exit_time,
            pnl,
            fees: 1.0,
            fees_breakdown: Default::default(),
            note: String::new(),
            tags: vec![],
            reviewed: false,
        }
    }

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn sample_trades() -> Vec<Trade> {
        vec![
            make_trade("1", 500.0, t(9)),
            make_trade("2", -200.0, t(10)),
            make_trade("3", 300.0, t(11)),
            make_trade("4", -150.0, t(12)),
            make_trade("5", 100.0, t(13)),
        ]
    }

    #[test]
    fn test_identity_params_reproduce_baseline() {
        let simulator = ScenarioSimulator::new(ScenarioParams::default(), sample_trades());
        let result = simulator.run();

        assert_eq!(result.original_equity, result.simulated_equity);
        assert_eq!(result.comparison.difference, 0.0);
        assert_eq!(result.comparison.percent_change_pct, 0.0);
        assert_eq!(result.comparison.drawdown_change, 0.0);
        assert_eq!(result.comparison.sharpe_change, 0.0);
        assert_eq!(result.original_metrics, result.simulated_metrics);
    }

    #[test]
    fn test_exclude_worst_removes_lowest_pnl_trades() {
        let params = ScenarioParams {
            exclude_worst_n: 2,
            ..Default::default()
        };
        let modified = apply_scenario(&sample_trades(), &params);

        // "2" (-200) and "4" (-150) are gone; order of the rest preserved
        let ids: Vec<&str> = modified.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_exclude_more_than_available_removes_all() {
        let params = ScenarioParams {
            exclude_worst_n: 99,
            ..Default::default()
        };
        let modified = apply_scenario(&sample_trades(), &params);
        assert!(modified.is_empty());

        // Empty curve falls back to the starting capital
        let simulator = ScenarioSimulator::new(params, sample_trades());
        let result = simulator.run();
        assert!(result.simulated_equity.is_empty());
        assert_eq!(result.simulated_metrics.final_equity, 10_000.0);
    }

    #[test]
    fn test_multiplier_scales_pnl() {
        let params = ScenarioParams {
            position_multiplier: 2.0,
            ..Default::default()
        };
        let simulator = ScenarioSimulator::new(params, sample_trades());
        let result = simulator.run();

        // Total pnl 550 doubles to 1100
        assert_eq!(result.comparison.original_final_equity, 10_550.0);
        assert_eq!(result.comparison.simulated_final_equity, 11_100.0);
        assert_eq!(result.comparison.difference, 550.0);
    }

    #[test]
    fn test_zero_multiplier_flattens_history() {
        // Accepted numerically: every pnl becomes 0
        let params = ScenarioParams {
            position_multiplier: 0.0,
            ..Default::default()
        };
        let simulator = ScenarioSimulator::new(params, sample_trades());
        let result = simulator.run();

        assert_eq!(result.simulated_metrics.final_equity, 10_000.0);
        assert_eq!(result.simulated_metrics.win_rate, 0.0);
    }

    #[test]
    fn test_stop_loss_clamps_adjusted_pnl() {
        // Position cost 100 * 1; 5% stop bounds losses at -5
        let params = ScenarioParams {
            stop_loss_pct: 5.0,
            ..Default::default()
        };
        let trades = vec![make_trade("1", -50.0, t(9)), make_trade("2", 20.0, t(10))];
        let modified = apply_scenario(&trades, &params);

        assert_eq!(modified[0].pnl, -5.0);
        assert_eq!(modified[1].pnl, 20.0);

        // Price fields are untouched by the clamp
        assert_eq!(modified[0].entry_price, 100.0);
        assert_eq!(modified[0].exit_price, 100.0);
    }

    #[test]
    fn test_stop_loss_applies_after_multiplier() {
        // -3 * 10 = -30, clamped to the -5 stop
        let params = ScenarioParams {
            position_multiplier: 10.0,
            stop_loss_pct: 5.0,
            ..Default::default()
        };
        let trades = vec![make_trade("1", -3.0, t(9))];
        let modified = apply_scenario(&trades, &params);
        assert_eq!(modified[0].pnl, -5.0);
    }

    #[test]
    fn test_exclusion_uses_original_pnl() {
        // With a negative multiplier the worst original trades would become
        // the best; exclusion must still pick by original pnl
        let params = ScenarioParams {
            position_multiplier: -1.0,
            exclude_worst_n: 1,
            ..Default::default()
        };
        let modified = apply_scenario(&sample_trades(), &params);

        let ids: Vec<&str> = modified.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4", "5"]);
        // Remaining pnl values are inverted
        assert_eq!(modified[0].pnl, -500.0);
    }

    #[test]
    fn test_transform_preserves_other_fields() {
        let params = ScenarioParams {
            position_multiplier: 3.0,
            ..Default::default()
        };
        let trades = sample_trades();
        let modified = apply_scenario(&trades, &params);

        assert_eq!(modified.len(), trades.len());
        for (original, changed) in trades.iter().zip(&modified) {
            assert_eq!(original.id, changed.id);
            assert_eq!(original.symbol, changed.symbol);
            assert_eq!(original.entry_time, changed.entry_time);
            assert_eq!(original.exit_time, changed.exit_time);
            assert_eq!(original.fees, changed.fees);
            assert_eq!(changed.pnl, original.pnl * 3.0);
        }
    }

    #[test]
    fn test_builder_chains_into_simulator() {
        let result = ScenarioBuilder::new()
            .position_multiplier(1.5)
            .stop_loss_pct(10.0)
            .exclude_worst_n(1)
            .starting_capital(20_000.0)
            .risk_free_rate(0.02)
            .trades(sample_trades())
            .build()
            .run();

        assert_eq!(result.params.position_multiplier, 1.5);
        assert_eq!(result.params.stop_loss_pct, 10.0);
        assert_eq!(result.params.exclude_worst_n, 1);
        assert_eq!(result.original_equity[0].equity, 20_500.0);
        // Worst trade "2" excluded, remaining pnl scaled by 1.5
        assert_eq!(result.simulated_equity.len(), 4);
    }

    #[test]
    fn test_empty_trades() {
        let simulator = ScenarioSimulator::new(ScenarioParams::default(), Vec::new());
        let result = simulator.run();

        assert!(result.original_equity.is_empty());
        assert!(result.simulated_equity.is_empty());
        assert_eq!(result.comparison.original_final_equity, 10_000.0);
        assert_eq!(result.comparison.simulated_final_equity, 10_000.0);
        assert_eq!(result.comparison.difference, 0.0);
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: ScenarioParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.position_multiplier, 1.0);
        assert_eq!(params.stop_loss_pct, 0.0);
        assert_eq!(params.exclude_worst_n, 0);

        let params: ScenarioParams =
            serde_json::from_str(r#"{"exclude_worst_n": 3}"#).unwrap();
        assert_eq!(params.exclude_worst_n, 3);
        assert_eq!(params.position_multiplier, 1.0);
    }
}
