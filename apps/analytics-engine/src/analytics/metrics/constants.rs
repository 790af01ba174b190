//! Numeric constants for performance metric calculations.

/// Trading periods per year, used to de-annualize the risk-free rate for
/// Sharpe/Sortino. Applied uniformly regardless of the curve's actual
/// sampling frequency; changing it changes reported KPI values.
pub const TRADING_PERIODS_PER_YEAR: f64 = 252.0;

/// Starting capital the equity curve replays from when none is configured.
pub const DEFAULT_STARTING_CAPITAL: f64 = 10_000.0;

/// Annual risk-free rate used when none is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.01;

/// Sentinel profit factor reported when wins exist and losses sum to zero.
/// A finite cap rather than infinity; downstream display depends on it.
pub const PROFIT_FACTOR_CAP: f64 = 100.0;
