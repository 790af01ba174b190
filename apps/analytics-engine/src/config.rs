//! Engine configuration types.
//!
//! The embedding application owns config loading; this crate only defines
//! the deserializable shape and its defaults.

use serde::{Deserialize, Serialize};

fn default_starting_capital() -> f64 {
    10_000.0
}

fn default_annual_risk_free_rate() -> f64 {
    0.01
}

fn default_cache_ttl_secs() -> i64 {
    30
}

/// Tunable parameters for the analytics engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Starting capital the equity curve replays from.
    #[serde(default = "default_starting_capital")]
    pub starting_capital: f64,
    /// Annual risk-free rate for Sharpe/Sortino (e.g. 0.01 = 1%).
    #[serde(default = "default_annual_risk_free_rate")]
    pub annual_risk_free_rate: f64,
    /// Time-to-live for cached wallet summaries, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            starting_capital: default_starting_capital(),
            annual_risk_free_rate: default_annual_risk_free_rate(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}
