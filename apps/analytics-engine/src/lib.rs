// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Analytics Engine - Rust Core Library
//!
//! Deterministic trading analytics core for the PnL Forge dashboard.
//!
//! The engine converts a raw list of closed trades for one wallet into an
//! equity curve, drawdown series, and a family of risk/performance
//! statistics, plus what-if scenario simulations and dashboard-ready
//! wallet summaries.
//!
//! # Layers (inside → outside)
//!
//! - **Models**: Plain data types shared across the engine
//!   - `trade`: `Trade`, `TradeSide`, `OrderType`, `FeesBreakdown`
//!   - `filter`: `TradeFilter` predicate over trade lists
//!
//! - **Analytics**: Pure computation over trade slices
//!   - `metrics`: equity curve builder, drawdown, Sharpe/Sortino/Kelly/
//!     Calmar/K-Ratio, expectancy, trade statistics
//!   - `aggregates`: daily, hour-of-day, order-type, and tag breakdowns
//!   - `simulator`: scenario transforms replayed through the same engine
//!   - `summary`: wallet summary assembler, TTL cache, service facade
//!
//! Every function in the analytics layer is total: empty or degenerate
//! input yields documented zero sentinels, never an error or a panic.
//! Non-finite inputs flow through arithmetic unchanged.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Analytics layer - Pure computation over trade slices.
pub mod analytics;

/// Engine configuration types.
pub mod config;

/// Parse-boundary error types.
pub mod error;

/// Plain data models shared across the engine.
pub mod models;

// Model re-exports
pub use models::filter::TradeFilter;
pub use models::trade::{FeesBreakdown, OrderType, Trade, TradeSide};

// Analytics re-exports
pub use analytics::aggregates::{
    ActivityStats, HourlyMetrics, OrderTypeMetrics, TagAggregate, calculate_activity_stats,
    calculate_order_type_metrics, calculate_tag_aggregates, calculate_time_of_day_metrics,
};
pub use analytics::metrics::{
    DailyMetrics, EquityPoint, KpiSet, MaxDrawdown, build_daily_metrics, build_equity_curve,
    calculate_kpis, calculate_max_drawdown,
};
pub use analytics::simulator::{
    ScenarioBuilder, ScenarioComparison, ScenarioMetrics, ScenarioParams, ScenarioResult,
    ScenarioSimulator, apply_scenario,
};
pub use analytics::summary::{
    AnalyticsService, SummaryCache, SummaryStatus, WalletSummary, build_summary,
};
pub use config::AnalyticsConfig;
pub use error::ParseError;
