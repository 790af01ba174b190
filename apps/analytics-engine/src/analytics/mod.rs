//! Trading analytics over closed-trade lists.
//!
//! Everything in this module is pure computation: functions take trade
//! slices and return owned results, never touching a clock, a database,
//! or the network. Time enters only where the caller injects it (the
//! summary cache).
//!
//! - **metrics**: equity curve replay, drawdown, risk ratios, and
//!   per-trade statistics
//! - **aggregates**: hour-of-day, order-type, tag, and activity breakdowns
//! - **simulator**: what-if transforms replayed through the same engine
//! - **summary**: dashboard payload assembly with TTL caching
//!
//! # Example
//!
//! ```ignore
//! use analytics_engine::analytics::simulator::ScenarioBuilder;
//!
//! let result = ScenarioBuilder::new()
//!     .position_multiplier(2.0)
//!     .exclude_worst_n(3)
//!     .trades(trades)
//!     .build()
//!     .run();
//!
//! println!("{:+.2}", result.comparison.difference);
//! ```

pub mod aggregates;
pub mod metrics;
pub mod simulator;
pub mod summary;

pub use aggregates::{ActivityStats, HourlyMetrics, OrderTypeMetrics, TagAggregate};
pub use metrics::{DailyMetrics, EquityPoint, KpiSet, MaxDrawdown};
pub use simulator::{ScenarioParams, ScenarioResult, ScenarioSimulator};
pub use summary::{AnalyticsService, SummaryCache, WalletSummary};
