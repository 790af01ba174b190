//! Plain data models shared across the engine.
//!
//! Everything here is serializable data with no behavior beyond small
//! accessors. The analytics layer consumes these types by reference and
//! never mutates them.

pub mod filter;
pub mod trade;

pub use filter::TradeFilter;
pub use trade::{FeesBreakdown, OrderType, Trade, TradeSide};
