//! Wallet summary assembly and caching.
//!
//! Assembles the complete analytics payload for a wallet (KPI set, equity
//! curve, daily series) and provides a time-keyed cache so repeated
//! requests within the TTL reuse the computed summary. Expiry is driven by
//! caller-supplied timestamps rather than a real clock.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalyticsConfig;
use crate::error::ParseError;
use crate::models::trade::Trade;

use super::metrics::{
    DailyMetrics, EquityPoint, KpiSet, build_daily_metrics, build_equity_curve, calculate_kpis,
};
use super::simulator::{ScenarioBuilder, ScenarioParams, ScenarioResult};

/// Processing state attached to a wallet summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    /// Metrics are computed and current.
    Ready,
    /// A recompute is in flight.
    Processing,
    /// The last computation failed.
    Error,
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Processing => write!(f, "processing"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for SummaryStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ready" => Ok(Self::Ready),
            "processing" => Ok(Self::Processing),
            "error" => Ok(Self::Error),
            _ => Err(ParseError::UnknownStatus(s.to_string())),
        }
    }
}

/// Complete analytics payload for one wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSummary {
    /// Wallet address the summary was computed for.
    pub wallet: String,
    /// Scalar statistics over the full trade list.
    pub kpis: KpiSet,
    /// Equity curve; empty when charts were not requested.
    pub equity_curve: Vec<EquityPoint>,
    /// Per-day series; empty when charts were not requested.
    pub daily_pnl: Vec<DailyMetrics>,
    /// Processing state.
    pub status: SummaryStatus,
}

impl WalletSummary {
    /// Serialize the summary to pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Assemble the summary for a wallet's trade list.
///
/// KPIs are always computed over the full list; `include_charts` only
/// controls whether the equity curve and daily series are emitted. An
/// empty list yields the all-zero KPI set with empty series, still
/// `Ready`.
#[must_use]
pub fn build_summary(
    wallet: &str,
    trades: &[Trade],
    config: &AnalyticsConfig,
    include_charts: bool,
) -> WalletSummary {
    let kpis = calculate_kpis(trades, config.starting_capital, config.annual_risk_free_rate);

    let (equity_curve, daily_pnl) = if include_charts {
        (
            build_equity_curve(trades, config.starting_capital),
            build_daily_metrics(trades),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    WalletSummary {
        wallet: wallet.to_string(),
        kpis,
        equity_curve,
        daily_pnl,
        status: SummaryStatus::Ready,
    }
}

/// One cached summary with its computation timestamp.
#[derive(Debug, Clone)]
pub struct CachedSummary {
    /// The cached payload.
    pub summary: WalletSummary,
    /// When the payload was computed.
    pub computed_at: DateTime<Utc>,
}

/// Time-based cache of wallet summaries keyed by wallet address.
///
/// Every operation that depends on time takes `now` explicitly, so expiry
/// is deterministic and testable without a real clock.
#[derive(Debug)]
pub struct SummaryCache {
    ttl: Duration,
    entries: HashMap<String, CachedSummary>,
}

impl SummaryCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Look up a fresh entry. An entry is expired once `now - computed_at`
    /// reaches the TTL; expired entries read as absent.
    #[must_use]
    pub fn get(&self, wallet: &str, now: DateTime<Utc>) -> Option<&WalletSummary> {
        self.entries
            .get(wallet)
            .filter(|cached| now - cached.computed_at < self.ttl)
            .map(|cached| &cached.summary)
    }

    /// Store a summary computed at `now`, replacing any previous entry.
    pub fn insert(&mut self, wallet: &str, summary: WalletSummary, now: DateTime<Utc>) {
        self.entries.insert(
            wallet.to_string(),
            CachedSummary {
                summary,
                computed_at: now,
            },
        );
    }

    /// Drop the entry for one wallet.
    pub fn invalidate(&mut self, wallet: &str) {
        self.entries.remove(wallet);
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or expired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Facade over summary assembly, scenario simulation, and caching.
#[derive(Debug)]
pub struct AnalyticsService {
    config: AnalyticsConfig,
    cache: SummaryCache,
}

impl AnalyticsService {
    /// Create a service; the cache TTL comes from the configuration.
    #[must_use]
    pub fn new(config: AnalyticsConfig) -> Self {
        let cache = SummaryCache::new(Duration::seconds(config.cache_ttl_secs));
        Self { config, cache }
    }

    /// Summary for a wallet as of `now`, served from cache when a fresh
    /// entry exists.
    ///
    /// The cache always holds the full summary with both series; when
    /// `include_charts` is false the series are stripped from the returned
    /// copy, so alternating chart requests for one wallet share a single
    /// cache entry.
    pub fn summary_at(
        &mut self,
        wallet: &str,
        trades: &[Trade],
        include_charts: bool,
        now: DateTime<Utc>,
    ) -> WalletSummary {
        let full = if let Some(cached) = self.cache.get(wallet, now) {
            debug!(wallet, "Serving summary from cache");
            cached.clone()
        } else {
            info!(
                wallet,
                trades = trades.len(),
                include_charts,
                "Computing wallet summary"
            );
            let summary = build_summary(wallet, trades, &self.config, true);
            self.cache.insert(wallet, summary.clone(), now);
            summary
        };

        if include_charts {
            full
        } else {
            WalletSummary {
                equity_curve: Vec::new(),
                daily_pnl: Vec::new(),
                ..full
            }
        }
    }

    /// Run a what-if scenario over a trade list using the service's
    /// capital and risk-free configuration.
    #[must_use]
    pub fn simulate(&self, trades: &[Trade], params: ScenarioParams) -> ScenarioResult {
        ScenarioBuilder::new()
            .params(params)
            .starting_capital(self.config.starting_capital)
            .risk_free_rate(self.config.annual_risk_free_rate)
            .trades(trades.to_vec())
            .build()
            .run()
    }

    /// Drop the cached summary for one wallet.
    pub fn invalidate(&mut self, wallet: &str) {
        self.cache.invalidate(wallet);
    }

    /// Drop all cached summaries.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
