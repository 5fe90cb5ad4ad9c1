//! Financial snapshot fetcher

use crate::api::MarketDataProvider;
use crate::error::StockError;
use crate::snapshot::FinancialSnapshot;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Fetches one [`FinancialSnapshot`] per call
///
/// Each call performs a single provider lookup under the configured timeout.
/// Nothing is cached or retried, and failures never escape: they come back as
/// a snapshot whose `error` names the ticker.
#[derive(Clone)]
pub struct SnapshotFetcher {
    provider: Arc<dyn MarketDataProvider>,
    timeout: Duration,
}

impl SnapshotFetcher {
    /// Create a fetcher over `provider`
    pub fn new(provider: Arc<dyn MarketDataProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Timeout applied to each lookup
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a snapshot for `ticker`
    pub async fn fetch(&self, ticker: &str) -> FinancialSnapshot {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.provider.ticker_info(ticker)).await;

        let snapshot = match outcome {
            Ok(Ok(info)) => FinancialSnapshot::from_info(&info).unwrap_or_else(|| {
                FinancialSnapshot::failure(
                    ticker,
                    StockError::DataUnavailable {
                        symbol: ticker.to_string(),
                        reason: "provider returned no recognized fields".to_string(),
                    },
                )
            }),
            Ok(Err(e)) => FinancialSnapshot::failure(ticker, e),
            Err(_) => FinancialSnapshot::failure(
                ticker,
                StockError::Timeout {
                    symbol: ticker.to_string(),
                    elapsed: self.timeout,
                },
            ),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match snapshot.error() {
            Some(error) => warn!(ticker, duration_ms, error, "Financial data fetch failed"),
            None => info!(ticker, duration_ms, "Financial data fetched"),
        }
        snapshot
    }
}
