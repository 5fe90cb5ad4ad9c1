//! Yahoo Finance client
//!
//! Talks to the unofficial quoteSummary endpoint. Yahoo requires a session
//! cookie (set by `fc.yahoo.com`) plus a crumb token that must accompany every
//! query; the cookie lives in the client's jar and the crumb is cached until
//! Yahoo rejects it.

use super::{InfoBag, MarketDataProvider};
use crate::error::{Result, StockError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "Yahoo Finance";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const REFERER: &str = "https://finance.yahoo.com/";
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// quoteSummary modules requested per lookup, in precedence order
pub const MODULES: [&str; 6] = [
    "price",
    "quoteType",
    "assetProfile",
    "summaryProfile",
    "summaryDetail",
    "defaultKeyStatistics",
];

/// Yahoo endpoints (overridable for tests and proxies)
#[derive(Debug, Clone)]
pub struct YahooEndpoints {
    /// Page that sets the session cookie
    pub cookie_url: String,
    /// Crumb endpoints, tried in order
    pub crumb_urls: Vec<String>,
    /// quoteSummary base; the symbol is appended as a path segment
    pub quote_summary_base: String,
}

impl Default for YahooEndpoints {
    fn default() -> Self {
        Self {
            cookie_url: "https://fc.yahoo.com".to_string(),
            crumb_urls: vec![
                "https://query1.finance.yahoo.com/v1/test/getcrumb".to_string(),
                "https://query2.finance.yahoo.com/v1/test/getcrumb".to_string(),
            ],
            quote_summary_base: "https://query2.finance.yahoo.com/v10/finance/quoteSummary"
                .to_string(),
        }
    }
}

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    client: Client,
    endpoints: YahooEndpoints,
    crumb: Mutex<Option<String>>,
}

impl YahooFinanceClient {
    /// Create a client with the default endpoints
    pub fn new() -> Result<Self> {
        Self::with_endpoints(YahooEndpoints::default())
    }

    /// Create a client against custom endpoints
    pub fn with_endpoints(endpoints: YahooEndpoints) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoints,
            crumb: Mutex::new(None),
        })
    }

    /// Endpoints in use
    pub fn endpoints(&self) -> &YahooEndpoints {
        &self.endpoints
    }

    fn cached_crumb(&self) -> Option<String> {
        self.crumb
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_crumb(&self, crumb: Option<String>) {
        *self.crumb.lock().unwrap_or_else(PoisonError::into_inner) = crumb;
    }

    /// Drop the cached crumb so the next lookup performs a fresh handshake
    pub fn invalidate_crumb(&self) {
        self.store_crumb(None);
    }

    async fn crumb(&self) -> Result<String> {
        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }
        let crumb = self.refresh_crumb().await?;
        self.store_crumb(Some(crumb.clone()));
        Ok(crumb)
    }

    async fn refresh_crumb(&self) -> Result<String> {
        debug!("Refreshing Yahoo session cookie and crumb");

        // fc.yahoo.com answers 404 but still sets the cookie.
        self.client
            .get(&self.endpoints.cookie_url)
            .header("referer", REFERER)
            .timeout(HANDSHAKE_TIMEOUT)
            .send()
            .await?;

        for endpoint in &self.endpoints.crumb_urls {
            let response = match self
                .client
                .get(endpoint)
                .header("referer", REFERER)
                .timeout(HANDSHAKE_TIMEOUT)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Crumb request failed");
                    continue;
                }
            };

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                return Err(StockError::RateLimitExceeded {
                    provider: PROVIDER.to_string(),
                });
            }
            if !response.status().is_success() {
                debug!(endpoint = %endpoint, status = %response.status(), "Crumb endpoint refused");
                continue;
            }

            let body = response.text().await?;
            if let Some(crumb) = validate_crumb(&body)? {
                return Ok(crumb);
            }
        }

        Err(StockError::YahooFinanceError(
            "failed to fetch crumb from all endpoints".to_string(),
        ))
    }

    fn quote_summary_url(&self, symbol: &str, crumb: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoints.quote_summary_base)
            .map_err(|e| StockError::ConfigError(format!("invalid quoteSummary URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StockError::ConfigError("quoteSummary URL cannot be a base".to_string()))?
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("modules", &MODULES.join(","))
            .append_pair("crumb", crumb);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn ticker_info(&self, symbol: &str) -> Result<InfoBag> {
        if symbol.trim().is_empty() {
            return Err(StockError::InvalidSymbol("empty symbol".to_string()));
        }

        let crumb = self.crumb().await?;
        let url = self.quote_summary_url(symbol, &crumb)?;

        let response = self
            .client
            .get(url)
            .header("referer", REFERER)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.invalidate_crumb();
            return Err(StockError::YahooFinanceError(format!(
                "request rejected with status {status}; session reset"
            )));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(StockError::RateLimitExceeded {
                provider: PROVIDER.to_string(),
            });
        }
        // Unknown symbols come back as 404 with a quoteSummary error body.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(StockError::ApiError(format!(
                "{PROVIDER} returned status {status}"
            )));
        }

        let body = response.text().await?;
        let info = parse_quote_summary(symbol, &body)?;
        debug!(symbol, attributes = info.len(), "Fetched ticker info");
        Ok(info)
    }
}

/// Interpret a crumb endpoint body
///
/// Returns `Ok(None)` for bodies that are not a usable crumb (HTML pages,
/// whitespace, oversized text).
fn validate_crumb(body: &str) -> Result<Option<String>> {
    let body = body.trim();
    if body.to_ascii_lowercase().contains("too many requests") {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }
    if body.is_empty()
        || body.len() >= 100
        || body.contains(char::is_whitespace)
        || body.contains("<html")
        || body.contains("<!DOCTYPE")
    {
        return Ok(None);
    }
    Ok(Some(body.to_string()))
}

/// Parse a quoteSummary response body into a flat attribute bag
pub(crate) fn parse_quote_summary(symbol: &str, body: &str) -> Result<InfoBag> {
    let envelope: Value = serde_json::from_str(body)?;
    let summary = envelope.get("quoteSummary").ok_or_else(|| {
        StockError::YahooFinanceError("response has no quoteSummary envelope".to_string())
    })?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let reason = error
            .get("description")
            .and_then(Value::as_str)
            .or_else(|| error.get("code").and_then(Value::as_str))
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason,
        });
    }

    let result = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .and_then(Value::as_object)
        .ok_or_else(|| StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no results returned".to_string(),
        })?;

    Ok(flatten_modules(result))
}

/// Merge the requested modules into one attribute map
///
/// `{raw, fmt}` wrappers collapse to their raw value; nulls and empty objects
/// are dropped; when two modules carry the same key, the earlier one in
/// [`MODULES`] wins.
fn flatten_modules(result: &Map<String, Value>) -> InfoBag {
    let mut flat = Map::new();
    for module in MODULES {
        let Some(fields) = result.get(module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if flat.contains_key(key) {
                continue;
            }
            if let Some(value) = unwrap_value(value) {
                flat.insert(key.clone(), value);
            }
        }
    }
    InfoBag::from_map(flat)
}

fn unwrap_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(obj) if obj.is_empty() => None,
        Value::Object(obj) => match obj.get("raw") {
            Some(Value::Null) => None,
            Some(raw) => Some(raw.clone()),
            None => Some(value.clone()),
        },
        other => Some(other.clone()),
    }
}
