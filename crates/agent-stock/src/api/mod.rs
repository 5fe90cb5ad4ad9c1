//! Market data providers
//!
//! Providers answer with a loosely typed attribute bag. [`InfoBag`] is the one
//! place where those values are read: every accessor reports a missing key,
//! a `null` and a value of the wrong type alike, as absent.

pub mod yahoo;

pub use yahoo::{YahooEndpoints, YahooFinanceClient};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Attribute bag returned by a market data provider, keyed by provider field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoBag(Map<String, Value>);

impl InfoBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already flattened JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Insert or replace an attribute
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Non-empty string attribute
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Finite numeric attribute
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key)?.as_f64().filter(|n| n.is_finite())
    }

    /// Non-negative whole-number attribute
    ///
    /// Providers sometimes encode counts as floats (`1234.0`); those are
    /// accepted as long as they carry no fractional part.
    pub fn integer(&self, key: &str) -> Option<u64> {
        let value = self.0.get(key)?;
        if let Some(n) = value.as_u64() {
            return Some(n);
        }
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    }

    /// Raw attribute value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag holds no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for InfoBag {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Source of per-ticker company and valuation attributes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Look up every attribute the provider has for `symbol`
    async fn ticker_info(&self, symbol: &str) -> Result<InfoBag>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag() -> InfoBag {
        InfoBag::from_iter([
            ("longName", json!("Alphabet Inc.")),
            ("blank", json!("   ")),
            ("marketCap", json!(2_000_000_000_000_u64)),
            ("trailingPE", json!(24.5)),
            ("averageVolume", json!(31_000_000.0)),
            ("fractionalVolume", json!(10.5)),
            ("negative", json!(-3)),
            ("nothing", Value::Null),
            ("wrongType", json!({"raw": 1})),
        ])
    }

    #[test]
    fn test_text_accessor() {
        let bag = bag();
        assert_eq!(bag.text("longName").as_deref(), Some("Alphabet Inc."));
        assert_eq!(bag.text("blank"), None);
        assert_eq!(bag.text("marketCap"), None);
        assert_eq!(bag.text("missing"), None);
    }

    #[test]
    fn test_number_accessor() {
        let bag = bag();
        assert_eq!(bag.number("trailingPE"), Some(24.5));
        assert_eq!(bag.number("marketCap"), Some(2_000_000_000_000.0));
        assert_eq!(bag.number("longName"), None);
        assert_eq!(bag.number("nothing"), None);
        assert_eq!(bag.number("wrongType"), None);
    }

    #[test]
    fn test_integer_accessor() {
        let bag = bag();
        assert_eq!(bag.integer("averageVolume"), Some(31_000_000));
        assert_eq!(bag.integer("marketCap"), Some(2_000_000_000_000));
        assert_eq!(bag.integer("fractionalVolume"), None);
        assert_eq!(bag.integer("negative"), None);
        assert_eq!(bag.integer("missing"), None);
    }

    #[test]
    fn test_len_and_insert() {
        let mut bag = InfoBag::new();
        assert!(bag.is_empty());
        bag.insert("sector", json!("Technology"));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("sector"), Some(&json!("Technology")));
    }
}
