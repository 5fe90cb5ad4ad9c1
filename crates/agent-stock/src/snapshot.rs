//! Financial snapshot record
//!
//! A snapshot either carries company and valuation data or carries an error
//! message, never both. Fields are private so the two shapes can only be
//! built through [`FinancialSnapshot::from_info`] and
//! [`FinancialSnapshot::failure`].

use crate::api::InfoBag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Company and valuation data for one ticker, or the reason it is missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    company_name: Option<String>,
    sector: Option<String>,
    industry: Option<String>,
    market_cap: Option<f64>,
    pe_ratio: Option<f64>,
    forward_pe: Option<f64>,
    dividend_yield: Option<f64>,
    price_to_book: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    average_volume: Option<u64>,
    short_summary: Option<String>,
    error: Option<String>,
}

impl FinancialSnapshot {
    /// Build a data snapshot from provider attributes
    ///
    /// Returns `None` when none of the known attributes is present.
    pub fn from_info(info: &InfoBag) -> Option<Self> {
        let snapshot = Self {
            company_name: info.text("longName"),
            sector: info.text("sector"),
            industry: info.text("industry"),
            market_cap: info.number("marketCap"),
            pe_ratio: info.number("trailingPE"),
            forward_pe: info.number("forwardPE"),
            dividend_yield: info.number("dividendYield"),
            price_to_book: info.number("priceToBook"),
            fifty_two_week_high: info.number("fiftyTwoWeekHigh"),
            fifty_two_week_low: info.number("fiftyTwoWeekLow"),
            average_volume: info.integer("averageVolume"),
            short_summary: info.text("longBusinessSummary"),
            error: None,
        };
        snapshot.has_data().then_some(snapshot)
    }

    /// Build a failure snapshot; every data field is absent
    pub fn failure(ticker: &str, message: impl fmt::Display) -> Self {
        Self {
            error: Some(format!(
                "Could not retrieve data for {ticker}. Error: {message}"
            )),
            ..Self::default()
        }
    }

    /// Whether this snapshot records a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn has_data(&self) -> bool {
        self.company_name.is_some()
            || self.sector.is_some()
            || self.industry.is_some()
            || self.market_cap.is_some()
            || self.pe_ratio.is_some()
            || self.forward_pe.is_some()
            || self.dividend_yield.is_some()
            || self.price_to_book.is_some()
            || self.fifty_two_week_high.is_some()
            || self.fifty_two_week_low.is_some()
            || self.average_volume.is_some()
            || self.short_summary.is_some()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.market_cap
    }

    /// Trailing price/earnings ratio
    pub fn pe_ratio(&self) -> Option<f64> {
        self.pe_ratio
    }

    pub fn forward_pe(&self) -> Option<f64> {
        self.forward_pe
    }

    /// Dividend yield as the provider reports it (a fraction, e.g. `0.0046`)
    pub fn dividend_yield(&self) -> Option<f64> {
        self.dividend_yield
    }

    pub fn price_to_book(&self) -> Option<f64> {
        self.price_to_book
    }

    pub fn fifty_two_week_high(&self) -> Option<f64> {
        self.fifty_two_week_high
    }

    pub fn fifty_two_week_low(&self) -> Option<f64> {
        self.fifty_two_week_low
    }

    pub fn average_volume(&self) -> Option<u64> {
        self.average_volume
    }

    /// Business summary
    pub fn short_summary(&self) -> Option<&str> {
        self.short_summary.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_from_info_maps_provider_keys() {
        let info = InfoBag::from_iter([
            ("longName", json!("Alphabet Inc.")),
            ("trailingPE", json!(24.1)),
            ("dividendYield", json!(0.0046)),
            ("averageVolume", json!(27_000_000)),
            ("unrelated", json!("ignored")),
        ]);

        let snapshot = FinancialSnapshot::from_info(&info).unwrap();
        assert_eq!(snapshot.company_name(), Some("Alphabet Inc."));
        assert_eq!(snapshot.pe_ratio(), Some(24.1));
        assert_eq!(snapshot.dividend_yield(), Some(0.0046));
        assert_eq!(snapshot.average_volume(), Some(27_000_000));
        assert_eq!(snapshot.forward_pe(), None);
        assert!(!snapshot.is_error());
    }

    #[test]
    fn test_from_info_without_known_fields() {
        let info = InfoBag::from_iter([("currency", json!("USD"))]);
        assert!(FinancialSnapshot::from_info(&info).is_none());
        assert!(FinancialSnapshot::from_info(&InfoBag::new()).is_none());
    }

    #[test]
    fn test_failure_shape() {
        let snapshot = FinancialSnapshot::failure("ZZZZ", "not found");
        assert_eq!(
            snapshot.error(),
            Some("Could not retrieve data for ZZZZ. Error: not found")
        );
        assert!(snapshot.is_error());
        assert!(!snapshot.has_data());
    }

    #[test]
    fn test_serializes_every_key() {
        let value = serde_json::to_value(FinancialSnapshot::failure("X", "boom")).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 13);
        assert_eq!(obj["company_name"], Value::Null);
        assert_eq!(obj["average_volume"], Value::Null);
        assert!(obj["error"].as_str().unwrap().contains("boom"));
    }
}
