//! Ticker symbol extraction from free-text requests

use crate::error::{Result, StockError};
use regex::Regex;

/// Upper-case words that look like symbols but rarely are in a request
const NOT_TICKERS: [&str; 24] = [
    "AI", "API", "CEO", "CFO", "CIO", "COO", "CTO", "EPS", "ESG", "ETF", "EU", "GDP", "IPO", "IT",
    "LLC", "NYSE", "OK", "PE", "ROI", "SEC", "UK", "US", "USA", "USD",
];

/// Finds the ticker a request is about
///
/// Precedence: a parenthesized symbol (`Google (GOOGL)`), then a cashtag
/// (`$msft`), then the first bare upper-case word of 2-5 letters that is not
/// a common abbreviation.
#[derive(Debug, Clone)]
pub struct TickerExtractor {
    parenthesized: Regex,
    cashtag: Regex,
    bare: Regex,
}

impl TickerExtractor {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| StockError::ConfigError(format!("invalid ticker pattern: {e}")))
        };

        Ok(Self {
            parenthesized: compile(r"\(\s*\$?([A-Z][A-Z0-9]{0,5}(?:[.\-][A-Z0-9]{1,2})?)\s*\)")?,
            cashtag: compile(r"\$([A-Za-z]{1,6})\b")?,
            bare: compile(r"\b([A-Z]{2,5}(?:\.[A-Z]{1,2})?)\b")?,
        })
    }

    /// Extract the ticker from `query`, upper-cased
    pub fn extract(&self, query: &str) -> Option<String> {
        if let Some(caps) = self.parenthesized.captures(query) {
            return Some(caps[1].to_string());
        }
        if let Some(caps) = self.cashtag.captures(query) {
            return Some(caps[1].to_ascii_uppercase());
        }
        self.bare
            .captures_iter(query)
            .map(|caps| caps[1].to_string())
            .find(|word| !NOT_TICKERS.contains(&word.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(query: &str) -> Option<String> {
        TickerExtractor::new().unwrap().extract(query)
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(
            extract("Should I invest in Google (GOOGL) for the long term?").as_deref(),
            Some("GOOGL")
        );
        assert_eq!(extract("Berkshire (BRK.B) vs the S&P").as_deref(), Some("BRK.B"));
        assert_eq!(extract("Ford ( F ) looks cheap").as_deref(), Some("F"));
    }

    #[test]
    fn test_cashtag() {
        assert_eq!(extract("thoughts on $nvda?").as_deref(), Some("NVDA"));
    }

    #[test]
    fn test_bare_symbol_skips_abbreviations() {
        assert_eq!(
            extract("Is the CEO of MSFT right about AI?").as_deref(),
            Some("MSFT")
        );
        assert_eq!(extract("Tell me about TSLA").as_deref(), Some("TSLA"));
    }

    #[test]
    fn test_no_ticker() {
        assert_eq!(extract("Should I invest in Google for the long term?"), None);
        assert_eq!(extract("What does the CEO think about AI?"), None);
        assert_eq!(extract("(maybe) later"), None);
    }
}
