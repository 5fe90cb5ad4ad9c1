//! Configuration for stock research runs

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the Chief Investment Officer gathers analyst reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationMode {
    /// The CIO model decides when to call each analyst (analysts exposed as tools)
    #[default]
    Delegated,
    /// Fixed order: fundamentals, sentiment, economy, then synthesis
    Pipeline,
}

impl fmt::Display for OrchestrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delegated => write!(f, "delegated"),
            Self::Pipeline => write!(f, "pipeline"),
        }
    }
}

impl FromStr for OrchestrationMode {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delegated" => Ok(Self::Delegated),
            "pipeline" => Ok(Self::Pipeline),
            other => Err(StockError::ConfigError(format!(
                "unknown orchestration mode '{other}' (expected 'delegated' or 'pipeline')"
            ))),
        }
    }
}

/// Configuration for the stock research agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Model used by the FundamentalAnalyst
    pub fundamental_model: String,

    /// Model used by the MarketSentimentAnalyst
    pub sentiment_model: String,

    /// Model used by the EconomicAndIndustryAnalyst
    pub economic_model: String,

    /// Model used by the ChiefInvestmentOfficer
    pub cio_model: String,

    /// Sampling temperature for every role
    pub temperature: f32,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Tool-loop iteration cap per agent
    pub max_iterations: usize,

    /// Timeout wrapped around each market-data lookup
    pub request_timeout: Duration,

    /// Orchestration mode for the CIO
    pub mode: OrchestrationMode,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            fundamental_model: "gemini-2.5-flash".to_string(),
            sentiment_model: "gemini-2.5-flash".to_string(),
            economic_model: "gemini-2.5-flash".to_string(),
            cio_model: "gemini-2.5-pro".to_string(),
            temperature: 0.7,
            max_tokens: 8192,
            max_iterations: 10,
            request_timeout: Duration::from_secs(30),
            mode: OrchestrationMode::Delegated,
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let models = [
            ("fundamental_model", &self.fundamental_model),
            ("sentiment_model", &self.sentiment_model),
            ("economic_model", &self.economic_model),
            ("cio_model", &self.cio_model),
        ];
        if let Some((field, _)) = models.iter().find(|(_, m)| m.trim().is_empty()) {
            return Err(StockError::ConfigError(format!("{field} must not be empty")));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StockError::ConfigError(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(StockError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(StockError::ConfigError(
                "max_iterations must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    fundamental_model: Option<String>,
    sentiment_model: Option<String>,
    economic_model: Option<String>,
    cio_model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    max_iterations: Option<usize>,
    request_timeout: Option<Duration>,
    mode: Option<OrchestrationMode>,
}

impl StockConfigBuilder {
    /// Use one model for all three analysts
    pub fn analyst_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.fundamental_model = Some(model.clone());
        self.sentiment_model = Some(model.clone());
        self.economic_model = Some(model);
        self
    }

    /// Set the FundamentalAnalyst model
    pub fn fundamental_model(mut self, model: impl Into<String>) -> Self {
        self.fundamental_model = Some(model.into());
        self
    }

    /// Set the MarketSentimentAnalyst model
    pub fn sentiment_model(mut self, model: impl Into<String>) -> Self {
        self.sentiment_model = Some(model.into());
        self
    }

    /// Set the EconomicAndIndustryAnalyst model
    pub fn economic_model(mut self, model: impl Into<String>) -> Self {
        self.economic_model = Some(model.into());
        self
    }

    /// Set the ChiefInvestmentOfficer model
    pub fn cio_model(mut self, model: impl Into<String>) -> Self {
        self.cio_model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the tool-loop iteration cap
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the orchestration mode
    pub fn mode(mut self, mode: OrchestrationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            fundamental_model: self.fundamental_model.unwrap_or(defaults.fundamental_model),
            sentiment_model: self.sentiment_model.unwrap_or(defaults.sentiment_model),
            economic_model: self.economic_model.unwrap_or(defaults.economic_model),
            cio_model: self.cio_model.unwrap_or(defaults.cio_model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            mode: self.mode.unwrap_or(defaults.mode),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.fundamental_model, "gemini-2.5-flash");
        assert_eq!(config.sentiment_model, "gemini-2.5-flash");
        assert_eq!(config.economic_model, "gemini-2.5-flash");
        assert_eq!(config.cio_model, "gemini-2.5-pro");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.mode, OrchestrationMode::Delegated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StockConfig::builder()
            .analyst_model("gemini-2.0-flash")
            .cio_model("gemini-2.5-flash")
            .request_timeout(Duration::from_secs(5))
            .mode(OrchestrationMode::Pipeline)
            .build()
            .unwrap();

        assert_eq!(config.fundamental_model, "gemini-2.0-flash");
        assert_eq!(config.economic_model, "gemini-2.0-flash");
        assert_eq!(config.cio_model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.mode, OrchestrationMode::Pipeline);
    }

    #[test]
    fn test_validation() {
        assert!(StockConfig::builder().max_iterations(0).build().is_err());
        assert!(StockConfig::builder().max_tokens(0).build().is_err());
        assert!(StockConfig::builder().temperature(3.5).build().is_err());
        assert!(
            StockConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );

        let err = StockConfig::builder().cio_model("  ").build().unwrap_err();
        assert!(err.to_string().contains("cio_model"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "pipeline".parse::<OrchestrationMode>().unwrap(),
            OrchestrationMode::Pipeline
        );
        assert_eq!(
            " Delegated ".parse::<OrchestrationMode>().unwrap(),
            OrchestrationMode::Delegated
        );
        assert!("parallel".parse::<OrchestrationMode>().is_err());
        assert_eq!(OrchestrationMode::Pipeline.to_string(), "pipeline");
    }
}
