//! Configuration for the IaC coordinator

use crate::error::{IacError, Result};
use crate::router::IacSpecialist;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the coordinator does when the keyword rules tie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Send ambiguous requests to the default route
    #[default]
    Rules,
    /// Ask the coordinator model to choose, then fall back to the default route
    RulesThenModel,
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules => write!(f, "rules"),
            Self::RulesThenModel => write!(f, "rules_then_model"),
        }
    }
}

impl FromStr for RoutingStrategy {
    type Err = IacError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rules" => Ok(Self::Rules),
            "rules_then_model" | "model" => Ok(Self::RulesThenModel),
            other => Err(IacError::ConfigError(format!(
                "unknown routing strategy '{other}' (expected 'rules' or 'rules_then_model')"
            ))),
        }
    }
}

/// Configuration for the IaC agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IacConfig {
    /// Model the coordinator uses to break ties
    pub coordinator_model: String,

    /// Model for `terraform_config_gen`
    pub terraform_model: String,

    /// Model for `kubectl_manifest_gen`
    pub kubectl_model: String,

    pub temperature: f32,

    pub max_tokens: usize,

    pub strategy: RoutingStrategy,

    /// Specialist for requests nothing else could place
    pub default_route: IacSpecialist,
}

impl Default for IacConfig {
    fn default() -> Self {
        Self {
            coordinator_model: "gemini-2.5-flash".to_string(),
            terraform_model: "gemini-2.5-pro".to_string(),
            kubectl_model: "gemini-2.5-pro".to_string(),
            temperature: 0.7,
            max_tokens: 8192,
            strategy: RoutingStrategy::Rules,
            default_route: IacSpecialist::Terraform,
        }
    }
}

impl IacConfig {
    /// Create a new configuration builder
    pub fn builder() -> IacConfigBuilder {
        IacConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let models = [
            ("coordinator_model", &self.coordinator_model),
            ("terraform_model", &self.terraform_model),
            ("kubectl_model", &self.kubectl_model),
        ];
        if let Some((field, _)) = models.iter().find(|(_, m)| m.trim().is_empty()) {
            return Err(IacError::ConfigError(format!("{field} must not be empty")));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(IacError::ConfigError(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(IacError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for IacConfig
#[derive(Debug, Default)]
pub struct IacConfigBuilder {
    coordinator_model: Option<String>,
    terraform_model: Option<String>,
    kubectl_model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    strategy: Option<RoutingStrategy>,
    default_route: Option<IacSpecialist>,
}

impl IacConfigBuilder {
    /// Set the coordinator model
    pub fn coordinator_model(mut self, model: impl Into<String>) -> Self {
        self.coordinator_model = Some(model.into());
        self
    }

    /// Use one model for both specialists
    pub fn specialist_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.terraform_model = Some(model.clone());
        self.kubectl_model = Some(model);
        self
    }

    pub fn terraform_model(mut self, model: impl Into<String>) -> Self {
        self.terraform_model = Some(model.into());
        self
    }

    pub fn kubectl_model(mut self, model: impl Into<String>) -> Self {
        self.kubectl_model = Some(model.into());
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

    /// Set the tie-breaking strategy
    pub fn strategy(mut self, strategy: RoutingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the fallback specialist
    pub fn default_route(mut self, specialist: IacSpecialist) -> Self {
        self.default_route = Some(specialist);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<IacConfig> {
        let defaults = IacConfig::default();

        let config = IacConfig {
            coordinator_model: self.coordinator_model.unwrap_or(defaults.coordinator_model),
            terraform_model: self.terraform_model.unwrap_or(defaults.terraform_model),
            kubectl_model: self.kubectl_model.unwrap_or(defaults.kubectl_model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            strategy: self.strategy.unwrap_or(defaults.strategy),
            default_route: self.default_route.unwrap_or(defaults.default_route),
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
        let config = IacConfig::default();
        assert_eq!(config.coordinator_model, "gemini-2.5-flash");
        assert_eq!(config.terraform_model, "gemini-2.5-pro");
        assert_eq!(config.kubectl_model, "gemini-2.5-pro");
        assert_eq!(config.strategy, RoutingStrategy::Rules);
        assert_eq!(config.default_route, IacSpecialist::Terraform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = IacConfig::builder()
            .specialist_model("gemini-2.5-flash")
            .strategy(RoutingStrategy::RulesThenModel)
            .default_route(IacSpecialist::Kubernetes)
            .build()
            .unwrap();

        assert_eq!(config.terraform_model, "gemini-2.5-flash");
        assert_eq!(config.kubectl_model, "gemini-2.5-flash");
        assert_eq!(config.coordinator_model, "gemini-2.5-flash");
        assert_eq!(config.strategy, RoutingStrategy::RulesThenModel);
        assert_eq!(config.default_route, IacSpecialist::Kubernetes);
    }

    #[test]
    fn test_validation() {
        assert!(IacConfig::builder().temperature(2.5).build().is_err());
        assert!(IacConfig::builder().max_tokens(0).build().is_err());

        let err = IacConfig::builder()
            .coordinator_model(" ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("coordinator_model"));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(
            "rules".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::Rules
        );
        assert_eq!(
            "Rules-Then-Model".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::RulesThenModel
        );
        assert!("llm_only".parse::<RoutingStrategy>().is_err());
        assert_eq!(RoutingStrategy::RulesThenModel.to_string(), "rules_then_model");
    }
}
