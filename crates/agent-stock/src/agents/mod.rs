//! Stock research agents
//!
//! Three analysts, each with its own tool set, and two ways for the Chief
//! Investment Officer to use them: as tools it calls itself
//! ([`ChiefInvestmentOfficer`]) or through a fixed-order
//! [`ResearchPipeline`]. [`StockPicker`] picks one per
//! [`OrchestrationMode`](crate::config::OrchestrationMode).

pub mod chief_investment_officer;
pub mod economic_analyst;
pub mod fundamental_analyst;
pub mod pipeline;
pub mod sentiment_analyst;
pub mod stock_picker;
pub mod team;

pub use chief_investment_officer::ChiefInvestmentOfficer;
pub use economic_analyst::EconomicAndIndustryAnalyst;
pub use fundamental_analyst::FundamentalAnalyst;
pub use pipeline::ResearchPipeline;
pub use sentiment_analyst::MarketSentimentAnalyst;
pub use stock_picker::StockPicker;
pub use team::AnalystTeam;

use crate::config::StockConfig;
use agent_runtime::ExecutorConfig;

/// Executor settings for one role
pub(crate) fn executor_config(config: &StockConfig, model: &str, instruction: &str) -> ExecutorConfig {
    ExecutorConfig {
        max_iterations: config.max_iterations,
        model: model.to_string(),
        system_prompt: Some(instruction.to_string()),
        max_tokens: config.max_tokens,
        temperature: Some(config.temperature),
    }
}
