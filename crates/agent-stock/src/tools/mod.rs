//! Stock research tools for LLM agents

pub mod financial_data;
pub mod web_search;

pub use financial_data::FinancialDataTool;
pub use web_search::WebSearchTool;
