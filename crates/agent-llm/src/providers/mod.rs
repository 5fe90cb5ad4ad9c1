//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait.

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider};
