//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the agent-rs workspace,
//! including logging setup, configuration management, and the credential
//! precondition checked before any model call is attempted.

pub mod config;
pub mod credentials;
pub mod logging;

pub use config::{Config, ConfigError, LogFormat};
pub use credentials::{CredentialError, GOOGLE_API_KEY, require_env, require_with};
pub use logging::{init_tracing, init_tracing_with};
