//! Tool management and execution framework for agent-rs
//!
//! This crate provides a framework for defining tools (functions) that agents
//! can use, and a registry that acts as the directory of every capability an
//! agent may call, each with a declared input and output contract.

pub mod registry;
pub mod tool;

pub use registry::{RegistryError, ToolRegistry};
pub use tool::{Tool, ToolKind};
