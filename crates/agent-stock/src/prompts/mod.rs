//! Stock research prompts
//!
//! - `system`: names, descriptions and instructions of each role
//! - `user`: request messages the pipeline sends to each role

mod system;
mod user;

pub use system::*;
pub use user::*;
