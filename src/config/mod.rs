//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (paths, sentinels, defaults)
//! - Library configuration and logging options
//! - CLI parsing for the binary

pub mod cli;
mod constants;
mod types;

pub use constants::*;
pub use types::{container_path, Config, LogFormat, LogLevel};
