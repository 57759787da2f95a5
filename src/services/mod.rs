//! Ambient services for the reasoning and agent orchestration core.

pub mod config;

pub use config::{ConfigError, ReasoningConfig, WinWeights};
