//! Domain layer for the reasoning and agent orchestration core.
//!
//! This module contains the core business logic: tension reasoning
//! (analysis, rules, solutions, priority, coordination), the agent
//! template registry, agent lifecycle/evolution behavior, and ecosystem
//! optimization. All of it is plain, dependency-free logic over the
//! types in [`models`]; I/O is pushed to [`ports`].

pub mod agents;
pub mod ecosystem;
pub mod error;
pub mod models;
pub mod ports;
pub mod reasoning;
pub mod registry;

pub use error::{ReasoningError, ReasoningResult};
