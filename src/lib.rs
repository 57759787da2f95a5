//! Tension reasoning and agent orchestration core.
//!
//! Classifies raw tensions, evaluates business rules against them,
//! generates candidate solutions, scores priority, and coordinates
//! those four stages behind a single request/response contract (C1-C5).
//! Builds on top of that a template-driven agent model: a capability
//! and template catalog (C6-C7), a six-phase quantum operating cycle
//! each agent runs per tension (C8), composite/custom agent creation
//! and capability evolution (C9-C10), and ecosystem-wide health
//! reporting and workload distribution (C11).
//!
//! I/O (persistence, event delivery) is pushed to the [`domain::ports`]
//! traits; this crate is otherwise a pure library with no network or
//! database dependency of its own.

pub mod domain;
pub mod services;

pub use domain::error::{ReasoningError, ReasoningResult};
pub use services::config::ReasoningConfig;
