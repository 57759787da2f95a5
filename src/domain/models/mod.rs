//! Domain models for the reasoning and agent orchestration core.
//!
//! Pure data types with light, dependency-free behavior (builders,
//! invariant checks). The algorithms that produce and consume these
//! types live in [`crate::domain::reasoning`], [`crate::domain::agents`],
//! [`crate::domain::registry`] and [`crate::domain::ecosystem`].

pub mod agent;
pub mod agent_capability;
pub mod agent_template;
pub mod ecosystem;
pub mod priority_result;
pub mod rule;
pub mod solution;
pub mod tension;
pub mod tension_analysis;

pub use agent::{
    Agent, AgentLifecycleState, AgentOrigin, CompletedTask, PerformanceRecord, PerformanceStats,
};
pub use agent_capability::{AgentCapability, WinContribution};
pub use agent_template::{AgentTemplateMetadata, WinOptimizationWeights};
pub use ecosystem::AgentEcosystem;
pub use priority_result::{normalize_priority, PriorityCalculationResult, PriorityLevel};
pub use rule::{
    ActionResult, BusinessRule, Operator, RuleAction, RuleCondition, RuleConflict,
    RuleMatchRecord, RuleType, RuleValidation, RulesSummary,
};
pub use solution::{GeneratedSolution, SolutionPriority, SolutionStep, SolutionType};
pub use tension::{Tension, TensionPriority, TensionStatus, TensionType};
pub use tension_analysis::{ImpactLevel, TensionAnalysis, UrgencyLevel};
