//! Reasoning pipeline (C1-C5): classify a tension, evaluate business
//! rules against it, generate candidate solutions, score its priority,
//! and orchestrate the four stages behind a single request/response
//! contract.

pub mod coordinator;
pub mod priority_calculator;
pub mod rule_engine;
pub mod solution_generator;
pub mod tension_analyzer;

pub use coordinator::{ReasoningCoordinator, ReasoningRequest, ReasoningResponse, RequestedService};
pub use priority_calculator::{PriorityCalculator, PriorityContext, PriorityMethod, TeamCapacity};
pub use rule_engine::RuleEngine;
pub use solution_generator::SolutionGenerator;
pub use tension_analyzer::TensionAnalyzer;
