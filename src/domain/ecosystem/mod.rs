//! Ecosystem-wide optimization (C11): health analysis and workload
//! distribution across a registered set of agents.

pub mod optimizer;

pub use optimizer::{
    Assignment, EcosystemOptimizer, HealthReport, OptimizationPlan, PerformanceMetrics,
    TensionDemand,
};
