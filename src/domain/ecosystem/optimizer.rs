//! Ecosystem-wide optimization (C11): health reporting across a set of
//! agents, and an algorithm for distributing pending tensions across
//! them.
//!
//! Grounded on `original_source/trm_api/ecosystem/optimizer.py`'s
//! `analyze_ecosystem_health`/`optimize_agent_distribution`/
//! `balance_workload_across_agents`.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::agents::quantum::ComplexityLevel;
use crate::domain::models::agent::{Agent, AgentOrigin};
use crate::domain::models::ecosystem::AgentEcosystem;
use crate::domain::models::tension::{Tension, TensionPriority};

/// Aggregate efficiency/throughput/utilization across an ecosystem.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceMetrics {
    pub efficiency: f64,
    pub throughput: f64,
    pub utilization: f64,
}

/// Full ecosystem health snapshot (§4.11).
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub overall_health_score: f64,
    pub agent_health: HashMap<String, f64>,
    pub workload_balance_score: f64,
    pub performance_metrics: PerformanceMetrics,
    pub issues_identified: Vec<String>,
    pub recommendations: Vec<String>,
}

/// One proposed tension -> agent assignment.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub tension_id: uuid::Uuid,
    pub agent_id: String,
    pub score: f64,
}

/// Result of [`EcosystemOptimizer::optimize_agent_distribution`].
#[derive(Debug, Clone, Default)]
pub struct OptimizationPlan {
    pub assignments: Vec<Assignment>,
    pub unassigned_tension_ids: Vec<uuid::Uuid>,
}

/// A synthesized view of what a tension demands from an assigned agent.
/// Derived from the raw tension text and (when available) its analysis,
/// since spec.md's `requiredCapabilities`/`estimatedEffort` fields on a
/// tension are themselves derived, not stored (§4.11 step 1).
#[derive(Debug, Clone)]
pub struct TensionDemand {
    pub required_capabilities: Vec<String>,
    pub estimated_effort_minutes: f64,
    pub complexity: ComplexityLevel,
    pub priority: TensionPriority,
}

pub fn extract_demand(tension: &Tension, key_themes: &[String]) -> TensionDemand {
    let complexity = ComplexityLevel::from_text_length(tension.combined_text().len());
    let estimated_effort_minutes = match complexity {
        ComplexityLevel::Low => 60.0,
        ComplexityLevel::Medium => 150.0,
        ComplexityLevel::High => 300.0,
    };
    TensionDemand {
        required_capabilities: key_themes.to_vec(),
        estimated_effort_minutes,
        complexity,
        priority: tension.priority,
    }
}

/// Per-origin efficiency adjustment applied on top of average
/// proficiency: composite agents carry a small coordination-overhead
/// penalty; template and custom agents run at face value.
fn origin_efficiency_multiplier(origin: AgentOrigin) -> f64 {
    match origin {
        AgentOrigin::Composite => 0.95,
        AgentOrigin::Template | AgentOrigin::Custom => 1.0,
    }
}

fn agent_efficiency(agent: &Agent) -> f64 {
    let base = agent.metadata.get_average_proficiency() * 100.0;
    (base * origin_efficiency_multiplier(agent.origin)).clamp(0.0, 100.0)
}

fn agent_quality(agent: &Agent) -> f64 {
    if agent.performance_history.is_empty() {
        75.0
    } else {
        agent
            .performance_history
            .iter()
            .map(|r| r.quality)
            .sum::<f64>()
            / agent.performance_history.len() as f64
    }
}

fn agent_capacity(agent: &Agent) -> usize {
    3 + agent.capabilities.len().min(5)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EcosystemOptimizer;

impl EcosystemOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Computes one agent's health score: baseline 75, workload
    /// penalty (0 workload -10, >10 workload -15), capability-count
    /// adjustment (0 capabilities -15, >8 capabilities +10), plus
    /// 0.2x the efficiency and quality deltas from the neutral midpoint
    /// of 75, clamped to `[0, 100]`.
    pub fn agent_health_score(&self, agent: &Agent, workload: usize) -> f64 {
        let mut score = 75.0;

        if workload == 0 {
            score -= 10.0;
        } else if workload > 10 {
            score -= 15.0;
        }

        let capability_count = agent.capabilities.len();
        if capability_count == 0 {
            score -= 15.0;
        } else if capability_count > 8 {
            score += 10.0;
        }

        score += 0.2 * (agent_efficiency(agent) - 75.0);
        score += 0.2 * (agent_quality(agent) - 75.0);

        score.clamp(0.0, 100.0)
    }

    /// `max(0, 100 - (stddev/mean)*100)` over per-agent workload sizes;
    /// 100 when every agent has zero workload (nothing to balance).
    pub fn workload_balance_score(&self, workloads: &[usize]) -> f64 {
        if workloads.is_empty() || workloads.iter().all(|w| *w == 0) {
            return 100.0;
        }
        let n = workloads.len() as f64;
        let mean = workloads.iter().map(|w| *w as f64).sum::<f64>() / n;
        if mean == 0.0 {
            return 100.0;
        }
        let variance = workloads
            .iter()
            .map(|w| (*w as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let stddev = variance.sqrt();
        (100.0 - (stddev / mean) * 100.0).max(0.0)
    }

    fn performance_metrics(&self, ecosystem: &AgentEcosystem) -> PerformanceMetrics {
        let agents: Vec<&Agent> = ecosystem.agents.values().collect();
        if agents.is_empty() {
            return PerformanceMetrics {
                efficiency: 0.0,
                throughput: 0.0,
                utilization: 0.0,
            };
        }
        let efficiency =
            agents.iter().map(|a| agent_efficiency(a)).sum::<f64>() / agents.len() as f64;
        let throughput = ecosystem.active_tensions.len() as f64 / agents.len() as f64;
        let busy = agents
            .iter()
            .filter(|a| ecosystem.workload_for(&a.agent_id) > 0)
            .count();
        let utilization = busy as f64 / agents.len() as f64;
        PerformanceMetrics {
            efficiency,
            throughput,
            utilization,
        }
    }

    /// Full ecosystem health analysis (§4.11).
    #[tracing::instrument(skip(self, ecosystem), fields(ecosystem_id = %ecosystem.ecosystem_id))]
    pub fn analyze_ecosystem_health(&self, ecosystem: &AgentEcosystem) -> HealthReport {
        let mut agent_health = HashMap::new();
        let mut workloads = Vec::new();
        for (agent_id, agent) in &ecosystem.agents {
            let workload = ecosystem.workload_for(agent_id);
            workloads.push(workload);
            agent_health.insert(agent_id.clone(), self.agent_health_score(agent, workload));
        }

        let workload_balance_score = self.workload_balance_score(&workloads);
        let performance_metrics = self.performance_metrics(ecosystem);

        let mut issues_identified = Vec::new();
        let mut recommendations = Vec::new();

        for (agent_id, health) in &agent_health {
            if *health < 60.0 {
                issues_identified.push(format!("agent '{agent_id}' is unhealthy (score {health:.1})"));
                recommendations.push(format!("review or evolve agent '{agent_id}'"));
            }
        }

        if workload_balance_score < 60.0 {
            issues_identified.push(format!(
                "workload is poorly balanced (score {workload_balance_score:.1})"
            ));
            recommendations.push("rebalance workload across agents".to_string());
        }

        let agent_count = ecosystem.agents.len();
        if agent_count > 0 {
            let idle = workloads.iter().filter(|w| **w == 0).count();
            let idle_fraction = idle as f64 / agent_count as f64;
            if idle_fraction > 0.30 {
                issues_identified.push(format!(
                    "{:.0}% of agents are idle",
                    idle_fraction * 100.0
                ));
                recommendations.push("assign pending tensions to idle agents".to_string());
            }
        }

        if workloads.iter().any(|w| *w > 10) {
            issues_identified.push("one or more agents are overloaded (workload > 10)".to_string());
            recommendations.push("redistribute work away from overloaded agents".to_string());
        }

        if agent_count < 3 {
            issues_identified.push("low agent diversity (fewer than 3 agents)".to_string());
            recommendations.push("provision additional agents to diversify coverage".to_string());
        }

        let mean_agent_health = if agent_health.is_empty() {
            0.0
        } else {
            agent_health.values().sum::<f64>() / agent_health.len() as f64
        };
        let overall_health_score = 0.4 * mean_agent_health
            + 0.3 * workload_balance_score
            + 0.3 * ((performance_metrics.efficiency + performance_metrics.utilization * 100.0) / 2.0);

        let overall_health_score = overall_health_score.clamp(0.0, 100.0);
        if overall_health_score < 60.0 {
            warn!(overall_health_score, issue_count = issues_identified.len(), "ecosystem health is degraded");
        } else {
            info!(overall_health_score, "ecosystem health computed");
        }

        HealthReport {
            overall_health_score,
            agent_health,
            workload_balance_score,
            performance_metrics,
            issues_identified,
            recommendations,
        }
    }

    /// Greedily assigns tensions (sorted by priority desc, then
    /// complexity desc) to the best-scoring agent with spare capacity.
    /// Assignment score: `50 + 30*(|caps ∩ required|/|required|) +
    /// 0.2*(efficiency-75) - 5*current_workload`. Agents at or over
    /// capacity (`3 + min(5, capability_count)`) are skipped.
    pub fn optimize_agent_distribution(
        &self,
        ecosystem: &AgentEcosystem,
        demands: &[(uuid::Uuid, TensionDemand)],
    ) -> OptimizationPlan {
        let mut sorted: Vec<&(uuid::Uuid, TensionDemand)> = demands.iter().collect();
        sorted.sort_by(|a, b| {
            b.1.priority
                .cmp(&a.1.priority)
                .then_with(|| complexity_rank(b.1.complexity).cmp(&complexity_rank(a.1.complexity)))
        });

        let mut workload: HashMap<String, usize> = ecosystem
            .agents
            .keys()
            .map(|id| (id.clone(), ecosystem.workload_for(id)))
            .collect();

        let mut plan = OptimizationPlan::default();

        for (tension_id, demand) in sorted {
            let mut best: Option<(String, f64)> = None;
            for (agent_id, agent) in &ecosystem.agents {
                let current_workload = *workload.get(agent_id).unwrap_or(&0);
                if current_workload >= agent_capacity(agent) {
                    continue;
                }
                let capability_names: std::collections::HashSet<&str> =
                    agent.capabilities.iter().map(|c| c.name.as_str()).collect();
                let overlap = if demand.required_capabilities.is_empty() {
                    0.0
                } else {
                    let matches = demand
                        .required_capabilities
                        .iter()
                        .filter(|name| capability_names.contains(name.as_str()))
                        .count();
                    matches as f64 / demand.required_capabilities.len() as f64
                };
                let score = 50.0 + 30.0 * overlap + 0.2 * (agent_efficiency(agent) - 75.0)
                    - 5.0 * current_workload as f64;

                if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
                    best = Some((agent_id.clone(), score));
                }
            }

            match best {
                Some((agent_id, score)) => {
                    *workload.entry(agent_id.clone()).or_insert(0) += 1;
                    plan.assignments.push(Assignment {
                        tension_id: *tension_id,
                        agent_id,
                        score,
                    });
                }
                None => plan.unassigned_tension_ids.push(*tension_id),
            }
        }

        plan
    }

    /// Distributes a flat list of work items evenly across the given
    /// agent ids. When no agents are registered, assumes 3 anonymous
    /// slots (`"slot-0"`, `"slot-1"`, `"slot-2"`) so the algorithm still
    /// produces a usable plan before any agent has been provisioned.
    pub fn balance_workload_across_agents<T: Clone>(
        &self,
        items: &[T],
        agent_ids: &[String],
    ) -> HashMap<String, Vec<T>> {
        let fallback: Vec<String> = (0..3).map(|i| format!("slot-{i}")).collect();
        let slots: &[String] = if agent_ids.is_empty() { &fallback } else { agent_ids };

        let mut distribution: HashMap<String, Vec<T>> =
            slots.iter().map(|id| (id.clone(), Vec::new())).collect();
        for (i, item) in items.iter().enumerate() {
            let slot = &slots[i % slots.len()];
            distribution.get_mut(slot).unwrap().push(item.clone());
        }
        distribution
    }
}

fn complexity_rank(level: ComplexityLevel) -> u8 {
    match level {
        ComplexityLevel::Low => 0,
        ComplexityLevel::Medium => 1,
        ComplexityLevel::High => 2,
    }
}
