//! Agent ecosystem model (§3.9).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::agent::Agent;

/// A named collection of agents managed together (§3.9). Owns agent
/// *registrations* (the id→Agent map) but the agents themselves remain
/// owned by the `TemplateRegistry` (§3.10) in a full deployment; here
/// the ecosystem holds them directly since no separate registry
/// reference is threaded through, which is the simplest ownership
/// shape satisfying the read-mostly access pattern in §5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEcosystem {
    pub ecosystem_id: String,
    pub name: String,
    pub description: String,
    pub agents: HashMap<String, Agent>,
    pub active_tensions: Vec<Uuid>,
    pub workload_distribution: HashMap<String, Vec<Uuid>>,
    pub performance_metrics: HashMap<String, HashMap<String, f64>>,
    pub created_at: DateTime<Utc>,
    pub last_optimized: Option<DateTime<Utc>>,
}

impl AgentEcosystem {
    pub fn new(ecosystem_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ecosystem_id: ecosystem_id.into(),
            name: name.into(),
            description: String::new(),
            agents: HashMap::new(),
            active_tensions: Vec::new(),
            workload_distribution: HashMap::new(),
            performance_metrics: HashMap::new(),
            created_at: Utc::now(),
            last_optimized: None,
        }
    }

    pub fn register_agent(&mut self, agent: Agent) {
        self.workload_distribution
            .entry(agent.agent_id.clone())
            .or_default();
        self.agents.insert(agent.agent_id.clone(), agent);
    }

    /// Upholds the §3.9 invariant: every agent-id key in
    /// `workload_distribution` must reference a live agent, and every
    /// tension-id listed must be in `active_tensions`.
    pub fn is_consistent(&self) -> bool {
        for agent_id in self.workload_distribution.keys() {
            if !self.agents.contains_key(agent_id) {
                return false;
            }
        }
        for tension_ids in self.workload_distribution.values() {
            for tid in tension_ids {
                if !self.active_tensions.contains(tid) {
                    return false;
                }
            }
        }
        true
    }

    pub fn workload_for(&self, agent_id: &str) -> usize {
        self.workload_distribution
            .get(agent_id)
            .map_or(0, std::vec::Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::agent_template::AgentTemplateMetadata;

    #[test]
    fn fresh_ecosystem_is_consistent() {
        let mut eco = AgentEcosystem::new("e1", "Test");
        eco.register_agent(Agent::from_template(
            "a1",
            AgentTemplateMetadata::new("T", "d"),
        ));
        assert!(eco.is_consistent());
        assert_eq!(eco.workload_for("a1"), 0);
    }

    #[test]
    fn dangling_workload_reference_is_inconsistent() {
        let mut eco = AgentEcosystem::new("e1", "Test");
        eco.workload_distribution
            .insert("ghost".to_string(), vec![Uuid::new_v4()]);
        assert!(!eco.is_consistent());
    }
}
