//! Capability evolution (C10): detects gaps in an agent's current
//! capability set against observed performance and tension-handling
//! history, selects an evolution strategy per gap, and applies it.
//!
//! Grounded on `original_source/trm_api/agents/capability_evolver.py`'s
//! `identify_capability_gaps`/`evolve_agent_capabilities`/
//! `validate_capability_improvements`.

use crate::domain::models::agent::Agent;
use crate::domain::models::agent_capability::AgentCapability;

/// Category of a detected capability gap (§4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapKind {
    Efficiency,
    Quality,
    CapabilityPerformance,
    MissingCapability,
    DomainExpertise,
    PerformanceDecline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One detected capability gap, with its computed impact score.
#[derive(Debug, Clone)]
pub struct CapabilityGap {
    pub kind: GapKind,
    /// Name of the affected capability or domain, when applicable.
    pub subject: Option<String>,
    pub impact_score: f64,
    pub severity: Severity,
}

/// An evolution applied (or proposed) to close a gap (§4.10 strategies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionStrategy {
    /// +10 proficiency (cap 95), -10% task time (floor 30 min).
    Enhancement,
    /// New capability at proficiency 75, task time 90 min.
    Addition,
    /// -15% task time (floor 30 min).
    Optimization,
    /// +15 proficiency (cap 90), tags a domain-specific tool marker.
    Specialization,
}

impl EvolutionStrategy {
    /// Strategy-selection mapping from §4.10.
    pub fn for_gap(kind: GapKind) -> Self {
        match kind {
            GapKind::Efficiency => Self::Optimization,
            GapKind::Quality => Self::Enhancement,
            GapKind::CapabilityPerformance => Self::Enhancement,
            GapKind::MissingCapability => Self::Addition,
            GapKind::DomainExpertise => Self::Specialization,
            GapKind::PerformanceDecline => Self::Optimization,
        }
    }
}

/// Record of one applied evolution, for reporting.
#[derive(Debug, Clone)]
pub struct AppliedEvolution {
    pub gap: CapabilityGap,
    pub strategy: EvolutionStrategy,
    pub capability_name: String,
}

const PROFICIENCY_CAP_ENHANCEMENT: f64 = 0.95;
const PROFICIENCY_CAP_SPECIALIZATION: f64 = 0.90;
const MIN_TASK_MINUTES: u32 = 30;
const ADDITION_PROFICIENCY: f64 = 0.75;
const ADDITION_TASK_MINUTES: u32 = 90;

#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityEvolver;

impl CapabilityEvolver {
    pub fn new() -> Self {
        Self
    }

    /// Identifies capability gaps per the §4.10 thresholds:
    /// - agent efficiency < 60 -> `impact = 80 - efficiency`, high severity if < 40
    /// - agent quality < 70 -> `impact = 90 - quality`, high severity if < 50
    /// - each capability with proficiency < 0.6 (i.e. < 60 on a 0-100
    ///   scale) -> `impact = 80 - value`
    /// - each name in `requested_but_missing` -> one gap per name
    /// - each domain in `domain_scores` scoring < 60 -> one gap per domain
    /// - if `current_efficiency` is more than 10 below `historical_average_efficiency`
    ///   -> a performance-decline gap
    pub fn identify_capability_gaps(
        &self,
        agent: &Agent,
        efficiency: f64,
        quality: f64,
        requested_but_missing: &[String],
        domain_scores: &[(String, f64)],
        historical_average_efficiency: f64,
    ) -> Vec<CapabilityGap> {
        let mut gaps = Vec::new();

        if efficiency < 60.0 {
            let impact_score = 80.0 - efficiency;
            gaps.push(CapabilityGap {
                kind: GapKind::Efficiency,
                subject: None,
                impact_score,
                severity: if efficiency < 40.0 { Severity::High } else { Severity::Medium },
            });
        }

        if quality < 70.0 {
            let impact_score = 90.0 - quality;
            gaps.push(CapabilityGap {
                kind: GapKind::Quality,
                subject: None,
                impact_score,
                severity: if quality < 50.0 { Severity::High } else { Severity::Medium },
            });
        }

        for capability in &agent.capabilities {
            let value = capability.proficiency_level * 100.0;
            if value < 60.0 {
                gaps.push(CapabilityGap {
                    kind: GapKind::CapabilityPerformance,
                    subject: Some(capability.name.clone()),
                    impact_score: 80.0 - value,
                    severity: if value < 40.0 { Severity::High } else { Severity::Low },
                });
            }
        }

        for name in requested_but_missing {
            gaps.push(CapabilityGap {
                kind: GapKind::MissingCapability,
                subject: Some(name.clone()),
                impact_score: 70.0,
                severity: Severity::Medium,
            });
        }

        for (domain, score) in domain_scores {
            if *score < 60.0 {
                gaps.push(CapabilityGap {
                    kind: GapKind::DomainExpertise,
                    subject: Some(domain.clone()),
                    impact_score: 80.0 - score,
                    severity: if *score < 40.0 { Severity::High } else { Severity::Low },
                });
            }
        }

        if historical_average_efficiency - efficiency > 10.0 {
            gaps.push(CapabilityGap {
                kind: GapKind::PerformanceDecline,
                subject: None,
                impact_score: historical_average_efficiency - efficiency,
                severity: Severity::Medium,
            });
        }

        gaps
    }

    /// Applies the strategy-for-gap mapping to every detected gap,
    /// mutating the agent's capability set in place. Returns one
    /// [`AppliedEvolution`] per gap.
    pub fn evolve_agent_capabilities(
        &self,
        agent: &mut Agent,
        gaps: &[CapabilityGap],
    ) -> Vec<AppliedEvolution> {
        gaps.iter()
            .map(|gap| {
                let strategy = EvolutionStrategy::for_gap(gap.kind);
                let capability_name = self.apply_strategy(agent, gap, strategy);
                AppliedEvolution {
                    gap: gap.clone(),
                    strategy,
                    capability_name,
                }
            })
            .collect()
    }

    fn apply_strategy(
        &self,
        agent: &mut Agent,
        gap: &CapabilityGap,
        strategy: EvolutionStrategy,
    ) -> String {
        match strategy {
            EvolutionStrategy::Enhancement => {
                let name = gap.subject.clone().unwrap_or_else(|| "general".to_string());
                if let Some(capability) = find_capability_mut(agent, &name) {
                    capability.proficiency_level =
                        (capability.proficiency_level + 0.10).min(PROFICIENCY_CAP_ENHANCEMENT);
                    let reduced = (f64::from(capability.estimated_time_per_task) * 0.90) as u32;
                    capability.estimated_time_per_task = reduced.max(MIN_TASK_MINUTES);
                } else {
                    let new_capability = AgentCapability::new(name.clone(), PROFICIENCY_CAP_ENHANCEMENT)
                        .with_time(MIN_TASK_MINUTES);
                    push_capability(agent, new_capability);
                }
                name
            }
            EvolutionStrategy::Addition => {
                let name = gap
                    .subject
                    .clone()
                    .unwrap_or_else(|| "synthesized_capability".to_string());
                let new_capability = AgentCapability::new(name.clone(), ADDITION_PROFICIENCY)
                    .with_time(ADDITION_TASK_MINUTES);
                push_capability(agent, new_capability);
                name
            }
            EvolutionStrategy::Optimization => {
                let name = gap.subject.clone();
                match name {
                    Some(name) => {
                        if let Some(capability) = find_capability_mut(agent, &name) {
                            let reduced = (f64::from(capability.estimated_time_per_task) * 0.85) as u32;
                            capability.estimated_time_per_task = reduced.max(MIN_TASK_MINUTES);
                        }
                        name
                    }
                    None => {
                        for capability in &mut agent.capabilities {
                            let reduced = (f64::from(capability.estimated_time_per_task) * 0.85) as u32;
                            capability.estimated_time_per_task = reduced.max(MIN_TASK_MINUTES);
                        }
                        agent.metadata.capabilities = agent.capabilities.clone();
                        "all_capabilities".to_string()
                    }
                }
            }
            EvolutionStrategy::Specialization => {
                let domain = gap.subject.clone().unwrap_or_else(|| "general".to_string());
                let capability_name = format!("{domain}_specialization");
                if let Some(capability) = find_capability_mut(agent, &capability_name) {
                    capability.proficiency_level =
                        (capability.proficiency_level + 0.15).min(PROFICIENCY_CAP_SPECIALIZATION);
                } else {
                    let new_capability =
                        AgentCapability::new(capability_name.clone(), PROFICIENCY_CAP_SPECIALIZATION)
                            .with_description(format!("Specialized tooling for {domain}"));
                    push_capability(agent, new_capability);
                }
                if !agent.metadata.domain_expertise.contains(&domain) {
                    agent.metadata.domain_expertise.push(domain);
                }
                capability_name
            }
        }
    }

    /// Scores an evolution outcome 0-100: base 50, +20 if the
    /// capability count increased, +20 if mean proficiency increased,
    /// +10 if tension-handling (supported tension type count) improved.
    pub fn validate_capability_improvements(&self, before: &Agent, after: &Agent) -> f64 {
        let mut score = 50.0;

        if after.capabilities.len() > before.capabilities.len() {
            score += 20.0;
        }

        let mean = |caps: &[AgentCapability]| -> f64 {
            if caps.is_empty() {
                0.0
            } else {
                caps.iter().map(|c| c.proficiency_level).sum::<f64>() / caps.len() as f64
            }
        };
        if mean(&after.capabilities) > mean(&before.capabilities) {
            score += 20.0;
        }

        if after.metadata.supported_tension_types.len() > before.metadata.supported_tension_types.len() {
            score += 10.0;
        }

        score.min(100.0)
    }
}

fn find_capability_mut<'a>(agent: &'a mut Agent, name: &str) -> Option<&'a mut AgentCapability> {
    agent.capabilities.iter_mut().find(|c| c.name == name)
}

fn push_capability(agent: &mut Agent, capability: AgentCapability) {
    agent.capabilities.push(capability.clone());
    agent.metadata.capabilities.push(capability);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::agent_template::AgentTemplateMetadata;

    fn sample_agent() -> Agent {
        let metadata = AgentTemplateMetadata::new("Worker", "ops").with_capabilities(vec![
            AgentCapability::new("incident_response", 0.5).with_time(90),
        ]);
        Agent::from_template("agent-1", metadata)
    }

    #[test]
    fn low_efficiency_and_quality_are_detected() {
        let agent = sample_agent();
        let gaps = CapabilityEvolver::new().identify_capability_gaps(&agent, 30.0, 40.0, &[], &[], 30.0);
        assert!(gaps.iter().any(|g| g.kind == GapKind::Efficiency && g.severity == Severity::High));
        assert!(gaps.iter().any(|g| g.kind == GapKind::Quality && g.severity == Severity::High));
    }

    #[test]
    fn weak_capability_is_flagged() {
        let agent = sample_agent();
        let gaps = CapabilityEvolver::new().identify_capability_gaps(&agent, 90.0, 90.0, &[], &[], 90.0);
        assert!(gaps
            .iter()
            .any(|g| g.kind == GapKind::CapabilityPerformance && g.subject.as_deref() == Some("incident_response")));
    }

    #[test]
    fn performance_decline_detected_on_drop_over_ten() {
        let agent = sample_agent();
        let gaps = CapabilityEvolver::new().identify_capability_gaps(&agent, 60.0, 90.0, &[], &[], 75.0);
        assert!(gaps.iter().any(|g| g.kind == GapKind::PerformanceDecline));
    }

    #[test]
    fn enhancement_raises_proficiency_and_shortens_time() {
        let mut agent = sample_agent();
        let gap = CapabilityGap {
            kind: GapKind::CapabilityPerformance,
            subject: Some("incident_response".to_string()),
            impact_score: 30.0,
            severity: Severity::Low,
        };
        CapabilityEvolver::new().evolve_agent_capabilities(&mut agent, &[gap]);
        let capability = agent.capabilities.iter().find(|c| c.name == "incident_response").unwrap();
        assert!((capability.proficiency_level - 0.6).abs() < 1e-9);
        assert_eq!(capability.estimated_time_per_task, 81);
    }

    #[test]
    fn addition_creates_a_new_capability() {
        let mut agent = sample_agent();
        let gap = CapabilityGap {
            kind: GapKind::MissingCapability,
            subject: Some("root_cause_analysis".to_string()),
            impact_score: 70.0,
            severity: Severity::Medium,
        };
        CapabilityEvolver::new().evolve_agent_capabilities(&mut agent, &[gap]);
        assert!(agent.capabilities.iter().any(|c| c.name == "root_cause_analysis"));
    }

    #[test]
    fn validate_improvements_awards_points_for_growth() {
        let before = sample_agent();
        let mut after = sample_agent();
        after.capabilities.push(AgentCapability::new("new_skill", 0.9));
        let score = CapabilityEvolver::new().validate_capability_improvements(&before, &after);
        assert!(score >= 70.0);
    }
}
