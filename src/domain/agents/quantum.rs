//! Quantum Operating Model (C8): the six-phase Sense -> Perceive ->
//! Orient -> Decide -> Act -> Feedback cycle every agent runs per
//! tension, and the WIN (Wisdom / Intelligence / Networking) scoring
//! formula that drives its Decide phase.
//!
//! Grounded on `original_source/trm_api/agents/base_agent.py`'s
//! `process_tension` pipeline and `agents/templates/base_template.py`'s
//! domain-relevance scaling.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::models::agent_capability::AgentCapability;
use crate::domain::models::tension::TensionType;
use crate::domain::models::{Agent, Tension, TensionAnalysis};

use super::base::AgentBehavior;

/// Coarse effort bucket a tension falls into, shared with
/// [`crate::domain::models::agent_template::AgentTemplateMetadata::estimate_total_task_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl ComplexityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Derived from combined title+description length, matching the
    /// coarse length-banding style used throughout the reasoning layer
    /// (`priority_calculator::estimate_complexity`).
    pub fn from_text_length(len: usize) -> Self {
        if len > 400 {
            Self::High
        } else if len > 150 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Sense phase output: the raw tension wrapped with a timestamp and any
/// other potential tensions detected alongside it (§4.8 step 1).
#[derive(Debug, Clone)]
pub struct SensedData {
    pub tension_id: Uuid,
    pub observed_at: DateTime<Utc>,
    pub potential_tension_ids: Vec<Uuid>,
}

/// Perceive phase output: how one sensed tension aligns to the agent's
/// ontology (its capabilities and domain expertise) (§4.8 step 2).
#[derive(Debug, Clone)]
pub struct OntologyAlignment {
    pub tension_type: TensionType,
    pub domain_relevance: f64,
    pub complexity_level: ComplexityLevel,
}

/// Orient phase output: one candidate action with its predicted WIN
/// impact (§4.8 step 3).
#[derive(Debug, Clone)]
pub struct PotentialAction {
    pub id: String,
    pub description: String,
    pub predicted_win: WinScore,
    pub confidence: f64,
}

/// Decide phase output (§4.8 step 4).
#[derive(Debug, Clone)]
pub struct Decision {
    pub selected_action_id: String,
    pub reasoning: String,
    pub expected_win_score: f64,
    pub confidence: f64,
}

/// Whether an Act phase completed or failed (§4.8 step 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Completed,
    Failed,
}

/// Act phase output (§4.8 step 5).
#[derive(Debug, Clone)]
pub struct ActOutcome {
    pub status: ExecutionStatus,
    pub actual_results: HashMap<String, f64>,
    pub events_generated: Vec<String>,
}

/// The tri-axis WIN score (§4.8 WIN scoring formula). All components
/// and the total are bounded to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinScore {
    pub wisdom: f64,
    pub intelligence: f64,
    pub networking: f64,
    pub total: f64,
}

impl WinScore {
    /// Computes W/I/N and the weighted total from six underlying
    /// metrics, each expected in `[0, 100]`:
    /// `W = 0.6*context_understanding + 0.4*root_cause_analysis`,
    /// `I = 0.7*solution_quality + 0.3*efficiency`,
    /// `N = 0.5*collaboration + 0.5*knowledge_sharing`,
    /// `total = 0.4*W + 0.4*I + 0.2*N`.
    pub fn from_inputs(
        context_understanding: f64,
        root_cause_analysis: f64,
        solution_quality: f64,
        efficiency: f64,
        collaboration: f64,
        knowledge_sharing: f64,
    ) -> Self {
        let wisdom = (0.6 * context_understanding + 0.4 * root_cause_analysis).clamp(0.0, 100.0);
        let intelligence = (0.7 * solution_quality + 0.3 * efficiency).clamp(0.0, 100.0);
        let networking = (0.5 * collaboration + 0.5 * knowledge_sharing).clamp(0.0, 100.0);
        let total = (0.4 * wisdom + 0.4 * intelligence + 0.2 * networking).clamp(0.0, 100.0);
        Self {
            wisdom,
            intelligence,
            networking,
            total,
        }
    }

    pub fn zero() -> Self {
        Self {
            wisdom: 0.0,
            intelligence: 0.0,
            networking: 0.0,
            total: 0.0,
        }
    }
}

/// Feedback phase output (§4.8 step 6).
#[derive(Debug, Clone)]
pub struct FeedbackResult {
    pub actual_win: WinScore,
    pub learning_insights: Vec<String>,
    pub suggested_adjustments: Vec<String>,
}

/// Everything produced by running one full quantum cycle over one
/// tension.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub sensed: SensedData,
    pub alignment: OntologyAlignment,
    pub actions: Vec<PotentialAction>,
    pub decision: Decision,
    pub act_outcome: ActOutcome,
    pub feedback: FeedbackResult,
}

/// Fallback keyword set per tension type, used only when an agent has
/// no capability explicitly naming the tension type in its
/// `related_tension_types`. Tension types outside this table (e.g.
/// `Problem`, `Opportunity`) have no fallback and leave relevance at
/// its 0.3 base.
fn fallback_keywords(tension_type: TensionType) -> &'static [&'static str] {
    match tension_type {
        TensionType::DataAnalysis => {
            &["data", "analysis", "analytics", "statistical", "intelligence", "visualization"]
        }
        TensionType::TechnicalDebt => &[
            "development",
            "code",
            "technical",
            "system",
            "architecture",
            "api",
            "database",
            "frontend",
            "optimization",
            "security",
            "testing",
        ],
        TensionType::ProcessImprovement => {
            &["process", "workflow", "optimization", "efficiency", "improvement"]
        }
        TensionType::CommunicationBreakdown => {
            &["communication", "interface", "user", "ui", "ux", "collaboration"]
        }
        TensionType::ResourceConstraint => {
            &["resource", "management", "allocation", "planning", "optimization"]
        }
        _ => &[],
    }
}

/// Computes domain relevance for a capability set against a tension
/// type and description (§4.8 Domain relevance computation), reproduced
/// verbatim from the ontology-first `_assess_domain_relevance`: a 0.3
/// base; explicit `related_tension_types` matches scale 0.7-1.0 by mean
/// proficiency; failing that, a fallback keyword table per tension type
/// scales 0.5-0.9 by match ratio and proficiency; finally, while
/// relevance is still below 0.8, shared words between `domain_expertise`
/// and `description` can boost it by up to 0.2, capped at 0.9 there and
/// at 1.0 overall.
pub fn calculate_domain_relevance(
    capabilities: &[AgentCapability],
    domain_expertise: &[String],
    tension_type: TensionType,
    description: &str,
) -> f64 {
    let mut relevance = 0.3;

    let tension_specific: Vec<&AgentCapability> = capabilities
        .iter()
        .filter(|c| c.related_tension_types.contains(&tension_type))
        .collect();

    if !tension_specific.is_empty() {
        let avg_proficiency = tension_specific.iter().map(|c| c.proficiency_level).sum::<f64>()
            / tension_specific.len() as f64;
        relevance = 0.7 + avg_proficiency * 0.3;
    } else if !capabilities.is_empty() {
        let keywords = fallback_keywords(tension_type);
        if !keywords.is_empty() {
            let matching: Vec<&AgentCapability> = capabilities
                .iter()
                .filter(|c| {
                    let cap_text = c.search_text();
                    keywords.iter().any(|k| cap_text.contains(k))
                })
                .collect();
            if !matching.is_empty() {
                let match_ratio = matching.len() as f64 / capabilities.len() as f64;
                let avg_proficiency =
                    matching.iter().map(|c| c.proficiency_level).sum::<f64>() / matching.len() as f64;
                relevance = 0.5 + match_ratio * 0.2 + avg_proficiency * 0.2;
            }
        }
    }

    if !domain_expertise.is_empty() && relevance < 0.8 {
        let domain_text = domain_expertise.join(" ").to_lowercase();
        let tension_desc = description.to_lowercase();
        let domain_words: std::collections::HashSet<&str> = domain_text.split_whitespace().collect();
        let tension_words: std::collections::HashSet<&str> = tension_desc.split_whitespace().collect();
        let common = domain_words.intersection(&tension_words).count();
        if common > 0 {
            let domain_boost = (common as f64 * 0.05).min(0.2);
            relevance = (relevance + domain_boost).min(0.9);
        }
    }

    relevance.min(1.0)
}

/// Threshold from §4.8: an agent can handle a tension when its domain
/// relevance is at least 0.6.
pub fn can_handle_tension(
    capabilities: &[AgentCapability],
    domain_expertise: &[String],
    tension_type: TensionType,
    description: &str,
) -> bool {
    calculate_domain_relevance(capabilities, domain_expertise, tension_type, description) >= 0.6
}

/// Orchestrates one full Sense -> Perceive -> Orient -> Decide -> Act ->
/// Feedback cycle over a single tension, using an agent's
/// [`AgentBehavior`] implementation for the Sense/Act/Feedback steps
/// and its generated solutions as the Orient phase's candidate actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantumCycle;

impl QuantumCycle {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, agent: &Agent, tension: &Tension, analysis: &TensionAnalysis) -> CycleOutcome {
        let sensed = agent.analyze_recognition_phase(tension);

        let domain_relevance = calculate_domain_relevance(
            &agent.capabilities,
            &agent.metadata.domain_expertise,
            tension.tension_type,
            &tension.combined_text(),
        );
        let alignment = OntologyAlignment {
            tension_type: tension.tension_type,
            domain_relevance,
            complexity_level: ComplexityLevel::from_text_length(tension.combined_text().len()),
        };

        let solutions =
            agent.generate_specialized_solutions(analysis, &tension.title, &tension.description);
        let actions: Vec<PotentialAction> = solutions
            .iter()
            .map(|solution| {
                let predicted_win = WinScore::from_inputs(
                    domain_relevance * 100.0,
                    analysis.confidence_score * 100.0,
                    solution.confidence_score * 100.0,
                    solution.priority.value() as f64 * 25.0,
                    domain_relevance * 100.0,
                    analysis.confidence_score * 100.0,
                );
                PotentialAction {
                    id: solution.id.clone(),
                    description: solution.title.clone(),
                    predicted_win,
                    confidence: solution.confidence_score,
                }
            })
            .collect();

        let decision = actions
            .iter()
            .max_by(|a, b| a.predicted_win.total.total_cmp(&b.predicted_win.total))
            .map(|best| Decision {
                selected_action_id: best.id.clone(),
                reasoning: format!(
                    "selected '{}' for predicted WIN total {:.1}",
                    best.description, best.predicted_win.total
                ),
                expected_win_score: best.predicted_win.total,
                confidence: best.confidence,
            })
            .unwrap_or_else(|| Decision {
                selected_action_id: "none".to_string(),
                reasoning: "no candidate actions were generated".to_string(),
                expected_win_score: 0.0,
                confidence: 0.0,
            });

        let act_outcome = agent.coordinate_event_execution(&decision);
        let actual_win = agent.validate_win_achievement(&act_outcome);

        let mut learning_insights = Vec::new();
        if actual_win.total < decision.expected_win_score {
            learning_insights.push("actual WIN fell short of the predicted score".to_string());
        }
        let mut suggested_adjustments = Vec::new();
        if alignment.domain_relevance < 0.75 {
            suggested_adjustments.push("consider expanding domain expertise keywords".to_string());
        }

        CycleOutcome {
            sensed,
            alignment,
            actions,
            decision,
            act_outcome,
            feedback: FeedbackResult {
                actual_win,
                learning_insights,
                suggested_adjustments,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::agent_template::AgentTemplateMetadata;
    use crate::domain::reasoning::tension_analyzer::TensionAnalyzer;

    #[test]
    fn win_total_is_always_bounded() {
        for inputs in [
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            (100.0, 100.0, 100.0, 100.0, 100.0, 100.0),
            (50.0, 20.0, 90.0, 10.0, 60.0, 40.0),
        ] {
            let win = WinScore::from_inputs(
                inputs.0, inputs.1, inputs.2, inputs.3, inputs.4, inputs.5,
            );
            assert!((0.0..=100.0).contains(&win.total));
        }
    }

    #[test]
    fn explicit_tension_type_match_scales_by_proficiency() {
        let caps = vec![AgentCapability::new("x", 1.0).with_tension_types([TensionType::Problem])];
        let relevance = calculate_domain_relevance(&caps, &[], TensionType::Problem, "anything");
        assert!(relevance >= 0.99);
    }

    #[test]
    fn no_capabilities_means_cannot_handle() {
        assert!(!can_handle_tension(&[], &[], TensionType::Problem, "anything"));
    }

    #[test]
    fn domain_expertise_overlap_boosts_relevance() {
        let caps = vec![AgentCapability::new("analysis", 0.9).with_tension_types([TensionType::DataAnalysis])];
        let without_boost =
            calculate_domain_relevance(&caps, &[], TensionType::DataAnalysis, "quarterly sales data");
        let with_boost = calculate_domain_relevance(
            &caps,
            &["sales".to_string()],
            TensionType::DataAnalysis,
            "quarterly sales data",
        );
        assert!(with_boost >= without_boost);
    }

    #[test]
    fn a_full_cycle_produces_a_decision_and_a_win_score() {
        let metadata = AgentTemplateMetadata::new("DataAnalyst", "data_analysis").with_capabilities(vec![
            AgentCapability::new("statistical_analysis", 0.9)
                .with_tension_types([TensionType::DataAnalysis]),
        ]);
        let agent = Agent::from_template("agent-1", metadata);
        let mut tension = Tension::new("Quarterly report", "Need statistical analysis of sales trends");
        tension.tension_type = TensionType::DataAnalysis;
        let analysis = TensionAnalyzer::new().analyze(&tension.title, &tension.description);

        let outcome = QuantumCycle::new().run(&agent, &tension, &analysis);
        assert!(!outcome.decision.selected_action_id.is_empty());
        assert!((0.0..=100.0).contains(&outcome.feedback.actual_win.total));
    }
}
