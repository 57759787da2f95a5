//! `AgentBehavior` (C8): the eight polymorphic operations every agent
//! exposes to the rest of the system, implemented here against the
//! stateful [`Agent`] model.
//!
//! Grounded on `original_source/trm_api/agents/base_agent.py`'s
//! `BaseAgent` abstract methods (`can_handle_tension`,
//! `analyze_tension_requirements`, `generate_specialized_solutions`,
//! `execute_solution`) and `quantum_agent.py`'s phase methods
//! (`sense`, `perceive`, `orient`/`decide`, `act`, `feedback`).

use chrono::Utc;

use crate::domain::models::{Agent, GeneratedSolution, Tension, TensionAnalysis};
use crate::domain::reasoning::solution_generator::SolutionGenerator;

use super::quantum::{
    self, ActOutcome, ComplexityLevel, Decision, ExecutionStatus, PotentialAction, SensedData,
    WinScore,
};

/// Effort/complexity estimate for a tension against one agent's
/// capability set (§4.7 step 2, shared by template matching and the
/// quantum cycle's Perceive phase).
#[derive(Debug, Clone, Copy)]
pub struct TensionRequirements {
    pub complexity: ComplexityLevel,
    pub estimated_effort_minutes: f64,
    pub domain_keyword_matches: usize,
}

/// What came of actually running a [`GeneratedSolution`].
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub solution_id: String,
    pub status: ExecutionStatus,
    pub steps_completed: usize,
    pub steps_total: usize,
}

/// The eight operations an agent exposes (§4.8). Implemented here for
/// [`Agent`] directly: behavior is a pure function of an agent's
/// capabilities and domain expertise, so no separate wrapper type is
/// needed.
pub trait AgentBehavior {
    fn can_handle_tension(&self, tension: &Tension) -> bool;
    fn analyze_tension_requirements(&self, title: &str, description: &str) -> TensionRequirements;
    fn generate_specialized_solutions(
        &self,
        analysis: &TensionAnalysis,
        title: &str,
        description: &str,
    ) -> Vec<GeneratedSolution>;
    fn execute_solution(&self, solution: &GeneratedSolution) -> ExecutionOutcome;
    fn analyze_recognition_phase(&self, tension: &Tension) -> SensedData;
    fn coordinate_event_execution(&self, decision: &Decision) -> ActOutcome;
    fn execute_strategic_action(&self, action: &PotentialAction) -> ActOutcome;
    fn validate_win_achievement(&self, outcome: &ActOutcome) -> WinScore;
}

impl AgentBehavior for Agent {
    fn can_handle_tension(&self, tension: &Tension) -> bool {
        quantum::can_handle_tension(
            &self.capabilities,
            &self.metadata.domain_expertise,
            tension.tension_type,
            &tension.combined_text(),
        )
    }

    fn analyze_tension_requirements(&self, title: &str, description: &str) -> TensionRequirements {
        let text = format!("{title} {description}");
        let complexity = ComplexityLevel::from_text_length(text.len());
        let text_lower = text.to_lowercase();
        let domain_keyword_matches = self
            .metadata
            .domain_keywords
            .iter()
            .filter(|kw| text_lower.contains(&kw.to_lowercase()))
            .count();
        let estimated_effort_minutes = self.metadata.estimate_total_task_time(complexity.as_str());
        TensionRequirements {
            complexity,
            estimated_effort_minutes,
            domain_keyword_matches,
        }
    }

    fn generate_specialized_solutions(
        &self,
        analysis: &TensionAnalysis,
        title: &str,
        description: &str,
    ) -> Vec<GeneratedSolution> {
        SolutionGenerator::new().generate_solutions(analysis, title, description)
    }

    fn execute_solution(&self, solution: &GeneratedSolution) -> ExecutionOutcome {
        let steps_total = solution.steps.len();
        ExecutionOutcome {
            solution_id: solution.id.clone(),
            status: if steps_total > 0 {
                ExecutionStatus::Completed
            } else {
                ExecutionStatus::Failed
            },
            steps_completed: steps_total,
            steps_total,
        }
    }

    fn analyze_recognition_phase(&self, tension: &Tension) -> SensedData {
        let potential_tension_ids = self
            .active_tensions
            .keys()
            .filter(|id| **id != tension.id)
            .copied()
            .collect();
        SensedData {
            tension_id: tension.id,
            observed_at: Utc::now(),
            potential_tension_ids,
        }
    }

    fn coordinate_event_execution(&self, decision: &Decision) -> ActOutcome {
        let mut actual_results = std::collections::HashMap::new();
        actual_results.insert("confidence".to_string(), decision.confidence * 100.0);
        actual_results.insert("expected_win_score".to_string(), decision.expected_win_score);
        ActOutcome {
            status: ExecutionStatus::Completed,
            actual_results,
            events_generated: vec![format!("action_executed:{}", decision.selected_action_id)],
        }
    }

    fn execute_strategic_action(&self, action: &PotentialAction) -> ActOutcome {
        let mut actual_results = std::collections::HashMap::new();
        actual_results.insert("predicted_total".to_string(), action.predicted_win.total);
        actual_results.insert("confidence".to_string(), action.confidence * 100.0);
        ActOutcome {
            status: ExecutionStatus::Completed,
            actual_results,
            events_generated: vec![format!("strategic_action_executed:{}", action.id)],
        }
    }

    fn validate_win_achievement(&self, outcome: &ActOutcome) -> WinScore {
        if outcome.status == ExecutionStatus::Failed {
            return WinScore::zero();
        }
        let confidence = outcome.actual_results.get("confidence").copied().unwrap_or(50.0);
        let predicted_total = outcome
            .actual_results
            .get("predicted_total")
            .or_else(|| outcome.actual_results.get("expected_win_score"))
            .copied()
            .unwrap_or(confidence);
        let efficiency = self
            .performance_stats
            .average_win_score
            .max(50.0)
            .min(100.0);
        WinScore::from_inputs(
            confidence,
            predicted_total,
            predicted_total,
            efficiency,
            confidence,
            confidence,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::agent_capability::AgentCapability;
    use crate::domain::models::agent_template::AgentTemplateMetadata;
    use crate::domain::models::tension::TensionType;
    use crate::domain::reasoning::tension_analyzer::TensionAnalyzer;

    fn sample_agent() -> Agent {
        let metadata = AgentTemplateMetadata::new("DataAnalyst", "data_analysis").with_capabilities(vec![
            AgentCapability::new("statistical_analysis", 0.9)
                .with_tension_types([TensionType::DataAnalysis]),
        ]);
        Agent::from_template("agent-1", metadata)
    }

    #[test]
    fn matching_tension_type_is_handleable() {
        let agent = sample_agent();
        let mut tension = Tension::new("Quarterly report", "Need statistical analysis of sales data");
        tension.tension_type = TensionType::DataAnalysis;
        assert!(agent.can_handle_tension(&tension));
    }

    #[test]
    fn unrelated_tension_type_is_not_handleable() {
        let agent = sample_agent();
        let mut tension = Tension::new("Server down", "The API is returning 500s");
        tension.tension_type = TensionType::Problem;
        assert!(!agent.can_handle_tension(&tension));
    }

    #[test]
    fn requirements_scale_with_text_length() {
        let agent = sample_agent();
        let short = agent.analyze_tension_requirements("x", "y");
        let long_desc = "a".repeat(500);
        let long = agent.analyze_tension_requirements("x", &long_desc);
        assert_eq!(short.complexity, ComplexityLevel::Low);
        assert_eq!(long.complexity, ComplexityLevel::High);
    }

    #[test]
    fn specialized_solutions_are_nonempty_for_a_real_analysis() {
        let agent = sample_agent();
        let analysis = TensionAnalyzer::new().analyze("Crash in prod", "The service keeps crashing");
        let solutions = agent.generate_specialized_solutions(&analysis, "Crash in prod", "The service keeps crashing");
        assert!(!solutions.is_empty());
    }

    #[test]
    fn validate_win_achievement_returns_zero_on_failure() {
        let agent = sample_agent();
        let outcome = ActOutcome {
            status: ExecutionStatus::Failed,
            actual_results: Default::default(),
            events_generated: vec![],
        };
        let win = agent.validate_win_achievement(&outcome);
        assert_eq!(win.total, 0.0);
    }
}
