//! Generated solution model (§3.4, §4.3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of an emitted solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionType {
    ImmediateAction,
    Investigation,
    ProcessImprovement,
    TechnologySolution,
    Training,
    PolicyChange,
    Escalation,
}

/// Solution-level priority, ordinal 1-4. Distinct from
/// [`super::tension::TensionPriority`] — see that type's doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionPriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl SolutionPriority {
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    /// Map from an ordinal urgency level 1-4 to solution priority
    /// (`urgency_priority_mapping` in `solution_generator.py`).
    pub fn from_urgency_value(urgency: u8) -> Self {
        match urgency {
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ => Self::Critical,
        }
    }
}

/// One step of a [`GeneratedSolution`]'s execution plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_effort: String,
    pub required_skills: Vec<String>,
    /// Ids of prior steps within the same solution; forms a DAG.
    pub dependencies: Vec<String>,
}

/// A ranked, templated solution candidate produced by C3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSolution {
    pub id: String,
    pub title: String,
    pub description: String,
    pub solution_type: SolutionType,
    pub priority: SolutionPriority,
    pub estimated_impact: String,
    pub estimated_effort: String,
    pub success_criteria: Vec<String>,
    pub steps: Vec<SolutionStep>,
    pub required_resources: Vec<String>,
    pub risks: Vec<String>,
    pub alternatives: Vec<String>,
    /// `[0.0, 1.0]`.
    pub confidence_score: f64,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedSolution {
    /// Validates the §3.4 invariant: every step's dependencies resolve
    /// to a step id within this solution, and the dependency graph is
    /// acyclic.
    pub fn has_valid_step_dag(&self) -> bool {
        let ids: std::collections::HashSet<&str> =
            self.steps.iter().map(|s| s.id.as_str()).collect();
        for step in &self.steps {
            for dep in &step.dependencies {
                if !ids.contains(dep.as_str()) {
                    return false;
                }
            }
        }
        !Self::has_cycle(&self.steps)
    }

    fn has_cycle(steps: &[SolutionStep]) -> bool {
        use std::collections::HashMap;
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }
        let index: HashMap<&str, usize> = steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        let mut marks = vec![Mark::Unvisited; steps.len()];

        fn visit(
            i: usize,
            steps: &[SolutionStep],
            index: &HashMap<&str, usize>,
            marks: &mut [Mark],
        ) -> bool {
            match marks[i] {
                Mark::Done => return false,
                Mark::InProgress => return true,
                Mark::Unvisited => {}
            }
            marks[i] = Mark::InProgress;
            for dep in &steps[i].dependencies {
                if let Some(&j) = index.get(dep.as_str()) {
                    if visit(j, steps, index, marks) {
                        return true;
                    }
                }
            }
            marks[i] = Mark::Done;
            false
        }

        for i in 0..steps.len() {
            if visit(i, steps, &index, &mut marks) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, deps: &[&str]) -> SolutionStep {
        SolutionStep {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            estimated_effort: "1-2 hours".to_string(),
            required_skills: vec![],
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn solution_with(steps: Vec<SolutionStep>) -> GeneratedSolution {
        GeneratedSolution {
            id: "s1".to_string(),
            title: "t".to_string(),
            description: String::new(),
            solution_type: SolutionType::Investigation,
            priority: SolutionPriority::Medium,
            estimated_impact: "Medium".to_string(),
            estimated_effort: "1-2 weeks".to_string(),
            success_criteria: vec![],
            steps,
            required_resources: vec![],
            risks: vec![],
            alternatives: vec![],
            confidence_score: 0.7,
            reasoning: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn linear_chain_is_valid_dag() {
        let s = solution_with(vec![step("1", &[]), step("2", &["1"]), step("3", &["2"])]);
        assert!(s.has_valid_step_dag());
    }

    #[test]
    fn dangling_dependency_is_invalid() {
        let s = solution_with(vec![step("1", &["missing"])]);
        assert!(!s.has_valid_step_dag());
    }

    #[test]
    fn cycle_is_invalid() {
        let s = solution_with(vec![step("1", &["2"]), step("2", &["1"])]);
        assert!(!s.has_valid_step_dag());
    }
}
