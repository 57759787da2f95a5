//! Agent capability model (§3.6, §4.6).
//!
//! A capability is a named skill an agent (or template) carries, scored
//! by proficiency and tied to the tension types it is most useful
//! against.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::tension::TensionType;

/// Weighted contribution of a capability to the tri-axis WIN score.
/// The three weights should sum to approximately 1.0; this is advisory
/// (per spec §3.6), not enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinContribution {
    pub wisdom: f64,
    pub intelligence: f64,
    pub networking: f64,
}

impl Default for WinContribution {
    fn default() -> Self {
        Self {
            wisdom: 0.4,
            intelligence: 0.4,
            networking: 0.2,
        }
    }
}

/// A single named skill an agent or template carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCapability {
    pub name: String,
    pub description: String,
    /// `[0.0, 1.0]`.
    pub proficiency_level: f64,
    /// Positive, in minutes.
    pub estimated_time_per_task: u32,
    pub prerequisites: Vec<String>,
    pub related_tension_types: HashSet<TensionType>,
    pub win_contribution: WinContribution,
}

impl AgentCapability {
    pub fn new(name: impl Into<String>, proficiency_level: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            proficiency_level: proficiency_level.clamp(0.0, 1.0),
            estimated_time_per_task: 60,
            prerequisites: Vec::new(),
            related_tension_types: HashSet::new(),
            win_contribution: WinContribution::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_time(mut self, minutes: u32) -> Self {
        self.estimated_time_per_task = minutes.max(1);
        self
    }

    pub fn with_tension_types(mut self, types: impl IntoIterator<Item = TensionType>) -> Self {
        self.related_tension_types = types.into_iter().collect();
        self
    }

    /// Text searched by keyword-fallback domain-relevance matching:
    /// name and description concatenated and lowercased.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proficiency_clamps_to_unit_interval() {
        let cap = AgentCapability::new("x", 1.5);
        assert_eq!(cap.proficiency_level, 1.0);
        let cap = AgentCapability::new("y", -0.5);
        assert_eq!(cap.proficiency_level, 0.0);
    }

    #[test]
    fn win_contribution_defaults_to_point_four_four_two() {
        let c = WinContribution::default();
        assert!((c.wisdom + c.intelligence + c.networking - 1.0).abs() < 1e-9);
    }
}
