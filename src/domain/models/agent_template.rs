//! Agent template metadata model (§3.7, §4.6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::agent_capability::AgentCapability;
use super::tension::TensionType;

/// Weights applied when scoring a template's WIN optimization potential.
/// Should sum to ~1.0; defaults mirror [`super::agent_capability::WinContribution::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinOptimizationWeights {
    pub wisdom: f64,
    pub intelligence: f64,
    pub networking: f64,
}

impl Default for WinOptimizationWeights {
    fn default() -> Self {
        Self {
            wisdom: 0.4,
            intelligence: 0.4,
            networking: 0.2,
        }
    }
}

/// Blueprint for instantiating agents: capabilities, domain expertise,
/// and bookkeeping metadata (§3.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTemplateMetadata {
    pub template_name: String,
    pub primary_domain: String,
    pub capabilities: Vec<AgentCapability>,
    pub domain_expertise: Vec<String>,
    pub supported_tension_types: HashSet<TensionType>,
    pub performance_metrics: HashMap<String, f64>,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub win_optimization_weights: WinOptimizationWeights,
    pub strategic_alignment: HashMap<String, String>,
    /// Domain keywords used by template matching (§4.7) to award the
    /// "+10 per domain keyword match" confidence bonus. Not part of
    /// spec.md's data model verbatim; grounded on
    /// `template_registry.py`'s per-template keyword lookup.
    pub domain_keywords: Vec<String>,
}

impl AgentTemplateMetadata {
    pub fn new(template_name: impl Into<String>, primary_domain: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            template_name: template_name.into(),
            primary_domain: primary_domain.into(),
            capabilities: Vec::new(),
            domain_expertise: Vec::new(),
            supported_tension_types: HashSet::new(),
            performance_metrics: HashMap::new(),
            version: "1.0.0".to_string(),
            created_at: now,
            updated_at: now,
            win_optimization_weights: WinOptimizationWeights::default(),
            strategic_alignment: HashMap::new(),
            domain_keywords: Vec::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<AgentCapability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_domain_expertise(mut self, expertise: Vec<String>) -> Self {
        self.domain_expertise = expertise;
        self
    }

    pub fn with_supported_tension_types(
        mut self,
        types: impl IntoIterator<Item = TensionType>,
    ) -> Self {
        self.supported_tension_types = types.into_iter().collect();
        self
    }

    pub fn with_domain_keywords(mut self, keywords: Vec<String>) -> Self {
        self.domain_keywords = keywords;
        self
    }

    pub fn get_capability_by_name(&self, name: &str) -> Option<&AgentCapability> {
        self.capabilities.iter().find(|c| c.name == name)
    }

    pub fn get_capabilities_for_tension_type(
        &self,
        tension_type: TensionType,
    ) -> Vec<&AgentCapability> {
        self.capabilities
            .iter()
            .filter(|c| c.related_tension_types.contains(&tension_type))
            .collect()
    }

    /// 1.0 on an exact primary-domain match; else the fraction of
    /// `domain_expertise` entries containing `domain` as a substring.
    pub fn calculate_domain_relevance(&self, domain: &str) -> f64 {
        if self.primary_domain.eq_ignore_ascii_case(domain) {
            return 1.0;
        }
        if self.domain_expertise.is_empty() {
            return 0.0;
        }
        let needle = domain.to_lowercase();
        let matches = self
            .domain_expertise
            .iter()
            .filter(|e| e.to_lowercase().contains(&needle))
            .count();
        matches as f64 / self.domain_expertise.len() as f64
    }

    pub fn get_average_proficiency(&self) -> f64 {
        if self.capabilities.is_empty() {
            return 0.0;
        }
        self.capabilities.iter().map(|c| c.proficiency_level).sum::<f64>()
            / self.capabilities.len() as f64
    }

    /// Mean capability task time scaled by complexity multiplier
    /// (0.7 low, 1.0 medium, 1.5 high), per §4.6.
    pub fn estimate_total_task_time(&self, complexity: &str) -> f64 {
        if self.capabilities.is_empty() {
            return 0.0;
        }
        let mean = self
            .capabilities
            .iter()
            .map(|c| f64::from(c.estimated_time_per_task))
            .sum::<f64>()
            / self.capabilities.len() as f64;
        let multiplier = match complexity {
            "low" => 0.7,
            "high" => 1.5,
            _ => 1.0,
        };
        mean * multiplier
    }

    /// Scaled 0-100 WIN potential: per-capability weighted {W,I,N}
    /// contribution times proficiency, averaged, then combined via
    /// `win_optimization_weights` (§4.6).
    pub fn get_win_potential(&self) -> f64 {
        if self.capabilities.is_empty() {
            return 0.0;
        }
        let n = self.capabilities.len() as f64;
        let (mut w, mut i, mut net) = (0.0, 0.0, 0.0);
        for cap in &self.capabilities {
            w += cap.win_contribution.wisdom * cap.proficiency_level;
            i += cap.win_contribution.intelligence * cap.proficiency_level;
            net += cap.win_contribution.networking * cap.proficiency_level;
        }
        w = (w / n) * 100.0;
        i = (i / n) * 100.0;
        net = (net / n) * 100.0;

        let weights = self.win_optimization_weights;
        w * weights.wisdom + i * weights.intelligence + net * weights.networking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::agent_capability::AgentCapability;

    fn sample_template() -> AgentTemplateMetadata {
        AgentTemplateMetadata::new("DataAnalyst", "data_analysis").with_capabilities(vec![
            AgentCapability::new("statistical_analysis", 0.9)
                .with_tension_types([TensionType::DataAnalysis]),
            AgentCapability::new("data_visualization", 0.7)
                .with_tension_types([TensionType::DataAnalysis]),
        ])
    }

    #[test]
    fn domain_relevance_exact_match_is_one() {
        let t = sample_template();
        assert_eq!(t.calculate_domain_relevance("data_analysis"), 1.0);
    }

    #[test]
    fn average_proficiency_is_mean() {
        let t = sample_template();
        assert!((t.get_average_proficiency() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn win_potential_is_bounded() {
        let t = sample_template();
        let p = t.get_win_potential();
        assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn capability_lookup_by_name() {
        let t = sample_template();
        assert!(t.get_capability_by_name("statistical_analysis").is_some());
        assert!(t.get_capability_by_name("nonexistent").is_none());
    }
}
