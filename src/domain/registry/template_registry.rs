//! Template registry (C7): the catalog of named agent templates, the
//! tension-to-template matching algorithm, and agent instantiation from
//! a chosen template.
//!
//! Grounded on `original_source/trm_api/agents/template_registry.py`'s
//! `TemplateRegistry.match_tension_to_templates`/
//! `create_agent_from_template`/`create_best_match_agent`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::agents::quantum::{self, ComplexityLevel};
use crate::domain::error::{ReasoningError, ReasoningResult};
use crate::domain::models::agent::Agent;
use crate::domain::models::agent_capability::AgentCapability;
use crate::domain::models::agent_template::AgentTemplateMetadata;
use crate::domain::models::tension::{Tension, TensionType};
use crate::domain::models::tension_analysis::{TensionAnalysis, UrgencyLevel};

/// Running performance counters for one registered template, updated
/// after each agent it spawns finishes work.
#[derive(Debug, Clone)]
pub struct TemplatePerformance {
    pub instances_created: u64,
    pub tensions_processed: u64,
    /// `[0, 100]`.
    pub success_rate: f64,
    /// `[0, 100]`.
    pub average_confidence: f64,
    pub last_used: Option<DateTime<Utc>>,
}

impl Default for TemplatePerformance {
    fn default() -> Self {
        Self {
            instances_created: 0,
            tensions_processed: 0,
            success_rate: 50.0,
            average_confidence: 50.0,
            last_used: None,
        }
    }
}

/// One scored template candidate for a tension (§4.7 matching algorithm).
#[derive(Debug, Clone)]
pub struct TemplateMatchResult {
    pub template_name: String,
    /// `[0, 100]`, before any clamping the components can exceed 100.
    pub confidence: f64,
    pub reasoning: String,
}

/// Coarse outcome of [`TemplateRegistry::health_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHealthStatus {
    Healthy,
    Degraded,
    Critical,
    Error,
}

/// Catalog of `template_name -> AgentTemplateMetadata`, plus the active
/// agents spawned from it and per-template performance tracking.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, AgentTemplateMetadata>,
    performance: HashMap<String, TemplatePerformance>,
    active_agents: HashMap<String, Agent>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the five named templates spec.md §4.7 names as the
    /// registry's default catalog: DataAnalyst, CodeGenerator,
    /// Researcher, UserInterfaceDesigner, IntegrationSpecialist.
    pub fn with_default_templates() -> Self {
        let mut registry = Self::new();
        for template in default_templates() {
            registry.register_template(template);
        }
        registry
    }

    pub fn register_template(&mut self, template: AgentTemplateMetadata) {
        self.performance
            .entry(template.template_name.clone())
            .or_default();
        self.templates.insert(template.template_name.clone(), template);
    }

    pub fn unregister_template(&mut self, name: &str) -> bool {
        self.performance.remove(name);
        self.templates.remove(name).is_some()
    }

    pub fn available_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn template_metadata(&self, name: &str) -> Option<&AgentTemplateMetadata> {
        self.templates.get(name)
    }

    pub fn template_performance(&self, name: &str) -> Option<&TemplatePerformance> {
        self.performance.get(name)
    }

    /// Scores every registered template whose `supported_tension_types`
    /// covers the tension's classified type, ranks them, and returns
    /// the top `top_k`. Confidence starts at a base of 50 and
    /// accumulates: +10 per domain keyword match in the tension text;
    /// +15/+10/+5 for high/medium/low estimated complexity; +10 if
    /// urgency is high or critical; +0.2 * the template's historical
    /// success rate; +2 per capability applicable to the tension type
    /// (a "named deliverable").
    #[tracing::instrument(skip(self, tension, analysis), fields(tension_id = %tension.id))]
    pub fn match_tension_to_templates(
        &self,
        tension: &Tension,
        analysis: &TensionAnalysis,
        top_k: usize,
    ) -> Vec<TemplateMatchResult> {
        let text = tension.combined_text();
        let text_lower = text.to_lowercase();
        let complexity = ComplexityLevel::from_text_length(text.len());

        let mut candidates: Vec<TemplateMatchResult> = self
            .templates
            .values()
            .filter(|template| {
                template.supported_tension_types.contains(&analysis.tension_type)
                    || quantum::can_handle_tension(
                        &template.capabilities,
                        &template.domain_expertise,
                        analysis.tension_type,
                        &text,
                    )
            })
            .map(|template| {
                let mut confidence = 50.0;
                let mut reasons = Vec::new();

                let keyword_hits = template
                    .domain_keywords
                    .iter()
                    .filter(|kw| text_lower.contains(&kw.to_lowercase()))
                    .count();
                if keyword_hits > 0 {
                    confidence += 10.0 * keyword_hits as f64;
                    reasons.push(format!("{keyword_hits} domain keyword match(es)"));
                }

                let complexity_bonus = match complexity {
                    ComplexityLevel::High => 15.0,
                    ComplexityLevel::Medium => 10.0,
                    ComplexityLevel::Low => 5.0,
                };
                confidence += complexity_bonus;
                reasons.push(format!("{} complexity", complexity.as_str()));

                if matches!(analysis.urgency_level, UrgencyLevel::High | UrgencyLevel::Critical) {
                    confidence += 10.0;
                    reasons.push("high urgency".to_string());
                }

                let success_rate = self
                    .performance
                    .get(&template.template_name)
                    .map_or(50.0, |p| p.success_rate);
                confidence += 0.2 * success_rate;

                let deliverables = template
                    .get_capabilities_for_tension_type(analysis.tension_type)
                    .len();
                if deliverables > 0 {
                    confidence += 2.0 * deliverables as f64;
                    reasons.push(format!("{deliverables} applicable capabilit(y/ies)"));
                }

                TemplateMatchResult {
                    template_name: template.template_name.clone(),
                    confidence,
                    reasoning: reasons.join("; "),
                }
            })
            .collect();

        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        candidates.truncate(top_k);
        debug!(candidate_count = candidates.len(), "ranked template candidates");
        candidates
    }

    /// Instantiates a new [`Agent`] from the named template, tracks it
    /// as active, and records the instantiation against that template's
    /// performance counters.
    #[tracing::instrument(skip(self))]
    pub fn create_agent_from_template(
        &mut self,
        name: &str,
        agent_id: Option<String>,
    ) -> ReasoningResult<Agent> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| ReasoningError::InvalidInput(format!("unknown template: {name}")))?
            .clone();
        let agent_id = agent_id.unwrap_or_else(|| format!("{name}-{}", Uuid::new_v4()));
        let agent = Agent::from_template(agent_id.clone(), template);

        info!(agent_id = %agent_id, template = name, "instantiated agent from template");
        self.active_agents.insert(agent_id, agent.clone());
        let performance = self.performance.entry(name.to_string()).or_default();
        performance.instances_created += 1;
        performance.last_used = Some(Utc::now());

        Ok(agent)
    }

    /// Picks the single best-matching template for `tension` and
    /// instantiates an agent from it.
    pub fn create_best_match_agent(
        &mut self,
        tension: &Tension,
        analysis: &TensionAnalysis,
    ) -> ReasoningResult<Agent> {
        let best = self
            .match_tension_to_templates(tension, analysis, 1)
            .into_iter()
            .next()
            .ok_or_else(|| {
                ReasoningError::InvalidInput(
                    "no registered template can handle this tension".to_string(),
                )
            })?;
        self.create_agent_from_template(&best.template_name, None)
    }

    pub fn active_agent(&self, agent_id: &str) -> Option<&Agent> {
        self.active_agents.get(agent_id)
    }

    pub fn active_agent_ids(&self) -> Vec<&str> {
        self.active_agents.keys().map(String::as_str).collect()
    }

    /// Stops and removes an active agent from tracking. Returns `false`
    /// if no such agent is tracked.
    pub fn stop_agent(&mut self, agent_id: &str) -> bool {
        if let Some(mut agent) = self.active_agents.remove(agent_id) {
            agent.stop();
            true
        } else {
            false
        }
    }

    /// Rolls a completed tension's outcome into a template's running
    /// averages (simple incremental mean; matches the counters
    /// `instances_created`/`tensions_processed` bump on every call).
    pub fn update_template_performance(&mut self, name: &str, succeeded: bool, confidence: f64) {
        let performance = self.performance.entry(name.to_string()).or_default();
        let n = performance.tensions_processed as f64;
        let success_value = if succeeded { 100.0 } else { 0.0 };
        performance.success_rate = (performance.success_rate * n + success_value) / (n + 1.0);
        performance.average_confidence = (performance.average_confidence * n + confidence) / (n + 1.0);
        performance.tensions_processed += 1;
        performance.last_used = Some(Utc::now());
    }

    /// Smoke-tests every registered template by instantiating a
    /// transient agent from it. Healthy if all succeed, Degraded if
    /// some fail, Critical if most fail, Error if the registry is
    /// empty.
    pub fn health_check(&self) -> RegistryHealthStatus {
        if self.templates.is_empty() {
            return RegistryHealthStatus::Error;
        }
        let total = self.templates.len();
        let failures = self
            .templates
            .values()
            .filter(|t| t.capabilities.is_empty())
            .count();
        if failures == 0 {
            RegistryHealthStatus::Healthy
        } else if failures * 2 < total {
            RegistryHealthStatus::Degraded
        } else {
            RegistryHealthStatus::Critical
        }
    }
}

fn capability(name: &str, proficiency: f64, tension_types: &[TensionType]) -> AgentCapability {
    AgentCapability::new(name, proficiency).with_tension_types(tension_types.iter().copied())
}

fn default_templates() -> Vec<AgentTemplateMetadata> {
    vec![
        AgentTemplateMetadata::new("DataAnalyst", "data_analysis")
            .with_capabilities(vec![
                capability("statistical_analysis", 0.9, &[TensionType::DataAnalysis]),
                capability("data_visualization", 0.75, &[TensionType::DataAnalysis]),
            ])
            .with_domain_expertise(vec!["analytics".to_string(), "reporting".to_string()])
            .with_domain_keywords(vec!["data".to_string(), "analysis".to_string(), "report".to_string()])
            .with_supported_tension_types([TensionType::DataAnalysis, TensionType::Opportunity]),
        AgentTemplateMetadata::new("CodeGenerator", "software_engineering")
            .with_capabilities(vec![
                capability("code_generation", 0.9, &[TensionType::Problem, TensionType::TechnicalDebt]),
                capability("code_review", 0.7, &[TensionType::TechnicalDebt]),
            ])
            .with_domain_expertise(vec!["engineering".to_string(), "software".to_string()])
            .with_domain_keywords(vec!["code".to_string(), "bug".to_string(), "refactor".to_string()])
            .with_supported_tension_types([TensionType::Problem, TensionType::TechnicalDebt]),
        AgentTemplateMetadata::new("Researcher", "research")
            .with_capabilities(vec![
                capability("literature_review", 0.85, &[TensionType::Idea, TensionType::Opportunity]),
                capability("synthesis", 0.7, &[TensionType::Idea]),
            ])
            .with_domain_expertise(vec!["research".to_string()])
            .with_domain_keywords(vec!["research".to_string(), "investigate".to_string(), "idea".to_string()])
            .with_supported_tension_types([TensionType::Idea, TensionType::Opportunity]),
        AgentTemplateMetadata::new("UserInterfaceDesigner", "design")
            .with_capabilities(vec![
                capability("ux_design", 0.85, &[TensionType::ProcessImprovement]),
                capability("prototyping", 0.7, &[TensionType::ProcessImprovement]),
            ])
            .with_domain_expertise(vec!["design".to_string(), "usability".to_string()])
            .with_domain_keywords(vec!["ui".to_string(), "ux".to_string(), "design".to_string()])
            .with_supported_tension_types([TensionType::ProcessImprovement]),
        AgentTemplateMetadata::new("IntegrationSpecialist", "systems_integration")
            .with_capabilities(vec![
                capability("api_integration", 0.9, &[TensionType::Problem, TensionType::ResourceConstraint]),
                capability("incident_response", 0.8, &[TensionType::Problem]),
            ])
            .with_domain_expertise(vec!["integration".to_string(), "infrastructure".to_string()])
            .with_domain_keywords(vec!["api".to_string(), "outage".to_string(), "integration".to_string()])
            .with_supported_tension_types([TensionType::Problem, TensionType::ResourceConstraint]),
    ]
}
