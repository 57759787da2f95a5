//! Advanced agent creation (C9): composite agents assembled from named
//! templates, custom agents synthesized from raw capability
//! requirements, and post-hoc configuration tuning.
//!
//! Grounded on `original_source/trm_api/agents/genesis/advanced_creator.py`'s
//! `create_composite_agent`/`create_custom_agent`/
//! `optimize_agent_configuration`.

use std::collections::HashSet;

use crate::domain::error::{ReasoningError, ReasoningResult};
use crate::domain::models::agent::{Agent, AgentOrigin};
use crate::domain::models::agent_capability::AgentCapability;
use crate::domain::models::agent_template::AgentTemplateMetadata;
use crate::domain::models::tension::TensionType;

/// Default proficiency and task time assigned to a synthesized capability
/// when no template already describes it (§4.9).
const SYNTHESIZED_PROFICIENCY: f64 = 0.7;
const SYNTHESIZED_TASK_MINUTES: u32 = 60;

/// Builds composite and custom agents, and applies post-hoc
/// configuration adjustments recommended by ecosystem health checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancedAgentCreator;

impl AdvancedAgentCreator {
    pub fn new() -> Self {
        Self
    }

    /// Union-dedup-by-name (keep first occurrence) of capabilities,
    /// domain expertise, and supported tension types across the named
    /// templates. Rejects the request if any name is not found among
    /// `available_templates`, or if no names were given.
    pub fn create_composite_agent(
        &self,
        agent_id: impl Into<String>,
        available_templates: &[AgentTemplateMetadata],
        template_names: &[String],
    ) -> ReasoningResult<Agent> {
        if template_names.is_empty() {
            return Err(ReasoningError::InvalidInput(
                "composite agent requires at least one template name".to_string(),
            ));
        }

        let mut selected = Vec::with_capacity(template_names.len());
        for name in template_names {
            let template = available_templates
                .iter()
                .find(|t| &t.template_name == name)
                .ok_or_else(|| {
                    ReasoningError::InvalidInput(format!("unknown template: {name}"))
                })?;
            selected.push(template);
        }

        let mut capabilities = Vec::new();
        let mut seen_capability_names = HashSet::new();
        let mut domain_expertise = Vec::new();
        let mut seen_expertise = HashSet::new();
        let mut supported_tension_types: HashSet<TensionType> = HashSet::new();

        for template in &selected {
            for capability in &template.capabilities {
                if seen_capability_names.insert(capability.name.clone()) {
                    capabilities.push(capability.clone());
                }
            }
            for expertise in &template.domain_expertise {
                if seen_expertise.insert(expertise.clone()) {
                    domain_expertise.push(expertise.clone());
                }
            }
            supported_tension_types.extend(template.supported_tension_types.iter().copied());
        }

        let combined_name = selected
            .iter()
            .map(|t| t.template_name.as_str())
            .collect::<Vec<_>>()
            .join("+");
        let metadata = AgentTemplateMetadata::new(
            format!("Composite[{combined_name}]"),
            selected[0].primary_domain.clone(),
        )
        .with_capabilities(capabilities)
        .with_domain_expertise(domain_expertise)
        .with_supported_tension_types(supported_tension_types);

        Ok(Agent::from_template(agent_id, metadata).with_origin(AgentOrigin::Composite))
    }

    /// Synthesizes one capability per named requirement at the default
    /// proficiency (0.7) and task time (60 minutes). Rejects the
    /// request if no capabilities were named.
    pub fn create_custom_agent(
        &self,
        agent_id: impl Into<String>,
        primary_domain: impl Into<String>,
        required_capabilities: &[String],
        supported_tension_types: impl IntoIterator<Item = TensionType>,
    ) -> ReasoningResult<Agent> {
        if required_capabilities.is_empty() {
            return Err(ReasoningError::InvalidInput(
                "custom agent requires at least one required capability".to_string(),
            ));
        }

        let agent_id = agent_id.into();
        let capabilities: Vec<AgentCapability> = required_capabilities
            .iter()
            .map(|name| {
                AgentCapability::new(name.clone(), SYNTHESIZED_PROFICIENCY)
                    .with_time(SYNTHESIZED_TASK_MINUTES)
            })
            .collect();

        let metadata = AgentTemplateMetadata::new(format!("Custom[{agent_id}]"), primary_domain)
            .with_capabilities(capabilities)
            .with_supported_tension_types(supported_tension_types);

        Ok(Agent::from_template(agent_id, metadata).with_origin(AgentOrigin::Custom))
    }

    /// Post-hoc tuning applied after an ecosystem health check: an
    /// agent running under 50% efficiency has its preferred complexity
    /// demoted one step (high -> medium -> low); an agent scoring under
    /// 60% quality and lacking a `quality_assurance` capability gets one
    /// added. Returns a human-readable log of the changes made, if any.
    pub fn optimize_agent_configuration(
        &self,
        agent: &mut Agent,
        efficiency: f64,
        quality: f64,
    ) -> Vec<String> {
        let mut changes = Vec::new();

        if efficiency < 50.0 {
            let current = agent
                .strategic_context
                .get("preferred_complexity")
                .cloned()
                .unwrap_or_else(|| "high".to_string());
            let demoted = match current.as_str() {
                "high" => "medium",
                "medium" => "low",
                other => other,
            };
            if demoted != current {
                agent
                    .strategic_context
                    .insert("preferred_complexity".to_string(), demoted.to_string());
                changes.push(format!(
                    "demoted preferred complexity from {current} to {demoted} (efficiency {efficiency:.1} < 50)"
                ));
            }
        }

        if quality < 60.0 && agent.metadata.get_capability_by_name("quality_assurance").is_none() {
            let capability = AgentCapability::new("quality_assurance", SYNTHESIZED_PROFICIENCY)
                .with_description("Reviews outputs for correctness before handoff")
                .with_time(45);
            agent.metadata.capabilities.push(capability.clone());
            agent.capabilities.push(capability);
            changes.push(format!(
                "added quality_assurance capability (quality {quality:.1} < 60)"
            ));
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, domain: &str, capability: &str) -> AgentTemplateMetadata {
        AgentTemplateMetadata::new(name, domain)
            .with_capabilities(vec![AgentCapability::new(capability, 0.8)
                .with_tension_types([TensionType::Problem])])
            .with_domain_expertise(vec![domain.to_string()])
            .with_supported_tension_types([TensionType::Problem])
    }

    #[test]
    fn composite_agent_unions_capabilities_across_templates() {
        let templates = vec![
            template("DataAnalyst", "data", "statistical_analysis"),
            template("Researcher", "research", "literature_review"),
        ];
        let names = vec!["DataAnalyst".to_string(), "Researcher".to_string()];
        let agent = AdvancedAgentCreator::new()
            .create_composite_agent("agent-1", &templates, &names)
            .unwrap();
        assert_eq!(agent.origin, AgentOrigin::Composite);
        assert_eq!(agent.capabilities.len(), 2);
    }

    #[test]
    fn composite_agent_rejects_unknown_template_name() {
        let templates = vec![template("DataAnalyst", "data", "statistical_analysis")];
        let names = vec!["Nonexistent".to_string()];
        let result = AdvancedAgentCreator::new().create_composite_agent("agent-1", &templates, &names);
        assert!(result.is_err());
    }

    #[test]
    fn custom_agent_synthesizes_default_capabilities() {
        let required = vec!["incident_response".to_string()];
        let agent = AdvancedAgentCreator::new()
            .create_custom_agent("agent-2", "ops", &required, [TensionType::Problem])
            .unwrap();
        assert_eq!(agent.origin, AgentOrigin::Custom);
        assert_eq!(agent.capabilities[0].proficiency_level, SYNTHESIZED_PROFICIENCY);
    }

    #[test]
    fn custom_agent_rejects_empty_requirements() {
        let result =
            AdvancedAgentCreator::new().create_custom_agent("agent-2", "ops", &[], [TensionType::Problem]);
        assert!(result.is_err());
    }

    #[test]
    fn optimize_adds_quality_assurance_capability_when_missing() {
        let mut agent = AdvancedAgentCreator::new()
            .create_custom_agent(
                "agent-3",
                "ops",
                &["incident_response".to_string()],
                [TensionType::Problem],
            )
            .unwrap();
        let changes = AdvancedAgentCreator::new().optimize_agent_configuration(&mut agent, 80.0, 40.0);
        assert!(!changes.is_empty());
        assert!(agent.metadata.get_capability_by_name("quality_assurance").is_some());
    }

    #[test]
    fn optimize_demotes_complexity_on_low_efficiency() {
        let mut agent = AdvancedAgentCreator::new()
            .create_custom_agent(
                "agent-4",
                "ops",
                &["incident_response".to_string()],
                [TensionType::Problem],
            )
            .unwrap();
        agent
            .strategic_context
            .insert("preferred_complexity".to_string(), "high".to_string());
        AdvancedAgentCreator::new().optimize_agent_configuration(&mut agent, 30.0, 90.0);
        assert_eq!(
            agent.strategic_context.get("preferred_complexity").unwrap(),
            "medium"
        );
    }
}
