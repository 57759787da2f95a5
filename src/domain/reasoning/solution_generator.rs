//! SolutionGenerator (C3): template-driven candidate solutions for an
//! analyzed tension, ranked and truncated to the top five.
//!
//! Grounded on `original_source/trm_api/reasoning/solution_generator.py`.

use uuid::Uuid;

use crate::domain::models::solution::{
    GeneratedSolution, SolutionPriority, SolutionStep, SolutionType,
};
use crate::domain::models::tension::TensionType;
use crate::domain::models::tension_analysis::TensionAnalysis;

struct Template {
    title: &'static str,
    description: &'static str,
    steps: &'static [&'static str],
    estimated_effort: &'static str,
    required_skills: &'static [&'static str],
}

const BUG_FIX: Template = Template {
    title: "Bug Investigation and Fix",
    description: "Systematic approach to identify, reproduce, and fix software bugs",
    steps: &[
        "Reproduce the issue in controlled environment",
        "Analyze logs and error messages",
        "Identify root cause",
        "Develop and test fix",
        "Deploy fix and verify resolution",
    ],
    estimated_effort: "1-3 days",
    required_skills: &["debugging", "development", "testing"],
};

const SYSTEM_OUTAGE: Template = Template {
    title: "System Recovery and Stabilization",
    description: "Emergency response for system outages and service disruptions",
    steps: &[
        "Assess impact and communicate status",
        "Implement immediate workaround if available",
        "Investigate root cause",
        "Apply permanent fix",
        "Conduct post-incident review",
    ],
    estimated_effort: "4-8 hours",
    required_skills: &["system_administration", "incident_response", "communication"],
};

const PERFORMANCE_ISSUE: Template = Template {
    title: "Performance Analysis and Optimization",
    description: "Systematic performance improvement approach",
    steps: &[
        "Establish performance baseline",
        "Identify bottlenecks",
        "Prioritize optimization opportunities",
        "Implement improvements",
        "Measure and validate results",
    ],
    estimated_effort: "1-2 weeks",
    required_skills: &["performance_analysis", "optimization", "monitoring"],
};

const PROCESS_IMPROVEMENT: Template = Template {
    title: "Process Optimization Initiative",
    description: "Systematic approach to improve existing processes",
    steps: &[
        "Map current process",
        "Identify improvement opportunities",
        "Design optimized process",
        "Pilot new process",
        "Roll out and monitor",
    ],
    estimated_effort: "2-4 weeks",
    required_skills: &["process_analysis", "change_management", "stakeholder_engagement"],
};

const TECHNOLOGY_UPGRADE: Template = Template {
    title: "Technology Enhancement Project",
    description: "Strategic technology improvement initiative",
    steps: &[
        "Assess current technology state",
        "Research and evaluate options",
        "Create implementation plan",
        "Execute upgrade",
        "Validate and optimize",
    ],
    estimated_effort: "1-3 months",
    required_skills: &["technology_assessment", "project_management", "implementation"],
};

const RISK_MITIGATION: Template = Template {
    title: "Risk Assessment and Mitigation Plan",
    description: "Comprehensive approach to address identified risks",
    steps: &[
        "Quantify risk impact and probability",
        "Develop mitigation strategies",
        "Implement preventive measures",
        "Create monitoring system",
        "Establish response procedures",
    ],
    estimated_effort: "1-2 weeks",
    required_skills: &["risk_analysis", "planning", "monitoring"],
};

const CONFLICT_RESOLUTION: Template = Template {
    title: "Stakeholder Conflict Resolution",
    description: "Structured approach to resolve conflicts between stakeholders",
    steps: &[
        "Understand all perspectives",
        "Identify common ground",
        "Facilitate discussion",
        "Develop compromise solution",
        "Monitor implementation",
    ],
    estimated_effort: "1-2 weeks",
    required_skills: &["mediation", "communication", "stakeholder_management"],
};

const IDEA_EVALUATION: Template = Template {
    title: "Idea Evaluation and Development",
    description: "Systematic evaluation and development of new ideas",
    steps: &[
        "Define idea scope and objectives",
        "Conduct feasibility analysis",
        "Develop proof of concept",
        "Create implementation plan",
        "Execute pilot project",
    ],
    estimated_effort: "2-6 weeks",
    required_skills: &["analysis", "prototyping", "project_management"],
};

const GENERIC: Template = Template {
    title: "General Investigation and Resolution",
    description: "Systematic approach to investigate and resolve the tension",
    steps: &[
        "Gather additional information",
        "Analyze the situation",
        "Develop action plan",
        "Implement solution",
        "Monitor results",
    ],
    estimated_effort: "1-2 weeks",
    required_skills: &["analysis", "problem_solving", "communication"],
};

/// Template-driven solution generator (§4.3).
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionGenerator;

impl SolutionGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_solutions(
        &self,
        analysis: &TensionAnalysis,
        title: &str,
        description: &str,
    ) -> Vec<GeneratedSolution> {
        let mut solutions = Vec::new();

        let primary = generate_primary_solution(analysis, title, description);
        let primary_id = primary.id.clone();
        solutions.push(primary);

        for theme in &analysis.key_themes {
            if let Some(alt) = generate_theme_based_solution(theme, analysis, title) {
                if alt.id != primary_id {
                    solutions.push(alt);
                }
            }
        }

        if analysis.suggested_priority >= 2 {
            solutions.push(generate_escalation_solution());
        }

        solutions.sort_by(|a, b| {
            (b.priority.value(), b.confidence_score)
                .partial_cmp(&(a.priority.value(), a.confidence_score))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        solutions.truncate(5);
        solutions
    }
}

fn build_steps(solution_id: &str, template: &Template) -> Vec<SolutionStep> {
    template
        .steps
        .iter()
        .enumerate()
        .map(|(i, step_desc)| {
            let step_number = i + 1;
            let first_word = step_desc.split(' ').next().unwrap_or(step_desc);
            SolutionStep {
                id: format!("{solution_id}_step_{step_number}"),
                title: format!("Step {step_number}: {first_word}"),
                description: (*step_desc).to_string(),
                estimated_effort: estimate_step_effort(step_desc).to_string(),
                required_skills: template.required_skills.iter().map(|s| (*s).to_string()).collect(),
                dependencies: if i > 0 {
                    vec![format!("{solution_id}_step_{i}")]
                } else {
                    Vec::new()
                },
            }
        })
        .collect()
}

fn generate_primary_solution(
    analysis: &TensionAnalysis,
    title: &str,
    description: &str,
) -> GeneratedSolution {
    let solution_id = Uuid::new_v4().to_string();
    let template = select_primary_template(analysis.tension_type, title, description);
    let steps = build_steps(&solution_id, &template);
    let priority = SolutionPriority::from_urgency_value(analysis.urgency_level.value());
    let confidence = analysis.confidence_score * 0.8;

    GeneratedSolution {
        id: solution_id,
        title: template.title.to_string(),
        description: template.description.to_string(),
        solution_type: determine_solution_type(analysis.tension_type),
        priority,
        estimated_impact: estimate_impact(analysis).to_string(),
        estimated_effort: template.estimated_effort.to_string(),
        success_criteria: generate_success_criteria(analysis.tension_type),
        steps,
        required_resources: identify_required_resources(&template, analysis),
        risks: identify_risks(analysis.tension_type, &analysis.key_themes),
        alternatives: suggest_alternatives(analysis.tension_type),
        confidence_score: confidence,
        reasoning: generate_solution_reasoning(analysis),
        created_at: chrono::Utc::now(),
    }
}

fn select_primary_template(tension_type: TensionType, title: &str, description: &str) -> Template {
    match tension_type {
        TensionType::Problem => select_problem_template(title, description),
        TensionType::Opportunity => select_opportunity_template(title, description),
        TensionType::Risk => RISK_MITIGATION,
        TensionType::Conflict => CONFLICT_RESOLUTION,
        TensionType::Idea => IDEA_EVALUATION,
        _ => GENERIC,
    }
}

fn select_problem_template(title: &str, description: &str) -> Template {
    let text = format!("{title} {description}").to_lowercase();
    if ["bug", "error", "exception", "crash"].iter().any(|k| text.contains(k)) {
        BUG_FIX
    } else if ["down", "outage", "unavailable", "offline"].iter().any(|k| text.contains(k)) {
        SYSTEM_OUTAGE
    } else if ["slow", "performance", "latency", "timeout"].iter().any(|k| text.contains(k)) {
        PERFORMANCE_ISSUE
    } else {
        BUG_FIX
    }
}

fn select_opportunity_template(title: &str, description: &str) -> Template {
    let text = format!("{title} {description}").to_lowercase();
    if ["process", "workflow", "efficiency"].iter().any(|k| text.contains(k)) {
        PROCESS_IMPROVEMENT
    } else if ["technology", "upgrade", "modernize"].iter().any(|k| text.contains(k)) {
        TECHNOLOGY_UPGRADE
    } else {
        PROCESS_IMPROVEMENT
    }
}

fn generate_theme_based_solution(
    theme: &str,
    analysis: &TensionAnalysis,
    title: &str,
) -> Option<GeneratedSolution> {
    let (solution_type, template_title, template_desc, steps_list): (
        SolutionType,
        &str,
        &str,
        &[&str],
    ) = match theme {
        "Technology" => (
            SolutionType::TechnologySolution,
            "Technology-Focused Solution",
            "Technology-centric approach to address the tension",
            &[
                "Assess current technology state",
                "Identify technical requirements",
                "Design technical solution",
                "Implement and test",
                "Deploy and monitor",
            ],
        ),
        "Business" => (
            SolutionType::ProcessImprovement,
            "Business Process Solution",
            "Business-focused approach to resolve the tension",
            &[
                "Analyze business impact",
                "Engage stakeholders",
                "Define business requirements",
                "Implement business solution",
                "Measure business outcomes",
            ],
        ),
        "Security" => (
            SolutionType::ImmediateAction,
            "Security-Focused Response",
            "Security-centric approach to address the tension",
            &[
                "Assess security implications",
                "Implement immediate security measures",
                "Conduct security review",
                "Apply security controls",
                "Monitor security posture",
            ],
        ),
        _ => return None,
    };
    let _ = title;

    let solution_id = Uuid::new_v4().to_string();
    let skill = theme.to_lowercase();
    let steps: Vec<SolutionStep> = steps_list
        .iter()
        .enumerate()
        .map(|(i, step_desc)| {
            let step_number = i + 1;
            let first_word = step_desc.split(' ').next().unwrap_or(step_desc);
            SolutionStep {
                id: format!("{solution_id}_step_{step_number}"),
                title: format!("Step {step_number}: {first_word}"),
                description: (*step_desc).to_string(),
                estimated_effort: estimate_step_effort(step_desc).to_string(),
                required_skills: vec![skill.clone(), "analysis".to_string()],
                dependencies: if i > 0 {
                    vec![format!("{solution_id}_step_{i}")]
                } else {
                    Vec::new()
                },
            }
        })
        .collect();

    Some(GeneratedSolution {
        id: solution_id,
        title: template_title.to_string(),
        description: template_desc.to_string(),
        solution_type,
        priority: SolutionPriority::Medium,
        estimated_impact: "Medium".to_string(),
        estimated_effort: "1-2 weeks".to_string(),
        success_criteria: generate_success_criteria(analysis.tension_type),
        steps,
        required_resources: vec![format!("{skill}_expertise")],
        risks: vec![format!("{theme} complexity"), "Resource availability".to_string()],
        alternatives: vec!["Generic approach".to_string(), "Hybrid solution".to_string()],
        confidence_score: 0.7,
        reasoning: format!("Solution focused on {theme} theme identified in analysis"),
        created_at: chrono::Utc::now(),
    })
}

fn generate_escalation_solution() -> GeneratedSolution {
    let solution_id = Uuid::new_v4().to_string();
    let steps = vec![
        SolutionStep {
            id: format!("{solution_id}_step_1"),
            title: "Step 1: Immediate Escalation".to_string(),
            description: "Escalate to appropriate stakeholders immediately".to_string(),
            estimated_effort: "30 minutes".to_string(),
            required_skills: vec!["communication".to_string(), "stakeholder_management".to_string()],
            dependencies: Vec::new(),
        },
        SolutionStep {
            id: format!("{solution_id}_step_2"),
            title: "Step 2: Stakeholder Alignment".to_string(),
            description: "Align stakeholders on priority and approach".to_string(),
            estimated_effort: "1 hour".to_string(),
            required_skills: vec!["facilitation".to_string(), "communication".to_string()],
            dependencies: vec![format!("{solution_id}_step_1")],
        },
        SolutionStep {
            id: format!("{solution_id}_step_3"),
            title: "Step 3: Resource Allocation".to_string(),
            description: "Allocate necessary resources for resolution".to_string(),
            estimated_effort: "2 hours".to_string(),
            required_skills: vec!["resource_management".to_string(), "planning".to_string()],
            dependencies: vec![format!("{solution_id}_step_2")],
        },
    ];

    GeneratedSolution {
        id: solution_id,
        title: "Escalation and Priority Response".to_string(),
        description: "Immediate escalation and priority handling for critical tension".to_string(),
        solution_type: SolutionType::Escalation,
        priority: SolutionPriority::Critical,
        estimated_impact: "High".to_string(),
        estimated_effort: "4-8 hours".to_string(),
        success_criteria: vec![
            "Stakeholders notified within 30 minutes".to_string(),
            "Resources allocated within 4 hours".to_string(),
            "Resolution plan established within 8 hours".to_string(),
        ],
        steps,
        required_resources: vec!["management_support".to_string(), "dedicated_team".to_string()],
        risks: vec!["Resource conflicts".to_string(), "Stakeholder availability".to_string()],
        alternatives: vec!["Standard process".to_string(), "Delayed response".to_string()],
        confidence_score: 0.9,
        reasoning: "High-priority tension requires immediate escalation and resource allocation"
            .to_string(),
        created_at: chrono::Utc::now(),
    }
}

fn determine_solution_type(tension_type: TensionType) -> SolutionType {
    match tension_type {
        TensionType::Problem => SolutionType::ImmediateAction,
        TensionType::Opportunity => SolutionType::ProcessImprovement,
        TensionType::Risk | TensionType::Idea => SolutionType::Investigation,
        TensionType::Conflict => SolutionType::Escalation,
        _ => SolutionType::Investigation,
    }
}

fn estimate_step_effort(step_description: &str) -> &'static str {
    let lower = step_description.to_lowercase();
    if ["immediate", "quick", "assess"].iter().any(|k| lower.contains(k)) {
        "1-2 hours"
    } else if ["develop", "implement", "create"].iter().any(|k| lower.contains(k)) {
        "1-2 days"
    } else if ["analyze", "investigate", "research"].iter().any(|k| lower.contains(k)) {
        "2-4 hours"
    } else {
        "4-8 hours"
    }
}

fn estimate_impact(analysis: &TensionAnalysis) -> &'static str {
    let value = analysis.impact_level.value();
    if value >= 4 {
        "Critical"
    } else if value >= 3 {
        "High"
    } else if value >= 2 {
        "Medium"
    } else {
        "Low"
    }
}

fn generate_success_criteria(tension_type: TensionType) -> Vec<String> {
    let mut criteria = vec![
        "Tension is resolved and marked as closed".to_string(),
        "Stakeholders confirm satisfaction with resolution".to_string(),
    ];
    match tension_type {
        TensionType::Problem => {
            criteria.push("Root cause is identified and addressed".to_string());
            criteria.push("No recurrence within 30 days".to_string());
        }
        TensionType::Opportunity => {
            criteria.push("Measurable improvement is achieved".to_string());
            criteria.push("Benefits are documented and validated".to_string());
        }
        TensionType::Risk => {
            criteria.push("Risk is mitigated to acceptable level".to_string());
            criteria.push("Monitoring system is in place".to_string());
        }
        _ => {}
    }
    criteria
}

fn identify_required_resources(template: &Template, analysis: &TensionAnalysis) -> Vec<String> {
    let mut resources: Vec<String> = template
        .required_skills
        .iter()
        .map(|skill| format!("{skill}_expertise"))
        .collect();

    for theme in &analysis.key_themes {
        match theme.as_str() {
            "Technology" => {
                resources.push("development_team".to_string());
                resources.push("testing_environment".to_string());
            }
            "Security" => {
                resources.push("security_team".to_string());
                resources.push("security_tools".to_string());
            }
            "Business" => {
                resources.push("business_analyst".to_string());
                resources.push("stakeholder_time".to_string());
            }
            _ => {}
        }
    }

    resources.sort();
    resources.dedup();
    resources
}

fn identify_risks(tension_type: TensionType, themes: &[String]) -> Vec<String> {
    let mut risks = vec![
        "Resource unavailability".to_string(),
        "Timeline delays".to_string(),
        "Scope creep".to_string(),
    ];

    match tension_type {
        TensionType::Problem => {
            risks.push("Incomplete fix".to_string());
            risks.push("Side effects".to_string());
            risks.push("Regression".to_string());
        }
        TensionType::Opportunity => {
            risks.push("ROI not achieved".to_string());
            risks.push("Change resistance".to_string());
            risks.push("Implementation complexity".to_string());
        }
        _ => {}
    }

    for theme in themes {
        match theme.as_str() {
            "Technology" => {
                risks.push("Technical complexity".to_string());
                risks.push("Integration issues".to_string());
            }
            "Security" => {
                risks.push("Security vulnerabilities".to_string());
                risks.push("Compliance issues".to_string());
            }
            _ => {}
        }
    }

    risks.sort();
    risks.dedup();
    risks
}

fn suggest_alternatives(tension_type: TensionType) -> Vec<String> {
    let mut alternatives = vec![
        "Phased approach".to_string(),
        "Pilot implementation".to_string(),
        "External consultation".to_string(),
    ];
    match tension_type {
        TensionType::Problem => {
            alternatives.push("Workaround solution".to_string());
            alternatives.push("Third-party fix".to_string());
        }
        TensionType::Opportunity => {
            alternatives.push("Incremental improvement".to_string());
            alternatives.push("Complete redesign".to_string());
        }
        _ => {}
    }
    alternatives
}

fn generate_solution_reasoning(analysis: &TensionAnalysis) -> String {
    format!(
        "Solution generated based on {} classification with {:.1}% confidence. Template selected based on content analysis and {} themes. Priority set to {} based on impact ({}) and urgency ({}).",
        analysis.tension_type.label(),
        analysis.confidence_score * 100.0,
        analysis.key_themes.join(", "),
        analysis.suggested_priority,
        analysis.impact_level.name(),
        analysis.urgency_level.name(),
    )
}
