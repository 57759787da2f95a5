//! PriorityCalculator (C4): multi-dimensional priority scoring over a
//! [`TensionAnalysis`] using one of five selectable methods.
//!
//! Grounded on `original_source/trm_api/reasoning/priority_calculator.py`.

use std::collections::HashMap;

use crate::domain::models::priority_result::{normalize_priority, PriorityCalculationResult};
use crate::domain::models::tension_analysis::TensionAnalysis;

const VALUE_KEYWORDS: &[&str] = &[
    "revenue", "customer", "efficiency", "cost", "profit", "market", "competitive", "strategic",
    "growth", "innovation",
];

/// Which scoring method [`PriorityCalculator::calculate_priority`] runs.
/// Mirrors the original's `calculation_methods` dispatch table (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityMethod {
    WeightedAverage,
    EisenhowerMatrix,
    RiceFramework,
    ValueComplexity,
    RiskAdjusted,
}

impl PriorityMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightedAverage => "weighted_average",
            Self::EisenhowerMatrix => "eisenhower_matrix",
            Self::RiceFramework => "rice_framework",
            Self::ValueComplexity => "value_complexity",
            Self::RiskAdjusted => "risk_adjusted",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "weighted_average" => Some(Self::WeightedAverage),
            "eisenhower_matrix" => Some(Self::EisenhowerMatrix),
            "rice_framework" => Some(Self::RiceFramework),
            "value_complexity" => Some(Self::ValueComplexity),
            "risk_adjusted" => Some(Self::RiskAdjusted),
            _ => None,
        }
    }
}

/// Optional contextual hints a caller may supply alongside a tension,
/// feeding the deadline/dependency/strategic/stakeholder adjustments.
#[derive(Debug, Clone, Default)]
pub struct PriorityContext {
    pub team_capacity: Option<TeamCapacity>,
    pub budget_available: Option<bool>,
    pub stakeholder_count: Option<u32>,
    pub executive_visibility: bool,
    /// Free-text deadline description; "asap"/"urgent" substrings drive
    /// `deadline_pressure`, matching the original's simplified parsing.
    pub deadline: Option<String>,
    pub dependencies: Vec<String>,
    pub strategic_initiative: bool,
    pub okr_related: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamCapacity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy)]
struct PriorityFactors {
    impact_score: f64,
    urgency_score: f64,
    complexity_score: f64,
    resource_availability_score: f64,
    business_value_score: f64,
    risk_level_score: f64,
    stakeholder_interest_score: f64,
    deadline_pressure: f64,
    dependency_factor: f64,
    strategic_alignment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BusinessContext {
    SecurityIncident,
    CustomerFacing,
    ComplianceRelated,
    InnovationProject,
    InternalOperations,
}

impl BusinessContext {
    fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityIncident => "security_incident",
            Self::CustomerFacing => "customer_facing",
            Self::ComplianceRelated => "compliance_related",
            Self::InnovationProject => "innovation_project",
            Self::InternalOperations => "internal_operations",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DimensionWeights {
    impact: f64,
    urgency: f64,
    complexity: f64,
    resources: f64,
    business_value: f64,
    risk: f64,
    stakeholder: f64,
}

const DEFAULT_WEIGHTS: DimensionWeights = DimensionWeights {
    impact: 0.25,
    urgency: 0.25,
    complexity: 0.15,
    resources: 0.10,
    business_value: 0.15,
    risk: 0.05,
    stakeholder: 0.05,
};

/// Advanced priority calculation engine (§4.4).
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityCalculator;

impl PriorityCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_priority(
        &self,
        analysis: &TensionAnalysis,
        title: &str,
        description: &str,
        context: &PriorityContext,
        method: PriorityMethod,
    ) -> PriorityCalculationResult {
        let factors = self.extract_factors(analysis, title, description, context);
        let business_context = determine_business_context(analysis, title, description);
        let adjusted = apply_context_adjustments(factors, business_context);

        let mut result = match method {
            PriorityMethod::WeightedAverage => weighted_average(adjusted, business_context),
            PriorityMethod::EisenhowerMatrix => eisenhower_matrix(adjusted),
            PriorityMethod::RiceFramework => rice_framework(adjusted),
            PriorityMethod::ValueComplexity => value_complexity(adjusted),
            PriorityMethod::RiskAdjusted => risk_adjusted(adjusted),
        };

        result.calculation_method = method.as_str().to_string();
        result.reasoning = generate_reasoning(business_context, &result);
        result.recommendations = generate_recommendations(&result, adjusted, business_context);
        result
    }

    fn extract_factors(
        &self,
        analysis: &TensionAnalysis,
        title: &str,
        description: &str,
        context: &PriorityContext,
    ) -> PriorityFactors {
        PriorityFactors {
            impact_score: f64::from(analysis.impact_level.value()) / 4.0,
            urgency_score: f64::from(analysis.urgency_level.value()) / 4.0,
            complexity_score: estimate_complexity(analysis, title, description),
            resource_availability_score: estimate_resource_availability(analysis, context),
            business_value_score: estimate_business_value(analysis, title, description),
            risk_level_score: f64::from(analysis.suggested_priority) / 2.0,
            stakeholder_interest_score: estimate_stakeholder_interest(analysis, context),
            deadline_pressure: calculate_deadline_pressure(context),
            dependency_factor: (context.dependencies.len() as f64 * 0.2).min(1.0),
            strategic_alignment: calculate_strategic_alignment(analysis, context),
        }
    }
}

fn estimate_complexity(analysis: &TensionAnalysis, title: &str, description: &str) -> f64 {
    let text_length = title.len() + description.len();
    let mut score = if text_length > 500 {
        0.3
    } else if text_length > 200 {
        0.2
    } else {
        0.1
    };

    let theme_count = analysis.key_themes.len();
    score += (theme_count as f64 * 0.15).min(0.4);

    const COMPLEX_THEMES: &[&str] = &["Technology", "Security", "Business"];
    for theme in &analysis.key_themes {
        if COMPLEX_THEMES.contains(&theme.as_str()) {
            score += 0.1;
        }
    }

    let entity_count = analysis.extracted_entities.len();
    score += (entity_count as f64 * 0.05).min(0.2);

    score.min(1.0)
}

fn estimate_resource_availability(analysis: &TensionAnalysis, context: &PriorityContext) -> f64 {
    let mut score = 0.6;

    const SPECIALIZED_THEMES: &[&str] = &["Security", "Technology"];
    for theme in &analysis.key_themes {
        if SPECIALIZED_THEMES.contains(&theme.as_str()) {
            score -= 0.15;
        }
    }

    match context.team_capacity {
        Some(TeamCapacity::High) => score += 0.2,
        Some(TeamCapacity::Low) => score -= 0.2,
        Some(TeamCapacity::Medium) | None => {}
    }

    match context.budget_available {
        Some(true) | None => score += 0.1,
        Some(false) => score -= 0.2,
    }

    score.clamp(0.0, 1.0)
}

fn estimate_business_value(analysis: &TensionAnalysis, title: &str, description: &str) -> f64 {
    let mut score = f64::from(analysis.impact_level.value()) / 4.0 * 0.4;

    let text = format!("{title} {description}").to_lowercase();
    let keyword_matches = VALUE_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
    score += (keyword_matches as f64 * 0.1).min(0.4);

    if analysis.key_themes.iter().any(|t| t == "Business") {
        score += 0.2;
    }

    score.min(1.0)
}

fn estimate_stakeholder_interest(analysis: &TensionAnalysis, context: &PriorityContext) -> f64 {
    let mut score = 0.5 + f64::from(analysis.impact_level.value()) / 4.0 * 0.3;

    const CUSTOMER_THEMES: &[&str] = &["Business", "Security"];
    for theme in &analysis.key_themes {
        if CUSTOMER_THEMES.contains(&theme.as_str()) {
            score += 0.15;
        }
    }

    if let Some(count) = context.stakeholder_count {
        score += (f64::from(count) * 0.05).min(0.2);
    }
    if context.executive_visibility {
        score += 0.3;
    }

    score.min(1.0)
}

fn calculate_deadline_pressure(context: &PriorityContext) -> f64 {
    match context.deadline.as_deref() {
        Some(deadline) => {
            let lower = deadline.to_lowercase();
            if lower.contains("asap") {
                1.0
            } else if lower.contains("urgent") {
                0.8
            } else {
                0.3
            }
        }
        None => 0.0,
    }
}

fn calculate_strategic_alignment(analysis: &TensionAnalysis, context: &PriorityContext) -> f64 {
    let mut score: f64 = 0.5;
    if matches!(
        analysis.tension_type,
        crate::domain::models::tension::TensionType::Opportunity
    ) {
        score += 0.2;
    }
    if context.strategic_initiative {
        score += 0.3;
    }
    if context.okr_related {
        score += 0.2;
    }
    score.min(1.0)
}

fn determine_business_context(
    analysis: &TensionAnalysis,
    title: &str,
    description: &str,
) -> BusinessContext {
    let text = format!("{title} {description}").to_lowercase();

    if analysis.key_themes.iter().any(|t| t == "Security")
        || ["security", "breach", "hack"].iter().any(|k| text.contains(k))
    {
        return BusinessContext::SecurityIncident;
    }
    if ["customer", "user", "client", "public"].iter().any(|k| text.contains(k)) {
        return BusinessContext::CustomerFacing;
    }
    if ["compliance", "regulation", "audit", "legal"].iter().any(|k| text.contains(k)) {
        return BusinessContext::ComplianceRelated;
    }
    if matches!(
        analysis.tension_type,
        crate::domain::models::tension::TensionType::Opportunity
    ) || ["innovation", "new", "experiment"].iter().any(|k| text.contains(k))
    {
        return BusinessContext::InnovationProject;
    }
    BusinessContext::InternalOperations
}

fn apply_context_adjustments(
    factors: PriorityFactors,
    business_context: BusinessContext,
) -> PriorityFactors {
    let (impact_mul, urgency_mul, complexity_mul, resource_mul, value_mul, risk_mul, stakeholder_mul) =
        match business_context {
            BusinessContext::CustomerFacing => (1.3, 1.2, 1.0, 1.0, 1.0, 1.0, 1.4),
            BusinessContext::InternalOperations => (1.0, 1.0, 1.1, 1.2, 0.9, 1.0, 1.0),
            BusinessContext::ComplianceRelated => (1.2, 1.3, 1.0, 1.0, 1.0, 1.5, 1.0),
            BusinessContext::InnovationProject => (1.0, 1.0, 1.2, 0.8, 1.4, 1.0, 1.0),
            BusinessContext::SecurityIncident => (1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
        };

    PriorityFactors {
        impact_score: (factors.impact_score * impact_mul).min(1.0),
        urgency_score: (factors.urgency_score * urgency_mul).min(1.0),
        complexity_score: (factors.complexity_score * complexity_mul).min(1.0),
        resource_availability_score: (factors.resource_availability_score * resource_mul).min(1.0),
        business_value_score: (factors.business_value_score * value_mul).min(1.0),
        risk_level_score: (factors.risk_level_score * risk_mul).min(1.0),
        stakeholder_interest_score: (factors.stakeholder_interest_score * stakeholder_mul).min(1.0),
        ..factors
    }
}

/// Context-specific weight overrides, matching `context_weight_adjustments`
/// in the original: only the named dimensions for a context are present
/// there (normalized to sum to 1.0 among themselves), and only those are
/// overwritten in a copy of `DEFAULT_WEIGHTS` — every other dimension
/// keeps its default weight rather than being zeroed out.
fn context_weights(business_context: BusinessContext) -> DimensionWeights {
    let raw: &[(&str, f64)] = match business_context {
        BusinessContext::SecurityIncident => &[("urgency", 0.4), ("risk", 0.2), ("impact", 0.3)],
        BusinessContext::CustomerFacing => &[
            ("business_value", 0.3),
            ("impact", 0.3),
            ("stakeholder", 0.2),
        ],
        _ => return DEFAULT_WEIGHTS,
    };
    let total: f64 = raw.iter().map(|(_, w)| w).sum();
    let map: HashMap<&str, f64> = raw.iter().map(|(k, w)| (*k, w / total)).collect();

    let mut weights = DEFAULT_WEIGHTS;
    for (dimension, weight) in map {
        match dimension {
            "impact" => weights.impact = weight,
            "urgency" => weights.urgency = weight,
            "complexity" => weights.complexity = weight,
            "resources" => weights.resources = weight,
            "business_value" => weights.business_value = weight,
            "risk" => weights.risk = weight,
            "stakeholder" => weights.stakeholder = weight,
            _ => unreachable!("raw tables above only name known dimensions"),
        }
    }
    weights
}

fn weighted_average(
    factors: PriorityFactors,
    business_context: BusinessContext,
) -> PriorityCalculationResult {
    // Only `security_incident` and `customer_facing` have context-specific
    // weight tables in the original; `business_critical`/`technical_debt`
    // are named in its adjustment table but never reachable from
    // `_determine_business_context`, so they are dead in the source too
    // and are not reproduced here.
    let weights = match business_context {
        BusinessContext::SecurityIncident | BusinessContext::CustomerFacing => {
            context_weights(business_context)
        }
        _ => DEFAULT_WEIGHTS,
    };

    let impact = factors.impact_score * weights.impact;
    let urgency = factors.urgency_score * weights.urgency;
    let complexity = (1.0 - factors.complexity_score) * weights.complexity;
    let resources = factors.resource_availability_score * weights.resources;
    let business_value = factors.business_value_score * weights.business_value;
    let risk = factors.risk_level_score * weights.risk;
    let stakeholder = factors.stakeholder_interest_score * weights.stakeholder;

    let weighted_score = impact + urgency + complexity + resources + business_value + risk + stakeholder;
    let contextual_boost = factors.deadline_pressure * 0.1
        + factors.dependency_factor * 0.05
        + factors.strategic_alignment * 0.05;

    let final_score = (weighted_score + contextual_boost).min(1.0) * 100.0;
    let (normalized_priority, priority_level) = normalize_priority(final_score);
    let confidence = calculate_confidence(factors);

    let mut contributing_factors = HashMap::new();
    contributing_factors.insert("impact".to_string(), impact);
    contributing_factors.insert("urgency".to_string(), urgency);
    contributing_factors.insert("complexity".to_string(), complexity);
    contributing_factors.insert("resources".to_string(), resources);
    contributing_factors.insert("business_value".to_string(), business_value);
    contributing_factors.insert("risk".to_string(), risk);
    contributing_factors.insert("stakeholder".to_string(), stakeholder);
    contributing_factors.insert("contextual_boost".to_string(), contextual_boost);

    PriorityCalculationResult {
        final_score,
        normalized_priority,
        priority_level,
        contributing_factors,
        calculation_method: String::new(),
        confidence_level: confidence,
        reasoning: String::new(),
        recommendations: Vec::new(),
    }
}

fn eisenhower_matrix(factors: PriorityFactors) -> PriorityCalculationResult {
    let importance =
        (factors.impact_score + factors.business_value_score + factors.strategic_alignment) / 3.0;
    let urgency = (factors.urgency_score + factors.deadline_pressure + factors.risk_level_score) / 3.0;

    let (final_score, normalized_priority, quadrant) = if urgency >= 0.7 && importance >= 0.7 {
        (90.0 + (urgency + importance) * 5.0, 2, "Q1")
    } else if urgency < 0.7 && importance >= 0.7 {
        (70.0 + importance * 15.0, 1, "Q2")
    } else if urgency >= 0.7 && importance < 0.7 {
        (50.0 + urgency * 15.0, 1, "Q3")
    } else {
        (30.0 + (urgency + importance) * 10.0, 0, "Q4")
    };

    let confidence = ((urgency - 0.5).abs() + (importance - 0.5).abs()).min(1.0);
    let (_, priority_level) = normalize_priority(final_score.min(100.0));

    let mut contributing_factors = HashMap::new();
    contributing_factors.insert("importance".to_string(), importance);
    contributing_factors.insert("urgency".to_string(), urgency);

    PriorityCalculationResult {
        final_score: final_score.min(100.0),
        normalized_priority,
        priority_level,
        contributing_factors,
        calculation_method: String::new(),
        confidence_level: confidence,
        reasoning: quadrant.to_string(),
        recommendations: Vec::new(),
    }
}

fn rice_framework(factors: PriorityFactors) -> PriorityCalculationResult {
    let reach = factors.stakeholder_interest_score;
    let impact = factors.impact_score;
    let confidence =
        (factors.impact_score + factors.urgency_score + factors.business_value_score) / 3.0;
    let effort = factors.complexity_score.max(0.1);

    let rice_score = (reach * impact * confidence) / effort;
    let final_score = (rice_score * 100.0).min(100.0);
    let (normalized_priority, priority_level) = normalize_priority(final_score);

    let mut contributing_factors = HashMap::new();
    contributing_factors.insert("reach".to_string(), reach);
    contributing_factors.insert("impact".to_string(), impact);
    contributing_factors.insert("confidence".to_string(), confidence);
    contributing_factors.insert("effort".to_string(), effort);
    contributing_factors.insert("rice_score".to_string(), rice_score);

    PriorityCalculationResult {
        final_score,
        normalized_priority,
        priority_level,
        contributing_factors,
        calculation_method: String::new(),
        confidence_level: confidence,
        reasoning: String::new(),
        recommendations: Vec::new(),
    }
}

fn value_complexity(factors: PriorityFactors) -> PriorityCalculationResult {
    let value =
        (factors.business_value_score + factors.impact_score + factors.strategic_alignment) / 3.0;
    let complexity = factors.complexity_score;

    let (final_score, normalized_priority) = if value >= 0.7 && complexity <= 0.3 {
        (85.0 + value * 10.0, 2)
    } else if value >= 0.7 && complexity > 0.3 {
        (75.0 + (value - complexity) * 10.0, 1)
    } else if value < 0.7 && complexity <= 0.3 {
        (45.0 + value * 15.0, 0)
    } else {
        (25.0 + (value - complexity) * 20.0, 0)
    };

    let final_score = final_score.clamp(0.0, 100.0);
    let (_, priority_level) = normalize_priority(final_score);
    let confidence = ((value - 0.5).abs() + (complexity - 0.5).abs()).min(1.0);

    let mut contributing_factors = HashMap::new();
    contributing_factors.insert("value".to_string(), value);
    contributing_factors.insert("complexity".to_string(), complexity);
    contributing_factors.insert(
        "value_complexity_ratio".to_string(),
        value / complexity.max(0.1),
    );

    PriorityCalculationResult {
        final_score,
        normalized_priority,
        priority_level,
        contributing_factors,
        calculation_method: String::new(),
        confidence_level: confidence,
        reasoning: String::new(),
        recommendations: Vec::new(),
    }
}

fn risk_adjusted(factors: PriorityFactors) -> PriorityCalculationResult {
    let base_priority =
        (factors.impact_score + factors.urgency_score + factors.business_value_score) / 3.0;
    let risk_adjustment = factors.risk_level_score * 0.3;
    let resource_adjustment = (1.0 - factors.resource_availability_score) * 0.2;

    let final_score = ((base_priority + risk_adjustment - resource_adjustment) * 100.0).clamp(0.0, 100.0);
    let (normalized_priority, priority_level) = normalize_priority(final_score);
    let confidence =
        (base_priority + factors.risk_level_score + factors.resource_availability_score) / 3.0;

    let mut contributing_factors = HashMap::new();
    contributing_factors.insert("base_priority".to_string(), base_priority);
    contributing_factors.insert("risk_adjustment".to_string(), risk_adjustment);
    contributing_factors.insert("resource_adjustment".to_string(), resource_adjustment);

    PriorityCalculationResult {
        final_score,
        normalized_priority,
        priority_level,
        contributing_factors,
        calculation_method: String::new(),
        confidence_level: confidence,
        reasoning: String::new(),
        recommendations: Vec::new(),
    }
}

fn calculate_confidence(factors: PriorityFactors) -> f64 {
    let values = [
        factors.impact_score,
        factors.urgency_score,
        factors.business_value_score,
        factors.complexity_score,
        factors.resource_availability_score,
        factors.risk_level_score,
        factors.stakeholder_interest_score,
    ];
    let extremeness: f64 =
        values.iter().map(|v| (v - 0.5).abs() * 2.0).sum::<f64>() / values.len() as f64;
    (extremeness + 0.3).min(1.0)
}

fn generate_reasoning(business_context: BusinessContext, result: &PriorityCalculationResult) -> String {
    let mut top_factors: Vec<(&String, &f64)> = result.contributing_factors.iter().collect();
    top_factors.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    let factor_names: Vec<String> = top_factors
        .into_iter()
        .take(3)
        .map(|(name, value)| format!("{name} ({value:.2})"))
        .collect();

    format!(
        "Priority calculated using {} method with {:.1}% confidence. Business context identified as '{}' affecting weight distribution. Primary contributing factors: {}. Final score: {:.1}/100 \u{2192} {} priority.",
        result.calculation_method,
        result.confidence_level * 100.0,
        business_context.as_str(),
        factor_names.join(", "),
        result.final_score,
        result.priority_level.as_str(),
    )
}

fn generate_recommendations(
    result: &PriorityCalculationResult,
    factors: PriorityFactors,
    business_context: BusinessContext,
) -> Vec<String> {
    let mut recs = Vec::new();

    match result.normalized_priority {
        2 => {
            recs.push("Immediate attention required - allocate dedicated resources".to_string());
            recs.push("Consider escalating to stakeholders".to_string());
        }
        1 => {
            recs.push("Schedule for next sprint/iteration".to_string());
            recs.push("Ensure adequate resource allocation".to_string());
        }
        _ => {
            recs.push("Add to backlog for future consideration".to_string());
            recs.push("Monitor for changes in priority factors".to_string());
        }
    }

    if factors.complexity_score > 0.7 {
        recs.push("Break down into smaller, manageable tasks".to_string());
        recs.push("Consider proof-of-concept or pilot approach".to_string());
    }
    if factors.resource_availability_score < 0.3 {
        recs.push("Secure additional resources before starting".to_string());
        recs.push("Consider external expertise or consulting".to_string());
    }
    if factors.risk_level_score > 0.7 {
        recs.push("Develop comprehensive risk mitigation plan".to_string());
        recs.push("Implement monitoring and early warning systems".to_string());
    }

    match business_context {
        BusinessContext::SecurityIncident => {
            recs.push("Follow security incident response procedures".to_string());
            recs.push("Communicate with security team immediately".to_string());
        }
        BusinessContext::CustomerFacing => {
            recs.push("Prioritize customer communication and updates".to_string());
            recs.push("Monitor customer impact metrics closely".to_string());
        }
        _ => {}
    }

    recs.sort();
    recs.dedup();
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reasoning::tension_analyzer::TensionAnalyzer;

    #[test]
    fn critical_outage_scores_in_critical_band() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze(
            "Production system down",
            "The payment system crashed, customers cannot check out, security team is engaged.",
        );
        let calculator = PriorityCalculator::new();
        let result = calculator.calculate_priority(
            &analysis,
            "Production system down",
            "The payment system crashed, customers cannot check out, security team is engaged.",
            &PriorityContext::default(),
            PriorityMethod::WeightedAverage,
        );
        assert_eq!(result.normalized_priority, 2);
        assert!(result.final_score >= 80.0);
    }

    #[test]
    fn low_stakes_idea_scores_low() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze(
            "Minor tooltip suggestion",
            "We could try a small tooltip for onboarding.",
        );
        let calculator = PriorityCalculator::new();
        let result = calculator.calculate_priority(
            &analysis,
            "Minor tooltip suggestion",
            "We could try a small tooltip for onboarding.",
            &PriorityContext::default(),
            PriorityMethod::WeightedAverage,
        );
        assert!(result.final_score < 60.0);
    }

    #[test]
    fn all_five_methods_produce_scores_in_range() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze("API latency", "The API is slow under load.");
        let calculator = PriorityCalculator::new();
        for method in [
            PriorityMethod::WeightedAverage,
            PriorityMethod::EisenhowerMatrix,
            PriorityMethod::RiceFramework,
            PriorityMethod::ValueComplexity,
            PriorityMethod::RiskAdjusted,
        ] {
            let result = calculator.calculate_priority(
                &analysis,
                "API latency",
                "The API is slow under load.",
                &PriorityContext::default(),
                method,
            );
            assert!((0.0..=100.0).contains(&result.final_score), "{method:?} out of range");
        }
    }

    #[test]
    fn method_round_trips_through_as_str() {
        assert_eq!(
            PriorityMethod::parse_str("rice_framework"),
            Some(PriorityMethod::RiceFramework)
        );
        assert_eq!(PriorityMethod::RiceFramework.as_str(), "rice_framework");
    }
}
