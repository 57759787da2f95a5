//! End-to-end scenario tests for the reasoning pipeline, mirroring the
//! literal inputs/outputs catalogued against each stage of C1-C5.

use reasoning_core::domain::models::tension::TensionType;
use reasoning_core::domain::reasoning::priority_calculator::{
    PriorityCalculator, PriorityContext, PriorityMethod,
};
use reasoning_core::domain::reasoning::rule_engine::RuleEngine;
use reasoning_core::domain::reasoning::solution_generator::SolutionGenerator;
use reasoning_core::domain::reasoning::tension_analyzer::TensionAnalyzer;
use serde_json::json;

fn rule_context(analysis: &reasoning_core::domain::models::TensionAnalysis, title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "analysis": {
            "tension_type": {"value": analysis.tension_type.label()},
            "impact_level": {"value": analysis.impact_level.value()},
            "urgency_level": {"value": analysis.urgency_level.value()},
            "suggested_priority": analysis.suggested_priority,
            "key_themes": analysis.key_themes,
        },
    })
}

#[test]
fn scenario_1_critical_api_outage() {
    let analyzer = TensionAnalyzer::new();
    let title = "API Server Down";
    let description = "The main API server is not responding and showing error messages";
    let analysis = analyzer.analyze(title, description);

    assert_eq!(analysis.tension_type, TensionType::Problem);
    assert!(analysis.impact_level.value() >= 3, "expected High/Critical impact, got {:?}", analysis.impact_level);
    assert!(analysis.urgency_level.value() >= 3, "expected High/Critical urgency, got {:?}", analysis.urgency_level);
    assert!(analysis.key_themes.iter().any(|t| t == "Technology"));
    assert!(analysis.suggested_priority >= 1);

    let rules = RuleEngine::new();
    let context = rule_context(&analysis, title);
    let matches = rules.evaluate_rules(&context, None);
    assert!(
        matches.iter().any(|m| m.rule_id == "critical_tension_escalation"),
        "expected critical escalation rule to match, got {:?}",
        matches.iter().map(|m| m.rule_id.as_str()).collect::<Vec<_>>()
    );

    let solutions = SolutionGenerator::new().generate_solutions(&analysis, title, description);
    assert!(!solutions.is_empty());
    use reasoning_core::domain::models::solution::SolutionType;
    assert!(solutions
        .iter()
        .any(|s| matches!(s.solution_type, SolutionType::ImmediateAction | SolutionType::TechnologySolution)));

    let priority = PriorityCalculator::new().calculate_priority(
        &analysis,
        title,
        description,
        &PriorityContext::default(),
        PriorityMethod::WeightedAverage,
    );
    assert!(priority.final_score >= 70.0, "expected final_score >= 70, got {}", priority.final_score);
}

#[test]
fn scenario_2_low_stakes_ux_suggestion() {
    let analyzer = TensionAnalyzer::new();
    let title = "Improve User Experience";
    let description = "We could enhance the user interface to improve customer satisfaction and engagement";
    let analysis = analyzer.analyze(title, description);

    assert_eq!(analysis.tension_type, TensionType::Opportunity);
    assert!(analysis.impact_level.value() <= 2, "expected Low/Medium impact, got {:?}", analysis.impact_level);
    assert!(analysis.confidence_score >= 0.3);
    assert!(analysis.reasoning.to_lowercase().contains("opportunity"));

    let rules = RuleEngine::new();
    let context = rule_context(&analysis, title);
    let matches = rules.evaluate_rules(&context, None);
    assert!(!matches.iter().any(|m| m.rule_id == "critical_tension_escalation"));
}

#[test]
fn scenario_3_security_vulnerability() {
    let analyzer = TensionAnalyzer::new();
    let title = "Potential Security Vulnerability";
    let description = "Security audit revealed potential vulnerability in authentication system";
    let analysis = analyzer.analyze(title, description);

    assert!(analysis.key_themes.iter().any(|t| t == "Security"));
    assert!(analysis.impact_level.value() >= 3);
    assert!(analysis.suggested_priority >= 1);

    let rules = RuleEngine::new();
    let context = rule_context(&analysis, title);
    let matches = rules.evaluate_rules(&context, None);
    assert!(matches.iter().any(|m| m.rule_id == "security_tension_handling"));

    let priority = PriorityCalculator::new().calculate_priority(
        &analysis,
        title,
        description,
        &PriorityContext::default(),
        PriorityMethod::WeightedAverage,
    );
    assert!(priority
        .recommendations
        .iter()
        .any(|r| r.to_lowercase().contains("security"))
        || analysis.key_themes.iter().any(|t| t == "Security"));
}

#[test]
fn confidence_score_is_capped_and_nonnegative() {
    let analyzer = TensionAnalyzer::new();
    let cases = [
        ("", ""),
        ("Critical critical critical outage", "critical critical critical critical"),
        ("Random words here", "nothing matches any keyword set at all"),
    ];
    for (title, description) in cases {
        let analysis = analyzer.analyze(title, description);
        assert!(analysis.confidence_score <= 0.95);
        assert!(analysis.confidence_score >= 0.0);
    }
}

#[test]
fn empty_input_yields_unknown_low_confidence_analysis() {
    let analyzer = TensionAnalyzer::new();
    let analysis = analyzer.analyze("", "");
    assert_eq!(analysis.tension_type, TensionType::Unknown);
    assert_eq!(analysis.confidence_score, 0.5);
}
