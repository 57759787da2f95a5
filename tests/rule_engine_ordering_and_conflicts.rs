//! Integration tests for rule evaluation ordering and conflict
//! detection (§4.2, testable property 3).

use reasoning_core::domain::models::rule::{BusinessRule, Operator, RuleAction, RuleCondition, RuleType};
use reasoning_core::domain::reasoning::rule_engine::RuleEngine;
use serde_json::json;

fn rule_with(id: &str, priority: i32, field: &str, action: &str) -> BusinessRule {
    BusinessRule::new(id, id, RuleType::Action)
        .with_priority(priority)
        .with_conditions(vec![RuleCondition::new(field, Operator::Equals, json!(true))])
        .with_actions(vec![RuleAction::new(action, Default::default())])
}

#[test]
fn matching_rules_are_reported_in_ascending_priority_order() {
    let mut engine = RuleEngine::empty();
    engine.add_rule(rule_with("low_priority", 10, "flag", "noop"));
    engine.add_rule(rule_with("high_priority", 1, "flag", "noop"));
    engine.add_rule(rule_with("mid_priority", 5, "flag", "noop"));

    let context = json!({"flag": true});
    let matches = engine.evaluate_rules(&context, None);

    let ids: Vec<&str> = matches.iter().map(|m| m.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["high_priority", "mid_priority", "low_priority"]);
}

#[test]
fn disabled_rules_never_match() {
    let mut engine = RuleEngine::empty();
    let mut rule = rule_with("disabled_rule", 1, "flag", "noop");
    rule.enabled = false;
    engine.add_rule(rule);

    let matches = engine.evaluate_rules(&json!({"flag": true}), None);
    assert!(matches.is_empty());
}

#[test]
fn conflicting_action_pair_is_detected_once() {
    let mut engine = RuleEngine::empty();
    engine.add_rule(rule_with("escalate", 1, "shared_field", "escalate_tension"));
    engine.add_rule(rule_with("deescalate", 2, "shared_field", "de_escalate_tension"));

    let conflicts = engine.detect_rule_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].conflict_type, "conflicting_actions");
}

#[test]
fn rules_without_shared_fields_never_conflict() {
    let mut engine = RuleEngine::empty();
    engine.add_rule(rule_with("escalate", 1, "field_a", "escalate_tension"));
    engine.add_rule(rule_with("deescalate", 2, "field_b", "de_escalate_tension"));

    assert!(engine.detect_rule_conflicts().is_empty());
}

#[test]
fn default_rule_set_has_five_rules() {
    let engine = RuleEngine::new();
    let summary = engine.get_rules_summary();
    assert_eq!(summary.total_rules, 5);
    assert_eq!(summary.enabled_rules, 5);
}

#[test]
fn validate_rule_flags_duplicate_id_and_empty_fields() {
    let engine = RuleEngine::new();
    let duplicate = BusinessRule::new(
        "critical_tension_escalation",
        "Duplicate",
        RuleType::Action,
    );
    let result = engine.validate_rule(&duplicate);
    assert!(!result.valid);
    assert!(!result.errors.is_empty());

    let sparse = BusinessRule::new("new_rule", "New Rule", RuleType::Action);
    let sparse_result = engine.validate_rule(&sparse);
    assert!(sparse_result.valid);
    assert_eq!(sparse_result.warnings.len(), 2);
}
