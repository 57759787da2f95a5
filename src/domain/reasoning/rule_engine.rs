//! RuleEngine (C2): declarative condition/action rules evaluated against
//! a JSON evaluation context built from a tension and its analysis.
//!
//! Grounded on `original_source/trm_api/reasoning/rule_engine.py`. The
//! five built-in rules are carried verbatim; rule-conflict handling
//! follows Open Question resolution (a) in SPEC_FULL §9: both rules in
//! a conflicting pair still execute (the engine never silently drops a
//! match), conflicts are surfaced separately via [`RuleEngine::detect_rule_conflicts`]
//! for the coordinator to report as non-fatal.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::domain::models::rule::{
    ActionResult, BusinessRule, Operator, RuleAction, RuleCondition, RuleConflict, RuleMatchRecord,
    RuleType, RuleValidation, RulesSummary,
};

const CONFLICTING_ACTION_PAIRS: &[(&str, &str)] = &[
    ("escalate_tension", "de_escalate_tension"),
    ("assign_to_team", "unassign_from_team"),
    ("increase_priority", "decrease_priority"),
];

/// Rule-based decision engine (§4.2).
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: HashMap<String, BusinessRule>,
}

impl Default for RuleEngine {
    /// Seeds the five built-in rules, matching the original's
    /// `_initialize_default_rules`. Use [`RuleEngine::empty`] to start
    /// with no rules (e.g. when `rule_engine_defaults_enabled` is false).
    fn default() -> Self {
        let mut engine = Self::empty();
        for rule in default_rules() {
            engine.add_rule(rule);
        }
        engine
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn add_rule(&mut self, rule: BusinessRule) {
        self.rules.insert(rule.id.clone(), rule);
    }

    pub fn remove_rule(&mut self, rule_id: &str) -> bool {
        self.rules.remove(rule_id).is_some()
    }

    pub fn get_rule(&self, rule_id: &str) -> Option<&BusinessRule> {
        self.rules.get(rule_id)
    }

    /// Evaluate every enabled rule (optionally filtered by
    /// [`RuleType`]) against `context`, sorted by ascending priority
    /// (lower priority value runs, and therefore is reported, first).
    pub fn evaluate_rules(
        &self,
        context: &Value,
        rule_type: Option<RuleType>,
    ) -> Vec<RuleMatchRecord> {
        let mut rules: Vec<&BusinessRule> = self
            .rules
            .values()
            .filter(|r| rule_type.is_none_or(|t| r.rule_type == t))
            .collect();
        rules.sort_by_key(|r| r.priority);

        rules
            .into_iter()
            .filter_map(|rule| {
                if !evaluate_rule(rule, context) {
                    return None;
                }
                let action_results = execute_actions(rule, context);
                Some(RuleMatchRecord {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    rule_type: rule.rule_type,
                    matched: true,
                    actions_executed: action_results.len(),
                    action_results,
                })
            })
            .collect()
    }

    pub fn validate_rule(&self, rule: &BusinessRule) -> RuleValidation {
        let mut result = RuleValidation {
            valid: true,
            ..Default::default()
        };

        if rule.id.is_empty() {
            result.errors.push("Rule ID is required".to_string());
            result.valid = false;
        }
        if rule.name.is_empty() {
            result.errors.push("Rule name is required".to_string());
            result.valid = false;
        }
        if rule.conditions.is_empty() {
            result.warnings.push("Rule has no conditions".to_string());
        }
        if rule.actions.is_empty() {
            result.warnings.push("Rule has no actions".to_string());
        }
        if let Some(existing) = self.rules.get(&rule.id) {
            if existing.id != rule.id || existing.name != rule.name {
                result
                    .errors
                    .push(format!("Rule ID '{}' already exists", rule.id));
                result.valid = false;
            }
        }

        result
    }

    /// Finds rule pairs that share at least one condition field and
    /// carry opposed action types (§4.2). Both rules in a pair still run
    /// during `evaluate_rules`; this is reporting only.
    pub fn detect_rule_conflicts(&self) -> Vec<RuleConflict> {
        let rules: Vec<&BusinessRule> = self.rules.values().collect();
        let mut conflicts = Vec::new();

        for (i, rule1) in rules.iter().enumerate() {
            for rule2 in &rules[i + 1..] {
                if rules_have_conflicting_actions(rule1, rule2) {
                    conflicts.push(RuleConflict {
                        rule1_id: rule1.id.clone(),
                        rule1_name: rule1.name.clone(),
                        rule2_id: rule2.id.clone(),
                        rule2_name: rule2.name.clone(),
                        conflict_type: "conflicting_actions".to_string(),
                        description: "Rules may have conflicting actions for same conditions"
                            .to_string(),
                    });
                }
            }
        }
        conflicts
    }

    pub fn get_rules_summary(&self) -> RulesSummary {
        let mut rules_by_type = HashMap::new();
        for rule_type in [
            RuleType::Condition,
            RuleType::Action,
            RuleType::Validation,
            RuleType::Escalation,
        ] {
            let count = self.rules.values().filter(|r| r.rule_type == rule_type).count();
            rules_by_type.insert(type_name(rule_type).to_string(), count);
        }

        RulesSummary {
            total_rules: self.rules.len(),
            rules_by_type,
            enabled_rules: self.rules.values().filter(|r| r.enabled).count(),
            disabled_rules: self.rules.values().filter(|r| !r.enabled).count(),
            rule_ids: self.rules.keys().cloned().collect(),
        }
    }
}

fn type_name(rule_type: RuleType) -> &'static str {
    match rule_type {
        RuleType::Condition => "condition",
        RuleType::Action => "action",
        RuleType::Validation => "validation",
        RuleType::Escalation => "escalation",
    }
}

fn evaluate_rule(rule: &BusinessRule, context: &Value) -> bool {
    rule.enabled && rule.conditions.iter().all(|c| evaluate_condition(c, context))
}

fn evaluate_condition(condition: &RuleCondition, context: &Value) -> bool {
    let field_value = get_field_value(context, &condition.field);
    match condition.operator {
        Operator::Equals => field_value.as_ref() == Some(&condition.value),
        Operator::NotEquals => field_value.as_ref() != Some(&condition.value),
        Operator::GreaterThan => compare_numeric(&field_value, &condition.value, |a, b| a > b),
        Operator::LessThan => compare_numeric(&field_value, &condition.value, |a, b| a < b),
        Operator::Contains => contains_substring(&field_value, &condition.value),
        Operator::NotContains => !contains_substring(&field_value, &condition.value),
        Operator::In => member_of(&condition.value, &field_value),
        Operator::NotIn => !member_of(&condition.value, &field_value),
    }
}

fn get_field_value(context: &Value, field_path: &str) -> Option<Value> {
    let mut current = context;
    for key in field_path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current.clone())
}

fn compare_numeric(field_value: &Option<Value>, rhs: &Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (field_value.as_ref().and_then(Value::as_f64), rhs.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

fn contains_substring(field_value: &Option<Value>, needle: &Value) -> bool {
    let haystack = match field_value {
        Some(Value::String(s)) => s.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
        None => return false,
    };
    let needle = match needle {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    };
    haystack.contains(&needle)
}

fn member_of(collection: &Value, field_value: &Option<Value>) -> bool {
    match (collection.as_array(), field_value) {
        (Some(items), Some(v)) => items.contains(v),
        _ => false,
    }
}

fn execute_actions(rule: &BusinessRule, context: &Value) -> Vec<ActionResult> {
    rule.actions
        .iter()
        .map(|action| execute_action(action, context))
        .collect()
}

fn execute_action(action: &RuleAction, context: &Value) -> ActionResult {
    ActionResult {
        action_type: action.action_type.clone(),
        parameters: action.parameters.clone(),
        context_snapshot: context.clone(),
        executed: true,
    }
}

fn rules_have_conflicting_actions(rule1: &BusinessRule, rule2: &BusinessRule) -> bool {
    let fields1: std::collections::HashSet<&str> =
        rule1.conditions.iter().map(|c| c.field.as_str()).collect();
    let fields2: std::collections::HashSet<&str> =
        rule2.conditions.iter().map(|c| c.field.as_str()).collect();

    if fields1.is_disjoint(&fields2) {
        return false;
    }

    let actions1: std::collections::HashSet<&str> =
        rule1.actions.iter().map(|a| a.action_type.as_str()).collect();
    let actions2: std::collections::HashSet<&str> =
        rule2.actions.iter().map(|a| a.action_type.as_str()).collect();

    actions1.iter().any(|a1| {
        actions2.iter().any(|a2| {
            CONFLICTING_ACTION_PAIRS
                .iter()
                .any(|(x, y)| (*x == *a1 && *y == *a2) || (*x == *a2 && *y == *a1))
        })
    })
}

fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
}

fn default_rules() -> Vec<BusinessRule> {
    vec![
        BusinessRule::new(
            "critical_tension_escalation",
            "Critical Tension Auto-Escalation",
            RuleType::Escalation,
        )
        .with_description("Automatically escalate tensions with critical priority")
        .with_conditions(vec![
            RuleCondition::new("analysis.suggested_priority", Operator::Equals, json!(2)),
            RuleCondition::new(
                "analysis.impact_level.value",
                Operator::GreaterThan,
                json!(3),
            ),
        ])
        .with_actions(vec![
            RuleAction::new(
                "escalate_tension",
                params(&[
                    ("escalation_level", json!("critical")),
                    ("notify_stakeholders", json!(true)),
                    ("create_incident", json!(true)),
                ]),
            ),
            RuleAction::new("update_priority", params(&[("priority", json!(2))])),
        ])
        .with_priority(1),
        BusinessRule::new(
            "security_tension_handling",
            "Security Tension Special Handling",
            RuleType::Action,
        )
        .with_description("Special handling for security-related tensions")
        .with_conditions(vec![RuleCondition::new(
            "analysis.key_themes",
            Operator::Contains,
            json!("Security"),
        )])
        .with_actions(vec![
            RuleAction::new(
                "assign_security_team",
                params(&[("team", json!("security")), ("sla", json!("4_hours"))]),
            ),
            RuleAction::new(
                "create_security_ticket",
                params(&[("classification", json!("security_review"))]),
            ),
        ])
        .with_priority(2),
        BusinessRule::new(
            "high_business_impact",
            "High Business Impact Tension",
            RuleType::Action,
        )
        .with_description("Handle high business impact tensions")
        .with_conditions(vec![
            RuleCondition::new("analysis.key_themes", Operator::Contains, json!("Business")),
            RuleCondition::new(
                "analysis.impact_level.value",
                Operator::GreaterThan,
                json!(2),
            ),
        ])
        .with_actions(vec![
            RuleAction::new(
                "notify_business_stakeholders",
                params(&[(
                    "stakeholder_groups",
                    json!(["product_owners", "business_analysts"]),
                )]),
            ),
            RuleAction::new(
                "schedule_review",
                params(&[
                    ("review_type", json!("business_impact_assessment")),
                    ("timeline", json!("24_hours")),
                ]),
            ),
        ])
        .with_priority(3),
        BusinessRule::new(
            "tech_debt_identification",
            "Technology Debt Identification",
            RuleType::Validation,
        )
        .with_description("Identify and tag technology debt tensions")
        .with_conditions(vec![
            RuleCondition::new(
                "analysis.tension_type.value",
                Operator::Equals,
                json!("Problem"),
            ),
            RuleCondition::new(
                "analysis.key_themes",
                Operator::Contains,
                json!("Technology"),
            ),
            RuleCondition::new("title", Operator::Contains, json!("technical debt")),
        ])
        .with_actions(vec![
            RuleAction::new("add_tag", params(&[("tag", json!("technical_debt"))])),
            RuleAction::new("assign_to_team", params(&[("team", json!("architecture"))])),
        ])
        .with_priority(4),
        BusinessRule::new(
            "opportunity_prioritization",
            "Opportunity Prioritization",
            RuleType::Action,
        )
        .with_description("Prioritize opportunity-type tensions")
        .with_conditions(vec![RuleCondition::new(
            "analysis.tension_type.value",
            Operator::Equals,
            json!("Opportunity"),
        )])
        .with_actions(vec![
            RuleAction::new(
                "add_to_backlog",
                params(&[
                    ("backlog_type", json!("opportunity")),
                    ("review_cycle", json!("monthly")),
                ]),
            ),
            RuleAction::new(
                "calculate_roi_estimate",
                params(&[("estimation_method", json!("basic"))]),
            ),
        ])
        .with_priority(5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critical_context() -> Value {
        json!({
            "title": "Production outage",
            "analysis": {
                "suggested_priority": 2,
                "impact_level": {"value": 4},
                "key_themes": ["Technology", "Security"],
                "tension_type": {"value": "Problem"},
            }
        })
    }

    #[test]
    fn default_engine_seeds_five_rules() {
        let engine = RuleEngine::new();
        assert_eq!(engine.get_rules_summary().total_rules, 5);
    }

    #[test]
    fn critical_context_matches_escalation_and_security_rules() {
        let engine = RuleEngine::new();
        let matches = engine.evaluate_rules(&critical_context(), None);
        let ids: Vec<&str> = matches.iter().map(|m| m.rule_id.as_str()).collect();
        assert!(ids.contains(&"critical_tension_escalation"));
        assert!(ids.contains(&"security_tension_handling"));
    }

    #[test]
    fn matches_are_sorted_by_ascending_priority() {
        let engine = RuleEngine::new();
        let matches = engine.evaluate_rules(&critical_context(), None);
        let priorities: Vec<i32> = matches
            .iter()
            .map(|m| engine.get_rule(&m.rule_id).unwrap().priority)
            .collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn opportunity_type_only_matches_opportunity_rule() {
        let engine = RuleEngine::new();
        let context = json!({
            "title": "New market idea",
            "analysis": {
                "suggested_priority": 0,
                "impact_level": {"value": 1},
                "key_themes": ["General"],
                "tension_type": {"value": "Opportunity"},
            }
        });
        let matches = engine.evaluate_rules(&context, None);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_id, "opportunity_prioritization");
    }

    #[test]
    fn conflicting_rules_are_detected_but_both_still_evaluate() {
        let mut engine = RuleEngine::empty();
        engine.add_rule(
            BusinessRule::new("r1", "Escalate on theme", RuleType::Action)
                .with_conditions(vec![RuleCondition::new(
                    "analysis.key_themes",
                    Operator::Contains,
                    json!("Security"),
                )])
                .with_actions(vec![RuleAction::new("escalate_tension", Map::new())]),
        );
        engine.add_rule(
            BusinessRule::new("r2", "De-escalate on theme", RuleType::Action)
                .with_conditions(vec![RuleCondition::new(
                    "analysis.key_themes",
                    Operator::Contains,
                    json!("Security"),
                )])
                .with_actions(vec![RuleAction::new("de_escalate_tension", Map::new())]),
        );

        let conflicts = engine.detect_rule_conflicts();
        assert_eq!(conflicts.len(), 1);

        let context = json!({"analysis": {"key_themes": ["Security"]}});
        let matches = engine.evaluate_rules(&context, None);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn validate_rule_flags_missing_id() {
        let engine = RuleEngine::empty();
        let rule = BusinessRule::new("", "Nameless", RuleType::Action);
        let result = engine.validate_rule(&rule);
        assert!(!result.valid);
        assert!(!result.errors.is_empty());
    }
}
