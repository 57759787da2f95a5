//! Business rule model for the declarative rule engine (§3.3, §4.2).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category a [`BusinessRule`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Condition,
    Action,
    Validation,
    Escalation,
}

/// Comparison applied by a [`RuleCondition`] to a looked-up field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    NotContains,
    In,
    NotIn,
}

/// A single predicate evaluated against a dotted-path field in the
/// evaluation context. All conditions in a rule combine with AND.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl RuleCondition {
    pub fn new(field: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

/// An action a matched rule emits. Execution is side-effect free: it
/// returns a structured record rather than mutating anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleAction {
    pub action_type: String,
    pub parameters: serde_json::Map<String, Value>,
}

impl RuleAction {
    pub fn new(action_type: impl Into<String>, parameters: serde_json::Map<String, Value>) -> Self {
        Self {
            action_type: action_type.into(),
            parameters,
        }
    }
}

/// A declarative (conditions, actions) pair evaluated by the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rule_type: RuleType,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    /// Lower is evaluated first.
    pub priority: i32,
    pub enabled: bool,
}

impl BusinessRule {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            rule_type,
            conditions: Vec::new(),
            actions: Vec::new(),
            priority: 0,
            enabled: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<RuleCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_actions(mut self, actions: Vec<RuleAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Record produced by evaluating one matched rule's actions against a
/// context snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatchRecord {
    pub rule_id: String,
    pub rule_name: String,
    pub rule_type: RuleType,
    pub matched: bool,
    pub actions_executed: usize,
    pub action_results: Vec<ActionResult>,
}

/// The structured result of one action execution: the action that ran,
/// its parameters, and a snapshot of the context it ran against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_type: String,
    pub parameters: serde_json::Map<String, Value>,
    pub context_snapshot: Value,
    pub executed: bool,
}

/// One conflicting pair found by [`super::super::reasoning::rule_engine::RuleEngine::detect_rule_conflicts`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConflict {
    pub rule1_id: String,
    pub rule1_name: String,
    pub rule2_id: String,
    pub rule2_name: String,
    pub conflict_type: String,
    pub description: String,
}

/// Result of validating a single rule for structural correctness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Aggregate view over the rules currently loaded in a `RuleEngine`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesSummary {
    pub total_rules: usize,
    pub rules_by_type: std::collections::HashMap<String, usize>,
    pub enabled_rules: usize,
    pub disabled_rules: usize,
    pub rule_ids: Vec<String>,
}
