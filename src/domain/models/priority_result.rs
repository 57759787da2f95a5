//! Priority calculation result model (§3.5, §4.4).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Human-facing priority band, consistent with `final_score` bands
/// (§4.4 priority normalization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Output of [`super::super::reasoning::priority_calculator::PriorityCalculator::calculate_priority`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityCalculationResult {
    /// `[0.0, 100.0]`.
    pub final_score: f64,
    /// 0, 1, or 2 (normal, high, critical).
    pub normalized_priority: u8,
    pub priority_level: PriorityLevel,
    pub contributing_factors: HashMap<String, f64>,
    pub calculation_method: String,
    /// `[0.0, 1.0]`.
    pub confidence_level: f64,
    pub reasoning: String,
    pub recommendations: Vec<String>,
}

/// Normalize a 0-100 score to `(normalized_priority, priority_level)`
/// per the shared band table in §4.4: >=80 Critical, >=60 High, >=40
/// Medium, else Low.
pub fn normalize_priority(score: f64) -> (u8, PriorityLevel) {
    if score >= 80.0 {
        (2, PriorityLevel::Critical)
    } else if score >= 60.0 {
        (1, PriorityLevel::High)
    } else if score >= 40.0 {
        (0, PriorityLevel::Medium)
    } else {
        (0, PriorityLevel::Low)
    }
}
