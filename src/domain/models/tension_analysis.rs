//! Result of running a `Tension` through the tension analyzer.

use serde::{Deserialize, Serialize};

/// Ordinal impact level, 1 (low) through 4 (critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

/// Ordinal urgency level, 1 (low) through 4 (critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl ImpactLevel {
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl UrgencyLevel {
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// The structured output of analyzing a tension's text: classification,
/// impact/urgency assessment, extracted themes and entities, and a
/// suggested priority ordinal used to seed the priority calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensionAnalysis {
    pub tension_type: super::tension::TensionType,
    pub impact_level: ImpactLevel,
    pub urgency_level: UrgencyLevel,
    /// Classifier confidence in `tension_type`, in `[0.0, 0.95]`.
    pub confidence_score: f64,
    pub key_themes: Vec<String>,
    pub extracted_entities: Vec<String>,
    /// 0 = normal, 1 = high, 2 = critical.
    pub suggested_priority: u8,
    /// Human-readable justification, assembled from the classification,
    /// impact/urgency and theme findings.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_and_urgency_order_by_ordinal() {
        assert!(ImpactLevel::Critical > ImpactLevel::High);
        assert!(UrgencyLevel::Low < UrgencyLevel::Medium);
        assert_eq!(ImpactLevel::Critical.value(), 4);
    }
}
