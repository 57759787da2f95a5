//! Tension domain model.
//!
//! A tension is the raw unit of work fed into the reasoning pipeline:
//! a problem, opportunity, risk, conflict or idea surfaced somewhere in
//! the organization, described in free text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a tension's nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensionType {
    /// Something broken or failing.
    Problem,
    /// Something that could be improved or seized upon.
    Opportunity,
    /// Something that could go wrong.
    Risk,
    /// A disagreement or contradiction between parties or plans.
    Conflict,
    /// A proposal or suggestion.
    Idea,
    /// A shortage of people, time, or budget.
    ResourceConstraint,
    /// A workflow or procedure that could run better.
    ProcessImprovement,
    /// A failure of information to reach the people who need it.
    CommunicationBreakdown,
    /// Work that pulls in a different direction from stated goals.
    StrategicMisalignment,
    /// Accumulated shortcuts that slow future work.
    TechnicalDebt,
    /// A request to examine or interpret data.
    DataAnalysis,
    /// Could not be classified with any confidence.
    Unknown,
}

impl Default for TensionType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl TensionType {
    /// Stable lowercase identifier, e.g. for log fields or storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Opportunity => "opportunity",
            Self::Risk => "risk",
            Self::Conflict => "conflict",
            Self::Idea => "idea",
            Self::ResourceConstraint => "resource_constraint",
            Self::ProcessImprovement => "process_improvement",
            Self::CommunicationBreakdown => "communication_breakdown",
            Self::StrategicMisalignment => "strategic_misalignment",
            Self::TechnicalDebt => "technical_debt",
            Self::DataAnalysis => "data_analysis",
            Self::Unknown => "unknown",
        }
    }

    /// The title-case label the original analyzer used in human-readable
    /// reasoning text (e.g. "Problem", "Opportunity").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Problem => "Problem",
            Self::Opportunity => "Opportunity",
            Self::Risk => "Risk",
            Self::Conflict => "Conflict",
            Self::Idea => "Idea",
            Self::ResourceConstraint => "ResourceConstraint",
            Self::ProcessImprovement => "ProcessImprovement",
            Self::CommunicationBreakdown => "CommunicationBreakdown",
            Self::StrategicMisalignment => "StrategicMisalignment",
            Self::TechnicalDebt => "TechnicalDebt",
            Self::DataAnalysis => "DataAnalysis",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "problem" => Some(Self::Problem),
            "opportunity" => Some(Self::Opportunity),
            "risk" => Some(Self::Risk),
            "conflict" => Some(Self::Conflict),
            "idea" => Some(Self::Idea),
            "resource_constraint" => Some(Self::ResourceConstraint),
            "process_improvement" => Some(Self::ProcessImprovement),
            "communication_breakdown" => Some(Self::CommunicationBreakdown),
            "strategic_misalignment" => Some(Self::StrategicMisalignment),
            "technical_debt" => Some(Self::TechnicalDebt),
            "data_analysis" => Some(Self::DataAnalysis),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Current lifecycle status of a tension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensionStatus {
    /// Newly raised, not yet worked.
    Open,
    /// Being actively worked.
    InProgress,
    /// Work is done but not yet confirmed.
    Resolved,
    /// Confirmed resolved and closed out.
    Closed,
}

impl Default for TensionStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl TensionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

/// Tension-level priority. Distinct from `SolutionPriority` (§3.4/3.5):
/// the two enums are never unified, matching the original's separate
/// `Priority` enum for tensions versus solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensionPriority {
    Low,
    Normal,
    High,
    Critical,
}

impl Default for TensionPriority {
    fn default() -> Self {
        Self::Normal
    }
}

impl TensionPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// A raw tension as reported, before any reasoning has run over it.
///
/// `tension_type` defaults to `Unknown` until C1 classifies it; per the
/// invariant in spec §3.1, `priority` only ever moves up (rule-engine
/// escalation or a human override), never silently down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tension {
    /// Unique identifier.
    pub id: Uuid,
    /// Short summary.
    pub title: String,
    /// Full free-text description.
    pub description: String,
    /// Classification; `Unknown` until analyzed.
    pub tension_type: super::tension::TensionType,
    /// Current priority, monotonically non-decreasing outside human override.
    pub priority: TensionPriority,
    /// Current lifecycle status.
    pub status: TensionStatus,
    /// When the tension was raised.
    pub created_at: DateTime<Utc>,
    /// When the tension was last modified.
    pub modified_at: DateTime<Utc>,
}

impl Tension {
    /// Create a new open tension with a fresh id and timestamp.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            tension_type: TensionType::Unknown,
            priority: TensionPriority::Normal,
            status: TensionStatus::Open,
            created_at: now,
            modified_at: now,
        }
    }

    /// The title and description joined with a space, the unit of text
    /// every downstream pattern match and keyword scan operates over.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Raise priority to at least `floor`, never lowering it. Used by
    /// rule-engine escalation (§3.1 invariant); a human override should
    /// set `priority` directly instead of going through this method.
    pub fn escalate_to(&mut self, floor: TensionPriority) {
        if floor > self.priority {
            self.priority = floor;
            self.modified_at = Utc::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tension_type_round_trips_through_str() {
        for ty in [
            TensionType::Problem,
            TensionType::Opportunity,
            TensionType::Risk,
            TensionType::Conflict,
            TensionType::Idea,
            TensionType::ResourceConstraint,
            TensionType::ProcessImprovement,
            TensionType::CommunicationBreakdown,
            TensionType::StrategicMisalignment,
            TensionType::TechnicalDebt,
            TensionType::DataAnalysis,
            TensionType::Unknown,
        ] {
            assert_eq!(TensionType::parse_str(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn new_tension_is_open_with_combined_text() {
        let t = Tension::new("DB down", "The primary database is down");
        assert_eq!(t.status, TensionStatus::Open);
        assert_eq!(t.priority, TensionPriority::Normal);
        assert_eq!(t.combined_text(), "DB down The primary database is down");
    }

    #[test]
    fn escalate_to_never_lowers_priority() {
        let mut t = Tension::new("x", "y");
        t.priority = TensionPriority::High;
        t.escalate_to(TensionPriority::Low);
        assert_eq!(t.priority, TensionPriority::High);
        t.escalate_to(TensionPriority::Critical);
        assert_eq!(t.priority, TensionPriority::Critical);
    }
}
