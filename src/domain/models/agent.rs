//! Agent domain model (§3.8).
//!
//! An `Agent` is the instantiated, stateful counterpart to an
//! [`AgentTemplateMetadata`](super::agent_template::AgentTemplateMetadata):
//! it owns its capability set, tracks recent performance, and holds the
//! tensions it is currently working. The behavior (quantum cycle,
//! `can_handle_tension`, solution generation) lives on the
//! [`crate::domain::agents::base::AgentBehavior`] trait rather than on
//! this struct, per the data-driven design in spec §9.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::agent_capability::AgentCapability;
use super::agent_template::AgentTemplateMetadata;
use super::tension::Tension;

/// How an [`Agent`] came to exist. Mirrors `original_source`'s
/// `AgentType` enum (`AIAgent`, `CompositeAgent`, `CustomAgent`,
/// `TemplateAgent`); `HumanAgent` is out of scope (external collaborator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentOrigin {
    /// Instantiated directly from a single registered template.
    Template,
    /// Built from the union of several templates (C9).
    Composite,
    /// Built from an explicit requirements record, no template (C9).
    Custom,
}

/// Current lifecycle phase of an [`Agent`] (§3.8 lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLifecycleState {
    Instantiated,
    Initialized,
    Running,
    Stopped,
}

/// One entry in an agent's bounded performance history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub recorded_at: DateTime<Utc>,
    pub win_score: f64,
    pub efficiency: f64,
    pub quality: f64,
}

/// Running counters summarizing an agent's work to date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub tensions_handled: u64,
    pub tasks_completed: u64,
    pub average_win_score: f64,
}

/// A completed unit of work, retained for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTask {
    pub tension_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub win_score: f64,
}

/// An instantiated, stateful agent (§3.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: String,
    pub origin: AgentOrigin,
    pub metadata: AgentTemplateMetadata,
    pub capabilities: Vec<AgentCapability>,
    /// Bounded to `performance_history_limit` most recent entries
    /// (default 100, §9 Open Question, configurable via `ReasoningConfig`).
    pub performance_history: Vec<PerformanceRecord>,
    pub last_activity: DateTime<Utc>,
    pub strategic_context: HashMap<String, String>,
    pub active_tensions: HashMap<Uuid, Tension>,
    pub completed_tasks: Vec<CompletedTask>,
    pub performance_stats: PerformanceStats,
    pub lifecycle_state: AgentLifecycleState,
}

impl Agent {
    pub fn from_template(agent_id: impl Into<String>, metadata: AgentTemplateMetadata) -> Self {
        let capabilities = metadata.capabilities.clone();
        Self {
            agent_id: agent_id.into(),
            origin: AgentOrigin::Template,
            metadata,
            capabilities,
            performance_history: Vec::new(),
            last_activity: Utc::now(),
            strategic_context: HashMap::new(),
            active_tensions: HashMap::new(),
            completed_tasks: Vec::new(),
            performance_stats: PerformanceStats::default(),
            lifecycle_state: AgentLifecycleState::Instantiated,
        }
    }

    pub fn with_origin(mut self, origin: AgentOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Move from `Instantiated` to `Initialized`: the point at which a
    /// real deployment would register event handlers and set up the
    /// quantum cycle (§3.8 lifecycle). Pure state transition here, no
    /// I/O, since event-bus wiring is an external concern (§1).
    pub fn initialize(&mut self) {
        if self.lifecycle_state == AgentLifecycleState::Instantiated {
            self.lifecycle_state = AgentLifecycleState::Initialized;
        }
    }

    pub fn start(&mut self) {
        self.initialize();
        self.lifecycle_state = AgentLifecycleState::Running;
    }

    pub fn stop(&mut self) {
        self.active_tensions.clear();
        self.lifecycle_state = AgentLifecycleState::Stopped;
    }

    pub fn assign_tension(&mut self, tension: Tension) {
        self.active_tensions.insert(tension.id, tension);
        self.last_activity = Utc::now();
    }

    /// Record a completed cycle's outcome, trimming history to `limit`
    /// most-recent entries (default 100).
    pub fn record_performance(&mut self, record: PerformanceRecord, limit: usize) {
        self.performance_history.push(record);
        if self.performance_history.len() > limit {
            let overflow = self.performance_history.len() - limit;
            self.performance_history.drain(0..overflow);
        }
        self.performance_stats.average_win_score = if self.performance_history.is_empty() {
            0.0
        } else {
            self.performance_history.iter().map(|r| r.win_score).sum::<f64>()
                / self.performance_history.len() as f64
        };
        self.last_activity = Utc::now();
    }

    pub fn complete_task(&mut self, tension_id: Uuid, win_score: f64) {
        self.active_tensions.remove(&tension_id);
        self.completed_tasks.push(CompletedTask {
            tension_id,
            completed_at: Utc::now(),
            win_score,
        });
        self.performance_stats.tensions_handled += 1;
        self.performance_stats.tasks_completed += 1;
    }
}
