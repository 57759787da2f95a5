//! Domain ports (interfaces) for the reasoning and agent orchestration core.
//!
//! The domain algorithms (C1-C11) are pure functions/state machines over
//! the models in [`crate::domain::models`]; persistence and eventing are
//! pushed out to these two seams so the core never depends on a concrete
//! store or transport (§6.4). Production adapters (a database-backed
//! `TensionStore`, a message-bus `ReasoningEventSink`) are out of scope
//! here; only the trait contracts and `Null*` test/default implementations
//! live in this crate, mirroring the teacher's `null_memory`/`null_embedding`
//! pattern.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::ReasoningResult;
use super::models::{GeneratedSolution, PriorityCalculationResult, Tension, TensionAnalysis};

/// Durable storage for a tension and the artifacts its reasoning pipeline
/// produces. Implementations must provide read-your-writes consistency
/// within a single process (§6.4): a `load_tension` immediately following
/// a `save_tension` for the same id must observe that write.
#[async_trait]
pub trait TensionStore: Send + Sync {
    async fn save_tension(&self, tension: &Tension) -> ReasoningResult<()>;

    async fn load_tension(&self, tension_id: Uuid) -> ReasoningResult<Option<Tension>>;

    async fn save_analysis(
        &self,
        tension_id: Uuid,
        analysis: &TensionAnalysis,
    ) -> ReasoningResult<()>;

    async fn load_analysis(&self, tension_id: Uuid) -> ReasoningResult<Option<TensionAnalysis>>;

    async fn save_solutions(
        &self,
        tension_id: Uuid,
        solutions: &[GeneratedSolution],
    ) -> ReasoningResult<()>;

    async fn load_solutions(&self, tension_id: Uuid) -> ReasoningResult<Vec<GeneratedSolution>>;

    async fn save_priority(
        &self,
        tension_id: Uuid,
        priority: &PriorityCalculationResult,
    ) -> ReasoningResult<()>;

    async fn load_priority(
        &self,
        tension_id: Uuid,
    ) -> ReasoningResult<Option<PriorityCalculationResult>>;
}

/// Domain events emitted at the end of each reasoning stage and at the
/// end of a full coordinator pass (§6.3). A sink is free to drop, log, or
/// forward these; the domain never blocks on a subscriber.
#[derive(Debug, Clone)]
pub enum ReasoningEvent {
    TensionAnalyzed {
        tension_id: Uuid,
        suggested_priority: u8,
    },
    RulesEvaluated {
        tension_id: Uuid,
        matched_rule_ids: Vec<String>,
        conflicts: usize,
    },
    SolutionsGenerated {
        tension_id: Uuid,
        solution_count: usize,
    },
    PriorityCalculated {
        tension_id: Uuid,
        final_score: f64,
    },
    ReasoningCompleted {
        tension_id: Uuid,
        success: bool,
        processing_time_ms: f64,
    },
}

/// Fire-and-forget sink for [`ReasoningEvent`]s.
#[async_trait]
pub trait ReasoningEventSink: Send + Sync {
    async fn emit(&self, event: ReasoningEvent);
}

/// No-op [`TensionStore`]: every load misses, every save succeeds
/// silently. Used as the default for a coordinator run in isolation
/// (e.g. `validate_reasoning_components`, unit and property tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTensionStore;

#[async_trait]
impl TensionStore for NullTensionStore {
    async fn save_tension(&self, _tension: &Tension) -> ReasoningResult<()> {
        Ok(())
    }

    async fn load_tension(&self, _tension_id: Uuid) -> ReasoningResult<Option<Tension>> {
        Ok(None)
    }

    async fn save_analysis(
        &self,
        _tension_id: Uuid,
        _analysis: &TensionAnalysis,
    ) -> ReasoningResult<()> {
        Ok(())
    }

    async fn load_analysis(&self, _tension_id: Uuid) -> ReasoningResult<Option<TensionAnalysis>> {
        Ok(None)
    }

    async fn save_solutions(
        &self,
        _tension_id: Uuid,
        _solutions: &[GeneratedSolution],
    ) -> ReasoningResult<()> {
        Ok(())
    }

    async fn load_solutions(&self, _tension_id: Uuid) -> ReasoningResult<Vec<GeneratedSolution>> {
        Ok(Vec::new())
    }

    async fn save_priority(
        &self,
        _tension_id: Uuid,
        _priority: &PriorityCalculationResult,
    ) -> ReasoningResult<()> {
        Ok(())
    }

    async fn load_priority(
        &self,
        _tension_id: Uuid,
    ) -> ReasoningResult<Option<PriorityCalculationResult>> {
        Ok(None)
    }
}

/// No-op [`ReasoningEventSink`]: drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReasoningEventSink;

#[async_trait]
impl ReasoningEventSink for NullReasoningEventSink {
    async fn emit(&self, _event: ReasoningEvent) {}
}
