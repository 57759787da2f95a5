//! Agent behavior (C8), creation (C9) and evolution (C10).
//!
//! [`base`] defines the polymorphic [`base::AgentBehavior`] trait and
//! implements it for the stateful [`crate::domain::models::Agent`].
//! [`quantum`] implements the six-phase Sense-Perceive-Orient-Decide-
//! Act-Feedback cycle and the WIN scoring formula that drives it.
//! [`creator`] builds composite and custom agents from templates or raw
//! requirements. [`evolver`] detects capability gaps in an agent and
//! proposes (and applies) evolution strategies to close them.

pub mod base;
pub mod creator;
pub mod evolver;
pub mod quantum;

pub use base::{AgentBehavior, ExecutionOutcome, TensionRequirements};
pub use creator::AdvancedAgentCreator;
pub use evolver::CapabilityEvolver;
pub use quantum::{CycleOutcome, QuantumCycle, WinScore};
