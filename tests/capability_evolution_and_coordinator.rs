//! Integration tests for capability evolution (C10) and the
//! ReasoningCoordinator's batch/single-request behavior (C5).

use reasoning_core::domain::agents::evolver::CapabilityEvolver;
use reasoning_core::domain::models::agent_capability::AgentCapability;
use reasoning_core::domain::models::agent_template::AgentTemplateMetadata;
use reasoning_core::domain::models::{Agent, TensionType};
use reasoning_core::domain::reasoning::coordinator::{ReasoningCoordinator, ReasoningRequest};
use reasoning_core::services::config::ReasoningConfig;

fn weak_agent() -> Agent {
    let metadata = AgentTemplateMetadata::new("Weak", "general").with_capabilities(vec![
        AgentCapability::new("reporting", 0.3).with_tension_types([TensionType::DataAnalysis]),
    ]);
    Agent::from_template("weak-agent", metadata)
}

#[test]
fn evolution_raises_mean_proficiency_and_passes_validation() {
    let evolver = CapabilityEvolver::new();
    let mut agent = weak_agent();
    let before = agent.clone();

    let gaps = evolver.identify_capability_gaps(&agent, 45.0, 65.0, &[], &[], 45.0);
    assert!(!gaps.is_empty());

    let applied = evolver.evolve_agent_capabilities(&mut agent, &gaps);
    assert_eq!(applied.len(), gaps.len());

    let score = evolver.validate_capability_improvements(&before, &agent);
    assert!(score >= 50.0, "expected validation score >= 50, got {score}");
}

#[test]
fn missing_capability_gap_adds_a_new_capability() {
    let evolver = CapabilityEvolver::new();
    let mut agent = weak_agent();
    let before_count = agent.capabilities.len();

    let gaps = evolver.identify_capability_gaps(
        &agent,
        90.0,
        90.0,
        &["code_review".to_string()],
        &[],
        90.0,
    );
    assert_eq!(gaps.len(), 1);

    evolver.evolve_agent_capabilities(&mut agent, &gaps);
    assert_eq!(agent.capabilities.len(), before_count + 1);
    assert!(agent.capabilities.iter().any(|c| c.name == "code_review"));
}

#[tokio::test]
async fn coordinator_processes_a_single_request_end_to_end() {
    let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
    let request = ReasoningRequest::full(
        uuid::Uuid::new_v4(),
        "API Server Down",
        "The main API server is not responding and showing error messages",
    );
    let response = coordinator.process(request).await;

    assert!(response.success);
    assert!(response.analysis.is_some());
    assert!(!response.solutions.is_empty());
    assert!(response.priority.is_some());
    assert!(response.recommendations.len() <= 10);
}

#[tokio::test]
async fn coordinator_batch_preserves_order_and_isolates_failures() {
    let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
    let id_a = uuid::Uuid::new_v4();
    let id_b = uuid::Uuid::new_v4();
    let requests = vec![
        ReasoningRequest::full(id_a, "API Server Down", "critical outage in production"),
        ReasoningRequest::full(id_b, "Improve onboarding", "a minor suggestion for the UI"),
    ];

    let responses = coordinator.process_batch(requests).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].tension_id, id_a);
    assert_eq!(responses[1].tension_id, id_b);
    assert!(responses.iter().all(|r| r.success));
}

#[tokio::test]
async fn coordinator_tracks_performance_stats_across_requests() {
    let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
    for _ in 0..3 {
        let request = ReasoningRequest::full(uuid::Uuid::new_v4(), "Idea: better onboarding", "could improve retention");
        coordinator.process(request).await;
    }
    let stats = coordinator.get_performance_stats().await;
    assert_eq!(stats.total_processed, 3);
    assert_eq!(stats.successful_processing, 3);
    assert!(stats.average_processing_time_ms >= 0.0);
    assert!(stats.per_component_average_ms.contains_key("analysis"));
}

#[test]
fn validate_components_reports_no_failures_on_default_wiring() {
    let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
    let failures = coordinator.validate_components();
    assert!(failures.is_empty(), "unexpected component failures: {failures:?}");
}
