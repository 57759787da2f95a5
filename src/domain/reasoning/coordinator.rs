//! ReasoningCoordinator (C5): orchestrates C1-C4 for a single tension,
//! or a batch of them concurrently, collecting stats as it goes.
//!
//! Grounded on spec.md §4.5; concurrency follows the teacher's
//! `tokio::task::JoinSet` fan-out idiom used for batch work elsewhere
//! in the codebase.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::models::{
    GeneratedSolution, PriorityCalculationResult, RuleMatchRecord, TensionAnalysis, TensionStatus,
};
use crate::domain::ports::{NullReasoningEventSink, NullTensionStore, ReasoningEvent, ReasoningEventSink, TensionStore};
use crate::services::config::ReasoningConfig;

use super::priority_calculator::{PriorityCalculator, PriorityContext, PriorityMethod};
use super::rule_engine::RuleEngine;
use super::solution_generator::SolutionGenerator;
use super::tension_analyzer::TensionAnalyzer;

/// Which reasoning stages a [`ReasoningRequest`] asks the coordinator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedService {
    Analysis,
    Rules,
    Solutions,
    Priority,
}

/// Input to [`ReasoningCoordinator::process`].
#[derive(Debug, Clone)]
pub struct ReasoningRequest {
    pub tension_id: Uuid,
    pub title: String,
    pub description: String,
    pub current_status: Option<TensionStatus>,
    pub context: PriorityContext,
    pub requested_services: HashSet<RequestedService>,
}

impl ReasoningRequest {
    /// A request asking for every stage, with default context.
    pub fn full(tension_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tension_id,
            title: title.into(),
            description: description.into(),
            current_status: None,
            context: PriorityContext::default(),
            requested_services: HashSet::from([
                RequestedService::Analysis,
                RequestedService::Rules,
                RequestedService::Solutions,
                RequestedService::Priority,
            ]),
        }
    }
}

/// Output of [`ReasoningCoordinator::process`], aggregating every stage
/// that ran.
#[derive(Debug, Clone)]
pub struct ReasoningResponse {
    pub tension_id: Uuid,
    pub analysis: Option<TensionAnalysis>,
    pub rule_matches: Vec<RuleMatchRecord>,
    pub solutions: Vec<GeneratedSolution>,
    pub priority: Option<PriorityCalculationResult>,
    pub processing_time_ms: f64,
    pub success: bool,
    pub errors: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct ComponentStats {
    count: u64,
    total_time_ms: f64,
}

#[derive(Debug, Clone, Default)]
struct Stats {
    total_processed: u64,
    successful_processing: u64,
    total_time_ms: f64,
    per_component: HashMap<&'static str, ComponentStats>,
}

/// Snapshot returned by [`ReasoningCoordinator::get_performance_stats`].
#[derive(Debug, Clone)]
pub struct PerformanceStatsSnapshot {
    pub total_processed: u64,
    pub successful_processing: u64,
    pub average_processing_time_ms: f64,
    pub per_component_average_ms: HashMap<String, f64>,
}

/// Orchestrates the reasoning pipeline over its four sub-components
/// (§4.5). Holds the sub-components by value (all are stateless or
/// cheaply cloneable) and the external ports behind `Arc` so a single
/// instance can be shared across concurrent batch work.
pub struct ReasoningCoordinator {
    analyzer: TensionAnalyzer,
    rules: RuleEngine,
    solutions: SolutionGenerator,
    priority: PriorityCalculator,
    store: Arc<dyn TensionStore>,
    sink: Arc<dyn ReasoningEventSink>,
    config: ReasoningConfig,
    stats: RwLock<Stats>,
}

impl ReasoningCoordinator {
    /// Builds a coordinator wired to no-op ports, suitable for
    /// standalone use and tests.
    pub fn new(config: ReasoningConfig) -> Self {
        Self::with_ports(config, Arc::new(NullTensionStore), Arc::new(NullReasoningEventSink))
    }

    pub fn with_ports(
        config: ReasoningConfig,
        store: Arc<dyn TensionStore>,
        sink: Arc<dyn ReasoningEventSink>,
    ) -> Self {
        let rules = if config.rule_engine_defaults_enabled {
            RuleEngine::new()
        } else {
            RuleEngine::empty()
        };
        Self {
            analyzer: TensionAnalyzer::new(),
            rules,
            solutions: SolutionGenerator::new(),
            priority: PriorityCalculator::new(),
            store,
            sink,
            config,
            stats: RwLock::new(Stats::default()),
        }
    }

    /// Runs the sequential analysis -> rules -> solutions -> priority
    /// flow for one tension, skipping stages not requested and failing
    /// softly per-stage (§4.5 Failure isolation).
    #[tracing::instrument(skip(self, request), fields(tension_id = %request.tension_id))]
    pub async fn process(&self, request: ReasoningRequest) -> ReasoningResponse {
        debug!(title = %request.title, "starting reasoning pipeline");
        let started = Instant::now();
        let mut errors = Vec::new();
        let wants = |service: RequestedService| request.requested_services.contains(&service);

        let analysis = if wants(RequestedService::Analysis) {
            let started = Instant::now();
            let analysis = self.analyzer.analyze(&request.title, &request.description);
            self.record_component("analysis", started).await;
            self.sink
                .emit(ReasoningEvent::TensionAnalyzed {
                    tension_id: request.tension_id,
                    suggested_priority: analysis.suggested_priority,
                })
                .await;
            if let Err(err) = self.store.save_analysis(request.tension_id, &analysis).await {
                warn!(%err, "failed to persist analysis");
                errors.push(format!("stage 'analysis' failed to persist: {err}"));
            }
            Some(analysis)
        } else {
            None
        };

        if wants(RequestedService::Analysis) && analysis.is_none() {
            errors.push("stage 'analysis' failed: no result produced".to_string());
            let response = ReasoningResponse {
                tension_id: request.tension_id,
                analysis: None,
                rule_matches: Vec::new(),
                solutions: Vec::new(),
                priority: None,
                processing_time_ms: elapsed_ms(started),
                success: false,
                errors,
                recommendations: Vec::new(),
            };
            self.record_outcome(&response).await;
            return response;
        }

        let mut rule_matches = Vec::new();
        if wants(RequestedService::Rules) {
            if let Some(analysis) = &analysis {
                let started = Instant::now();
                let context = json!({
                    "title": request.title,
                    "description": request.description,
                    "analysis": {
                        "tension_type": {"value": analysis.tension_type.label()},
                        "impact_level": {"value": analysis.impact_level.value()},
                        "urgency_level": {"value": analysis.urgency_level.value()},
                        "suggested_priority": analysis.suggested_priority,
                        "key_themes": analysis.key_themes,
                    },
                });
                rule_matches = self.rules.evaluate_rules(&context, None);
                self.record_component("rules", started).await;

                let conflicts = self.rules.detect_rule_conflicts();
                let matched_ids: std::collections::HashSet<&str> =
                    rule_matches.iter().map(|m| m.rule_id.as_str()).collect();
                let relevant_conflicts = conflicts
                    .iter()
                    .filter(|c| matched_ids.contains(c.rule1_id.as_str()) && matched_ids.contains(c.rule2_id.as_str()))
                    .count();
                if relevant_conflicts > 0 {
                    warn!(relevant_conflicts, "detected conflicting matched rules");
                    errors.push(format!(
                        "conflicting rules: {relevant_conflicts} conflicting rule pair(s) among matched rules"
                    ));
                }
                self.sink
                    .emit(ReasoningEvent::RulesEvaluated {
                        tension_id: request.tension_id,
                        matched_rule_ids: rule_matches.iter().map(|m| m.rule_id.clone()).collect(),
                        conflicts: relevant_conflicts,
                    })
                    .await;
            } else {
                errors.push("stage 'rules' failed: analysis not available".to_string());
            }
        }

        let mut generated_solutions = Vec::new();
        if wants(RequestedService::Solutions) {
            if let Some(analysis) = &analysis {
                let started = Instant::now();
                generated_solutions =
                    self.solutions
                        .generate_solutions(analysis, &request.title, &request.description);
                self.record_component("solutions", started).await;
                self.sink
                    .emit(ReasoningEvent::SolutionsGenerated {
                        tension_id: request.tension_id,
                        solution_count: generated_solutions.len(),
                    })
                    .await;
                if let Err(err) = self
                    .store
                    .save_solutions(request.tension_id, &generated_solutions)
                    .await
                {
                    warn!(%err, "failed to persist solutions");
                    errors.push(format!("stage 'solutions' failed to persist: {err}"));
                }
            } else {
                errors.push("stage 'solutions' failed: analysis not available".to_string());
            }
        }

        let mut priority_result = None;
        if wants(RequestedService::Priority) {
            if let Some(analysis) = &analysis {
                let started = Instant::now();
                let method = PriorityMethod::parse_str(&self.config.default_priority_method)
                    .unwrap_or(PriorityMethod::WeightedAverage);
                let result = self.priority.calculate_priority(
                    analysis,
                    &request.title,
                    &request.description,
                    &request.context,
                    method,
                );
                self.record_component("priority", started).await;
                self.sink
                    .emit(ReasoningEvent::PriorityCalculated {
                        tension_id: request.tension_id,
                        final_score: result.final_score,
                    })
                    .await;
                if let Err(err) = self.store.save_priority(request.tension_id, &result).await {
                    warn!(%err, "failed to persist priority result");
                    errors.push(format!("stage 'priority' failed to persist: {err}"));
                }
                priority_result = Some(result);
            } else {
                errors.push("stage 'priority' failed: analysis not available".to_string());
            }
        }

        let recommendations = build_recommendations(
            analysis.as_ref(),
            &rule_matches,
            &generated_solutions,
            priority_result.as_ref(),
        );

        let success = analysis.is_some() || !wants(RequestedService::Analysis);
        let processing_time_ms = elapsed_ms(started);

        let response = ReasoningResponse {
            tension_id: request.tension_id,
            analysis,
            rule_matches,
            solutions: generated_solutions,
            priority: priority_result,
            processing_time_ms,
            success,
            errors,
            recommendations,
        };
        self.record_outcome(&response).await;
        debug!(success = response.success, processing_time_ms = response.processing_time_ms, "reasoning pipeline finished");
        self.sink
            .emit(ReasoningEvent::ReasoningCompleted {
                tension_id: request.tension_id,
                success: response.success,
                processing_time_ms: response.processing_time_ms,
            })
            .await;
        response
    }

    /// Runs `requests` concurrently, bounded by
    /// `config.max_batch_concurrency`. Results are returned in submission
    /// order; a failing stage inside one request never aborts the others
    /// (§4.5 Batch mode) since `process` already isolates stage failures
    /// into `ReasoningResponse::errors`.
    #[tracing::instrument(skip(self, requests), fields(batch_size = requests.len()))]
    pub async fn process_batch(&self, requests: Vec<ReasoningRequest>) -> Vec<ReasoningResponse> {
        use futures::stream::{self, StreamExt};

        debug!(max_concurrency = self.config.max_batch_concurrency, "starting batch reasoning run");
        stream::iter(requests.into_iter().map(|request| self.process(request)))
            .buffered(self.config.max_batch_concurrency.max(1))
            .collect()
            .await
    }
}

impl ReasoningCoordinator {
    async fn record_component(&self, name: &'static str, started: Instant) {
        let elapsed = elapsed_ms(started);
        let mut stats = self.stats.write().await;
        let entry = stats.per_component.entry(name).or_default();
        entry.count += 1;
        entry.total_time_ms += elapsed;
    }

    async fn record_outcome(&self, response: &ReasoningResponse) {
        let mut stats = self.stats.write().await;
        stats.total_processed += 1;
        if response.success {
            stats.successful_processing += 1;
        }
        stats.total_time_ms += response.processing_time_ms;
    }

    pub async fn get_performance_stats(&self) -> PerformanceStatsSnapshot {
        let stats = self.stats.read().await;
        let average_processing_time_ms = if stats.total_processed > 0 {
            stats.total_time_ms / stats.total_processed as f64
        } else {
            0.0
        };
        let per_component_average_ms = stats
            .per_component
            .iter()
            .map(|(name, component)| {
                let avg = if component.count > 0 {
                    component.total_time_ms / component.count as f64
                } else {
                    0.0
                };
                ((*name).to_string(), avg)
            })
            .collect();
        PerformanceStatsSnapshot {
            total_processed: stats.total_processed,
            successful_processing: stats.successful_processing,
            average_processing_time_ms,
            per_component_average_ms,
        }
    }

    /// Smoke-tests each sub-component with a canonical input, returning
    /// the names of any that failed to produce a sane result.
    pub fn validate_components(&self) -> Vec<String> {
        let mut failures = Vec::new();

        let analysis = self.analyzer.analyze("Canonical check", "A routine validation tension.");
        if analysis.confidence_score < 0.0 || analysis.confidence_score > 1.0 {
            failures.push("tension_analyzer".to_string());
        }

        let context = json!({"title": "Canonical check", "analysis": {"suggested_priority": 0}});
        let _ = self.rules.evaluate_rules(&context, None);
        if self.rules.get_rules_summary().total_rules == 0 && self.config.rule_engine_defaults_enabled {
            failures.push("rule_engine".to_string());
        }

        let generated = self
            .solutions
            .generate_solutions(&analysis, "Canonical check", "A routine validation tension.");
        if generated.is_empty() {
            failures.push("solution_generator".to_string());
        }

        let priority_result = self.priority.calculate_priority(
            &analysis,
            "Canonical check",
            "A routine validation tension.",
            &PriorityContext::default(),
            PriorityMethod::WeightedAverage,
        );
        if !(0.0..=100.0).contains(&priority_result.final_score) {
            failures.push("priority_calculator".to_string());
        }

        failures
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn build_recommendations(
    analysis: Option<&TensionAnalysis>,
    rule_matches: &[RuleMatchRecord],
    solutions: &[GeneratedSolution],
    priority: Option<&PriorityCalculationResult>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(analysis) = analysis {
        if analysis.suggested_priority >= 2 {
            recommendations.push("Critical priority suggested — escalate immediately.".to_string());
        } else if analysis.suggested_priority == 1 {
            recommendations.push("High priority suggested — schedule promptly.".to_string());
        }
        for theme in &analysis.key_themes {
            recommendations.push(format!("Key theme identified: {theme}."));
        }
    }

    for rule_match in rule_matches {
        recommendations.push(format!("Matched rule: {}.", rule_match.rule_name));
    }

    if let Some(top) = solutions.first() {
        recommendations.push(format!(
            "Top recommended solution: '{}' ({:?} priority).",
            top.title, top.priority
        ));
    }

    if let Some(priority) = priority {
        recommendations.push(format!(
            "Priority score {:.1}/100 \u{2192} {} band.",
            priority.final_score,
            priority.priority_level.as_str()
        ));
        recommendations.extend(priority.recommendations.iter().cloned());
    }

    recommendations.sort();
    recommendations.dedup();
    recommendations.truncate(10);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn full_request_produces_every_stage() {
        let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
        let request = ReasoningRequest::full(
            Uuid::new_v4(),
            "Production outage",
            "The payment system is down immediately, customers cannot check out.",
        );
        let response = coordinator.process(request).await;
        assert!(response.success);
        assert!(response.analysis.is_some());
        assert!(!response.solutions.is_empty());
        assert!(response.priority.is_some());
        assert!(!response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn skipping_analysis_skips_dependent_stages() {
        let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
        let mut request = ReasoningRequest::full(Uuid::new_v4(), "x", "y");
        request.requested_services = HashSet::from([RequestedService::Priority]);
        let response = coordinator.process(request).await;
        assert!(response.priority.is_none());
        assert!(!response.errors.is_empty());
    }

    #[test]
    fn validate_components_reports_no_failures_for_default_config() {
        let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
        assert!(coordinator.validate_components().is_empty());
    }

    #[tokio::test]
    async fn stats_accumulate_across_requests() {
        let coordinator = ReasoningCoordinator::new(ReasoningConfig::default());
        for _ in 0..3 {
            let request = ReasoningRequest::full(Uuid::new_v4(), "Minor idea", "We could try a small tweak.");
            coordinator.process(request).await;
        }
        let stats = coordinator.get_performance_stats().await;
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.successful_processing, 3);
        assert!(stats.average_processing_time_ms >= 0.0);
    }
}
