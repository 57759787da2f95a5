use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reasoning_core::domain::reasoning::priority_calculator::{
    PriorityCalculator, PriorityContext, PriorityMethod,
};
use reasoning_core::domain::reasoning::tension_analyzer::TensionAnalyzer;

const TITLE: &str = "API Server Down";
const DESCRIPTION: &str =
    "The main API server is not responding and showing critical error messages \
     affecting customer-facing checkout and payment processing across all regions.";

fn bench_weighted_average(c: &mut Criterion) {
    let analyzer = TensionAnalyzer::new();
    let calculator = PriorityCalculator::new();
    let analysis = analyzer.analyze(TITLE, DESCRIPTION);
    let context = PriorityContext::default();

    c.bench_function("priority_calculator/weighted_average", |b| {
        b.iter(|| {
            calculator.calculate_priority(
                black_box(&analysis),
                black_box(TITLE),
                black_box(DESCRIPTION),
                black_box(&context),
                PriorityMethod::WeightedAverage,
            )
        })
    });
}

fn bench_all_methods(c: &mut Criterion) {
    let analyzer = TensionAnalyzer::new();
    let calculator = PriorityCalculator::new();
    let analysis = analyzer.analyze(TITLE, DESCRIPTION);
    let context = PriorityContext::default();

    let methods = [
        PriorityMethod::WeightedAverage,
        PriorityMethod::EisenhowerMatrix,
        PriorityMethod::RiceFramework,
        PriorityMethod::ValueComplexity,
        PriorityMethod::RiskAdjusted,
    ];

    let mut group = c.benchmark_group("priority_calculator/methods");
    for method in methods {
        group.bench_function(method.as_str(), |b| {
            b.iter(|| {
                calculator.calculate_priority(
                    black_box(&analysis),
                    black_box(TITLE),
                    black_box(DESCRIPTION),
                    black_box(&context),
                    method,
                )
            })
        });
    }
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = TensionAnalyzer::new();
    c.bench_function("tension_analyzer/analyze", |b| {
        b.iter(|| analyzer.analyze(black_box(TITLE), black_box(DESCRIPTION)))
    });
}

criterion_group!(
    benches,
    bench_weighted_average,
    bench_all_methods,
    bench_analysis
);
criterion_main!(benches);
