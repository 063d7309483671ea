use criterion::{black_box, criterion_group, criterion_main, Criterion};
use btc_leverage_risk::risk::{
    classify, top_weighted_categories, CategoryRiskCalculator, FinancialRiskCalculator,
    RiskConsolidator,
};

fn benchmark_consolidation(c: &mut Criterion) {
    let consolidator = RiskConsolidator::default();

    c.bench_function("consolidated_risk_analysis", |b| {
        b.iter(|| black_box(&consolidator).consolidate())
    });
}

fn benchmark_financial_risk(c: &mut Criterion) {
    let calculator = FinancialRiskCalculator::default();

    c.bench_function("direct_financial_risk", |b| {
        b.iter(|| black_box(&calculator).calculate())
    });
}

fn benchmark_classification(c: &mut Criterion) {
    let scores: Vec<f64> = (0..1000).map(|i| i as f64 / 100.0).collect();

    c.bench_function("classify", |b| {
        b.iter(|| {
            for score in &scores {
                black_box(classify(black_box(*score)));
            }
        })
    });
}

fn benchmark_top_categories(c: &mut Criterion) {
    let weighted = [
        ("Technical", 0.075),
        ("Structural BTC", 0.5),
        ("Macro & Platform", 0.3),
        ("Direct Financial", 3.5),
    ];

    c.bench_function("top_weighted_categories", |b| {
        b.iter(|| top_weighted_categories(black_box(&weighted), 2))
    });
}

criterion_group!(
    benches,
    benchmark_consolidation,
    benchmark_financial_risk,
    benchmark_classification,
    benchmark_top_categories
);
criterion_main!(benches);
