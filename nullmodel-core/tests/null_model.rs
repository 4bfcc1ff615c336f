//! Tests for the `NullModel` orchestration API.

mod common;

use common::{bridged_triangles, built, model};
use nullmodel_core::{
    Deviation, ExecutionStrategy, FnStatistic, NullModelBuilder, NullModelError,
    NullModelErrorCode, SimpleGraph, Statistic, StatisticError, Transitivity, TriangleCount,
    UndefinedPolicy, datasets::karate_club, observed_z_score,
};
use nullmodel_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

/// Triangle count that is undefined whenever the sanitised graph has an even
/// number of edges.
fn parity_gated_triangles()
-> FnStatistic<impl Fn(&SimpleGraph) -> Result<f64, StatisticError> + Send + Sync> {
    FnStatistic::new("odd_triangles", |graph: &SimpleGraph| {
        if graph.edge_count().is_multiple_of(2) {
            return Err(StatisticError::Undefined {
                statistic: "odd_triangles".into(),
                reason: "even edge count".into(),
            });
        }
        TriangleCount.evaluate(graph)
    })
}

#[fixture]
fn layer() -> RecordingLayer {
    RecordingLayer::default()
}

#[rstest]
fn builder_defaults() {
    let builder = NullModelBuilder::new();
    assert_eq!(builder.trials(), 1000);
    assert_eq!(builder.seed(), 42);
    assert_eq!(builder.deviation(), Deviation::Population);
    assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    assert_eq!(builder.undefined_policy(), UndefinedPolicy::Fail);

    let model = builder.build().expect("defaults valid");
    assert_eq!(model.trials().get(), 1000);
}

#[rstest]
fn builder_rejects_zero_trials() {
    let err = NullModelBuilder::new()
        .with_trials(0)
        .build()
        .expect_err("builder must reject zero trials");
    assert_eq!(err, NullModelError::InvalidTrialCount { got: 0 });
    assert_eq!(err.code(), NullModelErrorCode::InvalidTrialCount);
}

#[rstest]
fn report_is_consistent_with_z_score_formula() {
    let observed = bridged_triangles();
    let model = built(
        model(120, 3)
            .with_deviation(Deviation::Sample)
            .with_execution_strategy(ExecutionStrategy::Sequential),
    );
    let report = model.run(&observed, &TriangleCount).expect("run must succeed");

    assert_eq!(report.statistic, "triangles");
    assert_eq!(report.observed, 2.0);
    assert_eq!(report.completed_trials, 120);
    assert_eq!(report.skipped_trials, 0);
    assert_eq!(report.deviation, Deviation::Sample);

    let expected = observed_z_score(report.observed, &report.sample, Deviation::Sample)
        .expect("sample has spread");
    assert_eq!(report.mean, expected.mean);
    assert_eq!(report.std_dev, expected.std_dev);
    assert_eq!(report.z_score, expected.z_score);
}

#[rstest]
fn same_seed_gives_same_report() {
    let observed = bridged_triangles();
    let model = built(model(80, 11).with_execution_strategy(ExecutionStrategy::Sequential));
    let first = model.run(&observed, &TriangleCount).expect("run must succeed");
    let second = model.run(&observed, &TriangleCount).expect("run must succeed");
    assert_eq!(first, second);
}

#[cfg(feature = "parallel")]
#[rstest]
fn sequential_and_parallel_runs_agree() {
    let observed = karate_club();
    let run = |strategy| {
        built(model(150, 5).with_execution_strategy(strategy))
            .run(&observed, &Transitivity)
            .expect("run must succeed")
    };
    let sequential = run(ExecutionStrategy::Sequential);
    assert_eq!(sequential, run(ExecutionStrategy::Parallel));
    assert_eq!(sequential, run(ExecutionStrategy::Auto));
}

#[cfg(not(feature = "parallel"))]
#[rstest]
fn parallel_strategy_requires_feature() {
    let err = built(model(10, 1).with_execution_strategy(ExecutionStrategy::Parallel))
        .run(&bridged_triangles(), &TriangleCount)
        .expect_err("parallel scheduling is compiled out");
    assert_eq!(
        err,
        NullModelError::BackendUnavailable {
            requested: ExecutionStrategy::Parallel
        }
    );
}

#[rstest]
fn karate_club_is_more_transitive_than_its_null_model() {
    let report = built(model(300, 42))
        .run(&karate_club(), &Transitivity)
        .expect("run must succeed");
    assert!((report.observed - 0.255_681_818_181_818_2).abs() < 1e-12);
    assert!(report.mean < report.observed);
    assert!(report.z_score > 1.0);
    assert!(report.self_loops_removed + report.parallel_edges_collapsed > 0);
}

#[rstest]
fn fail_policy_surfaces_undefined_trials() {
    let err = built(model(200, 9).with_execution_strategy(ExecutionStrategy::Sequential))
        .run(&bridged_triangles(), &parity_gated_triangles())
        .expect_err("some null graphs have an even edge count");
    assert!(matches!(
        err,
        NullModelError::TrialStatistic {
            source: StatisticError::Undefined { .. },
            ..
        }
    ));
    assert_eq!(err.code(), NullModelErrorCode::TrialStatistic);
}

#[rstest]
fn skip_policy_records_warnings(layer: RecordingLayer) {
    let model = built(
        model(200, 9)
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .with_undefined_policy(UndefinedPolicy::Skip),
    );
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let report = tracing::subscriber::with_default(subscriber, || {
        model.run(&bridged_triangles(), &parity_gated_triangles())
    })
    .expect("survivors remain");

    assert!(report.skipped_trials > 0);
    assert_eq!(report.completed_trials + report.skipped_trials, 200);
    assert_eq!(report.sample.len(), report.completed_trials);

    let warnings = layer.events_at(Level::WARN);
    assert_eq!(warnings.len(), report.skipped_trials);
    assert!(
        warnings
            .iter()
            .all(|event| event.message() == Some("skipping null trial"))
    );
}

#[rstest]
fn run_records_core_tracing(layer: RecordingLayer) {
    let model = built(model(64, 7).with_execution_strategy(ExecutionStrategy::Sequential));
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        model.run(&bridged_triangles(), &TriangleCount)
    })
    .expect("run must succeed");

    let run_span = layer
        .span("core.null_model.run")
        .expect("core.null_model.run span must exist");
    assert_eq!(run_span.field("statistic"), Some("triangles"));
    assert_eq!(run_span.field("nodes"), Some("6"));
    assert_eq!(run_span.field("edges"), Some("7"));
    assert_eq!(run_span.field("trials"), Some("64"));
    assert_eq!(run_span.field("seed"), Some("7"));
    assert_eq!(run_span.field("strategy"), Some("Sequential"));

    let trials_span = layer
        .span("core.null_model.trials")
        .expect("core.null_model.trials span must exist");
    assert_eq!(trials_span.field("trials"), Some("64"));
    assert_eq!(trials_span.field("scheduler"), Some("Sequential"));

    assert!(
        layer
            .events_at(Level::INFO)
            .iter()
            .any(|event| event.message() == Some("null model completed"))
    );
}

#[rstest]
fn observed_failure_is_reported_before_any_trial(layer: RecordingLayer) {
    let edgeless = nullmodel_core::MultiGraph::new(4);
    let model = built(model(10, 1).with_execution_strategy(ExecutionStrategy::Sequential));
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let err = tracing::subscriber::with_default(subscriber, || model.run(&edgeless, &Transitivity))
        .expect_err("edgeless graphs have no triples");
    assert_eq!(err.code(), NullModelErrorCode::ObservedStatistic);
    assert!(layer.span("core.null_model.trials").is_none());
}

#[rstest]
fn report_serialises_to_json() {
    let report = built(model(20, 2).with_execution_strategy(ExecutionStrategy::Sequential))
        .run(&bridged_triangles(), &TriangleCount)
        .expect("run must succeed");
    let json = serde_json::to_value(&report).expect("report serialises");
    assert_eq!(json["statistic"], "triangles");
    assert_eq!(json["completed_trials"], 20);
    assert_eq!(json["deviation"], "Population");
    assert_eq!(
        json["sample"].as_array().map(Vec::len),
        Some(report.sample.len())
    );
}
