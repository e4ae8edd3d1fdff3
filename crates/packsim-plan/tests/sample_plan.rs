//! Parse the sample optimizer plan and replay it through the engine.

use packsim_core::{BinId, ItemId, ShapeKind};
use packsim_engine::{Engine, EngineConfig, PlanRunner, RunnerConfig, StepResult};
use packsim_plan::{compare_utilization, parse_bin_specs, PlanDocument, PlanError};
use packsim_test_utils::{standard_bins, SAMPLE_PLAN_JSON};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn sample_plan_parses() {
    let doc = PlanDocument::from_json_str(SAMPLE_PLAN_JSON).unwrap();
    assert_eq!(doc.len(), 5);
    assert_eq!(doc.summary().fitness, Some(812.5));
    assert_eq!(doc.summary().unplaced_items, Some(1));
    assert_eq!(doc.reported_bins().len(), 4);

    let third = &doc.records()[2];
    assert_eq!(third.item_id, ItemId(2));
    assert_eq!(third.bin_id, BinId(1));
    assert_eq!(third.shape, ShapeKind::Circle);
}

#[test]
fn sample_plan_runs_end_to_end() {
    init_logging();
    let doc = PlanDocument::from_json_str(SAMPLE_PLAN_JSON).unwrap();
    let reported = doc.reported_bins().to_vec();

    let mut engine = Engine::new(EngineConfig::with_bins(standard_bins())).unwrap();
    let report = PlanRunner::new(RunnerConfig::immediate())
        .run(&mut engine, doc.into_records())
        .unwrap();

    assert_eq!(report.placed, 3);
    assert_eq!(report.rejected, 2);
    match &report.steps[1].result {
        StepResult::Rejected(r) => assert_eq!(r.to_string(), "item 1 overlaps with existing item 0"),
        other => panic!("expected rejection, got {other:?}"),
    }
    match &report.steps[3].result {
        StepResult::Rejected(r) => assert_eq!(r.to_string(), "bin 7 does not exist"),
        other => panic!("expected rejection, got {other:?}"),
    }

    let stats = report.final_stats.unwrap();
    assert!(compare_utilization(&reported, &stats, 0.1).is_empty());
    engine.shutdown();
}

#[test]
fn plan_file_round_trips_through_path() {
    let path = std::env::temp_dir().join(format!("packsim-plan-{}.json", std::process::id()));
    std::fs::write(&path, SAMPLE_PLAN_JSON).unwrap();
    let doc = PlanDocument::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(doc.len(), 5);
}

#[test]
fn missing_file_is_io_error() {
    let err = PlanDocument::from_path("/nonexistent/packsim/plan.json").unwrap_err();
    assert!(matches!(err, PlanError::Io(_)));
}

#[test]
fn bin_document_feeds_engine_config() {
    let bins = parse_bin_specs(
        r#"[{"id": 0, "width": 220, "height": 220}, {"id": 1, "width": 180, "height": 200},
            {"id": 2, "width": 200, "height": 180}, {"id": 3, "width": 160, "height": 160}]"#,
    )
    .unwrap();
    assert_eq!(bins, standard_bins());
    EngineConfig::with_bins(bins).validate().unwrap();
}
