//! Plan replay through the threaded engine.

use std::time::{Duration, Instant};

use packsim_engine::{Engine, EngineConfig, PlanRunner, RunnerConfig, StepResult, SubmitError};
use packsim_plan::PlanDocument;
use packsim_test_utils::{grid_plan, overlap_scenario, standard_bins, SAMPLE_PLAN_JSON};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn spawned_runner_replays_plan() {
    init_logging();
    let mut engine = Engine::new(EngineConfig::with_bins(standard_bins())).unwrap();
    let plan = grid_plan(&standard_bins(), 0, 30);
    let expected = plan.len();

    let handle = PlanRunner::new(RunnerConfig::immediate())
        .spawn(engine.sender().unwrap(), plan)
        .unwrap();
    let report = handle.join().unwrap().unwrap();

    assert_eq!(report.placed, expected);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.final_stats.as_ref().unwrap().total_items, expected);
    assert_eq!(engine.stats().unwrap().total_items, expected);
    engine.shutdown();
}

#[test]
fn two_runners_share_one_engine() {
    init_logging();
    let engine = Engine::new(EngineConfig::with_bins(standard_bins())).unwrap();
    let bins = standard_bins();
    // Disjoint bins, so neither run can reject the other's items.
    let left = grid_plan(&bins[..2], 0, 20);
    let right = grid_plan(&bins[2..], 1000, 20);

    let runner = PlanRunner::new(RunnerConfig::immediate());
    let a = runner.clone().spawn(engine.sender().unwrap(), left).unwrap();
    let b = runner.spawn(engine.sender().unwrap(), right).unwrap();
    let a = a.join().unwrap().unwrap();
    let b = b.join().unwrap().unwrap();

    assert_eq!(a.placed + b.placed, 40);
    assert_eq!(engine.stats().unwrap().total_items, 40);
}

#[test]
fn pacing_delays_each_step() {
    let engine = Engine::new(EngineConfig::with_bins(standard_bins())).unwrap();
    let runner = PlanRunner::new(RunnerConfig {
        pacing: Duration::from_millis(20),
        outcome_timeout: None,
    });
    let mut sender = engine.sender().unwrap();

    let start = Instant::now();
    let report = runner.run(&mut sender, overlap_scenario()).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(60));
    assert_eq!(report.placed, 2);
    assert_eq!(report.rejected, 1);
}

#[test]
fn generous_timeout_never_times_out() {
    let engine = Engine::new(EngineConfig::with_bins(standard_bins())).unwrap();
    let runner = PlanRunner::new(RunnerConfig {
        pacing: Duration::ZERO,
        outcome_timeout: Some(Duration::from_secs(5)),
    });
    let doc = PlanDocument::from_json_str(SAMPLE_PLAN_JSON).unwrap();
    let report = runner.run(&mut engine.sender().unwrap(), doc.into_records()).unwrap();
    assert_eq!(report.timed_out, 0);
    assert!(matches!(report.steps[3].result, StepResult::Rejected(_)));
}

#[test]
fn runner_against_stopped_engine_fails() {
    let mut engine = Engine::new(EngineConfig::with_bins(standard_bins())).unwrap();
    let mut sender = engine.sender().unwrap();
    engine.shutdown();

    let err = PlanRunner::new(RunnerConfig::immediate())
        .run(&mut sender, overlap_scenario())
        .unwrap_err();
    assert_eq!(err, SubmitError::Shutdown);
}
