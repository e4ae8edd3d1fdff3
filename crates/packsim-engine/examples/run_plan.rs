//! Replay an optimizer plan through the threaded engine and print the
//! per-step report and final statistics.
//!
//! ```text
//! cargo run -p packsim-engine --example run_plan [plan.json]
//! ```
//!
//! Without an argument a built-in sample plan is used. Set
//! `RUST_LOG=debug` to see every applied command.

use std::process::ExitCode;
use std::time::Duration;

use packsim_engine::{Engine, EngineConfig, PlanRunner, RunnerConfig};
use packsim_plan::{compare_utilization, PlanDocument};
use packsim_test_utils::SAMPLE_PLAN_JSON;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let doc = match std::env::args().nth(1) {
        Some(path) => PlanDocument::from_path(&path),
        None => PlanDocument::from_json_str(SAMPLE_PLAN_JSON),
    };
    let doc = match doc {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let reported = doc.reported_bins().to_vec();

    let mut engine = match Engine::new(EngineConfig::standard()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let runner = PlanRunner::new(RunnerConfig {
        pacing: Duration::from_millis(25),
        outcome_timeout: Some(Duration::from_secs(2)),
    });
    let report = match runner.run(&mut engine, doc.into_records()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("{report}");

    if let Some(stats) = &report.final_stats {
        for drift in compare_utilization(&reported, stats, 0.1) {
            println!("drift: {drift}");
        }
    }

    // Final state dump, one JSON document.
    match engine.snapshot().map(|snap| serde_json::to_string_pretty(&snap)) {
        Ok(Ok(json)) => println!("\nfinal state:\n{json}"),
        Ok(Err(e)) => eprintln!("error: could not encode state: {e}"),
        Err(e) => eprintln!("error: {e}"),
    }

    let shutdown = engine.shutdown();
    println!(
        "\nengine stopped after {} commands ({}ms)",
        shutdown.commands_applied, shutdown.total_ms
    );
    ExitCode::SUCCESS
}
