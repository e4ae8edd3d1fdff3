//! End-to-end scenarios against the threaded engine.

use std::thread;

use packsim_core::geometry::{fits, overlaps};
use packsim_core::{BinId, Command, ItemId, Outcome, SimulationStats, StateSnapshot};
use packsim_engine::{CommandSink, Engine, EngineConfig, LockstepSimulation, SubmitError};
use packsim_test_utils::{grid_plan, order_sensitive_pair, overlap_scenario, record, standard_bins};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine() -> Engine {
    init_logging();
    Engine::new(EngineConfig::with_bins(standard_bins())).unwrap()
}

#[test]
fn overlap_scenario_matches_expected_outcomes() {
    let mut engine = engine();
    let outcomes: Vec<Outcome> = overlap_scenario()
        .into_iter()
        .map(|r| engine.place(r).unwrap())
        .collect();

    assert!(outcomes[0].is_placed());
    assert_eq!(
        outcomes[1].rejection().unwrap().to_string(),
        "item 2 overlaps with existing item 1"
    );
    assert!(outcomes[2].is_placed());

    let stats = engine.stats().unwrap();
    let bin0 = stats.bin(BinId(0)).unwrap();
    assert_eq!(bin0.item_count, 2);
    assert!((bin0.utilization - 5000.0 / 48400.0 * 100.0).abs() < 1e-9);
    assert!((bin0.utilization - 10.331).abs() < 0.001);
    engine.shutdown();
}

#[test]
fn state_and_stats_dump_as_json() {
    let engine = engine();
    for r in overlap_scenario() {
        engine.place(r).unwrap();
    }
    let snap = engine.snapshot().unwrap();
    let stats = engine.stats().unwrap();

    let snap_json = serde_json::to_string(&snap).unwrap();
    let back: StateSnapshot = serde_json::from_str(&snap_json).unwrap();
    assert_eq!(back, snap);
    assert_eq!(back.bin(BinId(0)).unwrap().items.len(), 2);

    let stats_json = serde_json::to_value(&stats).unwrap();
    assert_eq!(stats_json["total_items"], 2);
    assert_eq!(stats_json["bins"][0]["item_types"][0], "Rectangle A");
    let back: SimulationStats = serde_json::from_value(stats_json).unwrap();
    assert_eq!(back.bins.len(), stats.bins.len());
    assert_eq!(back.bins[0].item_count, 2);
    assert!((back.bins[0].utilization - stats.bins[0].utilization).abs() < 1e-9);
    assert!((back.average_utilization - stats.average_utilization).abs() < 1e-9);
}

#[test]
fn out_of_bounds_and_unknown_bin_are_rejected() {
    let engine = engine();
    let outcome = engine.place(record(9, 0, 200.0, 0.0, 50.0, 50.0)).unwrap();
    assert_eq!(
        outcome.rejection().unwrap().to_string(),
        "item 9 does not fit in bin 0"
    );

    let before = engine.snapshot().unwrap();
    let outcome = engine.place(record(10, 99, 0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(outcome.rejection().unwrap().to_string(), "bin 99 does not exist");
    assert_eq!(engine.snapshot().unwrap(), before);
}

#[test]
fn reset_twice_equals_reset_once() {
    let engine = engine();
    for r in overlap_scenario() {
        engine.place(r).unwrap();
    }
    engine.reset().unwrap();
    let once = engine.stats().unwrap();
    engine.reset().unwrap();
    let twice = engine.stats().unwrap();

    assert_eq!(once.total_items, 0);
    assert_eq!(once.average_utilization, 0.0);
    assert_eq!(once.bins, twice.bins);
    assert_eq!(once.bins.len(), 4);
}

#[test]
fn enqueue_order_decides_conflicts() {
    let [first, second] = order_sensitive_pair();

    let engine_a = engine();
    let a1 = engine_a.submit(Command::Place(first.clone())).unwrap();
    let a2 = engine_a.submit(Command::Place(second.clone())).unwrap();
    assert!(a1.wait().unwrap().is_placed());
    assert!(!a2.wait().unwrap().is_placed());

    let engine_b = engine();
    let b1 = engine_b.submit(Command::Place(second)).unwrap();
    let b2 = engine_b.submit(Command::Place(first)).unwrap();
    assert!(b1.wait().unwrap().is_placed());
    assert!(!b2.wait().unwrap().is_placed());
}

#[test]
fn earlier_rejection_frees_space_for_later_placement() {
    let engine = engine();
    // Too wide for bin 3, so it is rejected and leaves the corner free.
    let wide = engine.submit(Command::Place(record(1, 3, 0.0, 0.0, 170.0, 50.0))).unwrap();
    let corner = engine.submit(Command::Place(record(2, 3, 0.0, 0.0, 50.0, 50.0))).unwrap();
    assert!(!wide.wait().unwrap().is_placed());
    assert!(corner.wait().unwrap().is_placed());
}

#[test]
fn concurrent_producers_keep_their_own_order() {
    let mut engine = engine();
    let producers: Vec<_> = (0..4u32)
        .map(|bin| {
            let sender = engine.sender().unwrap();
            thread::spawn(move || {
                // Each producer owns one bin and fills a column of it.
                (0..10u32)
                    .map(|i| {
                        let id = bin * 100 + i;
                        sender
                            .place(record(id, bin, 0.0, f64::from(i) * 15.0, 10.0, 15.0))
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for p in producers {
        assert!(p.join().unwrap().iter().all(Outcome::is_placed));
    }

    let snap = engine.snapshot().unwrap();
    for bin in &snap.bins {
        let ids: Vec<u32> = bin.items.iter().map(|item| item.id.0).collect();
        let expected: Vec<u32> = (0..10).map(|i| bin.spec.id.0 * 100 + i).collect();
        assert_eq!(ids, expected, "bin {} out of order", bin.spec.id);
    }
    assert_eq!(engine.metrics().placements_accepted, 40);
    engine.shutdown();
}

#[test]
fn shutdown_drains_then_refuses() {
    let mut engine = engine();
    let plan = grid_plan(&standard_bins(), 0, 60);
    let pending: Vec<_> = plan
        .iter()
        .cloned()
        .map(|r| engine.submit(Command::Place(r)).unwrap())
        .collect();
    let report = engine.shutdown();
    assert!(report.dispatch_joined);
    assert_eq!(report.commands_applied, plan.len() as u64);

    for p in pending {
        assert!(p.wait().unwrap().is_placed());
    }
    assert_eq!(engine.recovered_state().unwrap().total_items(), plan.len());
    assert_eq!(
        engine.place(record(999, 0, 0.0, 0.0, 1.0, 1.0)).unwrap_err(),
        SubmitError::Shutdown
    );
}

#[test]
fn lockstep_and_threaded_agree() {
    let plan = grid_plan(&standard_bins(), 0, 40)
        .into_iter()
        .chain(overlap_scenario())
        .collect::<Vec<_>>();

    let mut threaded = engine();
    let mut lockstep = LockstepSimulation::new(&EngineConfig::with_bins(standard_bins())).unwrap();
    for r in plan {
        let a = CommandSink::place(&mut threaded, r.clone()).unwrap();
        let b = CommandSink::place(&mut lockstep, r).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(threaded.stats().unwrap(), lockstep.stats());
}

#[test]
fn malformed_item_is_rejected_without_side_effects() {
    let engine = engine();
    let outcome = engine.place(record(5, 1, 0.0, 0.0, -3.0, 10.0)).unwrap();
    let rejection = outcome.rejection().unwrap();
    assert_eq!(rejection.item_id, ItemId(5));
    assert!(rejection.to_string().starts_with("item 5 is malformed: "));
    assert_eq!(engine.stats().unwrap().total_items, 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn accepted_items_fit_and_never_overlap(
        placements in prop::collection::vec(
            (0u32..5, 0.0f64..230.0, 0.0f64..230.0, 1.0f64..120.0, 1.0f64..120.0),
            1..60,
        )
    ) {
        let mut sim = LockstepSimulation::new(&EngineConfig::with_bins(standard_bins())).unwrap();
        for (i, (bin, x, y, w, h)) in placements.into_iter().enumerate() {
            sim.place(record(i as u32, bin, x, y, w, h));
        }

        let snap = sim.snapshot();
        for bin in &snap.bins {
            for (i, a) in bin.items.iter().enumerate() {
                prop_assert!(fits(&a.bounds, &bin.spec));
                for b in &bin.items[i + 1..] {
                    prop_assert!(!overlaps(&a.bounds, &b.bounds));
                }
            }
        }
        prop_assert_eq!(sim.stats().total_items, snap.total_items());
    }
}
