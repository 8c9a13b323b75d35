//! Full benchmark runs against fake solver executables.
#![cfg(unix)]

use std::time::Duration;

use solverbench_core::Order;
use solverbench_generator::PuzzleSeed;
use solverbench_runner::{
    BenchmarkMatrix, BenchmarkPlan, Concurrency, DifficultyTier, Invocation, MemorySink,
    ProcessInvoker, SolverDescriptor, SyntheticSource, report,
};

mod common;

#[test]
fn constant_solver_wins_its_tier() {
    let dir = common::tempdir();
    let solver = common::script(dir.path(), "fake_solver", r#"cat > /dev/null; echo "12.5 ms""#);

    let plan = BenchmarkPlan {
        tiers: vec![DifficultyTier::new("Easy", 35)],
        solvers: vec![SolverDescriptor::new(
            solver,
            Invocation::Stdin,
            Concurrency::Serial,
        )],
        concurrency_levels: vec![1],
        trials_per_tier: 3,
    };
    let mut source = SyntheticSource::new(Order::NINE, PuzzleSeed::from_bytes([2; 32]));
    let mut sink = MemorySink::new();

    let table = BenchmarkMatrix::new(ProcessInvoker::new(Duration::from_secs(10)))
        .run(&plan, &mut source, &mut sink)
        .unwrap();
    let cell = table.tier("Easy").unwrap().cell("fake_solver", 1).unwrap();
    assert_eq!(cell.samples(), [12.5, 12.5, 12.5]);

    let summary = report::summarize(&table);
    let easy = summary.tier("Easy").unwrap();
    assert_eq!(easy.rows[0].mean_ms, Some(12.5));
    let winner = easy.winner.as_ref().unwrap();
    assert_eq!(winner.solver, "fake_solver");
    assert_eq!(winner.concurrency, 1);

    summary.write_to(&mut sink).unwrap();
    let text = sink.contents();
    assert!(text.starts_with("Running Easy tests (3 trials)...\n"));
    assert!(text.contains("Easy       | fake_solver               | 1        | 12.5000\n"));
    assert!(text.contains("Winner for Easy: fake_solver (Threads: 1) (12.5000 ms)\n"));
}

#[test]
fn failing_solvers_do_not_disturb_neighbours() {
    let dir = common::tempdir();
    let fast = common::script(
        dir.path(),
        "fast",
        r#"echo "threads $OMP_NUM_THREADS"; echo "$((8 / OMP_NUM_THREADS)) ms""#,
    );
    let slow = common::script(dir.path(), "slow", "sleep 5");
    let broken = common::script(dir.path(), "broken", "echo oops");

    let plan = BenchmarkPlan {
        tiers: vec![
            DifficultyTier::new("Easy", 100),
            DifficultyTier::new("Expert", 180),
        ],
        solvers: vec![
            SolverDescriptor::new(
                dir.path().join("missing"),
                Invocation::Argv { launcher: None },
                Concurrency::Serial,
            ),
            SolverDescriptor::new(slow, Invocation::Argv { launcher: None }, Concurrency::Serial),
            SolverDescriptor::new(broken, Invocation::Argv { launcher: None }, Concurrency::Serial),
            SolverDescriptor::new(fast, Invocation::Argv { launcher: None }, Concurrency::Threaded),
        ],
        concurrency_levels: vec![1, 2, 4],
        trials_per_tier: 1,
    };
    let mut source = SyntheticSource::new(Order::SIXTEEN, PuzzleSeed::from_bytes([3; 32]));
    let mut sink = MemorySink::new();

    let table = BenchmarkMatrix::new(ProcessInvoker::new(Duration::from_millis(300)))
        .run(&plan, &mut source, &mut sink)
        .unwrap();

    for tier in ["Easy", "Expert"] {
        let results = table.tier(tier).unwrap();
        assert_eq!(results.cells().len(), 6);
        assert_eq!(results.cell("missing", 1).unwrap().failures().not_found, 1);
        assert_eq!(results.cell("slow", 1).unwrap().failures().timed_out, 1);
        assert_eq!(results.cell("broken", 1).unwrap().failures().unparsed, 1);
        assert_eq!(results.cell("fast", 4).unwrap().samples(), [2.0]);
    }

    let summary = report::summarize(&table);
    for tier in &summary.tiers {
        let winner = tier.winner.as_ref().unwrap();
        assert_eq!((winner.solver.as_str(), winner.concurrency), ("fast", 4));
    }
    summary.write_to(&mut sink).unwrap();
    assert!(sink.contents().contains("| missing                   | 1        | Failed/Timeout (not found: 1)"));
}
