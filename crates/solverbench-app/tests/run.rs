//! Full runs of the `solverbench` command against fake solver scripts.
#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt as _,
    path::Path,
    time::Duration,
};

use solverbench_app::{PuzzleMode, RunSettings, SuiteKind, run, run_with_sink};
use solverbench_core::{Order, encoding};
use solverbench_generator::{PuzzleGenerator, PuzzleSeed};
use solverbench_runner::MemorySink;

fn script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir_in(env!("CARGO_TARGET_TMPDIR")).unwrap()
}

#[test]
fn directory_mode_writes_result_log() {
    let root = tempdir();
    let solvers = root.path().join("build");
    let problems = root.path().join("problems");
    fs::create_dir_all(&solvers).unwrap();
    fs::create_dir_all(problems.join("easy")).unwrap();

    let generator = PuzzleGenerator::new(Order::NINE);
    for (i, seed) in [[1; 32], [2; 32]].into_iter().enumerate() {
        let puzzle = generator
            .generate_with_seed(35, PuzzleSeed::from_bytes(seed))
            .unwrap();
        fs::write(
            problems.join("easy").join(format!("p{i}.txt")),
            encoding::encode_lines(&puzzle.problem),
        )
        .unwrap();
    }

    script(&solvers, "sudoku_serial", "cat > /dev/null\necho \"10 ms\"");
    script(
        &solvers,
        "sudoku_omp",
        "cat > /dev/null\necho \"$((8 / OMP_NUM_THREADS)) ms\"",
    );

    let output = root.path().join("real.txt");
    let config = RunSettings {
        suite: SuiteKind::Omp,
        solver_dir: Some(solvers),
        concurrency_levels: Some(vec![1, 2]),
        output: Some(output.clone()),
        problem_dir: Some(problems.clone()),
        ..RunSettings::default()
    }
    .resolve();
    assert_eq!(config.mode, PuzzleMode::Directory(problems));

    let reports = run(&config).unwrap();
    assert_eq!(reports.len(), 1);
    let easy = reports[0].tier("Easy").unwrap();
    let winner = easy.winner.as_ref().unwrap();
    assert_eq!((winner.solver.as_str(), winner.concurrency), ("sudoku_omp", 2));
    assert!((winner.mean_ms - 4.0).abs() < f64::EPSILON);
    assert_eq!(reports[0].tier("Medium").unwrap().winner, None);
    assert_eq!(reports[0].tiers.len(), 3);

    let log = fs::read_to_string(&output).unwrap();
    assert!(log.starts_with("Real Benchmark Run at "));
    assert!(log.contains("=== 9x9 Sudoku Benchmark ==="));
    assert!(log.contains("Running Easy tests (2 trials)..."));
    assert!(log.contains("Running Medium tests (0 trials)..."));
    assert!(log.contains("Easy       | sudoku_serial             | 1        | 10.0000"));
    assert!(log.contains("Easy       | sudoku_simd               | 1        | Failed/Timeout (not found: 2)"));
    assert!(log.contains("Winner for Easy: sudoku_omp (Threads: 2) (4.0000 ms)"));
    assert!(log.contains("Winner for Hard: None"));
    assert!(!log.contains("Expert"));
    assert!(!log.contains("16x16"));
}

#[test]
fn synthetic_run_covers_every_section() {
    let root = tempdir();
    for name in [
        "generic_backtrack",
        "generic_bitset",
        "generic_csp",
        "generic_pruning",
        "generic_dlx",
    ] {
        script(root.path(), name, "echo \"side $1\"\necho \"$1 ms\"");
    }

    let seed = PuzzleSeed::from_bytes([3; 32]);
    let config = RunSettings {
        suite: SuiteKind::Generic,
        solver_dir: Some(root.path().to_owned()),
        trials: Some(1),
        timeout: Some(Duration::from_secs(5)),
        seed: Some(seed),
        ..RunSettings::default()
    }
    .resolve();

    let mut sink = MemorySink::new();
    let reports = run_with_sink(&config, &mut sink).unwrap();
    assert_eq!(reports.len(), 3);

    let lines = sink.lines();
    assert!(lines[0].starts_with("Benchmark Run at "));
    assert!(lines[1].starts_with("solverbench "));
    assert_eq!(lines[2], format!("Seed: {seed}"));
    for (report, side) in reports.iter().zip([9.0, 16.0, 25.0]) {
        for tier in &report.tiers {
            assert_eq!(tier.rows.len(), 5);
            let winner = tier.winner.as_ref().unwrap();
            // All solvers tie, so the first one wins.
            assert_eq!(winner.solver, "generic_backtrack");
            assert!((winner.mean_ms - side).abs() < f64::EPSILON);
        }
    }
    let contents = sink.contents();
    assert!(contents.contains("=== 25x25 Sudoku Benchmark ==="));
    assert!(contents.contains("Winner for Expert: generic_backtrack (Threads: 1) (25.0000 ms)"));
}
