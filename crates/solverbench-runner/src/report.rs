//! Summary statistics and per-tier winners.

use std::io;

use crate::{AggregateTable, FailureCounts, LogSink};

const RULE_WIDTH: usize = 80;

/// One row of the report: the mean of a single aggregate cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Solver display name.
    pub solver: String,
    /// Concurrency level.
    pub concurrency: u32,
    /// Mean time in milliseconds, or `None` if no trial succeeded.
    pub mean_ms: Option<f64>,
    /// Number of successful trials.
    pub samples: usize,
    /// Failed trials by class.
    pub failures: FailureCounts,
}

/// The fastest configuration of a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    /// Solver display name.
    pub solver: String,
    /// Concurrency level.
    pub concurrency: u32,
    /// Mean time in milliseconds.
    pub mean_ms: f64,
}

/// The rows and winner of one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSummary {
    /// Tier name.
    pub tier: String,
    /// One row per aggregate cell, by solver then concurrency level.
    pub rows: Vec<ReportRow>,
    /// The configuration with the lowest mean, if any cell succeeded.
    pub winner: Option<Winner>,
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    /// One summary per tier, in plan order.
    pub tiers: Vec<TierSummary>,
}

/// Computes per-cell means and the winner of each tier.
///
/// The winner is the cell with the strictly lowest mean; ties go to the cell
/// that comes first in solver-then-level order. Cells without samples never win.
#[must_use]
pub fn summarize(table: &AggregateTable) -> Report {
    let tiers = table
        .tiers()
        .iter()
        .map(|results| {
            let rows = results
                .cells()
                .iter()
                .map(|cell| ReportRow {
                    solver: cell.solver().to_owned(),
                    concurrency: cell.concurrency(),
                    mean_ms: cell.mean(),
                    samples: cell.samples().len(),
                    failures: cell.failures(),
                })
                .collect::<Vec<_>>();

            let mut winner: Option<Winner> = None;
            for row in &rows {
                let Some(mean_ms) = row.mean_ms else {
                    continue;
                };
                if winner.as_ref().is_none_or(|best| mean_ms < best.mean_ms) {
                    winner = Some(Winner {
                        solver: row.solver.clone(),
                        concurrency: row.concurrency,
                        mean_ms,
                    });
                }
            }

            TierSummary {
                tier: results.tier().name().to_owned(),
                rows,
                winner,
            }
        })
        .collect();
    Report { tiers }
}

impl Report {
    /// Returns the summary of the tier with the given name.
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&TierSummary> {
        self.tiers.iter().find(|summary| summary.tier == name)
    }

    /// Writes the results table followed by a winner line per tier.
    ///
    /// # Errors
    ///
    /// Returns an error if `sink` cannot be written.
    pub fn write_to(&self, sink: &mut dyn LogSink) -> io::Result<()> {
        let double = "=".repeat(RULE_WIDTH);
        let single = "-".repeat(RULE_WIDTH);

        sink.write_line("")?;
        sink.write_line(&double)?;
        sink.write_line(&format!(
            "{:<10} | {:<25} | {:<8} | {:<15}",
            "Difficulty", "Solver", "Threads", "Avg Time (ms)"
        ))?;
        sink.write_line(&double)?;

        for summary in &self.tiers {
            for row in &summary.rows {
                let value = match row.mean_ms {
                    Some(mean) => format!("{mean:.4}"),
                    None if row.failures.total() > 0 => {
                        format!("Failed/Timeout ({})", row.failures)
                    }
                    None => "Failed/Timeout".to_owned(),
                };
                sink.write_line(&format!(
                    "{:<10} | {:<25} | {:<8} | {value}",
                    summary.tier, row.solver, row.concurrency
                ))?;
            }
            sink.write_line(&single)?;
            sink.write_line(&match &summary.winner {
                Some(winner) => format!(
                    "Winner for {}: {} (Threads: {}) ({:.4} ms)",
                    summary.tier, winner.solver, winner.concurrency, winner.mean_ms
                ),
                None => format!("Winner for {}: None", summary.tier),
            })?;
            sink.write_line(&double)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Concurrency, DifficultyTier, Invocation, MemorySink, SolverDescriptor, TierResults,
        TrialOutcome,
    };

    fn table(samples: &[&[TrialOutcome]]) -> AggregateTable {
        let solvers = [
            SolverDescriptor::new("build/omp", Invocation::Stdin, Concurrency::Threaded),
            SolverDescriptor::new("build/omp_simd", Invocation::Stdin, Concurrency::Threaded),
        ];
        let mut results = TierResults::new(DifficultyTier::new("Easy", 35), &solvers, &[1, 2]);
        for (cell, outcomes) in results.cells_mut().iter_mut().zip(samples) {
            for &outcome in *outcomes {
                cell.record(outcome);
            }
        }
        AggregateTable::new(vec![results])
    }

    #[test]
    fn test_mean_of_samples() {
        use TrialOutcome::Elapsed;
        let report = summarize(&table(&[&[Elapsed(10.0), Elapsed(20.0), Elapsed(30.0)]]));
        let easy = report.tier("Easy").unwrap();
        assert_eq!(easy.rows.len(), 4);
        assert_eq!(easy.rows[0].mean_ms, Some(20.0));
        assert_eq!(easy.rows[0].samples, 3);
        assert_eq!(easy.rows[1].mean_ms, None);
    }

    #[test]
    fn test_lowest_mean_wins() {
        use TrialOutcome::Elapsed;
        let report = summarize(&table(&[&[Elapsed(5.0)], &[Elapsed(3.0)]]));
        let winner = report.tiers[0].winner.as_ref().unwrap();
        assert_eq!((winner.solver.as_str(), winner.concurrency), ("omp", 2));
        assert!((winner.mean_ms - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tie_goes_to_earlier_cell() {
        use TrialOutcome::Elapsed;
        let report = summarize(&table(&[
            &[],
            &[Elapsed(4.0)],
            &[Elapsed(4.0)],
            &[Elapsed(6.0)],
        ]));
        let winner = report.tiers[0].winner.as_ref().unwrap();
        assert_eq!((winner.solver.as_str(), winner.concurrency), ("omp", 2));
    }

    #[test]
    fn test_no_successful_cell_means_no_winner() {
        let report = summarize(&table(&[&[TrialOutcome::TimedOut], &[TrialOutcome::NotFound]]));
        assert_eq!(report.tiers[0].winner, None);

        let mut sink = MemorySink::new();
        report.write_to(&mut sink).unwrap();
        let text = sink.contents();
        assert!(text.contains("Easy       | omp                       | 1        | Failed/Timeout (timed out: 1)"));
        assert!(text.contains("Easy       | omp_simd                  | 2        | Failed/Timeout\n"));
        assert!(text.contains("Winner for Easy: None"));
    }

    #[test]
    fn test_write_table() {
        use TrialOutcome::Elapsed;
        let report = summarize(&table(&[&[Elapsed(12.5)], &[Elapsed(2.25), Elapsed(2.75)]]));
        let mut sink = MemorySink::new();
        report.write_to(&mut sink).unwrap();

        let lines = sink.lines();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(80));
        assert_eq!(
            lines[2],
            "Difficulty | Solver                    | Threads  | Avg Time (ms)  "
        );
        assert_eq!(lines[4], "Easy       | omp                       | 1        | 12.5000");
        assert_eq!(lines[5], "Easy       | omp                       | 2        | 2.5000");
        assert_eq!(lines[8], "-".repeat(80));
        assert_eq!(lines[9], "Winner for Easy: omp (Threads: 2) (2.5000 ms)");
        assert_eq!(lines[10], "=".repeat(80));
    }
}
