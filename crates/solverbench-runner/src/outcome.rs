//! Result of a single solver invocation.

/// The outcome of running one solver once on one puzzle.
///
/// Only [`Elapsed`](Self::Elapsed) contributes a sample to aggregated statistics.
/// Every other variant is a failure class that is counted but never averaged.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::IsVariant)]
pub enum TrialOutcome {
    /// The solver reported this many milliseconds.
    #[display("{_0:.4} ms")]
    Elapsed(f64),
    /// The executable does not exist.
    #[display("executable not found")]
    NotFound,
    /// The solver did not finish within the time budget and was killed.
    #[display("timed out")]
    TimedOut,
    /// The solver finished but printed no parsable `ms` line.
    #[display("unparsed output")]
    UnparsedOutput,
    /// The solver could not be started or its pipes failed.
    #[display("invocation failed")]
    InvocationFailed,
}

impl TrialOutcome {
    /// Sentinel for a missing executable or an invocation error.
    pub const NOT_FOUND_SENTINEL: f64 = -1.0;
    /// Sentinel for a timed-out invocation.
    pub const TIMED_OUT_SENTINEL: f64 = -2.0;
    /// Sentinel for output without a parsable elapsed time.
    pub const UNPARSED_SENTINEL: f64 = -3.0;

    /// Interprets a solver's standard output.
    ///
    /// The first line containing `ms` is taken as the timing line and its
    /// leading whitespace-delimited token is parsed as milliseconds. Later lines
    /// are not considered even if the first one fails to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use solverbench_runner::TrialOutcome;
    ///
    /// let stdout = "solved\n12.5 ms\n3 ms\n";
    /// assert_eq!(TrialOutcome::from_stdout(stdout), TrialOutcome::Elapsed(12.5));
    ///
    /// assert_eq!(TrialOutcome::from_stdout("solved\n"), TrialOutcome::UnparsedOutput);
    /// assert_eq!(TrialOutcome::from_stdout("time: 4 ms\n"), TrialOutcome::UnparsedOutput);
    /// ```
    #[must_use]
    pub fn from_stdout(stdout: &str) -> Self {
        let Some(line) = stdout.lines().find(|line| line.contains("ms")) else {
            return Self::UnparsedOutput;
        };
        match line.split_whitespace().next().map(str::parse::<f64>) {
            Some(Ok(ms)) if ms.is_finite() && ms >= 0.0 => Self::Elapsed(ms),
            _ => Self::UnparsedOutput,
        }
    }

    /// Returns the elapsed time if the solver succeeded.
    #[must_use]
    pub fn elapsed_ms(self) -> Option<f64> {
        match self {
            Self::Elapsed(ms) => Some(ms),
            _ => None,
        }
    }

    /// Returns the elapsed time, or the sentinel value of the failure class.
    #[must_use]
    pub fn sentinel_value(self) -> f64 {
        match self {
            Self::Elapsed(ms) => ms,
            Self::NotFound | Self::InvocationFailed => Self::NOT_FOUND_SENTINEL,
            Self::TimedOut => Self::TIMED_OUT_SENTINEL,
            Self::UnparsedOutput => Self::UNPARSED_SENTINEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ms_line_wins() {
        assert_eq!(
            TrialOutcome::from_stdout("warming up\n0.25 ms elapsed\n99 ms\n"),
            TrialOutcome::Elapsed(0.25)
        );
        // The first matching line is authoritative even when it is malformed.
        assert_eq!(
            TrialOutcome::from_stdout("elapsed ms: 3\n3 ms\n"),
            TrialOutcome::UnparsedOutput
        );
    }

    #[test]
    fn test_zero_and_negative_times() {
        assert_eq!(TrialOutcome::from_stdout("0 ms"), TrialOutcome::Elapsed(0.0));
        assert_eq!(
            TrialOutcome::from_stdout("-1 ms"),
            TrialOutcome::UnparsedOutput
        );
        assert_eq!(
            TrialOutcome::from_stdout("NaN ms"),
            TrialOutcome::UnparsedOutput
        );
        assert_eq!(TrialOutcome::from_stdout(""), TrialOutcome::UnparsedOutput);
    }

    #[test]
    fn test_sentinels() {
        assert!((TrialOutcome::NotFound.sentinel_value() - -1.0).abs() < f64::EPSILON);
        assert!((TrialOutcome::InvocationFailed.sentinel_value() - -1.0).abs() < f64::EPSILON);
        assert!((TrialOutcome::TimedOut.sentinel_value() - -2.0).abs() < f64::EPSILON);
        assert!((TrialOutcome::UnparsedOutput.sentinel_value() - -3.0).abs() < f64::EPSILON);
        assert_eq!(TrialOutcome::Elapsed(7.5).elapsed_ms(), Some(7.5));
        assert_eq!(TrialOutcome::TimedOut.elapsed_ms(), None);
        assert!(TrialOutcome::TimedOut.is_timed_out());
    }

    #[test]
    fn test_display() {
        assert_eq!(TrialOutcome::Elapsed(12.5).to_string(), "12.5000 ms");
        assert_eq!(TrialOutcome::TimedOut.to_string(), "timed out");
    }
}
