//! Running solver executables as child processes.

use std::{
    io::{self, Read as _, Write as _},
    process::{Child, Command, ExitStatus, Stdio},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use solverbench_core::Grid;

use crate::{Invocation, SolverDescriptor, TrialOutcome};

/// Runs one solver on one puzzle at one concurrency level.
///
/// [`BenchmarkMatrix`](crate::BenchmarkMatrix) drives solvers through this trait,
/// which keeps the sweep logic independent of process handling.
pub trait SolverRunner {
    /// Runs `solver` on `puzzle` and reports the outcome.
    ///
    /// Implementations must not fail: every fault is reported as a
    /// [`TrialOutcome`] failure class.
    fn run(&mut self, solver: &SolverDescriptor, puzzle: &Grid, level: u32) -> TrialOutcome;
}

impl<T> SolverRunner for &mut T
where
    T: SolverRunner + ?Sized,
{
    fn run(&mut self, solver: &SolverDescriptor, puzzle: &Grid, level: u32) -> TrialOutcome {
        (**self).run(solver, puzzle, level)
    }
}

/// Runs solvers as child processes under a wall-clock timeout.
///
/// The requested concurrency level is passed through an environment variable
/// (`OMP_NUM_THREADS` unless overridden). When the timeout expires the child is
/// killed outright.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    timeout: Duration,
    env_var: String,
    poll_interval: Duration,
}

impl ProcessInvoker {
    /// Environment variable carrying the concurrency level by default.
    pub const DEFAULT_ENV_VAR: &str = "OMP_NUM_THREADS";

    /// Creates an invoker with the given timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            env_var: Self::DEFAULT_ENV_VAR.to_owned(),
            poll_interval: Duration::from_millis(5),
        }
    }

    /// Overrides the environment variable carrying the concurrency level.
    #[must_use]
    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = env_var.into();
        self
    }

    /// Returns the timeout applied to each invocation.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `solver` with an already encoded puzzle.
    ///
    /// `side` is passed as the first argument to argv-form solvers; stdin-form
    /// solvers receive `payload` on standard input instead. A missing executable
    /// is reported without spawning anything.
    #[must_use]
    pub fn invoke(
        &self,
        solver: &SolverDescriptor,
        payload: &str,
        side: usize,
        level: u32,
    ) -> TrialOutcome {
        if !solver.path().exists() {
            log::debug!("{}: executable not found", solver.path().display());
            return TrialOutcome::NotFound;
        }

        match self.execute(solver, payload, side, level) {
            Ok(Some(stdout)) => TrialOutcome::from_stdout(&stdout),
            Ok(None) => {
                log::debug!(
                    "{} (level {level}) killed after {:?}",
                    solver.name(),
                    self.timeout
                );
                TrialOutcome::TimedOut
            }
            Err(err) => {
                log::warn!("error running {}: {err}", solver.path().display());
                TrialOutcome::InvocationFailed
            }
        }
    }

    /// Spawns the solver and collects its standard output.
    ///
    /// Returns `Ok(None)` if the child was killed on timeout, or if its output was
    /// still open when the deadline passed.
    fn execute(
        &self,
        solver: &SolverDescriptor,
        payload: &str,
        side: usize,
        level: u32,
    ) -> io::Result<Option<String>> {
        let mut command = match solver.invocation() {
            Invocation::Stdin => {
                let mut command = Command::new(solver.path());
                command.stdin(Stdio::piped());
                command
            }
            Invocation::Argv { launcher } => {
                let mut command = match launcher {
                    Some(launcher) => {
                        let mut command = Command::new(launcher.program());
                        command.args(launcher.args()).arg(solver.path());
                        command
                    }
                    None => Command::new(solver.path()),
                };
                command
                    .arg(side.to_string())
                    .arg(payload)
                    .stdin(Stdio::null());
                command
            }
        };
        command
            .env(&self.env_var, level.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let deadline = Instant::now() + self.timeout;
        let mut child = command.spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = payload.to_owned();
            // A solver may exit without draining its input; a broken pipe is not a fault.
            thread::spawn(move || {
                let _ = stdin.write_all(payload.as_bytes());
            });
        }

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = tx.send(stdout.read_to_string(&mut buf).map(|_| buf));
        });

        let Some(status) = wait_with_timeout(&mut child, deadline, self.poll_interval)? else {
            return Ok(None);
        };
        if !status.success() {
            log::debug!("{} exited with {status}", solver.name());
        }

        // Descendants of the solver may still hold its stdout open after it exits.
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(stdout) => Ok(Some(stdout?)),
            Err(RecvTimeoutError::Timeout) => {
                log::debug!(
                    "{} exited but its output was still open after {:?}",
                    solver.name(),
                    self.timeout
                );
                Ok(None)
            }
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::other("stdout reader panicked")),
        }
    }
}

impl SolverRunner for ProcessInvoker {
    fn run(&mut self, solver: &SolverDescriptor, puzzle: &Grid, level: u32) -> TrialOutcome {
        match solver.invocation().encoding().encode(puzzle) {
            Ok(payload) => self.invoke(solver, &payload, puzzle.side(), level),
            Err(err) => {
                log::warn!("cannot encode puzzle for {}: {err}", solver.name());
                TrialOutcome::InvocationFailed
            }
        }
    }
}

/// Polls `child` until it exits or `deadline` passes.
///
/// On timeout, or if the child cannot be polled, the child is killed and reaped.
/// A timeout returns `Ok(None)`.
fn wait_with_timeout(
    child: &mut Child,
    deadline: Instant,
    poll_interval: Duration,
) -> io::Result<Option<ExitStatus>> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {}
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(err);
            }
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(poll_interval);
    }
}
