//! Replays an ordered placement plan against a [`CommandSink`].
//!
//! Each record becomes one `Place` command. The runner waits for the
//! outcome, records a [`StepReport`], then sleeps for the pacing delay
//! before the next record. Rejections never stop a run; only a
//! shut-down sink does.

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use packsim_core::{BinId, Command, ItemId, Outcome, PlacementRecord, Rejection, SimulationStats};

use crate::engine::CommandSender;
use crate::sink::{expect_stats, CommandSink, SubmitError};

/// Pacing between steps when none is configured.
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

// ── RunnerConfig ─────────────────────────────────────────────────

/// How a plan is replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Delay after each step. Zero disables pacing.
    pub pacing: Duration,
    /// Longest wait for one outcome. `None` waits indefinitely.
    pub outcome_timeout: Option<Duration>,
}

impl RunnerConfig {
    /// No pacing and no timeout.
    pub fn immediate() -> Self {
        Self {
            pacing: Duration::ZERO,
            outcome_timeout: None,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
            outcome_timeout: None,
        }
    }
}

// ── Reports ──────────────────────────────────────────────────────

/// What happened to one placement attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// The item was placed.
    Placed,
    /// Validation rejected the item.
    Rejected(Rejection),
    /// No outcome arrived within the configured timeout. The command
    /// may still be applied later.
    TimedOut,
}

/// One line of a run report.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// 1-based position in the plan.
    pub step: usize,
    /// Item the step tried to place.
    pub item_id: ItemId,
    /// Target bin.
    pub bin_id: BinId,
    /// Free-form item label.
    pub item_type: String,
    /// Verdict.
    pub result: StepResult,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}: ", self.step)?;
        match &self.result {
            StepResult::Placed => write!(
                f,
                "placed {} (item {}) in bin {}",
                self.item_type, self.item_id, self.bin_id
            ),
            StepResult::Rejected(r) => write!(f, "rejected: {r}"),
            StepResult::TimedOut => write!(
                f,
                "no outcome for item {} within timeout",
                self.item_id
            ),
        }
    }
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// One entry per plan record, in plan order.
    pub steps: Vec<StepReport>,
    /// Steps that placed their item.
    pub placed: usize,
    /// Steps rejected by validation.
    pub rejected: usize,
    /// Steps whose outcome did not arrive in time.
    pub timed_out: usize,
    /// Statistics queried after the last step.
    pub final_stats: Option<SimulationStats>,
}

impl RunReport {
    fn push(&mut self, step: StepReport) {
        match step.result {
            StepResult::Placed => self.placed += 1,
            StepResult::Rejected(_) => self.rejected += 1,
            StepResult::TimedOut => self.timed_out += 1,
        }
        self.steps.push(step);
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        write!(
            f,
            "Simulation complete: {} placed, {} rejected",
            self.placed, self.rejected
        )?;
        if self.timed_out > 0 {
            write!(f, ", {} timed out", self.timed_out)?;
        }
        if let Some(stats) = &self.final_stats {
            write!(f, "\n{stats}")?;
        }
        Ok(())
    }
}

// ── PlanRunner ───────────────────────────────────────────────────

/// Replays placement plans.
#[derive(Clone, Debug, Default)]
pub struct PlanRunner {
    config: RunnerConfig,
}

impl PlanRunner {
    /// A runner with the given pacing and timeout.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// The runner's configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Replay `records` in order against `sink`.
    ///
    /// Returns early only with [`SubmitError::Shutdown`] (or an
    /// unexpected outcome to the final stats query).
    pub fn run<S, I>(&self, sink: &mut S, records: I) -> Result<RunReport, SubmitError>
    where
        S: CommandSink + ?Sized,
        I: IntoIterator<Item = PlacementRecord>,
    {
        let mut report = RunReport {
            steps: Vec::new(),
            placed: 0,
            rejected: 0,
            timed_out: 0,
            final_stats: None,
        };

        for (index, record) in records.into_iter().enumerate() {
            let step = index + 1;
            let item_id = record.item_id;
            let bin_id = record.bin_id;
            let item_type = record.item_type.clone();

            let pending = sink.submit(Command::Place(record))?;
            let waited = match self.config.outcome_timeout {
                Some(timeout) => pending.wait_timeout(timeout),
                None => pending.wait(),
            };
            let result = match waited {
                Ok(Outcome::Placed { .. }) => StepResult::Placed,
                Ok(Outcome::Rejected(rejection)) => StepResult::Rejected(rejection),
                Ok(_) => return Err(SubmitError::UnexpectedOutcome { command: "place" }),
                Err(SubmitError::Timeout) => StepResult::TimedOut,
                Err(e) => return Err(e),
            };

            let entry = StepReport {
                step,
                item_id,
                bin_id,
                item_type,
                result,
            };
            match entry.result {
                StepResult::Placed => log::info!("{entry}"),
                _ => log::warn!("{entry}"),
            }
            report.push(entry);

            if !self.config.pacing.is_zero() {
                thread::sleep(self.config.pacing);
            }
        }

        report.final_stats = Some(expect_stats(sink.execute(Command::QueryStats)?)?);
        log::info!(
            "simulation complete: {} placed, {} rejected, {} timed out",
            report.placed,
            report.rejected,
            report.timed_out
        );
        Ok(report)
    }

    /// Replay `records` on a new producer thread.
    pub fn spawn(
        self,
        mut sender: CommandSender,
        records: Vec<PlacementRecord>,
    ) -> std::io::Result<JoinHandle<Result<RunReport, SubmitError>>> {
        thread::Builder::new()
            .name("packsim-runner".into())
            .spawn(move || self.run(&mut sender, records))
    }
}
