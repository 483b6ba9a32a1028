//! Aggregation of several simulation tasks into one result.

use std::sync::Arc;

use pricer_core::types::{DispersionTable, Greek, GreekTable};
use pricer_models::instruments::{OptionKind, OptionSpec};
use tracing::{debug, info};

use super::error::TaskError;
use super::simulation::{SimulationOutput, SimulationTask};
use super::state::TaskState;
use crate::mc::{ConfigError, MonteCarloConfig, MonteCarloPricer};

/// An ordered collection of [`SimulationTask`]s, one per instrument.
///
/// Results are merged in insertion order. Point estimates sharing a Greek
/// are summed; standard deviations sharing a Greek become undefined, since
/// the deviation of a sum of independent estimators is not the sum of their
/// deviations.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::Greek;
/// use pricer_models::instruments::{OptionKind, OptionSpec};
/// use pricer_pricing::mc::MonteCarloConfig;
/// use pricer_pricing::task::SimulationBatch;
///
/// let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call).unwrap();
/// let config = MonteCarloConfig::builder().n_iterations(5_000).seed(7).build().unwrap();
/// let batch = SimulationBatch::straddle(spec, config, &[Greek::Delta]).unwrap();
///
/// let (values, dispersion) = batch.run_synchronous(&[50.0]).unwrap();
/// assert!(values.get(Greek::Price).is_some());
/// assert!(dispersion.is_undefined(Greek::Price));
/// ```
#[derive(Debug, Default)]
pub struct SimulationBatch {
    tasks: Vec<SimulationTask>,
}

impl SimulationBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a long straddle: a call task and a put task on the same
    /// economics. With a seed, the put leg draws from `seed + 1` so the two
    /// legs stay independent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` is invalid.
    pub fn straddle(
        spec: OptionSpec,
        config: MonteCarloConfig,
        greeks: &[Greek],
    ) -> Result<Self, ConfigError> {
        let call = MonteCarloPricer::new(spec.with_kind(OptionKind::Call), config)?;

        let put_config = MonteCarloConfig::builder()
            .n_iterations(config.n_iterations())
            .maybe_seed(config.seed().map(|s| s.wrapping_add(1)))
            .build()?;
        let put = MonteCarloPricer::new(spec.with_kind(OptionKind::Put), put_config)?;

        Ok(Self::new()
            .with_task(SimulationTask::new("call", Arc::new(call), greeks))
            .with_task(SimulationTask::new("put", Arc::new(put), greeks)))
    }

    /// Appends a task; it is merged after every task already present.
    pub fn add_task(&mut self, task: SimulationTask) {
        self.tasks.push(task);
    }

    /// Builder form of [`add_task`](Self::add_task).
    pub fn with_task(mut self, task: SimulationTask) -> Self {
        self.add_task(task);
        self
    }

    /// Tasks in merge order.
    pub fn tasks(&self) -> &[SimulationTask] {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the batch holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Starts every idle task's worker.
    ///
    /// # Errors
    ///
    /// Stops at the first task that fails to start; earlier tasks keep
    /// running.
    pub fn start(&mut self) -> Result<(), TaskError> {
        for task in self.tasks.iter_mut().filter(|t| t.state() == TaskState::Idle) {
            task.start()?;
        }
        info!(tasks = self.tasks.len(), "simulation batch started");
        Ok(())
    }

    /// Prices `spots` with every task on the caller's thread and merges.
    ///
    /// Works whether or not the tasks have been started.
    ///
    /// # Errors
    ///
    /// Propagates the first task failure.
    pub fn run_synchronous(&self, spots: &[f64]) -> Result<SimulationOutput, TaskError> {
        debug!(tasks = self.tasks.len(), spots = spots.len(), "synchronous batch run");
        let mut merged = Merged::new(spots.len());
        for task in &self.tasks {
            merged.merge(task.calculate(spots)?)?;
        }
        Ok(merged.finish())
    }

    /// Submits `spots` to every task, then retrieves and merges the replies
    /// in task order.
    ///
    /// Each task's reply is matched to the request id this call submitted.
    /// If the future is dropped part way, or returns early on an error, the
    /// results it did not collect stay queued and the next run discards
    /// them instead of merging them.
    ///
    /// # Errors
    ///
    /// - `TaskError::NotStarted` if any task is idle; nothing is submitted
    /// - `TaskError::Stopped` if any task is stopping or stopped
    /// - Any worker failure, in task order
    pub async fn run_concurrent(&mut self, spots: &[f64]) -> Result<SimulationOutput, TaskError> {
        for task in &self.tasks {
            match task.state() {
                TaskState::Running => {}
                TaskState::Idle => return Err(TaskError::NotStarted(task.name().to_string())),
                TaskState::Stopping | TaskState::Stopped => {
                    return Err(TaskError::Stopped(task.name().to_string()))
                }
            }
        }

        debug!(tasks = self.tasks.len(), spots = spots.len(), "concurrent batch run");
        let requests = self
            .tasks
            .iter()
            .map(|task| task.submit(spots.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut merged = Merged::new(spots.len());
        for (task, request) in self.tasks.iter_mut().zip(requests) {
            merged.merge(task.retrieve_request(request).await?)?;
        }
        Ok(merged.finish())
    }

    /// Requests every task to stop.
    pub fn stop(&mut self) {
        for task in &mut self.tasks {
            task.stop();
        }
    }

    /// Stops every task and waits for each worker to exit.
    ///
    /// # Errors
    ///
    /// Reports the first worker failure after every task has been joined.
    pub async fn join(&mut self) -> Result<(), TaskError> {
        self.stop();
        let mut first_error = None;
        for task in &mut self.tasks {
            if let Err(e) = task.join().await {
                first_error.get_or_insert(e);
            }
        }
        info!(tasks = self.tasks.len(), "simulation batch joined");
        first_error.map_or(Ok(()), Err)
    }
}

struct Merged {
    values: GreekTable,
    dispersion: DispersionTable,
}

impl Merged {
    fn new(rows: usize) -> Self {
        Self {
            values: GreekTable::new(rows),
            dispersion: DispersionTable::new(rows),
        }
    }

    fn merge(&mut self, (values, dispersion): SimulationOutput) -> Result<(), TaskError> {
        self.values.accumulate(&values)?;
        self.dispersion.absorb(&dispersion)?;
        Ok(())
    }

    fn finish(self) -> SimulationOutput {
        (self.values, self.dispersion)
    }
}
