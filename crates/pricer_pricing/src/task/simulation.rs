//! A Monte Carlo pricer wrapped as an independently running unit of work.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pricer_core::types::{DispersionTable, Greek, GreekTable};
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::error::TaskError;
use super::state::TaskState;
use crate::mc::{ConfigError, MonteCarloPricer};

/// Point estimates and their standard deviations for one spot vector.
pub type SimulationOutput = (GreekTable, DispersionTable);

/// Sequence number assigned to each submitted spot vector, starting at 0.
pub type RequestId = u64;

type Reply = Result<SimulationOutput, TaskError>;

/// Default bounded wait between stop-flag checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// One Monte Carlo configuration behind a submit/retrieve channel pair.
///
/// The task owns an inbound queue of spot vectors and an outbound queue of
/// results. Once [`start`](Self::start)ed, a worker on the Tokio runtime
/// waits on the inbound queue with a bounded timeout, prices each vector on
/// the blocking pool and pushes the result. Results come back in
/// submission order, each tagged with the [`RequestId`] that
/// [`submit`](Self::submit) returned.
///
/// [`calculate`](Self::calculate) bypasses the channels and prices on the
/// caller's thread.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::types::Greek;
/// use pricer_models::instruments::{OptionKind, OptionSpec};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
/// use pricer_pricing::task::SimulationTask;
///
/// # #[tokio::main(flavor = "multi_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call)?;
/// let config = MonteCarloConfig::builder().n_iterations(5_000).seed(1).build()?;
/// let pricer = Arc::new(MonteCarloPricer::new(spec, config)?);
///
/// let mut task = SimulationTask::new("call", pricer, &[Greek::Delta]);
/// task.start()?;
/// task.submit(vec![45.0, 55.0])?;
/// let (values, _dispersion) = task.retrieve().await?;
/// assert_eq!(values.rows(), 2);
/// task.join().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SimulationTask {
    name: String,
    pricer: Arc<MonteCarloPricer>,
    greeks: Vec<Greek>,
    poll_interval: Duration,
    state: Arc<watch::Sender<TaskState>>,
    stop_requested: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
    next_request: AtomicU64,
    input_tx: mpsc::UnboundedSender<(RequestId, Vec<f64>)>,
    input_rx: Option<mpsc::UnboundedReceiver<(RequestId, Vec<f64>)>>,
    output_tx: Option<mpsc::UnboundedSender<(RequestId, Reply)>>,
    output_rx: mpsc::UnboundedReceiver<(RequestId, Reply)>,
    worker: Option<JoinHandle<()>>,
}

impl SimulationTask {
    /// Creates an idle task pricing `greeks` (Price is always included).
    pub fn new(name: impl Into<String>, pricer: Arc<MonteCarloPricer>, greeks: &[Greek]) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(TaskState::Idle);
        Self {
            name: name.into(),
            pricer,
            greeks: Greek::with_price(greeks),
            poll_interval: DEFAULT_POLL_INTERVAL,
            state: Arc::new(state),
            stop_requested: Arc::new(AtomicBool::new(false)),
            stop_signal: Arc::new(Notify::new()),
            next_request: AtomicU64::new(0),
            input_tx,
            input_rx: Some(input_rx),
            output_tx: Some(output_tx),
            output_rx,
            worker: None,
        }
    }

    /// Sets how long the worker waits for input before re-checking the
    /// stop flag. [`stop`](Self::stop) also wakes the worker directly, so
    /// this is only the fallback re-check period.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` for a zero interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Result<Self, ConfigError> {
        if poll_interval.is_zero() {
            return Err(ConfigError::InvalidParameter {
                name: "poll_interval",
                value: "must be non-zero".to_string(),
            });
        }
        self.poll_interval = poll_interval;
        Ok(self)
    }

    /// Task label used in logs and errors.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns produced per input, Price first.
    #[inline]
    pub fn greeks(&self) -> &[Greek] {
        &self.greeks
    }

    /// The wrapped pricer.
    #[inline]
    pub fn pricer(&self) -> &Arc<MonteCarloPricer> {
        &self.pricer
    }

    /// Bounded wait between stop-flag checks.
    #[inline]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TaskState {
        *self.state.borrow()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }

    /// Prices `spots` on the caller's thread, bypassing the channels.
    ///
    /// # Errors
    ///
    /// Propagates table construction failures.
    pub fn calculate(&self, spots: &[f64]) -> Result<SimulationOutput, TaskError> {
        Ok(self.pricer.calculate(spots, &self.greeks)?)
    }

    /// Spawns the worker on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// - `TaskError::AlreadyStarted` if a worker exists
    /// - `TaskError::Stopped` if the task was stopped before starting
    /// - `TaskError::NoRuntime` if called outside a runtime
    pub fn start(&mut self) -> Result<(), TaskError> {
        match self.state() {
            TaskState::Idle => {}
            TaskState::Running | TaskState::Stopping => {
                return Err(TaskError::AlreadyStarted(self.name.clone()))
            }
            TaskState::Stopped => return Err(TaskError::Stopped(self.name.clone())),
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| TaskError::NoRuntime(self.name.clone()))?;

        let (Some(inputs), Some(outputs)) = (self.input_rx.take(), self.output_tx.take()) else {
            return Err(TaskError::AlreadyStarted(self.name.clone()));
        };

        let worker = Worker {
            name: self.name.clone(),
            pricer: Arc::clone(&self.pricer),
            greeks: self.greeks.clone(),
            poll_interval: self.poll_interval,
            state: Arc::clone(&self.state),
            stop_requested: Arc::clone(&self.stop_requested),
            stop_signal: Arc::clone(&self.stop_signal),
            inputs,
            outputs,
        };

        self.state.send_replace(TaskState::Running);
        self.worker = Some(runtime.spawn(worker.run()));
        info!(task = %self.name, greeks = ?self.greeks, "simulation task started");
        Ok(())
    }

    /// Queues a spot vector for the worker and returns its request id.
    /// Never blocks.
    ///
    /// Inputs may be queued before [`start`](Self::start); they are
    /// processed once the worker runs.
    ///
    /// # Errors
    ///
    /// `TaskError::Stopped` once a stop has been requested.
    pub fn submit(&self, spots: Vec<f64>) -> Result<RequestId, TaskError> {
        if self.stop_requested.load(Ordering::SeqCst) {
            return Err(TaskError::Stopped(self.name.clone()));
        }
        let request = self.next_request.fetch_add(1, Ordering::SeqCst);
        self.input_tx
            .send((request, spots))
            .map_err(|_| TaskError::ChannelClosed(self.name.clone()))?;
        Ok(request)
    }

    /// Waits for the next result, in submission order.
    ///
    /// Waits indefinitely while the task is idle or running and nothing is
    /// pending.
    ///
    /// # Errors
    ///
    /// - `TaskError::ChannelClosed` once the worker has exited and every
    ///   buffered result has been taken
    /// - The worker's own failure for this input
    pub async fn retrieve(&mut self) -> Result<SimulationOutput, TaskError> {
        self.next_reply().await?.1
    }

    /// Waits for the result of `request`, discarding older results nobody
    /// collected.
    ///
    /// Results left behind by an abandoned caller (for example a dropped
    /// [`SimulationBatch::run_concurrent`](super::SimulationBatch::run_concurrent)
    /// future) are skipped here rather than handed to the next caller.
    ///
    /// # Errors
    ///
    /// - `TaskError::ResultTaken` if `request`'s result was already retrieved
    /// - Otherwise as [`retrieve`](Self::retrieve)
    pub async fn retrieve_request(
        &mut self,
        request: RequestId,
    ) -> Result<SimulationOutput, TaskError> {
        loop {
            let (id, reply) = self.next_reply().await?;
            if id == request {
                return reply;
            }
            if id > request {
                return Err(TaskError::ResultTaken {
                    task: self.name.clone(),
                    request,
                });
            }
            debug!(task = %self.name, stale = id, wanted = request, "discarding uncollected result");
        }
    }

    async fn next_reply(&mut self) -> Result<(RequestId, Reply), TaskError> {
        self.output_rx
            .recv()
            .await
            .ok_or_else(|| TaskError::ChannelClosed(self.name.clone()))
    }

    /// Requests a cooperative stop.
    ///
    /// A running worker finishes any input it has already dequeued, then
    /// exits without waiting out its poll interval. An idle task moves straight to `Stopped`. Repeated
    /// calls are no-ops.
    pub fn stop(&mut self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        // Stores a permit if the worker is busy, so the wake-up is not lost.
        self.stop_signal.notify_one();
        let previous = self.state();
        match previous {
            TaskState::Idle => {
                // No worker will ever own these; closing them lets `retrieve`
                // report a closed channel instead of waiting forever.
                self.input_rx = None;
                self.output_tx = None;
                self.state.send_replace(TaskState::Stopped);
            }
            TaskState::Running => {
                self.state.send_if_modified(|s| {
                    if *s == TaskState::Running {
                        *s = TaskState::Stopping;
                        true
                    } else {
                        false
                    }
                });
            }
            TaskState::Stopping | TaskState::Stopped => return,
        }
        debug!(task = %self.name, from = %previous, "stop requested");
    }

    /// Requests a stop and waits for the worker to exit.
    ///
    /// Returns once any in-flight computation has completed. Calling it
    /// again, or on a task that never started, returns immediately.
    ///
    /// # Errors
    ///
    /// `TaskError::Worker` if the worker panicked.
    pub async fn join(&mut self) -> Result<(), TaskError> {
        self.stop();
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        let outcome = worker.await;
        self.state.send_replace(TaskState::Stopped);
        outcome.map_err(|e| {
            error!(task = %self.name, error = %e, "simulation worker failed");
            TaskError::Worker(e.to_string())
        })
    }
}

/// State moved onto the runtime by [`SimulationTask::start`].
struct Worker {
    name: String,
    pricer: Arc<MonteCarloPricer>,
    greeks: Vec<Greek>,
    poll_interval: Duration,
    state: Arc<watch::Sender<TaskState>>,
    stop_requested: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
    inputs: mpsc::UnboundedReceiver<(RequestId, Vec<f64>)>,
    outputs: mpsc::UnboundedSender<(RequestId, Reply)>,
}

impl Worker {
    async fn run(mut self) {
        loop {
            if self.stop_requested.load(Ordering::SeqCst) {
                break;
            }

            let received = tokio::select! {
                biased;
                _ = self.stop_signal.notified() => break,
                received = tokio::time::timeout(self.poll_interval, self.inputs.recv()) => received,
            };
            let (request, spots) = match received {
                Ok(Some(input)) => input,
                // Every sender is gone: the task itself was dropped.
                Ok(None) => break,
                Err(_elapsed) => continue,
            };

            debug!(task = %self.name, request, spots = spots.len(), "processing input");
            let pricer = Arc::clone(&self.pricer);
            let greeks = self.greeks.clone();
            let reply = match tokio::task::spawn_blocking(move || pricer.calculate(&spots, &greeks))
                .await
            {
                Ok(result) => result.map_err(TaskError::from),
                Err(e) => {
                    error!(task = %self.name, error = %e, "pricing job failed");
                    Err(TaskError::Worker(e.to_string()))
                }
            };

            if self.outputs.send((request, reply)).is_err() {
                debug!(task = %self.name, "result receiver dropped");
                break;
            }
        }

        self.state.send_replace(TaskState::Stopped);
        info!(task = %self.name, "simulation task stopped");
    }
}
