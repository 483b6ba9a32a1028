//! Error types for simulation tasks and batches.

use pricer_core::types::TableError;
use thiserror::Error;

/// Errors raised by [`SimulationTask`](super::SimulationTask) and
/// [`SimulationBatch`](super::SimulationBatch).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// `start` was called outside a Tokio runtime.
    #[error("No Tokio runtime available to start task '{0}'")]
    NoRuntime(String),

    /// `start` was called on a task that already has a worker.
    #[error("Task '{0}' has already been started")]
    AlreadyStarted(String),

    /// The task was asked to stop; it accepts no further work.
    #[error("Task '{0}' is stopped")]
    Stopped(String),

    /// A concurrent run was requested on a task that was never started.
    #[error("Task '{0}' has not been started")]
    NotStarted(String),

    /// The worker exited with results still expected.
    #[error("Channel closed for task '{0}'")]
    ChannelClosed(String),

    /// The requested result was already taken by an earlier retrieve.
    #[error("Result of request {request} on task '{task}' was already retrieved")]
    ResultTaken {
        /// Task label.
        task: String,
        /// Request id passed to `retrieve_request`.
        request: u64,
    },

    /// The worker panicked or was cancelled.
    #[error("Worker failure: {0}")]
    Worker(String),

    /// Result tables could not be built or merged.
    #[error(transparent)]
    Table(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TaskError::NotStarted("call".to_string()).to_string(),
            "Task 'call' has not been started"
        );
        let err: TaskError = TableError::RowMismatch { expected: 2, found: 3 }.into();
        assert_eq!(err.to_string(), "Row count mismatch: expected 2, found 3");
    }
}
