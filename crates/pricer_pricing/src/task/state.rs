//! Lifecycle of a simulation task.

use std::fmt;

/// Where a [`SimulationTask`](super::SimulationTask) is in its lifecycle.
///
/// ```text
/// Idle ──start──▶ Running ──stop──▶ Stopping ──worker exits──▶ Stopped
///   └──────────────────stop──────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskState {
    /// Constructed; no worker yet.
    Idle,
    /// Worker is polling its input channel.
    Running,
    /// Stop requested; the worker finishes any dequeued input first.
    Stopping,
    /// Worker has exited, or was never started.
    Stopped,
}

impl TaskState {
    /// True once a stop has been requested or completed.
    #[inline]
    pub fn is_stopping_or_stopped(&self) -> bool {
        matches!(self, TaskState::Stopping | TaskState::Stopped)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskState::Idle => "idle",
            TaskState::Running => "running",
            TaskState::Stopping => "stopping",
            TaskState::Stopped => "stopped",
        };
        f.write_str(label)
    }
}
