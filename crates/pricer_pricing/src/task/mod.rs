//! Asynchronous simulation tasks and their aggregation.
//!
//! A [`SimulationTask`] wraps one [`MonteCarloPricer`](crate::mc::MonteCarloPricer)
//! behind a pair of unbounded channels and a worker spawned on the Tokio
//! runtime:
//!
//! ```text
//! submit(spots) ──► inbound queue ──► worker ──► spawn_blocking(calculate)
//!                                       │
//! retrieve() ◄──── outbound queue ◄─────┘
//! ```
//!
//! The worker waits on the inbound queue for at most the poll interval
//! before re-checking its stop flag, and `stop` also wakes it directly.
//! Stopping is cooperative: an input already dequeued is always priced and
//! delivered.
//!
//! Every submission gets a [`RequestId`]. Results carry it back, so a caller
//! can skip results that an abandoned earlier caller never collected.
//!
//! A [`SimulationBatch`] holds several tasks and merges their results,
//! either by calling each task directly or by going through the channels.

pub mod batch;
pub mod error;
pub mod simulation;
pub mod state;

pub use batch::SimulationBatch;
pub use error::TaskError;
pub use simulation::{RequestId, SimulationOutput, SimulationTask, DEFAULT_POLL_INTERVAL};
pub use state::TaskState;
