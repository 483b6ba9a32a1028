//! Error type for the command line drivers.

use pricer_core::types::TableError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::task::TaskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Any failure surfaced by `vanilla-greeks`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file, environment or flag could not be applied.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Option parameters were rejected.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Monte Carlo settings were rejected.
    #[error(transparent)]
    MonteCarlo(#[from] pricer_pricing::mc::ConfigError),

    /// A simulation task or batch failed.
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Result tables could not be built.
    #[error(transparent)]
    Table(#[from] TableError),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime construction or terminal output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for the drivers.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn lift<E: Into<CliError>>(err: E) -> Result<()> {
        Err(err.into())
    }

    #[test]
    fn test_library_errors_convert() {
        let task = lift(TaskError::NotStarted("call".to_string())).unwrap_err();
        assert!(matches!(task, CliError::Task(_)));
        assert_eq!(task.to_string(), "Task 'call' has not been started");

        let table = lift(TableError::UnknownGreek("Vanna".to_string())).unwrap_err();
        assert!(matches!(table, CliError::Table(_)));
    }
}
