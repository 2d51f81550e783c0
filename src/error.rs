//! Crate error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a planning run before it produces output.
///
/// Model infeasibility is deliberately not here: an unsolvable model is
/// a valid outcome (empty plan plus a reservation suggestion), never an
/// error.
#[derive(Debug, Error)]
pub enum PlanError {
    /// An input file does not exist.
    #[error("input file not found: {path}")]
    InputNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The preferences CSV could not be parsed.
    #[error("failed to parse preferences CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The reservations YAML could not be parsed.
    #[error("failed to parse reservations YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
