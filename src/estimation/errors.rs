//! estimation::errors — error types for schedules, outcomes, and fitting.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the estimation pipeline:
//! schedule configuration, outcome ingestion, the MLE solve step, and the
//! orchestrated estimation run. Wraps the minimizer and inference error
//! surfaces so the orchestrator can propagate everything as one type, and
//! bridges to Python exceptions behind the `python-bindings` feature.
//!
//! Conventions
//! -----------
//! - Configuration errors (empty schedule, mismatched outcome list) fail
//!   synchronously at construction time and are never coerced.
//! - Ingestion errors carry the schedule index of the offending entry so
//!   collaborator payloads can be debugged without re-running experiments.
//! - `Runner` is reserved for experiment-runner collaborators; the core
//!   never constructs it.

use crate::inference::errors::InferenceError;
use crate::optimization::errors::OptError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type EstResult<T> = Result<T, EstimationError>;

/// EstimationError — failures across the estimation pipeline.
///
/// Variants
/// --------
/// - `EmptySchedule`
///   An evaluation schedule with no amplification powers was supplied.
/// - `OutcomeLengthMismatch { expected, actual }`
///   The collaborator returned a different number of outcome payloads than
///   there are schedule entries.
/// - `MixedOutcomeKinds { index }`
///   Exact-probability and sampled-count payloads were mixed in one run.
/// - `ZeroShots { index }`
///   A sampled entry carried zero total counts, so no likelihood
///   contribution can be formed for it.
/// - `InvalidProbability { index, value }`
///   A basis-state probability was non-finite or outside [0, 1].
/// - `SuccessesExceedShots { index, successes, shots }`
///   A pre-classified record violated `successes <= shots`.
/// - `InvalidShotRecord { index, value, reason }`
///   A pre-classified record carried a non-finite or negative field.
/// - `NotEstimated`
///   A result was requested before any estimation ran (binding surface).
/// - `Runner { text }`
///   The experiment-runner collaborator failed to produce outcome data.
/// - `Optimization(..)` / `Inference(..)`
///   Propagated failures from the minimizer and inference layers.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    // ---- Schedule configuration ----
    EmptySchedule,

    // ---- Outcome ingestion ----
    OutcomeLengthMismatch {
        expected: usize,
        actual: usize,
    },
    MixedOutcomeKinds {
        index: usize,
    },
    ZeroShots {
        index: usize,
    },
    InvalidProbability {
        index: usize,
        value: f64,
    },
    SuccessesExceedShots {
        index: usize,
        successes: f64,
        shots: f64,
    },
    InvalidShotRecord {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Run state ----
    NotEstimated,

    // ---- Collaborators ----
    Runner {
        text: String,
    },

    // ---- Wrapped layers ----
    Optimization(OptError),
    Inference(InferenceError),
}

impl std::error::Error for EstimationError {}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::EmptySchedule => {
                write!(f, "Evaluation schedule must contain at least one amplification power")
            }
            EstimationError::OutcomeLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Outcome payload count mismatch: schedule has {expected} entries, \
                     collaborator returned {actual}"
                )
            }
            EstimationError::MixedOutcomeKinds { index } => {
                write!(
                    f,
                    "Mixed outcome regimes: entry {index} does not match the regime of the \
                     first entry. All entries must be uniformly exact probabilities or \
                     uniformly sampled counts."
                )
            }
            EstimationError::ZeroShots { index } => {
                write!(f, "Entry {index} carries zero total shots; totals must be >= 1")
            }
            EstimationError::InvalidProbability { index, value } => {
                write!(
                    f,
                    "Invalid probability {value} at entry {index}: must be finite and in [0, 1]"
                )
            }
            EstimationError::SuccessesExceedShots { index, successes, shots } => {
                write!(
                    f,
                    "Entry {index} has {successes} successes out of {shots} shots; successes \
                     must not exceed shots"
                )
            }
            EstimationError::InvalidShotRecord { index, value, reason } => {
                write!(f, "Invalid shot record at entry {index}: {value}: {reason}")
            }
            EstimationError::NotEstimated => {
                write!(f, "No estimation has been run yet; call estimate first")
            }
            EstimationError::Runner { text } => {
                write!(f, "Experiment runner failed: {text}")
            }
            EstimationError::Optimization(err) => {
                write!(f, "{err}")
            }
            EstimationError::Inference(err) => {
                write!(f, "{err}")
            }
        }
    }
}

impl From<OptError> for EstimationError {
    fn from(err: OptError) -> Self {
        EstimationError::Optimization(err)
    }
}

impl From<InferenceError> for EstimationError {
    fn from(err: InferenceError) -> Self {
        EstimationError::Inference(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<EstimationError> for PyErr {
    fn from(err: EstimationError) -> PyErr {
        PyValueError::new_err(format!("EstimationError: {err}"))
    }
}
