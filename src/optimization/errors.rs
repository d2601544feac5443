use argmin::core::{ArgminError, Error};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for minimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Bounds & grid ----
    /// Search bounds must be finite with lower < upper.
    InvalidBounds {
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    /// Grid scans need at least two evaluation points.
    InvalidGridResolution {
        num_evals: usize,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned NaN at an evaluation point.
    NonFiniteObjective {
        theta: f64,
        value: f64,
    },

    // ---- Minimizer outcome ----
    /// Estimated parameter must be finite and inside the search domain.
    InvalidThetaHat {
        value: f64,
        reason: &'static str,
    },

    /// The backend solver terminated without producing a best parameter.
    MissingMinimum,

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid search bounds ({lower}, {upper}): {reason}")
            }
            OptError::InvalidGridResolution { num_evals, reason } => {
                write!(f, "Invalid grid resolution {num_evals}: {reason}")
            }
            OptError::NonFiniteObjective { theta, value } => {
                write!(f, "Objective returned {value} at theta = {theta}; must not be NaN")
            }
            OptError::InvalidThetaHat { value, reason } => {
                write!(f, "Invalid estimated parameter {value}: {reason}")
            }
            OptError::MissingMinimum => {
                write!(f, "Minimizer terminated without a best parameter")
            }
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(format!("OptError: {err}"))
    }
}
