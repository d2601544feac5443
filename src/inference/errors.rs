//! inference::errors — error types for Fisher information and intervals.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the Fisher-information
//! and confidence-interval routines, plus the Python bridge used by the
//! optional bindings.
//!
//! Conventions
//! -----------
//! - Configuration problems (unknown method tag, out-of-range alpha) fail
//!   synchronously at call time and are never coerced to a default.
//! - Numerical degeneracies that would divide by zero (amplitude exactly 0
//!   or 1) are reported as [`InferenceError::DegenerateAmplitude`] rather
//!   than propagating infinities.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type InfResult<T> = Result<T, InferenceError>;

/// InferenceError — failures in Fisher-information and interval routines.
///
/// Variants
/// --------
/// - `UnsupportedMethod(name)`
///   A confidence-interval method tag did not match any known method.
/// - `InvalidAlpha(alpha)`
///   The confidence level `alpha` lies outside the open interval (0, 1).
/// - `DegenerateAmplitude(amplitude)`
///   `a * (1 - a)` is not strictly positive, so the Fisher normalization
///   is undefined.
/// - `InvalidTruncation(requested)`
///   A Fisher truncation to zero schedule entries was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    UnsupportedMethod(String),
    InvalidAlpha(f64),
    DegenerateAmplitude(f64),
    InvalidTruncation(usize),
}

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::UnsupportedMethod(name) => {
                write!(
                    f,
                    "Unsupported confidence-interval method {name:?}. Valid tags are \
                     'fisher'/'fi', 'observed_fisher'/'observed_information'/'oi', and \
                     'likelihood_ratio'/'lr'."
                )
            }
            InferenceError::InvalidAlpha(alpha) => {
                write!(f, "Invalid confidence level {alpha}. Must satisfy 0 < alpha < 1.")
            }
            InferenceError::DegenerateAmplitude(amplitude) => {
                write!(
                    f,
                    "Degenerate amplitude {amplitude}: a * (1 - a) must be strictly positive \
                     to normalize the Fisher information."
                )
            }
            InferenceError::InvalidTruncation(requested) => {
                write!(
                    f,
                    "Invalid Fisher truncation to {requested} schedule entries. Must include \
                     at least one entry."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for PyErr {
    fn from(err: InferenceError) -> PyErr {
        PyValueError::new_err(format!("InferenceError: {err}"))
    }
}
