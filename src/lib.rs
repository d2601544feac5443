//! rust_mlae — maximum-likelihood amplitude estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the maximum-likelihood amplitude estimator to Python via the `_rust_mlae`
//! extension module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing classes and submodules used by the `rust_mlae`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`estimation`, `inference`, and
//!   `optimization`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_mlae` Python extension.
//! - Create and register the `amplitude_estimators` Python submodule under
//!   `rust_mlae` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts (e.g.
//!   `MaximumLikelihoodAmplitudeEstimation`, `MlaeResult`).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_mlae.amplitude_estimators` and
//!   are typically wrapped by thin pure-Python facades in the top-level
//!   `rust_mlae` package.
//! - Good states are identified by a list of classical labels on the Python
//!   surface; native Rust callers supply an arbitrary predicate through
//!   [`estimation::EstimationProblem`].
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules and
//!   can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_mlae` module defined here
//!   and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the integration pipeline test; Python smoke tests exercise the
//!   `_rust_mlae` module from the packaging layer.

pub mod estimation;
pub mod inference;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
};

#[cfg(feature = "python-bindings")]
use crate::{
    estimation::{
        EstimationError, MaximumLikelihoodAmplitudeEstimation, MlaeResult, OutcomeData,
    },
    inference::{ConfidenceMethod, confidence_interval},
    utils::{extract_count_payloads, extract_probability_payloads, extract_schedule},
};

/// MLAE — Python-facing wrapper for maximum-likelihood amplitude estimation.
///
/// Purpose
/// -------
/// Expose the [`MaximumLikelihoodAmplitudeEstimation`] API to Python callers
/// while preserving the core Rust invariants and error handling.
///
/// Key behaviors
/// -------------
/// - Build an estimator from an evaluation schedule given either as an
///   integer (exponential expansion) or an explicit power sequence.
/// - Provide `estimate_counts` and `estimate_probabilities` methods that
///   convert Python payloads into outcome records and run the pipeline.
/// - Cache the latest [`MlaeResult`] for inspection from Python via property
///   getters and the `confidence_interval` method.
///
/// Parameters
/// ----------
/// Constructed from Python via `MLAE(evaluation_schedule, good_states)`:
/// - `evaluation_schedule`: `int | Sequence[int]`
///   Either the number of exponential rounds `m` (expanded to
///   `[0, 2^0, ..., 2^(m-1)]`) or an explicit non-empty power sequence.
/// - `good_states`: `Sequence[str]`
///   Classical labels counted as successes.
///
/// Fields
/// ------
/// - `inner`: [`MaximumLikelihoodAmplitudeEstimation`]
///   Fully configured estimator owning the schedule and default minimizer.
/// - `good_states`: `HashSet<String>`
///   Label set backing the good-state predicate.
/// - `result`: `Option<MlaeResult>`
///   Latest completed run, if any.
///
/// Invariants
/// ----------
/// - `inner` always holds a non-empty validated schedule.
/// - `result` is `Some` exactly after a successful `estimate_*` call.
///
/// Notes
/// -----
/// - This type is part of the Python FFI surface; native Rust code should
///   prefer [`MaximumLikelihoodAmplitudeEstimation`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_mlae.amplitude_estimators", unsendable)]
pub struct MLAE {
    /// Underlying Rust estimator.
    inner: MaximumLikelihoodAmplitudeEstimation,
    /// Labels counted as successes.
    good_states: HashSet<String>,
    /// Latest completed run.
    result: Option<MlaeResult>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MLAE {
    #[new]
    #[pyo3(
        text_signature = "(evaluation_schedule, good_states, /)",
        signature = (evaluation_schedule, good_states)
    )]
    pub fn new<'py>(
        evaluation_schedule: &Bound<'py, PyAny>, good_states: Vec<String>,
    ) -> PyResult<Self> {
        if good_states.is_empty() {
            return Err(PyValueError::new_err("good_states must not be empty"));
        }
        let schedule = extract_schedule(evaluation_schedule)?;
        Ok(MLAE {
            inner: MaximumLikelihoodAmplitudeEstimation::new(schedule),
            good_states: good_states.into_iter().collect(),
            result: None,
        })
    }

    /// Fit sampled count maps, one per schedule entry, and return the
    /// amplitude estimate.
    #[pyo3(text_signature = "(self, counts, /)")]
    pub fn estimate_counts(&mut self, counts: Vec<HashMap<String, u64>>) -> PyResult<f64> {
        let payloads = extract_count_payloads(counts)?;
        self.run(&payloads)
    }

    /// Fit exact basis-state probability vectors, one per schedule entry,
    /// and return the amplitude estimate.
    #[pyo3(text_signature = "(self, probabilities, /)")]
    pub fn estimate_probabilities<'py>(
        &mut self, py: Python<'py>, probabilities: &Bound<'py, PyAny>,
    ) -> PyResult<f64> {
        let payloads = extract_probability_payloads(py, probabilities)?;
        self.run(&payloads)
    }

    /// Two-sided confidence interval for the latest run.
    #[pyo3(
        text_signature = "(self, /, alpha=0.05, kind='fisher')",
        signature = (alpha = 0.05, kind = "fisher")
    )]
    pub fn confidence_interval(&self, alpha: f64, kind: &str) -> PyResult<(f64, f64)> {
        let result = self.result.as_ref().ok_or(EstimationError::NotEstimated)?;
        let method = ConfidenceMethod::from_str(kind)?;
        let interval = confidence_interval(result, alpha, method)?;
        Ok(interval)
    }

    #[getter]
    pub fn result(&self) -> PyResult<MLAEResult> {
        match &self.result {
            Some(result) => Ok(MLAEResult { inner: result.clone() }),
            None => Err(EstimationError::NotEstimated.into()),
        }
    }

    #[getter]
    pub fn estimation(&self) -> PyResult<f64> {
        self.latest().map(MlaeResult::estimation)
    }

    #[getter]
    pub fn theta(&self) -> PyResult<f64> {
        self.latest().map(MlaeResult::theta)
    }

    #[getter]
    pub fn fisher_information(&self) -> PyResult<f64> {
        self.latest().map(MlaeResult::fisher_information)
    }

    #[getter]
    pub fn num_oracle_queries(&self) -> PyResult<f64> {
        self.latest().map(MlaeResult::num_oracle_queries)
    }

    #[getter]
    pub fn evaluation_schedule(&self) -> Vec<u64> {
        self.inner.schedule().powers().to_vec()
    }
}

#[cfg(feature = "python-bindings")]
impl MLAE {
    fn latest(&self) -> PyResult<&MlaeResult> {
        self.result.as_ref().ok_or_else(|| EstimationError::NotEstimated.into())
    }

    fn run(&mut self, payloads: &[crate::estimation::RawOutcome]) -> PyResult<f64> {
        let good_states = &self.good_states;
        let data = OutcomeData::extract(self.inner.schedule(), payloads, &|label| {
            good_states.contains(label)
        })?;
        let result = self.inner.estimate_with_outcomes(data)?;
        let estimation = result.estimation();
        self.result = Some(result);
        Ok(estimation)
    }
}

/// MLAEResult — completed estimation run exposed to Python.
///
/// Purpose
/// -------
/// Present the immutable [`MlaeResult`] to Python code in a lightweight,
/// read-only wrapper.
///
/// Fields
/// ------
/// - `inner`: [`MlaeResult`]
///   Full result from the latest estimation run.
///
/// Invariants
/// ----------
/// - `inner` always corresponds to the most recent successful `estimate_*`
///   call on the owning estimator.
///
/// Notes
/// -----
/// - Accessors are scalar copies except `evaluation_schedule`, which clones
///   the power list into a Python-owned container.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_mlae.amplitude_estimators")]
pub struct MLAEResult {
    /// Underlying Rust MlaeResult.
    inner: MlaeResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MLAEResult {
    #[getter]
    pub fn theta(&self) -> f64 {
        self.inner.theta()
    }

    #[getter]
    pub fn estimation(&self) -> f64 {
        self.inner.estimation()
    }

    #[getter]
    pub fn estimation_processed(&self) -> f64 {
        self.inner.estimation_processed()
    }

    #[getter]
    pub fn num_oracle_queries(&self) -> f64 {
        self.inner.num_oracle_queries()
    }

    #[getter]
    pub fn fisher_information(&self) -> f64 {
        self.inner.fisher_information()
    }

    #[getter]
    pub fn confidence_interval(&self) -> (f64, f64) {
        self.inner.confidence_interval()
    }

    #[getter]
    pub fn confidence_interval_processed(&self) -> (f64, f64) {
        self.inner.confidence_interval_processed()
    }

    #[getter]
    pub fn evaluation_schedule(&self) -> Vec<u64> {
        self.inner.schedule().powers().to_vec()
    }
}

/// _rust_mlae — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_mlae` Python module and register the
/// `amplitude_estimators` submodule used by the public `rust_mlae` package.
///
/// Key behaviors
/// -------------
/// - Create the `amplitude_estimators` submodule and attach it to the parent
///   `_rust_mlae` module.
/// - Register the submodule in `sys.modules` so it is importable via dotted
///   paths from Python.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_mlae<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let amplitude_estimators_mod = PyModule::new(_py, "amplitude_estimators")?;
    amplitude_estimators(_py, m, &amplitude_estimators_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_mlae.amplitude_estimators", amplitude_estimators_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn amplitude_estimators<'py>(
    _py: Python, rust_mlae: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<MLAE>()?;
    m.add_class::<MLAEResult>()?;
    rust_mlae.add_submodule(m)?;
    Ok(())
}
