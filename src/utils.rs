#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::estimation::{EvaluationSchedule, RawOutcome};

#[cfg(feature = "python-bindings")]
use std::collections::HashMap;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_schedule(evaluation_schedule: &Bound<'_, PyAny>) -> PyResult<EvaluationSchedule> {
    // An integer m expands to the exponential schedule [0, 2^0, ..., 2^(m-1)];
    // a sequence is taken verbatim as the power list.
    if let Ok(num_powers) = evaluation_schedule.extract::<u32>() {
        return Ok(EvaluationSchedule::exponential(num_powers));
    }

    let powers: Vec<u64> = evaluation_schedule.extract().map_err(|_| {
        PyValueError::new_err(
            "evaluation_schedule must be a non-negative integer or a sequence of \
             non-negative integers",
        )
    })?;
    EvaluationSchedule::from_powers(powers).map_err(PyErr::from)
}

#[cfg(feature = "python-bindings")]
pub fn extract_count_payloads(counts: Vec<HashMap<String, u64>>) -> PyResult<Vec<RawOutcome>> {
    if counts.is_empty() {
        return Err(PyValueError::new_err("counts must contain at least one measurement round"));
    }
    Ok(counts.into_iter().map(RawOutcome::Counts).collect())
}

#[cfg(feature = "python-bindings")]
pub fn extract_probability_payloads<'py>(
    py: Python<'py>, probabilities: &Bound<'py, PyAny>,
) -> PyResult<Vec<RawOutcome>> {
    let rounds: Vec<Bound<'py, PyAny>> = probabilities.extract().map_err(|_| {
        PyValueError::new_err("probabilities must be a sequence of 1-D float64 array-likes")
    })?;
    if rounds.is_empty() {
        return Err(PyValueError::new_err(
            "probabilities must contain at least one measurement round",
        ));
    }

    let mut payloads = Vec::with_capacity(rounds.len());
    for round in &rounds {
        let arr = extract_f64_array(py, round)?;
        let slice = arr.as_slice().map_err(|_| {
            PyValueError::new_err("each round must be a 1-D contiguous float64 array or sequence")
        })?;
        payloads.push(RawOutcome::Probabilities(slice.to_vec()));
    }
    Ok(payloads)
}
