//! inference::fisher — Fisher information of an amplitude estimate.
//!
//! Purpose
//! -------
//! Compute how much information the collected outcome records carry about
//! the amplitude, in its theoretical (expected) and observed (data-driven)
//! forms. Both feed the normal-approximation confidence intervals and
//! characterize estimator precision on their own.
//!
//! Key behaviors
//! -------------
//! - Theoretical form: `[sum_i N_i (2k_i + 1)^2] / (a (1 - a))`, the
//!   expected curvature of the log-likelihood at the estimate.
//! - Observed form: the square of the summed per-entry tangent terms
//!   `(2k + 1) (h / tan + (N - h) tan)` at the estimate's angle, scaled by
//!   `1 / (a (1 - a))` and divided by the full schedule length.
//! - Both forms accept an optional truncation to the first `m` schedule
//!   entries, which isolates the information contributed by a prefix of
//!   the run. Truncation shortens the sums only; the observed form keeps
//!   dividing by the full record count.
//!
//! Invariants & assumptions
//! ------------------------
//! - `a (1 - a)` must be strictly positive; the degenerate amplitudes 0
//!   and 1 are rejected rather than mapped to infinities.
//! - Records are in schedule order, so a truncation prefix corresponds to
//!   the first `m` measurement rounds.
//!
//! Conventions
//! -----------
//! - The angle entering the observed form is `theta_a = asin(sqrt(a))`,
//!   recovered from the amplitude rather than carried alongside it, so
//!   the routine stays meaningful for any amplitude in (0, 1).

use crate::estimation::outcomes::ShotOutcome;
use crate::inference::errors::{InfResult, InferenceError};

/// Fisher information of `records` at `amplitude`.
///
/// Parameters
/// ----------
/// - `records`: `&[ShotOutcome]`
///   Validated outcome records in schedule order.
/// - `amplitude`: `f64`
///   The amplitude at which the information is evaluated, strictly inside
///   (0, 1).
/// - `observed`: `bool`
///   When true, compute the observed information from the realized score;
///   otherwise the theoretical expectation.
/// - `num_terms`: `Option<usize>`
///   Truncate the sums to the first `m` entries; `None` includes all.
///   Values above the record count are capped at it. The observed form's
///   final division uses the full record count regardless.
///
/// Returns
/// -------
/// `InfResult<f64>`
///   The (non-negative) information value.
///
/// Errors
/// ------
/// - `InferenceError::InvalidTruncation` when the effective truncation is
///   zero entries.
/// - `InferenceError::DegenerateAmplitude` when `a (1 - a)` is not
///   strictly positive or `amplitude` is non-finite.
pub fn fisher_information(
    records: &[ShotOutcome], amplitude: f64, observed: bool, num_terms: Option<usize>,
) -> InfResult<f64> {
    let total_entries = records.len();
    let included = num_terms.unwrap_or(total_entries).min(total_entries);
    if included == 0 {
        return Err(InferenceError::InvalidTruncation(included));
    }
    let variance = amplitude * (1.0 - amplitude);
    if !amplitude.is_finite() || variance <= 0.0 {
        return Err(InferenceError::DegenerateAmplitude(amplitude));
    }
    let records = &records[..included];

    if observed {
        let theta_a = amplitude.sqrt().asin();
        let mut d_loglik = 0.0;
        for record in records {
            let factor = (2 * record.power + 1) as f64;
            let tan = (factor * theta_a).tan();
            d_loglik +=
                factor * (record.successes / tan + (record.shots - record.successes) * tan);
        }
        d_loglik /= variance.sqrt();
        // Truncation shortens the sum only; the normalization stays the
        // full schedule length.
        Ok(d_loglik.powi(2) / total_entries as f64)
    } else {
        let curvature: f64 =
            records.iter().map(|r| r.shots * ((2 * r.power + 1) as f64).powi(2)).sum();
        Ok(curvature / variance)
    }
}
