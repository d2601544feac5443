//! estimation::likelihood — the log-likelihood model over an angle.
//!
//! Purpose
//! -------
//! Evaluate the log-likelihood of validated outcome records as a function
//! of the amplitude angle `theta`, where the success probability at power
//! `k` is `sin^2((2k + 1) * theta)`. The maximum-likelihood solver
//! minimizes the negation of this function over the model's search bounds.
//!
//! Key behaviors
//! -------------
//! - Clamp the evaluation angle into `[THETA_EPS, pi/2 - THETA_EPS]` so
//!   `ln(sin^2)` and `ln(cos^2)` stay finite at the domain walls for
//!   `k = 0`; amplified terms can still reach `-inf` legitimately when an
//!   interior angle zeroes one of their trigonometric factors.
//! - Skip a term entirely when its coefficient is zero, so a zero count
//!   never multiplies a `-inf` logarithm into NaN.
//!
//! Invariants & assumptions
//! ------------------------
//! - Records come from [`OutcomeData`] and already satisfy
//!   `0 <= successes <= shots` with `shots > 0`.
//! - `-inf` is a legal value: it marks an angle the data rules out
//!   exactly, and the grid scan treats its negation (`+inf`) as losing
//!   every comparison.
//!
//! Conventions
//! -----------
//! - The model borrows its records; it is a short-lived view constructed
//!   per solve, not an owning aggregate.

use crate::estimation::outcomes::{OutcomeData, ShotOutcome};
use std::f64::consts::FRAC_PI_2;

/// Clamp width keeping `theta` strictly inside `(0, pi/2)`.
pub const THETA_EPS: f64 = 1e-15;

/// LikelihoodModel — log-likelihood of outcome records in the angle.
///
/// Purpose
/// -------
/// Borrow a run's validated records and expose the log-likelihood surface
/// the solver maximizes, together with the clamped search bounds.
#[derive(Debug, Clone, Copy)]
pub struct LikelihoodModel<'a> {
    records: &'a [ShotOutcome],
}

impl<'a> LikelihoodModel<'a> {
    pub fn new(data: &'a OutcomeData) -> Self {
        Self { records: data.records() }
    }

    /// The optimization domain `(THETA_EPS, pi/2 - THETA_EPS)`.
    ///
    /// The walls are excluded so the unamplified (`k = 0`) term stays
    /// finite everywhere the minimizer looks; estimates arbitrarily close
    /// to 0 or pi/2 remain representable.
    pub fn search_bounds(&self) -> (f64, f64) {
        (THETA_EPS, FRAC_PI_2 - THETA_EPS)
    }

    /// Log-likelihood of the records at angle `theta`.
    ///
    /// Parameters
    /// ----------
    /// - `theta`: `f64`
    ///   The amplitude angle; clamped into the search bounds before
    ///   evaluation.
    ///
    /// Returns
    /// -------
    /// `f64`
    ///   `sum_i [ h_i * ln(sin^2((2k_i + 1) theta))
    ///          + (N_i - h_i) * ln(cos^2((2k_i + 1) theta)) ]`,
    ///   possibly `-inf`, never NaN.
    pub fn log_likelihood(&self, theta: f64) -> f64 {
        let (lower, upper) = self.search_bounds();
        let theta = theta.clamp(lower, upper);
        let mut total = 0.0;
        for record in self.records {
            let angle = (2 * record.power + 1) as f64 * theta;
            let failures = record.shots - record.successes;
            // Zero-coefficient terms are skipped: 0 * ln(0) is NaN in IEEE
            // arithmetic, but contributes nothing to the likelihood.
            if record.successes > 0.0 {
                total += record.successes * angle.sin().powi(2).ln();
            }
            if failures > 0.0 {
                total += failures * angle.cos().powi(2).ln();
            }
        }
        total
    }

    /// Negative log-likelihood, the objective handed to minimizers.
    pub fn neg_log_likelihood(&self, theta: f64) -> f64 {
        -self.log_likelihood(theta)
    }
}
