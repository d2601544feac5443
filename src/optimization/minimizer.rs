//! optimization::minimizer — pluggable bounded 1-D minimizers.
//!
//! Purpose
//! -------
//! Provide the minimizer capability used by the maximum-likelihood solver:
//! a boxed function `(objective, bounds) -> theta` that any bounded 1-D
//! optimizer can satisfy. Ships two implementations: an exhaustive grid
//! scan ([`brute`], the default) and an argmin-backed Brent search
//! ([`brent`]) for callers that need speed over worst-case robustness.
//!
//! Key behaviors
//! -------------
//! - Represent minimizers as values of the [`Minimizer`] function type, not
//!   as a trait hierarchy, so callers can substitute closures freely.
//! - Size the default grid adaptively via [`default_num_evals`], so the
//!   scan resolution scales with the largest scheduled amplification power.
//! - Validate bounds and grid resolution up front, and reject NaN objective
//!   values instead of letting them poison the argmin of the scan.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are pure functions of `theta` with no shared mutable state;
//!   every grid point can be evaluated independently.
//! - The oscillatory likelihood surface this crate minimizes can have many
//!   local optima once large powers are scheduled, which is why the global
//!   scan is the default and Brent is opt-in.
//! - `+inf` objective values are legal (they mark a zero-likelihood angle)
//!   and simply lose every comparison; NaN is an error.
//!
//! Conventions
//! -----------
//! - Bounds are a half-open mental model `(lower, upper)` realized as a
//!   closed, finite interval with `lower < upper`.
//! - Errors are reported via [`OptResult<T>`] / `OptError`; this module
//!   never panics on user input.
//!
//! Downstream usage
//! ----------------
//! - `estimation::solver` drives a [`Minimizer`] over the negative
//!   log-likelihood; `estimation::mlae` installs the brute default sized
//!   from the schedule's largest power.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the adaptive resolution rule, minimization of simple
//!   convex and multimodal objectives by both implementations, and the
//!   error branches for degenerate bounds, tiny grids, and NaN objectives.

use crate::optimization::errors::{OptError, OptResult};
use argmin::core::{CostFunction, Error, Executor};
use argmin::solver::brent::BrentOpt;
use ndarray::Array1;
use std::f64::consts::FRAC_PI_2;

/// A bounded 1-D minimizer: maps `(objective, (lower, upper))` to the
/// minimizing abscissa. Implementations must treat the objective as a pure
/// function and stay inside the given bounds.
pub type Minimizer = Box<dyn Fn(&dyn Fn(f64) -> f64, (f64, f64)) -> OptResult<f64> + Send + Sync>;

/// Floor on the number of grid evaluations used by the default scan.
pub const DEFAULT_MIN_EVALS: usize = 10_000;

/// Adaptive grid resolution for the default brute-force scan.
///
/// Returns `max(10000, round(pi/2 * 1000 * 2 * k_max))`, where `k_max` is
/// the largest scheduled amplification power. The likelihood term at power
/// `k` oscillates with frequency `2k + 1` in `theta`, so the grid must
/// refine linearly in `k_max` to keep resolving individual lobes.
pub fn default_num_evals(k_max: u64) -> usize {
    let adaptive = (FRAC_PI_2 * 1000.0 * 2.0 * k_max as f64).round() as usize;
    DEFAULT_MIN_EVALS.max(adaptive)
}

/// Build the exhaustive grid-scan minimizer with `num_evals` grid points.
///
/// Parameters
/// ----------
/// - `num_evals`: `usize`
///   Number of evenly spaced evaluation points across the bounds. Must be
///   at least 2; use [`default_num_evals`] for the schedule-adaptive
///   default.
///
/// Returns
/// -------
/// `Minimizer`
///   A minimizer that evaluates the objective at every grid point and
///   returns the abscissa of the smallest value. This is the only
///   generally reliable default for the oscillatory likelihoods this crate
///   fits; substitute [`brent`] or a custom closure when the surface is
///   known to be well-behaved.
///
/// Errors
/// ------
/// The returned minimizer fails with:
/// - `OptError::InvalidBounds` for non-finite or inverted bounds.
/// - `OptError::InvalidGridResolution` when `num_evals < 2`.
/// - `OptError::NonFiniteObjective` when the objective returns NaN.
pub fn brute(num_evals: usize) -> Minimizer {
    Box::new(move |objective, bounds| brute_search(objective, bounds, num_evals))
}

/// Build an argmin Brent-search minimizer capped at `max_iters` iterations.
///
/// Brent's method converges far faster than a grid scan on unimodal
/// objectives but can settle in a local optimum of the oscillatory
/// likelihood when large powers are scheduled; it is offered as the
/// documented fast substitute, not the default.
///
/// Errors
/// ------
/// The returned minimizer fails with:
/// - `OptError::InvalidBounds` for non-finite or inverted bounds.
/// - `OptError::NonFiniteObjective` when the objective returns NaN.
/// - `OptError::MissingMinimum` if the solver terminates without a best
///   parameter, and the argmin wrapper variants for backend failures.
pub fn brent(max_iters: u64) -> Minimizer {
    Box::new(move |objective, bounds| brent_search(objective, bounds, max_iters))
}

//
// ---------- Private helpers ----------
//

fn validate_bounds(bounds: (f64, f64)) -> OptResult<()> {
    let (lower, upper) = bounds;
    if !lower.is_finite() || !upper.is_finite() {
        return Err(OptError::InvalidBounds { lower, upper, reason: "bounds must be finite" });
    }
    if lower >= upper {
        return Err(OptError::InvalidBounds { lower, upper, reason: "lower must be < upper" });
    }
    Ok(())
}

fn brute_search(
    objective: &dyn Fn(f64) -> f64, bounds: (f64, f64), num_evals: usize,
) -> OptResult<f64> {
    validate_bounds(bounds)?;
    if num_evals < 2 {
        return Err(OptError::InvalidGridResolution {
            num_evals,
            reason: "grid scans need at least two evaluation points",
        });
    }

    let grid = Array1::linspace(bounds.0, bounds.1, num_evals);
    let mut best_theta = bounds.0;
    let mut best_value = f64::INFINITY;
    for &theta in grid.iter() {
        let value = objective(theta);
        if value.is_nan() {
            return Err(OptError::NonFiniteObjective { theta, value });
        }
        if value < best_value {
            best_value = value;
            best_theta = theta;
        }
    }
    Ok(best_theta)
}

/// Adapter exposing a borrowed objective closure to argmin.
struct BoundedObjective<'a> {
    objective: &'a dyn Fn(f64) -> f64,
}

impl CostFunction for BoundedObjective<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, theta: &f64) -> Result<f64, Error> {
        let value = (self.objective)(*theta);
        if value.is_nan() {
            return Err(Error::from(OptError::NonFiniteObjective { theta: *theta, value }));
        }
        Ok(value)
    }
}

fn brent_search(
    objective: &dyn Fn(f64) -> f64, bounds: (f64, f64), max_iters: u64,
) -> OptResult<f64> {
    validate_bounds(bounds)?;
    let solver = BrentOpt::new(bounds.0, bounds.1);
    let problem = BoundedObjective { objective };
    let outcome = Executor::new(problem, solver).configure(|state| state.max_iters(max_iters)).run()?;
    outcome.state().best_param.ok_or(OptError::MissingMinimum)
}
