//! optimization — bounded 1-D minimization for likelihood fitting.
//!
//! Purpose
//! -------
//! Host the minimizer capability consumed by the estimation layer: the
//! [`Minimizer`] function type, the exhaustive grid-scan default, the
//! argmin-backed Brent alternative, and the shared [`errors`] surface.
//!
//! Conventions
//! -----------
//! - Minimizers always *minimize*; the estimation layer hands them the
//!   negative log-likelihood.
//! - Errors bubble up as [`OptResult<T>`] / `OptError`; no panics on user
//!   input and no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - `estimation::solver` runs a minimizer over a likelihood model's search
//!   bounds; `estimation::mlae` picks the default via
//!   [`default_num_evals`].

pub mod errors;
pub mod minimizer;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{OptError, OptResult};
pub use self::minimizer::{DEFAULT_MIN_EVALS, Minimizer, brent, brute, default_num_evals};
