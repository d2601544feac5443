//! estimation — schedules, outcomes, likelihood, and the orchestrator.
//!
//! Purpose
//! -------
//! Host the estimation pipeline: validated evaluation schedules
//! ([`schedule`]), normalization of experiment payloads ([`outcomes`]),
//! the log-likelihood model ([`likelihood`]), the maximum-likelihood
//! solve step ([`solver`]), and the orchestrating estimator with its
//! immutable result ([`mlae`]).
//!
//! Conventions
//! -----------
//! - Everything validates at the boundary: schedules at construction,
//!   payloads at ingestion, fitted angles after the solve. Interior code
//!   assumes the invariants hold.
//! - Errors travel as [`EstResult<T>`] / `EstimationError`, which wraps
//!   the minimizer and inference surfaces.
//!
//! Downstream usage
//! ----------------
//! - `inference::confidence` reads completed [`MlaeResult`] values to
//!   build intervals beyond the stored default.

pub mod errors;
pub mod likelihood;
pub mod mlae;
pub mod outcomes;
pub mod schedule;
pub mod solver;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{EstResult, EstimationError};
pub use self::likelihood::{LikelihoodModel, THETA_EPS};
pub use self::mlae::{
    DEFAULT_ALPHA, EstimationProblem, ExperimentRunner, MaximumLikelihoodAmplitudeEstimation,
    MlaeResult,
};
pub use self::outcomes::{OutcomeData, RawOutcome, ShotOutcome};
pub use self::schedule::EvaluationSchedule;
