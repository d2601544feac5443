//! estimation::mlae — the maximum-likelihood estimation orchestrator.
//!
//! Purpose
//! -------
//! Tie the pipeline together: run the experiment collaborator over the
//! evaluation schedule, normalize its payloads, fit the amplitude angle by
//! maximum likelihood, and assemble the immutable [`MlaeResult`] with its
//! derived quantities (amplitude, post-processed estimate, oracle-query
//! count, Fisher information, default confidence interval).
//!
//! Key behaviors
//! -------------
//! - The estimator owns its schedule and minimizer; runs against different
//!   problems or runners reuse the same configuration.
//! - The default minimizer is the exhaustive grid scan sized adaptively
//!   from the schedule's last power; substitute any [`Minimizer`] via
//!   [`MaximumLikelihoodAmplitudeEstimation::with_minimizer`].
//! - Results are assembled atomically in [`MlaeResult::new`]: a constructed
//!   result always carries every derived field, so there is no
//!   partially-populated state to observe.
//!
//! Invariants & assumptions
//! ------------------------
//! - `theta` lies in `[0, pi/2]` and `estimation = sin^2(theta)` in
//!   `[0, 1]` for every constructed result.
//! - The stored confidence interval is the Fisher interval at
//!   [`DEFAULT_ALPHA`]; other methods and levels are available through
//!   [`crate::inference::confidence::confidence_interval`].
//!
//! Conventions
//! -----------
//! - `post_processing` maps the amplitude domain into the caller's problem
//!   domain and is applied to the estimate and interval endpoints only;
//!   all internal computation stays in the amplitude domain.

use crate::estimation::errors::EstResult;
use crate::estimation::likelihood::LikelihoodModel;
use crate::estimation::outcomes::{OutcomeData, RawOutcome};
use crate::estimation::schedule::EvaluationSchedule;
use crate::estimation::solver;
use crate::inference::confidence::{apply_post_processing, fisher_interval};
use crate::inference::fisher::fisher_information;
use crate::optimization::minimizer::{Minimizer, brute, default_num_evals};

/// Significance level of the interval stored on assembled results.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// ExperimentRunner — the collaborator that produces outcome payloads.
///
/// Implementors execute the amplified process at each scheduled power and
/// return one payload per schedule entry, in schedule order and uniformly
/// of one regime. Failures are reported through the `Runner` variant of
/// [`crate::estimation::errors::EstimationError`].
pub trait ExperimentRunner {
    fn fetch_outcomes(&self, schedule: &EvaluationSchedule) -> EstResult<Vec<RawOutcome>>;
}

/// EstimationProblem — what counts as success, and how to read the result.
///
/// Purpose
/// -------
/// Bundle the good-state predicate used to classify classical labels with
/// the post-processing map from the amplitude domain into the caller's
/// problem domain (identity unless overridden).
pub struct EstimationProblem {
    is_good_state: Box<dyn Fn(&str) -> bool + Send + Sync>,
    post_processing: Box<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl EstimationProblem {
    /// Define a problem by its good-state predicate, with identity
    /// post-processing.
    pub fn new(is_good_state: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self { is_good_state: Box::new(is_good_state), post_processing: Box::new(|a| a) }
    }

    /// Replace the post-processing map applied to estimates and interval
    /// endpoints.
    pub fn with_post_processing(
        mut self, post_processing: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.post_processing = Box::new(post_processing);
        self
    }

    pub fn is_good_state(&self) -> &(dyn Fn(&str) -> bool + Send + Sync) {
        &*self.is_good_state
    }

    pub fn post_processing(&self) -> &(dyn Fn(f64) -> f64 + Send + Sync) {
        &*self.post_processing
    }
}

/// MaximumLikelihoodAmplitudeEstimation — the configured estimator.
///
/// Purpose
/// -------
/// Hold the evaluation schedule and the minimizer used for every run, and
/// expose the estimation entry points.
///
/// Key behaviors
/// -------------
/// - [`MaximumLikelihoodAmplitudeEstimation::estimate`] drives a full run
///   against an [`ExperimentRunner`] and an [`EstimationProblem`].
/// - [`MaximumLikelihoodAmplitudeEstimation::estimate_with_outcomes`]
///   skips the collaborator and fits pre-extracted data with identity
///   post-processing.
/// - [`MaximumLikelihoodAmplitudeEstimation::compute_mle`] exposes the
///   bare angle fit for callers composing their own result handling.
pub struct MaximumLikelihoodAmplitudeEstimation {
    schedule: EvaluationSchedule,
    minimizer: Minimizer,
}

impl MaximumLikelihoodAmplitudeEstimation {
    /// Configure an estimator with the default grid-scan minimizer sized
    /// from the schedule's last power.
    pub fn new(schedule: EvaluationSchedule) -> Self {
        let minimizer = brute(default_num_evals(schedule.k_max()));
        Self { schedule, minimizer }
    }

    /// Substitute the bounded 1-D minimizer used by every solve.
    pub fn with_minimizer(mut self, minimizer: Minimizer) -> Self {
        self.minimizer = minimizer;
        self
    }

    pub fn schedule(&self) -> &EvaluationSchedule {
        &self.schedule
    }

    /// Fit the maximum-likelihood angle for already-extracted data.
    ///
    /// Returns
    /// -------
    /// `EstResult<f64>`
    ///   The angle `theta_hat` in `[0, pi/2]`; the amplitude is
    ///   `sin^2(theta_hat)`.
    pub fn compute_mle(&self, data: &OutcomeData) -> EstResult<f64> {
        let model = LikelihoodModel::new(data);
        let theta_hat = solver::solve(&model, &self.minimizer)?;
        Ok(theta_hat)
    }

    /// Run the full estimation pipeline against a collaborator.
    ///
    /// Parameters
    /// ----------
    /// - `runner`: `&R`
    ///   Produces one outcome payload per schedule entry.
    /// - `problem`: `&EstimationProblem`
    ///   Classifies labels and post-processes the estimate.
    ///
    /// Errors
    /// ------
    /// - Collaborator failures, ingestion errors, and solve failures, each
    ///   under its `EstimationError` variant.
    pub fn estimate<R: ExperimentRunner>(
        &self, runner: &R, problem: &EstimationProblem,
    ) -> EstResult<MlaeResult> {
        let raw = runner.fetch_outcomes(&self.schedule)?;
        let data = OutcomeData::extract(&self.schedule, &raw, problem.is_good_state())?;
        let theta = self.compute_mle(&data)?;
        MlaeResult::new(self.schedule.clone(), data, theta, problem.post_processing())
    }

    /// Fit pre-extracted data with identity post-processing.
    pub fn estimate_with_outcomes(&self, data: OutcomeData) -> EstResult<MlaeResult> {
        let theta = self.compute_mle(&data)?;
        MlaeResult::new(self.schedule.clone(), data, theta, &|a| a)
    }
}

/// MlaeResult — the immutable product of one estimation run.
///
/// Purpose
/// -------
/// Carry the fitted angle and amplitude together with everything derived
/// from them: the post-processed estimate, the oracle-query count, the
/// theoretical Fisher information at the estimate, and the default
/// confidence interval in both domains.
///
/// Invariants
/// ----------
/// - All fields are populated at construction; there is no unestimated
///   state.
/// - `confidence_interval` is the Fisher interval at [`DEFAULT_ALPHA`],
///   degenerating to `(estimation, estimation)` in the exact regime or
///   when the estimate sits on a domain wall.
#[derive(Debug, Clone, PartialEq)]
pub struct MlaeResult {
    schedule: EvaluationSchedule,
    outcome_data: OutcomeData,
    theta: f64,
    estimation: f64,
    estimation_processed: f64,
    num_oracle_queries: f64,
    fisher_information: f64,
    confidence_interval: (f64, f64),
    confidence_interval_processed: (f64, f64),
}

impl MlaeResult {
    /// Assemble a result from a fitted angle, computing every derived
    /// field in one step.
    ///
    /// Notes
    /// -----
    /// - When `sin^2(theta)` rounds onto a domain wall the Fisher
    ///   normalization `a (1 - a)` vanishes; the information is reported
    ///   as `+inf` (the noiseless limit) and the interval degenerates to
    ///   the point estimate instead of failing the run.
    pub fn new(
        schedule: EvaluationSchedule, outcome_data: OutcomeData, theta: f64,
        post_processing: &dyn Fn(f64) -> f64,
    ) -> EstResult<Self> {
        let estimation = theta.sin().powi(2);
        let variance = estimation * (1.0 - estimation);

        let (info, interval) = if variance > 0.0 {
            let info = fisher_information(outcome_data.records(), estimation, false, None)?;
            let interval = if outcome_data.is_exact() {
                (estimation, estimation)
            } else {
                fisher_interval(estimation, info, DEFAULT_ALPHA)?
            };
            (info, interval)
        } else {
            (f64::INFINITY, (estimation, estimation))
        };

        Ok(Self {
            num_oracle_queries: outcome_data.num_oracle_queries(),
            estimation_processed: post_processing(estimation),
            confidence_interval_processed: apply_post_processing(interval, post_processing),
            confidence_interval: interval,
            fisher_information: info,
            schedule,
            outcome_data,
            theta,
            estimation,
        })
    }

    pub fn schedule(&self) -> &EvaluationSchedule {
        &self.schedule
    }

    pub fn outcome_data(&self) -> &OutcomeData {
        &self.outcome_data
    }

    /// The fitted amplitude angle in `[0, pi/2]`.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// The amplitude estimate `sin^2(theta)`.
    pub fn estimation(&self) -> f64 {
        self.estimation
    }

    /// The estimate mapped through the problem's post-processing.
    pub fn estimation_processed(&self) -> f64 {
        self.estimation_processed
    }

    /// Oracle-equivalent query count for the run.
    pub fn num_oracle_queries(&self) -> f64 {
        self.num_oracle_queries
    }

    /// Theoretical Fisher information at the estimate.
    pub fn fisher_information(&self) -> f64 {
        self.fisher_information
    }

    /// The stored Fisher interval at [`DEFAULT_ALPHA`], amplitude domain.
    pub fn confidence_interval(&self) -> (f64, f64) {
        self.confidence_interval
    }

    /// The stored interval mapped through the problem's post-processing.
    pub fn confidence_interval_processed(&self) -> (f64, f64) {
        self.confidence_interval_processed
    }
}
