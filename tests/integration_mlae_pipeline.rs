//! Integration tests for maximum-likelihood amplitude estimation.
//!
//! Purpose
//! -------
//! - Validate the end-to-end estimation pipeline: from an evaluation
//!   schedule and an experiment-runner collaborator, through outcome
//!   extraction and the maximum-likelihood fit, to Fisher information and
//!   confidence intervals by every supported method.
//! - Exercise realistic regimes (exponential schedules, deterministic
//!   expected counts, exact probabilities) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `estimation::schedule` / `estimation::outcomes`:
//!   - Exponential schedule expansion and extraction from both regimes.
//! - `estimation::mlae::MaximumLikelihoodAmplitudeEstimation`:
//!   - Full runs against a runner, degenerate-data behavior, result
//!     assembly.
//! - `inference::fisher` / `inference::confidence`:
//!   - Interval construction by every method, the exact-regime
//!     degeneration, and shot-scaling of interval widths.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (grid sizing,
//!   ingestion error branches, method-tag parsing) — these are covered by
//!   unit tests.
//! - Python bindings — those are expected to be tested from the packaging
//!   layer.
//! - Statistical coverage studies over random draws — the runners here are
//!   deterministic by construction so that every assertion is exact.
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};
use std::str::FromStr;

use rust_mlae::{
    estimation::{
        EstResult, EstimationError, EstimationProblem, EvaluationSchedule, ExperimentRunner,
        MaximumLikelihoodAmplitudeEstimation, RawOutcome,
    },
    inference::{ConfidenceMethod, InferenceError, confidence_interval},
};

/// Purpose
/// -------
/// Deterministic runner emitting the *expected* counts for a known angle:
/// at power k, successes = round(shots * sin^2((2k + 1) theta)).
///
/// Parameters
/// ----------
/// - `theta`: The true amplitude angle generating the counts.
/// - `shots`: Shots per schedule entry; must be `> 0`.
///
/// Returns
/// -------
/// - One count map per schedule entry with labels "1" (good) and "0".
///
/// Usage
/// -----
/// - Lets recovery tests assert tight tolerances without seeding an RNG:
///   the maximum-likelihood fit of expectation-matching counts sits at the
///   generating angle up to grid resolution.
struct ExpectedCountsRunner {
    theta: f64,
    shots: u64,
}

impl ExperimentRunner for ExpectedCountsRunner {
    fn fetch_outcomes(&self, schedule: &EvaluationSchedule) -> EstResult<Vec<RawOutcome>> {
        let payloads = schedule
            .powers()
            .iter()
            .map(|&k| {
                let p_good = ((2 * k + 1) as f64 * self.theta).sin().powi(2);
                let successes = (self.shots as f64 * p_good).round() as u64;
                let mut counts = HashMap::new();
                counts.insert("1".to_string(), successes);
                counts.insert("0".to_string(), self.shots - successes);
                RawOutcome::Counts(counts)
            })
            .collect();
        Ok(payloads)
    }
}

/// Runner emitting exact two-state probability vectors for a known angle.
struct ExactProbabilityRunner {
    theta: f64,
}

impl ExperimentRunner for ExactProbabilityRunner {
    fn fetch_outcomes(&self, schedule: &EvaluationSchedule) -> EstResult<Vec<RawOutcome>> {
        let payloads = schedule
            .powers()
            .iter()
            .map(|&k| {
                let p_good = ((2 * k + 1) as f64 * self.theta).sin().powi(2);
                RawOutcome::Probabilities(vec![1.0 - p_good, p_good])
            })
            .collect();
        Ok(payloads)
    }
}

fn good_one() -> EstimationProblem {
    EstimationProblem::new(|label| label == "1")
}

#[test]
// Purpose
// -------
// Verify the full sampled-regime pipeline recovers a known parameter on
// the conventional exponential schedule.
//
// Given
// -----
// - The exponential schedule with m = 3 ([0, 1, 2, 4]), 1000 shots per
//   entry, counts generated at theta = pi/6.
//
// Expect
// ------
// - theta_hat within 0.01 of pi/6 and estimation within 0.01 of 0.25.
// - theta_hat strictly inside (0, pi/2).
fn pipeline_recovers_known_parameter_on_exponential_schedule() {
    // Arrange
    let estimator =
        MaximumLikelihoodAmplitudeEstimation::new(EvaluationSchedule::exponential(3));
    let runner = ExpectedCountsRunner { theta: FRAC_PI_6, shots: 1000 };

    // Act
    let result = estimator.estimate(&runner, &good_one()).expect("pipeline should succeed");

    // Assert
    assert!((result.theta() - FRAC_PI_6).abs() < 0.01, "theta = {}", result.theta());
    assert!((result.estimation() - 0.25).abs() < 0.01, "estimation = {}", result.estimation());
    assert!(result.theta() > 0.0 && result.theta() < FRAC_PI_2);
}

#[test]
// Purpose
// -------
// Verify degenerate data drives the estimate to the appropriate wall
// while the fitted angle stays strictly interior.
//
// Given
// -----
// - All-failure and all-success counts on the schedule [0, 1, 2] with
//   500 shots per entry.
//
// Expect
// ------
// - All failures: theta_hat near 0, estimation near 0.
// - All successes: theta_hat near pi/2, estimation near 1; both angles
//   strictly inside (0, pi/2).
fn degenerate_data_estimates_near_walls_but_strictly_interior() {
    // Arrange
    let schedule = EvaluationSchedule::from_powers(vec![0, 1, 2]).expect("non-empty");
    let estimator = MaximumLikelihoodAmplitudeEstimation::new(schedule);
    let none = ExpectedCountsRunner { theta: 0.0, shots: 500 };
    let all = ExpectedCountsRunner { theta: FRAC_PI_2, shots: 500 };

    // Act
    let low = estimator.estimate(&none, &good_one()).expect("pipeline should succeed");
    let high = estimator.estimate(&all, &good_one()).expect("pipeline should succeed");

    // Assert
    assert!(low.theta() > 0.0 && low.theta() < 1e-3, "low theta = {}", low.theta());
    assert!(low.estimation() < 1e-6, "low estimation = {}", low.estimation());
    assert!(
        high.theta() < FRAC_PI_2 && high.theta() > FRAC_PI_2 - 1e-3,
        "high theta = {}",
        high.theta()
    );
    assert!(high.estimation() > 1.0 - 1e-6, "high estimation = {}", high.estimation());
}

#[test]
// Purpose
// -------
// Verify the exact-probability regime degenerates every interval method
// to the point estimate at every level.
//
// Given
// -----
// - Exact probabilities for theta = pi/6 on the exponential schedule
//   with m = 2.
//
// Expect
// ------
// - For each method and alpha in {0.01, 0.05, 0.32}, the interval is
//   exactly (estimation, estimation).
fn exact_regime_degenerates_every_interval_method() {
    // Arrange
    let estimator =
        MaximumLikelihoodAmplitudeEstimation::new(EvaluationSchedule::exponential(2));
    let runner = ExactProbabilityRunner { theta: FRAC_PI_6 };
    let result = estimator.estimate(&runner, &good_one()).expect("pipeline should succeed");
    let methods = [
        ConfidenceMethod::Fisher,
        ConfidenceMethod::ObservedFisher,
        ConfidenceMethod::LikelihoodRatio,
    ];

    // Act & Assert
    assert!((result.estimation() - 0.25).abs() < 1e-3);
    for method in methods {
        for alpha in [0.01, 0.05, 0.32] {
            let (lower, upper) = confidence_interval(&result, alpha, method)
                .expect("exact-regime interval should succeed");
            assert_eq!(lower, result.estimation(), "{method:?} at alpha = {alpha}");
            assert_eq!(upper, result.estimation(), "{method:?} at alpha = {alpha}");
        }
    }
}

#[test]
// Purpose
// -------
// Verify Fisher-interval widths shrink as shots grow and that every
// method produces an interval containing the estimate.
//
// Given
// -----
// - Expected counts at theta = pi/6 on the schedule [0, 1, 2] with 100
//   and 10000 shots per entry.
//
// Expect
// ------
// - The 10000-shot Fisher interval is strictly narrower than the
//   100-shot one.
// - Fisher, observed-Fisher, and likelihood-ratio intervals all contain
//   the estimate.
fn interval_widths_shrink_with_shots_and_contain_the_estimate() {
    // Arrange
    let schedule = EvaluationSchedule::from_powers(vec![0, 1, 2]).expect("non-empty");
    let estimator = MaximumLikelihoodAmplitudeEstimation::new(schedule);
    let small = ExpectedCountsRunner { theta: FRAC_PI_6, shots: 100 };
    let large = ExpectedCountsRunner { theta: FRAC_PI_6, shots: 10_000 };

    // Act
    let small_result = estimator.estimate(&small, &good_one()).expect("pipeline should succeed");
    let large_result = estimator.estimate(&large, &good_one()).expect("pipeline should succeed");

    // Assert
    let (sl, su) = confidence_interval(&small_result, 0.05, ConfidenceMethod::Fisher)
        .expect("interval should succeed");
    let (ll, lu) = confidence_interval(&large_result, 0.05, ConfidenceMethod::Fisher)
        .expect("interval should succeed");
    assert!(lu - ll < su - sl, "widths: small = {}, large = {}", su - sl, lu - ll);

    for method in [
        ConfidenceMethod::Fisher,
        ConfidenceMethod::ObservedFisher,
        ConfidenceMethod::LikelihoodRatio,
    ] {
        let (lower, upper) = confidence_interval(&large_result, 0.05, method)
            .expect("interval should succeed");
        assert!(
            lower <= large_result.estimation() && large_result.estimation() <= upper,
            "{method:?}: ({lower}, {upper}) misses {}",
            large_result.estimation()
        );
    }
}

#[test]
// Purpose
// -------
// Verify result bookkeeping: oracle-query accounting, Fisher information
// scaling with shots, and post-processing of estimate and interval.
//
// Given
// -----
// - Expected counts at theta = pi/6 on the schedule [0, 1, 2, 4] with
//   1000 shots per entry and the post-processing map `10 a`.
//
// Expect
// ------
// - num_oracle_queries = 1000 * (0 + 1 + 2 + 4) = 7000.
// - fisher_information positive and finite.
// - estimation_processed and the processed interval are the raw values
//   scaled by 10.
fn result_bookkeeping_tracks_queries_information_and_post_processing() {
    // Arrange
    let schedule = EvaluationSchedule::from_powers(vec![0, 1, 2, 4]).expect("non-empty");
    let estimator = MaximumLikelihoodAmplitudeEstimation::new(schedule);
    let runner = ExpectedCountsRunner { theta: FRAC_PI_6, shots: 1000 };
    let problem = good_one().with_post_processing(|a| 10.0 * a);

    // Act
    let result = estimator.estimate(&runner, &problem).expect("pipeline should succeed");

    // Assert
    assert_eq!(result.num_oracle_queries(), 7000.0);
    assert!(result.fisher_information().is_finite() && result.fisher_information() > 0.0);
    assert!(
        (result.estimation_processed() - 10.0 * result.estimation()).abs() < 1e-12,
        "processed = {}",
        result.estimation_processed()
    );
    let (lower, upper) = result.confidence_interval();
    let (pl, pu) = result.confidence_interval_processed();
    assert!((pl - 10.0 * lower).abs() < 1e-12 && (pu - 10.0 * upper).abs() < 1e-12);
}

#[test]
// Purpose
// -------
// Verify configuration and payload errors surface as their dedicated
// variants instead of poisoning the fit.
//
// Given
// -----
// - An unknown confidence-method tag.
// - A runner mixing probability and count payloads in one run.
//
// Expect
// ------
// - `InferenceError::UnsupportedMethod` and
//   `EstimationError::MixedOutcomeKinds` respectively.
fn configuration_and_payload_errors_surface_as_dedicated_variants() {
    // Arrange
    struct MixedRunner;
    impl ExperimentRunner for MixedRunner {
        fn fetch_outcomes(&self, _schedule: &EvaluationSchedule) -> EstResult<Vec<RawOutcome>> {
            let mut counts = HashMap::new();
            counts.insert("1".to_string(), 10u64);
            Ok(vec![RawOutcome::Probabilities(vec![0.5, 0.5]), RawOutcome::Counts(counts)])
        }
    }
    let schedule = EvaluationSchedule::from_powers(vec![0, 1]).expect("non-empty");
    let estimator = MaximumLikelihoodAmplitudeEstimation::new(schedule);

    // Act
    let bad_tag = ConfidenceMethod::from_str("bogus");
    let mixed = estimator.estimate(&MixedRunner, &good_one());

    // Assert
    match bad_tag {
        Err(InferenceError::UnsupportedMethod(tag)) => assert_eq!(tag, "bogus"),
        other => panic!("expected UnsupportedMethod, got {other:?}"),
    }
    match mixed {
        Err(EstimationError::MixedOutcomeKinds { index: 1 }) => (),
        other => panic!("expected MixedOutcomeKinds, got {other:?}"),
    }
}
