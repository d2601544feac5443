//! estimation::solver — the maximum-likelihood solve step.
//!
//! Purpose
//! -------
//! Drive a [`Minimizer`] over a likelihood model's negative log-likelihood
//! and validate the returned angle before it feeds the amplitude map and
//! the inference layer.
//!
//! Conventions
//! -----------
//! - The solver maximizes by minimizing the negation; minimizers never see
//!   the sign convention.
//! - A minimizer that reports an angle outside `[0, pi/2]` or a non-finite
//!   one is a contract violation surfaced as
//!   [`OptError::InvalidThetaHat`], not silently clamped.

use crate::estimation::likelihood::LikelihoodModel;
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::minimizer::Minimizer;
use std::f64::consts::FRAC_PI_2;

/// Locate the maximum-likelihood angle for `model` using `minimizer`.
///
/// Parameters
/// ----------
/// - `model`: `&LikelihoodModel`
///   The log-likelihood surface to maximize.
/// - `minimizer`: `&Minimizer`
///   Any bounded 1-D minimizer; handed the negative log-likelihood over
///   the model's search bounds.
///
/// Returns
/// -------
/// `OptResult<f64>`
///   The estimated angle, guaranteed finite and within `[0, pi/2]`.
///
/// Errors
/// ------
/// - Any error the minimizer reports, propagated unchanged.
/// - `OptError::InvalidThetaHat` when the minimizer returns a non-finite
///   angle or one outside the closed domain.
pub fn solve(model: &LikelihoodModel<'_>, minimizer: &Minimizer) -> OptResult<f64> {
    let objective = |theta: f64| model.neg_log_likelihood(theta);
    let theta_hat = minimizer(&objective, model.search_bounds())?;
    if !theta_hat.is_finite() {
        return Err(OptError::InvalidThetaHat {
            value: theta_hat,
            reason: "minimizer returned a non-finite angle",
        });
    }
    if !(0.0..=FRAC_PI_2).contains(&theta_hat) {
        return Err(OptError::InvalidThetaHat {
            value: theta_hat,
            reason: "minimizer returned an angle outside [0, pi/2]",
        });
    }
    Ok(theta_hat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::outcomes::{OutcomeData, ShotOutcome};
    use crate::optimization::minimizer::brute;
    use std::f64::consts::FRAC_PI_6;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of a known angle with the default-style brute scan.
    // - Wall-hugging behavior for all-failure and all-success data.
    // - Rejection of out-of-contract minimizer output.
    //
    // They intentionally DO NOT cover:
    // - Amplitude mapping or interval construction (estimation::mlae and
    //   the inference modules).
    // -------------------------------------------------------------------------

    fn data(records: Vec<ShotOutcome>) -> OutcomeData {
        OutcomeData::from_records(records, false).expect("test records are valid")
    }

    #[test]
    // Purpose
    // -------
    // Verify that the solve step recovers theta = pi/6 from exact
    // expected counts on the schedule [0, 1].
    //
    // Given
    // -----
    // - 1000 shots per entry with successes 250 (sin^2(pi/6) = 1/4) and
    //   1000 (sin^2(pi/2) = 1); a 10001-point grid.
    //
    // Expect
    // ------
    // - theta_hat within 1e-3 of pi/6.
    fn solve_recovers_known_angle_from_expected_counts() {
        // Arrange
        let data = data(vec![
            ShotOutcome { power: 0, successes: 250.0, shots: 1000.0 },
            ShotOutcome { power: 1, successes: 1000.0, shots: 1000.0 },
        ]);
        let model = LikelihoodModel::new(&data);
        let minimizer = brute(10_001);

        // Act
        let theta_hat = solve(&model, &minimizer).expect("solve should succeed");

        // Assert
        assert!((theta_hat - FRAC_PI_6).abs() < 1e-3, "theta_hat = {theta_hat}");
    }

    #[test]
    // Purpose
    // -------
    // Verify degenerate data drives the estimate to the domain walls
    // while staying strictly inside (0, pi/2).
    //
    // Given
    // -----
    // - All-failure records (0 successes) and all-success records on the
    //   schedule [0, 1].
    //
    // Expect
    // ------
    // - theta_hat near 0 and near pi/2 respectively, strictly interior.
    fn solve_hugs_walls_on_degenerate_data() {
        // Arrange
        let all_failures = data(vec![
            ShotOutcome { power: 0, successes: 0.0, shots: 100.0 },
            ShotOutcome { power: 1, successes: 0.0, shots: 100.0 },
        ]);
        let all_successes = data(vec![
            ShotOutcome { power: 0, successes: 100.0, shots: 100.0 },
            ShotOutcome { power: 1, successes: 100.0, shots: 100.0 },
        ]);
        let minimizer = brute(10_001);

        // Act
        let low = solve(&LikelihoodModel::new(&all_failures), &minimizer)
            .expect("solve should succeed");
        let high = solve(&LikelihoodModel::new(&all_successes), &minimizer)
            .expect("solve should succeed");

        // Assert
        assert!(low > 0.0 && low < 1e-3, "low = {low}");
        assert!(high < FRAC_PI_2 && high > FRAC_PI_2 - 1e-3, "high = {high}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure a minimizer that violates its contract is caught before the
    // bogus angle propagates downstream.
    //
    // Given
    // -----
    // - Custom minimizers returning NaN and an angle of 7.0.
    //
    // Expect
    // ------
    // - Both solves fail with `OptError::InvalidThetaHat`.
    fn solve_rejects_out_of_contract_minimizer_output() {
        // Arrange
        let data = data(vec![ShotOutcome { power: 0, successes: 25.0, shots: 100.0 }]);
        let model = LikelihoodModel::new(&data);
        let nan_minimizer: Minimizer = Box::new(|_, _| Ok(f64::NAN));
        let escaped_minimizer: Minimizer = Box::new(|_, _| Ok(7.0));

        // Act
        let nan_result = solve(&model, &nan_minimizer);
        let escaped_result = solve(&model, &escaped_minimizer);

        // Assert
        match nan_result {
            Err(OptError::InvalidThetaHat { .. }) => (),
            other => panic!("expected InvalidThetaHat, got {other:?}"),
        }
        match escaped_result {
            Err(OptError::InvalidThetaHat { value, .. }) => assert_eq!(value, 7.0),
            other => panic!("expected InvalidThetaHat, got {other:?}"),
        }
    }
}
