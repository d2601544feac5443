//! inference::confidence — confidence intervals for amplitude estimates.
//!
//! Purpose
//! -------
//! Construct two-sided confidence intervals around a maximum-likelihood
//! amplitude estimate by one of three methods: the normal approximation
//! from the theoretical Fisher information, the same approximation from
//! the observed information, or a likelihood-ratio scan of the angle
//! domain.
//!
//! Key behaviors
//! -------------
//! - Dispatch on a closed [`ConfidenceMethod`] enum; string tags from the
//!   binding surface are parsed via `FromStr` and unknown tags fail
//!   loudly.
//! - In the exact-probability regime there is no sampling noise, so every
//!   method degenerates to the point interval `(a, a)`.
//! - The likelihood-ratio scan keeps every grid angle whose log-likelihood
//!   clears `logL(theta_hat) - chi2_1(1 - alpha) / 2` and reports the
//!   extremes of that set, mapped through `sin^2` into the amplitude
//!   domain.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < alpha < 1`; validated on every entry point.
//! - Intervals are reported on the amplitude scale; callers map them
//!   through their own post-processing separately.
//!
//! Conventions
//! -----------
//! - Normal-approximation bounds are reported raw: `â ± z/√I` can extend
//!   beyond `[0, 1]` when the information is weak, and callers decide
//!   whether to truncate for presentation.
//! - An empty likelihood-ratio support set (all grid values below the
//!   threshold, possible only with pathological data) degrades to the
//!   full domain `(0, 1)` rather than failing the run.

use crate::estimation::likelihood::LikelihoodModel;
use crate::estimation::mlae::MlaeResult;
use crate::inference::errors::{InfResult, InferenceError};
use crate::inference::fisher::fisher_information;
use crate::optimization::minimizer::default_num_evals;
use ndarray::Array1;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use std::str::FromStr;

/// ConfidenceMethod — the supported interval constructions.
///
/// Variants
/// --------
/// - `Fisher`
///   Normal approximation scaled by the theoretical Fisher information.
/// - `ObservedFisher`
///   Normal approximation scaled by the observed information.
/// - `LikelihoodRatio`
///   Grid scan for the likelihood-ratio acceptance region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceMethod {
    Fisher,
    ObservedFisher,
    LikelihoodRatio,
}

impl FromStr for ConfidenceMethod {
    type Err = InferenceError;

    /// Parse a method tag from the binding surface.
    ///
    /// Accepted tags: `"fisher"`/`"fi"`, `"observed_fisher"`/
    /// `"observed_information"`/`"oi"`, `"likelihood_ratio"`/`"lr"`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "fisher" | "fi" => Ok(ConfidenceMethod::Fisher),
            "observed_fisher" | "observed_information" | "oi" => Ok(ConfidenceMethod::ObservedFisher),
            "likelihood_ratio" | "lr" => Ok(ConfidenceMethod::LikelihoodRatio),
            other => Err(InferenceError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Two-sided confidence interval for a completed estimation run.
///
/// Parameters
/// ----------
/// - `result`: `&MlaeResult`
///   The completed run: records, angle estimate, and amplitude estimate.
/// - `alpha`: `f64`
///   Significance level; the interval has nominal coverage `1 - alpha`.
/// - `method`: `ConfidenceMethod`
///   The interval construction to use.
///
/// Returns
/// -------
/// `InfResult<(f64, f64)>`
///   `(lower, upper)` on the amplitude scale. Likelihood-ratio intervals
///   lie inside `[0, 1]`; the normal-approximation methods report raw
///   bounds that can extend past the domain when information is weak. In
///   the exact-probability regime every method and alpha yields the point
///   interval `(a, a)`.
///
/// Errors
/// ------
/// - `InferenceError::InvalidAlpha` for `alpha` outside (0, 1).
/// - `InferenceError::DegenerateAmplitude` from the Fisher-based methods
///   when the estimate sits exactly on a domain wall.
pub fn confidence_interval(
    result: &MlaeResult, alpha: f64, method: ConfidenceMethod,
) -> InfResult<(f64, f64)> {
    validate_alpha(alpha)?;
    if result.outcome_data().is_exact() {
        return Ok((result.estimation(), result.estimation()));
    }
    match method {
        ConfidenceMethod::Fisher => {
            let info =
                fisher_information(result.outcome_data().records(), result.estimation(), false, None)?;
            fisher_interval(result.estimation(), info, alpha)
        }
        ConfidenceMethod::ObservedFisher => {
            let info =
                fisher_information(result.outcome_data().records(), result.estimation(), true, None)?;
            fisher_interval(result.estimation(), info, alpha)
        }
        ConfidenceMethod::LikelihoodRatio => likelihood_ratio_confint(result, alpha),
    }
}

/// Normal-approximation interval `a ± z_{1 - alpha/2} / sqrt(info)`.
///
/// Bounds are not truncated into `[0, 1]`: with weak information the
/// interval can legitimately extend past the amplitude domain.
///
/// Shared by [`confidence_interval`] and the estimator's result assembly,
/// which computes the default interval from the information value it has
/// already stored.
pub fn fisher_interval(estimation: f64, info: f64, alpha: f64) -> InfResult<(f64, f64)> {
    validate_alpha(alpha)?;
    let standard_normal = Normal::new(0.0, 1.0).expect("unit normal");
    let half_width = standard_normal.inverse_cdf(1.0 - alpha / 2.0) / info.sqrt();
    Ok((estimation - half_width, estimation + half_width))
}

/// Map an amplitude-domain interval through a post-processing function.
///
/// The map is applied endpoint-wise; callers whose post-processing is
/// decreasing receive a reversed pair, matching the convention that the
/// processed interval reports `(f(lower), f(upper))`.
pub fn apply_post_processing(
    interval: (f64, f64), post_processing: &dyn Fn(f64) -> f64,
) -> (f64, f64) {
    (post_processing(interval.0), post_processing(interval.1))
}

//
// ---------- Private helpers ----------
//

fn validate_alpha(alpha: f64) -> InfResult<()> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(InferenceError::InvalidAlpha(alpha));
    }
    Ok(())
}

/// Likelihood-ratio acceptance region, scanned on the same adaptive grid
/// the default minimizer uses.
fn likelihood_ratio_confint(result: &MlaeResult, alpha: f64) -> InfResult<(f64, f64)> {
    let model = LikelihoodModel::new(result.outcome_data());
    let (lower, upper) = model.search_bounds();
    let num_evals = default_num_evals(result.schedule().k_max());

    let chi2_quantile = ChiSquared::new(1.0).expect("freedom = 1").inverse_cdf(1.0 - alpha);
    let threshold = model.log_likelihood(result.theta()) - chi2_quantile / 2.0;

    let grid = Array1::linspace(lower, upper, num_evals);
    let mut theta_lower = f64::INFINITY;
    let mut theta_upper = f64::NEG_INFINITY;
    for &theta in grid.iter() {
        if model.log_likelihood(theta) >= threshold {
            theta_lower = theta_lower.min(theta);
            theta_upper = theta_upper.max(theta);
        }
    }

    if theta_lower > theta_upper {
        // Nothing cleared the threshold; degrade to the full domain.
        return Ok((0.0, 1.0));
    }
    Ok((theta_lower.sin().powi(2), theta_upper.sin().powi(2)))
}
