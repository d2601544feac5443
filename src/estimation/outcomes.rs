//! estimation::outcomes — normalization of raw experiment results.
//!
//! Purpose
//! -------
//! Turn the payloads returned by an experiment-runner collaborator (exact
//! basis-state probability vectors or label→count maps) into the uniform,
//! schedule-indexed [`ShotOutcome`] records the likelihood model consumes,
//! validating regime uniformity and per-entry totals on the way in.
//!
//! Key behaviors
//! -------------
//! - Classify each basis label with an externally supplied good-state
//!   predicate and accumulate its probability mass or counts.
//! - Keep `power`, `successes`, and `shots` together in one typed record
//!   per schedule entry instead of parallel arrays, so the three fields
//!   can never drift out of alignment.
//! - Reject mixed regimes, zero-shot entries, and out-of-range
//!   probabilities at ingestion, before anything reaches the optimizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - `records.len()` equals the schedule length, in schedule order.
//! - Every record satisfies `0 <= successes <= shots` with `shots > 0`
//!   and all fields finite.
//! - `exact` is true iff the data came from the probability regime, in
//!   which case every `shots` is exactly 1.
//!
//! Conventions
//! -----------
//! - Basis labels in the probability regime are the MSB-first binary
//!   rendering of the vector index, at the bit width implied by the
//!   vector length.
//! - In the sampled regime `successes` is an integral count stored as
//!   `f64`; in the exact regime it is a probability in [0, 1].

use crate::estimation::errors::{EstResult, EstimationError};
use crate::estimation::schedule::EvaluationSchedule;
use std::collections::HashMap;

/// Raw per-schedule-entry payload from the experiment-runner collaborator.
///
/// Variants
/// --------
/// - `Probabilities(probs)`
///   Exact basis-state probabilities indexable by classical label
///   (analytic regime; an implicit total of one shot).
/// - `Counts(counts)`
///   Observed label→count map (sampled regime).
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    Probabilities(Vec<f64>),
    Counts(HashMap<String, u64>),
}

/// One schedule entry's outcome: the amplification power together with the
/// success mass and the total shot count observed at that power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotOutcome {
    pub power: u64,
    pub successes: f64,
    pub shots: f64,
}

/// OutcomeData — validated, regime-uniform outcome records for one run.
///
/// Purpose
/// -------
/// Own the extraction product consumed by the likelihood model, the Fisher
/// calculators, and the confidence-interval engine, together with the
/// regime flag that decides whether sampling noise exists at all.
///
/// Key behaviors
/// -------------
/// - [`OutcomeData::extract`] classifies collaborator payloads with the
///   good-state predicate and validates them entry by entry.
/// - [`OutcomeData::from_records`] accepts pre-classified records (used by
///   the Python bindings) under the same invariants.
/// - [`OutcomeData::num_oracle_queries`] reports the oracle-equivalent
///   query count Σᵢ shotsᵢ·kᵢ.
///
/// Invariants
/// ----------
/// - See the module-level invariants; both constructors enforce them.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeData {
    records: Vec<ShotOutcome>,
    exact: bool,
}

impl OutcomeData {
    /// Normalize raw collaborator payloads into validated records.
    ///
    /// Parameters
    /// ----------
    /// - `schedule`: `&EvaluationSchedule`
    ///   The run's amplification powers; `raw` must align with it one to
    ///   one, in order.
    /// - `raw`: `&[RawOutcome]`
    ///   One payload per schedule entry, uniformly of one regime.
    /// - `is_good_state`: `&dyn Fn(&str) -> bool`
    ///   Externally supplied predicate classifying a classical label as a
    ///   success.
    ///
    /// Returns
    /// -------
    /// `EstResult<OutcomeData>`
    ///   Validated records in schedule order, with `exact` set from the
    ///   payload regime.
    ///
    /// Errors
    /// ------
    /// - `EstimationError::OutcomeLengthMismatch` when `raw.len()` differs
    ///   from the schedule length.
    /// - `EstimationError::MixedOutcomeKinds` when regimes are mixed.
    /// - `EstimationError::InvalidProbability` for a non-finite or
    ///   out-of-range probability.
    /// - `EstimationError::SuccessesExceedShots` when a probability
    ///   vector's accumulated good-state mass exceeds the implicit single
    ///   shot.
    /// - `EstimationError::ZeroShots` when a sampled entry has no counts.
    pub fn extract(
        schedule: &EvaluationSchedule, raw: &[RawOutcome], is_good_state: &dyn Fn(&str) -> bool,
    ) -> EstResult<Self> {
        if raw.len() != schedule.len() {
            return Err(EstimationError::OutcomeLengthMismatch {
                expected: schedule.len(),
                actual: raw.len(),
            });
        }

        let exact = matches!(raw[0], RawOutcome::Probabilities(_));
        let mut records = Vec::with_capacity(raw.len());
        for (index, (outcome, &power)) in raw.iter().zip(schedule.powers()).enumerate() {
            let record = match outcome {
                RawOutcome::Probabilities(probs) => {
                    if !exact {
                        return Err(EstimationError::MixedOutcomeKinds { index });
                    }
                    extract_probabilities(index, power, probs, is_good_state)?
                }
                RawOutcome::Counts(counts) => {
                    if exact {
                        return Err(EstimationError::MixedOutcomeKinds { index });
                    }
                    extract_counts(index, power, counts, is_good_state)?
                }
            };
            records.push(record);
        }

        Ok(Self { records, exact })
    }

    /// Wrap pre-classified records, enforcing the same invariants as
    /// [`OutcomeData::extract`].
    ///
    /// Errors
    /// ------
    /// - `EstimationError::EmptySchedule` for an empty record list.
    /// - `EstimationError::ZeroShots`, `SuccessesExceedShots`, or
    ///   `InvalidShotRecord` for records violating
    ///   `0 <= successes <= shots`, `shots > 0`, or finiteness.
    pub fn from_records(records: Vec<ShotOutcome>, exact: bool) -> EstResult<Self> {
        if records.is_empty() {
            return Err(EstimationError::EmptySchedule);
        }
        for (index, record) in records.iter().enumerate() {
            if !record.successes.is_finite() || record.successes < 0.0 {
                return Err(EstimationError::InvalidShotRecord {
                    index,
                    value: record.successes,
                    reason: "successes must be finite and non-negative",
                });
            }
            if !record.shots.is_finite() {
                return Err(EstimationError::InvalidShotRecord {
                    index,
                    value: record.shots,
                    reason: "shots must be finite",
                });
            }
            if record.shots <= 0.0 {
                return Err(EstimationError::ZeroShots { index });
            }
            if record.successes > record.shots {
                return Err(EstimationError::SuccessesExceedShots {
                    index,
                    successes: record.successes,
                    shots: record.shots,
                });
            }
        }
        Ok(Self { records, exact })
    }

    /// The validated records, one per schedule entry, in schedule order.
    pub fn records(&self) -> &[ShotOutcome] {
        &self.records
    }

    /// True iff the data came from the exact-probability regime.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Oracle-equivalent query count: the shot-weighted sum of the
    /// scheduled powers, Σᵢ shotsᵢ·kᵢ. In the exact regime each entry
    /// counts as a single shot.
    pub fn num_oracle_queries(&self) -> f64 {
        self.records.iter().map(|r| r.shots * r.power as f64).sum()
    }

    /// Total shots across all schedule entries.
    pub fn total_shots(&self) -> f64 {
        self.records.iter().map(|r| r.shots).sum()
    }
}

//
// ---------- Private helpers ----------
//

/// Bit width used to render vector indices as classical labels.
fn label_width(len: usize) -> usize {
    if len <= 2 {
        1
    } else {
        (usize::BITS - (len - 1).leading_zeros()) as usize
    }
}

/// Slack for accumulated rounding when summing basis probabilities.
const PROB_MASS_TOL: f64 = 1e-9;

fn extract_probabilities(
    index: usize, power: u64, probs: &[f64], is_good_state: &dyn Fn(&str) -> bool,
) -> EstResult<ShotOutcome> {
    if probs.is_empty() {
        return Err(EstimationError::ZeroShots { index });
    }
    let width = label_width(probs.len());
    let mut successes = 0.0;
    for (basis, &probability) in probs.iter().enumerate() {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(EstimationError::InvalidProbability { index, value: probability });
        }
        let label = format!("{basis:0width$b}");
        if is_good_state(&label) {
            successes += probability;
        }
    }
    // Per-element checks pass vectors like [0.8, 0.8]; the accumulated
    // good-state mass must still fit inside the implicit single shot.
    if successes > 1.0 + PROB_MASS_TOL {
        return Err(EstimationError::SuccessesExceedShots { index, successes, shots: 1.0 });
    }
    Ok(ShotOutcome { power, successes: successes.min(1.0), shots: 1.0 })
}

fn extract_counts(
    index: usize, power: u64, counts: &HashMap<String, u64>, is_good_state: &dyn Fn(&str) -> bool,
) -> EstResult<ShotOutcome> {
    let shots: u64 = counts.values().sum();
    if shots == 0 {
        return Err(EstimationError::ZeroShots { index });
    }
    let successes: u64 =
        counts.iter().filter(|(label, _)| is_good_state(label)).map(|(_, &count)| count).sum();
    Ok(ShotOutcome { power, successes: successes as f64, shots: shots as f64 })
}
